//! Table filters for the history views.
//!
//! The crate contains:
//!
//! - the [`Matcher`] schema describing how a filterable field is validated,
//!   suggested and (de)serialized;
//! - the ledger-action filter ([`LedgerActionsFilter`]) and its
//!   [`RouteFilterSchema`];
//! - the [`SavedFilterStore`], which keeps a bounded list of saved filter
//!   combinations per table in the user's [`FrontendSettings`].
//!
//! Nothing here holds global state: settings, translations and asset lookups
//! are passed in through the [`SettingsRepository`], [`Messages`] and
//! [`AssetResolver`] traits.
pub use assets::{AssetResolver, MemoryAssets};
pub use date::{DEFAULT_DATE_INPUT_FORMAT, DateInputFormat};
pub use error::FilterError;
pub use ledger_actions::{
    LedgerActionFilterKey, LedgerActionFilterValueKey, LedgerActionFilters, LedgerActionMatcher,
    LedgerActionType, LedgerActionsFilter,
};
pub use matcher::{FilterKey, Matcher, MatcherKind};
pub use messages::{EnglishMessages, Messages};
pub use route::RouteFilterSchema;
pub use saved::{LIMIT_PER_LOCATION, SavedFilterStore};
pub use settings::{
    FrontendSettings, FrontendSettingsPatch, JsonSettings, MemorySettings, SavedFiltersMap,
    SettingsRepository,
};

mod assets;
mod date;
mod error;
mod ledger_actions;
mod matcher;
mod messages;
mod route;
mod saved;
mod settings;

type ResultFilter<T> = Result<T, FilterError>;
