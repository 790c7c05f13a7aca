use std::collections::BTreeMap;

use api_types::filter::Suggestion;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    AssetResolver, DateInputFormat, FilterError, FilterKey, Matcher, MatcherKind, Messages,
    ResultFilter, RouteFilterSchema,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerActionType {
    Income,
    Expense,
    Loss,
    DividendsIncome,
    DonationReceived,
    Airdrop,
    Gift,
    Grant,
}

impl LedgerActionType {
    pub const ALL: [Self; 8] = [
        Self::Income,
        Self::Expense,
        Self::Loss,
        Self::DividendsIncome,
        Self::DonationReceived,
        Self::Airdrop,
        Self::Gift,
        Self::Grant,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Loss => "loss",
            Self::DividendsIncome => "dividends income",
            Self::DonationReceived => "donation received",
            Self::Airdrop => "airdrop",
            Self::Gift => "gift",
            Self::Grant => "grant",
        }
    }
}

/// Keys users type in the filter box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerActionFilterKey {
    Asset,
    Type,
    Start,
    End,
    Location,
}

impl FilterKey for LedgerActionFilterKey {
    const ALL: &'static [Self] = &[Self::Asset, Self::Type, Self::Start, Self::End, Self::Location];

    fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Type => "type",
            Self::Start => "start",
            Self::End => "end",
            Self::Location => "location",
        }
    }
}

/// Keys the filter state is kept under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerActionFilterValueKey {
    Asset,
    Type,
    Start,
    End,
    Location,
}

impl FilterKey for LedgerActionFilterValueKey {
    const ALL: &'static [Self] = &[Self::Asset, Self::Type, Self::Start, Self::End, Self::Location];

    fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Type => "type",
            Self::Start => "fromTimestamp",
            Self::End => "toTimestamp",
            Self::Location => "location",
        }
    }
}

const ROUTE_KEYS: &[&str] = &["type", "location", "asset", "fromTimestamp", "toTimestamp"];

pub type LedgerActionMatcher = Matcher<LedgerActionFilterKey, LedgerActionFilterValueKey>;

/// Active filter state of the ledger-action table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerActionFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl LedgerActionFilters {
    pub fn get(&self, key: LedgerActionFilterValueKey) -> Option<&str> {
        match key {
            LedgerActionFilterValueKey::Asset => self.asset.as_deref(),
            LedgerActionFilterValueKey::Type => self.action_type.as_deref(),
            LedgerActionFilterValueKey::Start => self.from_timestamp.as_deref(),
            LedgerActionFilterValueKey::End => self.to_timestamp.as_deref(),
            LedgerActionFilterValueKey::Location => self.location.as_deref(),
        }
    }

    pub fn set(&mut self, key: LedgerActionFilterValueKey, value: Option<String>) {
        let slot = match key {
            LedgerActionFilterValueKey::Asset => &mut self.asset,
            LedgerActionFilterValueKey::Type => &mut self.action_type,
            LedgerActionFilterValueKey::Start => &mut self.from_timestamp,
            LedgerActionFilterValueKey::End => &mut self.to_timestamp,
            LedgerActionFilterValueKey::Location => &mut self.location,
        };
        *slot = value;
    }

    /// Builds the state from values recovered through [`RouteFilterSchema`].
    pub fn from_route(values: &BTreeMap<String, String>) -> Self {
        let mut filters = Self::default();
        for (key, value) in values {
            if let Some(key) = LedgerActionFilterValueKey::parse(key) {
                filters.set(key, Some(value.clone()));
            }
        }
        filters
    }

    pub fn to_route(&self) -> BTreeMap<String, String> {
        LedgerActionFilterValueKey::ALL
            .iter()
            .filter_map(|key| {
                self.get(*key)
                    .map(|value| (key.as_str().to_string(), value.to_string()))
            })
            .collect()
    }
}

/// Filter definition and state for the ledger-action table.
///
/// Matchers are derived on every call from the current inputs (messages,
/// date format, associated locations); changing an input through its setter
/// is enough for the next [`LedgerActionsFilter::matchers`] to reflect it.
pub struct LedgerActionsFilter<M> {
    messages: M,
    date_format: DateInputFormat,
    associated_locations: Vec<String>,
    filters: LedgerActionFilters,
}

impl<M: Messages> LedgerActionsFilter<M> {
    pub fn new(messages: M, date_format: DateInputFormat, associated_locations: Vec<String>) -> Self {
        Self {
            messages,
            date_format,
            associated_locations,
            filters: LedgerActionFilters::default(),
        }
    }

    pub fn route_filter_schema() -> RouteFilterSchema {
        RouteFilterSchema::new(ROUTE_KEYS)
    }

    /// Whether a typed key denotes an asset. Used to annotate saved filters.
    pub fn is_asset_key(key: &str) -> bool {
        LedgerActionFilterKey::parse(key) == Some(LedgerActionFilterKey::Asset)
    }

    pub fn set_date_format(&mut self, date_format: DateInputFormat) {
        self.date_format = date_format;
    }

    pub fn set_associated_locations(&mut self, locations: Vec<String>) {
        self.associated_locations = locations;
    }

    pub fn filters(&self) -> &LedgerActionFilters {
        &self.filters
    }

    /// Replaces the active filter state wholesale.
    pub fn update_filter(&mut self, filters: LedgerActionFilters) {
        tracing::debug!("ledger action filters updated: {filters:?}");
        self.filters = filters;
    }

    /// Applies filter state recovered from a URL: a JSON object of optional
    /// strings.
    pub fn update_from_route(&mut self, value: &Value) {
        let values = Self::route_filter_schema().parse(value);
        self.update_filter(LedgerActionFilters::from_route(&values));
    }

    pub fn matchers(&self) -> Vec<LedgerActionMatcher> {
        let date_hint = self.messages.t(
            "ledger_actions.filter.date_hint",
            &[("format", self.date_format.iso_format())],
        );
        vec![
            Matcher {
                key: LedgerActionFilterKey::Asset,
                key_value: LedgerActionFilterValueKey::Asset,
                description: self.messages.t("ledger_actions.filter.asset", &[]),
                hint: None,
                kind: MatcherKind::Asset,
            },
            Matcher {
                key: LedgerActionFilterKey::Type,
                key_value: LedgerActionFilterValueKey::Type,
                description: self.messages.t("ledger_actions.filter.action_type", &[]),
                hint: None,
                kind: MatcherKind::Enum(
                    LedgerActionType::ALL
                        .iter()
                        .map(|kind| kind.as_str().to_string())
                        .collect(),
                ),
            },
            Matcher {
                key: LedgerActionFilterKey::Start,
                key_value: LedgerActionFilterValueKey::Start,
                description: self.messages.t("ledger_actions.filter.start_date", &[]),
                hint: Some(date_hint.clone()),
                kind: MatcherKind::Date(self.date_format.clone()),
            },
            Matcher {
                key: LedgerActionFilterKey::End,
                key_value: LedgerActionFilterValueKey::End,
                description: self.messages.t("ledger_actions.filter.end_date", &[]),
                hint: Some(date_hint),
                kind: MatcherKind::Date(self.date_format.clone()),
            },
            Matcher {
                key: LedgerActionFilterKey::Location,
                key_value: LedgerActionFilterValueKey::Location,
                description: self.messages.t("ledger_actions.filter.location", &[]),
                hint: None,
                kind: MatcherKind::Known(self.associated_locations.clone()),
            },
        ]
    }

    pub fn matcher(&self, key: &str) -> Option<LedgerActionMatcher> {
        let key = LedgerActionFilterKey::parse(key)?;
        self.matchers().into_iter().find(|matcher| matcher.key == key)
    }

    /// Turns the conditions a user picked into filter state. Unknown keys are
    /// skipped; for a repeated key the last condition wins.
    pub fn apply_suggestions(&self, suggestions: &[Suggestion]) -> ResultFilter<LedgerActionFilters> {
        let matchers = self.matchers();
        let mut filters = LedgerActionFilters::default();
        for suggestion in suggestions {
            let Some(matcher) = LedgerActionFilterKey::parse(&suggestion.key)
                .and_then(|key| matchers.iter().find(|matcher| matcher.key == key))
            else {
                tracing::debug!("skipping unknown ledger action filter {}", suggestion.key);
                continue;
            };
            let value = suggestion.value.as_text();
            if !matcher.validate(value) {
                return Err(FilterError::InvalidValue {
                    key: suggestion.key.clone(),
                    value: value.to_string(),
                });
            }
            filters.set(matcher.key_value, Some(matcher.serialize(value)?));
        }
        Ok(filters)
    }

    /// Renders the active filter state back into user-facing conditions.
    /// Values that no longer resolve are left out.
    pub async fn active_suggestions<A: AssetResolver>(
        &self,
        assets: &A,
    ) -> ResultFilter<Vec<Suggestion>> {
        let mut suggestions = Vec::new();
        for matcher in self.matchers() {
            let Some(stored) = self.filters.get(matcher.key_value) else {
                continue;
            };
            if let Some(value) = matcher.deserialize(stored, assets).await? {
                suggestions.push(Suggestion::new(
                    matcher.key.as_str(),
                    value,
                    matcher.is_asset(),
                ));
            }
        }
        Ok(suggestions)
    }
}
