use std::fmt;

use api_types::filter::SuggestionValue;

use crate::{AssetResolver, DateInputFormat, FilterError, ResultFilter};

/// How many assets a search returns as suggestions.
const ASSET_SUGGESTIONS_LIMIT: usize = 5;

/// A closed set of string keys, either the keys users type (`start`) or the
/// keys the filter state is stored under (`fromTimestamp`).
pub trait FilterKey: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatcherKind {
    /// Asset reference, suggested through asset search.
    Asset,
    /// One of a fixed set of values.
    Enum(Vec<String>),
    /// A date typed in the user's format, stored as a timestamp.
    Date(DateInputFormat),
    /// One of the values known when the matchers were built.
    Known(Vec<String>),
}

/// Schema entry for one filterable field.
#[derive(Debug, Clone)]
pub struct Matcher<K, V> {
    pub key: K,
    pub key_value: V,
    pub description: String,
    pub hint: Option<String>,
    pub kind: MatcherKind,
}

impl<K: FilterKey, V: FilterKey> Matcher<K, V> {
    pub fn is_asset(&self) -> bool {
        matches!(self.kind, MatcherKind::Asset)
    }

    /// Checks a typed value without any lookup. Asset values only need to be
    /// non-empty here; see [`Matcher::validate_with`].
    pub fn validate(&self, value: &str) -> bool {
        match &self.kind {
            MatcherKind::Asset => !value.trim().is_empty(),
            MatcherKind::Enum(values) | MatcherKind::Known(values) => {
                values.iter().any(|known| known == value)
            }
            MatcherKind::Date(format) => format.to_timestamp(value).is_some(),
        }
    }

    /// Like [`Matcher::validate`], but an asset must also be found by search.
    pub async fn validate_with<A: AssetResolver>(
        &self,
        value: &str,
        assets: &A,
    ) -> ResultFilter<bool> {
        if !self.is_asset() {
            return Ok(self.validate(value));
        }
        if !self.validate(value) {
            return Ok(false);
        }
        let candidates = assets.search(value, ASSET_SUGGESTIONS_LIMIT).await?;
        Ok(candidates.iter().any(|asset| asset.identifier == value))
    }

    /// Converts a typed value into the form kept in the filter state.
    pub fn serialize(&self, value: &str) -> ResultFilter<String> {
        match &self.kind {
            MatcherKind::Date(format) => format
                .to_timestamp(value)
                .map(|ts| ts.to_string())
                .ok_or_else(|| self.invalid(value)),
            _ => Ok(value.to_string()),
        }
    }

    /// Inverse of [`Matcher::serialize`]. Returns `None` when the stored value
    /// no longer resolves (unknown asset, malformed timestamp).
    pub async fn deserialize<A: AssetResolver>(
        &self,
        value: &str,
        assets: &A,
    ) -> ResultFilter<Option<SuggestionValue>> {
        match &self.kind {
            MatcherKind::Asset => Ok(assets.info(value).await?.map(SuggestionValue::Asset)),
            MatcherKind::Date(format) => Ok(value
                .parse::<i64>()
                .ok()
                .and_then(|ts| format.from_timestamp(ts))
                .map(SuggestionValue::Text)),
            MatcherKind::Enum(_) | MatcherKind::Known(_) => {
                Ok(Some(SuggestionValue::Text(value.to_string())))
            }
        }
    }

    pub async fn suggestions<A: AssetResolver>(
        &self,
        query: &str,
        assets: &A,
    ) -> ResultFilter<Vec<SuggestionValue>> {
        match &self.kind {
            MatcherKind::Asset => Ok(assets
                .search(query, ASSET_SUGGESTIONS_LIMIT)
                .await?
                .into_iter()
                .map(SuggestionValue::Asset)
                .collect()),
            MatcherKind::Enum(values) | MatcherKind::Known(values) => {
                let query = query.to_lowercase();
                Ok(values
                    .iter()
                    .filter(|value| value.to_lowercase().starts_with(&query))
                    .map(|value| SuggestionValue::Text(value.clone()))
                    .collect())
            }
            MatcherKind::Date(_) => Ok(Vec::new()),
        }
    }

    fn invalid(&self, value: &str) -> FilterError {
        FilterError::InvalidValue {
            key: self.key.as_str().to_string(),
            value: value.to_string(),
        }
    }
}
