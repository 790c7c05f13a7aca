use serde::{Deserialize, Serialize};

/// Envelope wrapping every backend JSON response.
///
/// A missing (`null`) `result` means the backend rejected the request and
/// `message` says why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of a local action such as saving user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStatus {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

pub mod task {
    use super::*;

    /// Handle of a computation the backend runs in the background.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PendingTask {
        pub task_id: u64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum TaskState {
        Pending,
        Completed,
        NotFound,
    }

    /// Body of `GET /tasks/{id}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TaskResponse {
        pub status: TaskState,
        #[serde(default)]
        pub outcome: Option<serde_json::Value>,
    }
}

pub mod asset {
    use std::collections::BTreeMap;

    use super::*;

    /// An asset as returned by the search and mapping endpoints.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AssetInfo {
        pub identifier: String,
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub symbol: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub asset_type: Option<String>,
    }

    impl AssetInfo {
        pub fn new(identifier: impl Into<String>) -> Self {
            Self {
                identifier: identifier.into(),
                name: None,
                symbol: None,
                asset_type: None,
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetSearch {
        pub value: String,
        pub limit: usize,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetMappingsRequest {
        pub identifiers: Vec<String>,
    }

    /// One entry of the mappings response; keyed by identifier, so the
    /// identifier itself is not repeated.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct AssetMapping {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub symbol: Option<String>,
        #[serde(default)]
        pub asset_type: Option<String>,
    }

    impl AssetMapping {
        pub fn into_info(self, identifier: impl Into<String>) -> AssetInfo {
            AssetInfo {
                identifier: identifier.into(),
                name: self.name,
                symbol: self.symbol,
                asset_type: self.asset_type,
            }
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AssetMappings {
        #[serde(default)]
        pub assets: BTreeMap<String, AssetMapping>,
    }
}

pub mod filter {
    use std::fmt;

    use super::{asset::AssetInfo, *};

    /// Namespace under which saved filters are grouped, one per table.
    #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SavedFilterLocation(String);

    impl SavedFilterLocation {
        pub const HISTORY_TRADES: &'static str = "HISTORY_TRADES";
        pub const HISTORY_DEPOSITS_WITHDRAWALS: &'static str = "HISTORY_DEPOSITS_WITHDRAWALS";
        pub const HISTORY_LEDGER_ACTIONS: &'static str = "HISTORY_LEDGER_ACTIONS";
        pub const HISTORY_EVENTS: &'static str = "HISTORY_EVENTS";

        pub fn new(location: impl Into<String>) -> Self {
            Self(location.into())
        }

        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl fmt::Display for SavedFilterLocation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<&str> for SavedFilterLocation {
        fn from(value: &str) -> Self {
            Self::new(value)
        }
    }

    /// Value of a filter condition: free text, or a resolved asset.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum SuggestionValue {
        Text(String),
        Asset(AssetInfo),
    }

    impl SuggestionValue {
        /// The string used when the value is stored or sent to the backend.
        pub fn as_text(&self) -> &str {
            match self {
                Self::Text(value) => value,
                Self::Asset(asset) => &asset.identifier,
            }
        }
    }

    impl From<&str> for SuggestionValue {
        fn from(value: &str) -> Self {
            Self::Text(value.to_string())
        }
    }

    impl From<AssetInfo> for SuggestionValue {
        fn from(value: AssetInfo) -> Self {
            Self::Asset(value)
        }
    }

    /// Stored form of a filter condition.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BaseSuggestion {
        pub key: String,
        pub value: SuggestionValue,
    }

    /// A filter condition as shown to the user.
    ///
    /// `index`, `total` and `asset` are display attributes computed when
    /// reading; they are never stored.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Suggestion {
        pub key: String,
        pub value: SuggestionValue,
        pub index: usize,
        pub total: usize,
        pub asset: bool,
    }

    impl Suggestion {
        pub fn new(key: impl Into<String>, value: impl Into<SuggestionValue>, asset: bool) -> Self {
            Self {
                key: key.into(),
                value: value.into(),
                index: 0,
                total: 1,
                asset,
            }
        }
    }

    impl From<Suggestion> for BaseSuggestion {
        fn from(value: Suggestion) -> Self {
            Self {
                key: value.key,
                value: value.value,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ActionResult,
        asset::AssetInfo,
        filter::{BaseSuggestion, SuggestionValue},
        task::{PendingTask, TaskResponse, TaskState},
    };

    #[test]
    fn envelope_with_null_result() {
        let body: ActionResult<PendingTask> =
            serde_json::from_str(r#"{"result": null, "message": "not logged in"}"#).unwrap();
        assert!(body.result.is_none());
        assert_eq!(body.message.as_deref(), Some("not logged in"));
    }

    #[test]
    fn envelope_with_null_message() {
        let body: ActionResult<PendingTask> =
            serde_json::from_str(r#"{"result": null, "message": null}"#).unwrap();
        assert!(body.result.is_none());
        assert!(body.message.is_none());
    }

    #[test]
    fn envelope_with_task() {
        let body: ActionResult<PendingTask> =
            serde_json::from_str(r#"{"result": {"task_id": 42}, "message": ""}"#).unwrap();
        assert_eq!(body.result, Some(PendingTask { task_id: 42 }));
    }

    #[test]
    fn suggestion_value_accepts_text_or_asset() {
        let text: BaseSuggestion =
            serde_json::from_str(r#"{"key": "type", "value": "gift"}"#).unwrap();
        assert_eq!(text.value, SuggestionValue::Text("gift".to_string()));

        let asset: BaseSuggestion = serde_json::from_str(
            r#"{"key": "asset", "value": {"identifier": "ETH", "symbol": "ETH"}}"#,
        )
        .unwrap();
        match asset.value {
            SuggestionValue::Asset(AssetInfo { identifier, .. }) => assert_eq!(identifier, "ETH"),
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn task_state_is_kebab_case() {
        let body: TaskResponse =
            serde_json::from_str(r#"{"status": "not-found", "outcome": null}"#).unwrap();
        assert_eq!(body.status, TaskState::NotFound);
    }
}
