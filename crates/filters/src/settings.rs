use std::{
    collections::BTreeMap,
    fs,
    future::Future,
    path::{Path, PathBuf},
    sync::Arc,
};

use api_types::{
    ActionStatus,
    filter::{BaseSuggestion, SavedFilterLocation},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{DEFAULT_DATE_INPUT_FORMAT, ResultFilter};

pub type SavedFiltersMap = BTreeMap<SavedFilterLocation, Vec<Vec<BaseSuggestion>>>;

/// User preferences kept across sessions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendSettings {
    pub saved_filters: SavedFiltersMap,
    pub date_input_format: String,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            saved_filters: BTreeMap::new(),
            date_input_format: DEFAULT_DATE_INPUT_FORMAT.to_string(),
        }
    }
}

/// Partial update of [`FrontendSettings`]; `None` fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct FrontendSettingsPatch {
    pub saved_filters: Option<SavedFiltersMap>,
    pub date_input_format: Option<String>,
}

impl FrontendSettings {
    pub fn apply(&mut self, patch: FrontendSettingsPatch) {
        if let Some(saved_filters) = patch.saved_filters {
            self.saved_filters = saved_filters;
        }
        if let Some(date_input_format) = patch.date_input_format {
            self.date_input_format = date_input_format;
        }
    }
}

/// Where user settings live.
///
/// `update` is a merge-and-persist of the given fields. Callers doing
/// read-modify-write through `get` then `update` are not isolated from each
/// other: the last write wins.
pub trait SettingsRepository: Send + Sync {
    fn get(&self) -> impl Future<Output = FrontendSettings> + Send;

    fn update(&self, patch: FrontendSettingsPatch) -> impl Future<Output = ActionStatus> + Send;
}

/// Settings stored as a JSON document on disk.
#[derive(Clone, Debug)]
pub struct JsonSettings {
    path: PathBuf,
    inner: Arc<Mutex<FrontendSettings>>,
}

impl JsonSettings {
    /// Loads the file at `path`, or starts from defaults if it does not exist.
    pub fn load(path: impl Into<PathBuf>) -> ResultFilter<Self> {
        let path = path.into();
        let settings = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => FrontendSettings::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            inner: Arc::new(Mutex::new(settings)),
        })
    }
}

impl SettingsRepository for JsonSettings {
    async fn get(&self) -> FrontendSettings {
        self.inner.lock().await.clone()
    }

    async fn update(&self, patch: FrontendSettingsPatch) -> ActionStatus {
        let mut guard = self.inner.lock().await;
        let mut next = guard.clone();
        next.apply(patch);

        if let Err(err) = write_json_file(&self.path, &next) {
            tracing::error!("failed to save settings to {}: {err}", self.path.display());
            return ActionStatus::failed(format!("settings save failed: {err}"));
        }
        *guard = next;
        ActionStatus::ok()
    }
}

fn write_json_file(path: &Path, settings: &FrontendSettings) -> ResultFilter<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_string_pretty(settings)?;
    fs::write(path, payload)?;
    Ok(())
}

/// Settings held in memory only.
#[derive(Clone, Debug, Default)]
pub struct MemorySettings {
    inner: Arc<Mutex<FrontendSettings>>,
    failure: Option<String>,
}

impl MemorySettings {
    pub fn new(settings: FrontendSettings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(settings)),
            failure: None,
        }
    }

    /// A repository whose every update fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            inner: Arc::default(),
            failure: Some(message.into()),
        }
    }
}

impl SettingsRepository for MemorySettings {
    async fn get(&self) -> FrontendSettings {
        self.inner.lock().await.clone()
    }

    async fn update(&self, patch: FrontendSettingsPatch) -> ActionStatus {
        if let Some(message) = &self.failure {
            return ActionStatus::failed(message.clone());
        }
        self.inner.lock().await.apply(patch);
        ActionStatus::ok()
    }
}
