use api_types::{
    ActionStatus,
    filter::{BaseSuggestion, SavedFilterLocation, Suggestion, SuggestionValue},
};

use crate::{FrontendSettingsPatch, Messages, SettingsRepository};

/// Maximum number of saved filter groups per location.
pub const LIMIT_PER_LOCATION: usize = 10;

/// Saved filter combinations for one location, read from and written to
/// the user's settings.
pub struct SavedFilterStore<'a, S, M, F> {
    settings: &'a S,
    messages: &'a M,
    location: SavedFilterLocation,
    is_asset: F,
}

impl<'a, S, M, F> SavedFilterStore<'a, S, M, F>
where
    S: SettingsRepository,
    M: Messages,
    F: Fn(&str) -> bool,
{
    pub fn new(settings: &'a S, messages: &'a M, location: SavedFilterLocation, is_asset: F) -> Self {
        Self {
            settings,
            messages,
            location,
            is_asset,
        }
    }

    pub fn location(&self) -> &SavedFilterLocation {
        &self.location
    }

    pub fn set_location(&mut self, location: SavedFilterLocation) {
        self.location = location;
    }

    /// Saved groups for the current location, annotated for display.
    ///
    /// `index` and `total` are always `0` and `1`.
    pub async fn saved_filters(&self) -> Vec<Vec<Suggestion>> {
        self.stored()
            .await
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|suggestion| Suggestion {
                        asset: (self.is_asset)(&suggestion.key),
                        key: suggestion.key,
                        value: suggestion.value,
                        index: 0,
                        total: 1,
                    })
                    .collect()
            })
            .collect()
    }

    /// Appends `new_filter` unless the location already holds
    /// [`LIMIT_PER_LOCATION`] groups. Structured asset values are stored as
    /// their identifier.
    pub async fn add_filter(&self, new_filter: &[Suggestion]) -> ActionStatus {
        let mut current = self.stored().await;

        if current.len() >= LIMIT_PER_LOCATION {
            tracing::warn!(
                "saved filter limit reached for location {}",
                self.location
            );
            return ActionStatus::failed(self.messages.t(
                "table_filter.saved_filters.saving.limited",
                &[("limit", LIMIT_PER_LOCATION.to_string())],
            ));
        }

        current.push(new_filter.iter().map(normalize).collect());
        self.save_filters(current).await
    }

    /// Removes the group at `index` of [`SavedFilterStore::saved_filters`]
    /// and saves the rest. An out-of-range index removes nothing, but the
    /// list is still saved.
    pub async fn delete_filter(&self, index: usize) -> ActionStatus {
        let mut filters = self.saved_filters().await;
        if index < filters.len() {
            filters.remove(index);
        } else {
            tracing::warn!(
                "no saved filter at index {index} for location {}",
                self.location
            );
        }

        let filters = filters
            .into_iter()
            .map(|group| group.into_iter().map(BaseSuggestion::from).collect())
            .collect();
        self.save_filters(filters).await
    }

    /// Replaces the groups of the current location and persists the whole
    /// saved-filter map.
    pub async fn save_filters(&self, filters: Vec<Vec<BaseSuggestion>>) -> ActionStatus {
        let mut all_saved = self.settings.get().await.saved_filters;
        all_saved.insert(self.location.clone(), filters);

        let status = self
            .settings
            .update(FrontendSettingsPatch {
                saved_filters: Some(all_saved),
                ..Default::default()
            })
            .await;
        if status.success {
            tracing::info!("saved filters updated for location {}", self.location);
        }
        status
    }

    async fn stored(&self) -> Vec<Vec<BaseSuggestion>> {
        self.settings
            .get()
            .await
            .saved_filters
            .remove(&self.location)
            .unwrap_or_default()
    }
}

fn normalize(item: &Suggestion) -> BaseSuggestion {
    let value = match &item.value {
        SuggestionValue::Asset(asset) if item.asset => {
            SuggestionValue::Text(asset.identifier.clone())
        }
        value => value.clone(),
    };
    BaseSuggestion {
        key: item.key.clone(),
        value,
    }
}
