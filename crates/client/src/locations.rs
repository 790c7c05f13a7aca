use crate::{ApiClient, Result};

impl ApiClient {
    /// Locations that appear in the user's history, used to validate the
    /// `location` filter.
    pub async fn associated_locations(&self) -> Result<Vec<String>> {
        self.get("locations/associated", &[]).await
    }
}
