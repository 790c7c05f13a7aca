use api_types::asset::{AssetInfo, AssetMappings, AssetMappingsRequest, AssetSearch};
use filters::{AssetResolver, FilterError};

use crate::{ApiClient, Result};

impl ApiClient {
    pub async fn asset_search(&self, query: &str, limit: usize) -> Result<Vec<AssetInfo>> {
        let body = AssetSearch {
            value: query.to_string(),
            limit,
        };
        self.post("assets/search_levenshtein", &body).await
    }

    pub async fn asset_mappings(&self, identifiers: Vec<String>) -> Result<AssetMappings> {
        self.post("assets/mappings", &AssetMappingsRequest { identifiers })
            .await
    }
}

impl AssetResolver for ApiClient {
    async fn search(&self, query: &str, limit: usize) -> std::result::Result<Vec<AssetInfo>, FilterError> {
        self.asset_search(query, limit)
            .await
            .map_err(|err| FilterError::Asset(err.to_string()))
    }

    async fn info(&self, identifier: &str) -> std::result::Result<Option<AssetInfo>, FilterError> {
        let mut mappings = self
            .asset_mappings(vec![identifier.to_string()])
            .await
            .map_err(|err| FilterError::Asset(err.to_string()))?;
        Ok(mappings
            .assets
            .remove(identifier)
            .map(|mapping| mapping.into_info(identifier)))
    }
}
