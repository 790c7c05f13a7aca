use std::future::Future;

use api_types::asset::AssetInfo;

use crate::ResultFilter;

/// Asset lookups needed by asset-typed filters.
pub trait AssetResolver: Send + Sync {
    /// Candidates matching `query`, at most `limit`.
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = ResultFilter<Vec<AssetInfo>>> + Send;

    /// Resolve an identifier to its display entity.
    fn info(&self, identifier: &str) -> impl Future<Output = ResultFilter<Option<AssetInfo>>> + Send;
}

/// Fixed asset list, matched case-insensitively on identifier, symbol or name.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    assets: Vec<AssetInfo>,
}

impl MemoryAssets {
    pub fn new(assets: Vec<AssetInfo>) -> Self {
        Self { assets }
    }
}

impl AssetResolver for MemoryAssets {
    async fn search(&self, query: &str, limit: usize) -> ResultFilter<Vec<AssetInfo>> {
        let query = query.to_lowercase();
        let matches = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|value| value.to_lowercase().contains(&query))
        };
        Ok(self
            .assets
            .iter()
            .filter(|asset| {
                asset.identifier.to_lowercase().contains(&query)
                    || matches(&asset.symbol)
                    || matches(&asset.name)
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn info(&self, identifier: &str) -> ResultFilter<Option<AssetInfo>> {
        Ok(self
            .assets
            .iter()
            .find(|asset| asset.identifier == identifier)
            .cloned())
    }
}
