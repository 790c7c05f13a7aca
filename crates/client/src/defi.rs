use api_types::task::PendingTask;

use crate::{ApiClient, Result};

const ASYNC_QUERY: [(&str, &str); 1] = [("async_query", "true")];

impl ApiClient {
    /// Starts the DeFi balances computation on the backend.
    pub async fn fetch_all_defi(&self) -> Result<PendingTask> {
        self.get("blockchains/ETH/defi", &ASYNC_QUERY).await
    }

    /// Starts the airdrops check on the backend.
    pub async fn fetch_airdrops(&self) -> Result<PendingTask> {
        self.get("blockchains/ETH/airdrops", &ASYNC_QUERY).await
    }
}
