use api_types::ActionResult;
use reqwest::{Response, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::{ApiError, Result};

/// Statuses whose body is an envelope worth reading: success, session
/// conflicts and external-service failures all carry a `message`.
const VALID_WITH_SESSION_AND_EXTERNAL_SERVICE: [StatusCode; 3] =
    [StatusCode::OK, StatusCode::CONFLICT, StatusCode::BAD_GATEWAY];

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        self.get_accepting(path, query, &VALID_WITH_SESSION_AND_EXTERNAL_SERVICE)
            .await
    }

    /// Like [`ApiClient::get`], reading the envelope only for `accepted`
    /// statuses.
    pub(crate) async fn get_accepting<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        accepted: &[StatusCode],
    ) -> Result<T> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!("GET {endpoint}");
        let res = self.http.get(endpoint).query(query).send().await?;
        handle_response(res, accepted).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!("POST {endpoint}");
        let res = self.http.post(endpoint).json(body).send().await?;
        handle_response(res, &VALID_WITH_SESSION_AND_EXTERNAL_SERVICE).await
    }
}

/// Unwraps the backend envelope. A `null` result is a failure carrying the
/// backend's message.
async fn handle_response<T: DeserializeOwned>(res: Response, accepted: &[StatusCode]) -> Result<T> {
    let status = res.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !accepted.contains(&status) {
        tracing::debug!("unexpected status {status} from {}", res.url());
        return Err(ApiError::UnexpectedStatus(status));
    }

    let body = res.json::<ActionResult<T>>().await?;
    match body.result {
        Some(result) => Ok(result),
        None => Err(ApiError::Backend {
            status,
            message: body.message.unwrap_or_default(),
        }),
    }
}
