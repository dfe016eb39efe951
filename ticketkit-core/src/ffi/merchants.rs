use std::sync::Arc;
use std::time::Duration;

use super::error::Result;
use crate::http_request::ReqwestHttpClient;
use crate::merchants::{AccessTokenProvider, Merchant, MerchantDirectoryClient};
use crate::Environment;

/// Merchant directory for the host app.
#[derive(uniffi::Object)]
pub struct MerchantDirectory {
    inner: MerchantDirectoryClient,
}

#[uniffi::export]
impl MerchantDirectory {
    /// Creates a directory client for `environment`, reading the session token
    /// from `token_provider` on every fetch.
    #[uniffi::constructor]
    #[must_use]
    pub fn new(
        environment: Environment,
        token_provider: Arc<dyn AccessTokenProvider>,
        timeout: Option<Duration>,
    ) -> Self {
        let http = Arc::new(ReqwestHttpClient::new(environment, timeout));
        Self {
            inner: MerchantDirectoryClient::new(token_provider, http),
        }
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl MerchantDirectory {
    /// Fetches the merchants for the current session.
    ///
    /// # Errors
    ///
    /// See [`MerchantDirectoryClient::fetch_merchants`].
    pub async fn fetch_merchants(&self) -> Result<Vec<Merchant>> {
        Ok(self.inner.fetch_merchants().await?)
    }
}
