use std::sync::Arc;

use super::decode::decode_json;
use super::types::Merchant;
use crate::error::{ErrorResponse, TicketKitResult};
use crate::http_request::{Endpoint, HttpClient};

/// Path of the merchant list endpoint.
pub const MERCHANTS_PATH: &str = "/merchants";

/// Source of the current session's access token.
#[uniffi::export(with_foreign)]
pub trait AccessTokenProvider: Send + Sync {
    /// Returns the access token, or `None` when signed out.
    fn access_token(&self) -> Option<String>;
}

/// Fetches the merchants available to the signed-in user.
pub struct MerchantDirectoryClient {
    token_provider: Arc<dyn AccessTokenProvider>,
    http: Arc<dyn HttpClient>,
}

impl MerchantDirectoryClient {
    /// Creates a client from its collaborators.
    #[must_use]
    pub fn new(token_provider: Arc<dyn AccessTokenProvider>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            token_provider,
            http,
        }
    }

    /// Fetches and decodes the merchant list. Single request, no retries.
    ///
    /// # Errors
    ///
    /// - status 401 if there is no access token; no request is made.
    /// - the transport's error, unchanged, if the request fails.
    /// - `DECODING_ERROR` or `UNKNOWN_DECODING_ERROR` if the body does not decode.
    pub async fn fetch_merchants(&self) -> TicketKitResult<Vec<Merchant>> {
        let Some(token) = self
            .token_provider
            .access_token()
            .filter(|token| !token.is_empty())
        else {
            log::info!("skipping merchant fetch: no access token");
            return Err(ErrorResponse::missing_access_token());
        };

        let endpoint = Endpoint::get(MERCHANTS_PATH).with_bearer_token(token);
        let body = self.http.request(endpoint).await?;

        let merchants: Vec<Merchant> = decode_json(&body)?;
        log::debug!("fetched {} merchants", merchants.len());
        Ok(merchants)
    }
}
