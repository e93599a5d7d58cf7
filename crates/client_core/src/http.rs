use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::{Client, Response};
use shared::error::ErrorBody;
use url::Url;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP access to the storefront backend.
///
/// Implements [`crate::CartStore`] and [`crate::CatalogProvider`] and carries
/// the login/register calls. Holds no session state: the bearer token is
/// passed to every call that needs one.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    pub(crate) http: Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = normalize_endpoint(endpoint)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }
}

pub fn normalize_endpoint(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).with_context(|| format!("invalid backend endpoint '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "backend endpoint '{raw}' must use http or https, got '{}'",
            parsed.scheme()
        );
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Extracts `message` from a `{success:false, message}` body, falling back
/// when the body is missing, unparsable or has an empty message.
pub(crate) async fn error_message(response: Response, fallback: &str) -> String {
    let Ok(raw) = response.text().await else {
        return fallback.to_string();
    };
    match serde_json::from_str::<ErrorBody>(&raw) {
        Ok(body) if !body.message.trim().is_empty() => body.message,
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slashes() {
        assert_eq!(
            normalize_endpoint("https://shop.example/api/v1/").expect("valid"),
            "https://shop.example/api/v1"
        );
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = normalize_endpoint("ftp://shop.example").expect_err("must fail");
        assert!(err.to_string().contains("http or https"), "{err}");
        assert!(normalize_endpoint("not a url").is_err());
    }

    #[test]
    fn joins_paths_onto_endpoint() {
        let backend = HttpBackend::new("http://127.0.0.1:8082/api/v1/").expect("backend");
        assert_eq!(backend.url("cart"), "http://127.0.0.1:8082/api/v1/cart");
        assert_eq!(
            backend.url("/products/search"),
            "http://127.0.0.1:8082/api/v1/products/search"
        );
    }
}
