//! Generic JSON-over-HTTP request function shared by every resource client.

use reqwest::{
    Client, Method, StatusCode,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::{config::ClientConfig, error::ApiError};

/// Per-call overrides for [`Transport::request`]. Defaults to a body-less GET.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    method: Method,
    body: Option<Vec<u8>>,
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn method(method: Method) -> Self {
        Self { method, ..Self::default() }
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_vec(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    /// Add a header. Later values for the same name replace earlier ones and the defaults.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// HTTP transport bound to a single base address.
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    base_url: String,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: &ClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `options` to `base_url + endpoint` and decode the JSON answer as `T`.
    ///
    /// A 204 answer decodes `T` from an empty object without reading the body.
    /// Any non-2xx status fails with [`ApiError::Status`] carrying the body text.
    #[instrument(skip(self, options), fields(method = %options.method), level = "debug")]
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let headers = merge_headers(&options.headers)?;

        let mut builder = self.http.request(options.method, &url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        let res = builder.send().await?;
        let status = res.status();
        tracing::debug!(%status, "response received");

        if !status.is_success() {
            let body = res.text().await?;
            tracing::warn!(%status, %url, "request failed");
            return Err(ApiError::from_status(status.as_u16(), body));
        }

        if status == StatusCode::NO_CONTENT {
            return serde_json::from_value(Value::Object(Map::new())).map_err(ApiError::Decode);
        }

        let bytes = res.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ApiError::Decode)
    }
}

/// `Content-Type: application/json` plus the caller's headers, caller winning per key.
fn merge_headers(overrides: &[(String, String)]) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in overrides {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

/// Percent-encode a location code for use as a single path segment.
pub fn encode_segment(code: &str) -> String {
    urlencoding::encode(code).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_content_type_is_json() {
        let headers = merge_headers(&[]).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn caller_headers_override_per_key() {
        let headers = merge_headers(&[
            ("content-type".into(), "text/plain".into()),
            ("X-Current-Hour".into(), "7".into()),
        ])
        .unwrap();

        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers["x-current-hour"], "7");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let err = merge_headers(&[("bad header".into(), "1".into())]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidHeader { .. }));
    }

    #[test]
    fn segments_are_encoded_once() {
        assert_eq!(encode_segment("SF01"), "SF01");
        assert_eq!(encode_segment("a/b?c d"), "a%2Fb%3Fc%20d");
        assert_eq!(encode_segment("100%"), "100%25");
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base() {
        let transport = Transport::new(&ClientConfig::new("http://localhost:8080/"));
        assert_eq!(transport.base_url(), "http://localhost:8080");
    }
}
