//! Authenticated request plumbing shared by all API calls

use reqwest::Method;
use reqwest::Response;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use reqwest::header::COOKIE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use url::Url;

use crate::FrappeClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::error::FrappeErrorDetail;

impl FrappeClient {
    /// Joins `path` onto the base URL and appends query pairs.
    pub(crate) fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, Error> {
        let raw = format!("{}{}", self.inner.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Headers for the current credentials.
    async fn auth_headers(&self) -> Result<HeaderMap, Error> {
        let credentials = self.inner.credentials.credentials().await?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(value) = credentials.authorization() {
            let value = HeaderValue::from_str(&value)
                .map_err(|_| ApiError::parse("API key contains invalid header characters"))?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(value) = credentials.cookie() {
            let value = HeaderValue::from_str(&value)
                .map_err(|_| ApiError::parse("session id contains invalid header characters"))?;
            headers.insert(COOKIE, value);
        }
        Ok(headers)
    }

    /// Sends an authenticated request and returns the raw response.
    pub(crate) async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, Error> {
        let headers = self.auth_headers().await?;

        log::debug!("{} {}", method, url.path());

        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .headers(headers);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| self.map_send_error(e))
    }

    /// Sends a request and decodes a successful JSON response into `T`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<T, Error> {
        let response = self.send(method, url, body).await?;
        read_json(response).await
    }

    fn map_send_error(&self, error: reqwest::Error) -> Error {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => Error::Api(ApiError::Timeout(timeout)),
            _ => Error::Api(ApiError::from(error)),
        }
    }
}

/// Decodes a JSON body, turning non-2xx responses into [`ApiError::Http`].
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let status = response.status();
    let body = response.text().await.map_err(ApiError::from)?;

    if !status.is_success() {
        return Err(http_error(status.as_u16(), &body).into());
    }

    serde_json::from_str(&body).map_err(|e| {
        Error::Api(ApiError::parse_with_body(
            format!("Failed to parse response: {}", e),
            body,
        ))
    })
}

pub(crate) fn http_error(status: u16, body: &str) -> ApiError {
    match FrappeErrorDetail::from_body(body) {
        Some(detail) => {
            log::warn!("HTTP {}: {}", status, detail);
            ApiError::http_with_detail(status, detail)
        }
        None => {
            log::warn!("HTTP {} with unstructured body", status);
            let message = if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.chars().take(500).collect()
            };
            ApiError::http(status, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_prefers_frappe_detail() {
        let error = http_error(
            403,
            r#"{"exc_type": "PermissionError", "message": "Not permitted"}"#,
        );
        assert_eq!(error.status_code(), Some(403));
        assert_eq!(error.error_code(), Some("PermissionError"));
        assert!(error.to_string().contains("Not permitted"));
    }

    #[test]
    fn test_http_error_plain_body() {
        let error = http_error(502, "");
        assert_eq!(error.to_string(), "HTTP 502: HTTP 502");

        let error = http_error(500, "Internal Server Error");
        assert_eq!(error.to_string(), "HTTP 500: Internal Server Error");
    }
}
