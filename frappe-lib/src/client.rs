//! Main FrappeClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::auth::CredentialsProvider;
use crate::error::Error;

/// The main client for interacting with a Frappe backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely.
///
/// # Example
///
/// ```ignore
/// use frappe_lib::{FrappeClient, auth::StaticCredentials};
///
/// let client = FrappeClient::builder()
///     .url("https://qswr.sa")
///     .credentials(StaticCredentials::api_key("key", "secret"))
///     .build();
///
/// let user = client.connect().await?;
/// ```
#[derive(Clone)]
pub struct FrappeClient {
    pub(crate) inner: Arc<FrappeClientInner>,
}

pub(crate) struct FrappeClientInner {
    pub(crate) base_url: String,
    pub(crate) credentials: Arc<dyn CredentialsProvider>,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
}

impl FrappeClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> FrappeClientBuilder<Missing, Missing> {
        FrappeClientBuilder::new()
    }

    /// Validates connectivity and credentials.
    ///
    /// Asks the backend who the current user is and returns the user id.
    pub async fn connect(&self) -> Result<String, Error> {
        let user = self.logged_user().await?;
        log::debug!("connected to {} as {}", self.base_url(), user);
        Ok(user)
    }

    /// Returns the base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the host part of the base URL, if it parses.
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.inner.base_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }
}

impl std::fmt::Debug for FrappeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrappeClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`FrappeClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The backend base URL
/// - `credentials` - A [`CredentialsProvider`] implementation
pub struct FrappeClientBuilder<Url, Provider> {
    url: Url,
    credentials: Provider,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl FrappeClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            credentials: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for FrappeClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> FrappeClientBuilder<Missing, P> {
    /// Sets the backend base URL, e.g. `https://qswr.sa`.
    pub fn url(self, url: impl Into<String>) -> FrappeClientBuilder<Set<String>, P> {
        FrappeClientBuilder {
            url: Set(url.into()),
            credentials: self.credentials,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> FrappeClientBuilder<U, Missing> {
    /// Sets the credentials provider used to authenticate requests.
    pub fn credentials<T: CredentialsProvider + 'static>(
        self,
        provider: T,
    ) -> FrappeClientBuilder<U, Set<Arc<dyn CredentialsProvider>>> {
        FrappeClientBuilder {
            url: self.url,
            credentials: Set(Arc::new(provider) as Arc<dyn CredentialsProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> FrappeClientBuilder<U, P> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl FrappeClientBuilder<Set<String>, Set<Arc<dyn CredentialsProvider>>> {
    /// Builds the [`FrappeClient`].
    pub fn build(self) -> FrappeClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().unwrap_or_default()
        });

        FrappeClient {
            inner: Arc::new(FrappeClientInner {
                base_url: self.url.0.trim_end_matches('/').to_string(),
                credentials: self.credentials.0,
                http_client,
                timeout: self.timeout,
            }),
        }
    }
}
