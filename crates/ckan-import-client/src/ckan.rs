use std::path::Path;
use std::time::Duration;

use ckan_import_core::config::{normalize_base_url, HttpConfig};
use ckan_import_core::error::AppError;
use ckan_import_core::models::{NewPackage, NewResource};
use ckan_import_core::response::ActionResponse;
use ckan_import_core::traits::CkanApi;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use tokio::io::AsyncReadExt;
use url::Url;

const PACKAGE_CREATE: &str = "api/3/action/package_create";
const RESOURCE_CREATE: &str = "api/3/action/resource_create";

/// HTTP client for the write side of the CKAN action API.
///
/// Every request carries the API key in the `Authorization` header.
///
/// # Examples
///
/// ```no_run
/// use ckan_import_client::CkanClient;
/// use ckan_import_core::{CkanApi, NewPackage, Visibility};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CkanClient::new("http://myckan.site", "my-api-key")?;
/// let package = NewPackage {
///     name: "air-quality".to_string(),
///     title: "Air Quality".to_string(),
///     private: Visibility::Private,
///     owner_org: "environment".to_string(),
/// };
/// let response = client.package_create(&package).await?;
/// println!("created: {}", response.is_success());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CkanClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl CkanClient {
    /// Creates a client with the default [`HttpConfig`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidUrl` if the URL is malformed.
    /// Returns `AppError::ClientError` if the API key is not a valid header
    /// value or the HTTP client cannot be built.
    pub fn new(base_url_str: &str, api_key: &str) -> Result<Self, AppError> {
        Self::with_config(base_url_str, api_key, &HttpConfig::default())
    }

    pub fn with_config(
        base_url_str: &str,
        api_key: &str,
        config: &HttpConfig,
    ) -> Result<Self, AppError> {
        let normalized = normalize_base_url(base_url_str);
        let base_url = Url::parse(&normalized)
            .map_err(|_| AppError::InvalidUrl(base_url_str.to_string()))?;

        let mut auth = HeaderValue::from_str(api_key)
            .map_err(|_| AppError::ClientError("API key is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .user_agent(concat!("ckan-import/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn action_url(&self, action: &str) -> Result<Url, AppError> {
        self.base_url
            .join(action)
            .map_err(|e| AppError::InvalidUrl(e.to_string()))
    }

    /// Sends a request and classifies whatever the portal answered.
    async fn send(&self, request: RequestBuilder) -> Result<ActionResponse, AppError> {
        let resp = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| self.transport_error(e))?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "CKAN response");
        Ok(ActionResponse::from_http(status.as_u16(), &body))
    }

    fn transport_error(&self, e: reqwest::Error) -> AppError {
        if e.is_timeout() {
            AppError::Timeout(self.timeout.as_secs())
        } else if e.is_connect() {
            AppError::NetworkError(format!("Connection failed: {}", e))
        } else {
            AppError::ClientError(e.to_string())
        }
    }
}

impl CkanApi for CkanClient {
    async fn package_create(&self, package: &NewPackage) -> Result<ActionResponse, AppError> {
        let url = self.action_url(PACKAGE_CREATE)?;
        self.send(self.client.post(url).form(package)).await
    }

    async fn resource_create(&self, resource: &NewResource) -> Result<ActionResponse, AppError> {
        let url = self.action_url(RESOURCE_CREATE)?;
        let upload = read_upload(resource.path(), &resource.name).await?;

        let form = Form::new()
            .text("package_id", resource.package_id.clone())
            .text("name", resource.name.clone())
            .part("upload", upload);

        self.send(self.client.post(url).multipart(form)).await
    }
}

/// Reads the resource file into a multipart part.
///
/// The file handle is closed before this returns, on success and on error.
async fn read_upload(path: &Path, file_name: &str) -> Result<Part, AppError> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).await?;
    drop(file);

    Ok(Part::bytes(bytes).file_name(file_name.to_string()))
}
