use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::{EmployeeSource, SourceError};
use crate::employee::{CreateEmployeeInput, DeleteEmployeeInput, Employee, EmployeeId, ValidationErrors};
use crate::handlers::EMPLOYEE_PREFIX;
use crate::middleware::Envelope;

/// Basic credentials sent with every upstream request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Error body produced by [`crate::error::ApiError`]
#[derive(Debug, Deserialize)]
struct UpstreamError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    field_errors: Option<HashMap<String, String>>,
}

/// HTTP client of a server tier
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    base: Url,
    credentials: Option<Credentials>,
}

impl RemoteSource {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: Option<Credentials>,
    ) -> Result<Self, SourceError> {
        let invalid = |reason: String| SourceError::InvalidUpstream {
            url: base_url.to_string(),
            reason,
        };

        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", base.scheme())));
        }
        if base.cannot_be_a_base() {
            return Err(invalid("url cannot be a base".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::Transport)?;

        Ok(Self {
            client,
            base,
            credentials,
        })
    }

    /// `<base>/api/v1/employee/<segments...>`, each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| SourceError::InvalidUpstream {
                url: self.base.to_string(),
                reason: "url cannot be a base".to_string(),
            })?;
            path.pop_if_empty();
            path.extend(EMPLOYEE_PREFIX.split('/').filter(|s| !s.is_empty()));
            path.extend(segments);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some(c) => builder.basic_auth(&c.username, Some(&c.password)),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, SourceError> {
        builder.send().await.map_err(|e| {
            tracing::warn!("upstream request failed: {}", e);
            SourceError::Transport(e)
        })
    }

    /// `Ok(None)` on 404, the response on any 2xx, an error otherwise
    async fn send_lookup(&self, builder: RequestBuilder) -> Result<Option<Response>, SourceError> {
        let response = self.send(builder).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if response.status().is_success() {
            return Ok(Some(response));
        }
        Err(rejection(response).await)
    }

    /// Like [`Self::send_lookup`] for routes that never answer 404
    async fn send_expect(&self, builder: RequestBuilder) -> Result<Response, SourceError> {
        let response = self.send(builder).await?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(rejection(response).await)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SourceError> {
    response
        .json::<T>()
        .await
        .map_err(|e| SourceError::Decode(e.to_string()))
}

async fn decode_envelope<T: DeserializeOwned>(response: Response) -> Result<Option<T>, SourceError> {
    Ok(decode::<Envelope<T>>(response).await?.data)
}

async fn rejection(response: Response) -> SourceError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let parsed = serde_json::from_str::<UpstreamError>(&body).ok();

    if status == StatusCode::BAD_REQUEST {
        if let Some(parsed) = parsed {
            return match parsed.field_errors {
                Some(fields) if !fields.is_empty() => {
                    SourceError::Validation(fields.into_iter().collect::<ValidationErrors>())
                }
                _ => SourceError::Rejected(parsed.message.unwrap_or_else(|| "bad request".to_string())),
            };
        }
        return SourceError::Rejected(if body.is_empty() { "bad request".to_string() } else { body });
    }

    let message = parsed
        .and_then(|p| p.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unexpected status").to_string());
    tracing::warn!("upstream answered {}: {}", status, message);
    SourceError::Upstream {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl EmployeeSource for RemoteSource {
    fn kind(&self) -> &'static str {
        "remote"
    }

    async fn list_all(&self) -> Result<Vec<Employee>, SourceError> {
        let url = self.endpoint(&[])?;
        let response = self.send_expect(self.request(Method::GET, url)).await?;
        Ok(decode_envelope(response).await?.unwrap_or_default())
    }

    async fn get_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, SourceError> {
        let id = id.to_string();
        let url = self.endpoint(&[&id])?;
        match self.send_lookup(self.request(Method::GET, url)).await? {
            Some(response) => decode_envelope(response).await,
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, text: &str) -> Result<Option<Vec<Employee>>, SourceError> {
        let url = self.endpoint(&["search", text])?;
        match self.send_lookup(self.request(Method::GET, url)).await? {
            Some(response) => Ok(Some(decode_envelope(response).await?.unwrap_or_default())),
            None => Ok(None),
        }
    }

    async fn highest_salary(&self) -> Result<Option<u32>, SourceError> {
        let url = self.endpoint(&["highestSalary"])?;
        match self.send_lookup(self.request(Method::GET, url)).await? {
            Some(response) => Ok(Some(decode::<u32>(response).await?)),
            None => Ok(None),
        }
    }

    async fn top_ten_names(&self) -> Result<Vec<String>, SourceError> {
        let url = self.endpoint(&["topTenHighestEarningEmployeeNames"])?;
        let response = self.send_expect(self.request(Method::GET, url)).await?;
        decode(response).await
    }

    async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee, SourceError> {
        let url = self.endpoint(&[])?;
        let response = self.send_expect(self.request(Method::POST, url).json(input)).await?;
        decode_envelope(response)
            .await?
            .ok_or_else(|| SourceError::Decode("create response carried no employee".to_string()))
    }

    async fn delete(&self, input: &DeleteEmployeeInput) -> Result<bool, SourceError> {
        let url = self.endpoint(&[])?;
        let response = self.send_expect(self.request(Method::DELETE, url).json(input)).await?;
        Ok(decode_envelope(response).await?.unwrap_or(false))
    }

    async fn delete_by_id(&self, id: &EmployeeId) -> Result<Option<String>, SourceError> {
        let id = id.to_string();
        let url = self.endpoint(&[&id])?;
        match self.send_lookup(self.request(Method::DELETE, url)).await? {
            Some(response) => response
                .text()
                .await
                .map(Some)
                .map_err(|e| SourceError::Decode(e.to_string())),
            None => Ok(None),
        }
    }
}
