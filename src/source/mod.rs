//! The seam between the HTTP layer and wherever employee records live.
//!
//! The server tier always answers from its own store through [`LocalSource`].
//! The api tier does the same unless an upstream is configured, in which case
//! every call goes over HTTP through [`RemoteSource`].

pub mod local;
pub mod remote;

use async_trait::async_trait;

use crate::employee::{
    CreateEmployeeInput, DeleteEmployeeInput, Employee, EmployeeId, ServiceError, StoreError, ValidationErrors,
};

pub use local::LocalSource;
pub use remote::{Credentials, RemoteSource};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Validation(ValidationErrors),

    /// Upstream refused the request as malformed without naming fields
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("upstream unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected upstream response: {0}")]
    Decode(String),

    #[error("invalid upstream url {url}: {reason}")]
    InvalidUpstream { url: String, reason: String },
}

impl From<ServiceError> for SourceError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => SourceError::Validation(errors),
            ServiceError::Store(e) => SourceError::Store(e),
        }
    }
}

#[async_trait]
pub trait EmployeeSource: Send + Sync {
    /// "local" or "remote", reported by the health endpoint
    fn kind(&self) -> &'static str;

    /// Number of records held in-process, if this source holds any
    fn record_count(&self) -> Option<usize> {
        None
    }

    async fn list_all(&self) -> Result<Vec<Employee>, SourceError>;

    async fn get_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, SourceError>;

    /// `Ok(None)` means the lookup itself could not be served
    async fn find_by_name(&self, text: &str) -> Result<Option<Vec<Employee>>, SourceError>;

    async fn highest_salary(&self) -> Result<Option<u32>, SourceError>;

    async fn top_ten_names(&self) -> Result<Vec<String>, SourceError>;

    async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee, SourceError>;

    async fn delete(&self, input: &DeleteEmployeeInput) -> Result<bool, SourceError>;

    async fn delete_by_id(&self, id: &EmployeeId) -> Result<Option<String>, SourceError>;
}
