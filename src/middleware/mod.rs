pub mod auth;
pub mod response;

pub use auth::{basic_auth_middleware, AuthUser, BasicAuth};
pub use response::{ApiResponse, ApiResult, Envelope, HANDLED_STATUS};
