use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha256};

use crate::config::SecurityConfig;
use crate::error::ApiError;

/// Caller identity injected into request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthUser {
    Authenticated(String),
    Anonymous,
}

impl AuthUser {
    pub fn name(&self) -> &str {
        match self {
            AuthUser::Authenticated(username) => username,
            AuthUser::Anonymous => "anonymous",
        }
    }
}

/// The single static credential pair guarding `/api/**`
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    password_digest: [u8; 32],
    require_auth: bool,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("require_auth", &self.require_auth)
            .finish_non_exhaustive()
    }
}

impl BasicAuth {
    pub fn new(username: &str, password: &str, require_auth: bool) -> Self {
        Self {
            username: username.to_string(),
            password_digest: digest(password),
            require_auth,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.username, &security.password, security.require_auth)
    }

    /// Decide who the caller is. Supplied credentials must always match;
    /// absent credentials pass only when auth is not required.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            if self.require_auth {
                return Err(ApiError::unauthorized("Missing Authorization header"));
            }
            return Ok(AuthUser::Anonymous);
        };

        let value = value
            .to_str()
            .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;
        let (username, password) = parse_basic(value).map_err(ApiError::unauthorized)?;

        if username == self.username && digest(&password) == self.password_digest {
            Ok(AuthUser::Authenticated(username))
        } else {
            tracing::warn!("rejected credentials for user {:?}", username);
            Err(ApiError::unauthorized("Bad credentials"))
        }
    }
}

fn digest(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

/// Split `Basic <base64(user:pass)>` into its parts
fn parse_basic(value: &str) -> Result<(String, String), String> {
    let (scheme, encoded) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| "Authorization header must use Basic scheme".to_string())?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err("Authorization header must use Basic scheme".to_string());
    }

    let decoded = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| "Invalid Basic credentials encoding".to_string())?;
    let decoded = String::from_utf8(decoded).map_err(|_| "Basic credentials are not UTF-8".to_string())?;

    decoded
        .split_once(':')
        .map(|(user, pass)| (user.to_string(), pass.to_string()))
        .ok_or_else(|| "Basic credentials must be user:password".to_string())
}

/// Basic authentication middleware that validates credentials and records the caller
pub async fn basic_auth_middleware(
    State(auth): State<Arc<BasicAuth>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = auth.authenticate(request.headers())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
