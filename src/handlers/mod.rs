// handlers/mod.rs - HTTP handlers shared by both tiers
//
// Public handlers (banner, health) answer without credentials.
// Employee handlers sit behind the basic auth layer under EMPLOYEE_PREFIX and
// talk to whatever EmployeeSource the tier was built with.

pub mod employee;
pub mod system;

use std::sync::Arc;

use serde::Serialize;

use crate::middleware::BasicAuth;
use crate::source::EmployeeSource;

pub const EMPLOYEE_PREFIX: &str = "/api/v1/employee";

/// Which of the two runnable services this router belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Server,
    Api,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Server => "server",
            Tier::Api => "api",
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub tier: Tier,
    pub source: Arc<dyn EmployeeSource>,
    pub auth: Arc<BasicAuth>,
}

impl AppState {
    pub fn new(tier: Tier, source: Arc<dyn EmployeeSource>, auth: BasicAuth) -> Self {
        Self {
            tier,
            source,
            auth: Arc::new(auth),
        }
    }
}
