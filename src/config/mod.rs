use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub employee: EmployeeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

/// Bind address of the server tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Bind address and upstream of the api tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// When set, the api tier proxies every call to this server tier
    pub upstream_url: Option<String>,
    pub upstream_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub username: String,
    pub password: String,
    pub require_auth: bool,
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeConfig {
    pub seed_file: Option<PathBuf>,
    pub email_domain: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // API overrides
        if let Ok(v) = env::var("API_HOST") {
            self.api.host = v;
        }
        if let Ok(v) = env::var("API_PORT") {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("EMPLOYEE_UPSTREAM_URL") {
            let v = v.trim();
            self.api.upstream_url = (!v.is_empty()).then(|| v.to_string());
        }
        if let Ok(v) = env::var("UPSTREAM_TIMEOUT_SECS") {
            self.api.upstream_timeout_secs = v.parse().unwrap_or(self.api.upstream_timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("AUTH_USERNAME") {
            self.security.username = v;
        }
        if let Ok(v) = env::var("AUTH_PASSWORD") {
            self.security.password = v;
        }
        if let Ok(v) = env::var("AUTH_REQUIRED") {
            self.security.require_auth = v.parse().unwrap_or(self.security.require_auth);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        // Employee overrides
        if let Ok(v) = env::var("EMPLOYEE_SEED_FILE") {
            self.employee.seed_file = (!v.trim().is_empty()).then(|| PathBuf::from(v.trim()));
        }
        if let Ok(v) = env::var("EMPLOYEE_EMAIL_DOMAIN") {
            if !v.trim().is_empty() {
                self.employee.email_domain = v.trim().to_string();
            }
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8112,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8111,
                upstream_url: None,
                upstream_timeout_secs: 10,
            },
            security: SecurityConfig {
                username: "user".to_string(),
                password: "pass".to_string(),
                require_auth: false,
                enable_cors: true,
            },
            employee: EmployeeConfig {
                seed_file: None,
                email_domain: "company.com".to_string(),
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                upstream_timeout_secs: 5,
                ..Self::development().api
            },
            security: SecurityConfig {
                enable_cors: false,
                ..Self::development().security
            },
            ..Self::development()
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
