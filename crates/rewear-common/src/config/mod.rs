//! Configuration structs

mod app_config;

pub use app_config::{
    AdminBootstrapConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig,
    Environment, JwtConfig, RateLimitConfig, ServerConfig, SwapConfig,
};
