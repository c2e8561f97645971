use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_or_default, env_parse, server::ServerConfig};
use std::time::Duration;

pub use core_config::Environment;

/// Gateway configuration, composed from the shared config pieces.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub jwt: JwtConfig,
    /// `TODO_SERVICE_ADDR`
    pub todo_service_addr: String,
    /// `RPC_TIMEOUT_MS`, applied to every outbound call
    pub rpc_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;
        let todo_service_addr = env_or_default("TODO_SERVICE_ADDR", "http://[::1]:50051");
        let rpc_timeout = Duration::from_millis(env_parse("RPC_TIMEOUT_MS", "3000")?);

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            jwt,
            todo_service_addr,
            rpc_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "an-adequately-long-secret-for-tests!!";

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("TODO_SERVICE_ADDR", None),
                ("RPC_TIMEOUT_MS", None),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.todo_service_addr, "http://[::1]:50051");
                assert_eq!(config.rpc_timeout, Duration::from_secs(3));
                assert!(config.environment.is_development());
                assert_eq!(config.app.name, "todo_api");
            },
        );
    }

    #[test]
    fn test_jwt_secret_is_required() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_bad_timeout_is_reported() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("RPC_TIMEOUT_MS", Some("soon"))],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("RPC_TIMEOUT_MS"));
            },
        );
    }
}
