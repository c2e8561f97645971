use super::config::ServerConfig;
use tracing::info;

/// Startup helpers shared by gRPC binaries.
pub struct GrpcServer;

impl GrpcServer {
    pub fn log_startup(config: &ServerConfig, service_name: &str) {
        info!(
            addr = %config.addr_string(),
            service = service_name,
            compression = config.enable_compression,
            shutdown_grace_secs = config.shutdown_grace.as_secs(),
            "gRPC server starting"
        );
    }

    /// Mark `service_name` and the empty name (used by generic probes) as serving.
    pub async fn setup_health(
        health_reporter: &tonic_health::server::HealthReporter,
        service_name: &str,
    ) {
        for name in [service_name, ""] {
            health_reporter
                .set_service_status(name, tonic_health::ServingStatus::Serving)
                .await;
        }

        info!(service = service_name, "Service marked as serving");
    }

    /// Flip both names to not-serving once shutdown begins.
    pub async fn mark_not_serving(
        health_reporter: &tonic_health::server::HealthReporter,
        service_name: &str,
    ) {
        for name in [service_name, ""] {
            health_reporter
                .set_service_status(name, tonic_health::ServingStatus::NotServing)
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_transitions_do_not_panic() {
        let (reporter, _service) = tonic_health::server::health_reporter();
        GrpcServer::setup_health(&reporter, "todo.TodoService").await;
        GrpcServer::mark_not_serving(&reporter, "todo.TodoService").await;
    }

    #[test]
    fn test_log_startup() {
        GrpcServer::log_startup(&ServerConfig::default(), "todo.TodoService");
    }
}
