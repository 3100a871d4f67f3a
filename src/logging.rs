use std::future::Future;

use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};
use tracing_tree::HierarchicalLayer;

use crate::config::Config;

const DEFAULT_LOG_FILTER: &str = "tower_http=debug,hookgate=debug,info";

pub struct TracingSetup;

impl TracingSetup {
    /// Installs the global subscriber, then runs `func` on its own task.
    ///
    /// When a telemetry URL is configured, spans are also exported to Jaeger
    /// and flushed once `func` returns.
    pub async fn with_setup<Func, Fut>(config: Config, func: Func) -> color_eyre::Result<()>
    where
        Fut: Future<Output = color_eyre::Result<()>> + Send + 'static,
        Func: FnOnce(Config) -> Fut + Send,
    {
        configure_log_var();

        let registry = Registry::default()
            .with(EnvFilter::from_default_env())
            .with(
                HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .with(ErrorLayer::default());

        if let Some(telemetry_url) = config.telemetry_url() {
            let tracer = opentelemetry_jaeger::new_pipeline()
                .with_service_name(crate::server_info::APP_NAME)
                .with_agent_endpoint(telemetry_url)
                .install_batch(opentelemetry::runtime::Tokio)?;

            registry
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .init();

            let result = tokio::spawn(func(config)).await?;
            opentelemetry::global::shutdown_tracer_provider();
            result
        } else {
            registry.init();
            tokio::spawn(func(config)).await?
        }
    }
}

fn configure_log_var() {
    if std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_none()
    {
        std::env::set_var("RUST_LOG", DEFAULT_LOG_FILTER);
    }
}
