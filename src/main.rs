use clap::Parser;
use color_eyre::eyre::eyre;

use hookgate::check::{check_payload, read_payload};
use hookgate::cmdargs::{Args, SubCommand};
use hookgate::config::{Config, ConfigError};
use hookgate::gateway::PushGateway;
use hookgate::http::start_server;
use hookgate::logging::TracingSetup;
use hookgate::service::ServiceHandler;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> color_eyre::Result<()> {
    dotenv::dotenv().ok();
    color_eyre::install().ok();

    let args = Args::parse();
    let config = build_configuration(&args)?;

    TracingSetup::with_setup(config, |config| async move {
        match args.command {
            SubCommand::Serve => {
                config.validate_server_configuration()?;
                let services = ServiceHandler::from_config(&config)?;
                let gateway = PushGateway::new(config.token()?.clone(), services);
                start_server(config, gateway).await?
            }
            SubCommand::Check(check_args) => {
                let body = read_payload(&check_args.file).await?;
                let violations = check_payload(&body);

                for violation in &violations {
                    println!("{}", serde_json::to_string(violation)?);
                }

                if !violations.is_empty() {
                    return Err(eyre!("{} violation(s) found", violations.len()));
                }

                tracing::info!(file = %check_args.file.display(), "payload is valid");
            }
        }

        Ok::<_, color_eyre::Report>(())
    })
    .await
}

fn build_configuration(args: &Args) -> Result<Config, ConfigError> {
    let mut config = Config::from_env();

    if let Some(t) = &args.telemetry_url {
        config.set_telemetry_url(t);
    }

    if let Some(t) = &args.token {
        config.set_token(t);
    }

    if let Some(b) = &args.bind_ip {
        config.set_bind_ip(b);
    }

    if let Some(d) = &args.queue_dir {
        config.set_queue_dir(d);
    }

    if let Some(u) = &args.queue_url {
        config.set_queue_url(u);
    }

    if let Some(n) = &args.queue_name {
        config.set_queue_name(n);
    }

    config.validate_configuration().map(|_| config)
}
