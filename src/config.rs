use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use url::Url;

use crate::auth::Token;

pub const DEFAULT_QUEUE_NAME: &str = "build";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Missing hook token. Set HG_TOKEN or pass --token.")]
    MissingToken,
    #[error("Malformed bind IP: '{0}'. Make sure you entered a valid IP.")]
    MalformedBindIp(String),
    #[error("Malformed URL for {0}: '{1}'.")]
    MalformedUrl(&'static str, String),
    #[error("Missing queue backend. Set either a queue directory or a queue URL.")]
    MissingQueueBackend,
    #[error("Both a queue directory and a queue URL are set. Choose one.")]
    ConflictingQueueBackends,
    #[error("Could not set up the queue: {0}")]
    QueueSetup(String),
}

/// Where accepted jobs are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueBackend {
    Spool(PathBuf),
    Http(Url),
}

#[derive(Debug, Clone)]
pub struct Config {
    telemetry_url: Option<String>,
    token: Option<Token>,
    bind_ip: String,
    queue_dir: Option<String>,
    queue_url: Option<String>,
    queue_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            telemetry_url: env_to_str("HG_TELEMETRY_URL"),
            token: env_to_str("HG_TOKEN").map(Token::new),
            bind_ip: env_to_str("HG_BIND_IP").unwrap_or_else(|| "127.0.0.1:3000".into()),
            queue_dir: env_to_str("HG_QUEUE_DIR"),
            queue_url: env_to_str("HG_QUEUE_URL"),
            queue_name: env_to_str("HG_QUEUE_NAME").unwrap_or_else(|| DEFAULT_QUEUE_NAME.into()),
        }
    }

    pub fn empty() -> Self {
        Self {
            telemetry_url: None,
            token: None,
            bind_ip: "".into(),
            queue_dir: None,
            queue_url: None,
            queue_name: DEFAULT_QUEUE_NAME.into(),
        }
    }

    pub fn telemetry_url(&self) -> Option<&str> {
        self.telemetry_url.as_deref()
    }

    pub fn token(&self) -> Result<&Token, ConfigError> {
        self.token
            .as_ref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)
    }

    pub fn bind_ip(&self) -> &str {
        &self.bind_ip
    }

    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    pub fn queue_backend(&self) -> Result<QueueBackend, ConfigError> {
        match (&self.queue_dir, &self.queue_url) {
            (Some(dir), None) => Ok(QueueBackend::Spool(PathBuf::from(dir))),
            (None, Some(url)) => parse_url("queue URL", url).map(QueueBackend::Http),
            (Some(_), Some(_)) => Err(ConfigError::ConflictingQueueBackends),
            (None, None) => Err(ConfigError::MissingQueueBackend),
        }
    }

    pub fn set_telemetry_url<T: Into<String>>(&mut self, value: T) {
        self.telemetry_url = Some(value.into());
    }

    pub fn set_token<T: Into<String>>(&mut self, value: T) {
        self.token = Some(Token::new(value));
    }

    pub fn set_bind_ip<T: Into<String>>(&mut self, value: T) {
        self.bind_ip = value.into();
    }

    pub fn set_queue_dir<T: Into<String>>(&mut self, value: T) {
        self.queue_dir = Some(value.into());
    }

    pub fn set_queue_url<T: Into<String>>(&mut self, value: T) {
        self.queue_url = Some(value.into());
    }

    pub fn set_queue_name<T: Into<String>>(&mut self, value: T) {
        self.queue_name = value.into();
    }

    /// Shape checks that apply to every command.
    pub fn validate_configuration(&self) -> Result<(), ConfigError> {
        if let Some(q) = &self.queue_url {
            parse_url("queue URL", q)?;
        }

        Ok(())
    }

    /// Everything `serve` needs on top of [`Config::validate_configuration`].
    pub fn validate_server_configuration(&self) -> Result<(), ConfigError> {
        self.validate_configuration()?;
        self.token()?;
        self.queue_backend()?;

        let _ = SocketAddr::from_str(&self.bind_ip)
            .map_err(|_| ConfigError::MalformedBindIp(self.bind_ip.clone()))?;

        Ok(())
    }
}

fn env_to_str(env_key: &str) -> Option<String> {
    std::env::var(env_key).ok().filter(|s| !s.is_empty())
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|_| ConfigError::MalformedUrl(name, value.into()))
}
