//! Offline validation of push event payloads.

use std::path::Path;

use tokio::io::AsyncReadExt;

use crate::{
    gateway::parse_event,
    validation::{EventValidator, SchemaValidator, Violations},
};

/// Reads a payload from `path`, or from stdin when `path` is `-`.
pub async fn read_payload(path: &Path) -> std::io::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut body = Vec::new();
        tokio::io::stdin().read_to_end(&mut body).await?;
        Ok(body)
    } else {
        tokio::fs::read(path).await
    }
}

/// Same checks as the push hook, without authentication or queueing.
pub fn check_payload(body: &[u8]) -> Violations {
    let parsed = parse_event(body);
    SchemaValidator::push_event().validate(parsed.as_ref().map(|(_, value)| value))
}
