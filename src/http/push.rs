use std::sync::Arc;

use axum::{
    body::{Body, HttpBody},
    extract::{Extension, Path, RawBody},
    Json,
};

use crate::{error::ErrorCode, gateway::PushGateway, queue::EnqueueReceipt};

/// Largest push event body accepted, in bytes.
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// `POST /hook/push/:token`
#[tracing::instrument(skip_all)]
pub async fn push_hook(
    Path(token): Path<String>,
    Extension(gateway): Extension<Arc<PushGateway>>,
    RawBody(body): RawBody<Body>,
) -> Result<Json<EnqueueReceipt>, ErrorCode> {
    let receipt = gateway.ingest(&token, read_body(body)).await?;
    Ok(Json(receipt))
}

async fn read_body(mut body: Body) -> Result<Vec<u8>, ErrorCode> {
    let mut bytes = Vec::new();

    while let Some(chunk) = body.data().await {
        let chunk = chunk.map_err(|e| ErrorCode::UnreadableBody(e.to_string()))?;
        if bytes.len() + chunk.len() > MAX_BODY_SIZE {
            return Err(ErrorCode::PayloadTooLarge(MAX_BODY_SIZE));
        }

        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
