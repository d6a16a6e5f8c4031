use super::handlers;
use super::types::{AppState, Request};
use crate::ipc::error::err;

pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    let _span = tracing::debug_span!("request", id = %req.id, method = %req.method).entered();

    if let Some(resp) = handlers::core::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::table::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::sgpa::try_handle(state, &req) {
        return resp;
    }

    tracing::debug!("unknown method");
    err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    )
}
