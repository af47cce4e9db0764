use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{error::ErrorBody, logging::panic_message};

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// A handler panic answers 500 with the usual error body instead of
/// dropping the connection. Details are only exposed in debug builds.
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let error = if cfg!(debug_assertions) {
        format!("internal server error: {}", panic_message(panic.as_ref()))
    } else {
        "internal server error".to_string()
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error })).into_response()
}
