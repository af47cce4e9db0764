use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::CorsConfig;

/// Browser clients are served from a different origin than the API.
pub fn cors_layer(cfg: &CorsConfig) -> CorsLayer {
    let origin = if cfg.allows_any() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = cfg
            .origins()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
