// HTTP routes (alternative transport to MCP stdio)

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::SnapshotAggregator;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) aggregator: Arc<SnapshotAggregator>,
}

pub fn app(aggregator: Arc<SnapshotAggregator>) -> Router {
    let state = AppState { aggregator };
    Router::new()
        .route("/", get(http::root_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/sysinfo", get(http::sysinfo_handler)) // GET /api/sysinfo
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
