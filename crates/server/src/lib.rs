//! Server crate for the CropRecs prediction API.
//!
//! This crate wires the recommendation engine to HTTP: configuration,
//! shared state, routes and error-to-response mapping.

pub mod config;
pub mod error;
pub mod routes;

use engine::RecommendationContext;
use std::sync::Arc;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorResponse};
pub use routes::{router, PredictRequest, PredictResponse};

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<RecommendationContext>,
    pub top_n: usize,
}

impl AppState {
    pub fn new(context: Arc<RecommendationContext>, top_n: usize) -> Self {
        Self { context, top_n }
    }
}
