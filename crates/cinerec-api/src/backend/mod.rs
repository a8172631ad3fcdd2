//! Recommendation backend client module.
//!
//! Handles HTTP requests to the four recommendation endpoints and the
//! popular-movies endpoint.

mod api;
mod client;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalRecommendApi, RecommendApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, RecommendClient, RecommendClientBuilder};
pub use error::{RequestError, SERVER_ERROR_FALLBACK};
pub use types::{
    ErrorResponse, GENRES, PopularMovie, Recommendation, RecommendationsResponse, SearchMode,
    SearchRequest, is_known_genre,
};
