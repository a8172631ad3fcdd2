//! `RecommendApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::RequestError;
use super::types::{PopularMovie, Recommendation, SearchRequest};

/// Recommendation backend API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(RecommendApi: Send)]
pub trait LocalRecommendApi {
    /// Issues one recommendation query.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Status` for non-2xx responses,
    /// `RequestError::Transport` when no response arrives, and
    /// `RequestError::Decode` when a 2xx body is not valid JSON.
    async fn recommend(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<Recommendation>, RequestError>;

    /// Fetches the popular-movies list.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`LocalRecommendApi::recommend`]; a body that is not
    /// a JSON array is a `RequestError::Decode`.
    async fn popular_movies(&self) -> Result<Vec<PopularMovie>, RequestError>;
}
