//! API client library for cinerec.
//!
//! Provides the client for the movie-recommendation backend.

/// Recommendation backend client.
pub mod backend;
