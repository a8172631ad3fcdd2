//! Backend request and response types.

use std::fmt;

use serde::Deserialize;

/// Genres accepted by the `genre-movies` endpoint, in display order.
pub const GENRES: [&str; 19] = [
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Music",
    "Mystery",
    "Romance",
    "Science Fiction",
    "TV Movie",
    "Thriller",
    "War",
    "Western",
];

/// Returns `true` if `name` is one of [`GENRES`] (exact match).
#[must_use]
pub fn is_known_genre(name: &str) -> bool {
    GENRES.contains(&name)
}

/// Which kind of recommendation query is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMode {
    /// Content-based recommendations for a movie title.
    #[default]
    Movie,
    /// Top-rated movies featuring an actor.
    Actor,
    /// Top-rated movies in a genre.
    Genre,
    /// Collaborative-filtering recommendations for a user ID.
    User,
}

impl SearchMode {
    /// All modes, in selector order.
    pub const ALL: [Self; 4] = [Self::Movie, Self::Actor, Self::Genre, Self::User];

    /// Endpoint path relative to the backend base URL.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Movie => "recommend",
            Self::Actor => "actor-movies",
            Self::Genre => "genre-movies",
            Self::User => "collaborative-recommend",
        }
    }

    /// Name of the single query parameter carrying the user's input.
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Movie => "title",
            Self::Actor => "name",
            Self::Genre => "genre",
            Self::User => "userId",
        }
    }

    /// Lowercase identifier (`movie`, `actor`, `genre`, `user`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Actor => "actor",
            Self::Genre => "genre",
            Self::User => "user",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recommendation request: mode plus raw (unencoded) query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Selected search mode.
    pub mode: SearchMode,
    /// Query value as typed or selected by the user.
    pub query: String,
}

impl SearchRequest {
    /// Creates a new request.
    #[must_use]
    pub fn new(mode: SearchMode, query: impl Into<String>) -> Self {
        Self {
            mode,
            query: query.into(),
        }
    }

    /// Absolute path and percent-encoded query string, e.g. `/recommend?title=Matrix`.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        format!(
            "/{}?{}={}",
            self.mode.endpoint(),
            self.mode.param(),
            urlencoding::encode(&self.query)
        )
    }
}

/// One entry of a `recommendations` array.
///
/// Older backends return bare titles, newer ones return objects with a
/// poster URL that may be `null`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Recommendation {
    /// Bare title string.
    Title(String),
    /// Title with an optional poster URL.
    Movie {
        /// Movie title.
        title: String,
        /// Absolute poster image URL.
        #[serde(default)]
        poster_path: Option<String>,
    },
}

impl Recommendation {
    /// Movie title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Title(title) | Self::Movie { title, .. } => title,
        }
    }

    /// Poster URL, if present and non-empty.
    #[must_use]
    pub fn poster_url(&self) -> Option<&str> {
        match self {
            Self::Title(_) => None,
            Self::Movie { poster_path, .. } => poster_path.as_deref().filter(|p| !p.is_empty()),
        }
    }
}

/// Success body of the four recommendation endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationsResponse {
    /// Ordered results; absent or `null` means none.
    #[serde(default)]
    pub recommendations: Option<Vec<Recommendation>>,
}

impl RecommendationsResponse {
    /// Consumes the response, treating a missing list as empty.
    #[must_use]
    pub fn into_recommendations(self) -> Vec<Recommendation> {
        self.recommendations.unwrap_or_default()
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    #[serde(default)]
    pub error: Option<String>,
}

/// An entry of the `popular-movies` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopularMovie {
    /// Movie title.
    pub title: String,
    /// Absolute poster image URL.
    pub poster_path: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_path_and_query_per_mode() {
        // Arrange
        let cases = [
            (SearchMode::Movie, "Matrix", "/recommend?title=Matrix"),
            (SearchMode::Actor, "Tom Hanks", "/actor-movies?name=Tom%20Hanks"),
            (SearchMode::Genre, "Science Fiction", "/genre-movies?genre=Science%20Fiction"),
            (SearchMode::User, "42", "/collaborative-recommend?userId=42"),
        ];

        for (mode, query, expected) in cases {
            // Act
            let path = SearchRequest::new(mode, query).path_and_query();

            // Assert
            assert_eq!(path, expected);
        }
    }

    #[test]
    fn test_path_and_query_encodes_reserved_characters() {
        // Arrange
        let request = SearchRequest::new(SearchMode::Movie, "Tom & Jerry?");

        // Act
        let path = request.path_and_query();

        // Assert
        assert_eq!(path, "/recommend?title=Tom%20%26%20Jerry%3F");
    }

    #[test]
    fn test_parse_mixed_recommendations() {
        // Arrange
        let json = r#"{"recommendations":[
            "Heat",
            {"title":"Alien","poster_path":"https://image.tmdb.org/t/p/w500/a.jpg"},
            {"title":"Brazil","poster_path":null},
            {"title":"Ran"}
        ]}"#;

        // Act
        let results = serde_json::from_str::<RecommendationsResponse>(json)
            .unwrap()
            .into_recommendations();

        // Assert
        assert_eq!(results.len(), 4);
        assert_eq!(results[0], Recommendation::Title(String::from("Heat")));
        assert_eq!(results[1].title(), "Alien");
        assert_eq!(
            results[1].poster_url(),
            Some("https://image.tmdb.org/t/p/w500/a.jpg")
        );
        assert_eq!(results[2].poster_url(), None);
        assert_eq!(results[3].title(), "Ran");
        assert_eq!(results[3].poster_url(), None);
    }

    #[test]
    fn test_missing_or_null_recommendations_are_empty() {
        // Arrange & Act
        let missing = serde_json::from_str::<RecommendationsResponse>("{}")
            .unwrap()
            .into_recommendations();
        let null = serde_json::from_str::<RecommendationsResponse>(r#"{"recommendations":null}"#)
            .unwrap()
            .into_recommendations();

        // Assert
        assert!(missing.is_empty());
        assert!(null.is_empty());
    }

    #[test]
    fn test_empty_poster_path_is_treated_as_absent() {
        // Arrange
        let rec = Recommendation::Movie {
            title: String::from("Heat"),
            poster_path: Some(String::new()),
        };

        // Act & Assert
        assert_eq!(rec.poster_url(), None);
    }

    #[test]
    fn test_parse_error_response() {
        // Arrange & Act
        let with_message: ErrorResponse =
            serde_json::from_str(r#"{"error":"Movie 'x' not found. No close match."}"#).unwrap();
        let without_message: ErrorResponse = serde_json::from_str(r#"{"detail":"x"}"#).unwrap();

        // Assert
        assert_eq!(
            with_message.error.as_deref(),
            Some("Movie 'x' not found. No close match.")
        );
        assert!(without_message.error.is_none());
    }

    #[test]
    fn test_genres() {
        // Assert
        assert_eq!(GENRES.len(), 19);
        assert_eq!(GENRES[0], "Action");
        assert_eq!(GENRES[18], "Western");
        assert!(is_known_genre("TV Movie"));
        assert!(!is_known_genre("action"));
        assert!(!is_known_genre(""));
    }

    #[test]
    fn test_mode_display() {
        // Assert
        assert_eq!(SearchMode::default(), SearchMode::Movie);
        assert_eq!(SearchMode::User.to_string(), "user");
    }
}
