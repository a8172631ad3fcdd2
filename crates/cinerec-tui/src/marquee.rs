//! Popular-movie poster marquee.

use cinerec_api::backend::{LocalRecommendApi, PopularMovie, RequestError};

/// Result of the popular-movies fetch.
pub type MarqueeOutcome = Result<Vec<PopularMovie>, RequestError>;

/// Duplicates `movies` end to end so the strip can loop without a seam.
#[must_use]
pub fn looped(movies: Vec<PopularMovie>) -> Vec<PopularMovie> {
    let mut strip = Vec::with_capacity(movies.len().saturating_mul(2));
    strip.extend_from_slice(&movies);
    strip.extend(movies);
    strip
}

/// Poster marquee state.
///
/// Fetches once per instance; failures are logged and leave the strip empty.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct PosterMarquee {
    /// Fetched list concatenated with itself.
    popular_movies: Vec<PopularMovie>,
    /// Number of movies actually fetched (half the strip).
    fetched: usize,
    /// Set by the first mount; later mounts are ignored.
    mounted: bool,
    /// Scroll position within the first half of the strip.
    offset: usize,
}

impl PosterMarquee {
    /// Creates an empty, unmounted marquee.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The duplicated strip, in render order.
    #[must_use]
    pub fn popular_movies(&self) -> &[PopularMovie] {
        &self.popular_movies
    }

    /// Marks the marquee as mounted. Returns `false` if it already was, in
    /// which case no fetch must be issued.
    pub const fn begin_mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        true
    }

    /// Applies the popular-movies fetch result.
    pub fn load(&mut self, outcome: MarqueeOutcome) {
        match outcome {
            Ok(movies) => {
                tracing::debug!(count = movies.len(), "popular movies loaded");
                self.fetched = movies.len();
                self.popular_movies = looped(movies);
                self.offset = 0;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to fetch popular movies");
            }
        }
    }

    /// Fetches popular movies once and stores the looped strip.
    #[allow(clippy::future_not_send)]
    pub async fn on_mount<A: LocalRecommendApi + ?Sized>(&mut self, api: &A) {
        if !self.begin_mount() {
            return;
        }
        let outcome = api.popular_movies().await;
        self.load(outcome);
    }

    /// Advances the scroll position by one poster, wrapping after one full lap.
    pub fn tick(&mut self) {
        self.offset = self
            .offset
            .saturating_add(1)
            .checked_rem(self.fetched)
            .unwrap_or(0);
    }

    /// Current scroll position.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Posters visible in a window of `count` slots starting at the scroll
    /// position.
    pub fn visible(&self, count: usize) -> impl Iterator<Item = &PopularMovie> {
        self.popular_movies
            .iter()
            .skip(self.offset)
            .take(count.min(self.fetched))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::atomic::{AtomicUsize, Ordering};

    use cinerec_api::backend::{RecommendApi, RecommendClient, Recommendation, SearchRequest};

    use super::*;

    struct MockApi {
        outcome: MarqueeOutcome,
        calls: AtomicUsize,
    }

    impl MockApi {
        const fn new(outcome: MarqueeOutcome) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl RecommendApi for MockApi {
        async fn recommend(
            &self,
            _request: &SearchRequest,
        ) -> Result<Vec<Recommendation>, RequestError> {
            Ok(Vec::new())
        }

        async fn popular_movies(&self) -> Result<Vec<PopularMovie>, RequestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn movie(title: &str, poster: &str) -> PopularMovie {
        PopularMovie {
            title: String::from(title),
            poster_path: String::from(poster),
        }
    }

    #[test]
    fn test_looped_doubles_in_order() {
        // Arrange
        let movies = vec![movie("X", "p1"), movie("Y", "p2"), movie("Z", "p3")];

        // Act
        let strip = looped(movies.clone());

        // Assert
        assert_eq!(strip.len(), 6);
        assert_eq!(strip.get(..3).unwrap(), movies.as_slice());
        assert_eq!(strip.get(3..).unwrap(), movies.as_slice());
    }

    #[tokio::test]
    async fn test_mount_duplicates_single_movie() {
        // Arrange
        let api = MockApi::new(Ok(vec![movie("X", "p1")]));
        let mut marquee = PosterMarquee::new();

        // Act
        marquee.on_mount(&api).await;

        // Assert
        assert_eq!(
            marquee.popular_movies(),
            &[movie("X", "p1"), movie("X", "p1")]
        );
    }

    #[tokio::test]
    async fn test_mount_fetches_once() {
        // Arrange
        let api = MockApi::new(Ok(vec![movie("X", "p1")]));
        let mut marquee = PosterMarquee::new();

        // Act
        marquee.on_mount(&api).await;
        marquee.on_mount(&api).await;

        // Assert
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(marquee.popular_movies().len(), 2);
    }

    #[tokio::test]
    async fn test_mount_failure_leaves_strip_empty() {
        // Arrange
        let api = MockApi::new(Err(RequestError::Transport(String::from(
            "connection refused",
        ))));
        let mut marquee = PosterMarquee::new();

        // Act
        marquee.on_mount(&api).await;

        // Assert
        assert!(marquee.popular_movies().is_empty());
        assert_eq!(marquee.visible(10).count(), 0);
    }

    #[test]
    fn test_tick_wraps_after_one_lap() {
        // Arrange
        let mut marquee = PosterMarquee::new();
        marquee.load(Ok(vec![movie("A", "a"), movie("B", "b")]));

        // Act & Assert
        marquee.tick();
        assert_eq!(marquee.offset(), 1);
        let titles: Vec<&str> = marquee.visible(2).map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["B", "A"]);

        marquee.tick();
        assert_eq!(marquee.offset(), 0);
    }

    #[test]
    fn test_tick_on_empty_strip_stays_at_zero() {
        // Arrange
        let mut marquee = PosterMarquee::new();

        // Act
        marquee.tick();

        // Assert
        assert_eq!(marquee.offset(), 0);
    }

    #[tokio::test]
    async fn test_mount_against_http_backend() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/popular-movies"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string(r#"[{"title":"X","poster_path":"p1"}]"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = RecommendClient::builder()
            .base_url(mock_server.uri().parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();
        let mut marquee = PosterMarquee::new();

        // Act
        marquee.on_mount(&client).await;

        // Assert
        assert_eq!(
            marquee.popular_movies(),
            &[movie("X", "p1"), movie("X", "p1")]
        );
    }

    #[tokio::test]
    async fn test_mount_against_failing_backend() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(500)
                    .set_body_string(r#"{"error":"TMDb unavailable"}"#),
            )
            .mount(&mock_server)
            .await;
        let client = RecommendClient::builder()
            .base_url(mock_server.uri().parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();
        let mut marquee = PosterMarquee::new();

        // Act
        marquee.on_mount(&client).await;

        // Assert
        assert!(marquee.popular_movies().is_empty());
    }
}
