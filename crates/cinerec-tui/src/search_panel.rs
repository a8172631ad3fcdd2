//! Search panel state machine.
//!
//! Owns the query form and the lifecycle of one recommendation request.
//! Submission is split into [`SearchPanel::begin_submit`] and
//! [`SearchPanel::resolve`] so the terminal loop can run the request on a
//! separate task; [`SearchPanel::submit`] runs both back to back.

use cinerec_api::backend::{
    GENRES, LocalRecommendApi, Recommendation, RequestError, SearchMode, SearchRequest,
};

/// Error shown when submitting in genre mode without a selection.
pub const GENRE_REQUIRED_MESSAGE: &str = "Please select a genre.";

/// First entry of the genre choice list; maps to an empty query.
pub const GENRE_PLACEHOLDER: &str = "-- Select a Genre --";

/// Text shown on a result card without a poster.
pub const NO_POSTER_TEXT: &str = "No Poster Available";

/// Result of one recommendation request.
pub type SearchOutcome = Result<Vec<Recommendation>, RequestError>;

/// Selector label for a search mode.
#[must_use]
pub const fn mode_label(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::Movie => "By Movie",
        SearchMode::Actor => "By Actor",
        SearchMode::Genre => "By Genre",
        SearchMode::User => "For You (User ID)",
    }
}

/// Placeholder of the free-text input. `None` for genre mode, which uses a
/// choice list instead.
#[must_use]
pub const fn input_placeholder(mode: SearchMode) -> Option<&'static str> {
    match mode {
        SearchMode::Movie => Some("Enter a movie title..."),
        SearchMode::Actor => Some("Enter an actor's name..."),
        SearchMode::User => Some("Enter a User ID (e.g., 1 to 610)..."),
        SearchMode::Genre => None,
    }
}

/// Lifecycle of a search submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Request succeeded with these results (possibly empty).
    Success(Vec<Recommendation>),
    /// Validation or request failure with a user-visible message.
    Failed(String),
}

impl RequestState {
    /// Returns `true` while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Results of a successful request, empty otherwise.
    #[must_use]
    pub fn results(&self) -> &[Recommendation] {
        match self {
            Self::Success(results) => results,
            _ => &[],
        }
    }

    /// Error message of a failed request.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Poster cell of a result card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poster<'a> {
    /// Poster image URL.
    Image(&'a str),
    /// No poster; rendered as [`NO_POSTER_TEXT`].
    Placeholder,
}

impl Poster<'_> {
    /// Text drawn for this poster cell.
    #[must_use]
    pub const fn text(&self) -> &str {
        match *self {
            Self::Image(url) => url,
            Self::Placeholder => NO_POSTER_TEXT,
        }
    }
}

/// Projection of one recommendation for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultCard<'a> {
    /// Poster or placeholder.
    pub poster: Poster<'a>,
    /// Movie title.
    pub title: &'a str,
}

impl<'a> From<&'a Recommendation> for ResultCard<'a> {
    fn from(rec: &'a Recommendation) -> Self {
        Self {
            poster: rec.poster_url().map_or(Poster::Placeholder, Poster::Image),
            title: rec.title(),
        }
    }
}

/// Search panel state.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchPanel {
    /// Active search mode.
    search_mode: SearchMode,
    /// Current query (free text, or selected genre name).
    query: String,
    /// Current request lifecycle state.
    request_state: RequestState,
    /// Genre choice cursor: 0 is the placeholder, `i` is `GENRES[i - 1]`.
    genre_cursor: usize,
}

impl SearchPanel {
    /// Creates a panel in movie mode with an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active search mode.
    #[must_use]
    pub const fn search_mode(&self) -> SearchMode {
        self.search_mode
    }

    /// Current query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current request state.
    #[must_use]
    pub const fn request_state(&self) -> &RequestState {
        &self.request_state
    }

    /// Switches mode and clears the query, even if the mode is unchanged.
    pub fn set_search_mode(&mut self, mode: SearchMode) {
        self.search_mode = mode;
        self.query.clear();
        self.genre_cursor = 0;
    }

    /// Sets the query verbatim.
    pub fn set_query(&mut self, value: impl Into<String>) {
        self.query = value.into();
        self.genre_cursor = GENRES
            .iter()
            .position(|g| *g == self.query)
            .map_or(0, |i| i.saturating_add(1));
    }

    /// Options of the genre choice list, placeholder first.
    pub fn genre_options() -> impl Iterator<Item = &'static str> {
        std::iter::once(GENRE_PLACEHOLDER).chain(GENRES)
    }

    /// Index of the highlighted genre option (0 = placeholder).
    #[must_use]
    pub const fn genre_cursor(&self) -> usize {
        self.genre_cursor
    }

    /// Moves the genre choice down and selects it.
    pub fn select_next_genre(&mut self) {
        if self.genre_cursor < GENRES.len() {
            self.select_genre_at(self.genre_cursor.saturating_add(1));
        }
    }

    /// Moves the genre choice up and selects it. The placeholder cannot be
    /// re-selected once a genre was chosen.
    pub fn select_prev_genre(&mut self) {
        if self.genre_cursor > 1 {
            self.select_genre_at(self.genre_cursor.saturating_sub(1));
        }
    }

    fn select_genre_at(&mut self, cursor: usize) {
        if let Some(genre) = cursor.checked_sub(1).and_then(|i| GENRES.get(i)) {
            self.genre_cursor = cursor;
            self.query = String::from(*genre);
        }
    }

    /// Whether the submit button accepts presses.
    #[must_use]
    pub const fn button_enabled(&self) -> bool {
        !self.request_state.is_loading()
    }

    /// Submit button caption.
    #[must_use]
    pub const fn button_label(&self) -> &'static str {
        if self.request_state.is_loading() {
            "Searching..."
        } else {
            "Get Recommendations"
        }
    }

    /// Validates the form and, if a request should be sent, enters `Loading`.
    ///
    /// Returns `None` without touching the network when:
    /// - genre mode has no selection (state becomes `Failed`);
    /// - any other mode has a blank query (state unchanged).
    pub fn begin_submit(&mut self) -> Option<SearchRequest> {
        if self.search_mode == SearchMode::Genre && self.query.is_empty() {
            self.request_state = RequestState::Failed(String::from(GENRE_REQUIRED_MESSAGE));
            return None;
        }
        if self.query.trim().is_empty() {
            tracing::debug!(mode = %self.search_mode, "blank query, nothing to submit");
            return None;
        }

        self.request_state = RequestState::Loading;
        Some(SearchRequest::new(self.search_mode, self.query.clone()))
    }

    /// Applies the outcome of a request started by [`Self::begin_submit`].
    ///
    /// Outcomes are applied in arrival order; there is no request-id guard.
    pub fn resolve(&mut self, outcome: SearchOutcome) {
        self.request_state = match outcome {
            Ok(results) => {
                tracing::info!(count = results.len(), "recommendations loaded");
                RequestState::Success(results)
            }
            Err(err) => {
                tracing::warn!(error = %err, "recommendation request failed");
                RequestState::Failed(err.to_string())
            }
        };
    }

    /// Validates, sends one request through `api`, and applies its outcome.
    #[allow(clippy::future_not_send)]
    pub async fn submit<A: LocalRecommendApi + ?Sized>(&mut self, api: &A) {
        let Some(request) = self.begin_submit() else {
            return;
        };
        let outcome = api.recommend(&request).await;
        self.resolve(outcome);
    }

    /// Whether the results block is visible.
    #[must_use]
    pub fn shows_results(&self) -> bool {
        !self.request_state.results().is_empty()
    }

    /// One card per result, in order.
    #[must_use]
    pub fn cards(&self) -> Vec<ResultCard<'_>> {
        self.request_state
            .results()
            .iter()
            .map(ResultCard::from)
            .collect()
    }
}
