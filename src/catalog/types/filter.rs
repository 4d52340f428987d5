/// Conjunctive client-side search predicates.
///
/// `genres` is OR-matched: a release passes when it carries any of the ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Free-text query
    pub query: Option<String>,
    /// Exact airing year
    pub year: Option<i32>,
    /// Season token, matched against the season value or description
    pub season: Option<String>,
    /// Genre ids
    pub genres: Vec<i64>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    pub fn with_genres(mut self, genres: Vec<i64>) -> Self {
        self.genres = genres;
        self
    }

    /// Query text, if any non-blank one was given
    pub fn text_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
    }

    pub fn has_genres(&self) -> bool {
        !self.genres.is_empty()
    }
}
