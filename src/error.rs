use ::scraper::error::SelectorErrorKind;
use std::num::ParseIntError;

/// All errors that can occur while scraping, assembling or persisting stats.
#[derive(thiserror::Error, Debug)]
pub enum VlrError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code other than 404.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// Failed to parse an integer from a structural element (ids, hrefs).
    #[error("failed to parse integer: {0}")]
    IntParse(#[from] ParseIntError),

    /// Failed to parse a date from scraped text.
    #[error("failed to parse date: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// The site answered 404 for a match page.
    #[error("match {match_id} not found")]
    MatchNotFound { match_id: u32 },

    /// The site answered 404 for a player profile.
    #[error("player {player_id} not found")]
    PlayerNotFound { player_id: u32 },

    /// A map listed more players than two five-player rosters.
    #[error("map {map}: expected {expected} players, found {found}")]
    RosterShape {
        map: String,
        expected: usize,
        found: usize,
    },

    /// The two team tables of a map did not hold five players each.
    #[error("map {map}: expected two tables of 5 players, found {sizes:?}")]
    UnevenRosters { map: String, sizes: Vec<usize> },

    /// A per-player field did not line up with the roster of its map.
    #[error("map {map}: {field} has {found} entries, expected {expected}")]
    MisalignedStats {
        map: String,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl<'a> From<SelectorErrorKind<'a>> for VlrError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        VlrError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VlrError>;
