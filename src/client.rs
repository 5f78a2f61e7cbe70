use tracing::instrument;

use crate::dataset::cache::PageCache;
use crate::dataset::merge::{self, MergeOutcome};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::model::*;
use crate::vlr_scraper::{self, PageSource, BASE_URL};

/// The main entry point for pulling stats from vlr.gg.
///
/// `VlrClient` wraps a [`reqwest::Client`] and a site root. Requests are
/// issued one at a time; every method awaits its page before parsing.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> vlr_stats::Result<()> {
/// use vlr_stats::{Dataset, PageCache, VlrClient};
///
/// let client = VlrClient::new();
/// let ids = client.get_team_match_ids(2593, 10).await?;
///
/// let dataset = Dataset::load("players.csv")?;
/// let mut cache = PageCache::load("pages.csv")?;
/// let outcome = client.merge_matches(&ids, Some(&dataset), &mut cache).await?;
/// Dataset::append_to("players.csv", &outcome.rows)?;
/// cache.save("pages.csv")?;
/// # Ok(())
/// # }
/// ```
pub struct VlrClient {
    http: reqwest::Client,
    base_url: String,
}

impl VlrClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http: client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different site root, e.g. a local mirror.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every player row of a match, maps in pick order.
    #[instrument(skip(self))]
    pub async fn get_match_rows(&self, match_id: u32) -> Result<Vec<PlayerStatRow>> {
        vlr_scraper::matches::get_match_rows(self, match_id).await
    }

    /// Match-level details: date, score, format, event and both teams.
    #[instrument(skip(self))]
    pub async fn get_match_record(&self, match_id: u32) -> Result<MatchRecord> {
        vlr_scraper::matches::get_match_record(self, match_id).await
    }

    /// Up to `count` of a player's most recent match ids.
    #[instrument(skip(self))]
    pub async fn get_player_match_ids(&self, player_id: u32, count: usize) -> Result<Vec<u32>> {
        vlr_scraper::players::matchlist::get_player_match_ids(self, player_id, count).await
    }

    /// Up to `count` of a team's most recent match ids.
    #[instrument(skip(self))]
    pub async fn get_team_match_ids(&self, team_id: u32, count: usize) -> Result<Vec<u32>> {
        vlr_scraper::teams::matchlist::get_team_match_ids(self, team_id, count).await
    }

    /// Profile header of a player: name, real name, country and socials.
    #[instrument(skip(self))]
    pub async fn get_player_info(&self, player_id: u32) -> Result<PlayerInfo> {
        vlr_scraper::players::info::get_player_info(self, player_id).await
    }

    /// Scrape the matches in `match_ids` not yet covered by `existing`.
    /// See [`merge::merge_matches`].
    pub async fn merge_matches(
        &self,
        match_ids: &[u32],
        existing: Option<&Dataset>,
        cache: &mut PageCache,
    ) -> Result<MergeOutcome> {
        merge::merge_matches(self, match_ids, existing, cache).await
    }
}

impl Default for VlrClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for VlrClient {
    async fn fetch(&self, path: &str) -> Result<Option<String>> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        vlr_scraper::get_page(&self.http, &url).await
    }
}
