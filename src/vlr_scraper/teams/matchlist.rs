use tracing::{debug, instrument};

use crate::error::Result;
use crate::vlr_scraper::match_item::collect_match_ids;
use crate::vlr_scraper::PageSource;

/// Ids of a team's most recent matches, newest first, at most `count`.
#[instrument(skip(source))]
pub(crate) async fn get_team_match_ids<S: PageSource>(
    source: &S,
    team_id: u32,
    count: usize,
) -> Result<Vec<u32>> {
    let ids = collect_match_ids(source, &format!("team/matches/{team_id}"), count).await?;
    debug!(count = ids.len(), team_id, "collected team match ids");
    Ok(ids)
}
