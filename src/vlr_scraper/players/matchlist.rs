use tracing::{debug, instrument};

use crate::error::Result;
use crate::vlr_scraper::match_item::collect_match_ids;
use crate::vlr_scraper::PageSource;

/// Ids of a player's most recent matches, newest first, at most `count`.
#[instrument(skip(source))]
pub(crate) async fn get_player_match_ids<S: PageSource>(
    source: &S,
    player_id: u32,
    count: usize,
) -> Result<Vec<u32>> {
    let ids = collect_match_ids(source, &format!("player/matches/{player_id}"), count).await?;
    debug!(count = ids.len(), player_id, "collected player match ids");
    Ok(ids)
}
