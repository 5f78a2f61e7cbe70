pub mod assemble;
pub mod extract;
#[cfg(test)]
pub(crate) mod fixtures;

use scraper::Html;
use tracing::{debug, instrument};

use crate::error::{Result, VlrError};
use crate::model::{MatchRecord, PlayerStatRow};
use crate::vlr_scraper::PageSource;

/// Raw markup of a match page. A 404 is reported as [`VlrError::MatchNotFound`].
#[instrument(skip(source))]
pub(crate) async fn get_match_page<S: PageSource>(source: &S, match_id: u32) -> Result<String> {
    source
        .fetch(&match_id.to_string())
        .await?
        .ok_or(VlrError::MatchNotFound { match_id })
}

pub(crate) async fn get_match_rows<S: PageSource>(
    source: &S,
    match_id: u32,
) -> Result<Vec<PlayerStatRow>> {
    let page = get_match_page(source, match_id).await?;
    let rows = assemble::assemble_match(match_id, &Html::parse_document(&page))?;
    debug!(match_id, rows = rows.len(), "parsed match rows");
    Ok(rows)
}

pub(crate) async fn get_match_record<S: PageSource>(
    source: &S,
    match_id: u32,
) -> Result<MatchRecord> {
    let page = get_match_page(source, match_id).await?;
    let document = Html::parse_document(&page);
    assemble::extract_match_record(&document.root_element(), match_id)
}
