use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{Result, VlrError};
use crate::vlr_scraper::{id_from_href, PageSource};

/// Entries per page on player and team match-history listings.
pub const MATCH_HISTORY_PAGE_SIZE: usize = 50;

pub(crate) fn parse_match_item_ids(document: &Html) -> Result<Vec<u32>> {
    let selector = Selector::parse("a.wf-card.m-item")?;
    document
        .select(&selector)
        .map(|item| {
            let href = item.value().attr("href").ok_or(VlrError::ElementNotFound {
                context: "match item href",
            })?;
            id_from_href(href, "/")
        })
        .collect()
}

/// Walk a paginated match-history listing until `count` ids are collected or
/// a page comes back short, missing or empty.
pub(crate) async fn collect_match_ids<S: PageSource>(
    source: &S,
    listing: &str,
    count: usize,
) -> Result<Vec<u32>> {
    let mut ids = Vec::with_capacity(count);
    let mut page = 1;
    while ids.len() < count {
        let path = format!("{listing}/?page={page}");
        let Some(body) = source.fetch(&path).await? else {
            debug!(path = %path, "listing page not found");
            break;
        };
        let found = parse_match_item_ids(&Html::parse_document(&body))?;
        debug!(path = %path, count = found.len(), "parsed match history page");
        let exhausted = found.len() < MATCH_HISTORY_PAGE_SIZE;
        ids.extend(found);
        if exhausted {
            break;
        }
        page += 1;
    }
    ids.truncate(count);
    Ok(ids)
}
