use std::collections::HashSet;

use itertools::Itertools;
use scraper::Html;
use tracing::{debug, info, instrument};

use crate::dataset::cache::PageCache;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::model::PlayerStatRow;
use crate::vlr_scraper::matches::assemble::assemble_match;
use crate::vlr_scraper::matches::get_match_page;
use crate::vlr_scraper::PageSource;

/// What one merge run produced.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// Rows of every newly processed match, in processing order.
    pub rows: Vec<PlayerStatRow>,
    /// Match ids that were processed, in order.
    pub processed: Vec<u32>,
    /// Requested ids skipped because the dataset already holds them.
    pub already_present: usize,
    /// Pages downloaded during this run.
    pub fetched: usize,
    /// Pages served from the page cache.
    pub reused: usize,
}

/// Scrape every match in `match_ids` that `existing` does not already cover.
///
/// Pages come from `cache` when stored there, otherwise from `source`, and
/// freshly downloaded pages are added to `cache`. Requested ids are handled in
/// order and each at most once. The first failing match aborts the run; pages
/// fetched before the failure stay in `cache`.
#[instrument(skip_all, fields(requested = match_ids.len()))]
pub async fn merge_matches<S: PageSource>(
    source: &S,
    match_ids: &[u32],
    existing: Option<&Dataset>,
    cache: &mut PageCache,
) -> Result<MergeOutcome> {
    let known = existing.map(Dataset::match_ids).unwrap_or_default();
    let mut seen = HashSet::new();
    let work = match_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect_vec();
    let pending = work.iter().copied().filter(|id| !known.contains(id)).collect_vec();

    let mut outcome = MergeOutcome {
        already_present: work.len() - pending.len(),
        ..MergeOutcome::default()
    };
    if outcome.already_present > 0 {
        info!(
            new = pending.len(),
            skipped = outcome.already_present,
            "dataset detected, appending new matches only"
        );
    }

    for (n, &match_id) in pending.iter().enumerate() {
        info!(match_id, "match {}/{}", n + 1, pending.len());
        let document = match cache.get(match_id) {
            Some(page) => {
                debug!(match_id, "using stored page");
                outcome.reused += 1;
                Html::parse_document(page)
            }
            None => {
                let page = get_match_page(source, match_id).await?;
                let document = Html::parse_document(&page);
                cache.insert(match_id, page);
                outcome.fetched += 1;
                document
            }
        };
        outcome.rows.extend(assemble_match(match_id, &document)?);
        outcome.processed.push(match_id);
    }

    info!(
        matches = outcome.processed.len(),
        rows = outcome.rows.len(),
        fetched = outcome.fetched,
        reused = outcome.reused,
        "merge finished"
    );
    Ok(outcome)
}
