//! Per-player, per-map Valorant match statistics from vlr.gg.
//!
//! Match pages are reduced to flat [`PlayerStatRow`]s, one per player per
//! played map. [`merge_matches`] adds new matches to an existing [`Dataset`]
//! while keeping downloaded pages in a [`PageCache`] between runs.

pub use client::VlrClient;
pub use dataset::cache::PageCache;
pub use dataset::json::append_json;
pub use dataset::merge::{merge_matches, MergeOutcome};
pub use dataset::Dataset;
pub use error::{Result, VlrError};
pub use model::*;
pub use vlr_scraper::match_item::MATCH_HISTORY_PAGE_SIZE;
pub use vlr_scraper::matches::assemble::{
    assemble_game, assemble_match, extract_game_record, extract_match_context,
    extract_match_record,
};
pub use vlr_scraper::matches::extract;
pub use vlr_scraper::{PageSource, BASE_URL};

mod client;
pub mod dataset;
mod error;
mod model;
mod vlr_scraper;
