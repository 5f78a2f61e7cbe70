//! Persistence of stat rows and fetched pages, and the incremental merge
//! that ties them to the scraper.

pub mod cache;
pub mod json;
pub mod merge;

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::model::PlayerStatRow;

/// The growing table of [`PlayerStatRow`]s. Rows are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<PlayerStatRow>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a dataset file. A file that does not exist yet is an empty
    /// dataset.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no dataset found, starting a new one");
            return Ok(Self::new());
        }
        let mut reader = csv::Reader::from_path(path)?;
        let rows = reader
            .deserialize()
            .collect::<std::result::Result<Vec<PlayerStatRow>, _>>()?;
        info!(path = %path.display(), rows = rows.len(), "loaded dataset");
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[PlayerStatRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ids of every match that already has rows.
    pub fn match_ids(&self) -> HashSet<u32> {
        self.rows.iter().map(|r| r.match_id).collect()
    }

    pub fn extend(&mut self, rows: impl IntoIterator<Item = PlayerStatRow>) {
        self.rows.extend(rows);
    }

    /// Write the whole dataset, replacing `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        debug!(path = %path.as_ref().display(), rows = self.rows.len(), "wrote dataset");
        Ok(())
    }

    /// Append `rows` to the file at `path`, writing the header only when the
    /// file is new or empty.
    pub fn append_to(path: impl AsRef<Path>, rows: &[PlayerStatRow]) -> Result<()> {
        let path = path.as_ref();
        let needs_header = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        debug!(path = %path.display(), rows = rows.len(), "appended rows");
        Ok(())
    }
}

impl From<Vec<PlayerStatRow>> for Dataset {
    fn from(rows: Vec<PlayerStatRow>) -> Self {
        Self { rows }
    }
}
