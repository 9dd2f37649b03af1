//! Loading the analysis point table

mod processor;
mod raw_types;

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use log::{info, warn};

pub use raw_types::FeatureRow;

use super::parser::{deserialize_csv_checked, open_csv};
use crate::{Error, model::FeatureStore};

impl FeatureStore {
    /// Loads a feature table from a CSV file.
    ///
    /// # Errors
    ///
    /// [`Error::IoError`] if the file cannot be opened, [`Error::DataFormat`]
    /// if a required column is absent or a value is malformed.
    pub fn load(path: &Path) -> Result<Self, Error> {
        info!("Loading analysis points from {}", path.display());
        Self::from_reader(open_csv(path)?)
    }

    /// Parses a feature table from any CSV source.
    ///
    /// # Errors
    ///
    /// [`Error::DataFormat`] if a required column is absent or a value is
    /// malformed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let started = Instant::now();
        let rows: Vec<FeatureRow> = deserialize_csv_checked(reader, raw_types::check_headers)?;

        let points = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| processor::analysis_point_from_row(row, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        if !points.is_empty() && points.iter().all(|p| p.nightlife_total() == 0) {
            warn!("Feature table has no nightlife venues; the nightlife weight has no effect");
        }

        let store = Self::new(points)?;
        info!(
            "Loaded {} analysis points in {:.1?}",
            store.len(),
            started.elapsed()
        );
        Ok(store)
    }
}
