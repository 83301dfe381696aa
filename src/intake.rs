//! Scoped CSV intake.
//!
//! Spools an incoming payload to a transient file and guarantees the copy
//! is removed when the handle drops, on success and error paths alike.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::dataset::{Dataset, DatasetError};

/// Errors raised while spooling a payload.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// A named input must carry a `.csv` extension (any case).
    #[error("{} is not a .csv file", .path.display())]
    NotCsv { path: PathBuf },

    /// Reading the payload or writing the spooled copy failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Persisting the spooled copy under `keep_spool` failed.
    #[error(transparent)]
    Keep(#[from] tempfile::PersistError),
}

/// Configuration for the intake layer, built once at startup.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Directory the spooled copy is written to.
    pub spool_dir: PathBuf,
    /// Keep the spooled copy instead of deleting it.
    pub keep_spool: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            spool_dir: env::temp_dir(),
            keep_spool: false,
        }
    }
}

/// A CSV payload spooled to transient storage.
///
/// The backing file lives until the handle drops or [`SpooledCsv::finish`]
/// runs; dropping removes it even when the surrounding computation fails.
#[derive(Debug)]
pub struct SpooledCsv {
    file: NamedTempFile,
    origin: String,
    keep: bool,
}

impl SpooledCsv {
    /// Spools the file at `path`, which must carry a `.csv` extension.
    pub fn from_path(path: &Path, config: &IntakeConfig) -> Result<Self, IntakeError> {
        if !is_csv(path) {
            return Err(IntakeError::NotCsv {
                path: path.to_path_buf(),
            });
        }
        let payload = fs::read(path)?;
        Self::spool(&payload, path.display().to_string(), config)
    }

    /// Spools a payload read to end from `reader` (stdin, a socket); no
    /// extension check applies.
    pub fn from_reader<R: Read>(
        mut reader: R,
        origin: &str,
        config: &IntakeConfig,
    ) -> Result<Self, IntakeError> {
        let mut payload = Vec::new();
        reader.read_to_end(&mut payload)?;
        Self::spool(&payload, origin.to_string(), config)
    }

    fn spool(payload: &[u8], origin: String, config: &IntakeConfig) -> Result<Self, IntakeError> {
        let file = tempfile::Builder::new()
            .prefix("oneway-")
            .suffix(".csv")
            .tempfile_in(&config.spool_dir)?;
        fs::write(file.path(), payload)?;
        Ok(Self {
            file,
            origin,
            keep: config.keep_spool,
        })
    }

    /// Path of the spooled copy.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Where the payload came from, for messages.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Parses the spooled copy into a [`Dataset`].
    pub fn dataset(&self) -> Result<Dataset, DatasetError> {
        Dataset::from_csv_path(self.path())
    }

    /// Removes the spooled copy, or persists it when the intake was
    /// configured with `keep_spool`, returning the kept path.
    pub fn finish(self) -> Result<Option<PathBuf>, IntakeError> {
        if self.keep {
            let (_, path) = self.file.keep()?;
            Ok(Some(path))
        } else {
            self.file.close()?;
            Ok(None)
        }
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
