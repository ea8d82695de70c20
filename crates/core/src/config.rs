//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into services
//! as an [`Arc<CoreConfig>`](std::sync::Arc). Request handlers never read
//! process-wide environment variables, which keeps behaviour consistent across
//! multi-threaded runtimes and test harnesses.

use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    dataset_path: PathBuf,
    user_data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The paths are not checked here: the dataset path is validated by
    /// [`ReferenceTable::load`](crate::ReferenceTable::load) at startup and
    /// the user data directory is created on first write.
    pub fn new(dataset_path: PathBuf, user_data_dir: PathBuf) -> Self {
        Self {
            dataset_path,
            user_data_dir,
        }
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub fn user_data_dir(&self) -> &Path {
        &self.user_data_dir
    }
}
