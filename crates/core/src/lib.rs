//! # Neuromatch Core
//!
//! Core business logic for the neuromatch screening service.
//!
//! This crate contains pure data operations:
//! - Reference dataset loading from CSV into a frozen in-memory table
//! - Nearest-match classification over the loaded table
//! - Disease distribution aggregation for the dashboard
//! - File-backed user credential storage
//! - The static disease information catalog
//!
//! **No API concerns**: HTTP servers, routing, or wire formats belong in
//! `api-rest` and `api-shared`.

#![warn(rust_2018_idioms)]

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod users;

pub use classifier::{classify, MatchResult, QueryVector};
pub use config::CoreConfig;
pub use dataset::{
    LabelCount, ReferenceCase, ReferenceTable, FEATURE_COLUMNS, LABEL_COLUMN, UNKNOWN_LABEL,
};
pub use error::{AuthError, DatasetError, QueryError};
pub use users::{verify_password, UserRecord, UserStore};

/// Default location of the reference dataset, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "data/rare_neuro_diseases_dataset.csv";

/// Default directory for stored user records.
pub const DEFAULT_USER_DATA_DIR: &str = "user_data";
