//! Reference dataset loading.
//!
//! The reference dataset is a CSV file with a header row: eight numeric
//! clinical feature columns plus a `Disease` label column. It is loaded once
//! at startup into a [`ReferenceTable`] and never mutated afterwards, so the
//! table can be shared across request handlers without synchronisation
//! (construct-then-freeze).
//!
//! Feature columns are resolved by header name and extracted in the canonical
//! order of [`FEATURE_COLUMNS`], so the column order in the file is free.
//! Query vectors and reference rows are compared field-for-field in that
//! canonical order; the loader enforces the schema so a column-count or
//! column-order mismatch cannot silently corrupt the distance computation.

use crate::error::DatasetError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Canonical feature columns, in the order used for vector alignment.
pub const FEATURE_COLUMNS: [&str; 8] = [
    "Age",
    "Memory_Loss",
    "Behavior_Change",
    "Tremors",
    "Coordination_Loss",
    "Seizures",
    "Vision_Loss",
    "Copper_Level",
];

/// Name of the label column.
pub const LABEL_COLUMN: &str = "Disease";

/// Sentinel label for rows (and results) without a known diagnosis.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One reference clinical record with a known (or absent) diagnosis.
///
/// Features are stored in the canonical order of [`FEATURE_COLUMNS`].
/// Identity is row position in the table; there is no explicit key.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceCase {
    features: Vec<f64>,
    label: Option<String>,
}

impl ReferenceCase {
    pub fn new(features: Vec<f64>, label: Option<String>) -> Self {
        Self { features, label }
    }

    pub fn features(&self) -> &[f64] {
        &self.features
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Count of reference rows carrying one label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

/// The frozen in-memory reference table.
#[derive(Clone, Debug)]
pub struct ReferenceTable {
    columns: Vec<String>,
    rows: Vec<ReferenceCase>,
}

impl ReferenceTable {
    /// Load the reference table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns a [`DatasetError`] when the file is missing or unreadable,
    /// has no header or no data rows, is missing a required column, or
    /// contains a non-numeric feature cell or a ragged row. Rows with an
    /// empty `Disease` cell are permitted and load with no label.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| DatasetError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Build a table directly from rows, in canonical column order.
    ///
    /// Intended for callers that already hold validated rows (tests, tooling).
    pub fn from_rows(rows: Vec<ReferenceCase>) -> Self {
        Self {
            columns: FEATURE_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            rows,
        }
    }

    fn parse(contents: &str) -> Result<Self, DatasetError> {
        let mut lines = contents.lines().enumerate();

        let header = loop {
            match lines.next() {
                Some((_, line)) if line.trim().is_empty() => continue,
                Some((_, line)) => break split_fields(line),
                None => return Err(DatasetError::MissingHeader),
            }
        };

        let mut feature_indices = Vec::with_capacity(FEATURE_COLUMNS.len());
        for column in FEATURE_COLUMNS {
            let index = header
                .iter()
                .position(|h| *h == column)
                .ok_or(DatasetError::MissingColumn(column))?;
            feature_indices.push(index);
        }
        let label_index = header
            .iter()
            .position(|h| *h == LABEL_COLUMN)
            .ok_or(DatasetError::MissingColumn(LABEL_COLUMN))?;

        let mut rows = Vec::new();
        for (line_index, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_fields(line);
            if fields.len() != header.len() {
                return Err(DatasetError::RaggedRow {
                    line: line_index + 1,
                    expected: header.len(),
                    found: fields.len(),
                });
            }

            let mut features = Vec::with_capacity(feature_indices.len());
            for (&index, &column) in feature_indices.iter().zip(FEATURE_COLUMNS.iter()) {
                let raw = fields[index];
                let value = raw
                    .parse::<f64>()
                    .map_err(|_| DatasetError::NonNumericCell {
                        line: line_index + 1,
                        column,
                        value: raw.to_string(),
                    })?;
                features.push(value);
            }

            let label = match fields[label_index] {
                "" => None,
                value => Some(value.to_string()),
            };
            rows.push(ReferenceCase::new(features, label));
        }

        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self {
            columns: FEATURE_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            rows,
        })
    }

    /// Feature column names in the order used for vector alignment.
    pub fn feature_columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[ReferenceCase] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count of rows per disease label, for the dashboard chart.
    ///
    /// Unlabeled rows are counted under [`UNKNOWN_LABEL`]. The result is
    /// ordered by descending count, ties by label, so the output is
    /// deterministic for a given table.
    pub fn label_distribution(&self) -> Vec<LabelCount> {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.label().unwrap_or(UNKNOWN_LABEL)).or_insert(0) += 1;
        }

        let mut distribution: Vec<LabelCount> = counts
            .into_iter()
            .map(|(label, count)| LabelCount {
                label: label.to_string(),
                count,
            })
            .collect();
        distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        distribution
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}
