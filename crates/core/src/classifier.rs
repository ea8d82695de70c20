//! Nearest-match classification.
//!
//! A screening query is answered by a single linear scan over the reference
//! table: Euclidean distance over the full eight-feature vector, no
//! normalisation or per-feature weighting. The row with the strictly minimal
//! distance wins; equal distances resolve to the earliest row in table order,
//! so the result is deterministic for a given table and query.

use crate::dataset::{ReferenceCase, ReferenceTable, UNKNOWN_LABEL};
use crate::error::QueryError;
use std::fmt;

/// The clinical feature values submitted with one screening request.
///
/// Ephemeral: built per request, consumed by [`classify`], discarded with the
/// response. Field order mirrors [`FEATURE_COLUMNS`](crate::FEATURE_COLUMNS).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryVector {
    pub age: f64,
    pub memory_loss: f64,
    pub behaviour: f64,
    pub tremors: f64,
    pub coordination: f64,
    pub seizures: f64,
    pub vision: f64,
    pub copper: f64,
}

impl QueryVector {
    /// The feature vector in canonical column order.
    pub fn as_features(&self) -> [f64; 8] {
        [
            self.age,
            self.memory_loss,
            self.behaviour,
            self.tremors,
            self.coordination,
            self.seizures,
            self.vision,
            self.copper,
        ]
    }
}

/// The label of the closest reference case, or the explicit unknown sentinel
/// when that row carries no diagnosis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchResult {
    Disease(String),
    Unknown,
}

impl MatchResult {
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Disease(name) => Some(name),
            Self::Unknown => None,
        }
    }

    fn from_case(case: &ReferenceCase) -> Self {
        match case.label() {
            Some(label) => Self::Disease(label.to_string()),
            None => Self::Unknown,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disease(name) => f.write_str(name),
            Self::Unknown => f.write_str(UNKNOWN_LABEL),
        }
    }
}

/// Classify a query vector against the reference table.
///
/// Pure function over its two inputs: no I/O, no randomness, bounded by
/// `O(rows × features)`.
///
/// # Errors
///
/// Returns [`QueryError::DimensionMismatch`] when the query length differs
/// from the table's feature-column count.
pub fn classify(query: &[f64], table: &ReferenceTable) -> Result<MatchResult, QueryError> {
    let expected = table.feature_columns().len();
    if query.len() != expected {
        return Err(QueryError::DimensionMismatch {
            expected,
            actual: query.len(),
        });
    }

    let mut best_distance = f64::INFINITY;
    let mut best_case: Option<&ReferenceCase> = None;
    for case in table.rows() {
        let distance = euclidean(query, case.features());
        // Strict comparison keeps the earliest row on equal distances.
        if distance < best_distance {
            best_distance = distance;
            best_case = Some(case);
        }
    }

    // `load` rejects empty tables; only a hand-built table can reach the
    // fallback arm.
    Ok(best_case.map_or(MatchResult::Unknown, MatchResult::from_case))
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let diff = x - y;
        sum += diff * diff;
    }
    sum.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ReferenceCase;

    fn case(features: [f64; 8], label: Option<&str>) -> ReferenceCase {
        ReferenceCase::new(features.to_vec(), label.map(str::to_string))
    }

    fn two_case_table() -> ReferenceTable {
        ReferenceTable::from_rows(vec![
            case(
                [70.0, 1.0, 2.0, 1.0, 0.0, 0.0, 1.0, 50.0],
                Some("Wilson Disease"),
            ),
            case([20.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0], Some("Healthy")),
        ])
    }

    #[test]
    fn closest_row_wins() {
        let table = two_case_table();
        let query = [69.0, 1.0, 2.0, 1.0, 0.0, 0.0, 1.0, 48.0];

        let result = classify(&query, &table).expect("valid query");
        assert_eq!(result, MatchResult::Disease("Wilson Disease".into()));
    }

    #[test]
    fn exact_feature_match_returns_that_label() {
        let table = two_case_table();
        let query = [20.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0];

        let result = classify(&query, &table).expect("valid query");
        assert_eq!(result, MatchResult::Disease("Healthy".into()));
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let table = two_case_table();
        let query = [45.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 30.0];

        let first = classify(&query, &table).expect("valid query");
        for _ in 0..10 {
            assert_eq!(classify(&query, &table).expect("valid query"), first);
        }
    }

    #[test]
    fn equal_distances_resolve_to_the_earlier_row() {
        let features = [40.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 40.0];
        let table = ReferenceTable::from_rows(vec![
            case(features, Some("Batten Disease")),
            case(features, Some("Niemann-Pick Type C")),
        ]);

        let result = classify(&features, &table).expect("valid query");
        assert_eq!(result, MatchResult::Disease("Batten Disease".into()));
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let table = two_case_table();
        let query = [1.0, 2.0, 3.0];

        let result = classify(&query, &table);
        assert_eq!(
            result,
            Err(QueryError::DimensionMismatch {
                expected: 8,
                actual: 3
            })
        );
    }

    #[test]
    fn unlabeled_nearest_row_yields_unknown() {
        let table = ReferenceTable::from_rows(vec![
            case([10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0], None),
            case(
                [80.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 200.0],
                Some("Wilson Disease"),
            ),
        ]);
        let query = [11.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 11.0];

        let result = classify(&query, &table).expect("valid query");
        assert_eq!(result, MatchResult::Unknown);
        assert_eq!(result.to_string(), "Unknown");
    }

    #[test]
    fn query_vector_features_follow_canonical_order() {
        let query = QueryVector {
            age: 1.0,
            memory_loss: 2.0,
            behaviour: 3.0,
            tremors: 4.0,
            coordination: 5.0,
            seizures: 6.0,
            vision: 7.0,
            copper: 8.0,
        };
        assert_eq!(
            query.as_features(),
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
        );
    }
}
