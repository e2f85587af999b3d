//! Observation containers for pairwise block sharing.
//!
//! Purpose
//! -------
//! Provide small, validated containers for the segment-sharing observations:
//! one [`PairObservation`] per population pair (distance, comparison count,
//! observed block lengths) and the [`SharingData`] collection the model
//! evaluates against. Validation happens once at the Rust boundary so the
//! likelihood hot path can assume clean inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - Distances are finite and strictly positive (distinct populations).
//! - Comparison counts are at least 1.
//! - Observed block lengths are finite and strictly positive; lengths
//!   outside the analysis window are allowed here and filtered by the
//!   evaluator.
//! - A pair with no observed blocks is valid data, not an error: it
//!   contributes only the no-detection expectation term.
//!
//! Ownership
//! ---------
//! Observation data are owned by the caller and passed by reference into
//! `fit`/likelihood entry points; the model never copies them.
use crate::sharing::errors::{SharingError, SharingResult};

/// One validated population pair: distance, comparison count, and the
/// observed shared-block lengths (cM).
#[derive(Debug, Clone, PartialEq)]
pub struct PairObservation {
    /// Pairwise distance between the populations (finite, > 0).
    pub distance: f64,
    /// Number of individual-pair comparisons behind this population pair.
    pub comparisons: u64,
    /// Observed shared-block lengths in cM (each finite, > 0; may be empty).
    pub blocks: Vec<f64>,
}

impl PairObservation {
    /// Construct a validated pair observation.
    ///
    /// # Errors
    /// - [`SharingError::NonFiniteDistance`] / [`SharingError::NonPositiveDistance`]
    ///   for an unusable distance.
    /// - [`SharingError::ZeroComparisons`] when `comparisons == 0`.
    /// - [`SharingError::InvalidBlockLength`] for the first non-finite or
    ///   non-positive block length.
    pub fn new(distance: f64, comparisons: u64, blocks: Vec<f64>) -> SharingResult<Self> {
        if !distance.is_finite() {
            return Err(SharingError::NonFiniteDistance { value: distance });
        }
        if distance <= 0.0 {
            return Err(SharingError::NonPositiveDistance { value: distance });
        }
        if comparisons == 0 {
            return Err(SharingError::ZeroComparisons);
        }
        for (index, &value) in blocks.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(SharingError::InvalidBlockLength { index, value });
            }
        }
        Ok(PairObservation { distance, comparisons, blocks })
    }
}

/// The full observation set: one [`PairObservation`] per population pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SharingData {
    /// Validated population pairs.
    pub pairs: Vec<PairObservation>,
}

impl SharingData {
    /// Wrap an already-validated pair collection.
    ///
    /// # Errors
    /// - [`SharingError::EmptyPairSet`] when `pairs` is empty.
    pub fn new(pairs: Vec<PairObservation>) -> SharingResult<Self> {
        if pairs.is_empty() {
            return Err(SharingError::EmptyPairSet);
        }
        Ok(SharingData { pairs })
    }

    /// Assemble the observation set from three aligned collections: pairwise
    /// distances, comparison counts, and per-pair block-length lists.
    ///
    /// # Errors
    /// - [`SharingError::LengthMismatch`] when the collections disagree in
    ///   length.
    /// - Any validation error from [`PairObservation::new`], and
    ///   [`SharingError::EmptyPairSet`] for empty inputs.
    pub fn from_parts(
        distances: &[f64], comparisons: &[u64], blocks: Vec<Vec<f64>>,
    ) -> SharingResult<Self> {
        if distances.len() != comparisons.len() || distances.len() != blocks.len() {
            return Err(SharingError::LengthMismatch {
                distances: distances.len(),
                comparisons: comparisons.len(),
                pairs: blocks.len(),
            });
        }
        let mut pairs = Vec::with_capacity(distances.len());
        for ((&distance, &count), block_list) in distances.iter().zip(comparisons).zip(blocks) {
            pairs.push(PairObservation::new(distance, count, block_list)?);
        }
        SharingData::new(pairs)
    }

    /// Number of population pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when the set holds no pairs; unreachable for validated data.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction and validation of `PairObservation`.
    // - Aligned-collection assembly and its mismatch error.
    //
    // They intentionally DO NOT cover:
    // - How the evaluator filters blocks against the window (model tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a well-formed pair, including one with no blocks,
    // constructs and preserves its fields.
    //
    // Given
    // -----
    // - distance 120, 2500 comparisons, two blocks; and an empty block list.
    //
    // Expect
    // ------
    // - Both construct successfully; fields round-trip unchanged.
    fn valid_pairs_construct_including_empty_block_lists() {
        let pair = PairObservation::new(120.0, 2500, vec![5.5, 7.25]).unwrap();
        assert_eq!(pair.distance, 120.0);
        assert_eq!(pair.comparisons, 2500);
        assert_eq!(pair.blocks, vec![5.5, 7.25]);

        let silent = PairObservation::new(80.0, 100, Vec::new()).unwrap();
        assert!(silent.blocks.is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid distances, counts, and block lengths are rejected with
    // the matching first-offender payload.
    //
    // Given
    // -----
    // - A zero distance, a zero comparison count, and a block list whose
    //   second entry is negative.
    //
    // Expect
    // ------
    // - `NonPositiveDistance`, `ZeroComparisons`, and
    //   `InvalidBlockLength { index: 1, .. }` respectively.
    fn invalid_pairs_are_rejected() {
        assert_eq!(
            PairObservation::new(0.0, 10, Vec::new()).unwrap_err(),
            SharingError::NonPositiveDistance { value: 0.0 }
        );
        assert_eq!(
            PairObservation::new(50.0, 0, Vec::new()).unwrap_err(),
            SharingError::ZeroComparisons
        );
        assert_eq!(
            PairObservation::new(50.0, 10, vec![4.0, -2.0]).unwrap_err(),
            SharingError::InvalidBlockLength { index: 1, value: -2.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify aligned-collection assembly and the mismatch error.
    //
    // Given
    // -----
    // - Three aligned collections of length 2, then a comparisons slice of
    //   length 1.
    //
    // Expect
    // ------
    // - Assembly succeeds with 2 pairs in order; the misaligned call reports
    //   all three lengths.
    fn from_parts_checks_alignment() {
        let data = SharingData::from_parts(
            &[60.0, 150.0],
            &[400, 900],
            vec![vec![4.5], Vec::new()],
        )
        .unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.pairs[1].comparisons, 900);

        let err =
            SharingData::from_parts(&[60.0, 150.0], &[400], vec![vec![4.5], Vec::new()]).unwrap_err();
        assert_eq!(err, SharingError::LengthMismatch { distances: 2, comparisons: 1, pairs: 2 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure an empty observation set is rejected.
    //
    // Given
    // -----
    // - `SharingData::new(vec![])`.
    //
    // Expect
    // ------
    // - `SharingError::EmptyPairSet`.
    fn empty_pair_set_is_rejected() {
        assert_eq!(SharingData::new(Vec::new()).unwrap_err(), SharingError::EmptyPairSet);
    }
}
