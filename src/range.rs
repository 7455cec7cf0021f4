//! CPU-range allocation: chunking and expansion.
//!
//! Two-tier validation, split per call site:
//! - [`chunk`] backs a user-input form and validates strictly, surfacing
//!   a [`RangeError`] instead of silently correcting bad input.
//! - [`expand`] drives a live preview as the user types, so it is
//!   permissive: malformed tokens are skipped and never abort the whole
//!   expansion.

use rustc_hash::FxHashSet;
use thiserror::Error;

/// Validation errors for strict range input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("end must be a non-negative integer, got {0}")]
    InvalidEnd(i64),

    #[error("step must be a positive integer, got {0}")]
    InvalidStep(i64),
}

/// Partition `[0, end]` (inclusive) into the minimal list of contiguous,
/// non-overlapping chunks of at most `step` ids each.
///
/// `chunk(7, 4)` yields `["0-3", "4-7"]`; `chunk(9, 4)` yields
/// `["0-3", "4-7", "8-9"]`.
pub fn chunk(end: i64, step: i64) -> Result<Vec<String>, RangeError> {
    if end < 0 {
        return Err(RangeError::InvalidEnd(end));
    }
    if step <= 0 {
        return Err(RangeError::InvalidStep(step));
    }

    let end = end as u64;
    let step = step as u64;
    let mut tokens = Vec::new();
    let mut cursor = 0u64;
    while cursor <= end {
        let chunk_end = (cursor + step - 1).min(end);
        tokens.push(format!("{}-{}", cursor, chunk_end));
        cursor += step;
    }
    Ok(tokens)
}

/// Expand range tokens into a sorted, deduplicated id set.
///
/// Each token must match `ws* digits ws* '-' ws* digits ws*` with
/// `end >= start`; tokens that do not are skipped. Input with no valid
/// tokens yields an empty vec, not an error.
pub fn expand<S: AsRef<str>>(tokens: &[S]) -> Vec<u64> {
    let mut ids: FxHashSet<u64> = FxHashSet::default();
    for token in tokens {
        if let Some((start, end)) = parse_token(token.as_ref()) {
            for id in start..=end {
                ids.insert(id);
            }
        }
    }

    let mut ids: Vec<u64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids
}

/// Parse one `start-end` token, `None` when malformed or inverted.
fn parse_token(token: &str) -> Option<(u64, u64)> {
    let (left, right) = token.split_once('-')?;
    let start = parse_bound(left)?;
    let end = parse_bound(right)?;
    if end < start {
        return None;
    }
    Some((start, end))
}

fn parse_bound(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_exact_fit() {
        assert_eq!(chunk(7, 4).unwrap(), vec!["0-3", "4-7"]);
    }

    #[test]
    fn test_chunk_short_tail() {
        assert_eq!(chunk(9, 4).unwrap(), vec!["0-3", "4-7", "8-9"]);
    }

    #[test]
    fn test_chunk_single_id() {
        assert_eq!(chunk(0, 4).unwrap(), vec!["0-0"]);
        assert_eq!(chunk(0, 1).unwrap(), vec!["0-0"]);
    }

    #[test]
    fn test_chunk_step_larger_than_range() {
        assert_eq!(chunk(2, 100).unwrap(), vec!["0-2"]);
    }

    #[test]
    fn test_chunk_rejects_bad_input() {
        assert_eq!(chunk(-1, 4), Err(RangeError::InvalidEnd(-1)));
        assert_eq!(chunk(5, 0), Err(RangeError::InvalidStep(0)));
        assert_eq!(chunk(5, -2), Err(RangeError::InvalidStep(-2)));
    }

    #[test]
    fn test_expand_round_trip() {
        let ids = expand(&chunk(9, 4).unwrap());
        assert_eq!(ids, (0..=9).collect::<Vec<u64>>());
    }

    #[test]
    fn test_expand_skips_malformed_tokens() {
        let ids = expand(&["2-5", "bad", "9-3"]);
        assert_eq!(ids, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_expand_dedups_overlap() {
        let ids = expand(&["0-3", "2-5", "2-5"]);
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_expand_ignores_token_order() {
        assert_eq!(expand(&["8-9", "0-1"]), vec![0, 1, 8, 9]);
    }

    #[test]
    fn test_expand_tolerates_spaces() {
        assert_eq!(expand(&[" 2 - 4 "]), vec![2, 3, 4]);
    }

    #[test]
    fn test_expand_rejects_signs_and_extra_dashes() {
        assert!(expand(&["-2-5"]).is_empty());
        assert!(expand(&["1-2-3"]).is_empty());
        assert!(expand(&["1.5-3"]).is_empty());
    }

    #[test]
    fn test_expand_empty_input() {
        assert!(expand::<&str>(&[]).is_empty());
        assert!(expand(&["", "nope"]).is_empty());
    }
}
