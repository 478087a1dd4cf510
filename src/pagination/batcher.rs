//! Identifier batching
//!
//! Endpoints cap how many identifiers one request may reference. Longer
//! lists are cut into contiguous batches that are requested one by one.

use crate::error::{Error, Result};

/// Split `ids` into ordered batches of at most `limit` identifiers.
///
/// A list that already fits (including an empty one) comes back as a single
/// batch. Concatenating the batches reproduces `ids` exactly.
pub fn split_ids<T>(ids: Vec<T>, limit: usize) -> Result<IdBatches<T>> {
    if limit == 0 {
        return Err(Error::InvalidBatchLimit { limit });
    }
    Ok(IdBatches {
        ids: ids.into_iter(),
        limit,
        started: false,
    })
}

/// Number of batches `split_ids` produces for `len` identifiers
pub fn batch_count(len: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    len.div_ceil(limit).max(1)
}

/// Lazy iterator over identifier batches
#[derive(Debug)]
pub struct IdBatches<T> {
    ids: std::vec::IntoIter<T>,
    limit: usize,
    started: bool,
}

impl<T> Iterator for IdBatches<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.started && self.ids.len() == 0 {
            return None;
        }
        self.started = true;
        Some(self.ids.by_ref().take(self.limit).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.started {
            self.ids.len().div_ceil(self.limit)
        } else {
            batch_count(self.ids.len(), self.limit)
        };
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for IdBatches<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("id{i}")).collect()
    }

    #[test_case(0, 50, &[0] ; "empty list is one empty batch")]
    #[test_case(10, 50, &[10] ; "short list is untouched")]
    #[test_case(50, 50, &[50] ; "exactly at the limit")]
    #[test_case(51, 50, &[50, 1] ; "one over the limit")]
    #[test_case(100, 50, &[50, 50] ; "exact multiple")]
    #[test_case(137, 50, &[50, 50, 37] ; "remainder in last batch")]
    #[test_case(5, 1, &[1, 1, 1, 1, 1] ; "limit of one")]
    fn test_batch_sizes(len: usize, limit: usize, expected: &[usize]) {
        let batches = split_ids(ids(len), limit).unwrap();
        assert_eq!(batches.len(), expected.len());

        let sizes: Vec<usize> = batches.map(|b| b.len()).collect();
        assert_eq!(sizes, expected);
        assert_eq!(batch_count(len, limit), expected.len());
    }

    #[test]
    fn test_batches_reconstruct_input() {
        let input = ids(137);
        let batches: Vec<Vec<String>> = split_ids(input.clone(), 50).unwrap().collect();

        assert_eq!(batches[0].first().map(String::as_str), Some("id0"));
        assert_eq!(batches[1].first().map(String::as_str), Some("id50"));
        assert_eq!(batches[2].first().map(String::as_str), Some("id100"));
        assert_eq!(batches.concat(), input);
    }

    #[test]
    fn test_short_list_is_single_identical_batch() {
        let input = ids(10);
        let batches: Vec<Vec<String>> = split_ids(input.clone(), 50).unwrap().collect();
        assert_eq!(batches, vec![input]);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = split_ids(ids(3), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidBatchLimit { limit: 0 }));
        assert_eq!(batch_count(3, 0), 0);
    }

    #[test]
    fn test_size_hint_shrinks() {
        let mut batches = split_ids(ids(120), 50).unwrap();
        assert_eq!(batches.len(), 3);
        batches.next();
        assert_eq!(batches.len(), 2);
        batches.next();
        batches.next();
        assert_eq!(batches.len(), 0);
        assert!(batches.next().is_none());
    }
}
