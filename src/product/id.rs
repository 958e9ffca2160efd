//! Product id generation.
//!
//! Ids are strings with a leading underscore. The sequential policy yields
//! `_1`, `_2`, ... based on the largest numeric id already stored; the random
//! policy yields `_` followed by nine base-36 characters.

use super::Product;
use crate::error::StoreError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const ID_PREFIX: char = '_';
const RANDOM_ID_LEN: usize = 9;

/// How the store assigns ids to new products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// One more than the largest `_<integer>` id in the store
    #[default]
    Sequential,
    /// Opaque `_<base36>` id, re-drawn on collision
    Random,
}

impl IdPolicy {
    /// Compute an id not used by any product in `existing`.
    pub fn next_id(self, existing: &[Product]) -> Result<String, StoreError> {
        match self {
            IdPolicy::Sequential => next_sequential_id(existing),
            IdPolicy::Random => {
                let taken: HashSet<&str> = existing.iter().map(|p| p.id.as_str()).collect();
                let mut rng = rand::thread_rng();
                loop {
                    let candidate = random_id(&mut rng);
                    if !taken.contains(candidate.as_str()) {
                        return Ok(candidate);
                    }
                    tracing::debug!(id = %candidate, "random id collision, drawing again");
                }
            }
        }
    }
}

/// Numeric part of a `_<integer>` id, or `None` for anything else.
pub fn sequence_number(id: &str) -> Option<u64> {
    let digits = id.strip_prefix(ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn next_sequential_id(existing: &[Product]) -> Result<String, StoreError> {
    let max = existing
        .iter()
        .filter_map(|p| sequence_number(&p.id))
        .max()
        .unwrap_or(0);
    let next = max.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?;
    Ok(format!("{}{}", ID_PREFIX, next))
}

fn random_id<R: Rng>(rng: &mut R) -> String {
    let mut id = String::with_capacity(RANDOM_ID_LEN + 1);
    id.push(ID_PREFIX);
    for _ in 0..RANDOM_ID_LEN {
        let digit = rng.gen_range(0..36u32);
        // from_digit cannot fail for digit < radix
        id.push(std::char::from_digit(digit, 36).unwrap_or('0'));
    }
    id
}
