//! The draw engine: eligibility filtering and unbiased winner selection.
//!
//! Everything in this module is pure. Persistence of the resulting winner
//! rows and the raffle state transition is the caller's concern.

use crate::models::{Participant, RaffleAudience};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

/// Error types for draw operations
#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Not enough eligible participants: requested {requested}, eligible {eligible}")]
    InsufficientPool { requested: usize, eligible: usize },
}

/// Result type for draw operations
pub type DrawResult<T> = Result<T, DrawError>;

/// Compute the eligible pool for a draw.
///
/// Applies the audience filter, then removes previous winners when the
/// raffle excludes them. `previous_winner_ids` must contain only the ids of
/// non-pending winners of completed raffles, so an in-flight Major draw does
/// not exclude its own unrevealed winners.
///
/// An empty pool is a valid result, never an error.
pub fn eligible_pool(
    participants: &[Participant],
    audience: RaffleAudience,
    exclude_previous_winners: bool,
    previous_winner_ids: &HashSet<String>,
) -> Vec<Participant> {
    participants
        .iter()
        .filter(|p| match audience {
            RaffleAudience::Everyone => true,
            RaffleAudience::Family => p.is_family,
            RaffleAudience::NonFamily => !p.is_family,
        })
        .filter(|p| !(exclude_previous_winners && previous_winner_ids.contains(&p.id)))
        .cloned()
        .collect()
}

/// Select `count` winners from the pool without replacement.
///
/// Fails with `InsufficientPool` rather than silently truncating, so a
/// raffle can never end up partially filled.
pub fn select_winners(pool: &[Participant], count: usize) -> DrawResult<Vec<Participant>> {
    select_winners_with(pool, count, &mut rand::thread_rng())
}

/// Select winners using a caller-supplied RNG.
///
/// The pool is Fisher-Yates shuffled and the first `count` entries taken,
/// which makes every size-`count` subset equally likely regardless of input
/// order. Output order is the reveal order for staggered draws.
pub fn select_winners_with<R: Rng + ?Sized>(
    pool: &[Participant],
    count: usize,
    rng: &mut R,
) -> DrawResult<Vec<Participant>> {
    if pool.len() < count {
        return Err(DrawError::InsufficientPool {
            requested: count,
            eligible: pool.len(),
        });
    }

    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    Ok(shuffled)
}
