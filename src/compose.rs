//! Composition of the final per-list presentation sequence.

use crate::assign::ListEntry;
use crate::stimuli::Filler;
use rand::seq::SliceRandom;
use rand::Rng;

/// Merge the assigned items with the filler pool and shuffle the whole
/// sequence once.
///
/// No stratification: items and fillers may cluster. The caller owns the
/// RNG, so reproducibility is a matter of seeding it.
pub fn compose<R: Rng + ?Sized>(
    assigned: Vec<ListEntry>,
    fillers: &[Filler],
    rng: &mut R,
) -> Vec<ListEntry> {
    let mut sequence = assigned;
    sequence.reserve(fillers.len());
    sequence.extend(fillers.iter().map(|filler| ListEntry {
        id: filler.id.to_string(),
        text: filler.text.clone(),
    }));
    sequence.shuffle(rng);
    sequence
}

/// Ordered identifiers of a sequence, i.e. the order-log payload.
pub fn order_of(sequence: &[ListEntry]) -> Vec<&str> {
    sequence.iter().map(|entry| entry.id.as_str()).collect()
}
