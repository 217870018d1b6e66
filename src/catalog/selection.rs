//! Seeded choice among candidates sharing one average color

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Picks one candidate per grid cell when several share a color
///
/// The choice depends only on the seed and the cell index, never on the
/// order cells are processed in, so parallel composition stays reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSelector {
    seed: u64,
}

impl CandidateSelector {
    /// Create a selector for the given seed
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed in use
    pub const fn seed(self) -> u64 {
        self.seed
    }

    /// Index into a list of `count` candidates for the cell at `cell_index`
    ///
    /// Returns `None` when there are no candidates.
    pub fn choose_index(self, cell_index: usize, count: usize) -> Option<usize> {
        match count {
            0 => None,
            1 => Some(0),
            _ => {
                let mut rng = StdRng::seed_from_u64(self.seed ^ (cell_index as u64).rotate_left(32));
                Some(rng.random_range(0..count))
            }
        }
    }

    /// Candidate for the cell at `cell_index`
    pub fn choose<T>(self, cell_index: usize, candidates: &[T]) -> Option<&T> {
        self.choose_index(cell_index, candidates.len())
            .and_then(|index| candidates.get(index))
    }
}
