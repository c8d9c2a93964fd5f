use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index into a reply pool. Isolated so tests can swap in a
/// seeded or scripted source.
pub trait ReplySampler: Send {
    /// Must return a value in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform sampling with no memory of earlier picks; repeats are allowed.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ReplySampler for RandomSampler {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }
}

/// Walks the pool in order, wrapping around.
#[derive(Debug, Clone, Default)]
pub struct CyclingSampler {
    next: usize,
}

impl CyclingSampler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReplySampler for CyclingSampler {
    fn pick(&mut self, len: usize) -> usize {
        let idx = self.next % len.max(1);
        self.next = self.next.wrapping_add(1);
        idx
    }
}
