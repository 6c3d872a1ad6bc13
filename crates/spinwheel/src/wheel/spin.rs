use rand::Rng;
use rand::rngs::ThreadRng;
use std::ops::Range;

/// Randomness behind spin launches.
pub trait SpinSource {
    /// A uniform sample from `range`; `range.start` when the range is empty.
    fn uniform(&mut self, range: Range<f64>) -> f64;
}

pub struct RandSource<R = ThreadRng> {
    rng: R,
}

impl RandSource<ThreadRng> {
    pub fn thread() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> RandSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SpinSource for RandSource<R> {
    fn uniform(&mut self, range: Range<f64>) -> f64 {
        if range.is_empty() {
            return range.start;
        }
        self.rng.random_range(range)
    }
}

/// Replays fixed fractions in [0,1), each scaled into the requested range.
#[cfg(test)]
pub(crate) struct SequenceSource {
    fractions: Vec<f64>,
    draws: usize,
}

#[cfg(test)]
impl SequenceSource {
    pub(crate) fn new(fractions: &[f64]) -> Self {
        Self {
            fractions: fractions.to_vec(),
            draws: 0,
        }
    }

    pub(crate) fn draws(&self) -> usize {
        self.draws
    }
}

#[cfg(test)]
impl SpinSource for SequenceSource {
    fn uniform(&mut self, range: Range<f64>) -> f64 {
        let f = self.fractions[self.draws % self.fractions.len()];
        self.draws += 1;
        range.start + f * (range.end - range.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rand_source_stays_in_range() {
        let mut source = RandSource::new(StdRng::seed_from_u64(7));
        for _ in 0..1000 {
            let v = source.uniform(20.0..35.0);
            assert!((20.0..35.0).contains(&v));
        }
    }

    #[test]
    fn test_rand_source_empty_range() {
        let mut source = RandSource::new(StdRng::seed_from_u64(7));
        assert_eq!(source.uniform(5.0..5.0), 5.0);
    }

    #[test]
    fn test_sequence_source_scales_fractions() {
        let mut source = SequenceSource::new(&[0.0, 0.5]);
        assert_eq!(source.uniform(20.0..30.0), 20.0);
        assert_eq!(source.uniform(20.0..30.0), 25.0);
        assert_eq!(source.uniform(0.0..1.0), 0.0);
        assert_eq!(source.draws(), 3);
    }
}
