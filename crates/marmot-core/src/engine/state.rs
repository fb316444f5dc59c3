use std::cmp::Ordering;

/// One sampled assignment and its QUBO energy.
#[derive(Debug, Clone)]
pub struct Sample {
    pub assignment: Vec<bool>,
    pub energy: f64,
}

impl PartialEq for Sample {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Sample {}

impl PartialOrd for Sample {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sample {
    fn cmp(&self, other: &Self) -> Ordering {
        self.energy.total_cmp(&other.energy)
    }
}

/// Samples of one sampler call, ordered from lowest to highest energy.
#[derive(Debug, Clone)]
pub struct SampleSet {
    samples: Vec<Sample>,
    seed: u64,
}

impl SampleSet {
    /// Sorts `samples` by ascending energy; ties keep their read order.
    pub fn new(mut samples: Vec<Sample>, seed: u64) -> Self {
        samples.sort();
        Self { samples, seed }
    }

    /// The lowest-energy sample, if any read produced one.
    pub fn best(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The master seed the reads were derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
