use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::SamplingMode;
use criterion::measurement::Measurement;

const BASE_SEED: u64 = 0x5EED_2026;

/// Runtime tier of one benchmark input, picked from its size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuntimeTier {
    Small,
    Medium,
    Large,
}

impl RuntimeTier {
    pub fn for_size(size: usize) -> Self {
        if size <= 2_048 {
            Self::Small
        } else if size <= 16_384 {
            Self::Medium
        } else {
            Self::Large
        }
    }

    fn sample_size(self) -> usize {
        match self {
            Self::Small => 15,
            Self::Medium => 15,
            Self::Large => 10,
        }
    }

    fn warm_up(self) -> Duration {
        match self {
            Self::Small => Duration::from_millis(100),
            Self::Medium => Duration::from_millis(300),
            Self::Large => Duration::from_millis(600),
        }
    }

    fn measurement(self) -> Duration {
        match self {
            Self::Small => Duration::from_millis(200),
            Self::Medium => Duration::from_millis(600),
            Self::Large => Duration::from_millis(1_200),
        }
    }
}

pub fn apply_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, size: usize) {
    let tier = RuntimeTier::for_size(size);
    group.sample_size(tier.sample_size());
    group.warm_up_time(tier.warm_up());
    group.measurement_time(tier.measurement());
    group.sampling_mode(if tier == RuntimeTier::Large {
        SamplingMode::Flat
    } else {
        SamplingMode::Auto
    });
}

/// Deterministic seed for one (case, size) input so reruns compare the same graphs.
pub fn input_seed(case_index: usize, size: usize) -> u64 {
    BASE_SEED ^ ((size as u64) << 7) ^ (case_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_size() {
        assert_eq!(RuntimeTier::for_size(512), RuntimeTier::Small);
        assert_eq!(RuntimeTier::for_size(8_192), RuntimeTier::Medium);
        assert_eq!(RuntimeTier::for_size(65_536), RuntimeTier::Large);
    }

    #[test]
    fn seeds_differ_per_case_and_size() {
        assert_ne!(input_seed(0, 1_024), input_seed(1, 1_024));
        assert_ne!(input_seed(0, 1_024), input_seed(0, 2_048));
        assert_eq!(input_seed(3, 4_096), input_seed(3, 4_096));
    }
}
