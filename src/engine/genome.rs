use crate::config::GeneMode;

/// Bit width of the compact parent encoding returned by
/// [`crate::engine::OperatorEvolution::best_parent_bitmask`].
pub const BITMASK_WIDTH: usize = 15;

/// Gene vector for one individual: one entry per mutation operator.
///
/// Two representations exist, fixed at configuration time and never mixed
/// within a population:
/// - `Flags`: an eligibility bit per operator. Selection scans for a set
///   flag starting from a random index.
/// - `Weights`: a sampling weight per operator with intended range `[0, 1]`,
///   used for rank-scaled roulette selection.
///
/// # Why a flat vector?
///
/// The evolutionary operators stay trivial on a linear encoding: seeding is
/// an independent draw per entry, mutation perturbs exactly one entry, and
/// elitist replacement is a whole-vector copy. Any vector is a valid
/// individual, so no repair step is ever needed.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneVector {
    Flags(Vec<bool>),
    Weights(Vec<f64>),
}

impl GeneVector {
    /// All-clear vector of the given mode, used to preallocate child slots.
    pub fn zeroed(mode: GeneMode, len: usize) -> Self {
        match mode {
            GeneMode::Boolean => GeneVector::Flags(vec![false; len]),
            GeneMode::RealValued => GeneVector::Weights(vec![0.0; len]),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GeneVector::Flags(flags) => flags.len(),
            GeneVector::Weights(weights) => weights.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> GeneMode {
        match self {
            GeneVector::Flags(_) => GeneMode::Boolean,
            GeneVector::Weights(_) => GeneMode::RealValued,
        }
    }

    pub fn as_flags(&self) -> Option<&[bool]> {
        match self {
            GeneVector::Flags(flags) => Some(flags),
            GeneVector::Weights(_) => None,
        }
    }

    pub fn as_weights(&self) -> Option<&[f64]> {
        match self {
            GeneVector::Flags(_) => None,
            GeneVector::Weights(weights) => Some(weights),
        }
    }

    /// Whether gene `index` counts as set: a `true` flag, or a weight > 0.
    pub fn gene_set(&self, index: usize) -> bool {
        match self {
            GeneVector::Flags(flags) => flags[index],
            GeneVector::Weights(weights) => weights[index] > 0.0,
        }
    }

    /// Compact integer encoding: bit `i` set iff gene `i` is set, limited to
    /// the first [`BITMASK_WIDTH`] genes. Longer vectors are truncated;
    /// shorter ones encode only the genes they have.
    pub fn bitmask(&self) -> u32 {
        let mut value = 0u32;
        for i in 0..self.len().min(BITMASK_WIDTH) {
            if self.gene_set(i) {
                value |= 1 << i;
            }
        }
        value
    }
}
