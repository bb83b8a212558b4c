use crate::config::GeneMode;
use crate::engine::genome::GeneVector;
use rand::Rng;
use rand_distr::StandardNormal;

/// Generate a random gene vector, each entry drawn independently:
/// a fair coin per flag, or a uniform `[0, 1)` draw per weight.
pub fn random_genes<R: Rng>(mode: GeneMode, len: usize, rng: &mut R) -> GeneVector {
    match mode {
        GeneMode::Boolean => GeneVector::Flags((0..len).map(|_| rng.gen::<bool>()).collect()),
        GeneMode::RealValued => GeneVector::Weights((0..len).map(|_| rng.gen::<f64>()).collect()),
    }
}

/// Perturb exactly one uniformly chosen gene: flip the flag, or add a
/// zero-mean Gaussian step of standard deviation `scale` to the weight,
/// clipped at a floor of 0 with no ceiling.
pub fn mutate_single_gene<R: Rng>(genes: &mut GeneVector, scale: f64, rng: &mut R) {
    match genes {
        GeneVector::Flags(flags) => {
            let gene = rng.gen_range(0..flags.len());
            flags[gene] = !flags[gene];
        }
        GeneVector::Weights(weights) => {
            let gene = rng.gen_range(0..weights.len());
            let step: f64 = rng.sample(StandardNormal);
            weights[gene] = (weights[gene] + step * scale).max(0.0);
        }
    }
}

/// Eligible-operator scan: start at a random index and walk the flag vector
/// circularly until a set flag is found. An all-false vector exhausts the
/// scan after `flags.len()` probes and returns the last probed index, so
/// selection degrades to uniform-random rather than looping.
pub fn eligible_scan<R: Rng>(flags: &[bool], rng: &mut R) -> usize {
    let mut operator = rng.gen_range(0..flags.len());
    let mut tries = 0;
    while !flags[operator] && tries < flags.len() {
        tries += 1;
        operator = (operator + 1) % flags.len();
    }
    operator
}

/// Rank-scaled roulette wheel: every weight is rescaled into
/// `[1, weights.len()]` before accumulation, so the lowest-weighted operator
/// keeps probability mass 1 while the highest gets `weights.len()` — a fixed
/// selection pressure equal to the operator count.
///
/// All-equal weights (`max == min`) fall back to a uniform draw.
pub fn rank_roulette<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let n = weights.len();

    let mut min = weights[0];
    let mut max = weights[0];
    for &w in &weights[1..] {
        if w < min {
            min = w;
        }
        if w > max {
            max = w;
        }
    }

    if max == min {
        return rng.gen_range(0..n);
    }

    let pressure = (n - 1) as f64 / (max - min);
    let mut cumulative = Vec::with_capacity(n);
    let mut total = 0.0;
    for &w in weights {
        total += 1.0 + (w - min) * pressure;
        cumulative.push(total);
    }

    let draw = rng.gen::<f64>() * total;

    // linear scan; operator counts are small
    cumulative
        .iter()
        .position(|&c| c >= draw)
        .unwrap_or(n - 1)
}
