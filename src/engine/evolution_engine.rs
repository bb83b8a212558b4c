use crate::config::EvolutionConfig;
use crate::engine::genome::GeneVector;
use crate::engine::operators::{eligible_scan, mutate_single_gene, rank_roulette};
use crate::engine::population::Bucket;
use crate::error::{OpevoError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Per-bucket (1+λ) evolutionary strategy over mutation-operator choices.
///
/// The embedding fuzzer drives a strict alternation per bucket:
/// [`select_operator`](Self::select_operator) reads the current child
/// candidate and picks one operator index, the fuzzer runs one execution,
/// then [`notify_feedback`](Self::notify_feedback) records the number of new
/// paths and advances the generation state machine. Each generation mutates
/// one parent into `lambda` children; the best child replaces the parent
/// only on strict improvement, and the parent cursor then rotates
/// round-robin.
pub struct OperatorEvolution {
    config: EvolutionConfig,
    num_operators: usize,
    buckets: Vec<Bucket>,
    rng: StdRng,
    /// Index of the bucket that most recently replaced a parent, anywhere in
    /// this engine. Advisory; starts at 0.
    last_improved: usize,
}

impl OperatorEvolution {
    /// Allocate and seed `intensity_count` independent buckets of
    /// `num_operators` genes each, and prepare the first child candidate of
    /// every bucket so the first `select_operator` call has something to
    /// read.
    pub fn new(
        config: EvolutionConfig,
        intensity_count: usize,
        num_operators: usize,
    ) -> Result<Self> {
        use crate::config::traits::ConfigSection;
        config.validate()?;
        if intensity_count == 0 {
            return Err(OpevoError::Configuration(
                "Intensity count must be at least 1".to_string(),
            ));
        }
        if num_operators == 0 {
            return Err(OpevoError::Configuration(
                "Operator count must be at least 1".to_string(),
            ));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let buckets: Vec<Bucket> = (0..intensity_count)
            .map(|_| Bucket::new(&config, num_operators, &mut rng))
            .collect();

        let mut engine = Self {
            config,
            num_operators,
            buckets,
            rng,
            last_improved: 0,
        };

        for bucket in 0..intensity_count {
            engine.next_candidate(bucket);
        }

        log::info!(
            "operator evolution ready: {} buckets, {} operators, n_parents={}, lambda={}",
            intensity_count,
            num_operators,
            engine.config.n_parents,
            engine.config.lambda
        );

        Ok(engine)
    }

    /// Pick one operator index in `[0, num_operators)` from the bucket's
    /// current child candidate. Population state is untouched; only the RNG
    /// advances, so this may be called any number of times between feedback
    /// reports.
    pub fn select_operator(&mut self, bucket: usize) -> Result<usize> {
        self.check_bucket(bucket)?;
        let b = &self.buckets[bucket];
        let candidate = &b.children[b.current_child];
        Ok(match candidate {
            GeneVector::Flags(flags) => eligible_scan(flags, &mut self.rng),
            GeneVector::Weights(weights) => rank_roulette(weights, &mut self.rng),
        })
    }

    /// Record `new_paths` as the fitness of the child just evaluated and
    /// advance the generation state machine: track the best child, roll the
    /// generation over once all `lambda` children are scored (elitist parent
    /// replacement on strict improvement, round-robin parent advance, child
    /// fitness reset), and prepare the next child candidate.
    ///
    /// Returns the index of the bucket that most recently replaced a parent
    /// anywhere in this engine — an advisory "where progress last happened"
    /// hint, not a statement about the bucket just fed.
    pub fn notify_feedback(&mut self, bucket: usize, new_paths: u64) -> Result<usize> {
        self.check_bucket(bucket)?;
        let lambda = self.config.lambda;

        let b = &mut self.buckets[bucket];
        b.child_fitness[b.next_to_evaluate] = new_paths;
        if b.child_fitness[b.next_to_evaluate] > b.child_fitness[b.best_child] {
            b.best_child = b.next_to_evaluate;
        }
        b.next_to_evaluate += 1;

        if b.next_to_evaluate == lambda {
            // elitist replacement: ties keep the incumbent parent
            if b.child_fitness[b.best_child] > b.parent_fitness[b.current_parent] {
                b.parents[b.current_parent] = b.children[b.best_child].clone();
                b.parent_fitness[b.current_parent] = b.child_fitness[b.best_child];
                self.last_improved = bucket;
                log::debug!(
                    "bucket {}: parent {} replaced, fitness {}",
                    bucket,
                    b.current_parent,
                    b.parent_fitness[b.current_parent]
                );
            }

            if b.parent_fitness[b.current_parent] > b.parent_fitness[b.best_parent] {
                b.best_parent = b.current_parent;
            }

            b.current_parent = (b.current_parent + 1) % self.config.n_parents;
            b.best_child = 0;
            b.next_to_evaluate = 0;
            for fitness in b.child_fitness.iter_mut() {
                *fitness = 0;
            }
        }

        if self.buckets[bucket].next_to_evaluate < lambda {
            self.next_candidate(bucket);
        }

        Ok(self.last_improved)
    }

    /// Best parent gene vector of the bucket, encoded one bit per gene (see
    /// [`GeneVector::bitmask`] for the width and truncation rules).
    /// Reporting only; never consulted by the evolution loop.
    pub fn best_parent_bitmask(&self, bucket: usize) -> Result<u32> {
        self.check_bucket(bucket)?;
        let b = &self.buckets[bucket];
        let best = &b.parents[b.best_parent];
        if log::log_enabled!(log::Level::Trace) {
            for i in 0..best.len().min(crate::engine::genome::BITMASK_WIDTH) {
                log::trace!("bucket {} best parent gene {}: {}", bucket, i, best.gene_set(i));
            }
        }
        Ok(best.bitmask())
    }

    /// Copy the current parent into the next child slot, perturb exactly one
    /// gene, and make that slot the current candidate.
    fn next_candidate(&mut self, bucket: usize) {
        let scale = self.config.mutation_scale;
        let b = &mut self.buckets[bucket];
        let slot = b.next_to_evaluate;
        b.children[slot] = b.parents[b.current_parent].clone();
        mutate_single_gene(&mut b.children[slot], scale, &mut self.rng);
        b.current_child = slot;
    }

    fn check_bucket(&self, bucket: usize) -> Result<()> {
        if bucket >= self.buckets.len() {
            return Err(OpevoError::BucketOutOfRange {
                bucket,
                count: self.buckets.len(),
            });
        }
        Ok(())
    }

    pub fn intensity_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn num_operators(&self) -> usize {
        self.num_operators
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Child candidate currently offered to the selector.
    pub fn current_candidate(&self, bucket: usize) -> Result<&GeneVector> {
        self.check_bucket(bucket)?;
        let b = &self.buckets[bucket];
        Ok(&b.children[b.current_child])
    }

    pub fn parent(&self, bucket: usize, slot: usize) -> Result<&GeneVector> {
        self.check_bucket(bucket)?;
        Ok(&self.buckets[bucket].parents[slot])
    }

    pub fn parent_fitness(&self, bucket: usize) -> Result<&[u64]> {
        self.check_bucket(bucket)?;
        Ok(&self.buckets[bucket].parent_fitness)
    }

    pub fn child_fitness(&self, bucket: usize) -> Result<&[u64]> {
        self.check_bucket(bucket)?;
        Ok(&self.buckets[bucket].child_fitness)
    }

    /// Round-robin parent cursor of the bucket.
    pub fn current_parent(&self, bucket: usize) -> Result<usize> {
        self.check_bucket(bucket)?;
        Ok(self.buckets[bucket].current_parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneMode;

    fn config(mode: GeneMode) -> EvolutionConfig {
        EvolutionConfig {
            n_parents: 3,
            lambda: 2,
            gene_mode: mode,
            mutation_scale: 0.25,
            seed: Some(42),
        }
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(OperatorEvolution::new(config(GeneMode::Boolean), 0, 4).is_err());
        assert!(OperatorEvolution::new(config(GeneMode::Boolean), 1, 0).is_err());
    }

    #[test]
    fn out_of_range_bucket_fails_fast() {
        let mut engine = OperatorEvolution::new(config(GeneMode::Boolean), 2, 4).unwrap();

        match engine.select_operator(2) {
            Err(OpevoError::BucketOutOfRange { bucket: 2, count: 2 }) => {}
            other => panic!("expected BucketOutOfRange, got {:?}", other.map(|_| ())),
        }
        assert!(engine.notify_feedback(5, 1).is_err());
        assert!(engine.best_parent_bitmask(9).is_err());
    }

    #[test]
    fn first_candidate_is_one_mutation_from_parent_zero() {
        let engine = OperatorEvolution::new(config(GeneMode::Boolean), 1, 8).unwrap();

        let parent = engine.parent(0, 0).unwrap().as_flags().unwrap();
        let child = engine.current_candidate(0).unwrap().as_flags().unwrap();
        let hamming = parent.iter().zip(child).filter(|(a, b)| a != b).count();
        assert_eq!(hamming, 1);
    }

    #[test]
    fn select_operator_returns_valid_index_in_both_modes() {
        for mode in [GeneMode::Boolean, GeneMode::RealValued] {
            let mut engine = OperatorEvolution::new(config(mode), 2, 5).unwrap();
            for bucket in 0..2 {
                for _ in 0..20 {
                    let op = engine.select_operator(bucket).unwrap();
                    assert!(op < 5);
                }
            }
        }
    }

    #[test]
    fn improvement_hint_latches_across_buckets() {
        let mut engine = OperatorEvolution::new(config(GeneMode::Boolean), 3, 4).unwrap();

        // bucket 2 completes a generation with a strictly positive best child
        engine.notify_feedback(2, 0).unwrap();
        let hint = engine.notify_feedback(2, 7).unwrap();
        assert_eq!(hint, 2);

        // bucket 0 completes a generation with no improvement; hint stays
        engine.notify_feedback(0, 0).unwrap();
        let hint = engine.notify_feedback(0, 0).unwrap();
        assert_eq!(hint, 2);
    }

    #[test]
    fn candidate_tracks_child_slot_within_generation() {
        let mut engine = OperatorEvolution::new(config(GeneMode::RealValued), 1, 4).unwrap();

        // lambda == 2: one feedback moves the candidate to slot 1, the next
        // rolls the generation over and returns it to slot 0
        engine.notify_feedback(0, 1).unwrap();
        assert_eq!(engine.buckets[0].current_child, 1);
        engine.notify_feedback(0, 0).unwrap();
        assert_eq!(engine.buckets[0].current_child, 0);
        assert_eq!(engine.buckets[0].next_to_evaluate, 0);
    }
}
