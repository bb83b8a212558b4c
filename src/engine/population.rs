use crate::config::EvolutionConfig;
use crate::engine::genome::GeneVector;
use crate::engine::operators::random_genes;
use rand::Rng;

/// One intensity bucket: an independent evolutionary population with its own
/// generation clock. Buckets never share state.
///
/// All storage is allocated once and lives for the process lifetime; parent
/// slots are only ever overwritten by elitist replacement, child slots are
/// rewritten each generation.
#[derive(Debug, Clone)]
pub struct Bucket {
    /// `n_parents` persistent gene vectors.
    pub(crate) parents: Vec<GeneVector>,
    pub(crate) parent_fitness: Vec<u64>,
    /// `lambda` offspring slots for the current generation.
    pub(crate) children: Vec<GeneVector>,
    pub(crate) child_fitness: Vec<u64>,
    /// Round-robin cursor over parent slots.
    pub(crate) current_parent: usize,
    /// Child awaiting a fitness report; `lambda` would mean "rolling over",
    /// but the rollover happens eagerly so this stays `< lambda` between calls.
    pub(crate) next_to_evaluate: usize,
    /// Best child fitness seen this generation.
    pub(crate) best_child: usize,
    /// Best parent fitness seen overall.
    pub(crate) best_parent: usize,
    /// Child slot currently offered to the selector. An index, not a
    /// reference, so storage can never dangle.
    pub(crate) current_child: usize,
}

impl Bucket {
    /// Allocate one bucket: parents seeded with independent uniform draws,
    /// child slots zeroed, all fitness at zero, cursors at slot 0.
    pub(crate) fn new<R: Rng>(
        config: &EvolutionConfig,
        num_operators: usize,
        rng: &mut R,
    ) -> Self {
        let parents = (0..config.n_parents)
            .map(|_| random_genes(config.gene_mode, num_operators, rng))
            .collect();
        let children = (0..config.lambda)
            .map(|_| GeneVector::zeroed(config.gene_mode, num_operators))
            .collect();

        Self {
            parents,
            parent_fitness: vec![0; config.n_parents],
            children,
            child_fitness: vec![0; config.lambda],
            current_parent: 0,
            next_to_evaluate: 0,
            best_child: 0,
            best_parent: 0,
            current_child: 0,
        }
    }
}
