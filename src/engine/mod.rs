pub mod evolution_engine;
pub mod genome;
pub mod operators;
pub mod population;

pub use evolution_engine::OperatorEvolution;
pub use genome::{GeneVector, BITMASK_WIDTH};
pub use population::Bucket;
