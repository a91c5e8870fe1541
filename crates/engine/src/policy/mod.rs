mod base;
mod heuristic;
mod random;

pub use base::Policy;
pub use heuristic::{BoardFeatures, HeuristicPolicy, HeuristicWeights};
pub use random::RandomPolicy;
