pub mod anneal;
pub mod coordinator;
pub mod mutation;
pub mod space;

pub use self::anneal::{accept, acceptance_probability, Annealer, SearchObserver, SearchState};
pub use self::coordinator::{
    all_orders, partition, run_lanes, search_transpositions, sweep_transpositions, AtomicBest,
    CoordinatorOptions, SweepHit,
};
pub use self::space::{JointKey, JointSpace, KeySpace, PlayfairSpace, SquareSpace};
