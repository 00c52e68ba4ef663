pub mod catalog;
pub mod precision;
pub mod roller;
pub mod source;
pub mod types;


pub use catalog::{Coin, CoinSide, Die, WeightedTable};
pub use roller::{Outcomes, Rolled, Roller, SharedSource};
pub use source::{FixedSource, RandomSource, StdRngSource, ThreadRngSource};
pub use types::{Entry, ProbabilityDistribution, RollError};
