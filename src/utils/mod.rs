pub mod calendar;
pub mod names;
pub mod sampling;
pub mod seed;
pub mod weighted;

pub use calendar::*;
pub use sampling::*;
pub use seed::*;
pub use weighted::WeightedChoice;
