//! Solution mixtures: fixed-point volumes, reagent quantities, and the
//! proportional split/merge algebra every fluid transfer is built from.

pub mod types;
pub mod volume;


pub use types::{ProgressBucket, Solution};
pub use volume::FixedVolume;
