mod exercise;
mod preference;
mod set;
mod workout;

pub use exercise::Exercise;
pub use preference::{Theme, WeightUnit};
pub use set::{Set, SetUnit};
pub use workout::Workout;
