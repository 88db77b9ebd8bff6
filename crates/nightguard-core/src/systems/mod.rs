//! Systems - logic that operates on components

mod ai;
mod doors;

pub use ai::*;
pub use doors::*;
