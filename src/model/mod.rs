mod match_stats;
mod player;

pub use match_stats::*;
pub use player::*;
