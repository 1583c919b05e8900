pub mod stats;

pub use stats::{Standings, StatsService};
