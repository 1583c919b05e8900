pub mod matches;
pub mod players;
pub mod reports;
pub mod seasons;
pub mod standings;
pub mod stats;
pub mod system;
pub mod teams;

pub use matches::*;
pub use players::*;
pub use reports::*;
pub use seasons::*;
pub use standings::*;
pub use stats::*;
pub use system::*;
pub use teams::*;
