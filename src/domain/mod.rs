pub mod fixture;
pub mod reference;

pub use fixture::*;
pub use reference::*;
