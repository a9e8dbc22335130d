//! HIBP response model types.

mod breach;
mod breaches;

pub use breach::*;
pub use breaches::*;
