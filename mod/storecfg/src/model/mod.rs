mod org;
mod plan;
mod profile;

pub use org::*;
pub use plan::*;
pub use profile::*;
