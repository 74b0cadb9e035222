pub mod config;
mod artifact;
mod error;
mod hash;
mod row;
mod summary;
mod target;
mod verdict;

pub use artifact::*;
pub use error::*;
pub use hash::*;
pub use row::*;
pub use summary::*;
pub use target::*;
pub use verdict::*;
