pub mod traits;

pub use traits::{EngineContext, MutationEngine};
