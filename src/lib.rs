pub mod core;
pub mod engines;

// Re-export key items for easy importing in this crate
pub use crate::core::engine;
pub use crate::core::types;

// Re-export key items for easy importing in other crates
pub use crate::core::aggregator::Aggregator;
pub use crate::core::engine::traits::{EngineContext, MutationEngine};
pub use crate::core::executor::execute;
pub use crate::core::main_shared::run_main;
pub use crate::core::registry::EngineRegistry;
pub use crate::core::runner::TargetRunner;
pub use crate::core::store::ResultStore;
