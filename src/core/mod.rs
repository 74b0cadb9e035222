pub mod aggregator;
pub mod cli;
pub mod cmds;
pub mod engine;
pub mod executor;
pub mod logging;
pub mod main_shared;
pub mod registry;
pub mod runner;
pub mod store;
pub mod types;
