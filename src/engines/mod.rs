pub mod binary;
pub mod streaming;
pub mod structured;
