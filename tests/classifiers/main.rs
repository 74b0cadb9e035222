mod streaming;
mod structured;
