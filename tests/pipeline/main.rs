#![cfg(unix)]

mod aggregator;
mod cli;
mod harness;
