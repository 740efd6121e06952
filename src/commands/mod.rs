//! # CLI Command Implementations
//!
//! Each subcommand lives in its own file with:
//! - An `Args` struct with the command-specific options, derived using `clap`.
//! - An `execute` function that runs the workflow through the `radar` library
//!   and reports the result.

pub mod publish;
pub mod update;
