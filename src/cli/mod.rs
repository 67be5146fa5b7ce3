//! CLI module for cmdgen - command-line interface definition.

pub mod commands;

pub use commands::Cli;
