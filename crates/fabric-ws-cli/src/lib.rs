//! fabric-ws CLI library: argument definitions and command implementations,
//! shared by the `fabric-ws` binary and its integration tests.

pub mod cli;
pub mod commands;
