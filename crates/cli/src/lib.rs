//! Command-line front-end for the w3w wallet session manager.
//!
//! Assembles a [`WalletSession`](w3w::WalletSession) from a JSON-RPC node
//! endpoint, a JSON state file and a terminal notifier, then runs one
//! command against it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod notifier;
pub mod output;
