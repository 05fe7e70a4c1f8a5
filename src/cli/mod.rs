//! CLI module for the registry comment service
//!
//! - `serve`: run the HTTP API
//! - `token`: issue a bearer token for a seeded user

pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// Registry Comments - comment service for container image repositories
#[derive(Parser)]
#[command(name = "registry-comments")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Print a bearer token for a seeded user
    Token(token::TokenArgs),
}
