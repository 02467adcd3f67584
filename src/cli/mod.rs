//! CLI module for the Rental Comps API
//!
//! - `serve`: run the HTTP server
//! - `lookup`: run one comps lookup and print the JSON result

pub mod lookup;
pub mod serve;

use clap::{Parser, Subcommand};

/// Rental Comps API - comparable long-term rentals around a property
#[derive(Parser)]
#[command(name = "rental-comps")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Find comps once and print the response envelope
    Lookup(lookup::LookupArgs),
}
