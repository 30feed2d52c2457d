pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "crudyrestaurants")]
#[command(about = "Manage restaurants, their menus and payment types")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "crudyrestaurants.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load the demo restaurants
    Seed {
        /// Delete existing restaurants first
        #[arg(long)]
        force: bool,
    },
    /// List every restaurant
    List,
    /// Show one restaurant by id
    Show { id: i64 },
    /// Find restaurants whose name contains the given text
    Find { name: String },
    /// Create or replace a restaurant from a JSON body
    Save { json: String },
    /// Partially update a restaurant from a JSON body
    Update { id: i64, json: String },
    /// Delete a restaurant and its menus
    Delete { id: i64 },
    /// List payment types with the restaurants that accept them
    Payments,
    /// List menus with their restaurant
    Menus,
}
