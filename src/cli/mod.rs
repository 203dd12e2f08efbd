// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recommender")]
#[command(about = "Recipe Recommender - find recipes by the ingredients you have", long_about = None)]
pub struct Cli {
    /// Recipe catalog (CSV with Recipe, Ingredient and Procedure columns)
    #[arg(short, long, global = true, env = "CATALOG_PATH")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Recommend recipes for a query and print them
    Recommend {
        /// Ingredients or preferences
        query: String,

        /// Maximum number of recipes to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask for queries interactively and browse the results
    Interactive,

    /// Load a catalog and report whether it is usable
    Check,
}
