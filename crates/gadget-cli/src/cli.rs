use std::path::PathBuf;

use clap::{Parser, Subcommand};

use gadget_core::CategoryFilter;

#[derive(Parser, Debug)]
#[command(name = "gadget-browse")]
#[command(about = "Browse the gadget catalog from the terminal")]
#[command(
    after_help = "Environment:\n  GADGET_SOURCE        Dataset URL or file path\n  GADGET_STORAGE_PATH  Local favorites database"
)]
pub struct Cli {
    /// Dataset location (http(s) URL or file path).
    #[arg(long, global = true)]
    pub source: Option<String>,

    /// Local storage file holding favorites.
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List gadgets matching the filters.
    List {
        #[arg(long)]
        category: Option<CategoryFilter>,
        #[arg(long)]
        min: Option<f64>,
        #[arg(long)]
        max: Option<f64>,
        #[arg(long, default_value_t = false)]
        favorites_only: bool,
    },
    /// Toggle a gadget in the favorites.
    Favorite { id: String },
    /// List favorited gadgets.
    Favorites,
}
