use std::path::PathBuf;

use clap::{Parser, Subcommand};
use store::ProductId;

#[derive(Parser)]
#[command(name = "catalog", version, about = "Browse and manage the data catalog")]
pub struct Cli {
    /// Origin of the catalog service. Overrides the config file.
    #[arg(long, global = true, env = "CATALOG_API_URL")]
    pub api_url: Option<String>,
    /// Path of `catalog.toml`. Defaults to the platform config directory.
    #[arg(long, global = true, env = "CATALOG_CONFIG")]
    pub config: Option<PathBuf>,
    /// Log filter directive, e.g. `debug` or `api=trace`.
    #[arg(long, global = true, env = "CATALOG_LOG")]
    pub log: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Exchange credentials for a session.
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "CATALOG_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in with it.
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "CATALOG_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user as reported by the service.
    Whoami,
    /// List products, optionally only your own, filtered by search term and category.
    Products {
        #[arg(long)]
        mine: bool,
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List the categories present in the catalog.
    Categories,
    /// Show a product, falling back to the cached listing if the fetch fails.
    Show { id: String },
    /// Open the standalone product page.
    Open { id: String },
    /// Add a product to your catalog.
    Assign { id: ProductId },
    /// Remove a product from your catalog.
    Unassign { id: ProductId },
}
