use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quotekit")]
#[command(about = "Product and supplier lists with price-quote request mailing", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use the global store instead of the one in the current directory
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Override the store path for this invocation
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Override the storage backend (workbook, sqlite, gallery)
    #[arg(long, global = true)]
    pub backend: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the store and a starter email template
    Init,

    /// Add a product
    #[command(alias = "ap")]
    AddProduct {
        /// Product name (unique, case-insensitive)
        name: String,

        /// Free-text description
        #[arg(default_value = "")]
        description: String,

        /// Attach an image file (gallery backend only)
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Add a supplier
    #[command(alias = "as")]
    AddSupplier {
        /// Supplier name (unique, case-insensitive)
        name: String,

        /// Contact email address
        email: String,
    },

    /// Delete a product by name
    #[command(alias = "dp")]
    DeleteProduct { name: String },

    /// Delete a supplier by name
    #[command(alias = "ds")]
    DeleteSupplier { name: String },

    /// List products or suppliers
    #[command(alias = "ls")]
    List {
        /// What to list: products or suppliers
        kind: String,

        /// Only show records matching this term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search products or suppliers (dedicated command)
    Search {
        /// What to search: products or suppliers
        kind: String,

        term: String,
    },

    /// Compose and send one quote request per selected supplier
    Send {
        /// Product names to quote
        #[arg(short, long, required = true, num_args = 1..)]
        products: Vec<String>,

        /// Suppliers to contact
        #[arg(short, long, required = true, num_args = 1..)]
        suppliers: Vec<String>,

        /// Carbon-copy address added to every message
        #[arg(long)]
        cc: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., backend)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
