//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products and their surface variations.
    Products,
    /// List every orderable code.
    Codes {
        /// Only codes whose surface name contains this text.
        #[arg(short, long)]
        surface: Option<String>,
    },
    /// Show the hotspots drawn over a product's catalog image.
    Hotspots {
        /// Product id.
        #[arg(short, long, default_value = "implante-torq")]
        product: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,
    /// Add one unit of a product code.
    Add {
        /// Product code, e.g. 52535085.
        code: String,
    },
    /// Add one unit by surface, diameter and length.
    Pick {
        /// Surface key or name (porous, vulcano, short).
        surface: String,
        /// Diameter in mm, e.g. 3.75.
        diameter: String,
        /// Length in mm, e.g. 11.5.
        length: String,
    },
    /// Remove a line from the cart.
    Remove {
        /// Product code.
        code: String,
    },
    /// Set the quantity of a line; zero or less removes it.
    Set {
        /// Product code.
        code: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Print the order and link without handing it off.
    #[arg(long)]
    pub dry_run: bool,

    /// Empty the cart once the order has been handed off.
    #[arg(long)]
    pub clear: bool,

    /// Don't try the system URL opener.
    #[arg(long)]
    pub no_open: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a configuration value.
    Get {
        /// Configuration key (e.g., contact.phone_number).
        key: String,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration.
    Validate,
}
