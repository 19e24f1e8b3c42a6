use clap::{Parser, Subcommand};

/// Logview — interface-execution log monitoring backend
#[derive(Parser)]
#[command(name = "logview", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Port to bind
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Insert sample interface-execution records. Log records normally
    /// originate from upstream integration events; this gives a local
    /// deployment something to page through.
    Seed {
        /// Number of records to insert
        #[arg(long, default_value = "25")]
        count: u32,
    },
}
