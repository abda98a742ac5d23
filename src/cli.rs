use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "annual-cup-ranking backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Derive stats and achievements from the snapshot into an output file
    Process {
        /// Snapshot path (defaults to results.json)
        #[arg(short, long)]
        input: Option<String>,
        /// Output path (defaults to derived.json)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the medal table to the terminal
    Standings {
        /// Snapshot path (defaults to results.json)
        #[arg(short, long)]
        input: Option<String>,
    },
}
