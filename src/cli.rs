use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "shots-to-30 calculator backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Start the API server and browser UI
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Start the pass-through proxy for the stats API
    Proxy {
        /// Port number (optional, defaults to 8080)
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
    /// Look up a player and print the shots needed to score 30
    Lookup {
        /// Player name or part of it
        query: String,
    },
}
