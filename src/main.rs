use anyhow::Result;

use shots_to_thirty::cli::Command;
use shots_to_thirty::{handle_lookup, handle_proxy, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Proxy { port } => handle_proxy(*port),
        Command::Lookup { query } => handle_lookup(query),
    }
}
