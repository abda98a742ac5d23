use anyhow::Result;

use annual_cup_ranking::cli::Command;
use annual_cup_ranking::{handle_process, handle_serve, handle_standings, interpret};

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
        Command::Process { input, output } => {
            handle_process(input.as_deref(), output.as_deref())
        }
        Command::Standings { input } => handle_standings(input.as_deref()),
    }
}
