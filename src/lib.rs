pub mod achievements;
pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod services;
pub mod stats;
pub mod store;
pub mod trend;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::processing::ProcessingService;
use crate::services::server::ServerService;
use crate::services::standings::StandingsService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_process(input: Option<&str>, output: Option<&str>) -> Result<()> {
    let config = AppConfig::new();
    let service = ProcessingService::new(config);
    service.run(input, output)
}

pub fn handle_standings(input: Option<&str>) -> Result<()> {
    let config = AppConfig::new();
    let service = StandingsService::new(config);
    service.run(input)
}
