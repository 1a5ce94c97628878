pub mod cli;
pub mod generate;
pub mod io_utils;
pub mod mapping;
pub mod rows;
pub mod statement;
pub mod tokenize;
pub mod value;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_sqlgen", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate::execute(&args),
        Commands::Preview(args) => generate::preview(&args),
    }
}

pub(crate) fn printable_delimiter(delimiter: char) -> String {
    match delimiter {
        ',' => ",".to_string(),
        '\t' => "\\t".to_string(),
        '\n' => "\\n".to_string(),
        other => other.to_string(),
    }
}
