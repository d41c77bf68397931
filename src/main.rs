//! Binary entry point: parse CLI arguments, load the configuration and hand
//! control to the application loop.

mod app;
mod config;
mod error;
mod events;
mod state;
mod store;
mod tasks;
mod ui;
mod view;

use crate::app::App;
use crate::config::Config;
use crate::error::AppResult;
use clap::{crate_version, App as Cli, Arg};
use std::path::PathBuf;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let matches = Cli::new("todo-tui")
        .version(crate_version!())
        .about("A terminal user interface for a local task list")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Use a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Override the task data directory")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::load(matches.value_of("config"))?;
    if let Some(dir) = matches.value_of("data-dir") {
        config.data_dir = PathBuf::from(dir);
    }

    App::start(config)
}
