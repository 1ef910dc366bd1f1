#[macro_use] extern crate clap;

pub mod error;
pub mod graphics;
pub mod interface;

use std::error::Error;
use std::process;

use log::error;

use crate::interface::cli;
use crate::error::AppError;
use crate::interface::window::GlWindow;

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

fn exit_with(e: AppError) -> ! {
    error!("{}", e);
    let mut source = e.source();
    while let Some(cause) = source {
        error!("  caused by: {}", cause);
        source = cause.source();
    }

    process::exit(e.exit_code())
}

// The event loop must run on the main thread.
fn main() {
    init_logging();

    let config = match cli::parse_args() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    match GlWindow::create(&config) {
        Ok(window) => window.run(),
        Err(e) => exit_with(e),
    }
}
