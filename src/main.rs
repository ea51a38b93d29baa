use std::io::{self, Write};

use clap::Parser;
use log::LevelFilter;

use crf_train::config::Options;
use crf_train::pipeline;

fn init_logger(verbose: bool, trainer_verbose: bool) {
    let base = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let trainer = if trainer_verbose {
        LevelFilter::Info
    } else {
        base
    };
    let optimizer = if trainer_verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Error
    };

    env_logger::Builder::new()
        .filter_level(base)
        .filter_module("crf_train::train", trainer)
        .filter_module("liblbfgs", optimizer)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn run() -> anyhow::Result<()> {
    let options = Options::parse();
    init_logger(options.is_verbose(), options.trainer_verbose);

    let config = options.into_config(&chrono::Local::now());
    pipeline::run(&config, io::stderr())?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
