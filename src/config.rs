//! Command-line options and the resolved training configuration

use std::path::PathBuf;

use chrono::{DateTime, TimeZone};
use clap::Parser;

use crate::extract::DEFAULT_EXTRACTOR;

/// Extension appended to derived model file names
pub const MODEL_EXTENSION: &str = ".crfsuite.model";

/// `strftime` pattern of the timestamp in derived model file names
pub const TIMESTAMP_FORMAT: &str = ".%Y%m%d-%H%M%S";

/// Train a CRF sequence tagger from a CoNLL corpus
#[derive(Debug, Clone, Parser)]
#[command(name = "crf-train")]
pub struct Options {
    /// read data from this file (CoNLL format)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub infile: PathBuf,

    /// name of the feature extractor
    #[arg(short = 'x', long = "extractor", default_value = DEFAULT_EXTRACTOR)]
    pub extractor: String,

    /// destination CRFsuite model file (derived from the input name and time if not given)
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = "")]
    pub outfile: String,

    /// path to a Brown clusters file
    #[arg(short = 'c', long = "clusters", value_name = "FILE")]
    pub clusterfile: Option<PathBuf>,

    /// number of training iterations
    #[arg(short = 'i', long = "max-iter", default_value_t = 50)]
    pub max_iterations: usize,

    /// minimum number of feature occurrences for inclusion
    #[arg(short = 'm', long = "min-freq", default_value_t = 2.0)]
    pub min_freq: f64,

    /// output trainer progress during model training
    #[arg(short = 'V', long = "verbose-training", overrides_with = "trainer_verbose")]
    pub trainer_verbose: bool,

    /// dump progress info on stderr (default)
    #[arg(short = 'v', long = "verbose", overrides_with_all = ["verbose", "quiet"])]
    pub verbose: bool,

    /// don't dump progress info on stderr
    #[arg(short = 'q', long = "quiet", overrides_with_all = ["verbose", "quiet"])]
    pub quiet: bool,
}

/// Everything a training run needs, fixed before the run starts
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub input: PathBuf,
    pub extractor: String,
    pub output: PathBuf,
    pub clusters: Option<PathBuf>,
    pub max_iterations: usize,
    pub min_freq: f64,
    pub trainer_verbose: bool,
    pub verbose: bool,
}

impl Options {
    /// Progress output is on unless the last of `-v`/`-q` was `-q`
    pub fn is_verbose(&self) -> bool {
        !self.quiet
    }

    /// Resolve the options, deriving the output path from `now` when none was given
    pub fn into_config<Tz>(self, now: &DateTime<Tz>) -> TrainConfig
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let verbose = self.is_verbose();
        let output = if self.outfile.is_empty() {
            derive_output_path(&self.infile, now)
        } else {
            PathBuf::from(self.outfile)
        };
        TrainConfig {
            input: self.infile,
            extractor: self.extractor,
            output,
            clusters: self.clusterfile,
            max_iterations: self.max_iterations,
            min_freq: self.min_freq,
            trainer_verbose: self.trainer_verbose,
            verbose,
        }
    }
}

/// `<basename of input><.YYYYmmdd-HHMMSS>.crfsuite.model`, in the working directory
pub fn derive_output_path<Tz>(input: &std::path::Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let input = input.to_string_lossy();
    let basename = input.rsplit('/').next().unwrap_or(&input);
    PathBuf::from(format!(
        "{}{}{}",
        basename,
        now.format(TIMESTAMP_FORMAT),
        MODEL_EXTENSION
    ))
}
