//! The training run: extractor, clusters, corpus, trainer, model file

use std::io::{self, Write};
use std::path::PathBuf;

use log::info;

use crate::clusters::ClusterMap;
use crate::config::TrainConfig;
use crate::corpus;
use crate::error::{Error, Result};
use crate::extract;
use crate::train::{Trainer, TrainerParams};

/// L1 penalty used for every run
pub const C1: f64 = 1.0;
/// L2 penalty used for every run
pub const C2: f64 = 1e-3;

/// Dot-per-100, count-per-1000 progress meter
pub struct Progress<W> {
    out: W,
    enabled: bool,
    count: usize,
}

impl<W: Write> Progress<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self {
            out,
            enabled,
            count: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Record one processed sequence
    pub fn tick(&mut self) -> io::Result<()> {
        self.count += 1;
        if !self.enabled || self.count % 100 != 0 {
            return Ok(());
        }
        self.out.write_all(b".")?;
        if self.count % 1000 == 0 {
            write!(self.out, "{}", self.count)?;
        }
        self.out.flush()
    }

    /// Write the closing summary line
    pub fn finish(&mut self) -> io::Result<()> {
        if self.enabled {
            writeln!(self.out, "  {} example sequences seen", self.count)?;
            self.out.flush()?;
        }
        Ok(())
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub sequences: usize,
    pub model: PathBuf,
}

/// Hyperparameters applied to every training run
pub fn training_params(config: &TrainConfig) -> io::Result<TrainerParams> {
    Ok(TrainerParams::default()
        .with_c1(C1)?
        .with_c2(C2)?
        .with_feature_minfreq(config.min_freq)?
        .with_max_iterations(config.max_iterations)?
        .with_possible_transitions(true)
        .with_possible_states(true))
}

/// Train a model as described by `config`, writing progress to `progress_out`
///
/// The extractor is resolved before the corpus is opened, so an unknown
/// extractor never touches the input.
pub fn run<W: Write>(config: &TrainConfig, progress_out: W) -> Result<Summary> {
    info!("init");
    let extractor = extract::resolve(&config.extractor)?;

    let clusters = match &config.clusters {
        Some(path) => {
            info!("reading in brown clusters");
            ClusterMap::load(path)?
        }
        None => ClusterMap::new(),
    };

    let mut trainer = Trainer::new(config.trainer_verbose);

    info!("building feature representations for examples");
    let mut progress = Progress::new(progress_out, config.verbose);
    for sentence in corpus::read_conll(&config.input)? {
        let sentence = sentence?;
        let xseq = extractor.featurise(&sentence.tokens, &clusters);
        trainer
            .append(&xseq, &sentence.labels)
            .map_err(Error::Train)?;
        progress.tick().map_err(Error::Progress)?;
    }
    progress.finish().map_err(Error::Progress)?;

    trainer.set_params(training_params(config).map_err(Error::Params)?);
    info!("CRF parameters: {}", trainer.params());

    trainer.train(&config.output).map_err(Error::Train)?;
    info!("model written to {}", config.output.display());

    Ok(Summary {
        sequences: progress.count(),
        model: config.output.clone(),
    })
}
