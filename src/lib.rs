//! Train CRF sequence taggers from CoNLL corpora
//!
//! The crate pairs a CRFsuite-compatible linear-chain CRF trainer with the
//! pieces needed to feed it from a tagged corpus: a streaming CoNLL reader,
//! a Brown-cluster loader and a registry of pluggable feature extractors.
//!
//! # Examples
//!
//! ## Training from a corpus
//!
//! ```no_run
//! use crf_train::config::Options;
//! use crf_train::pipeline;
//!
//! let options = Options {
//!     infile: "esp.train".into(),
//!     extractor: "base_extractors".into(),
//!     outfile: "esp.crfsuite.model".into(),
//!     clusterfile: None,
//!     max_iterations: 50,
//!     min_freq: 2.0,
//!     trainer_verbose: false,
//!     verbose: false,
//!     quiet: true,
//! };
//! let config = options.into_config(&chrono::Local::now());
//! let summary = pipeline::run(&config, std::io::stderr())?;
//! println!("{} sequences", summary.sequences);
//! # Ok::<(), crf_train::Error>(())
//! ```
//!
//! ## Using the trainer directly
//!
//! ```no_run
//! use crf_train::{Attribute, Trainer};
//!
//! let mut trainer = Trainer::new(false);
//! let xseq = vec![
//!     vec![Attribute::new("word.lower=madrid", 1.0)],
//!     vec![Attribute::new("word.lower=es", 1.0)],
//! ];
//! trainer.append(&xseq, &["B-LOC", "O"])?;
//! trainer.set("c2", "1.0")?;
//! trainer.train("model.crfsuite")?;
//! # Ok::<(), std::io::Error>(())
//! ```

mod attribute;
mod dataset;
mod error;

pub mod clusters;
pub mod config;
pub mod corpus;
pub mod extract;
pub mod pipeline;

/// CRF trainer: feature generation, optimisation and model serialisation
pub mod train;

pub use self::attribute::{Attribute, Item};
pub use self::error::{Error, Result};
pub use self::extract::FeatureExtractor;
pub use self::train::{Trainer, TrainerParams};
