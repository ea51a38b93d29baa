//! CRFsuite-compatible linear-chain CRF trainer
//!
//! Feature generation, forward-backward, L-BFGS / OWL-QN optimisation and
//! serialisation in the CRFsuite `crf1d` model format.

mod crf_context;
mod dictionary;
mod feature_gen;
mod lbfgs;
mod model_writer;
mod params;
mod trainer;

pub use self::params::{LineSearchAlgorithm, TrainerParams, PARAM_NAMES};
pub use self::trainer::Trainer;
