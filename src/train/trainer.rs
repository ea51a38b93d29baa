use std::io;
use std::path::Path;

use log::{info, warn};

use super::dictionary::Dictionary;
use super::feature_gen::{FeatureGenerator, FeatureSelection};
use super::lbfgs;
use super::model_writer::ModelWriter;
use super::params::TrainerParams;
use crate::attribute::Attribute;
use crate::dataset::{Attribute as DatasetAttribute, Instance};

/// Linear-chain CRF trainer
///
/// Examples are interned as they are appended; [`Trainer::train`] builds the
/// feature set, runs L-BFGS and writes a CRFsuite model file.
#[derive(Debug)]
pub struct Trainer {
    instances: Vec<Instance>,
    attrs: Dictionary,
    labels: Dictionary,
    params: TrainerParams,
    verbose: bool,
}

impl Trainer {
    /// Create a new trainer; `verbose` enables per-iteration log output
    pub fn new(verbose: bool) -> Self {
        Self {
            instances: Vec::new(),
            attrs: Dictionary::new(),
            labels: Dictionary::new(),
            params: TrainerParams::default(),
            verbose,
        }
    }

    pub fn params(&self) -> &TrainerParams {
        &self.params
    }

    /// Replace all training parameters
    pub fn set_params(&mut self, params: TrainerParams) {
        self.params = params;
    }

    /// Set one parameter by its CRFsuite name
    pub fn set(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.params.set(name, value)
    }

    /// Get one parameter by its CRFsuite name
    pub fn get(&self, name: &str) -> io::Result<String> {
        self.params.get(name)
    }

    /// Number of appended sequences
    pub fn num_instances(&self) -> usize {
        self.instances.len()
    }

    /// Append one labeled sequence
    pub fn append<I, L>(&mut self, xseq: &[I], yseq: &[L]) -> io::Result<()>
    where
        I: AsRef<[Attribute]>,
        L: AsRef<str>,
    {
        self.append_with_weight(xseq, yseq, 1.0)
    }

    /// Append one labeled sequence scaled by `weight`
    pub fn append_with_weight<I, L>(&mut self, xseq: &[I], yseq: &[L], weight: f64) -> io::Result<()>
    where
        I: AsRef<[Attribute]>,
        L: AsRef<str>,
    {
        if xseq.len() != yseq.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "xseq and yseq must have the same length ({} != {})",
                    xseq.len(),
                    yseq.len()
                ),
            ));
        }
        if xseq.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty sequences are not allowed",
            ));
        }

        let mut instance = Instance::with_capacity(xseq.len());
        instance.weight = weight;
        for (item, label) in xseq.iter().zip(yseq) {
            let item = item
                .as_ref()
                .iter()
                .map(|attr| DatasetAttribute::new(self.attrs.get_or_insert(&attr.name), attr.value))
                .collect();
            instance.push(item, self.labels.get_or_insert(label.as_ref()));
        }
        self.instances.push(instance);
        Ok(())
    }

    /// Train on the appended data and write the model to `filename`
    pub fn train<P: AsRef<Path>>(&mut self, filename: P) -> io::Result<()> {
        let filename = filename.as_ref();
        if self.instances.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no training data",
            ));
        }

        let selection = FeatureSelection {
            min_freq: self.params.feature_minfreq(),
            possible_states: self.params.possible_states(),
            possible_transitions: self.params.possible_transitions(),
        };
        let mut fgen =
            FeatureGenerator::generate(&self.instances, &self.attrs, &self.labels, selection)?;

        if self.verbose {
            info!("Number of features: {}", fgen.num_features());
            info!("Number of labels: {}", self.labels.len());
            info!("Number of attributes: {}", self.attrs.len());
            info!("Number of instances: {}", self.instances.len());
        }

        if fgen.num_features() == 0 {
            warn!("no feature reaches feature.minfreq; writing an empty model");
        } else {
            lbfgs::train(
                &self.instances,
                self.labels.len(),
                &mut fgen,
                &self.params,
                self.verbose,
            )?;
        }

        if self.verbose {
            info!("Storing the model to {}", filename.display());
        }
        ModelWriter::write(filename, &fgen, &self.labels, &self.attrs)
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(false)
    }
}
