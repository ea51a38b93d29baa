use std::collections::BTreeMap;
use std::io;

use super::dictionary::Dictionary;
use crate::dataset::Instance;

/// Feature type, numbered as in the CRFsuite model format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FeatureType {
    /// (attribute, label)
    State = 0,
    /// (previous label, label)
    Transition = 1,
}

/// A CRF feature with its current weight
#[derive(Debug, Clone)]
pub struct Feature {
    pub ftype: FeatureType,
    /// Attribute id for state features, previous label id for transitions
    pub src: u32,
    /// Label id
    pub dst: u32,
    pub weight: f64,
}

/// Feature ids reachable from one attribute or one label
#[derive(Debug, Clone, Default)]
pub struct FeatureRefs {
    pub fids: Vec<u32>,
}

/// Which features survive generation
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureSelection {
    /// Features observed less often than this are dropped
    pub min_freq: f64,
    /// Connect every attribute to every label
    pub possible_states: bool,
    /// Connect every label pair
    pub possible_transitions: bool,
}

/// Feature set of a training run
pub struct FeatureGenerator {
    pub features: Vec<Feature>,
    /// State feature ids by attribute id
    pub attr_refs: Vec<FeatureRefs>,
    /// Transition feature ids by previous label id
    pub label_refs: Vec<FeatureRefs>,
}

impl FeatureGenerator {
    /// Count features over `instances` and keep those selected by `selection`.
    ///
    /// Unobserved features added by the `possible_*` switches enter with a
    /// frequency of zero, so like CRFsuite they only survive when
    /// `min_freq <= 0`.
    pub fn generate(
        instances: &[Instance],
        attrs: &Dictionary,
        labels: &Dictionary,
        selection: FeatureSelection,
    ) -> io::Result<Self> {
        let num_labels = labels.len();
        let num_attrs = attrs.len();

        // (type, src, dst) -> frequency; BTreeMap keeps feature ids deterministic
        let mut counts: BTreeMap<(FeatureType, u32, u32), f64> = BTreeMap::new();

        for inst in instances {
            for (item, &label) in inst.items.iter().zip(&inst.labels) {
                for attr in item {
                    *counts
                        .entry((FeatureType::State, attr.id, label))
                        .or_insert(0.0) += attr.value * inst.weight;
                }
            }
            for pair in inst.labels.windows(2) {
                *counts
                    .entry((FeatureType::Transition, pair[0], pair[1]))
                    .or_insert(0.0) += inst.weight;
            }
        }

        if selection.possible_states {
            for aid in 0..num_attrs as u32 {
                for lid in 0..num_labels as u32 {
                    counts.entry((FeatureType::State, aid, lid)).or_insert(0.0);
                }
            }
        }
        if selection.possible_transitions {
            for prev in 0..num_labels as u32 {
                for lid in 0..num_labels as u32 {
                    counts
                        .entry((FeatureType::Transition, prev, lid))
                        .or_insert(0.0);
                }
            }
        }

        let mut features = Vec::new();
        let mut attr_refs = vec![FeatureRefs::default(); num_attrs];
        let mut label_refs = vec![FeatureRefs::default(); num_labels];

        for ((ftype, src, dst), freq) in counts {
            if freq < selection.min_freq {
                continue;
            }
            let fid = u32::try_from(features.len())
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "too many features"))?;
            match ftype {
                FeatureType::State => attr_refs[src as usize].fids.push(fid),
                FeatureType::Transition => label_refs[src as usize].fids.push(fid),
            }
            features.push(Feature {
                ftype,
                src,
                dst,
                weight: 0.0,
            });
        }

        Ok(Self {
            features,
            attr_refs,
            label_refs,
        })
    }

    pub fn num_features(&self) -> usize {
        self.features.len()
    }

    /// Copy optimiser weights into the features
    ///
    /// # Panics
    ///
    /// Panics if `weights.len()` differs from `self.num_features()`.
    pub fn set_weights(&mut self, weights: &[f64]) {
        assert_eq!(weights.len(), self.features.len());
        for (feature, &w) in self.features.iter_mut().zip(weights) {
            feature.weight = w;
        }
    }
}
