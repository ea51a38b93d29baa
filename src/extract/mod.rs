//! Pluggable feature extraction
//!
//! A [`FeatureExtractor`] turns the tokens of one sentence into one
//! attribute list per token. The built-in extractors are always registered;
//! other crates add theirs by name with [`inventory::submit!`] and an
//! [`ExtractorHook`]. The training driver picks one with [`resolve`].

mod base;
mod registry;
mod shape;
mod word;

pub use self::base::BaseExtractor;
pub use self::registry::{check_capabilities, list, resolve, ExtractorHook};
pub use self::word::WordExtractor;

use crate::attribute::Item;
use crate::clusters::ClusterMap;
use crate::corpus::Token;

/// Name of the extractor used when none is given
pub const DEFAULT_EXTRACTOR: &str = "base_extractors";

/// Feature extraction for a token sequence
pub trait FeatureExtractor {
    /// Features of the token at `index`, looking at its context in `sentence`
    fn word2features(&self, sentence: &[Token], index: usize, clusters: &ClusterMap) -> Item;

    /// Features of every token of `sentence`, in order
    fn featurise(&self, sentence: &[Token], clusters: &ClusterMap) -> Vec<Item> {
        (0..sentence.len())
            .map(|i| self.word2features(sentence, i, clusters))
            .collect()
    }
}
