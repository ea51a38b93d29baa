use std::collections::BTreeMap;

use log::warn;
use once_cell::sync::Lazy;

use super::{BaseExtractor, FeatureExtractor, WordExtractor, DEFAULT_EXTRACTOR};
use crate::clusters::ClusterMap;
use crate::corpus::Token;
use crate::error::{Error, Result};

/// Hook for registering a feature extractor under a name.
///
/// Crates linking this one can add extractors without touching the driver:
///
/// ```ignore
/// inventory::submit! {
///     ExtractorHook::new("my_extractors", "what it extracts", || Box::new(MyExtractor))
/// }
/// ```
pub struct ExtractorHook {
    /// Name used to select the extractor
    pub name: &'static str,
    /// One-line description shown in listings
    pub description: &'static str,
    /// Builder function for a fresh extractor
    pub builder: fn() -> Box<dyn FeatureExtractor>,
}
inventory::collect!(ExtractorHook);

impl ExtractorHook {
    /// Create a new inventory hook.
    pub const fn new(
        name: &'static str,
        description: &'static str,
        builder: fn() -> Box<dyn FeatureExtractor>,
    ) -> Self {
        Self {
            name,
            description,
            builder,
        }
    }
}

/// Extractors shipped with the crate
static BUILTIN: [ExtractorHook; 2] = [
    ExtractorHook::new(
        DEFAULT_EXTRACTOR,
        "word, shape, POS and cluster features over a +/-1 window",
        || Box::new(BaseExtractor),
    ),
    ExtractorHook::new(
        "word_extractors",
        "lower-cased words and full cluster ids over a +/-1 window",
        || Box::new(WordExtractor),
    ),
];

static REGISTRY: Lazy<BTreeMap<&'static str, &'static ExtractorHook>> = Lazy::new(|| {
    let mut registry = BTreeMap::new();
    for hook in BUILTIN.iter().chain(inventory::iter::<ExtractorHook>) {
        if registry.insert(hook.name, hook).is_some() {
            warn!("feature extractor `{}` registered more than once", hook.name);
        }
    }
    registry
});

/// Names of all registered extractors, sorted
pub fn list() -> Vec<&'static str> {
    REGISTRY.keys().copied().collect()
}

/// Build the extractor registered as `name` and check that it honours the
/// extractor contract.
pub fn resolve(name: &str) -> Result<Box<dyn FeatureExtractor>> {
    let hook = REGISTRY.get(name).ok_or_else(|| Error::UnknownExtractor {
        name: name.to_owned(),
        available: list(),
    })?;
    let extractor = (hook.builder)();
    check_capabilities(name, extractor.as_ref())?;
    Ok(extractor)
}

fn probe_sentence() -> Vec<Token> {
    vec![
        Token::with_columns("Probe", ["NP"]),
        Token::with_columns("in", ["SP"]),
        Token::with_columns("Madrid", ["NP"]),
    ]
}

/// Run `extractor` on a fixed sentence: both operations must run and
/// `featurise` must return one item per token. `featurise` may add features
/// beyond what `word2features` gives, e.g. sentence-level ones.
pub fn check_capabilities(name: &str, extractor: &dyn FeatureExtractor) -> Result<()> {
    let sentence = probe_sentence();
    let clusters: ClusterMap = [("Madrid", "0010"), ("Probe", "1101")].into_iter().collect();
    let incompatible = |reason: String| Error::IncompatibleExtractor {
        name: name.to_owned(),
        reason,
    };

    let items = extractor.featurise(&sentence, &clusters);
    if items.len() != sentence.len() {
        return Err(incompatible(format!(
            "featurise returned {} items for {} tokens",
            items.len(),
            sentence.len()
        )));
    }
    for i in 0..sentence.len() {
        extractor.word2features(&sentence, i, &clusters);
    }
    Ok(())
}
