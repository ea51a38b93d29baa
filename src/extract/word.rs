use super::FeatureExtractor;
use crate::attribute::{Attribute, Item};
use crate::clusters::ClusterMap;
use crate::corpus::Token;

/// Word identity and cluster id of the token and its direct neighbours
#[derive(Debug, Clone, Copy, Default)]
pub struct WordExtractor;

fn push_word(item: &mut Item, token: &Token, tag: &str, clusters: &ClusterMap) {
    item.push(Attribute::flag(format!("{}w={}", tag, token.word.to_lowercase())));
    if let Some(cluster) = clusters.get(&token.word) {
        item.push(Attribute::flag(format!("{}c={}", tag, cluster)));
    }
}

impl FeatureExtractor for WordExtractor {
    fn word2features(&self, sentence: &[Token], index: usize, clusters: &ClusterMap) -> Item {
        let mut item = vec![Attribute::flag("bias")];
        push_word(&mut item, &sentence[index], "", clusters);
        if let Some(prev) = index.checked_sub(1).and_then(|i| sentence.get(i)) {
            push_word(&mut item, prev, "-1:", clusters);
        }
        if let Some(next) = sentence.get(index + 1) {
            push_word(&mut item, next, "+1:", clusters);
        }
        item
    }
}
