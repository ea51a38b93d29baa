use super::shape::{is_digit, is_title, is_upper, prefix, suffix};
use super::FeatureExtractor;
use crate::attribute::{Attribute, Item};
use crate::clusters::ClusterMap;
use crate::corpus::Token;

/// Prefix lengths of the cluster bit-string used as features
const CLUSTER_PREFIXES: [usize; 3] = [4, 6, 10];

/// Window features in the style of the CoNLL 2002 NER baseline: word
/// identity, suffixes, shape flags and POS for the token and its
/// neighbours, plus Brown-cluster prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseExtractor;

fn neighbour_features(item: &mut Item, token: &Token, tag: &str) {
    let word = &token.word;
    item.push(Attribute::flag(format!("{}:word.lower={}", tag, word.to_lowercase())));
    item.push(Attribute::from((format!("{}:word.istitle", tag), is_title(word))));
    item.push(Attribute::from((format!("{}:word.isupper", tag), is_upper(word))));
    if let Some(pos) = token.pos() {
        item.push(Attribute::flag(format!("{}:postag={}", tag, pos)));
        item.push(Attribute::flag(format!("{}:postag[:2]={}", tag, prefix(pos, 2))));
    }
}

impl FeatureExtractor for BaseExtractor {
    fn word2features(&self, sentence: &[Token], index: usize, clusters: &ClusterMap) -> Item {
        let token = &sentence[index];
        let word = &token.word;

        let mut item = vec![
            Attribute::flag("bias"),
            Attribute::flag(format!("word.lower={}", word.to_lowercase())),
            Attribute::flag(format!("word[-3:]={}", suffix(word, 3))),
            Attribute::flag(format!("word[-2:]={}", suffix(word, 2))),
            Attribute::from(("word.isupper", is_upper(word))),
            Attribute::from(("word.istitle", is_title(word))),
            Attribute::from(("word.isdigit", is_digit(word))),
        ];
        if let Some(pos) = token.pos() {
            item.push(Attribute::flag(format!("postag={}", pos)));
            item.push(Attribute::flag(format!("postag[:2]={}", prefix(pos, 2))));
        }
        if let Some(cluster) = clusters.get(word) {
            for n in CLUSTER_PREFIXES {
                item.push(Attribute::flag(format!("cluster[:{}]={}", n, prefix(cluster, n))));
            }
            item.push(Attribute::flag(format!("cluster={}", cluster)));
        }

        if index > 0 {
            neighbour_features(&mut item, &sentence[index - 1], "-1");
        } else {
            item.push(Attribute::flag("BOS"));
        }
        if let Some(next) = sentence.get(index + 1) {
            neighbour_features(&mut item, next, "+1");
        } else {
            item.push(Attribute::flag("EOS"));
        }

        item
    }
}
