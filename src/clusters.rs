//! Brown word clusters
//!
//! Reads the `paths` output of Liang's `wcluster`: one `<bit-string> <word>
//! [<count>]` entry per line.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bstr::ByteSlice;

use crate::error::{Error, Result};

/// Word to cluster bit-string mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterMap {
    clusters: HashMap<String, String>,
}

impl ClusterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a cluster file eagerly
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let io_err = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Read clusters from `reader`; `path` is only used in error messages
    pub fn from_reader<R: BufRead>(mut reader: R, path: &Path) -> Result<Self> {
        let mut map = Self::new();
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| Error::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            if n == 0 {
                break;
            }
            line_no += 1;

            let line = buf.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.fields();
            match (fields.next(), fields.next()) {
                (Some(cluster), Some(word)) => {
                    map.insert(word.to_str_lossy(), cluster.to_str_lossy());
                }
                _ => {
                    return Err(Error::MalformedClusters {
                        path: path.to_path_buf(),
                        line: line_no,
                        content: line.to_str_lossy().into_owned(),
                    })
                }
            }
        }
        Ok(map)
    }

    pub fn insert<W: Into<String>, C: Into<String>>(&mut self, word: W, cluster: C) {
        self.clusters.insert(word.into(), cluster.into());
    }

    /// Cluster bit-string of `word`
    pub fn get(&self, word: &str) -> Option<&str> {
        self.clusters.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

impl<W: Into<String>, C: Into<String>> FromIterator<(W, C)> for ClusterMap {
    fn from_iter<I: IntoIterator<Item = (W, C)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (word, cluster) in iter {
            map.insert(word, cluster);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_wcluster_paths() {
        let text = "0010\tMadrid\t412\n0011\tParis\t390\n\n110 the 10234\n";
        let map = ClusterMap::from_reader(text.as_bytes(), Path::new("paths")).unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("Madrid"), Some("0010"));
        assert_eq!(map.get("the"), Some("110"));
        assert_eq!(map.get("London"), None);
    }

    #[test]
    fn test_rejects_single_column() {
        let err = ClusterMap::from_reader("0010 Madrid\n0011\n".as_bytes(), Path::new("paths"))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedClusters { line: 2, .. }));
    }

    #[test]
    fn test_collect() {
        let map: ClusterMap = vec![("Lisboa", "0010")].into_iter().collect();
        assert_eq!(map.get("Lisboa"), Some("0010"));
    }
}
