use std::collections::HashMap;

/// Interns attribute and label strings into dense `u32` ids
///
/// Ids are assigned in insertion order, which is also the order the CQDB
/// dictionaries are written in.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    ids: HashMap<String, u32>,
    names: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Return the id of `s`, assigning the next free id on first sight
    pub fn get_or_insert(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.ids.get(s) {
            return id;
        }
        let id = self.names.len() as u32;
        self.ids.insert(s.to_owned(), id);
        self.names.push(s.to_owned());
        id
    }

    pub fn get_name(&self, id: u32) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Iterate `(name, id)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(id, s)| (s.as_str(), id as u32))
    }
}
