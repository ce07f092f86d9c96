use crate::diag::Diagnostics;
use std::collections::HashMap;

/// Maps bus numbers and bus names to row positions in the bus table.
#[derive(Debug, Clone, Default)]
pub struct BusIndex {
    by_number: HashMap<usize, usize>,
    by_name: HashMap<String, usize>,
}

impl BusIndex {
    /// Number of indexed buses.
    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }

    pub fn contains_number(&self, number: usize) -> bool {
        self.by_number.contains_key(&number)
    }

    /// Registers a bus number and name for row `idx`.
    ///
    /// Blank names are not indexed. A name shared by several buses resolves
    /// to the first one.
    pub fn insert(&mut self, number: usize, name: &str, idx: usize) {
        self.by_number.insert(number, idx);

        let name = clean_name(name);
        if !name.is_empty() {
            self.by_name.entry(name.to_string()).or_insert(idx);
        }
    }

    /// Looks up a bus reference, by number first and then by name.
    pub fn get(&self, reference: &str) -> Option<usize> {
        let key = clean_name(reference);
        key.parse::<usize>()
            .ok()
            .and_then(|n| self.by_number.get(&n))
            .or_else(|| self.by_name.get(key))
            .copied()
    }

    /// Looks up a bus reference, recording an error if it is not found.
    pub fn resolve(
        &self,
        reference: &str,
        section: &str,
        line: usize,
        diag: &mut Diagnostics,
    ) -> Option<usize> {
        let idx = self.get(reference);
        if idx.is_none() {
            diag.error(
                section,
                Some(line),
                format!("Bus [{}] not found", clean_name(reference)),
            );
        }
        idx
    }
}

fn clean_name(s: &str) -> &str {
    s.trim().trim_matches(|c| c == '\'' || c == '"').trim()
}
