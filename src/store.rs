/// Ordered name/value storage backing a [`Properties`](crate::Properties)
/// instance. Insertion order is preserved for serialization; lookup is by
/// key. Property counts are small, so a vector beats a map here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Store {
    entries: Vec<(String, String)>,
}

impl Store {
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Inserts or overwrites; an overwritten key keeps its position.
    pub(crate) fn set(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    pub(crate) fn remove(&mut self, name: &str) {
        self.entries.retain(|(key, _)| key != name);
    }

    pub(crate) fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
