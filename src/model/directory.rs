use std::collections::HashMap;

/// Id to display-name lookup for records referenced by id.
///
/// Sessions store participant ids; filters, cells and editor options project
/// them through a directory. Ids with no entry display as themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(id, name)` pairs. A repeated id keeps its first name.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut directory = Self::new();
        for (id, name) in pairs {
            directory.insert(id.into(), name.into());
        }
        directory
    }

    pub fn insert(&mut self, id: String, name: String) {
        if self.index.contains_key(&id) {
            return;
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, name));
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.index.get(id).map(|&i| self.entries[i].1.as_str())
    }

    /// Name for `id`, or `id` itself when unresolved.
    pub fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.name(id).unwrap_or(id)
    }

    /// `(id, name)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_ids_fall_back_to_the_id() {
        let directory = Directory::from_pairs([("c1", "王小明")]);
        assert_eq!(directory.resolve("c1"), "王小明");
        assert_eq!(directory.resolve("c99"), "c99");
    }

    #[test]
    fn first_name_wins_and_order_is_kept() {
        let directory = Directory::from_pairs([("c2", "张三"), ("c1", "王小明"), ("c2", "重复")]);
        let ids: Vec<_> = directory.entries().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["c2", "c1"]);
        assert_eq!(directory.name("c2"), Some("张三"));
        assert_eq!(directory.len(), 2);
    }
}
