//! Generic approximate-match index over an ordered collection.

use std::cmp::Ordering;

use super::bitap::BitapOptions;
use super::extended::ExtendedQuery;
use super::types::Searchable;

/// A searchable key and its normalised weight.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchKey {
    pub name: &'static str,
    pub weight: f64,
}

/// A matched entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a, T> {
    pub item: &'a T,
    /// 0 is a perfect match; lower is better.
    pub score: f64,
    /// Position of the entry in the collection.
    pub ref_index: usize,
}

/// Ordered collection of entries with token-based partial matching on a set
/// of keys.
///
/// Entries keep insertion order; [`SearchIndex::docs`] exposes that order
/// directly.
#[derive(Debug, Clone)]
pub struct SearchIndex<T> {
    docs: Vec<T>,
    keys: Vec<SearchKey>,
    options: BitapOptions,
}

impl<T: Searchable> SearchIndex<T> {
    /// Create an empty index matching on `keys`, all weighted equally.
    pub fn new(keys: &[&'static str], options: BitapOptions) -> Self {
        let weight = 1.0 / keys.len().max(1) as f64;
        let keys = keys.iter().map(|&name| SearchKey { name, weight }).collect();
        Self { docs: Vec::new(), keys, options }
    }

    pub fn keys(&self) -> &[SearchKey] {
        &self.keys
    }

    pub fn options(&self) -> BitapOptions {
        self.options
    }

    /// Replace the whole collection.
    pub fn set_collection(&mut self, docs: Vec<T>) {
        self.docs = docs;
    }

    /// Append an entry.
    pub fn add(&mut self, doc: T) {
        self.docs.push(doc);
    }

    /// Remove every entry matching `predicate`; returns the removed entries.
    pub fn remove<F>(&mut self, mut predicate: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (removed, kept): (Vec<T>, Vec<T>) =
            std::mem::take(&mut self.docs).into_iter().partition(|d| predicate(d));
        self.docs = kept;
        removed
    }

    /// Remove every entry with `id`.
    pub fn remove_id(&mut self, id: &str) -> Vec<T> {
        self.remove(|doc| doc.id() == id)
    }

    /// All entries in insertion order.
    pub fn docs(&self) -> &[T] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Match `query` against every entry, best score first.
    ///
    /// An entry's score is the product over matching keys of
    /// `key_score ^ key_weight`; ties keep collection order.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_, T>> {
        let query = ExtendedQuery::parse(query, self.options);

        let mut hits: Vec<SearchHit<'_, T>> = self
            .docs
            .iter()
            .enumerate()
            .filter_map(|(ref_index, item)| {
                let mut matched = false;
                let mut score = 1.0;
                for key in &self.keys {
                    let Some(value) = item.field(key.name) else { continue };
                    if let Some(key_score) = query.search_in(value) {
                        matched = true;
                        let base = if key_score == 0.0 { f64::EPSILON } else { key_score };
                        score *= base.powf(key.weight);
                    }
                }
                matched.then_some(SearchHit { item, score, ref_index })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(Ordering::Equal)
                .then(a.ref_index.cmp(&b.ref_index))
        });
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: String,
        name: String,
    }

    impl Searchable for Entry {
        fn id(&self) -> &str {
            &self.id
        }

        fn field(&self, key: &str) -> Option<&str> {
            match key {
                "id" => Some(&self.id),
                "name" => Some(&self.name),
                _ => None,
            }
        }
    }

    fn entry(id: &str, name: &str) -> Entry {
        Entry { id: id.into(), name: name.into() }
    }

    fn index(entries: &[(&str, &str)]) -> SearchIndex<Entry> {
        let mut idx = SearchIndex::new(&["name"], BitapOptions::default());
        idx.set_collection(entries.iter().map(|(i, n)| entry(i, n)).collect());
        idx
    }

    fn names(hits: &[SearchHit<'_, Entry>]) -> Vec<String> {
        hits.iter().map(|h| h.item.name.clone()).collect()
    }

    #[test]
    fn test_exact_name_ranks_first() {
        let idx = index(&[("1", "foo.bar"), ("2", "foo")]);
        let hits = idx.search("foo");
        assert_eq!(names(&hits), vec!["foo", "foo.bar"]);
        assert_eq!(hits[0].score, f64::EPSILON);
        assert_eq!(hits[1].score, 0.001);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let idx = index(&[("1", "b.foo"), ("2", "a.foo"), ("3", "c.foo")]);
        assert_eq!(names(&idx.search("foo")), vec!["b.foo", "a.foo", "c.foo"]);
    }

    #[test]
    fn test_remove_returns_removed() {
        let mut idx = index(&[("1", "a"), ("2", "b"), ("1", "c")]);
        let removed = idx.remove_id("1");
        assert_eq!(removed.len(), 2);
        assert_eq!(idx.docs(), &[entry("2", "b")]);
        assert!(idx.remove_id("1").is_empty());
    }

    #[test]
    fn test_weights_split_across_keys() {
        let mut idx: SearchIndex<Entry> =
            SearchIndex::new(&["id", "name"], BitapOptions::default());
        assert_eq!(idx.keys()[0].weight, 0.5);

        idx.add(entry("daily", "journal"));
        let hits = idx.search("daily");
        assert_eq!(hits.len(), 1);
        assert!((hits[0].score - f64::EPSILON.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_index() {
        let idx = index(&[]);
        assert!(idx.is_empty());
        assert!(idx.search("anything").is_empty());
    }
}
