//! Bulk loading, export, and serde support

use super::RadixTree;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

impl<V> RadixTree<V> {
    /// Insert every pair from `entries`, overwriting existing keys
    pub fn load<K, I>(&mut self, entries: I)
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.insert(key.as_ref(), value);
        }
    }

    /// Export all entries into a `HashMap`
    pub fn to_map(&self) -> HashMap<String, V>
    where
        V: Clone,
    {
        let mut map = HashMap::with_capacity(self.size);
        self.walk(|k, v| {
            map.insert(k.to_owned(), v.clone());
            false
        });
        map
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for RadixTree<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = RadixTree::new();
        tree.load(iter);
        tree
    }
}

impl<K: AsRef<str>, V> Extend<(K, V)> for RadixTree<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.load(iter);
    }
}

impl<V: Serialize> Serialize for RadixTree<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.size))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct TreeVisitor<V> {
    marker: PhantomData<fn() -> RadixTree<V>>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for TreeVisitor<V> {
    type Value = RadixTree<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut tree = RadixTree::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            tree.insert(&key, value);
        }
        Ok(tree)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for RadixTree<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TreeVisitor {
            marker: PhantomData,
        })
    }
}
