//! String-keyed map that remembers insertion order.

use std::collections::HashMap;

/// Values in the order their key was first inserted, with a key index.
///
/// Replacing the value of an existing key keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InsertionMap<V> {
    values: Vec<V>,
    index: HashMap<String, usize>,
}

impl<V> Default for InsertionMap<V> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> InsertionMap<V> {
    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).and_then(|&i| self.values.get(i))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let i = *self.index.get(key)?;
        self.values.get_mut(i)
    }

    /// Insert or replace the value for `key`.
    pub fn insert(&mut self, key: &str, value: V) {
        match self.index.get(key) {
            Some(&i) => self.values[i] = value,
            None => {
                self.index.insert(key.to_string(), self.values.len());
                self.values.push(value);
            }
        }
    }

    /// Value for `key`, inserting `make()` at the end if the key is new.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                let i = self.values.len();
                self.index.insert(key.to_string(), i);
                self.values.push(make());
                i
            }
        };
        &mut self.values[i]
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    pub fn into_values(self) -> Vec<V> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
