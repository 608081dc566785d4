//! Ordered row indices.

use crate::key::Key;

/// An ordered sequence of keys identifying rows.
///
/// Uniqueness is not enforced. Duplicate keys combined with entity naming
/// produce duplicate labels, which the model sink rejects at creation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Index {
    keys: Vec<Key>,
}

impl Index {
    /// Create an index from a sequence of keys.
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Create the default integer index `0..len`.
    pub fn range(len: usize) -> Self {
        Self {
            keys: (0..len).map(|i| Key::Int(i as i64)).collect(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The keys as a slice, in row order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Iterate over keys in row order.
    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.keys.iter()
    }

    /// Get the key at a position.
    pub fn get(&self, pos: usize) -> Option<&Key> {
        self.keys.get(pos)
    }
}

impl FromIterator<Key> for Index {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
