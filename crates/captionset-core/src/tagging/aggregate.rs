//! Tag counting over caption text.

use serde::{Serialize, Serializer};

use crate::ordered::InsertionMap;
use crate::types::ImageRecord;

/// Occurrence count per tag, in the order tags were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFrequencyTable {
    entries: InsertionMap<(String, usize)>,
}

impl TagFrequencyTable {
    fn increment(&mut self, tag: &str) {
        self.entries.get_or_insert_with(tag, || (tag.to_string(), 0)).1 += 1;
    }

    /// Count for an exact tag, 0 if it never appeared.
    pub fn get(&self, tag: &str) -> usize {
        self.entries.get(tag).map_or(0, |(_, n)| *n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(tag, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.values().iter().map(|(tag, n)| (tag.as_str(), *n))
    }
}

impl Serialize for TagFrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Tag statistics derived from a record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagStats {
    /// Count per exact trimmed tag
    pub frequencies: TagFrequencyTable,

    /// Distinct tags, most frequent first
    pub sorted: Vec<String>,
}

/// Splits captions into tags and counts them.
#[derive(Debug, Clone)]
pub struct TagAggregator {
    delimiter: String,
}

impl Default for TagAggregator {
    fn default() -> Self {
        Self::new(",")
    }
}

impl TagAggregator {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Tags of a single caption: split on the delimiter, each piece trimmed.
    ///
    /// Empty pieces are kept, so an empty caption yields one empty tag. With
    /// an empty delimiter the whole trimmed caption is one tag.
    pub fn split<'a>(&'a self, caption: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        if self.delimiter.is_empty() {
            Box::new(std::iter::once(caption.trim()))
        } else {
            Box::new(caption.split(self.delimiter.as_str()).map(str::trim))
        }
    }

    /// Count tags across every record's caption.
    pub fn aggregate(&self, records: &[ImageRecord]) -> TagStats {
        self.aggregate_captions(records.iter().map(|r| r.caption.as_str()))
    }

    /// Count tags across raw caption strings.
    pub fn aggregate_captions<'a, I>(&self, captions: I) -> TagStats
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut frequencies = TagFrequencyTable::default();
        for caption in captions {
            for tag in self.split(caption) {
                frequencies.increment(tag);
            }
        }

        // Stable sort: equal counts stay in first-seen order
        let mut ranked: Vec<(&str, usize)> = frequencies.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let sorted = ranked.into_iter().map(|(tag, _)| tag.to_string()).collect();

        TagStats {
            frequencies,
            sorted,
        }
    }
}
