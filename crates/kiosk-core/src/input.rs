use std::collections::{BTreeMap, btree_map::Entry};

///
/// RawValue
/// Uncoerced text for one input key. Repeated keys accumulate into `Many`
/// in arrival order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum RawValue {
    Many(Vec<String>),
    One(String),
}

impl RawValue {
    #[must_use]
    pub const fn count(&self) -> usize {
        match self {
            Self::Many(values) => values.len(),
            Self::One(_) => 1,
        }
    }
}

///
/// InputBag
/// Key-value view of a request's query inputs.
///

#[derive(Clone, Debug, Default)]
pub struct InputBag {
    entries: BTreeMap<String, RawValue>,
}

impl InputBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut bag = Self::new();
        for (key, value) in pairs {
            bag.insert(key, value);
        }

        bag
    }

    /// Append one occurrence of `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        match self.entries.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(RawValue::One(value.into()));
            }
            Entry::Occupied(mut slot) => {
                let raw = slot.get_mut();
                match raw {
                    RawValue::One(first) => {
                        let first = std::mem::take(first);
                        *raw = RawValue::Many(vec![first, value.into()]);
                    }
                    RawValue::Many(values) => values.push(value.into()),
                }
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
