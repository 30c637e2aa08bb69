//! Layered merge rules.
//!
//! | Value kind               | Rule                                     |
//! |--------------------------|------------------------------------------|
//! | absent (`None`)          | keeps the lower layer                    |
//! | scalar, sequence, rule   | replaced wholesale                       |
//! | `#[config(additive)]`    | appended, duplicates skipped             |
//! | nested section           | merged field by field                    |
//! | map (`BTreeMap`)         | merged key by key, values per their kind |
//!
//! Sections derive `Merge` through `#[derive(Config)]`; leaves use the
//! impls below.

use std::collections::BTreeMap;

/// A configuration value that can be layered on top of another.
pub trait Merge: Sized {
    /// Apply `other` on top of `self`; whatever `other` sets wins.
    fn merge(&mut self, other: Self);

    /// Collect the paths that both `self` and `other` set to different
    /// values. `path` is the dotted location of `self`.
    fn conflicts(&self, other: &Self, path: &str, out: &mut Vec<String>);

    /// Owned variant of [`Merge::merge`].
    fn merged(mut self, other: Self) -> Self {
        self.merge(other);
        self
    }
}

/// Leaves are replaced wholesale.
#[macro_export]
macro_rules! replace_merge {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::config::Merge for $ty {
                #[inline]
                fn merge(&mut self, other: Self) {
                    *self = other;
                }

                fn conflicts(&self, other: &Self, path: &str, out: &mut Vec<String>) {
                    if self != other {
                        out.push(path.to_string());
                    }
                }
            }
        )*
    };
}

replace_merge!(String, bool);

impl<T: PartialEq> Merge for Vec<T> {
    #[inline]
    fn merge(&mut self, other: Self) {
        *self = other;
    }

    fn conflicts(&self, other: &Self, path: &str, out: &mut Vec<String>) {
        if self != other {
            out.push(path.to_string());
        }
    }
}

impl<T: Merge> Merge for Option<T> {
    fn merge(&mut self, other: Self) {
        let Some(other) = other else { return };
        match self {
            Some(current) => current.merge(other),
            None => *self = Some(other),
        }
    }

    fn conflicts(&self, other: &Self, path: &str, out: &mut Vec<String>) {
        if let (Some(a), Some(b)) = (self, other) {
            a.conflicts(b, path, out);
        }
    }
}

impl<V: Merge> Merge for BTreeMap<String, V> {
    fn merge(&mut self, other: Self) {
        for (key, value) in other {
            match self.get_mut(&key) {
                Some(current) => current.merge(value),
                None => {
                    self.insert(key, value);
                }
            }
        }
    }

    fn conflicts(&self, other: &Self, path: &str, out: &mut Vec<String>) {
        for (key, value) in self {
            if let Some(theirs) = other.get(key) {
                value.conflicts(theirs, &join_path(path, key), out);
            }
        }
    }
}

/// Append `other` to an additive sequence, skipping items already present.
pub fn append<T: PartialEq>(target: &mut Option<Vec<T>>, other: Option<Vec<T>>) {
    let Some(items) = other else { return };
    match target {
        Some(existing) => {
            for item in items {
                if !existing.contains(&item) {
                    existing.push(item);
                }
            }
        }
        None => *target = Some(items),
    }
}

/// Join a parent path and a key with a dot.
///
/// Keys that are not plain identifiers (typography selectors such as
/// `pre code::before`) are quoted.
pub fn join_path(parent: &str, key: &str) -> String {
    let plain = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    let key = if plain {
        key.to_string()
    } else {
        format!("\"{key}\"")
    };
    if parent.is_empty() {
        key
    } else {
        format!("{parent}.{key}")
    }
}

// ============================================================================
// tests
// ============================================================================
