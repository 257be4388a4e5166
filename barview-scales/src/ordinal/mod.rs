use std::fmt::Debug;
use std::hash::Hash;

use crate::error::ScaleError;
use barview_common::value::{ScalarOrArray, ScalarOrArrayRef};
use indexmap::IndexMap;

/// A discrete scale that maps input values to a fixed set of output values.
/// Inputs outside the domain map to the default value.
#[derive(Debug, Clone)]
pub struct OrdinalScale<D, R>
where
    D: Clone + Hash + Eq + Debug + Sync + 'static,
    R: Clone + Debug + Sync + 'static,
{
    mapping: IndexMap<D, R>,
    default_value: R,
}

impl<D, R> OrdinalScale<D, R>
where
    D: Clone + Hash + Eq + Debug + Sync + 'static,
    R: Clone + Debug + Sync + 'static,
{
    /// Creates a new ordinal scale from domain and range arrays with a required default value.
    ///
    /// Repeated domain values keep the range value of their first occurrence.
    pub fn new(domain: &[D], range: &[R], default_value: R) -> Result<Self, ScaleError> {
        if domain.len() != range.len() {
            return Err(ScaleError::DomainRangeMismatch {
                domain_len: domain.len(),
                range_len: range.len(),
            });
        }

        let mut mapping = IndexMap::with_capacity(domain.len());
        for (d, r) in domain.iter().zip(range) {
            mapping.entry(d.clone()).or_insert_with(|| r.clone());
        }

        Ok(Self {
            mapping,
            default_value,
        })
    }

    /// Builds a scale from `(domain, range)` pairs; repeated keys keep their first value
    pub fn from_pairs(pairs: impl IntoIterator<Item = (D, R)>, default_value: R) -> Self {
        let mut mapping = IndexMap::new();
        for (d, r) in pairs {
            mapping.entry(d).or_insert(r);
        }
        Self {
            mapping,
            default_value,
        }
    }

    pub fn get_default_value(&self) -> &R {
        &self.default_value
    }

    pub fn domain(&self) -> Vec<D> {
        self.mapping.keys().cloned().collect()
    }

    pub fn range(&self) -> Vec<R> {
        self.mapping.values().cloned().collect()
    }

    /// Looks up a single value, returning `None` when it is not in the domain
    pub fn get(&self, value: &D) -> Option<&R> {
        self.mapping.get(value)
    }

    pub fn scale<'a>(&self, values: impl Into<ScalarOrArrayRef<'a, D>>) -> ScalarOrArray<R> {
        values
            .into()
            .map(|v| self.mapping.get(v).unwrap_or(&self.default_value).clone())
    }
}
