#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An encoding channel that is either one value shared by every element of a
/// mark, or one value per element.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "kebab-case"))]
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarOrArray<T: Sync + Clone> {
    Scalar(T),
    Array(Vec<T>),
}

impl<T: Sync + Clone> ScalarOrArray<T> {
    pub fn new_scalar(value: T) -> Self {
        ScalarOrArray::Scalar(value)
    }

    pub fn new_array(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }

    pub fn as_iter<'a>(
        &'a self,
        scalar_len: usize,
        indices: Option<&'a Vec<usize>>,
    ) -> Box<dyn Iterator<Item = &'a T> + 'a> {
        match self {
            ScalarOrArray::Scalar(value) => Box::new(std::iter::repeat(value).take(scalar_len)),
            ScalarOrArray::Array(values) => match indices {
                None => Box::new(values.iter()),
                Some(indices) => Box::new(indices.iter().map(|i| &values[*i])),
            },
        }
    }

    pub fn as_iter_owned<'a>(
        &'a self,
        scalar_len: usize,
        indices: Option<&'a Vec<usize>>,
    ) -> Box<dyn Iterator<Item = T> + 'a> {
        match self {
            ScalarOrArray::Scalar(value) => {
                Box::new(std::iter::repeat(value.clone()).take(scalar_len))
            }
            ScalarOrArray::Array(values) => match indices {
                None => Box::new(values.iter().cloned()),
                Some(indices) => Box::new(indices.iter().map(|i| values[*i].clone())),
            },
        }
    }

    pub fn as_vec(&self, scalar_len: usize, indices: Option<&Vec<usize>>) -> Vec<T> {
        self.as_iter(scalar_len, indices)
            .cloned()
            .collect::<Vec<_>>()
    }

    /// Returns the single value when this is a scalar, or the first element of an array
    pub fn first(&self) -> Option<&T> {
        match self {
            ScalarOrArray::Scalar(value) => Some(value),
            ScalarOrArray::Array(values) => values.first(),
        }
    }

    pub fn map<U: Sync + Clone>(&self, f: impl Fn(&T) -> U) -> ScalarOrArray<U> {
        match self {
            ScalarOrArray::Scalar(value) => ScalarOrArray::Scalar(f(value)),
            ScalarOrArray::Array(values) => ScalarOrArray::Array(values.iter().map(f).collect()),
        }
    }
}

impl ScalarOrArray<f32> {
    pub fn equals_scalar(&self, v: f32) -> bool {
        match self {
            ScalarOrArray::Scalar(value) => v == *value,
            _ => false,
        }
    }
}

impl<T: Sync + Clone> From<Vec<T>> for ScalarOrArray<T> {
    fn from(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }
}

impl<T: Sync + Clone> From<T> for ScalarOrArray<T> {
    fn from(value: T) -> Self {
        ScalarOrArray::Scalar(value)
    }
}

impl From<&str> for ScalarOrArray<String> {
    fn from(value: &str) -> Self {
        ScalarOrArray::Scalar(value.to_string())
    }
}

/// Borrowed counterpart of [`ScalarOrArray`], used as scale input so callers
/// can pass slices without cloning.
#[derive(Debug, Clone)]
pub enum ScalarOrArrayRef<'a, T: Sync + Clone> {
    Scalar(T),
    Array(&'a [T]),
}

impl<'a, T: Sync + Clone> ScalarOrArrayRef<'a, T> {
    pub fn map<U: Sync + Clone>(self, f: impl Fn(&T) -> U) -> ScalarOrArray<U> {
        match self {
            ScalarOrArrayRef::Scalar(value) => ScalarOrArray::Scalar(f(&value)),
            ScalarOrArrayRef::Array(values) => ScalarOrArray::Array(values.iter().map(f).collect()),
        }
    }
}

impl<'a, T: Sync + Clone> From<&'a [T]> for ScalarOrArrayRef<'a, T> {
    fn from(values: &'a [T]) -> Self {
        ScalarOrArrayRef::Array(values)
    }
}

impl<'a, T: Sync + Clone> From<&'a Vec<T>> for ScalarOrArrayRef<'a, T> {
    fn from(values: &'a Vec<T>) -> Self {
        ScalarOrArrayRef::Array(values.as_slice())
    }
}

impl<'a, T: Sync + Clone> From<&'a T> for ScalarOrArrayRef<'a, T> {
    fn from(value: &'a T) -> Self {
        ScalarOrArrayRef::Scalar(value.clone())
    }
}

impl<'a, T: Sync + Clone> From<T> for ScalarOrArrayRef<'a, T> {
    fn from(value: T) -> Self {
        ScalarOrArrayRef::Scalar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_broadcasts_to_len() {
        let v = ScalarOrArray::new_scalar(2.0_f32);
        assert_eq!(v.as_vec(3, None), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_array_with_indices() {
        let v = ScalarOrArray::new_array(vec!["a", "b", "c"]);
        let indices = vec![2, 0];
        assert_eq!(v.as_vec(3, Some(&indices)), vec!["c", "a"]);
    }

    #[test]
    fn test_ref_map() {
        let values = vec![1.0_f32, 2.0];
        let doubled = ScalarOrArrayRef::<f32>::from(&values).map(|v| v * 2.0);
        assert_eq!(doubled, ScalarOrArray::Array(vec![2.0, 4.0]));
    }
}
