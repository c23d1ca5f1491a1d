#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A value given once for every field of a series, or once per field
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarOrArray<T: Clone> {
    Scalar(T),
    Array(Vec<T>),
}

impl<T: Clone> ScalarOrArray<T> {
    pub fn new_scalar(value: T) -> Self {
        ScalarOrArray::Scalar(value)
    }

    pub fn new_array(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }

    /// Value for a field index. Scalars apply to every index, arrays yield
    /// `None` past their end.
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            ScalarOrArray::Scalar(value) => Some(value),
            ScalarOrArray::Array(values) => values.get(index),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ScalarOrArray::Scalar(_) => 1,
            ScalarOrArray::Array(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_vec(&self, scalar_len: usize) -> Vec<T> {
        match self {
            ScalarOrArray::Scalar(value) => vec![value.clone(); scalar_len],
            ScalarOrArray::Array(values) => values.clone(),
        }
    }

    pub fn map<U: Clone>(&self, f: impl Fn(&T) -> U) -> ScalarOrArray<U> {
        match self {
            ScalarOrArray::Scalar(value) => ScalarOrArray::Scalar(f(value)),
            ScalarOrArray::Array(values) => ScalarOrArray::Array(values.iter().map(f).collect()),
        }
    }
}

impl<T: Clone> From<Vec<T>> for ScalarOrArray<T> {
    fn from(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }
}

impl<T: Clone> From<T> for ScalarOrArray<T> {
    fn from(value: T) -> Self {
        ScalarOrArray::Scalar(value)
    }
}

impl From<&str> for ScalarOrArray<String> {
    fn from(value: &str) -> Self {
        ScalarOrArray::Scalar(value.to_string())
    }
}

impl From<Vec<&str>> for ScalarOrArray<String> {
    fn from(values: Vec<&str>) -> Self {
        ScalarOrArray::Array(values.into_iter().map(String::from).collect())
    }
}
