use crate::errors::{OptionsError, Result};
use crate::options::OpenClOptions;
use std::collections::BTreeMap;

/// Features a compilation target reports, name to supported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureMap {
    inner: BTreeMap<String, bool>,
}

impl<S: Into<String>> FromIterator<(S, bool)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: bool) {
        self.inner.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.inner.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.inner.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Parse a `-cl-ext` style list such as `-all,+cl_khr_fp64,+cl_khr_fp16`.
    ///
    /// Each comma-separated item is a `+` or `-` followed by a name; `all`
    /// stands for every option `known` contains. Later items override
    /// earlier ones.
    pub fn parse_cl_ext(list: &str, known: &OpenClOptions) -> Result<Self> {
        let mut map = Self::new();
        map.apply_cl_ext(list, known)?;
        Ok(map)
    }

    /// Apply a `-cl-ext` style list on top of this map.
    pub fn apply_cl_ext(&mut self, list: &str, known: &OpenClOptions) -> Result<()> {
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (value, name) = if let Some(name) = item.strip_prefix('+') {
                (true, name)
            } else if let Some(name) = item.strip_prefix('-') {
                (false, name)
            } else {
                return Err(OptionsError::InvalidFeature(item.to_string()));
            };
            if name.is_empty() {
                return Err(OptionsError::InvalidFeature(item.to_string()));
            }
            if name == "all" {
                for known_name in known.names() {
                    self.insert(known_name, value);
                }
            } else {
                self.insert(name, value);
            }
        }
        Ok(())
    }
}
