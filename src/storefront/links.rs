//! Product → seller link assignment.
//!
//! Products from the mock source carry no seller page, so each one is assigned
//! a link from a fixed rotation by its position in the listing. The rotation is
//! a stand-in: a product that already has a non-empty `link` keeps it.

use crate::errors::ConfigError;

use super::models::Product;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRotation {
    candidates: Vec<String>,
}

impl LinkRotation {
    /// Build a rotation. An empty candidate list is rejected so that
    /// [`LinkRotation::derive`] is total.
    pub fn new(candidates: Vec<String>) -> Result<Self, ConfigError> {
        if candidates.is_empty() {
            return Err(ConfigError::Invalid {
                key: "links.candidates".into(),
                message: "at least one link is required".into(),
            });
        }
        Ok(Self { candidates })
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Link for the product at zero-based `index`: `candidates[index % N]`.
    pub fn derive(&self, index: usize) -> &str {
        &self.candidates[index % self.candidates.len()]
    }

    /// Link to use for `product` at `index`, preferring the product's own.
    pub fn link_for(&self, index: usize, product: &Product) -> String {
        match product.link.as_deref().map(str::trim) {
            Some(own) if !own.is_empty() => own.to_string(),
            _ => self.derive(index).to_string(),
        }
    }
}

impl Default for LinkRotation {
    fn default() -> Self {
        Self {
            candidates: crate::config::DEFAULT_LINK_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
