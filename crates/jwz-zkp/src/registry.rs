//! # Proving-Method Registry
//!
//! Maps a [`ProvingMethodAlg`] to a shared [`ProvingMethod`]. Parsing a token
//! resolves its `alg`/`circuitId` header pair here, so a token can only be
//! parsed if the matching method was registered first.
//!
//! The registry is passed explicitly to whoever needs it rather than living
//! in a process-wide static. Lookups take a read lock and registrations a
//! write lock, so one registry can be shared across threads behind an `Arc`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::traits::{ProvingMethod, ProvingMethodAlg};

/// No method is registered for the requested algorithm/circuit pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no proving method registered for {0}")]
pub struct UnsupportedMethod(pub ProvingMethodAlg);

/// Thread-safe table of proving methods.
#[derive(Debug, Default)]
pub struct ProvingMethodRegistry {
    methods: RwLock<HashMap<ProvingMethodAlg, Arc<dyn ProvingMethod>>>,
}

impl ProvingMethodRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `method` under its own [`ProvingMethod::method_alg`].
    ///
    /// Returns the previously registered method, if any. Last write wins.
    pub fn register(&self, method: Arc<dyn ProvingMethod>) -> Option<Arc<dyn ProvingMethod>> {
        let alg = method.method_alg();
        self.register_as(alg, method)
    }

    /// Register `method` under an explicit key.
    pub fn register_as(
        &self,
        alg: ProvingMethodAlg,
        method: Arc<dyn ProvingMethod>,
    ) -> Option<Arc<dyn ProvingMethod>> {
        let previous = self.methods.write().insert(alg.clone(), method);
        if previous.is_some() {
            tracing::debug!(alg = %alg, "replaced registered proving method");
        } else {
            tracing::debug!(alg = %alg, "registered proving method");
        }
        previous
    }

    /// Look up the method for `alg`.
    pub fn get(&self, alg: &ProvingMethodAlg) -> Result<Arc<dyn ProvingMethod>, UnsupportedMethod> {
        self.methods
            .read()
            .get(alg)
            .cloned()
            .ok_or_else(|| UnsupportedMethod(alg.clone()))
    }

    /// Whether a method is registered for `alg`.
    pub fn contains(&self, alg: &ProvingMethodAlg) -> bool {
        self.methods.read().contains_key(alg)
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.read().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.methods.read().is_empty()
    }

    /// Registered keys, sorted.
    pub fn algs(&self) -> Vec<ProvingMethodAlg> {
        let mut algs: Vec<_> = self.methods.read().keys().cloned().collect();
        algs.sort();
        algs
    }
}
