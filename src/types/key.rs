//! Composite cache keys.

use std::fmt;

use super::Namespace;

/// Identifies one remote media entity: `(namespace, id)`.
///
/// Hashing and equality use both fields structurally, so two distinct pairs
/// never share a cache slot. The string form `<namespace>:<id>` is also
/// injective: namespaces cannot contain `:` and the id is rendered in
/// canonical base 10, so splitting on the first `:` recovers the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub namespace: Namespace,
    pub id: i64,
}

impl CacheKey {
    pub fn new(namespace: Namespace, id: i64) -> Self {
        Self { namespace, id }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)
    }
}
