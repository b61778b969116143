//! Remote method discovery and name binding
//!
//! At connect time the client asks the server for its method catalog and
//! binds each advertised name under a sanitized identifier. Binding is
//! purely a client-side lookup table: nothing is validated against the
//! server until a bound name is actually invoked.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

/// Reserved introspection method queried once at construction.
pub const DISCOVERY_METHOD: &str = "system.listMethods";

/// Derive a bindable identifier from a remote method name.
///
/// Every character outside `[A-Za-z0-9_]` becomes an underscore, so
/// `"BOOKS/list.fetch"` binds as `"BOOKS_list_fetch"`. The mapping is not
/// injective; see [`MethodRegistry`] for how collisions resolve.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Lookup table from sanitized bound names to the remote names they were
/// derived from.
///
/// When two remote names sanitize to the same identifier, the one bound
/// later silently replaces the earlier one. That is a documented property
/// of binding, not a validation failure.
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    bindings: HashMap<String, String>,
}

impl MethodRegistry {
    /// A registry with no bindings (discovery skipped or carried nothing)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the binding table from a discovery response envelope.
    ///
    /// Only the `result` member is consulted. A response without one (the
    /// server answered with an error envelope, or the exchange degraded to
    /// `null`) produces an empty registry, leaving the client usable for
    /// explicit calls.
    pub fn from_response(response: &Value) -> Self {
        let Some(result) = response.get("result") else {
            debug!("Discovery response carries no result; no methods bound");
            return Self::empty();
        };

        let Some(names) = result.as_array() else {
            warn!("Discovery result is not an array; no methods bound");
            return Self::empty();
        };

        let mut bindings = HashMap::new();
        for entry in names {
            let Some(remote) = entry.as_str() else {
                warn!(?entry, "Skipping non-string discovery entry");
                continue;
            };
            let bound = sanitize(remote);
            debug!(remote, bound = %bound, "Binding remote method");
            bindings.insert(bound, remote.to_string());
        }

        Self { bindings }
    }

    /// Remote method name behind a bound identifier
    pub fn resolve(&self, bound: &str) -> Option<&str> {
        self.bindings.get(bound).map(String::as_str)
    }

    /// All bound identifiers, sorted for stable iteration
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
