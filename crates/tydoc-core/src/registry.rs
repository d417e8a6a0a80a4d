//! Deferred cross-file reference resolution.

use rustc_hash::FxHashMap;

use crate::records::RefId;

/// Associates named type references with the file that defines them.
///
/// References are registered as pending under their binding name. When a
/// declaration or import later claims that name, every pending id under it
/// is assigned the claimed filename. Bindings persist for the rest of the
/// traversal so references appearing after the declaration resolve
/// immediately. Whatever is still pending when the traversal ends is the
/// explicit unresolved set, a terminal state rather than an error.
#[derive(Debug, Default)]
pub struct ReferenceRegistry {
    pending: FxHashMap<String, Vec<RefId>>,
    bindings: FxHashMap<String, String>,
    resolved: FxHashMap<RefId, String>,
}

impl ReferenceRegistry {
    pub fn new() -> ReferenceRegistry {
        ReferenceRegistry::default()
    }

    /// Record that the record `id` references `name`. Resolves immediately
    /// when the name is already bound.
    pub fn register_pending(&mut self, name: &str, id: RefId) {
        if let Some(filename) = self.bindings.get(name) {
            self.resolved.insert(id, filename.clone());
        } else {
            self.pending.entry(name.to_string()).or_default().push(id);
        }
    }

    /// Bind `name` to `filename` and assign it to every pending reference
    /// under that name. Unknown names just create the binding; re-resolving
    /// rebinds (idempotent for an unchanged filename).
    pub fn resolve(&mut self, name: &str, filename: &str) {
        self.bindings
            .insert(name.to_string(), filename.to_string());
        if let Some(ids) = self.pending.remove(name) {
            for id in ids {
                self.resolved.insert(id, filename.to_string());
            }
        }
    }

    /// Finish the traversal: the id→filename assignments to patch into the
    /// tree, plus the names that never resolved (sorted for determinism).
    pub fn into_parts(self) -> (FxHashMap<RefId, String>, Vec<String>) {
        let mut unresolved: Vec<String> = self.pending.into_keys().collect();
        unresolved.sort();
        (self.resolved, unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_assigns_pending_references() {
        let mut registry = ReferenceRegistry::new();
        registry.register_pending("Point", RefId(1));
        registry.register_pending("Point", RefId(2));
        registry.resolve("Point", "#");
        let (resolved, unresolved) = registry.into_parts();
        assert_eq!(resolved.get(&RefId(1)).map(String::as_str), Some("#"));
        assert_eq!(resolved.get(&RefId(2)).map(String::as_str), Some("#"));
        assert!(unresolved.is_empty());
    }

    #[test]
    fn bindings_resolve_later_references_immediately() {
        let mut registry = ReferenceRegistry::new();
        registry.resolve("Point", "#");
        registry.register_pending("Point", RefId(7));
        let (resolved, _) = registry.into_parts();
        assert_eq!(resolved.get(&RefId(7)).map(String::as_str), Some("#"));
    }

    #[test]
    fn unclaimed_names_are_reported_unresolved() {
        let mut registry = ReferenceRegistry::new();
        registry.register_pending("Missing", RefId(3));
        registry.register_pending("AlsoMissing", RefId(4));
        let (resolved, unresolved) = registry.into_parts();
        assert!(resolved.is_empty());
        assert_eq!(unresolved, vec!["AlsoMissing", "Missing"]);
    }

    #[test]
    fn resolving_unknown_name_is_a_no_op() {
        let mut registry = ReferenceRegistry::new();
        registry.resolve("Nobody", "./nowhere");
        let (resolved, unresolved) = registry.into_parts();
        assert!(resolved.is_empty());
        assert!(unresolved.is_empty());
    }
}
