//! Type-parameter scope stack.

/// Ordered collection of the type-parameter names currently in scope.
///
/// Rules bracket every type-parameter list with `depth()` before visiting
/// and `truncate(depth)` after emitting, so scopes strictly nest and a
/// shadowed name reappears when the inner scope closes.
#[derive(Debug, Default)]
pub struct ScopeStack {
    names: Vec<String>,
}

impl ScopeStack {
    pub fn new() -> ScopeStack {
        ScopeStack::default()
    }

    /// Current depth, to be passed back to [`ScopeStack::truncate`].
    #[inline]
    pub fn depth(&self) -> usize {
        self.names.len()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// Drop every name pushed after the matching `depth()` call.
    pub fn truncate(&mut self, depth: usize) {
        self.names.truncate(depth);
    }

    /// Linear scan; scope stacks are a handful of entries deep in practice.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_restores_outer_scope() {
        let mut scope = ScopeStack::new();
        scope.push("T");
        let depth = scope.depth();
        scope.push("U");
        scope.push("V");
        assert!(scope.contains("U"));
        scope.truncate(depth);
        assert!(scope.contains("T"));
        assert!(!scope.contains("U"));
        assert!(!scope.contains("V"));
    }

    #[test]
    fn shadowed_name_survives_inner_scope() {
        let mut scope = ScopeStack::new();
        scope.push("T");
        let depth = scope.depth();
        scope.push("T");
        scope.truncate(depth);
        assert!(scope.contains("T"));
    }
}
