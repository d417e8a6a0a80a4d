//! String interner for identifier deduplication.
//!
//! Intern identifier text into a pool and pass around u32 indices (Atoms).
//! Comparisons become integer comparisons instead of string comparisons, and
//! duplicate identifiers like `id` or `length` are stored once per file.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// An interned string identifier.
///
/// Atoms are cheap to copy (just a u32) and can be compared with == in O(1).
/// To get the actual string, use `Interner::resolve(atom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// A sentinel value representing no atom / empty string.
    pub const NONE: Atom = Atom(0);

    /// Check if this is the empty/none atom.
    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Get the raw index value.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Strings pre-interned into every pool so keyword-heavy sources never
/// allocate for them. Index 0 is reserved for `Atom::NONE`.
const COMMON_STRINGS: &[&str] = &[
    "", "any", "boolean", "class", "const", "constructor", "declare", "default", "enum", "export",
    "extends", "from", "function", "implements", "import", "in", "infer", "interface", "is",
    "keyof", "let", "module", "namespace", "never", "new", "null", "number", "object", "private",
    "protected", "public", "readonly", "static", "string", "symbol", "this", "type", "typeof",
    "undefined", "unique", "unknown", "var", "void",
];

/// Single-threaded string interner.
///
/// Traversal is strictly single-threaded (one parse owns one interner), so no
/// sharding or locking is needed here.
#[derive(Debug, Clone)]
pub struct Interner {
    map: FxHashMap<String, u32>,
    strings: Vec<String>,
}

impl Default for Interner {
    fn default() -> Self {
        Interner::new()
    }
}

impl Interner {
    pub fn new() -> Interner {
        let mut interner = Interner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(COMMON_STRINGS.len()),
        };
        for s in COMMON_STRINGS {
            interner.intern(s);
        }
        interner
    }

    /// Intern a string, returning its atom. Repeated calls with the same
    /// text return the same atom.
    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(&index) = self.map.get(text) {
            return Atom(index);
        }
        let index = self.strings.len() as u32;
        self.strings.push(text.to_string());
        self.map.insert(text.to_string(), index);
        Atom(index)
    }

    /// Resolve an atom back to its string.
    #[inline]
    pub fn resolve(&self, atom: Atom) -> &str {
        self.strings
            .get(atom.0 as usize)
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Number of distinct strings interned (including pre-interned ones).
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_returns_stable_atoms() {
        let mut interner = Interner::new();
        let a = interner.intern("Point");
        let b = interner.intern("Vector");
        let c = interner.intern("Point");
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(interner.resolve(a), "Point");
        assert_eq!(interner.resolve(b), "Vector");
    }

    #[test]
    fn none_atom_resolves_to_empty_string() {
        let interner = Interner::new();
        assert_eq!(interner.resolve(Atom::NONE), "");
        assert!(Atom::NONE.is_none());
    }

    #[test]
    fn common_strings_are_pre_interned() {
        let mut interner = Interner::new();
        let before = interner.len();
        interner.intern("interface");
        interner.intern("keyof");
        assert_eq!(interner.len(), before);
    }
}
