use indexmap::IndexMap;

use crate::error::Error;

/// Base address of the data section; the text section starts at 0.
pub const DATA_BASE: u32 = 0x1000_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Text,
    Data,
}

/// Label and data-symbol addresses, keyed case-sensitively by name. Built
/// once in pass 1 and read-only afterwards; text labels and data symbols
/// share the namespace, so a name may appear at most once in the file.
pub struct SymbolTable(IndexMap<String, u32>);

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable(IndexMap::new())
    }

    /// Bind `name` to `addr`. Rebinding an existing name is an error, never
    /// a silent overwrite.
    pub fn insert(&mut self, name: &str, addr: u32) -> Result<(), Error> {
        if self.0.contains_key(name) {
            return Err(Error::DuplicateLabel(name.to_string()));
        }
        self.0.insert(name.to_string(), addr);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_insert_fails() {
        let mut syms = SymbolTable::new();
        syms.insert("loop", 0).unwrap();
        syms.insert("done", 8).unwrap();
        assert!(matches!(
            syms.insert("loop", 16),
            Err(Error::DuplicateLabel(name)) if name == "loop"
        ));
        // First binding survives.
        assert_eq!(syms.get("loop"), Some(0));
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut syms = SymbolTable::new();
        syms.insert("Loop", 0).unwrap();
        assert_eq!(syms.get("loop"), None);
    }
}
