//! # symtab
//!
//! A flat symbol table built on [`indexmap::IndexMap`], mapping variable,
//! array-suffix and temporary names to their type name and byte size.
//!
//! The table only grows: [`SymbolTable::insert`] never replaces an entry, so
//! the first registration of a name is the one that sticks. Iteration follows
//! insertion order.
//!
//! ## Example
//! ```rust
//! # use lrsdt_translate::{SymbolEntry, SymbolTable};
//! let mut st = SymbolTable::new();
//! assert!(st.insert("a[]", SymbolEntry::new("int", 8)));
//! assert!(!st.insert("a[]", SymbolEntry::new("int", 64))); // kept, not replaced
//! assert_eq!(st.lookup("a[]").unwrap().size, 8);
//! assert!(st.lookup("b").is_err());
//! ```

use indexmap::{IndexMap, map::Entry};
use smartstring::alias::String;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when operating on a [`SymbolTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymTabError {
    /// A name was referenced before it was declared.
    #[error("undefined symbol {name:?}")]
    UndefinedSymbol {
        /// The missing name, including any `[]` suffixes.
        name: String,
    },
}

/// Type name and byte size of one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub type_name: String,
    pub size: usize,
}

impl SymbolEntry {
    pub fn new(type_name: impl Into<String>, size: usize) -> Self {
        Self {
            type_name: type_name.into(),
            size,
        }
    }
}

impl fmt::Display for SymbolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.size)
    }
}

/// Name to [`SymbolEntry`] mapping, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    tab: IndexMap<String, SymbolEntry>,
}

impl SymbolTable {
    /// Creates a new, empty symbol table.
    pub fn new() -> Self {
        Self {
            tab: IndexMap::new(),
        }
    }

    /// Returns the number of entries currently stored in the symbol table.
    ///
    /// # Example
    /// ```rust
    /// # use lrsdt_translate::{SymbolEntry, SymbolTable};
    /// let mut symtab = SymbolTable::new();
    /// assert_eq!(symtab.len(), 0);
    /// symtab.insert("x", SymbolEntry::new("int", 8));
    /// symtab.insert("x", SymbolEntry::new("float", 4));
    /// assert_eq!(symtab.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tab.is_empty()
    }

    /// Inserts `name` unless it is already present.
    ///
    /// Returns `true` if the entry was added, `false` if an entry for `name`
    /// already existed (in which case the existing entry is left untouched).
    pub fn insert(&mut self, name: &str, entry: SymbolEntry) -> bool {
        match self.tab.entry(String::from(name)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(v) => {
                log::trace!("Insert {} {}", name, entry);
                v.insert(entry);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.tab.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tab.contains_key(name)
    }

    /// Like [`SymbolTable::get`], failing with
    /// [`SymTabError::UndefinedSymbol`] when `name` is absent.
    pub fn lookup(&self, name: &str) -> Result<&SymbolEntry, SymTabError> {
        self.tab.get(name).ok_or_else(|| SymTabError::UndefinedSymbol {
            name: String::from(name),
        })
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolEntry)> {
        self.tab.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

/// One `name type size` line per entry.
impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, entry) in self.iter() {
            writeln!(f, "{} {}", name, entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let st = SymbolTable::new();
        assert!(st.is_empty());
        assert_eq!(st.len(), 0);
        assert_eq!(st.to_string(), "");
    }

    #[test]
    fn insert_keeps_first_entry() {
        let mut st = SymbolTable::new();
        assert!(st.insert("t0", SymbolEntry::new("int", 8)));
        assert!(!st.insert("t0", SymbolEntry::new("size_t", 64)));
        assert_eq!(st.get("t0"), Some(&SymbolEntry::new("int", 8)));
        assert_eq!(st.len(), 1);
    }

    #[test]
    fn lookup_missing_is_undefined_symbol() {
        let st = SymbolTable::new();
        let err = st.lookup("a[][]").unwrap_err();
        assert_eq!(
            err,
            SymTabError::UndefinedSymbol {
                name: "a[][]".into()
            }
        );
        assert_eq!(err.to_string(), "undefined symbol \"a[][]\"");
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut st = SymbolTable::new();
        st.insert("b", SymbolEntry::new("int", 8));
        st.insert("a", SymbolEntry::new("float", 4));
        st.insert("c", SymbolEntry::new("size_t", 64));
        let names: Vec<_> = st.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert!(st.contains("a"));
        assert!(!st.contains("d"));
        assert_eq!(st.to_string(), "b int 8\na float 4\nc size_t 64\n");
    }
}
