//! Scoped symbol table
//!
//! Maps variable names to storage slots, with one map per active lexical
//! scope. A scope is pushed for each employee body and each decide branch.
//! Slots are uniformly dynamic value containers; the inferred type recorded
//! alongside a slot is advisory and never constrains what the slot holds.

use super::errors::BindError;
use crate::parser::ast::ChestType;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy)]
struct Symbol {
    slot: usize,
    ty: Option<ChestType>,
}

/// Stack of lexical scopes for one employee body.
#[derive(Debug, Default)]
pub struct SymbolTable {
    scopes: Vec<FxHashMap<String, Symbol>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Declare a variable in the innermost scope. Redeclaring a name that
    /// already exists in that scope is an error; shadowing an outer scope's
    /// name is fine.
    pub fn declare(
        &mut self,
        name: &str,
        slot: usize,
        ty: Option<ChestType>,
    ) -> Result<(), BindError> {
        let scope = self.scopes.last_mut().expect("no active scope");
        if scope.contains_key(name) {
            return Err(BindError::DuplicateDeclaration {
                name: name.to_string(),
            });
        }
        scope.insert(name.to_string(), Symbol { slot, ty });
        Ok(())
    }

    /// Resolve a name to its slot, searching innermost scope outward.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).map(|symbol| symbol.slot))
    }

    /// The inferred type recorded at declaration, if any. Mirrors
    /// [`SymbolTable::lookup`]: the innermost scope containing the name
    /// decides, even when it recorded no type.
    pub fn lookup_type(&self, name: &str) -> Option<ChestType> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .and_then(|symbol| symbol.ty)
    }
}
