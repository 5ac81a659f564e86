//! Arena-owned variable records and per-function scope tables.
//!
//! Nested branch contexts of one function all resolve a name to the same
//! `VarId`, so type observations made inside a branch are visible to the
//! ancestor merge logic without aliased mutable pointers.

use std::collections::HashMap;

use crate::types::Types;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

#[derive(Debug)]
pub struct Variable {
    pub name: String,
    /// Every kind this variable was ever assigned; grows monotonically.
    pub types: Types,
    /// The `Types` of the most recent right-hand side, consulted only for
    /// rendering the current occurrence.
    pub current_type: Types,
    /// Whether a declaration has already been emitted for this name.
    pub was_initialized: bool,
    /// First assigned inside a conditional branch; forces an upfront
    /// declaration immediately before the `if` so the branches can assign
    /// without re-declaring.
    pub from_if_else: bool,
}

impl Variable {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            types: Types::new(),
            current_type: Types::new(),
            was_initialized: false,
            from_if_else: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct VarArena {
    vars: Vec<Variable>,
}

impl VarArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, name: &str) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(Variable::new(name));
        id
    }

    pub fn get(&self, id: VarId) -> &Variable {
        &self.vars[id.0]
    }

    pub fn get_mut(&mut self, id: VarId) -> &mut Variable {
        &mut self.vars[id.0]
    }
}

/// Name lookup table for one function scope. Iteration follows insertion
/// order so the if/else pre-declaration walk is deterministic.
#[derive(Debug, Default)]
pub struct Scope {
    slots: Vec<VarId>,
    by_name: HashMap<String, VarId>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<VarId> {
        self.by_name.get(name).copied()
    }

    pub fn insert(&mut self, name: &str, id: VarId) {
        self.slots.push(id);
        self.by_name.insert(name.to_string(), id);
    }

    pub fn ids(&self) -> &[VarId] {
        &self.slots
    }
}
