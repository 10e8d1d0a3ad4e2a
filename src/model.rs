//! The boolean decision-variable array `x[i,d,s]`, backed by a real CSP model.
//!
//! This module only owns variable allocation and indexing. Hard and soft
//! constraints are posted onto the model from [`crate::constraints`].

use selen::prelude::*;

use crate::domain::{Config, ShiftKind};

/// The `(employee, day, shift)` variable index, independent of the `Model`
/// that allocated it. `VarId` handles stay valid against any `Solution`
/// produced from that same model, so this can outlive the model itself
/// once the driver has consumed it for solving.
#[derive(Clone)]
pub struct VarIndex {
    vars: Vec<VarId>,
    num_employees: usize,
    num_days: usize,
}

impl VarIndex {
    /// The decision variable for employee `i`, day `d`, shift kind `s`.
    pub fn var(&self, i: usize, d: usize, s: ShiftKind) -> VarId {
        debug_assert!(i < self.num_employees && d < self.num_days);
        self.vars[(i * self.num_days + d) * 4 + s.code() as usize]
    }

    /// All four variables for one `(employee, day)` pair, in `ShiftKind::ALL` order.
    pub fn day_vars(&self, i: usize, d: usize) -> [VarId; 4] {
        ShiftKind::ALL.map(|s| self.var(i, d, s))
    }

    pub fn num_employees(&self) -> usize {
        self.num_employees
    }

    pub fn num_days(&self) -> usize {
        self.num_days
    }
}

/// Owns the solver's [`Model`] together with the variable index built over it.
pub struct VariableModel {
    pub model: Model,
    index: VarIndex,
}

impl VariableModel {
    pub fn new(config: &Config, mut model: Model) -> Self {
        let num_employees = config.num_employees();
        let num_days = config.num_days();
        let vars = model.bools(num_employees * num_days * 4);
        Self {
            model,
            index: VarIndex {
                vars,
                num_employees,
                num_days,
            },
        }
    }

    pub fn var(&self, i: usize, d: usize, s: ShiftKind) -> VarId {
        self.index.var(i, d, s)
    }

    pub fn day_vars(&self, i: usize, d: usize) -> [VarId; 4] {
        self.index.day_vars(i, d)
    }

    pub fn num_employees(&self) -> usize {
        self.index.num_employees()
    }

    pub fn num_days(&self) -> usize {
        self.index.num_days()
    }

    /// Splits off the `Model` (to hand to the solver, which consumes it) from
    /// the variable index (needed again afterwards to read the solution).
    pub fn into_parts(self) -> (Model, VarIndex) {
        (self.model, self.index)
    }
}
