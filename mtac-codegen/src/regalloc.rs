//! Register Allocation
//!
//! Registers are handed out by two monotonic counters, one per register
//! class. Nothing is ever freed: the Nth allocation in a class always gets
//! register N. Once a class runs out, allocation fails instead of emitting
//! register names that do not exist on the hardware.
//!
//! The tracker also remembers which register each 3AC temporary was last
//! bound to, and which variable a register was loaded from, so later
//! references can reuse the resident value.

use crate::asm::{Reg, RegClass};
use log::trace;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegAllocError {
    #[error("No {class} registers left (limit {limit})")]
    OutOfRegisters { class: RegClass, limit: usize },
}

/// Counter-based register tracker with temp and variable bindings
#[derive(Debug, Clone, Default)]
pub struct RegisterTracker {
    /// Registers allocated so far in the general class
    general: usize,

    /// Registers allocated so far in the float class
    float: usize,

    /// 3AC temporary name to the register it was last bound to
    temp_bindings: HashMap<String, Reg>,

    /// Register to the variable it was loaded from
    register_sources: HashMap<Reg, String>,
}

impl RegisterTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next register of `class`
    pub fn allocate(&mut self, class: RegClass) -> Result<Reg, RegAllocError> {
        let counter = match class {
            RegClass::General => &mut self.general,
            RegClass::Float => &mut self.float,
        };

        let limit = class.capacity();
        if *counter >= limit {
            return Err(RegAllocError::OutOfRegisters { class, limit });
        }

        let reg = class.reg(*counter as u8);
        *counter += 1;
        trace!("Allocated {reg} ({class} count now {})", *counter);
        Ok(reg)
    }

    /// Number of registers allocated so far in `class`
    pub fn count(&self, class: RegClass) -> usize {
        match class {
            RegClass::General => self.general,
            RegClass::Float => self.float,
        }
    }

    /// The most recently allocated register of `class`
    pub fn last(&self, class: RegClass) -> Option<Reg> {
        self.nth_from_last(class, 0)
    }

    /// The second most recently allocated register of `class`
    pub fn second_last(&self, class: RegClass) -> Option<Reg> {
        self.nth_from_last(class, 1)
    }

    fn nth_from_last(&self, class: RegClass, n: usize) -> Option<Reg> {
        let count = self.count(class);
        if count > n {
            Some(class.reg((count - 1 - n) as u8))
        } else {
            None
        }
    }

    /// Bind a 3AC temporary to a register, replacing any earlier binding
    pub fn bind_temp(&mut self, temp: &str, reg: Reg) {
        trace!("Binding {temp} -> {reg}");
        self.temp_bindings.insert(temp.to_string(), reg);
    }

    /// The register a temporary is currently bound to
    pub fn temp_register(&self, temp: &str) -> Option<Reg> {
        self.temp_bindings.get(temp).copied()
    }

    /// Record that `reg` holds the value of `variable`
    pub fn bind_register_source(&mut self, reg: Reg, variable: &str) {
        self.register_sources.insert(reg, variable.to_string());
    }

    /// The variable `reg` was loaded from
    pub fn register_source(&self, reg: Reg) -> Option<&str> {
        self.register_sources.get(&reg).map(|s| s.as_str())
    }
}
