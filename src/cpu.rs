// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! CPU-visible register file
//!
//! - 16 general 8-bit registers V0..VF; VF doubles as the carry/borrow/collision flag
//! - 16-bit index register I
//! - 16-bit program counter, starting at the program load address
//!
//! The stack pointer lives with the stack itself (see [`crate::core::Stack`]).

use crate::core::Memory;

/// Index of the flag register
pub const VF: usize = 0xF;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
}

impl Registers {
    /// Create a register file at power-on state
    pub fn new() -> Self {
        Self {
            v: [0; 16],
            i: 0,
            pc: Memory::PROGRAM_START,
        }
    }

    /// Reset all registers
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Write the flag register. Callers do this last, after the result register.
    pub fn set_flag(&mut self, set: bool) {
        self.v[VF] = set as u8;
    }

    /// Read the flag register
    pub fn flag(&self) -> u8 {
        self.v[VF]
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
