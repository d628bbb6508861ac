// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Opcode field extraction
//!
//! ```text
//!  F   X   Y   N
//! [15:12][11:8][7:4][3:0]
//!              [--NN--]
//!       [-----NNN-----]
//! ```

use std::fmt;

/// Fields of one 16-bit instruction word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoded {
    pub opcode: u16,
    pub x: usize,
    pub y: usize,
    pub n: u8,
    pub nn: u8,
    pub nnn: u16,
}

impl Decoded {
    pub const fn new(opcode: u16) -> Self {
        Self {
            opcode,
            x: ((opcode >> 8) & 0x000F) as usize,
            y: ((opcode >> 4) & 0x000F) as usize,
            n: (opcode & 0x000F) as u8,
            nn: (opcode & 0x00FF) as u8,
            nnn: opcode & 0x0FFF,
        }
    }

    /// Top nibble
    pub const fn family(&self) -> u8 {
        (self.opcode >> 12) as u8
    }
}

impl From<u16> for Decoded {
    fn from(opcode: u16) -> Self {
        Self::new(opcode)
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.opcode)
    }
}
