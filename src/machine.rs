// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Machine state as seen by instruction bodies.
//!
//! Everything an instruction may touch lives here and is passed explicitly
//! to the handlers in [`crate::isa`]; the instruction table itself and the
//! timing source stay with the [`crate::Interpreter`].

use rand::RngCore;
use thiserror::Error;

use crate::core::{FrameBuffer, Memory, MemoryError, Stack, StackError};
use crate::cpu::Registers;
use crate::keypad::Keypad;
use crate::quirks::Quirks;
use crate::timer::Timers;

/// Fatal machine faults. The interpreter stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("unimplemented instruction 0x{0:04X}")]
    Unimplemented(u16),
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error(transparent)]
    Stack(#[from] StackError),
}

/// Why the interpreter is not fetching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Wait {
    #[default]
    Running,
    /// FX0A re-runs every cycle until a key is released
    Key,
}

pub struct Machine {
    pub memory: Memory,
    pub stack: Stack,
    pub display: FrameBuffer,
    pub regs: Registers,
    pub timers: Timers,
    pub keypad: Keypad,
    pub quirks: Quirks,
    pub wait: Wait,
    pub(crate) rng: Box<dyn RngCore>,
}

impl Machine {
    /// Create a machine with fresh memory and the given flags
    pub fn new(quirks: Quirks, rng: Box<dyn RngCore>) -> Self {
        Self {
            memory: Memory::new(),
            stack: Stack::new(),
            display: FrameBuffer::new(),
            regs: Registers::new(),
            timers: Timers::default(),
            keypad: Keypad::new(),
            quirks,
            wait: Wait::Running,
            rng,
        }
    }

    /// Power-on state for everything except memory
    pub fn reset(&mut self) {
        self.stack.clear();
        self.display.clear();
        self.regs.reset();
        self.timers = Timers::default();
        self.keypad.clear();
        self.wait = Wait::Running;
    }

    /// Next byte from the random source
    pub fn random_byte(&mut self) -> u8 {
        (self.rng.next_u32() & 0xFF) as u8
    }

    /// Skip the next instruction word
    pub fn skip_if(&mut self, condition: bool) {
        if condition {
            self.regs.pc = self.regs.pc.wrapping_add(2);
        }
    }
}
