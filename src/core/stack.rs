// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Call stack, kept outside working memory.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("stack overflow (depth {0})")]
    Overflow(usize),
    #[error("return with empty stack")]
    Underflow,
}

pub struct Stack {
    slots: Box<[u16]>,
    sp: usize,
}

impl Stack {
    pub const DEPTH: usize = 0x400;

    /// Create an empty stack
    pub fn new() -> Self {
        Self {
            slots: vec![0; Self::DEPTH].into_boxed_slice(),
            sp: 0,
        }
    }

    /// Push a return address
    pub fn push(&mut self, addr: u16) -> Result<(), StackError> {
        let slot = self
            .slots
            .get_mut(self.sp)
            .ok_or(StackError::Overflow(Self::DEPTH))?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    /// Pop the most recent return address
    pub fn pop(&mut self) -> Result<u16, StackError> {
        self.sp = self.sp.checked_sub(1).ok_or(StackError::Underflow)?;
        Ok(self.slots[self.sp])
    }

    /// Stack pointer: number of return addresses currently held
    pub fn sp(&self) -> usize {
        self.sp
    }

    /// Live entries, oldest first
    pub fn frames(&self) -> &[u16] {
        &self.slots[..self.sp]
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.slots.fill(0);
        self.sp = 0;
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
