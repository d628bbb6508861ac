// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! 16-key hex keypad, sampled once per cycle

use bitvec::prelude::*;

pub const KEY_COUNT: usize = 16;

type KeyBits = BitArr!(for KEY_COUNT, in u16, Lsb0);

/// Current and previous-cycle key snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    current: KeyBits,
    previous: KeyBits,
}

impl Keypad {
    /// Create a keypad with no keys held
    pub fn new() -> Self {
        Self {
            current: BitArray::ZERO,
            previous: BitArray::ZERO,
        }
    }

    /// Shift the current snapshot into "previous" and take in the new one
    pub fn latch(&mut self, keys: &[bool; KEY_COUNT]) {
        self.previous = self.current;
        for (idx, &pressed) in keys.iter().enumerate() {
            self.current.set(idx, pressed);
        }
    }

    /// Only the low nibble of `key` selects a key
    pub fn is_pressed(&self, key: u8) -> bool {
        self.current[(key & 0x0F) as usize]
    }

    /// State of `key` in the previous snapshot
    pub fn was_pressed(&self, key: u8) -> bool {
        self.previous[(key & 0x0F) as usize]
    }

    /// Lowest-numbered key that went from pressed to released this cycle
    pub fn released(&self) -> Option<u8> {
        (0..KEY_COUNT)
            .find(|&idx| self.previous[idx] && !self.current[idx])
            .map(|idx| idx as u8)
    }

    /// Indices of keys held in the current snapshot
    pub fn pressed_keys(&self) -> impl Iterator<Item = u8> + '_ {
        self.current.iter_ones().map(|idx| idx as u8)
    }

    /// Release every key in both snapshots
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}
