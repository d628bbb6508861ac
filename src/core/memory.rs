// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Flat 4KB working memory.
//!
//! Layout:
//!   0x000-0x04f  unused (interpreter area on the original hardware)
//!   0x050-0x09f  font glyphs, 16 x 5 bytes
//!   0x0a0-0x1ff  unused
//!   0x200-0xfff  program image

use thiserror::Error;

/// Bytes per font glyph (each glyph is 4 pixels wide, 5 rows tall)
pub const FONT_GLYPH_SIZE: u16 = 5;

pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("memory access out of range: 0x{addr:04X} (+{len})")]
    OutOfRange { addr: u16, len: usize },
    #[error("program image of {len} bytes exceeds the {capacity} bytes available")]
    ImageTooLarge { len: usize, capacity: usize },
}

pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    pub const SIZE: usize = 0x1000;
    pub const FONT_BASE: u16 = 0x050;
    pub const PROGRAM_START: u16 = 0x200;
    /// Largest address an index register may point at
    pub const ADDRESS_CEILING: u16 = 0x0FFF;

    /// Zeroed memory with the font table copied in
    pub fn new() -> Self {
        let mut bytes = vec![0u8; Self::SIZE].into_boxed_slice();
        let font = Self::FONT_BASE as usize;
        bytes[font..font + FONT.len()].copy_from_slice(&FONT);
        Self { bytes }
    }

    /// Address of the glyph for hex digit `digit` (only the low nibble counts)
    pub fn glyph_addr(digit: u8) -> u16 {
        Self::FONT_BASE + u16::from(digit & 0x0F) * FONT_GLYPH_SIZE
    }

    /// Copy a program image to 0x200
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), MemoryError> {
        let capacity = Self::SIZE - Self::PROGRAM_START as usize;
        if image.len() > capacity {
            return Err(MemoryError::ImageTooLarge {
                len: image.len(),
                capacity,
            });
        }
        self.slice_mut(Self::PROGRAM_START, image.len())?
            .copy_from_slice(image);
        Ok(())
    }

    /// Read a byte
    pub fn read_u8(&self, addr: u16) -> Result<u8, MemoryError> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(MemoryError::OutOfRange { addr, len: 1 })
    }

    /// Write a byte
    pub fn write_u8(&mut self, addr: u16, value: u8) -> Result<(), MemoryError> {
        let cell = self
            .bytes
            .get_mut(addr as usize)
            .ok_or(MemoryError::OutOfRange { addr, len: 1 })?;
        *cell = value;
        Ok(())
    }

    /// Read big-endian u16 (instruction words are stored high byte first)
    pub fn read_u16(&self, addr: u16) -> Result<u16, MemoryError> {
        let word = self.slice(addr, 2)?;
        Ok(u16::from_be_bytes([word[0], word[1]]))
    }

    /// Borrow `len` bytes starting at `addr`
    pub fn slice(&self, addr: u16, len: usize) -> Result<&[u8], MemoryError> {
        let start = addr as usize;
        self.bytes
            .get(start..start + len)
            .ok_or(MemoryError::OutOfRange { addr, len })
    }

    /// Mutably borrow `len` bytes starting at `addr`
    pub fn slice_mut(&mut self, addr: u16, len: usize) -> Result<&mut [u8], MemoryError> {
        let start = addr as usize;
        self.bytes
            .get_mut(start..start + len)
            .ok_or(MemoryError::OutOfRange { addr, len })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
