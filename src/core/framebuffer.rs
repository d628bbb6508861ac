// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Monochrome 64x32 frame buffer, one byte per pixel (nonzero = lit)

use std::fmt;

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

pub struct FrameBuffer {
    cells: [u8; WIDTH * HEIGHT],
}

impl FrameBuffer {
    /// Create a blank frame
    pub fn new() -> Self {
        Self {
            cells: [0; WIDTH * HEIGHT],
        }
    }

    /// Switch every pixel off
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Row-major pixel data for the host to blit
    pub fn pixels(&self) -> &[u8] {
        &self.cells
    }

    /// One row of pixels
    pub fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// Is the pixel at (x, y) lit
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.cells[y * WIDTH + x] != 0
    }

    /// XOR one sprite bit into the cell at (x, y), which must be on screen.
    /// Returns true when a lit pixel was switched off.
    pub fn xor(&mut self, x: usize, y: usize, bit: bool) -> bool {
        let cell = &mut self.cells[y * WIDTH + x];
        let before = *cell != 0;
        let after = before ^ bit;
        *cell = after as u8;
        before && !after
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(WIDTH) {
            for &cell in row {
                f.write_str(if cell != 0 { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
