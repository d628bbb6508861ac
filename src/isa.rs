// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Instruction table and instruction bodies.
//!
//! Opcodes are grouped into families by their top nibble. Each family
//! carries a mask; `opcode & mask` selects the instruction within the
//! family. Single-member families use a zero mask.
//!
//! | family | mask   | members                                  |
//! |--------|--------|------------------------------------------|
//! | 0      | 0x00FF | 00E0 CLS, 00EE RET, 0NNN SYS (unbound)   |
//! | 1..4,6,7,A..D | 0x0000 | one each                        |
//! | 5, 9   | 0x000F | 5XY0, 9XY0                               |
//! | 8      | 0x000F | 8XY0..8XY7, 8XYE                         |
//! | E      | 0x00FF | EX9E, EXA1                               |
//! | F      | 0x00FF | FX07 .. FX65                             |
//!
//! Compatibility quirks are not separate tables: the bodies below check
//! [`Quirks`] on the machine.

use std::collections::HashMap;

use crate::core::framebuffer::{HEIGHT, WIDTH};
use crate::core::Memory;
use crate::decode::Decoded;
use crate::machine::{Fault, Machine, Wait};
use crate::quirks::Quirks;

/// Instruction body
pub type Handler = fn(&mut Machine, Decoded) -> Result<(), Fault>;

/// A resolved table entry
#[derive(Clone, Copy)]
pub struct Op {
    pub mnemonic: &'static str,
    exec: Handler,
}

impl Op {
    pub fn execute(&self, machine: &mut Machine, decoded: Decoded) -> Result<(), Fault> {
        (self.exec)(machine, decoded)
    }
}

impl std::fmt::Debug for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Op").field("mnemonic", &self.mnemonic).finish()
    }
}

struct Family {
    mask: u16,
    ops: HashMap<u16, Op>,
}

/// (family, sub-opcode key, mask, mnemonic, body)
type Entry = (u8, u16, u16, &'static str, Handler);

#[rustfmt::skip]
const INSTRUCTIONS: &[Entry] = &[
    (0x0, 0xE0, 0x00FF, "CLS", cls),
    (0x0, 0xEE, 0x00FF, "RET", ret),
    (0x0, 0x00, 0x00FF, "SYS addr", unbound),
    (0x1, 0x00, 0x0000, "JP addr", jp),
    (0x2, 0x00, 0x0000, "CALL addr", call),
    (0x3, 0x00, 0x0000, "SE Vx, byte", se_byte),
    (0x4, 0x00, 0x0000, "SNE Vx, byte", sne_byte),
    (0x5, 0x00, 0x000F, "SE Vx, Vy", se_reg),
    (0x6, 0x00, 0x0000, "LD Vx, byte", ld_byte),
    (0x7, 0x00, 0x0000, "ADD Vx, byte", add_byte),
    (0x8, 0x00, 0x000F, "LD Vx, Vy", ld_reg),
    (0x8, 0x01, 0x000F, "OR Vx, Vy", or),
    (0x8, 0x02, 0x000F, "AND Vx, Vy", and),
    (0x8, 0x03, 0x000F, "XOR Vx, Vy", xor),
    (0x8, 0x04, 0x000F, "ADD Vx, Vy", add_reg),
    (0x8, 0x05, 0x000F, "SUB Vx, Vy", sub),
    (0x8, 0x06, 0x000F, "SHR Vx, Vy", shr),
    (0x8, 0x07, 0x000F, "SUBN Vx, Vy", subn),
    (0x8, 0x0E, 0x000F, "SHL Vx, Vy", shl),
    (0x9, 0x00, 0x000F, "SNE Vx, Vy", sne_reg),
    (0xA, 0x00, 0x0000, "LD I, addr", ld_i),
    (0xB, 0x00, 0x0000, "JP V0, addr", jp_offset),
    (0xC, 0x00, 0x0000, "RND Vx, byte", rnd),
    (0xD, 0x00, 0x0000, "DRW Vx, Vy, nibble", drw),
    (0xE, 0x9E, 0x00FF, "SKP Vx", skp),
    (0xE, 0xA1, 0x00FF, "SKNP Vx", sknp),
    (0xF, 0x07, 0x00FF, "LD Vx, DT", ld_from_dt),
    (0xF, 0x0A, 0x00FF, "LD Vx, K", wait_key),
    (0xF, 0x15, 0x00FF, "LD DT, Vx", ld_dt),
    (0xF, 0x18, 0x00FF, "LD ST, Vx", ld_st),
    (0xF, 0x1E, 0x00FF, "ADD I, Vx", add_i),
    (0xF, 0x29, 0x00FF, "LD F, Vx", ld_glyph),
    (0xF, 0x33, 0x00FF, "LD B, Vx", bcd),
    (0xF, 0x55, 0x00FF, "LD [I], Vx", store),
    (0xF, 0x65, 0x00FF, "LD Vx, [I]", load),
];

/// Two-level family -> sub-opcode dispatch table, immutable after construction
pub struct InstructionTable {
    families: [Option<Family>; 16],
}

impl InstructionTable {
    pub fn new() -> Self {
        let mut table = Self {
            families: std::array::from_fn(|_| None),
        };
        for &(family, key, mask, mnemonic, exec) in INSTRUCTIONS {
            table.register(family, key, mask, Op { mnemonic, exec });
        }
        table
    }

    fn register(&mut self, family: u8, key: u16, mask: u16, op: Op) {
        let slot = self.families[family as usize].get_or_insert_with(|| Family {
            mask,
            ops: HashMap::new(),
        });
        debug_assert_eq!(slot.mask, mask, "family {family:X} registered with two masks");
        slot.ops.insert(key, op);
    }

    /// Resolve an opcode; a miss at either level is a fault
    pub fn lookup(&self, opcode: u16) -> Result<Op, Fault> {
        let family = self.families[(opcode >> 12) as usize]
            .as_ref()
            .ok_or(Fault::Unimplemented(opcode))?;
        family
            .ops
            .get(&(opcode & family.mask))
            .copied()
            .ok_or(Fault::Unimplemented(opcode))
    }

    pub fn mnemonic(&self, opcode: u16) -> Option<&'static str> {
        self.lookup(opcode).ok().map(|op| op.mnemonic)
    }

    /// Number of bound instruction patterns
    pub fn len(&self) -> usize {
        self.families.iter().flatten().map(|f| f.ops.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InstructionTable {
    fn default() -> Self {
        Self::new()
    }
}

fn unbound(_: &mut Machine, d: Decoded) -> Result<(), Fault> {
    Err(Fault::Unimplemented(d.opcode))
}

fn cls(m: &mut Machine, _: Decoded) -> Result<(), Fault> {
    m.display.clear();
    Ok(())
}

fn ret(m: &mut Machine, _: Decoded) -> Result<(), Fault> {
    m.regs.pc = m.stack.pop()?;
    Ok(())
}

fn jp(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.regs.pc = d.nnn;
    Ok(())
}

fn call(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.stack.push(m.regs.pc)?;
    m.regs.pc = d.nnn;
    Ok(())
}

fn se_byte(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.skip_if(m.regs.v[d.x] == d.nn);
    Ok(())
}

fn sne_byte(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.skip_if(m.regs.v[d.x] != d.nn);
    Ok(())
}

fn se_reg(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.skip_if(m.regs.v[d.x] == m.regs.v[d.y]);
    Ok(())
}

fn sne_reg(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.skip_if(m.regs.v[d.x] != m.regs.v[d.y]);
    Ok(())
}

fn ld_byte(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.regs.v[d.x] = d.nn;
    Ok(())
}

// no carry out
fn add_byte(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.regs.v[d.x] = m.regs.v[d.x].wrapping_add(d.nn);
    Ok(())
}

fn ld_reg(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.regs.v[d.x] = m.regs.v[d.y];
    Ok(())
}

fn logical(m: &mut Machine, d: Decoded, f: fn(u8, u8) -> u8) -> Result<(), Fault> {
    m.regs.v[d.x] = f(m.regs.v[d.x], m.regs.v[d.y]);
    if m.quirks.contains(Quirks::LOGICAL) {
        m.regs.set_flag(false);
    }
    Ok(())
}

fn or(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    logical(m, d, |a, b| a | b)
}

fn and(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    logical(m, d, |a, b| a & b)
}

fn xor(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    logical(m, d, |a, b| a ^ b)
}

fn add_reg(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    let sum = u16::from(m.regs.v[d.x]) + u16::from(m.regs.v[d.y]);
    m.regs.v[d.x] = sum as u8;
    m.regs.set_flag(sum > 0xFF);
    Ok(())
}

/// VF = 1 only for a strictly positive difference; equal operands give 0.
/// This is not the usual no-borrow (`a >= b`) convention.
fn subtract(m: &mut Machine, d: Decoded, minuend: u8, subtrahend: u8) -> Result<(), Fault> {
    let diff = i16::from(minuend) - i16::from(subtrahend);
    m.regs.v[d.x] = diff as u8;
    m.regs.set_flag(diff > 0);
    Ok(())
}

fn sub(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    let (vx, vy) = (m.regs.v[d.x], m.regs.v[d.y]);
    subtract(m, d, vx, vy)
}

fn subn(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    let (vx, vy) = (m.regs.v[d.x], m.regs.v[d.y]);
    subtract(m, d, vy, vx)
}

fn shift_operand(m: &mut Machine, d: Decoded) -> u8 {
    if m.quirks.contains(Quirks::SHIFT) {
        m.regs.v[d.x] = m.regs.v[d.y];
    }
    m.regs.v[d.x]
}

fn shr(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    let value = shift_operand(m, d);
    m.regs.v[d.x] = value >> 1;
    m.regs.set_flag(value & 0x01 != 0);
    Ok(())
}

fn shl(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    let value = shift_operand(m, d);
    m.regs.v[d.x] = value << 1;
    m.regs.set_flag(value & 0x80 != 0);
    Ok(())
}

fn ld_i(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.regs.i = d.nnn;
    Ok(())
}

fn jp_offset(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    let offset = if m.quirks.contains(Quirks::JUMP_OFFSET) {
        m.regs.v[0]
    } else {
        m.regs.v[d.x]
    };
    m.regs.pc = d.nnn + u16::from(offset);
    Ok(())
}

fn rnd(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.regs.v[d.x] = m.random_byte() & d.nn;
    Ok(())
}

/// XOR an 8xN sprite from [I] onto the screen. The origin always wraps;
/// pixels past the right or bottom edge wrap too unless DRAW_CLIP or
/// DISPLAY_SYNC is set, in which case they are dropped. VF reports whether
/// any lit pixel was switched off anywhere in the sprite.
fn drw(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    let clip = m.quirks.intersects(Quirks::DRAW_CLIP | Quirks::DISPLAY_SYNC);
    let origin_x = m.regs.v[d.x] as usize % WIDTH;
    let origin_y = m.regs.v[d.y] as usize % HEIGHT;
    let sprite = m.memory.slice(m.regs.i, d.n as usize)?;

    let mut erased = false;
    for (row, &bits) in sprite.iter().enumerate() {
        let y = origin_y + row;
        if clip && y >= HEIGHT {
            continue;
        }
        for col in 0..8 {
            let x = origin_x + col;
            if clip && x >= WIDTH {
                continue;
            }
            let bit = bits & (0x80 >> col) != 0;
            erased |= m.display.xor(x % WIDTH, y % HEIGHT, bit);
        }
    }
    m.regs.set_flag(erased);
    Ok(())
}

fn skp(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.skip_if(m.keypad.is_pressed(m.regs.v[d.x]));
    Ok(())
}

fn sknp(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.skip_if(!m.keypad.is_pressed(m.regs.v[d.x]));
    Ok(())
}

fn ld_from_dt(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.regs.v[d.x] = m.timers.delay;
    Ok(())
}

/// Completes on a pressed -> released transition; otherwise the
/// interpreter stops fetching and runs this again next cycle.
fn wait_key(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    match m.keypad.released() {
        Some(key) => {
            m.regs.v[d.x] = key;
            m.wait = Wait::Running;
        }
        None => m.wait = Wait::Key,
    }
    Ok(())
}

fn ld_dt(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.timers.delay = m.regs.v[d.x];
    Ok(())
}

fn ld_st(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.timers.sound = m.regs.v[d.x];
    Ok(())
}

fn add_i(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    let sum = u32::from(m.regs.i) + u32::from(m.regs.v[d.x]);
    m.regs.i = sum as u16;
    m.regs.set_flag(sum > u32::from(Memory::ADDRESS_CEILING));
    Ok(())
}

// absolute glyph address, not an add onto I
fn ld_glyph(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    m.regs.i = Memory::glyph_addr(m.regs.v[d.x]);
    Ok(())
}

fn bcd(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    let value = u16::from(m.regs.v[d.x]);
    let digits = [
        (value % 1000 / 100) as u8,
        (value % 100 / 10) as u8,
        (value % 10) as u8,
    ];
    m.memory.slice_mut(m.regs.i, 3)?.copy_from_slice(&digits);
    Ok(())
}

fn store(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    let count = d.x + 1;
    m.memory
        .slice_mut(m.regs.i, count)?
        .copy_from_slice(&m.regs.v[..count]);
    if m.quirks.contains(Quirks::STORE_LOAD) {
        m.regs.i = m.regs.i.wrapping_add(1);
    }
    Ok(())
}

fn load(m: &mut Machine, d: Decoded) -> Result<(), Fault> {
    let count = d.x + 1;
    let src = m.memory.slice(m.regs.i, count)?;
    m.regs.v[..count].copy_from_slice(src);
    if m.quirks.contains(Quirks::STORE_LOAD) {
        m.regs.i = m.regs.i.wrapping_add(1);
    }
    Ok(())
}
