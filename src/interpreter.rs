// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cycle driver
//!
//! The host calls [`Interpreter::advance`] once per tick with the current
//! key states. Each call, in order:
//!
//! 1. latches the keys (current snapshot becomes "previous")
//! 2. fetches and decodes the next word, unless waiting
//! 3. executes the current instruction (also while waiting for a key, so
//!    FX0A keeps polling)
//! 4. counts the delay/sound timers down if a 60 Hz period has passed
//!
//! The first fault latches: that call and every later one return it and
//! nothing else runs until [`Interpreter::reset`].

use log::{debug, error, trace};
use rand::RngCore;

use crate::config::Config;
use crate::core::{FrameBuffer, Memory, MemoryError, Stack};
use crate::cpu::Registers;
use crate::decode::Decoded;
use crate::isa::{InstructionTable, Op};
use crate::keypad::{KEY_COUNT, Keypad};
use crate::machine::{Fault, Machine, Wait};
use crate::quirks::{Profile, Quirks};
use crate::timer::{Clock, SystemClock, TickSource, Timers};

pub struct Interpreter {
    machine: Machine,
    table: InstructionTable,
    ticks: TickSource,
    current: Option<(Decoded, Op)>,
    previous: Option<Decoded>,
    fault: Option<Fault>,
    cycles: u64,
}

impl Interpreter {
    /// Wall-clock timers, OS-seeded RND
    pub fn new(profile: Profile) -> Self {
        Self::from_config(&Config::new(profile))
    }

    /// Create an interpreter from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::with_parts(config.profile, Box::new(SystemClock), config.rng())
    }

    /// Explicit time and random sources, for deterministic runs
    pub fn with_parts(profile: Profile, clock: Box<dyn Clock>, rng: Box<dyn RngCore>) -> Self {
        let quirks = profile.quirks();
        debug!("interpreter created: {profile:?}, quirks {quirks:?}");
        Self {
            machine: Machine::new(quirks, rng),
            table: InstructionTable::new(),
            ticks: TickSource::new(clock),
            current: None,
            previous: None,
            fault: None,
            cycles: 0,
        }
    }

    /// Copy a program image to the load address. Call before the first cycle.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), MemoryError> {
        self.machine.memory.load_program(image)?;
        debug!("loaded {} byte program at 0x{:03X}", image.len(), Memory::PROGRAM_START);
        Ok(())
    }

    /// Run one machine cycle
    pub fn advance(&mut self, keys: &[bool; KEY_COUNT]) -> Result<(), Fault> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }

        self.machine.keypad.latch(keys);
        if let Err(fault) = self.cycle() {
            error!(
                "halted at pc 0x{:03X} after {} cycles: {fault}",
                self.machine.regs.pc, self.cycles
            );
            self.fault = Some(fault.clone());
            return Err(fault);
        }

        if self.ticks.poll() {
            self.machine.timers.decay();
        }
        Ok(())
    }

    fn cycle(&mut self) -> Result<(), Fault> {
        if self.machine.wait == Wait::Running {
            self.fetch()?;
        }
        let Some((decoded, op)) = self.current else {
            return Ok(());
        };

        trace!(
            "pre  {decoded} {:<18} pc 0x{:03X} sp {}",
            op.mnemonic,
            self.machine.regs.pc,
            self.machine.stack.sp()
        );
        let waiting = self.machine.wait;
        op.execute(&mut self.machine, decoded)?;
        trace!(
            "post {decoded} {:<18} pc 0x{:03X} sp {}",
            op.mnemonic,
            self.machine.regs.pc,
            self.machine.stack.sp()
        );

        if waiting != self.machine.wait {
            debug!("{:?} -> {:?} on {decoded}", waiting, self.machine.wait);
        }
        self.cycles += 1;
        Ok(())
    }

    /// Read the word at PC, step PC past it and resolve it against the table
    fn fetch(&mut self) -> Result<(), Fault> {
        let pc = self.machine.regs.pc;
        let opcode = self.machine.memory.read_u16(pc)?;
        self.machine.regs.pc = pc.wrapping_add(2);

        let decoded = Decoded::new(opcode);
        let op = self.table.lookup(opcode)?;
        self.previous = self.current.map(|(d, _)| d);
        self.current = Some((decoded, op));
        Ok(())
    }

    /// Back to power-on state. Memory (font and program) is kept; a pending
    /// key wait or a latched fault is dropped.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.ticks.restart();
        self.current = None;
        self.previous = None;
        self.fault = None;
        self.cycles = 0;
        debug!("interpreter reset");
    }

    /// Get the frame buffer
    pub fn display(&self) -> &FrameBuffer {
        &self.machine.display
    }

    /// Get memory
    pub fn memory(&self) -> &Memory {
        &self.machine.memory
    }

    /// Get mutable memory
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.machine.memory
    }

    /// Get the register file
    pub fn registers(&self) -> &Registers {
        &self.machine.regs
    }

    /// Get the mutable register file
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.machine.regs
    }

    /// Get the return stack
    pub fn stack(&self) -> &Stack {
        &self.machine.stack
    }

    /// Get the delay and sound timers
    pub fn timers(&self) -> &Timers {
        &self.machine.timers
    }

    /// Get mutable timers
    pub fn timers_mut(&mut self) -> &mut Timers {
        &mut self.machine.timers
    }

    /// Get the latched key snapshots
    pub fn keypad(&self) -> &Keypad {
        &self.machine.keypad
    }

    /// Active compatibility flags
    pub fn quirks(&self) -> Quirks {
        self.machine.quirks
    }

    /// Whether fetching is suspended
    pub fn wait_state(&self) -> Wait {
        self.machine.wait
    }

    /// The latched fault, if the machine has halted
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Instruction executed (or re-executed) this cycle
    pub fn current_instruction(&self) -> Option<Decoded> {
        self.current.map(|(d, _)| d)
    }

    /// Instruction fetched before the current one
    pub fn previous_instruction(&self) -> Option<Decoded> {
        self.previous
    }

    /// Disassemble a word; `None` if the table has no entry for it
    pub fn mnemonic(&self, opcode: u16) -> Option<&'static str> {
        self.table.mnemonic(opcode)
    }

    /// Get execution statistics
    pub fn stats(&self) -> InterpreterStats {
        InterpreterStats {
            cycles: self.cycles,
            pc: self.machine.regs.pc,
            sp: self.machine.stack.sp(),
            waiting: self.machine.wait != Wait::Running,
            halted: self.fault.is_some(),
        }
    }
}

/// Execution statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterStats {
    pub cycles: u64,
    pub pc: u16,
    pub sp: usize,
    pub waiting: bool,
    pub halted: bool,
}
