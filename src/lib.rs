// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Nexel-8 interpreter core
//!
//! Runs programs for the CHIP-8 family of 8-bit instruction sets (original
//! CHIP-8, SUPER-CHIP and XO-CHIP compatibility profiles), one machine
//! cycle per [`Interpreter::advance`] call. Windowing, audio, input mapping
//! and frame pacing are left to the host.

pub mod config;
pub mod core;
pub mod cpu;
pub mod decode;
pub mod interpreter;
pub mod isa;
pub mod keypad;
pub mod machine;
pub mod quirks;
pub mod timer;

// Re-export commonly used types
pub use config::Config;
pub use crate::core::{FrameBuffer, Memory, MemoryError, Stack, StackError};
pub use cpu::Registers;
pub use decode::Decoded;
pub use interpreter::{Interpreter, InterpreterStats};
pub use keypad::{KEY_COUNT, Keypad};
pub use machine::{Fault, Wait};
pub use quirks::{Profile, Quirks};
pub use timer::{Clock, ManualClock, SystemClock, Timers};
