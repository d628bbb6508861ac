// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

// Headless demo runner: nexel8 [ROM] [CYCLES]
use anyhow::{Context, Result};
use nexel8_core::{Config, Interpreter, KEY_COUNT};

const DEFAULT_CYCLES: u64 = 200;

// Draws the digits 0-9 along the top of the screen, then spins
#[rustfmt::skip]
const DEMO_PROGRAM: [u8; 20] = [
    0x60, 0x00, // LD V0, 0      digit
    0x61, 0x01, // LD V1, 1      x
    0x62, 0x01, // LD V2, 1      y
    0xF0, 0x29, // LD F, V0
    0xD1, 0x25, // DRW V1, V2, 5
    0x70, 0x01, // ADD V0, 1
    0x71, 0x06, // ADD V1, 6
    0x30, 0x0A, // SE V0, 10
    0x12, 0x06, // JP 0x206
    0x12, 0x12, // JP 0x212
];

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom = args.next();
    let cycles = match args.next() {
        Some(text) => text
            .parse::<u64>()
            .with_context(|| format!("invalid cycle count {text:?}"))?,
        None => DEFAULT_CYCLES,
    };

    println!("Nexel-8 Interpreter v0.1.0");
    println!("==========================");
    println!();

    let image = match &rom {
        Some(path) => std::fs::read(path).with_context(|| format!("reading ROM {path}"))?,
        None => DEMO_PROGRAM.to_vec(),
    };

    let config = Config::default();
    let mut interpreter = Interpreter::from_config(&config);
    interpreter
        .load_program(&image)
        .context("loading program image")?;
    println!(
        "Loaded {} ({} bytes), profile {:?}",
        rom.as_deref().unwrap_or("built-in demo"),
        image.len(),
        config.profile
    );

    let keys = [false; KEY_COUNT];
    for _ in 0..cycles {
        if let Err(fault) = interpreter.advance(&keys) {
            println!("Stopped: {fault}");
            break;
        }
    }

    println!();
    print!("{}", interpreter.display());
    println!();

    let stats = interpreter.stats();
    println!("Final state:");
    println!("  PC:      0x{:03X}", stats.pc);
    println!("  I:       0x{:03X}", interpreter.registers().i);
    println!("  SP:      {}", stats.sp);
    println!("  Cycles:  {}", stats.cycles);
    println!("  Waiting: {}", stats.waiting);
    println!("  Halted:  {}", stats.halted);
    Ok(())
}
