// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use nexel8_core::{Interpreter, KEY_COUNT, ManualClock, Profile};
use rand::SeedableRng;
use rand::rngs::StdRng;

// Arithmetic, a sprite draw and a backwards jump, looping forever
#[rustfmt::skip]
const LOOP: [u8; 12] = [
    0x70, 0x01, // ADD V0, 1
    0x81, 0x04, // ADD V1, V0
    0xF0, 0x29, // LD F, V0
    0xD0, 0x15, // DRW V0, V1, 5
    0xC2, 0xFF, // RND V2, 0xFF
    0x12, 0x00, // JP 0x200
];

fn bench_advance(c: &mut Criterion) {
    let keys = [false; KEY_COUNT];
    c.bench_function("advance_1000_cycles", |b| {
        let mut interp = Interpreter::with_parts(
            Profile::XoChip,
            Box::new(ManualClock::new()),
            Box::new(StdRng::seed_from_u64(0)),
        );
        interp.load_program(&LOOP).unwrap();
        b.iter(|| {
            for _ in 0..1000 {
                interp.advance(black_box(&keys)).unwrap();
            }
        });
    });
}

criterion_group!(benches, bench_advance);
criterion_main!(benches);
