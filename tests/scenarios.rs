// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

// End-to-end programs driven through the public API

use std::time::Duration;

use nexel8_core::timer::TICK_INTERVAL;
use nexel8_core::{Fault, Interpreter, KEY_COUNT, ManualClock, Profile, Quirks, Timers, Wait};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

const IDLE: [bool; KEY_COUNT] = [false; KEY_COUNT];

fn boot(profile: Profile, program: &[u8]) -> (Interpreter, ManualClock) {
    let clock = ManualClock::new();
    let mut interp = Interpreter::with_parts(
        profile,
        Box::new(clock.clone()),
        Box::new(StdRng::seed_from_u64(0x5EED)),
    );
    interp.load_program(program).expect("program fits");
    (interp, clock)
}

fn run(interp: &mut Interpreter, cycles: usize) {
    for _ in 0..cycles {
        interp.advance(&IDLE).expect("no fault");
    }
}

#[test]
fn set_then_add_immediate() {
    let (mut interp, _) = boot(Profile::XoChip, &[0x6A, 0x02, 0x7A, 0x05]);
    run(&mut interp, 2);
    assert_eq!(interp.registers().v[0xA], 7);
    assert_eq!(interp.registers().pc, 0x200 + 4);
}

#[test]
fn clear_and_draw_solid_row() {
    // CLS; LD I, 0x20A; LD V0, 0; DRW V0, V0, 1; JP 0x208; FF
    let program = [0x00, 0xE0, 0xA2, 0x0A, 0x60, 0x00, 0xD0, 0x01, 0x12, 0x08, 0xFF];
    let (mut interp, _) = boot(Profile::SuperChip, &program);
    run(&mut interp, 4);
    assert_eq!(&interp.display().pixels()[..8], &[1, 1, 1, 1, 1, 1, 1, 1]);
    assert_eq!(interp.display().lit_count(), 8);
    assert_eq!(interp.registers().flag(), 0);
}

#[test]
fn subroutine_round_trip() {
    // 200: CALL 0x206; 202: LD V1, 2; 204: JP 0x204; 206: LD V0, 1; 208: RET
    let program = [0x22, 0x06, 0x61, 0x02, 0x12, 0x04, 0x60, 0x01, 0x00, 0xEE];
    let (mut interp, _) = boot(Profile::XoChip, &program);
    run(&mut interp, 1);
    assert_eq!(interp.stack().frames(), &[0x202]);
    run(&mut interp, 3);
    assert_eq!(interp.registers().v[0], 1);
    assert_eq!(interp.registers().v[1], 2);
    assert_eq!(interp.stack().sp(), 0);
}

#[test]
fn key_release_resumes_execution() {
    // LD VC, K; LD V0, 0xAA
    let (mut interp, _) = boot(Profile::XoChip, &[0xFC, 0x0A, 0x60, 0xAA]);
    run(&mut interp, 3);
    assert_eq!(interp.wait_state(), Wait::Key);
    assert_eq!(interp.registers().pc, 0x202);

    let mut held = IDLE;
    held[0xE] = true;
    interp.advance(&held).unwrap();
    interp.advance(&held).unwrap();
    assert_eq!(interp.wait_state(), Wait::Key);

    interp.advance(&IDLE).unwrap();
    assert_eq!(interp.registers().v[0xC], 0xE);
    assert_eq!(interp.wait_state(), Wait::Running);

    interp.advance(&IDLE).unwrap();
    assert_eq!(interp.registers().pc, 0x204);
    assert_eq!(interp.registers().v[0], 0xAA);
}

#[test]
fn one_second_gap_decays_at_most_one_step() {
    // LD V0, 200; LD DT, V0; LD ST, V0; JP 0x206
    let program = [0x60, 200, 0xF0, 0x15, 0xF0, 0x18, 0x12, 0x06];
    let (mut interp, clock) = boot(Profile::XoChip, &program);
    run(&mut interp, 3);

    clock.advance(Duration::from_secs(1));
    run(&mut interp, 1);
    let timers = *interp.timers();
    assert!(timers.delay >= 200 - 60 && timers.delay < 200);
    assert_eq!(timers.delay, timers.sound);

    for _ in 0..300 {
        clock.advance(TICK_INTERVAL);
        run(&mut interp, 1);
    }
    assert_eq!(*interp.timers(), Timers::default());
}

#[test]
fn shift_quirk_selects_operand() {
    // LD V1, 0x01; LD V2, 0x80; SHL V1, V2
    let program = [0x61, 0x01, 0x62, 0x80, 0x81, 0x2E];

    let (mut legacy, _) = boot(Profile::Custom(Quirks::SHIFT), &program);
    run(&mut legacy, 3);
    assert_eq!(legacy.registers().v[1], 0x00);
    assert_eq!(legacy.registers().flag(), 1);

    let (mut modern, _) = boot(Profile::Custom(Quirks::empty()), &program);
    run(&mut modern, 3);
    assert_eq!(modern.registers().v[1], 0x02);
    assert_eq!(modern.registers().flag(), 0);
}

#[test]
fn bcd_then_load_back() {
    // LD V3, 137; LD I, 0x300; LD B, V3; LD V2, [I]
    let program = [0x63, 137, 0xA3, 0x00, 0xF3, 0x33, 0xF2, 0x65];
    let (mut interp, _) = boot(Profile::XoChip, &program);
    run(&mut interp, 4);
    assert_eq!(&interp.registers().v[..3], &[1, 3, 7]);
    // XO-CHIP profile bumps I after a load
    assert_eq!(interp.registers().i, 0x301);
}

#[test]
fn fault_stops_the_machine() {
    let (mut interp, _) = boot(Profile::XoChip, &[0x00, 0xEE]);
    let err = interp.advance(&IDLE).unwrap_err();
    assert!(matches!(err, Fault::Stack(_)));
    assert_eq!(interp.advance(&IDLE).unwrap_err(), err);
    assert!(interp.stats().halted);

    interp.reset();
    assert!(!interp.stats().halted);
}

#[test]
fn same_seed_same_random_stream() {
    // RND V0, 0xFF; RND V1, 0xFF; RND V2, 0xFF
    let program = [0xC0, 0xFF, 0xC1, 0xFF, 0xC2, 0xFF];
    let (mut a, _) = boot(Profile::XoChip, &program);
    let (mut b, _) = boot(Profile::XoChip, &program);
    run(&mut a, 3);
    run(&mut b, 3);
    assert_eq!(a.registers().v[..3], b.registers().v[..3]);
}

#[test]
fn chip8_draw_then_next_instruction() {
    // DRW V0, V0, 1; LD V1, 9 with the clock held still
    let (mut interp, _) = boot(Profile::Chip8, &[0xD0, 0x01, 0x61, 0x09]);
    run(&mut interp, 2);
    assert_eq!(interp.registers().v[1], 9);
    assert_eq!(interp.registers().pc, 0x204);
    assert_eq!(interp.wait_state(), Wait::Running);
}
