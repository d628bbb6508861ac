// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Compatibility flags
//!
//! Each flag selects the original COSMAC VIP behaviour for one group of
//! instructions where later variants diverged. A clear flag means the
//! modern behaviour.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde-spec", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde-spec", serde(transparent))]
    pub struct Quirks: u8 {
        /// 8XY6/8XYE copy VY into VX before shifting
        const SHIFT = 1 << 0;
        /// FX55/FX65 bump I after the transfer
        const STORE_LOAD = 1 << 1;
        /// BNNN adds V0 instead of VX
        const JUMP_OFFSET = 1 << 2;
        /// 8XY1/8XY2/8XY3 clear VF
        const LOGICAL = 1 << 3;
        /// DXYN waits for the next timer tick
        const DISPLAY_SYNC = 1 << 4;
        /// DXYN clips at screen edges instead of wrapping
        const DRAW_CLIP = 1 << 5;
    }
}

/// Instruction-set variant the interpreter emulates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-spec", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-spec", serde(rename_all = "kebab-case"))]
pub enum Profile {
    /// Original CHIP-8: every legacy flag
    Chip8,
    SuperChip,
    XoChip,
    Custom(Quirks),
}

impl Profile {
    pub fn quirks(self) -> Quirks {
        match self {
            Profile::Chip8 => Quirks::all(),
            Profile::SuperChip => Quirks::DRAW_CLIP,
            Profile::XoChip => Quirks::STORE_LOAD | Quirks::JUMP_OFFSET | Quirks::SHIFT,
            Profile::Custom(quirks) => quirks,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::XoChip
    }
}

impl From<Quirks> for Profile {
    fn from(quirks: Quirks) -> Self {
        Profile::Custom(quirks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn original_profile_is_all_legacy() {
        let q = Profile::Chip8.quirks();
        assert!(q.contains(Quirks::SHIFT | Quirks::STORE_LOAD | Quirks::JUMP_OFFSET));
        assert!(q.contains(Quirks::LOGICAL | Quirks::DISPLAY_SYNC | Quirks::DRAW_CLIP));
    }

    #[test]
    fn superchip_only_clips() {
        assert_eq!(Profile::SuperChip.quirks(), Quirks::DRAW_CLIP);
    }

    #[test]
    fn xochip_flags() {
        let q = Profile::XoChip.quirks();
        assert!(q.contains(Quirks::SHIFT));
        assert!(q.contains(Quirks::STORE_LOAD));
        assert!(q.contains(Quirks::JUMP_OFFSET));
        assert!(!q.contains(Quirks::LOGICAL));
        assert!(!q.contains(Quirks::DRAW_CLIP));
    }

    #[test]
    fn custom_passes_through() {
        let p: Profile = (Quirks::LOGICAL | Quirks::SHIFT).into();
        assert_eq!(p.quirks(), Quirks::LOGICAL | Quirks::SHIFT);
        assert_eq!(Profile::Custom(Quirks::empty()).quirks(), Quirks::empty());
    }
}
