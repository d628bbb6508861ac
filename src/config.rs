// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interpreter configuration
//!
//! With the `serde-spec` feature a [`Config`] can be read from YAML or JSON:
//!
//! ```yaml
//! profile: chip8
//! seed: 42
//! ```

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::quirks::Profile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-spec", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-spec", serde(default))]
pub struct Config {
    pub profile: Profile,
    /// Fixed seed for RND; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Config {
    /// Configuration for `profile` with an OS-seeded random source
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            seed: None,
        }
    }

    /// Fix the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the random source this configuration describes
    pub fn rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_os_rng()),
        }
    }
}

#[cfg(feature = "serde-spec")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "serde-spec")]
impl Config {
    /// Parse a YAML document
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parse a JSON document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_xochip_unseeded() {
        let cfg = Config::default();
        assert_eq!(cfg.profile, Profile::XoChip);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn seeded_rng_repeats() {
        let cfg = Config::new(Profile::Chip8).with_seed(99);
        let (mut a, mut b) = (cfg.rng(), cfg.rng());
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[cfg(feature = "serde-spec")]
    mod serde_spec {
        use super::super::*;
        use crate::quirks::Quirks;

        #[test]
        fn yaml_named_profile() {
            let cfg = Config::from_yaml("profile: chip8\nseed: 42\n").unwrap();
            assert_eq!(cfg, Config::new(Profile::Chip8).with_seed(42));
        }

        #[test]
        fn yaml_missing_fields_default() {
            let cfg = Config::from_yaml("seed: 1\n").unwrap();
            assert_eq!(cfg.profile, Profile::XoChip);
        }

        #[test]
        fn json_custom_profile() {
            let cfg = Config::from_json(r#"{"profile": {"custom": "SHIFT | LOGICAL"}}"#).unwrap();
            assert_eq!(cfg.profile, Profile::Custom(Quirks::SHIFT | Quirks::LOGICAL));
        }

        #[test]
        fn json_garbage_is_error() {
            assert!(matches!(
                Config::from_json("{\"profile\": 3}"),
                Err(ConfigError::Json(_))
            ));
        }
    }
}
