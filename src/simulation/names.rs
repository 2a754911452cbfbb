//! Name generation for creatures.
//!
//! Names are "First Last" pairs drawn from fixed word lists. The generator
//! remembers every name it has issued and appends a Roman numeral on
//! collision, so no two creatures of one ecosystem share a name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::noise::Noise;

const FIRST_NAMES: &[&str] = &[
    "Luna", "Nova", "Orion", "Atlas", "Vega", "Lyra", "Sirius", "Rigel", "Hydra", "Phoenix",
    "Draco", "Cetus", "Aries", "Leo", "Pavo", "Aquila",
];

const LAST_NAMES: &[&str] = &[
    "Star", "Nebula", "Comet", "Galaxy", "Quasar", "Pulsar", "Nova", "Storm", "Cloud", "Wind",
    "Rain", "Thunder", "Frost", "Flame",
];

/// Issues unique creature names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameGenerator {
    issued: HashMap<String, u32>,
}

impl NameGenerator {
    /// Creates a generator that has issued no names yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a fresh name, suffixed with a numeral if the base was used before.
    pub fn generate(&mut self, noise: &mut impl Noise) -> String {
        let first = FIRST_NAMES[noise.pick(FIRST_NAMES.len())];
        let last = LAST_NAMES[noise.pick(LAST_NAMES.len())];
        let base = format!("{first} {last}");

        let count = self.issued.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base} {}", roman(*count))
        }
    }
}

/// Roman numeral for `n >= 1`.
fn roman(mut n: u32) -> String {
    const TABLE: &[(u32, &str)] = &[
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut out = String::new();
    for &(value, symbol) in TABLE {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}
