//! Colonist names

use crate::components::Name;
use rand::Rng;

static FIRST_NAMES: &[&str] = &["Bigweld", "Bender", "Fender", "Lugnut", "Crank", "Piper"];

static LAST_NAMES: &[&str] = &[
    "Boltbrain",
    "Geargrinder",
    "Copperbottom",
    "T. Ratchet",
    "Gasket",
    "Pinwheeler",
];

/// Generate a random colonist name
pub fn generate_name(rng: &mut impl Rng) -> Name {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    Name(format!("{} {}", first, last))
}
