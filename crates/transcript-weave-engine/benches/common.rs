// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use transcript_weave_engine::{DamageLevel, Leaf};

/// A line of `len` leaves whose damage and unclear runs cross every few signs.
#[allow(dead_code)]
pub fn generate_crossing_line(len: usize) -> Vec<Leaf> {
    (0..len)
        .map(|i| {
            let damage = match i % 7 {
                0 | 1 => None,
                2..=4 => Some(DamageLevel::Low),
                _ => Some(DamageLevel::Other),
            };
            Leaf::new(i, format!("s{i}"))
                .with_damage(damage)
                .with_unclear(i % 5 >= 2)
        })
        .collect()
}
