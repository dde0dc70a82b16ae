//! Randomness for the crayon's rough edge.
//!
//! Production jitter is deliberately non-reproducible; tests plug in a
//! [`FixedJitter`] or a seeded [`XorShiftJitter`].

/// A source of width jitter in `[-1.0, 1.0]`, drawn once per painted segment.
pub trait JitterSource {
    fn next_jitter(&mut self) -> f32;
}

/// Small xorshift32 generator. Not cryptographic, just cheap and uniform
/// enough for stroke texture.
#[derive(Debug, Clone)]
pub struct XorShiftJitter {
    state: u32,
}

impl XorShiftJitter {
    pub fn new(seed: u32) -> Self {
        // xorshift gets stuck at zero
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    /// Seeded from the wall clock where one exists.
    pub fn from_clock() -> Self {
        Self::new(clock_seed())
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl Default for XorShiftJitter {
    fn default() -> Self {
        Self::from_clock()
    }
}

impl JitterSource for XorShiftJitter {
    fn next_jitter(&mut self) -> f32 {
        let unit = self.next_u32() as f64 / u32::MAX as f64;
        (unit * 2.0 - 1.0) as f32
    }
}

/// Always returns the same offset, clamped to `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedJitter(pub f32);

impl JitterSource for FixedJitter {
    fn next_jitter(&mut self) -> f32 {
        self.0.clamp(-1.0, 1.0)
    }
}

/// Adapts a closure producing values in `[0, 1)` (e.g. `Math.random`).
pub struct UnitRandomJitter<F>(pub F);

impl<F: FnMut() -> f64> JitterSource for UnitRandomJitter<F> {
    fn next_jitter(&mut self) -> f32 {
        ((self.0)() * 2.0 - 1.0).clamp(-1.0, 1.0) as f32
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u32 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    (nanos as u32) ^ ((nanos >> 32) as u32)
}

// `SystemTime` panics on wasm32-unknown-unknown; the browser bridge passes
// its own `Math.random` source instead.
#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u32 {
    0x2545_F491
}
