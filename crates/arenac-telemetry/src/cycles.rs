//! A cycle counter for the telemetry hook's budget checks.
//!
//! Uses the `RDTSC` instruction where available so the reading is a true
//! cycle count; everywhere else, degrades to a monotonic nanosecond clock
//! rather than failing to compile, per the spec's "budget check degrades
//! gracefully" note.

#[cfg(target_arch = "x86_64")]
#[must_use]
pub fn read_cycles() -> u64 {
    // SAFETY: RDTSC has no preconditions; it is always safe to execute on
    // x86_64.
    unsafe { std::arch::x86_64::_rdtsc() }
}

#[cfg(not(target_arch = "x86_64"))]
#[must_use]
pub fn read_cycles() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    let origin = ORIGIN.get_or_init(Instant::now);
    origin.elapsed().as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_are_monotonic_across_a_call() {
        let a = read_cycles();
        let b = read_cycles();
        assert!(b >= a);
    }
}
