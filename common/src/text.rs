//! Small text helpers for fixed-capacity strings.
//!
//! Labels are built with these instead of `format!` so the core never
//! allocates and never fails on over-long input: text that does not fit is
//! cut at a char boundary.

use heapless::String;

/// Copy `src` into a new fixed-capacity string, truncating at capacity.
pub fn truncated<const N: usize>(src: &str) -> String<N> {
    let mut out: String<N> = String::new();
    push_truncated(&mut out, src);
    out
}

/// Append as much of `src` as fits.
pub fn push_truncated<const N: usize>(
    s: &mut String<N>,
    src: &str,
) {
    for c in src.chars() {
        if s.push(c).is_err() {
            break;
        }
    }
}

/// Push a u32 value to a heapless string (no format! macro).
pub fn push_u32<const N: usize>(
    s: &mut String<N>,
    mut val: u32,
) {
    if val == 0 {
        s.push('0').ok();
        return;
    }

    // Build digits in reverse
    let mut digits = [0u8; 10];
    let mut i = 0;
    while val > 0 {
        digits[i] = (val % 10) as u8;
        val /= 10;
        i += 1;
    }

    while i > 0 {
        i -= 1;
        s.push((b'0' + digits[i]) as char).ok();
    }
}
