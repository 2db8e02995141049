// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Large magnitudes, for exercising multi-limb conversions.

/// Returns a deterministic, minimal big-endian magnitude of exactly `len`
/// bytes.
///
/// The leading byte is never zero, and the high bit alternates with `len`, so
/// that both sign-padding cases of two's complement encodings get covered.
pub fn magnitude(len: usize) -> Vec<u8> {
    let mut state = 0x9e37_79b9_u32 ^ len as u32;
    let mut out: Vec<u8> = (0..len)
        .map(|_| {
            // xorshift32.
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect();
    if let Some(first) = out.first_mut() {
        *first = if len % 2 == 0 { 0x80 | *first } else { 0x01 | (*first & 0x7f) };
    }
    out
}

/// The decimal expansion of `2^255 - 19`, the Curve25519 field prime.
pub const P25519_DECIMAL: &str =
    "57896044618658097711785492504343953926634992332820282019728792003956564819949";

/// The big-endian magnitude of [`P25519_DECIMAL`].
#[rustfmt::skip]
pub const P25519: &[u8] = &[
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xed,
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn magnitudes_are_minimal() {
        for len in 1..64 {
            let m = magnitude(len);
            assert_eq!(m.len(), len);
            assert_ne!(m[0], 0);
        }
        assert!(magnitude(0).is_empty());
    }
}
