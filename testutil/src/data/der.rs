// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Potentially invalid DER snippets for testing the `INTEGER` codec.

/// A DER `INTEGER` paired with the sign-magnitude value it encodes.
pub struct Vector {
    /// The full encoding, header included.
    pub der: &'static [u8],
    /// The minimal big-endian magnitude.
    pub magnitude: &'static [u8],
    /// Whether the value is negative.
    pub negative: bool,
}

/// Canonical encodings around the interesting sign and width boundaries.
#[rustfmt::skip]
pub const VECTORS: &[Vector] = &[
    // 0
    Vector { der: &[0x02, 0x01, 0x00], magnitude: &[], negative: false },
    // 1
    Vector { der: &[0x02, 0x01, 0x01], magnitude: &[0x01], negative: false },
    // 127
    Vector { der: &[0x02, 0x01, 0x7f], magnitude: &[0x7f], negative: false },
    // 128
    Vector { der: &[0x02, 0x02, 0x00, 0x80], magnitude: &[0x80], negative: false },
    // 256
    Vector { der: &[0x02, 0x02, 0x01, 0x00], magnitude: &[0x01, 0x00], negative: false },
    // 65535
    Vector { der: &[0x02, 0x03, 0x00, 0xff, 0xff], magnitude: &[0xff, 0xff], negative: false },
    // -1
    Vector { der: &[0x02, 0x01, 0xff], magnitude: &[0x01], negative: true },
    // -127
    Vector { der: &[0x02, 0x01, 0x81], magnitude: &[0x7f], negative: true },
    // -128
    Vector { der: &[0x02, 0x01, 0x80], magnitude: &[0x80], negative: true },
    // -129
    Vector { der: &[0x02, 0x02, 0xff, 0x7f], magnitude: &[0x81], negative: true },
    // -255
    Vector { der: &[0x02, 0x02, 0xff, 0x01], magnitude: &[0xff], negative: true },
    // -256
    Vector { der: &[0x02, 0x02, 0xff, 0x00], magnitude: &[0x01, 0x00], negative: true },
    // -32768
    Vector { der: &[0x02, 0x02, 0x80, 0x00], magnitude: &[0x80, 0x00], negative: true },
    // -32769
    Vector { der: &[0x02, 0x03, 0xff, 0x7f, 0xff], magnitude: &[0x80, 0x01], negative: true },
    // -65536
    Vector { der: &[0x02, 0x03, 0xff, 0x00, 0x00], magnitude: &[0x01, 0x00, 0x00], negative: true },
];

/// An `INTEGER` with no contents octets.
#[rustfmt::skip]
pub const EMPTY_CONTENTS: &[u8] = &[0x02, 0x00];

/// `1`, with a redundant leading zero.
#[rustfmt::skip]
pub const REDUNDANT_ZERO: &[u8] = &[0x02, 0x02, 0x00, 0x01];

/// `-1`, with a redundant leading `0xff`.
#[rustfmt::skip]
pub const REDUNDANT_ONES: &[u8] = &[0x02, 0x02, 0xff, 0xff];

/// `0`, encoded as two zero octets.
#[rustfmt::skip]
pub const DOUBLE_ZERO: &[u8] = &[0x02, 0x02, 0x00, 0x00];

/// `42`, tagged as an `OCTET STRING`.
#[rustfmt::skip]
pub const WRONG_TAG: &[u8] = &[0x04, 0x01, 0x2a];

/// `42`, with a long-form length that fits in short form.
#[rustfmt::skip]
pub const LONG_FORM_SHORT_LEN: &[u8] = &[0x02, 0x81, 0x01, 0x2a];

/// An `INTEGER` with an indefinite length.
#[rustfmt::skip]
pub const INDEFINITE_LEN: &[u8] = &[0x02, 0x80, 0x2a, 0x00, 0x00];

/// An `INTEGER` whose length claims more octets than are present.
#[rustfmt::skip]
pub const TRUNCATED: &[u8] = &[0x02, 0x03, 0x01, 0x02];

/// `42`, followed by a stray octet.
#[rustfmt::skip]
pub const TRAILING_DATA: &[u8] = &[0x02, 0x01, 0x2a, 0x00];

/// Two `INTEGER`s back to back: `5` and `-5`.
#[rustfmt::skip]
pub const TWO_INTEGERS: &[u8] = &[0x02, 0x01, 0x05, 0x02, 0x01, 0xfb];
