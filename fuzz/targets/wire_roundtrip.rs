// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Fuzz tests for the bignum bridge, starting from arbitrary, possibly
//! non-canonical, wire integers.

#![no_main]

use libfuzzer_sys::fuzz_target;

use bnbridge::bignum::num;
use bnbridge::mem::Heap;
use bnbridge::wire;
use bnbridge::wire::der;
use bnbridge::wire::WireInteger;

fuzz_target!(|w: WireInteger| {
    let bn = wire::from_wire(&w, &num::Builder).unwrap();
    let canonical = wire::to_wire(&bn, &Heap).unwrap();

    let start = w.data().iter().position(|&b| b != 0).unwrap_or(w.len());
    assert_eq!(canonical.data(), &w.data()[start..]);
    assert_eq!(canonical.negative_flag(), w.is_negative());

    let encoded = der::to_der(&w, &Heap).unwrap();
    assert_eq!(der::encoded_len(&w), encoded.len());
    assert_eq!(der::from_der(&encoded, &Heap).unwrap(), canonical);
});
