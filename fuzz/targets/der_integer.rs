// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Fuzz tests for the DER `INTEGER` parser, feeding whatever it accepts
//! through the bignum bridge and back.

#![no_main]

use libfuzzer_sys::fuzz_target;

use bnbridge::bignum::num;
use bnbridge::mem::Heap;
use bnbridge::wire;
use bnbridge::wire::der;

fuzz_target!(|data: &[u8]| {
    let parsed = match der::from_der(data, &Heap) {
        Ok(w) => w,
        Err(_) => return,
    };

    let bn = wire::from_wire(&parsed, &num::Builder).unwrap();
    let back = wire::to_wire(&bn, &Heap).unwrap();
    assert_eq!(back, parsed);

    // The parser only accepts DER, so re-encoding must be lossless.
    assert_eq!(der::to_der(&back, &Heap).unwrap(), data);
});
