// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! DER `INTEGER` codec tests.
//!
//! These are hung off to the side to avoid cluttering the main der.rs.

use pretty_assertions::assert_eq;
use testutil::data::der as testdata;

use crate::mem::BoundedHeap;
use crate::mem::Heap;
use crate::wire::der;
use crate::wire::Error;
use crate::wire::WireInteger;

fn bad(input: &[u8]) -> Error {
    der::from_der(input, &Heap).unwrap_err().into_inner()
}

#[test]
fn vectors_parse() {
    for v in testdata::VECTORS {
        let w = der::from_der(v.der, &Heap).unwrap();
        assert_eq!(w.data(), v.magnitude, "{:02x?}", v.der);
        assert_eq!(w.negative_flag(), v.negative, "{:02x?}", v.der);
    }
}

#[test]
fn vectors_encode() {
    for v in testdata::VECTORS {
        let w = WireInteger::new(v.magnitude.to_vec(), v.negative);
        assert_eq!(der::encoded_len(&w), v.der.len());
        assert_eq!(der::to_der(&w, &Heap).unwrap(), v.der);
    }
}

#[test]
fn malformed() {
    assert_eq!(bad(testdata::EMPTY_CONTENTS), Error::BadEncoding);
    assert_eq!(bad(testdata::REDUNDANT_ZERO), Error::BadEncoding);
    assert_eq!(bad(testdata::REDUNDANT_ONES), Error::BadEncoding);
    assert_eq!(bad(testdata::DOUBLE_ZERO), Error::BadEncoding);
    assert_eq!(bad(testdata::WRONG_TAG), Error::BadEncoding);
    assert_eq!(bad(testdata::LONG_FORM_SHORT_LEN), Error::BadEncoding);
    assert_eq!(bad(testdata::INDEFINITE_LEN), Error::BadEncoding);
    assert_eq!(bad(testdata::TRUNCATED), Error::BadEncoding);
    assert_eq!(bad(testdata::TRAILING_DATA), Error::BadEncoding);
    assert_eq!(bad(&[]), Error::BadEncoding);
}

#[test]
fn sequential_parse() {
    let input = untrusted::Input::from(testdata::TWO_INTEGERS);
    let mut buf = untrusted::Reader::new(input);
    let five = der::parse(&mut buf, &Heap).unwrap();
    let minus_five = der::parse(&mut buf, &Heap).unwrap();
    assert!(buf.at_end());
    assert_eq!(five, WireInteger::new(vec![5], false));
    assert_eq!(minus_five, WireInteger::new(vec![5], true));
}

#[test]
fn negative_zero_encodes_as_zero() {
    let w = WireInteger::new(vec![], true);
    assert_eq!(der::to_der(&w, &Heap).unwrap(), [0x02, 0x01, 0x00]);
    let w = WireInteger::new(vec![0, 0], true);
    assert_eq!(der::to_der(&w, &Heap).unwrap(), [0x02, 0x01, 0x00]);
}

#[test]
fn leading_zeroes_are_dropped() {
    let w = WireInteger::new(vec![0, 0, 0x80], false);
    assert_eq!(der::to_der(&w, &Heap).unwrap(), [0x02, 0x02, 0x00, 0x80]);
    let w = WireInteger::new(vec![0, 0x81], true);
    assert_eq!(der::to_der(&w, &Heap).unwrap(), [0x02, 0x02, 0xff, 0x7f]);
}

#[test]
fn long_form_lengths() {
    for &len in &[127usize, 128, 255, 256, 4096] {
        let magnitude = testutil::data::integers::magnitude(len);
        for &negative in &[false, true] {
            let w = WireInteger::new(magnitude.clone(), negative);
            let encoded = der::to_der(&w, &Heap).unwrap();
            assert_eq!(encoded.len(), der::encoded_len(&w));
            let back = der::from_der(&encoded, &Heap).unwrap();
            assert_eq!(back, w, "len = {}, negative = {}", len, negative);
        }
    }
}

#[test]
fn long_form_header() {
    // 128 octets of magnitude with the high bit clear: 128 contents octets,
    // which need a one-octet long-form length.
    let mut magnitude = vec![0x11; 128];
    magnitude[0] = 0x7f;
    let encoded =
        der::to_der(&WireInteger::new(magnitude, false), &Heap).unwrap();
    assert_eq!(&encoded[..4], &[0x02, 0x81, 0x80, 0x7f]);
    assert_eq!(encoded.len(), 3 + 128);
}

#[test]
fn write_into_small_buffer() {
    let w = WireInteger::new(vec![0x01, 0x00], false);
    let mut out = [0; 3];
    assert_eq!(
        der::write(&w, &mut out).unwrap_err().into_inner(),
        Error::BufferExhausted
    );

    let mut out = [0xaa; 8];
    assert_eq!(der::write(&w, &mut out).unwrap(), 4);
    assert_eq!(out, [0x02, 0x02, 0x01, 0x00, 0xaa, 0xaa, 0xaa, 0xaa]);
}

#[test]
fn parse_out_of_memory() {
    let heap = BoundedHeap::new(1);
    let err = der::from_der(&[0x02, 0x02, 0x01, 0x00], &heap).unwrap_err();
    assert_eq!(err.into_inner(), Error::OutOfMemory);
}

#[cfg(feature = "num-bigint")]
#[test]
fn agrees_with_num_bigint() {
    use num_bigint::BigInt;

    use crate::bignum::num;
    use crate::wire;

    for n in -70_000i64..70_000 {
        let expected = BigInt::from(n).to_signed_bytes_be();
        let w = wire::to_wire(&num::Bignum::from(n), &Heap).unwrap();
        let encoded = der::to_der(&w, &Heap).unwrap();
        assert_eq!(&encoded[2..], &expected[..], "n = {}", n);

        let back = der::from_der(&encoded, &Heap).unwrap();
        let back = wire::from_wire(&back, &num::Builder).unwrap();
        assert_eq!(back, num::Bignum::from(n));
    }
}
