// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Sign-magnitude wire integers, and conversion to and from native bignums.
//!
//! A [`WireInteger`] is the form in which the ASN.1 layer holds an integer: a
//! big-endian magnitude plus a separate sign flag. A [`bignum::Bignum`] is the
//! form cryptographic code computes with. This module converts between the
//! two, preserving both magnitude and sign:
//!
//! - [`to_wire()`] serializes a bignum into a freshly allocated
//!   `WireInteger`, whose buffer is owned by the caller.
//! - [`from_wire()`] parses a `WireInteger` into a freshly built bignum, and
//!   [`from_wire_into()`] parses it into an existing one.
//!
//! Both directions are pure: they retain no state between calls and may be
//! invoked concurrently on independent inputs.
//!
//! # Zero
//!
//! Zero is always encoded with an empty magnitude and a clear sign flag. On
//! the way in, any all-zero magnitude is zero, and a set sign flag on it
//! (a "negative zero") is ignored, so that the resulting bignum is a
//! non-negative zero.

use alloc::vec::Vec;

#[cfg(feature = "arbitrary-derive")]
use libfuzzer_sys::arbitrary::{self, Arbitrary};

use crate::bignum;
use crate::bignum::Bignum;
use crate::mem::Alloc;
use crate::mem::OutOfMemory;
use crate::Result;

pub mod der;

/// An error returned by a wire integer operation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Indicates that a buffer or bignum could not be allocated.
    OutOfMemory,

    /// Indicates that a bignum backend failed for a reason other than
    /// running out of memory.
    Unspecified,

    /// Indicates that an encoded integer was malformed or not minimally
    /// encoded.
    BadEncoding,

    /// Indicates that an output buffer was too small for an encoding.
    BufferExhausted,
}

impl From<OutOfMemory> for Error {
    fn from(_: OutOfMemory) -> Self {
        Self::OutOfMemory
    }
}

impl From<bignum::Error> for Error {
    fn from(e: bignum::Error) -> Self {
        match e {
            bignum::Error::OutOfMemory => Self::OutOfMemory,
            bignum::Error::Unspecified => Self::Unspecified,
        }
    }
}

impl From<untrusted::EndOfInput> for Error {
    fn from(_: untrusted::EndOfInput) -> Self {
        Self::BadEncoding
    }
}

debug_from!(Error => OutOfMemory, bignum::Error, untrusted::EndOfInput);

/// An arbitrary-precision integer in sign-magnitude form.
///
/// The magnitude is stored big-endian, with no sign bit embedded in it; its
/// length in bytes is [`WireInteger::len()`]. A zero-length magnitude denotes
/// zero.
///
/// `WireInteger`s produced by this crate are always minimally encoded, and
/// never encode a negative zero. `WireInteger`s built by hand with
/// [`WireInteger::new()`] are kept verbatim, and may contain leading zero
/// bytes or a negative zero; conversions accept both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary-derive", derive(Arbitrary))]
pub struct WireInteger {
    data: Vec<u8>,
    negative: bool,
}

impl WireInteger {
    /// Creates a new `WireInteger` from a big-endian magnitude and a sign.
    pub fn new(data: Vec<u8>, negative: bool) -> Self {
        Self { data, negative }
    }

    /// Creates a `WireInteger` with value zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns the length of the magnitude, in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether the magnitude is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns whether this integer is zero, i.e., whether every byte of its
    /// magnitude is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    /// Returns the big-endian magnitude.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the sign flag.
    ///
    /// This is the flag as stored; see [`WireInteger::is_negative()`] for
    /// the sign of the value itself.
    pub fn negative_flag(&self) -> bool {
        self.negative
    }

    /// Returns whether this integer is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    /// Splits this integer into its magnitude buffer and sign flag.
    pub fn into_parts(self) -> (Vec<u8>, bool) {
        (self.data, self.negative)
    }

    /// Parses this integer into a freshly built bignum.
    ///
    /// See [`from_wire()`].
    pub fn to_native<B: bignum::Builder>(
        &self,
        builder: &B,
    ) -> Result<B::Bignum, Error> {
        from_wire(self, builder)
    }
}

/// Serializes `bn` into a new [`WireInteger`].
///
/// The magnitude buffer is obtained from `alloc` and is exactly as long as
/// the minimal big-endian encoding of `|bn|`; zero yields an empty buffer.
/// The sign is recorded separately.
///
/// If the buffer cannot be allocated, `OutOfMemory` is returned and nothing
/// else happens; `bn` is never mutated.
pub fn to_wire<B: Bignum + ?Sized>(
    bn: &B,
    alloc: &impl Alloc,
) -> Result<WireInteger, Error> {
    let len = bn.num_bytes();
    let mut data = alloc.alloc_bytes(len).or_else(|e| fail!(Error::from(e)))?;
    bn.write_magnitude(&mut data);

    Ok(WireInteger {
        data,
        negative: len != 0 && bn.is_negative(),
    })
}

/// Parses `w` into a fresh bignum created by `builder`.
///
/// The magnitude is parsed as an unsigned big-endian integer, after which
/// the sign flag of `w` is applied. A negative zero becomes a non-negative
/// zero.
///
/// Fails if `builder` cannot create a bignum or the bignum cannot allocate
/// storage for the value.
pub fn from_wire<B: bignum::Builder>(
    w: &WireInteger,
    builder: &B,
) -> Result<B::Bignum, Error> {
    let mut bn = builder.new_bignum().or_else(|e| fail!(Error::from(e)))?;
    from_wire_into(w, &mut bn)?;
    Ok(bn)
}

/// Parses `w` into `dst`, reusing its storage.
///
/// This behaves like [`from_wire()`], except that the destination is
/// supplied by the caller, who keeps ownership of it even if parsing fails.
/// On failure, the value of `dst` is unspecified.
pub fn from_wire_into<B: Bignum + ?Sized>(
    w: &WireInteger,
    dst: &mut B,
) -> Result<(), Error> {
    dst.read_magnitude(&w.data)
        .or_else(|e| fail!(Error::from(e)))?;
    dst.set_negative(w.is_negative());
    Ok(())
}

/// Wire conversion helpers for any [`Bignum`].
#[extend::ext(name = BignumExt)]
pub impl<B: Bignum + ?Sized> B {
    /// Serializes this value into a new [`WireInteger`].
    ///
    /// See [`to_wire()`].
    fn to_wire<A: Alloc>(&self, alloc: &A) -> Result<WireInteger, Error> {
        to_wire(self, alloc)
    }

    /// Replaces this value with the one encoded by `w`.
    ///
    /// See [`from_wire_into()`].
    fn assign_wire(&mut self, w: &WireInteger) -> Result<(), Error> {
        from_wire_into(w, self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bignum::fake;
    use crate::mem::BoundedHeap;
    use crate::mem::Heap;

    #[test]
    fn zero_is_empty() {
        let bn = fake::Bytes::default();
        let w = to_wire(&bn, &Heap).unwrap();
        assert_eq!(w, WireInteger::zero());
        assert_eq!(w.len(), 0);
        assert!(!w.negative_flag());
    }

    #[test]
    fn sign_is_separate() {
        let bn = fake::Bytes {
            magnitude: vec![0x12, 0x34],
            negative: true,
            ..Default::default()
        };
        let w = to_wire(&bn, &Heap).unwrap();
        assert_eq!(w.data(), [0x12, 0x34]);
        assert!(w.is_negative());
    }

    #[test]
    fn to_wire_out_of_memory() {
        let bn = fake::Bytes {
            magnitude: vec![1; 64],
            ..Default::default()
        };
        let heap = BoundedHeap::new(63);
        let err = to_wire(&bn, &heap).unwrap_err();
        assert_eq!(err.into_inner(), Error::OutOfMemory);
        // Nothing was handed out.
        assert_eq!(heap.remaining(), 63);
        // ...and the source was not touched.
        assert_eq!(bn.magnitude, [1; 64]);
    }

    #[test]
    fn from_wire_builder_failure() {
        let w = WireInteger::new(vec![1], false);
        let err = from_wire(&w, &fake::Builder { refuse: true }).unwrap_err();
        assert_eq!(err.into_inner(), Error::OutOfMemory);
    }

    #[test]
    fn from_wire_into_parse_failure() {
        let w = WireInteger::new(vec![1], false);
        let mut dst = fake::Bytes {
            fail_reads: true,
            ..Default::default()
        };
        let err = from_wire_into(&w, &mut dst).unwrap_err();
        assert_eq!(*err.as_ref(), Error::OutOfMemory);
    }

    #[test]
    fn negative_zero_is_normalized() {
        let mut dst = fake::Bytes::default();
        from_wire_into(&WireInteger::new(vec![], true), &mut dst).unwrap();
        assert!(!dst.negative);

        from_wire_into(&WireInteger::new(vec![0, 0], true), &mut dst).unwrap();
        assert!(!dst.negative);
        assert!(dst.magnitude.is_empty());
    }

    #[test]
    fn wire_integer_accessors() {
        let w = WireInteger::new(vec![0, 0], true);
        assert_eq!(w.len(), 2);
        assert!(!w.is_empty());
        assert!(w.is_zero());
        assert!(w.negative_flag());
        assert!(!w.is_negative());
        assert_eq!(w.into_parts(), (vec![0, 0], true));
    }

    #[cfg(feature = "num-bigint")]
    mod num {
        use num_bigint::BigInt;
        use pretty_assertions::assert_eq;

        use super::*;
        use crate::bignum::num::Bignum;
        use crate::bignum::num::Builder;

        fn round_trip(bn: &Bignum) -> (WireInteger, Bignum) {
            let w = to_wire(bn, &Heap).unwrap();
            let back = from_wire(&w, &Builder).unwrap();
            (w, back)
        }

        #[test]
        fn two_fifty_six() {
            let w = WireInteger::new(vec![0x01, 0x00], false);
            let bn = from_wire(&w, &Builder).unwrap();
            assert_eq!(bn, Bignum::from(256i64));
            assert_eq!(to_wire(&bn, &Heap).unwrap(), w);
        }

        #[test]
        fn minus_one() {
            let w = to_wire(&Bignum::from(-1i64), &Heap).unwrap();
            assert_eq!(w, WireInteger::new(vec![0x01], true));
        }

        #[test]
        fn zero() {
            let w = to_wire(&Bignum::new(), &Heap).unwrap();
            assert_eq!(w, WireInteger::new(vec![], false));

            let bn = from_wire(&WireInteger::zero(), &Builder).unwrap();
            assert_eq!(bn, Bignum::new());
        }

        #[test]
        fn round_trips() {
            for len in [1, 2, 7, 8, 9, 31, 32, 33, 256, 512, 4096].iter() {
                let magnitude = testutil::data::integers::magnitude(*len);
                for &negative in [false, true].iter() {
                    let w = WireInteger::new(magnitude.clone(), negative);
                    let bn = from_wire(&w, &Builder).unwrap();
                    let (w2, bn2) = round_trip(&bn);
                    assert_eq!(w2, w, "len = {}, negative = {}", len, negative);
                    assert_eq!(bn2, bn);
                }
            }
        }

        #[test]
        fn round_trips_small_values() {
            for n in -1000i64..=1000 {
                let bn = Bignum::from(n);
                let (w, back) = round_trip(&bn);
                assert_eq!(back, bn);
                assert_eq!(w.is_negative(), n < 0);
                assert_eq!(w.is_empty(), n == 0);
            }
        }

        #[test]
        fn encoding_is_minimal() {
            for shift in 0..200u32 {
                let bn = Bignum::from(BigInt::from(1) << shift);
                let w = to_wire(&bn, &Heap).unwrap();
                assert_eq!(w.len(), shift as usize / 8 + 1);
                assert_ne!(w.data()[0], 0);
            }
        }

        #[test]
        fn sign_independence() {
            let pos = BigInt::parse_bytes(b"123456789abcdef0fedcba987654321", 16)
                .unwrap();
            let neg = -pos.clone();
            let pos = to_wire(&Bignum::from(pos), &Heap).unwrap();
            let neg = to_wire(&Bignum::from(neg), &Heap).unwrap();
            assert_eq!(pos.data(), neg.data());
            assert!(!pos.negative_flag());
            assert!(neg.negative_flag());
        }

        #[test]
        fn leading_zeroes_accepted() {
            let w = WireInteger::new(vec![0, 0, 0x01, 0x00], true);
            let bn = from_wire(&w, &Builder).unwrap();
            assert_eq!(bn, Bignum::from(-256i64));
            let w = to_wire(&bn, &Heap).unwrap();
            assert_eq!(w, WireInteger::new(vec![0x01, 0x00], true));
        }

        #[test]
        fn negative_zero() {
            let w = WireInteger::new(vec![], true);
            let bn = from_wire(&w, &Builder).unwrap();
            assert_eq!(bn, Bignum::new());
            assert_eq!(to_wire(&bn, &Heap).unwrap(), WireInteger::zero());
        }

        #[test]
        fn reuses_destination() {
            let mut dst = Bignum::from(-77i64);
            from_wire_into(&WireInteger::new(vec![0x05], false), &mut dst)
                .unwrap();
            assert_eq!(dst, Bignum::from(5i64));
        }

        #[test]
        fn extension_methods() {
            let mut bn = Bignum::from(-300i64);
            let w = bn.to_wire(&Heap).unwrap();
            assert_eq!(w, WireInteger::new(vec![0x01, 0x2c], true));

            bn.assign_wire(&WireInteger::new(vec![0x07], false)).unwrap();
            assert_eq!(bn, Bignum::from(7i64));
            assert_eq!(w.to_native(&Builder).unwrap(), Bignum::from(-300i64));
        }

        #[test]
        fn out_of_memory_is_atomic() {
            let bn = Bignum::from(BigInt::from(1) << 1000);
            let heap = BoundedHeap::new(100);
            assert_eq!(
                to_wire(&bn, &heap).unwrap_err().into_inner(),
                Error::OutOfMemory
            );
            assert_eq!(heap.remaining(), 100);
        }

        #[test]
        fn concurrent_conversions() {
            let handles = (0..8i64)
                .map(|i| {
                    std::thread::spawn(move || {
                        let bn = Bignum::from(BigInt::from(-i) << (i * 64));
                        let (_, back) = round_trip(&bn);
                        back == bn
                    })
                })
                .collect::<Vec<_>>();
            for h in handles {
                assert!(h.join().unwrap());
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_shape() {
        let w = WireInteger::new(vec![1, 0], true);
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"data":[1,0],"negative":true}"#);
        let back: WireInteger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }
}
