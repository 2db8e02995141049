// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Implementations of [`bignum`] traits based on `num-bigint`.
//!
//! `num-bigint` aborts the process when its own allocations fail. Importing a
//! magnitude first checks, fallibly, that a digit buffer of the required size
//! can be reserved at all, and reports [`bignum::Error::OutOfMemory`] if not.
//! This is a pre-flight guard against oversized inputs, not a guarantee: the
//! allocation `num-bigint` then makes for the value itself may still abort.
//!
//! [`bignum`]: crate::bignum

use alloc::vec::Vec;

use num_bigint::BigInt;
use num_bigint::BigUint;
use num_bigint::Sign;

use crate::bignum;

/// A `num-bigint`-based [`bignum::Bignum`].
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bignum(BigInt);

impl Bignum {
    /// Creates a new `Bignum` with value zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the wrapped `BigInt`.
    pub fn as_inner(&self) -> &BigInt {
        &self.0
    }

    /// Unwraps this value into a `BigInt`.
    pub fn into_inner(self) -> BigInt {
        self.0
    }
}

impl From<BigInt> for Bignum {
    fn from(n: BigInt) -> Self {
        Self(n)
    }
}

impl From<i64> for Bignum {
    fn from(n: i64) -> Self {
        Self(BigInt::from(n))
    }
}

impl bignum::Bignum for Bignum {
    fn num_bytes(&self) -> usize {
        ((self.0.bits() + 7) / 8) as usize
    }

    fn write_magnitude(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.num_bytes());

        // Digits come out least-significant first; fill `out` from the back.
        // The most significant digit may carry more zero bytes than fit in
        // `out`, which is where this loop stops.
        let mut end = out.len();
        for digit in self.0.magnitude().iter_u64_digits() {
            for byte in digit.to_le_bytes().iter() {
                if end == 0 {
                    return;
                }
                end -= 1;
                out[end] = *byte;
            }
        }
    }

    fn read_magnitude(&mut self, bytes: &[u8]) -> Result<(), bignum::Error> {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        let bytes = &bytes[start..];

        // Sized for the widest digit `num-bigint` may use; released before
        // the real digits are allocated.
        let mut guard = Vec::<u64>::new();
        guard
            .try_reserve_exact((bytes.len() + 7) / 8)
            .map_err(|_| bignum::Error::OutOfMemory)?;
        drop(guard);

        let magnitude = BigUint::from_bytes_be(bytes);
        self.0 = BigInt::from_biguint(Sign::Plus, magnitude);
        Ok(())
    }

    fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    fn set_negative(&mut self, negative: bool) {
        let sign = match (self.0.sign(), negative) {
            (Sign::NoSign, _) => return,
            (_, true) => Sign::Minus,
            (_, false) => Sign::Plus,
        };
        if sign != self.0.sign() {
            self.0 = -core::mem::take(&mut self.0);
        }
    }
}

/// A `num-bigint`-based [`bignum::Builder`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Builder;

impl bignum::Builder for Builder {
    type Bignum = Bignum;

    fn new_bignum(&self) -> Result<Bignum, bignum::Error> {
        Ok(Bignum::new())
    }
}
