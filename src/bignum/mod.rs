// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Pluggable arbitrary-precision integer traits.
//!
//! `bnbridge` does not do any big-integer arithmetic of its own. Instead, it
//! converts to and from whatever bignum type the surrounding cryptographic
//! code computes with. This module describes the small capability that such a
//! type must expose: exporting and importing a big-endian magnitude, and
//! reading and writing a sign flag.
//!
//! A software implementation based on the [`num-bigint`] crate is provided
//! under the [`num` module], controlled by the `num-bigint` feature flag.
//!
//! It is recommended to refer to the traits in this module with
//! partially-qualified names, such as `bignum::Bignum`.
//!
//! [`num-bigint`]: https://docs.rs/num-bigint
//! [`num` module]: num/index.html

use static_assertions::assert_obj_safe;

#[cfg(feature = "num-bigint")]
pub mod num;

/// An error returned by a bignum operation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Indicates that the bignum could not allocate internal storage for a
    /// value.
    OutOfMemory,

    /// Indicates an unspecified, internal error.
    Unspecified,
}

/// A mutable, arbitrary-precision, signed integer.
///
/// The magnitude is exchanged as unsigned big-endian bytes; the sign is
/// carried separately, and is never encoded into the magnitude bytes.
pub trait Bignum {
    /// Returns the minimal number of bytes needed to hold the magnitude of
    /// this value.
    ///
    /// This is zero if and only if the value is zero.
    fn num_bytes(&self) -> usize;

    /// Writes the magnitude of this value into `out` as big-endian bytes.
    ///
    /// `out` must be exactly [`Bignum::num_bytes()`] bytes long; in
    /// particular, no leading zero byte is ever written.
    fn write_magnitude(&self, out: &mut [u8]);

    /// Replaces this value with the non-negative integer whose big-endian
    /// magnitude is `bytes`.
    ///
    /// `bytes` may contain leading zeroes. On failure, the previous value may
    /// have been lost, but `self` remains a valid bignum.
    fn read_magnitude(&mut self, bytes: &[u8]) -> Result<(), Error>;

    /// Returns whether this value is strictly less than zero.
    fn is_negative(&self) -> bool;

    /// Sets the sign of this value without touching its magnitude.
    ///
    /// Zero has no sign: calling `set_negative(true)` on zero leaves it
    /// non-negative.
    fn set_negative(&mut self, negative: bool);
}
assert_obj_safe!(Bignum);

/// A factory for fresh [`Bignum`]s.
pub trait Builder {
    /// The bignum type this builder creates.
    type Bignum: Bignum;

    /// Creates a new bignum with value zero.
    fn new_bignum(&self) -> Result<Self::Bignum, Error>;
}
