// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! `bnbridge` converts arbitrary-precision integers between a math library's
//! native bignum type and the sign-magnitude [`WireInteger`] consumed by an
//! ASN.1 layer, and bootstraps a process-wide handle to a cryptographic
//! service provider.
//!
//! The crate is organized as follows:
//! - [`bignum`] defines the capability traits a native bignum must provide.
//!   A software implementation based on [`num-bigint`] lives in
//!   [`bignum::num`].
//! - [`wire`] defines [`WireInteger`] and the two conversions between it and
//!   a [`bignum::Bignum`], as well as its DER encoding.
//! - [`mem`] provides the fallible allocation seam used to produce wire
//!   buffers.
//! - [`csp`] provides one-time, thread-safe bootstrap of a provider handle.
//!
//! This crate does not terminate the process on any failure. Errors that the
//! surrounding system must treat as fatal, such as a failure to bootstrap the
//! provider, are reported as [`csp::Unrecoverable`]; it is up to the binary's
//! entry point to act on them.
//!
//! [`WireInteger`]: wire::WireInteger
//! [`num-bigint`]: https://docs.rs/num-bigint

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![deny(warnings)]
#![deny(unused)]
#![deny(unsafe_code)]

extern crate alloc;

// Pull in the `log` crate under a name that's harder to reach by accident;
// see `debug.rs`.
#[cfg(feature = "log")]
extern crate log as __raw_log;

#[macro_use]
mod debug;
pub use debug::Error;

/// A [`core::result::Result`] whose error is wrapped in an [`Error`].
pub type Result<T, E> = core::result::Result<T, Error<E>>;

pub mod bignum;
pub mod mem;
pub mod wire;

#[cfg(feature = "std")]
pub mod csp;
