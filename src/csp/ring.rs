// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! A software [`csp::Module`] based on `ring`.
//!
//! The [`ring` warranty disclaimer] applies to this module as well.
//!
//! [`csp::Module`]: super::Module
//! [`ring` warranty disclaimer]: https://github.com/briansmith/ring/blob/main/README.md

use core::sync::atomic::AtomicUsize;
use core::sync::atomic::Ordering;

use ring::digest;
use ring::rand::SecureRandom as _;
use ring::rand::SystemRandom;

use crate::csp;
use crate::csp::Handle;
use crate::csp::Options;
use crate::mem::Alloc;

/// SHA-256("abc"), from FIPS 180-2, Appendix B.1.
const SHA256_ABC: [u8; 32] = [
    0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde,
    0x5d, 0xae, 0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c,
    0xb4, 0x10, 0xff, 0x61, 0xf2, 0x00, 0x15, 0xad,
];

/// A software CSP, backed by `ring` and OS-supplied entropy.
///
/// - Initialization requires a caller built against major version 2 and
///   checks that the OS entropy source is usable.
/// - Loading runs a SHA-256 known-answer test, in a scratch buffer obtained
///   from the bootstrap allocator.
/// - Attaching hands out a fresh handle on every call; a [`csp::Bootstrap`]
///   only ever calls it once.
pub struct SoftCsp {
    next_handle: AtomicUsize,
}

impl SoftCsp {
    /// The interface version this module implements.
    pub const VERSION: csp::Version = csp::Version { major: 2, minor: 0 };

    /// Creates a new, unloaded `SoftCsp`.
    pub const fn new() -> Self {
        Self {
            next_handle: AtomicUsize::new(1),
        }
    }
}

impl Default for SoftCsp {
    fn default() -> Self {
        Self::new()
    }
}

impl csp::Module for SoftCsp {
    fn init(
        &self,
        options: &Options,
        _: &dyn Alloc,
    ) -> Result<(), csp::Error> {
        if options.version.major != Self::VERSION.major {
            return Err(csp::Error::IncompatibleVersion);
        }

        let mut sample = [0; 16];
        SystemRandom::new()
            .fill(&mut sample)
            .map_err(|_| csp::Error::Unspecified)
    }

    fn load(
        &self,
        _: &Options,
        alloc: &dyn Alloc,
    ) -> Result<(), csp::Error> {
        let mut scratch = alloc.alloc_bytes(SHA256_ABC.len())?;
        let digest = digest::digest(&digest::SHA256, b"abc");
        scratch.copy_from_slice(digest.as_ref());
        if scratch != SHA256_ABC {
            return Err(csp::Error::SelfTestFailed);
        }
        Ok(())
    }

    fn attach(
        &self,
        _: &Options,
        _: &dyn Alloc,
    ) -> Result<Handle, csp::Error> {
        let raw = self.next_handle.fetch_add(1, Ordering::Relaxed);
        Handle::new(raw).ok_or(csp::Error::Unspecified)
    }
}
