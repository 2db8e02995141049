// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Fallible allocation of owned byte buffers.
//!
//! Wire integers own their magnitude buffers, and running out of memory while
//! producing one is a recoverable condition that must reach the caller. The
//! [`Alloc`] trait is the seam through which every such buffer is obtained, so
//! that callers can bound how much memory conversions may use and tests can
//! force allocation to fail.

use alloc::vec::Vec;

#[cfg(feature = "std")]
use core::sync::atomic::AtomicUsize;
#[cfg(feature = "std")]
use core::sync::atomic::Ordering;

use static_assertions::assert_obj_safe;

/// An error indicating that an [`Alloc`] could not provide the requested
/// memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutOfMemory;

/// A source of zero-filled, owned byte buffers.
///
/// Ownership of each buffer passes to the caller; releasing it is a matter of
/// dropping it.
pub trait Alloc {
    /// Allocates a zero-filled buffer of exactly `len` bytes.
    ///
    /// Calling `alloc_bytes(0)` must never fail.
    fn alloc_bytes(&self, len: usize) -> Result<Vec<u8>, OutOfMemory>;
}

assert_obj_safe!(Alloc);

impl<A: Alloc + ?Sized> Alloc for &'_ A {
    #[inline]
    fn alloc_bytes(&self, len: usize) -> Result<Vec<u8>, OutOfMemory> {
        A::alloc_bytes(*self, len)
    }
}

/// An [`Alloc`] backed by the global allocator.
///
/// Allocation failures reported by the global allocator are surfaced as
/// [`OutOfMemory`] rather than aborting the process.
#[derive(Copy, Clone, Debug, Default)]
pub struct Heap;

impl Alloc for Heap {
    fn alloc_bytes(&self, len: usize) -> Result<Vec<u8>, OutOfMemory> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len).map_err(|_| OutOfMemory)?;
        buf.resize(len, 0);
        Ok(buf)
    }
}

/// An [`Alloc`] that hands out at most a fixed number of bytes.
///
/// Bytes handed out are not returned to the budget when the buffers holding
/// them are dropped; [`BoundedHeap::reset()`] restores the full budget. A
/// request that fails, because it is over budget or because the global
/// allocator refused it, consumes no budget.
///
/// # Examples
/// ```
/// # use bnbridge::mem::*;
/// let mut heap = BoundedHeap::new(8);
/// assert_eq!(heap.alloc_bytes(6)?.len(), 6);
/// assert!(heap.alloc_bytes(3).is_err());
/// assert_eq!(heap.remaining(), 2);
///
/// heap.reset();
/// assert_eq!(heap.alloc_bytes(8)?.len(), 8);
/// # Ok::<(), OutOfMemory>(())
/// ```
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct BoundedHeap {
    limit: usize,
    // Invariant: used <= limit.
    used: AtomicUsize,
}

#[cfg(feature = "std")]
impl BoundedHeap {
    /// Creates a new `BoundedHeap` that will hand out at most `limit` bytes.
    pub const fn new(limit: usize) -> Self {
        Self {
            limit,
            used: AtomicUsize::new(0),
        }
    }

    /// Returns the number of bytes that can still be allocated.
    pub fn remaining(&self) -> usize {
        self.limit - self.used.load(Ordering::Acquire)
    }

    /// Restores the full budget.
    pub fn reset(&mut self) {
        *self.used.get_mut() = 0;
    }
}

#[cfg(feature = "std")]
impl Alloc for BoundedHeap {
    fn alloc_bytes(&self, len: usize) -> Result<Vec<u8>, OutOfMemory> {
        if len == 0 {
            return Ok(Vec::new());
        }

        let limit = self.limit;
        self.used
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                used.checked_add(len).filter(|&total| total <= limit)
            })
            .map_err(|_| OutOfMemory)?;

        Heap.alloc_bytes(len).map_err(|e| {
            self.used.fetch_sub(len, Ordering::AcqRel);
            e
        })
    }
}
