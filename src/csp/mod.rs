// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! One-time bootstrap of a cryptographic service provider (CSP).
//!
//! A CSP is a platform module implementing cryptographic primitives behind an
//! opaque, handle-based API. Bringing one up is a three-stage affair: the
//! framework is initialized, the module is loaded, and the caller attaches to
//! it, receiving a [`Handle`]. The rest of the cryptographic layer assumes
//! that, once obtained, that handle is always valid, so this needs to happen
//! exactly once per process.
//!
//! [`Bootstrap`] performs that sequence lazily, on the first call to
//! [`Bootstrap::handle()`], and caches the outcome. Concurrent first calls do
//! not race: at most one bootstrap sequence ever runs.
//!
//! A failure of any stage is [`Unrecoverable`]. It is cached as well, so that
//! the sequence is never retried; the process is expected to terminate, but
//! it is the entry point's job to do so, not this module's.
//!
//! Any memory a module needs while bootstrapping is requested through the
//! [`Alloc`] the `Bootstrap` was created with, so that callers can account
//! for it the same way they account for wire buffers.
//!
//! A software module built on `ring` is provided in the [`ring` module].
//!
//! [`ring` module]: ring/index.html

use core::fmt;
use core::num::NonZeroUsize;

use std::sync::OnceLock;

use static_assertions::assert_obj_safe;

use crate::mem::Alloc;
use crate::mem::Heap;
use crate::mem::OutOfMemory;
use crate::Result;

#[cfg(feature = "ring")]
pub mod ring;

/// An opaque handle to an attached CSP.
///
/// Handles are never zero; zero is reserved to mean "not attached".
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Handle(NonZeroUsize);

impl Handle {
    /// Creates a handle from a raw, module-assigned value.
    ///
    /// Returns `None` if `raw` is zero.
    pub fn new(raw: usize) -> Option<Self> {
        NonZeroUsize::new(raw).map(Self)
    }

    /// Returns the raw value of this handle.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handle({:#x})", self.get())
    }
}

/// A CSP interface version.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Version {
    /// The major version; modules only accept callers with a matching one.
    pub major: u32,
    /// The minor version.
    pub minor: u32,
}

/// A globally-unique identifier for a CSP caller or module.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Guid {
    #[allow(missing_docs)]
    pub data1: u32,
    #[allow(missing_docs)]
    pub data2: u16,
    #[allow(missing_docs)]
    pub data3: u16,
    #[allow(missing_docs)]
    pub data4: [u8; 8],
}

/// Options passed to every stage of a [`Module`]'s bootstrap.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Options {
    /// The interface version the caller was built against.
    pub version: Version,
    /// The identity of the caller.
    pub guid: Guid,
}

impl Options {
    /// The default options: interface version 2.0, with a fixed caller GUID.
    pub const DEFAULT: Self = Self {
        version: Version { major: 2, minor: 0 },
        guid: Guid {
            data1: 0xfade,
            data2: 0,
            data3: 0,
            data4: [1, 2, 3, 4, 5, 6, 7, 0],
        },
    };
}

impl Default for Options {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An error returned by a [`Module`] stage.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Indicates that the module does not support the requested interface
    /// version.
    IncompatibleVersion,

    /// Indicates that a module self-test produced the wrong answer.
    SelfTestFailed,

    /// Indicates that the module could not allocate memory it needed.
    OutOfMemory,

    /// Indicates an unspecified, internal error.
    Unspecified,
}

impl From<OutOfMemory> for Error {
    fn from(_: OutOfMemory) -> Self {
        Self::OutOfMemory
    }
}

/// A stage of the bootstrap sequence.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Stage {
    /// Framework initialization.
    Init,
    /// Module loading.
    Load,
    /// Attaching to the loaded module.
    Attach,
}

/// A bootstrap failure, after which the cryptographic layer cannot be used.
///
/// Callers should not attempt to recover from this error; it should be
/// propagated to the entry point of the program, which should then terminate.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Unrecoverable {
    /// The stage that failed.
    pub stage: Stage,
    /// The error reported by the module.
    pub cause: Error,
}

impl fmt::Display for Unrecoverable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let stage = match self.stage {
            Stage::Init => "initialization",
            Stage::Load => "module load",
            Stage::Attach => "module attach",
        };
        write!(f, "CSP {} failed: {:?}", stage, self.cause)
    }
}

/// A CSP module, driven through the bootstrap sequence by a [`Bootstrap`].
///
/// Each stage is called at most once per `Bootstrap`, and only if the
/// previous stage succeeded. Every stage is handed the `Bootstrap`'s
/// allocator; modules must obtain any memory they need through it.
pub trait Module: Sync {
    /// Initializes the framework the module lives in.
    fn init(
        &self,
        options: &Options,
        alloc: &dyn Alloc,
    ) -> core::result::Result<(), Error>;

    /// Loads the module.
    fn load(
        &self,
        options: &Options,
        alloc: &dyn Alloc,
    ) -> core::result::Result<(), Error>;

    /// Attaches to the loaded module, producing a handle to it.
    fn attach(
        &self,
        options: &Options,
        alloc: &dyn Alloc,
    ) -> core::result::Result<Handle, Error>;
}
assert_obj_safe!(Module);

impl<M: Module + ?Sized> Module for &'_ M {
    fn init(
        &self,
        options: &Options,
        alloc: &dyn Alloc,
    ) -> core::result::Result<(), Error> {
        M::init(*self, options, alloc)
    }

    fn load(
        &self,
        options: &Options,
        alloc: &dyn Alloc,
    ) -> core::result::Result<(), Error> {
        M::load(*self, options, alloc)
    }

    fn attach(
        &self,
        options: &Options,
        alloc: &dyn Alloc,
    ) -> core::result::Result<Handle, Error> {
        M::attach(*self, options, alloc)
    }
}

/// Lazily bootstraps a [`Module`] and caches the resulting [`Handle`].
///
/// A `Bootstrap` is meant to live in a `static`:
/// ```
/// use bnbridge::csp::ring::SoftCsp;
/// use bnbridge::csp::Bootstrap;
///
/// static CSP: Bootstrap<SoftCsp> = Bootstrap::new(SoftCsp::new());
///
/// let handle = CSP.handle()?;
/// assert_eq!(CSP.handle()?, handle);
/// # Ok::<(), bnbridge::Error<bnbridge::csp::Unrecoverable>>(())
/// ```
pub struct Bootstrap<M, A = Heap> {
    module: M,
    options: Options,
    alloc: A,
    state: OnceLock<core::result::Result<Handle, Unrecoverable>>,
}

impl<M> Bootstrap<M> {
    /// Creates a new `Bootstrap` for `module`, with the default options,
    /// allocating from the heap.
    pub const fn new(module: M) -> Self {
        Self::with_options(module, Options::DEFAULT)
    }

    /// Creates a new `Bootstrap` for `module`, with the given options,
    /// allocating from the heap.
    pub const fn with_options(module: M, options: Options) -> Self {
        Bootstrap::with_alloc(module, options, Heap)
    }
}

impl<M, A> Bootstrap<M, A> {
    /// Creates a new `Bootstrap` for `module`, with the given options, whose
    /// module allocates from `alloc`.
    pub const fn with_alloc(module: M, options: Options, alloc: A) -> Self {
        Self {
            module,
            options,
            alloc,
            state: OnceLock::new(),
        }
    }

    /// Returns the module being bootstrapped.
    pub fn module(&self) -> &M {
        &self.module
    }

    /// Returns the cached handle, if bootstrapping already happened and
    /// succeeded. This never starts the bootstrap sequence.
    pub fn get(&self) -> Option<Handle> {
        self.state.get().and_then(|state| state.ok())
    }
}

impl<M: Module, A: Alloc> Bootstrap<M, A> {
    /// Returns the process-wide handle, bootstrapping the module first if
    /// this is the first call.
    ///
    /// Every call returns the same result as the first. If another thread is
    /// bootstrapping concurrently, this blocks until it is done.
    pub fn handle(&self) -> Result<Handle, Unrecoverable> {
        match *self.state.get_or_init(|| self.bootstrap()) {
            Ok(handle) => Ok(handle),
            Err(e) => fail!(e),
        }
    }

    fn bootstrap(&self) -> core::result::Result<Handle, Unrecoverable> {
        let options = &self.options;
        let alloc: &dyn Alloc = &self.alloc;
        let at = |stage| move |cause| Unrecoverable { stage, cause };

        info!("initializing CSP framework, version {:?}", options.version);
        self.module.init(options, alloc).map_err(at(Stage::Init))?;
        info!("loading CSP module");
        self.module.load(options, alloc).map_err(at(Stage::Load))?;
        let handle = self
            .module
            .attach(options, alloc)
            .map_err(at(Stage::Attach))?;
        info!("attached to CSP module: {:?}", handle);
        Ok(handle)
    }
}
