// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Shared test data for `bnbridge` and its tools.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod data;
