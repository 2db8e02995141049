// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Test data of all kinds, ranging from DER snippets to large magnitudes.

pub mod der;
pub mod integers;
