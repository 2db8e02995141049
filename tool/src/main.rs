// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! `bnbridge-tool` is a simple command-line tool for converting integers
//! between decimal, JSON wire-integer and DER forms, and for probing the
//! software CSP.

#![deny(missing_docs)]
#![deny(warnings)]
#![deny(unused)]
#![deny(unsafe_code)]

use structopt::StructOpt as _;

#[macro_use]
mod util;

mod csp;
mod der;
mod int;

/// A command-line tool for working with wire integers.
#[allow(missing_docs)]
#[derive(structopt::StructOpt)]
#[structopt(author)]
enum CliCommand {
    #[structopt(flatten)]
    Int(int::Int),
    #[structopt(flatten)]
    Der(der::Der),
    #[structopt(flatten)]
    Csp(csp::Csp),
}

fn main() {
    env_logger::init();
    match CliCommand::from_args() {
        CliCommand::Int(i) => i.run(),
        CliCommand::Der(d) => d.run(),
        CliCommand::Csp(c) => c.run(),
    }
}
