// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Conversions between decimal integers and JSON wire integers.

use std::io::Write as _;
use std::path::PathBuf;
use std::str;

use num_bigint::BigInt;

use bnbridge::bignum::num;
use bnbridge::mem::Heap;
use bnbridge::wire;
use bnbridge::wire::WireInteger;

/// Convert between decimal and wire-integer form.
#[derive(structopt::StructOpt)]
pub enum Int {
    /// Converts a decimal integer to a JSON wire integer.
    #[structopt(name = "int2json", alias = "i2j")]
    Int2Json {
        /// Whether to pretty-print JSON output.
        #[structopt(long)]
        pretty: bool,

        /// Input file; defaults to stdin.
        #[structopt(short = "i", long, parse(from_os_str))]
        input: Option<PathBuf>,

        /// Output file; defaults to stdout.
        #[structopt(short = "o", long, parse(from_os_str))]
        output: Option<PathBuf>,
    },

    /// Converts a JSON wire integer to a decimal integer.
    #[structopt(name = "json2int", alias = "j2i")]
    Json2Int {
        /// Input file; defaults to stdin.
        #[structopt(short = "i", long, parse(from_os_str))]
        input: Option<PathBuf>,

        /// Output file; defaults to stdout.
        #[structopt(short = "o", long, parse(from_os_str))]
        output: Option<PathBuf>,
    },
}

impl Int {
    pub fn run(self) {
        match self {
            Self::Int2Json {
                pretty,
                input,
                output,
            } => {
                let (r, w) = crate::util::stdio(input, output);
                let text = crate::util::read_all(r);
                let text = check!(str::from_utf8(&text), "input is not UTF-8");
                let n = check!(
                    text.trim().parse::<BigInt>(),
                    "failed to parse decimal integer",
                );

                let value = check!(
                    wire::to_wire(&num::Bignum::from(n), &Heap),
                    "failed to convert to wire form",
                );
                crate::util::write_json(w, &value, pretty);
            }
            Self::Json2Int { input, output } => {
                let (r, mut w) = crate::util::stdio(input, output);
                let value: WireInteger = check!(
                    serde_json::from_reader(r),
                    "failed to deserialize wire integer from JSON",
                );

                let n = check!(
                    wire::from_wire(&value, &num::Builder),
                    "failed to convert from wire form",
                );
                check!(writeln!(w, "{}", n.as_inner()), "failed to write output");
            }
        }
    }
}
