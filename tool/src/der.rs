// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Conversions between JSON wire integers and DER `INTEGER`s.

use std::io::Write as _;
use std::path::PathBuf;

use bnbridge::mem::Heap;
use bnbridge::wire::der;
use bnbridge::wire::WireInteger;

/// Convert between wire-integer and DER form.
#[derive(structopt::StructOpt)]
pub enum Der {
    /// Encodes a JSON wire integer as a DER `INTEGER`.
    #[structopt(name = "json2der", alias = "j2d")]
    Json2Der {
        /// Input file; defaults to stdin.
        #[structopt(short = "i", long, parse(from_os_str))]
        input: Option<PathBuf>,

        /// Output file; defaults to stdout.
        #[structopt(short = "o", long, parse(from_os_str))]
        output: Option<PathBuf>,
    },

    /// Decodes a DER `INTEGER` into a JSON wire integer.
    #[structopt(name = "der2json", alias = "d2j")]
    Der2Json {
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
}

impl Der {
    pub fn run(self) {
        match self {
            Self::Json2Der { input, output } => {
                let (r, mut w) = crate::util::stdio(input, output);
                let value: WireInteger = check!(
                    serde_json::from_reader(r),
                    "failed to deserialize wire integer from JSON",
                );

                let encoded =
                    check!(der::to_der(&value, &Heap), "failed to encode DER");
                check!(w.write_all(&encoded), "failed to write output");
            }
            Self::Der2Json {
                pretty,
                input,
                output,
            } => {
                let (r, w) = crate::util::stdio(input, output);
                let encoded = crate::util::read_all(r);

                let value =
                    check!(der::from_der(&encoded, &Heap), "failed to parse DER");
                crate::util::write_json(w, &value, pretty);
            }
        }
    }
}
