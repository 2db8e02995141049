// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Probing of the software CSP.

use bnbridge::csp::ring::SoftCsp;
use bnbridge::csp::Bootstrap;
use bnbridge::csp::Options;
use bnbridge::csp::Version;

/// Bootstrap the software CSP.
#[derive(structopt::StructOpt)]
pub enum Csp {
    /// Bootstraps the software CSP and prints its handle.
    ///
    /// A bootstrap failure aborts the process.
    #[structopt(name = "csp")]
    Csp {
        /// The major interface version to request.
        #[structopt(long, default_value = "2")]
        major: u32,

        /// The minor interface version to request.
        #[structopt(long, default_value = "0")]
        minor: u32,
    },
}

impl Csp {
    pub fn run(self) {
        match self {
            Self::Csp { major, minor } => {
                let options = Options {
                    version: Version { major, minor },
                    ..Options::DEFAULT
                };
                let csp = Bootstrap::with_options(SoftCsp::new(), options);

                let handle = match csp.handle() {
                    Ok(h) => h,
                    Err(e) => {
                        let e = e.into_inner();
                        log::error!("{}", e);
                        eprintln!("fatal: {}", e);
                        std::process::abort()
                    }
                };
                log::info!("bootstrapped CSP with {:?}", options);
                println!("{:#x}", handle.get());
            }
        }
    }
}
