//! Render side-by-side comparisons of loosely-structured records.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use morphs_lib::{Host, run};
use std::io::{IsTerminal, Write, stderr, stdout};

/// Default host writing to the process streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn output_is_terminal(&self) -> bool {
        stdout().is_terminal()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args())
}
