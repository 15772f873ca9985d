//! `quay check` command
//!
//! Reports whether each value would be rejected as a traversal attempt.
//! Exits non-zero when any value is unsafe.

use anyhow::{bail, Result};

use crate::cli::CheckArgs;
use quay::util::diagnostic::{self, Diagnostic};
use quay::util::path_safety::{is_unsafe_location, is_unsafe_path};
use quay::util::GlobalContext;

pub fn execute(args: CheckArgs, ctx: &GlobalContext) -> Result<()> {
    let kind = if args.location { "location" } else { "path" };
    let mut unsafe_count = 0;

    for value in &args.values {
        let is_unsafe = if args.location {
            is_unsafe_location(value)
        } else {
            is_unsafe_path(value)
        };

        if is_unsafe {
            unsafe_count += 1;
            println!("unsafe  {}", value);
            if ctx.is_verbose() {
                let diag = Diagnostic::warning(format!("`{}` is not a safe {}", value, kind))
                    .with_context("it contains a traversal sequence, possibly percent-encoded");
                diagnostic::emit(&diag, ctx.color());
            }
        } else {
            println!("ok      {}", value);
        }
    }

    if unsafe_count > 0 {
        bail!("{} of {} value(s) are unsafe", unsafe_count, args.values.len());
    }

    Ok(())
}
