//! `quay candidates` command

use anyhow::Result;

use crate::cli::CandidatesArgs;
use quay::core::{profile_paths, ProfileSet};
use quay::util::path_safety::is_unsafe_path;
use quay::util::GlobalContext;

pub fn execute(args: CandidatesArgs, ctx: &GlobalContext) -> Result<()> {
    let profile = if args.profile.trim().is_empty() {
        ctx.config().default_profile()
    } else {
        args.profile.as_str()
    };

    for candidate in profile_paths(&args.path, &ProfileSet::parse(profile)) {
        if is_unsafe_path(&candidate) {
            println!("{} (skipped: unsafe)", candidate);
        } else {
            println!("{}", candidate);
        }
    }

    Ok(())
}
