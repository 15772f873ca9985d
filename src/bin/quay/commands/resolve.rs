//! `quay resolve` command

use std::io::Write;

use anyhow::{bail, Context, Result};

use crate::cli::ResolveArgs;
use quay::core::{ResourceRequest, SearchOptions};
use quay::util::fs::write_bytes;
use quay::util::GlobalContext;

pub fn execute(args: ResolveArgs, ctx: &GlobalContext) -> Result<()> {
    let locator = ctx.resource_locator(&args.locations)?;

    let profile = if args.profile.trim().is_empty() {
        ctx.config().default_profile().to_string()
    } else {
        args.profile
    };

    let request = ResourceRequest::new(args.application, profile, args.label, args.path)
        .with_archive(args.archive);

    let options = SearchOptions {
        reverse_location_order: args.reverse
            || ctx.config().search_options().reverse_location_order,
    };

    let resource = locator.resolve(&request, &options)?;

    if resource.is_dir() {
        bail!(
            "`{}` resolved to a directory: {}\n\
             help: pass --archive to download it as a ZIP",
            request.path,
            resource.url()
        );
    }

    if ctx.is_verbose() {
        eprintln!("Resolved {} -> {}", request.path, resource.url());
    }

    let bytes = resource
        .bytes()
        .with_context(|| format!("failed to read {}", resource.url()))?;

    match &args.output {
        Some(path) => {
            write_bytes(path, &bytes)?;
            if ctx.is_verbose() {
                eprintln!("Wrote {} bytes to {}", bytes.len(), path.display());
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|_| stdout.flush())
                .context("failed to write to stdout")?;
        }
    }

    Ok(())
}
