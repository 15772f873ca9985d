//! `quay locations` command

use anyhow::Result;

use crate::cli::LocationsArgs;
use quay::resolver::LocationResolver;
use quay::util::path_safety::is_unsafe_location;
use quay::util::GlobalContext;

pub fn execute(args: LocationsArgs, ctx: &GlobalContext) -> Result<()> {
    let resolver = ctx.location_resolver(&args.locations)?;
    let mut locations = resolver.locations(&args.application, &args.profile, &args.label)?;

    if ctx.config().search_options().reverse_location_order {
        locations.reverse();
    }

    if args.json {
        let entries: Vec<_> = locations
            .iter()
            .map(|location| {
                serde_json::json!({
                    "location": location.as_str(),
                    "optional": location.is_optional(),
                    "unsafe": is_unsafe_location(location.as_str()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for location in &locations {
        let mut notes = Vec::new();
        if location.is_optional() {
            notes.push("optional");
        }
        if is_unsafe_location(location.as_str()) {
            notes.push("skipped: unsafe");
        }

        if notes.is_empty() {
            println!("{}", location.as_str());
        } else {
            println!("{} ({})", location.as_str(), notes.join(", "));
        }
    }

    Ok(())
}
