//! The `convert` command.
//!
//! Stages run strictly in order and nothing is written until the output text
//! is complete:
//!
//! 1. refuse an output path that is the input
//! 2. build the rename plan (profile, `--if-map`, index options)
//! 3. read and parse the input
//! 4. apply the rename plan when it can change anything
//! 5. render the target dialect and write it in one call
//! 6. print the conversion summary

use std::fs;

use anyhow::{Context, Result};
use netcfg_convert::conversion_summary::{render_colored, summarize};
use netcfg_convert::profile::load_profile;
use netcfg_convert::rename::RenamePlan;
use netcfg_core::{parse_mappings, TransformOptions};
use tracing::info;

use crate::cli::ConvertArgs;
use crate::path_guard::ensure_output_not_input;

pub fn run_convert(args: ConvertArgs) -> Result<()> {
    ensure_output_not_input(&args.output, &args.input)?;

    let plan = build_rename_plan(&args)?;

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let mut cfg = args
        .from
        .parse(&text)
        .with_context(|| format!("failed to parse {} as {}", args.input.display(), args.from))?;
    info!(from = %args.from, input = %args.input.display(), "parsed configuration");

    if plan.is_needed() {
        let changed = plan.apply(&mut cfg);
        info!(changed, "applied interface rename plan");
    }

    let rendered = args
        .to
        .render(&cfg)
        .with_context(|| format!("failed to render {}", args.to))?;
    fs::write(&args.output, rendered)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(to = %args.to, output = %args.output.display(), "wrote configuration");

    println!("{}", render_colored(summarize(&cfg)));
    Ok(())
}

/// Profile mappings first, then `--if-map` entries. Explicit index flags win
/// over the profile.
fn build_rename_plan(args: &ConvertArgs) -> Result<RenamePlan> {
    let mut plan = RenamePlan::default();

    if let Some(path) = &args.profile {
        let profile = load_profile(path)?;
        plan.mappings = profile
            .mappings()
            .with_context(|| format!("invalid profile {}", path.display()))?;
        if let Some(style) = profile
            .index_style()
            .with_context(|| format!("invalid profile {}", path.display()))?
        {
            plan.options.index_style = style;
        }
        if let Some(prefix) = profile.index_prefix {
            plan.options.leading_segment = prefix;
        }
    }

    if let Some(directive) = &args.if_map {
        let mappings = parse_mappings(directive).context("invalid --if-map")?;
        plan.mappings.extend(mappings);
    }
    if let Some(style) = args.if_index {
        plan.options.index_style = style;
    }
    if let Some(prefix) = &args.if_index_prefix {
        plan.options.leading_segment = prefix.clone();
    }
    if plan.options.leading_segment.trim().is_empty() {
        plan.options.leading_segment = TransformOptions::default().leading_segment;
    }

    Ok(plan)
}
