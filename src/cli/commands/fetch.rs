//! The lyrics pipeline command.

use std::path::Path;

use anyhow::Context;
use tracing::debug;

use super::RunOverrides;
use crate::config::{self, RunConfig};
use crate::lyrics::{LrclibClient, ReqwestTransport};
use crate::output::writer_for;
use crate::pipeline::PipelineDriver;

/// Build the run configuration: config file, then env / flags.
pub fn resolve_run_config(
    config_path: Option<&Path>,
    root: Option<&Path>,
    overrides: &RunOverrides,
    dry_run: bool,
) -> anyhow::Result<RunConfig> {
    let mut defaults = config::load(config_path).run;
    overrides.apply(&mut defaults);

    let root = root
        .map(Path::to_path_buf)
        .or_else(|| defaults.root_directory.clone())
        .context("No music directory given and none configured (see `lyrics-minder config save --root`)")?;

    let mut run = RunConfig::from_defaults(&defaults, root);
    run.dry_run = dry_run;
    run.validate()?;
    Ok(run)
}

/// Fetch lyrics for every supported file under the root directory
pub fn cmd_fetch(
    config_path: Option<&Path>,
    root: Option<&Path>,
    overrides: &RunOverrides,
    dry_run: bool,
) -> anyhow::Result<()> {
    let run = resolve_run_config(config_path, root, overrides, dry_run)?;
    debug!(?run, "Resolved run configuration");

    let transport = ReqwestTransport::new(run.http_timeout())?;
    let client = LrclibClient::with_transport(transport, run.lyrics_base_url.clone())
        .with_selection(run.selection);
    let driver = PipelineDriver::new(&run.root_directory, client, writer_for(run.output_mode))
        .with_dry_run(run.dry_run);

    println!(
        "Fetching lyrics under {} ({} mode{})",
        run.root_directory.display(),
        run.output_mode,
        if run.dry_run { ", dry run" } else { "" }
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let summary = rt.block_on(driver.run())?;

    for failure in &summary.failures {
        eprintln!("  Error processing {}: {}", failure.path.display(), failure.reason);
    }

    println!("\n{summary}");
    Ok(())
}
