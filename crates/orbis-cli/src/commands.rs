use anyhow::{Context, Result, bail};
use tracing::info;

use orbis_cli::overrides::resolve_config;
use orbis_core::{RunContext, execute_run};
use orbis_model::RunMetadata;
use orbis_output::{DUCKDB_SUPPORTED, WriteOptions, list_runs, write_run};

use crate::cli::{RunArgs, RunsArgs};
use crate::types::RunOutcome;

const DEFAULT_OUTPUT_DIR: &str = "orbis_output";

pub fn run_pipeline(args: &RunArgs) -> Result<RunOutcome> {
    if args.duckdb.is_some() && !DUCKDB_SUPPORTED {
        bail!("--duckdb requires a build with the `duckdb` feature");
    }
    let config = resolve_config(args.config.as_deref(), &args.overrides())
        .context("resolve pipeline config")?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.input_dir.join(DEFAULT_OUTPUT_DIR));
    let write_options = WriteOptions {
        write_raw_merged: config.write_raw_merged,
        duckdb_path: args.duckdb.clone(),
    };

    let context = RunContext::new(&args.input_dir, config);
    let run = execute_run(&context)?;

    if args.dry_run {
        info!(run_id = %run.id(), "dry run, no files written");
        return Ok(RunOutcome {
            run,
            output_dir,
            stored: None,
        });
    }

    let _run_guard = context.span().entered();
    let stored = write_run(&run, &output_dir, &write_options)
        .with_context(|| format!("write run to {}", output_dir.display()))?;
    Ok(RunOutcome {
        run,
        output_dir,
        stored: Some(stored),
    })
}

pub fn run_list(args: &RunsArgs) -> Result<Vec<RunMetadata>> {
    list_runs(&args.output_dir)
        .with_context(|| format!("list runs in {}", args.output_dir.display()))
}
