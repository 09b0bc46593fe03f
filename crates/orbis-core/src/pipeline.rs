//! Run orchestration: ingest, merge, clean, then profile and detect in parallel.

use std::thread;
use std::time::Instant;

use chrono::Utc;
use tracing::{Span, error, info, info_span};

use orbis_clean::{canonicalize, clean_table};
use orbis_ingest::{SourceTable, read_sources};
use orbis_model::{Run, RunParts, StructuralError};
use orbis_validate::{DetectorInput, detect_issues, profile_table};

use crate::context::RunContext;
use crate::error::{PipelineError, Result};
use crate::merge::merge_sources;

/// Reads every source in the context's input directory and processes them.
pub fn execute_run(context: &RunContext) -> Result<Run> {
    let _run_guard = context.span().entered();
    context.config.validate()?;
    info!(input_dir = %context.input_dir.display(), "starting run");

    // =========================================================================
    // Stage 1: Ingest
    // =========================================================================
    let ingest_start = Instant::now();
    let sources = info_span!("ingest", input_dir = %context.input_dir.display())
        .in_scope(|| read_sources(&context.input_dir))?;
    let source_rows: usize = sources.iter().map(|s| s.table.row_count()).sum();
    info!(
        file_count = sources.len(),
        rows = source_rows,
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    run_stages(context, &sources)
}

/// Merges already loaded sources and runs the clean and validate stages.
pub fn process_sources(context: &RunContext, sources: &[SourceTable]) -> Result<Run> {
    let _run_guard = context.span().entered();
    context.config.validate()?;
    run_stages(context, sources)
}

fn run_stages(context: &RunContext, sources: &[SourceTable]) -> Result<Run> {
    let config = &context.config;

    if sources.is_empty() {
        error!(input_dir = %context.input_dir.display(), "no input tables found");
        return Err(PipelineError::structural(
            &context.input_dir,
            StructuralError::NoInputs,
        ));
    }

    // =========================================================================
    // Stage 2: Merge
    // =========================================================================
    let merge_start = Instant::now();
    let merged = merge_sources(sources, &config.provenance_column)
        .map_err(|err| PipelineError::from_merge(&context.input_dir, err))?;
    info!(
        rows = merged.row_count(),
        columns = merged.column_count(),
        duration_ms = merge_start.elapsed().as_millis(),
        "merge complete"
    );

    // =========================================================================
    // Stage 3: Clean
    // =========================================================================
    let outcome = info_span!("clean")
        .in_scope(|| clean_table(&merged, &config.cleaning))
        .map_err(|err| PipelineError::from_clean(&context.input_dir, err))?;

    // =========================================================================
    // Stage 4: Profile and detect issues
    // =========================================================================
    let validate_start = Instant::now();
    let provenance_column = outcome
        .descriptors
        .iter()
        .find(|d| d.raw_name == config.provenance_column)
        .map(|d| d.canonical_name.clone())
        .unwrap_or_else(|| canonicalize(&config.provenance_column));
    let source_names: Vec<String> = sources.iter().map(|s| s.source.clone()).collect();
    let detector_input = DetectorInput {
        table: &outcome.table,
        merged_rows: merged.row_count(),
        duplicates_removed: outcome.duplicates_removed,
        provenance_column: &provenance_column,
        sources: &source_names,
        coercions: &outcome.coercions,
        coercion_threshold: config.cleaning.coercion_threshold,
    };

    let parent = Span::current();
    let (profiles, issues) = thread::scope(|scope| {
        let profiler = scope.spawn(|| {
            info_span!(parent: &parent, "profile")
                .in_scope(|| profile_table(&outcome.table, config.validation.sample_values))
        });
        let issues = info_span!("detect")
            .in_scope(|| detect_issues(&detector_input, &config.validation));
        let profiles = profiler
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
        (profiles, issues)
    });
    info!(
        profiled_columns = profiles.len(),
        issue_count = issues.len(),
        duration_ms = validate_start.elapsed().as_millis(),
        "validation complete"
    );

    Ok(Run::assemble(RunParts {
        id: context.run_id.clone(),
        started_at: context.started_at,
        finished_at: Utc::now(),
        input_dir: context.input_dir.clone(),
        sources: source_names,
        merged,
        cleaned: outcome.table,
        profiles,
        issues,
        duplicates_removed: outcome.duplicates_removed,
        dropped_columns: outcome.dropped_columns,
    }))
}
