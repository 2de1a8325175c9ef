//! Run orchestration: the per-list generation loop.
//!
//! Input loading and design validation failures abort the run before any
//! list is written. Per-list I/O, render, and compile failures are caught,
//! recorded, and reported at end of run so one bad list does not discard
//! the rest.

use crate::assign;
use crate::compile::Compiler;
use crate::compose;
use crate::config::{self, Config};
use crate::error::Result;
use crate::paths::ExperimentPaths;
use crate::ratio;
use crate::render::{self, RenderContext};
use crate::stimuli::{self, Filler, Item};
use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Options for a `generate` run.
#[derive(Debug)]
pub struct GenerateOptions {
    pub paths: ExperimentPaths,
    /// Seed override; falls back to the config `seed` key, then OS entropy.
    pub seed: Option<u64>,
    /// Invoke the configured document compiler on each rendered list.
    pub compile: bool,
}

/// Outcome of one list's generation.
#[derive(Debug, Serialize)]
pub struct ListOutcome {
    pub list_no: u32,
    pub document: Option<PathBuf>,
    pub order_log: Option<PathBuf>,
    /// `None` when compilation was disabled or skipped for the run.
    pub compiled: Option<bool>,
    pub failures: Vec<String>,
}

impl ListOutcome {
    fn new(list_no: u32) -> Self {
        Self {
            list_no,
            document: None,
            order_log: None,
            compiled: None,
            failures: Vec::new(),
        }
    }

    pub fn ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// End-of-run record, also written as `run_report.json`.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub ex_name: String,
    pub no_conds: u32,
    pub no_lists: u32,
    pub items_count: usize,
    pub fillers_count: usize,
    /// The seed actually used, when the run was seeded.
    pub seed: Option<u64>,
    pub lists: Vec<ListOutcome>,
}

impl RunSummary {
    pub fn failed_lists(&self) -> Vec<u32> {
        self.lists
            .iter()
            .filter(|list| !list.ok())
            .map(|list| list.list_no)
            .collect()
    }
}

/// Loaded and validated experiment inputs.
pub struct ExperimentInputs {
    pub config: Config,
    pub items: Vec<Item>,
    pub fillers: Vec<Filler>,
    pub template: String,
}

/// Load every input file named by the config and run the design checks.
pub fn load_inputs(paths: &ExperimentPaths) -> Result<ExperimentInputs> {
    tracing::info!(path = %paths.config_path().display(), "parsing configuration");
    let config = config::load_config(&paths.config_path())?;

    tracing::info!("parsing fillers");
    let fillers = stimuli::load_fillers(&paths.input_file(&config.fillers))?;

    tracing::info!("parsing stimuli");
    let items = stimuli::load_items(&paths.input_file(&config.stimuli), config.no_conds)?;

    let template = stimuli::read_input(&paths.input_file(&config.template))?;
    if !template.contains("{items}") {
        tracing::warn!("template never references {{items}}; documents will contain no stimuli");
    }

    ratio::check_ratio(
        config.filler_ratio,
        fillers.len() as u32,
        items.len() as u32,
    )?;

    tracing::info!(
        items = items.len(),
        fillers = fillers.len(),
        no_lists = config.no_lists,
        "inputs validated"
    );

    Ok(ExperimentInputs {
        config,
        items,
        fillers,
        template,
    })
}

/// Generate every list: assign, compose, render, log, optionally compile.
pub fn run_generate(opts: &GenerateOptions) -> Result<RunSummary> {
    let inputs = load_inputs(&opts.paths)?;
    let config = &inputs.config;

    let compiler = if opts.compile {
        Compiler::resolve(&config.compiler)?
    } else {
        None
    };

    let seed = opts.seed.or(config.seed);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut summary = RunSummary {
        ex_name: config.ex_name.clone(),
        no_conds: config.no_conds,
        no_lists: config.no_lists,
        items_count: inputs.items.len(),
        fillers_count: inputs.fillers.len(),
        seed,
        lists: Vec::with_capacity(config.no_lists as usize),
    };

    for list_no in 1..=config.no_lists {
        tracing::info!(list_no, "creating list");

        // Design errors are fatal; everything past this point is per-list.
        let assigned = assign::assign_list(&inputs.items, list_no, config.no_lists)?;
        let sequence = compose::compose(assigned, &inputs.fillers, &mut rng);

        let mut outcome = ListOutcome::new(list_no);
        let ctx = RenderContext {
            ex_name: &config.ex_name,
            list_no,
        };

        match write_list_outputs(opts, &inputs, &ctx, &sequence) {
            Ok((document, order_log)) => {
                outcome.document = Some(document.clone());
                outcome.order_log = Some(order_log);
                if let Some(compiler) = &compiler {
                    tracing::info!(list_no, "compiling document");
                    match compiler.compile(&document) {
                        Ok(()) => outcome.compiled = Some(true),
                        Err(e) => {
                            tracing::warn!(list_no, error = %format!("{e:#}"), "compile failed");
                            outcome.compiled = Some(false);
                            outcome.failures.push(format!("{e:#}"));
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(list_no, error = %format!("{e:#}"), "list generation failed");
                outcome.failures.push(format!("{e:#}"));
            }
        }

        summary.lists.push(outcome);
    }

    write_report(&opts.paths, &summary);
    Ok(summary)
}

/// Render the document and write it plus the order log for one list.
fn write_list_outputs(
    opts: &GenerateOptions,
    inputs: &ExperimentInputs,
    ctx: &RenderContext<'_>,
    sequence: &[assign::ListEntry],
) -> anyhow::Result<(PathBuf, PathBuf)> {
    let paths = &opts.paths;
    let list_dir = paths.list_dir(ctx.list_no);
    fs::create_dir_all(&list_dir)
        .with_context(|| format!("create list directory {}", list_dir.display()))?;

    let document_text = render::render_document(
        &inputs.template,
        ctx,
        sequence,
        inputs.config.scale_points,
    )?;
    let document = paths.document_path(ctx.ex_name, ctx.list_no);
    fs::write(&document, document_text)
        .with_context(|| format!("write document {}", document.display()))?;

    // The audit trail must mirror the rendered order exactly.
    let mut order_text = compose::order_of(sequence).join("\n");
    order_text.push('\n');
    let order_log = paths.order_log_path(ctx.ex_name, ctx.list_no);
    fs::write(&order_log, order_text)
        .with_context(|| format!("write order log {}", order_log.display()))?;

    Ok((document, order_log))
}

/// Write the machine-readable run report; failure here only warns, since
/// the per-list outputs are the deliverable.
fn write_report(paths: &ExperimentPaths, summary: &RunSummary) {
    let path = paths.report_path();
    let result = serde_json::to_string_pretty(summary)
        .context("serialize run report")
        .and_then(|json| {
            fs::write(&path, json).with_context(|| format!("write {}", path.display()))
        });
    match result {
        Ok(()) => tracing::info!(path = %path.display(), "wrote run report"),
        Err(e) => tracing::warn!(error = %format!("{e:#}"), "run report not written"),
    }
}

/// Summary produced by the `check` subcommand.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub ex_name: String,
    pub no_conds: u32,
    pub no_lists: u32,
    pub items_count: usize,
    pub fillers_count: usize,
    pub filler_ratio: String,
    pub seed: Option<u64>,
    pub compiler: String,
}

/// Validate inputs without writing any output.
///
/// Beyond `load_inputs`, this exercises the template substitution with
/// placeholder values so template typos surface before a real run.
pub fn run_check(paths: &ExperimentPaths) -> Result<CheckReport> {
    let inputs = load_inputs(paths)?;
    let config = &inputs.config;

    let ctx = RenderContext {
        ex_name: &config.ex_name,
        list_no: 1,
    };
    render::render_document(&inputs.template, &ctx, &[], config.scale_points)?;
    Compiler::parse(&config.compiler)?;

    Ok(CheckReport {
        ex_name: config.ex_name.clone(),
        no_conds: config.no_conds,
        no_lists: config.no_lists,
        items_count: inputs.items.len(),
        fillers_count: inputs.fillers.len(),
        filler_ratio: format!("{}:{}", config.filler_ratio.0, config.filler_ratio.1),
        seed: config.seed,
        compiler: config.compiler.clone(),
    })
}
