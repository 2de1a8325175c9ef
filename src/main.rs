use clap::Parser;
use stimlist::cli::{CheckArgs, Command, GenerateArgs, RootArgs};
use stimlist::paths::ExperimentPaths;
use stimlist::run::{self, GenerateOptions};

fn main() {
    let cli = RootArgs::parse();

    let code = match cli.command {
        Command::Generate(args) => cmd_generate(args),
        Command::Check(args) => cmd_check(args),
    };
    std::process::exit(code);
}

fn cmd_generate(args: GenerateArgs) -> i32 {
    init_tracing(args.verbose);

    let opts = GenerateOptions {
        paths: ExperimentPaths::new(args.inputs, args.outputs),
        seed: args.seed,
        compile: !args.no_compile,
    };

    let summary = match run::run_generate(&opts) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("error: {e}");
            return e.exit_code();
        }
    };

    let failed = summary.failed_lists();
    if failed.is_empty() {
        println!(
            "Done. Wrote {} lists for {} to {}.",
            summary.no_lists,
            summary.ex_name,
            opts.paths.outputs_root().display()
        );
        return 0;
    }

    eprintln!(
        "{} of {} lists failed: {:?}",
        failed.len(),
        summary.no_lists,
        failed
    );
    for list in summary.lists.iter().filter(|list| !list.ok()) {
        for failure in &list.failures {
            eprintln!("  List {}: {}", list.list_no, failure);
        }
    }
    1
}

fn cmd_check(args: CheckArgs) -> i32 {
    init_tracing(args.verbose);

    let paths = ExperimentPaths::new(args.inputs.clone(), args.inputs);
    let report = match run::run_check(&paths) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return e.exit_code();
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: serialize check report: {e}");
                return 1;
            }
        }
    } else {
        println!("Experiment: {}", report.ex_name);
        println!(
            "Design: {} conditions x {} lists",
            report.no_conds, report.no_lists
        );
        println!(
            "Pools: {} items, {} fillers (ratio {})",
            report.items_count, report.fillers_count, report.filler_ratio
        );
        match report.seed {
            Some(seed) => println!("Seed: {seed}"),
            None => println!("Seed: none (shuffle is non-reproducible)"),
        }
        println!("Compiler: {}", report.compiler);
        println!("All inputs check out.");
    }
    0
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
