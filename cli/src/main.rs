use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use tacopt_core::{
    AstNode, OptimizedOp, PassOptions, TacOp, generate_error_report, lower_ast_to_tac, optimize_tac, optimize_tree,
    render_source, run_pipeline,
};
use tracing_subscriber::EnvFilter;

mod output;

use output::FormatStyle;

fn main() -> ExitCode {
    init_logging();

    let cli = Command::new("tacopt")
        .version("0.1.0")
        .about("Lowers syntax trees to three-address code and folds constants");

    let cli = setup_cli(cli);
    let matches = cli.get_matches();

    match dispatch_commands(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{}", FormatStyle::default().error.apply_to(report));
            ExitCode::FAILURE
        }
    }
}

/// Log records from the core crate go through the `log` facade; the fmt
/// subscriber picks them up and writes them to stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_env("TACOPT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn file_arg() -> Arg {
    Arg::new("file")
        .help("Syntax tree as JSON, or - to read from stdin")
        .required(true)
        .index(1)
}

/// Sets up the CLI with subcommands and arguments.
fn setup_cli(cli: Command) -> Command {
    cli.arg(
        Arg::new("max-depth")
            .help("Maximum tree nesting depth accepted by every pass")
            .long("max-depth")
            .global(true)
            .value_parser(clap::value_parser!(usize))
            .value_name("N"),
    )
    .arg(
        Arg::new("json")
            .help("Print machine-readable JSON instead of text")
            .long("json")
            .global(true)
            .action(ArgAction::SetTrue),
    )
    .subcommand(
        Command::new("lower")
            .about("Lower a syntax tree to three-address code")
            .arg(file_arg()),
    )
    .subcommand(
        Command::new("fold-tree")
            .about("Fold constants and prune constant conditionals in the tree")
            .arg(file_arg()),
    )
    .subcommand(
        Command::new("fold-tac")
            .about("Lower a syntax tree and fold constant instructions")
            .arg(file_arg()),
    )
    .subcommand(
        Command::new("run")
            .about("Run the whole pipeline on a syntax tree")
            .arg(file_arg())
            .arg(
                Arg::new("fold-tree")
                    .help("Optimize the tree before lowering it")
                    .long("fold-tree")
                    .action(ArgAction::SetTrue),
            ),
    )
}

fn pass_options(sub_m: &ArgMatches) -> PassOptions {
    let mut options = PassOptions::default();
    if let Some(depth) = sub_m.get_one::<usize>("max-depth") {
        options = options.with_max_depth(*depth);
    }
    options
}

fn read_tree(sub_m: &ArgMatches) -> Result<AstNode, String> {
    let file = sub_m.get_one::<String>("file").ok_or("missing input file")?;

    let text = if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Error reading stdin: {}", e))?;
        buf
    } else {
        fs::read_to_string(file).map_err(|e| format!("Error reading {}: {}", file, e))?
    };
    log::debug!("read {} bytes from {}", text.len(), file);

    AstNode::from_json(&text).map_err(|e| format!("Error parsing syntax tree from {}: {}", file, e))
}

/// JSON shape of `run --json`.
#[derive(Serialize)]
struct PipelineJson<'a> {
    tree: &'a AstNode,
    tac: &'a [TacOp],
    optimized: &'a [OptimizedOp],
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Error serializing output: {}", e))
}

/// Dispatches the command based on the parsed arguments.
/// Every failure comes back as a ready-to-print report.
fn dispatch_commands(matches: &ArgMatches) -> Result<(), String> {
    let style = FormatStyle::default();

    match matches.subcommand() {
        Some(("lower", sub_m)) => {
            let tree = read_tree(sub_m)?;
            let tac = lower_ast_to_tac(&tree, &pass_options(sub_m)).map_err(|e| generate_error_report(&e))?;

            if sub_m.get_flag("json") {
                println!("{}", to_json(&tac)?);
            } else {
                print!("{}", output::tac_listing(&tac, &style));
            }
        }
        Some(("fold-tree", sub_m)) => {
            let tree = read_tree(sub_m)?;
            let folded = optimize_tree(tree, &pass_options(sub_m)).map_err(|e| generate_error_report(&e))?;

            if sub_m.get_flag("json") {
                println!("{}", to_json(&folded)?);
            } else {
                print!("{}", render_source(&folded));
            }
        }
        Some(("fold-tac", sub_m)) => {
            let tree = read_tree(sub_m)?;
            let tac = lower_ast_to_tac(&tree, &pass_options(sub_m)).map_err(|e| generate_error_report(&e))?;
            let optimized = optimize_tac(&tac);

            if sub_m.get_flag("json") {
                println!("{}", to_json(&optimized)?);
            } else {
                println!("{}", output::optimized_table(&optimized));
                println!("{}", output::fold_summary(&optimized, &style));
            }
        }
        Some(("run", sub_m)) => {
            let tree = read_tree(sub_m)?;
            let options = pass_options(sub_m).with_fold_tree(sub_m.get_flag("fold-tree"));
            let result = run_pipeline(tree, &options).map_err(|e| generate_error_report(&e))?;

            if sub_m.get_flag("json") {
                let value = PipelineJson { tree: &result.tree, tac: &result.tac, optimized: &result.optimized };
                println!("{}", to_json(&value)?);
            } else {
                if options.fold_tree {
                    println!("{}", output::title("Source", &style));
                    print!("{}", render_source(&result.tree));
                    println!();
                }
                println!("{}", output::title("TAC", &style));
                print!("{}", output::tac_listing(&result.tac, &style));
                println!();
                println!("{}", output::title("Optimized", &style));
                println!("{}", output::optimized_table(&result.optimized));
                println!("{}", output::fold_summary(&result.optimized, &style));
            }
        }
        _ => {
            return Err("No valid subcommand was used. Use --help for more information.".to_string());
        }
    }
    Ok(())
}
