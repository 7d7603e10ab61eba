use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use trad_getopt_core::{
    Args as ArgList, DiagnosticStyle, Getopt, GetoptConfig, LongOptions, Outcome, OutputFormat,
    ShortSpec, Trace, format_trace, render_trace, validate_short_spec,
};

#[derive(Debug, Parser)]
#[command(name = "getopt-trace")]
#[command(about = "Trace how traditional getopt parses a command line")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse the arguments completely and print the classified trace.
    Trace(TraceArgs),
    /// Print the arguments as the parser sees them, one token per line.
    Render(RenderArgs),
    /// Validate short and long option specifications.
    Check(CheckArgs),
    /// Run the parser once and print the outcome and the remaining arguments.
    Next(NextArgs),
}

/// Parser setup shared by the parsing subcommands.
#[derive(Debug, Args)]
struct ParserArgs {
    /// Short option spec (e.g. "ab:c::").
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    short: String,
    /// Long options in getopt(1) syntax (e.g. "verbose,output:,color::").
    #[arg(long, allow_hyphen_values = true)]
    long: Option<String>,
    /// YAML file with parser switches.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Find options anywhere, moving plain arguments behind them.
    #[arg(long)]
    permute: bool,
    /// Require long options to be spelled out in full.
    #[arg(long)]
    no_abbreviation: bool,
    /// Program name used in diagnostics.
    #[arg(long)]
    program_name: Option<String>,
    /// Print option names without dashes in diagnostics.
    #[arg(long)]
    legacy_diagnostics: bool,
}

#[derive(Debug, Args)]
struct TraceArgs {
    #[command(flatten)]
    parser: ParserArgs,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Arguments to parse (after `--`).
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct RenderArgs {
    #[command(flatten)]
    parser: ParserArgs,
    /// Arguments to parse (after `--`).
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Short option spec.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    short: String,
    /// Long options in getopt(1) syntax.
    #[arg(long, allow_hyphen_values = true)]
    long: Option<String>,
}

#[derive(Debug, Args)]
struct NextArgs {
    #[command(flatten)]
    parser: ParserArgs,
    /// Arguments to parse (after `--`).
    #[arg(last = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Trace(args) => run_trace(args),
        Command::Render(args) => run_render(args),
        Command::Check(args) => run_check(args),
        Command::Next(args) => run_next(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_trace(args: TraceArgs) -> Result<(), String> {
    let getopt = build_getopt(&args.parser)?;
    let trace = trace_args(&getopt, args.args)?;
    let output = format_trace(&trace, args.format)?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<(), String> {
    let getopt = build_getopt(&args.parser)?;
    let trace = trace_args(&getopt, args.args)?;
    for token in render_trace(&trace) {
        println!("{token}");
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let mut problems: Vec<String> = validate_short_spec(&args.short)
        .iter()
        .map(ToString::to_string)
        .collect();
    let long = match args.long.as_deref().map(str::parse::<LongOptions>) {
        Some(Ok(table)) => table.len(),
        Some(Err(err)) => {
            problems.push(err.to_string());
            0
        }
        None => 0,
    };

    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("  {problem}");
        }
        return Err(format!("{} problem(s) in option specification", problems.len()));
    }

    let short = ShortSpec::new(&args.short).letters(true).len();
    println!("Specification OK: {short} short option(s), {long} long option(s).");
    Ok(())
}

fn run_next(args: NextArgs) -> Result<(), String> {
    let getopt = build_getopt(&args.parser)?;
    let mut list = ArgList::from(args.args);
    let outcome = getopt.next(&mut list).map_err(|err| err.to_string())?;

    let mut report = match outcome {
        Outcome::Done => serde_json::json!({ "outcome": "done" }),
        Outcome::Plain => serde_json::json!({ "outcome": "plain" }),
        Outcome::Parsed(parsed) => serde_json::json!({ "outcome": "parsed", "option": parsed }),
        Outcome::Error(err) => serde_json::json!({ "outcome": "error", "error": err }),
    };
    report["remaining"] = serde_json::json!(list.into_vec());

    let output = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("JSON serialization failed: {e}"))?;
    println!("{output}");
    Ok(())
}

fn build_getopt(args: &ParserArgs) -> Result<Getopt, String> {
    let mut config = match &args.config {
        Some(path) => GetoptConfig::load(path)
            .map_err(|e| format!("Failed to load config {}: {e}", path.display()))?,
        None => GetoptConfig::default(),
    };
    if args.permute {
        config.permute = true;
    }
    if args.no_abbreviation {
        config.abbreviation = false;
    }
    if args.legacy_diagnostics {
        config.diagnostic_style = DiagnosticStyle::Legacy;
    }
    if let Some(name) = &args.program_name {
        config.program_name = Some(name.clone());
    }

    let short: ShortSpec = args
        .short
        .parse()
        .map_err(|e| format!("Invalid short spec: {e}"))?;
    let mut getopt = Getopt::new(short).with_config(config);
    if let Some(raw) = &args.long {
        let table: LongOptions = raw
            .parse()
            .map_err(|e| format!("Invalid long options: {e}"))?;
        getopt = getopt.with_long_options(table);
    }
    Ok(getopt)
}

fn trace_args(getopt: &Getopt, tokens: Vec<String>) -> Result<Trace, String> {
    let mut list = ArgList::from(tokens);
    getopt.trace(&mut list).map_err(|err| err.to_string())
}
