//! Geoprover CLI
//!
//! Loads JSON problem files, saturates them with the default rules and
//! prints the replayed proof.

use anyhow::{Context, Result};
use clap::Parser;
use geoprover_core::{
    default_ruleset, load_problem, load_problems, GeometryProblem, Ruleset, SearchConfig, SearchOutcome,
    SearchResult,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "geoprover")]
#[command(about = "Prove geometry goals by forward chaining over deduction rules")]
#[command(version)]
struct Args {
    /// Problem file (JSON), or a directory of them
    problem: PathBuf,

    /// Incremental rounds allowed after the first full round
    #[arg(long, default_value_t = SearchConfig::default().max_rounds)]
    max_rounds: usize,

    /// Make every round a full round
    #[arg(long)]
    no_incremental: bool,

    /// Only use these rules (comma separated ids, e.g. D9,D56)
    #[arg(long, value_delimiter = ',')]
    rules: Vec<String>,

    /// Print the search result as JSON
    #[arg(long)]
    json: bool,

    /// Write the search result as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log every search step
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "geoprover=debug,geoprover_core=debug"
    } else {
        "geoprover=info,geoprover_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn ruleset(names: &[String]) -> Result<Arc<Ruleset>> {
    let all = default_ruleset().context("building the default rules")?;
    if names.is_empty() {
        return Ok(Arc::new(all));
    }
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    Ok(Arc::new(all.subset(&names)?))
}

fn load(path: &Path) -> Result<Vec<GeometryProblem>> {
    if path.is_dir() {
        load_problems(path).with_context(|| format!("loading problems from {}", path.display()))
    } else {
        let problem = load_problem(path).with_context(|| format!("loading {}", path.display()))?;
        Ok(vec![problem])
    }
}

fn report(problem: &GeometryProblem, result: &SearchResult) {
    match result.outcome {
        SearchOutcome::Proved { rounds, .. } => {
            println!("{}: proved {} in {} round(s)", problem.id, problem.goal, rounds);
            if let Some(proof) = &result.proof {
                print!("{proof}");
            }
        }
        SearchOutcome::Exhausted { rounds } => {
            println!("{}: not proved, nothing new after {} round(s)", problem.id, rounds);
        }
        SearchOutcome::CapExceeded { rounds } => {
            println!("{}: not proved, stopped at the cap after {} round(s)", problem.id, rounds);
        }
    }
    println!(
        "  {} facts, {} shadowed",
        result.facts_total, result.facts_shadowed
    );
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let ruleset = ruleset(&args.rules)?;
    let config = SearchConfig {
        max_rounds: args.max_rounds,
        incremental: !args.no_incremental,
    };

    let problems = load(&args.problem)?;
    let mut results = Vec::with_capacity(problems.len());
    for problem in &problems {
        tracing::info!(id = %problem.id, hyps = problem.hypotheses.len(), "solving");
        let mut prover = problem
            .to_prover(Arc::clone(&ruleset))
            .with_context(|| format!("setting up {}", problem.id))?
            .with_config(config);
        let result = prover.solve();
        if !args.json {
            report(problem, &result);
        }
        results.push(result);
    }

    if args.json {
        let json = if results.len() == 1 {
            serde_json::to_string_pretty(&results[0])?
        } else {
            serde_json::to_string_pretty(&results)?
        };
        println!("{json}");
    }

    if let Some(path) = &args.output {
        match results.as_slice() {
            [single] => single.to_json_file(path)?,
            many => std::fs::write(path, serde_json::to_string_pretty(many)?)?,
        }
        tracing::info!(path = %path.display(), "wrote search result");
    }

    let all_proved = results.iter().all(|r| r.solved);
    Ok(if all_proved {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
