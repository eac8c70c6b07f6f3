//! Water Jug Solver
//!
//! Command-line front end: solves an `(n, m, k)` instance with one strategy,
//! compares all strategies side by side, checks solvability, or replays a
//! move sequence typed by hand.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};

use waterjug::{
    format_path, HeuristicKind, Move, Report, SearchConfig, SearchPath, SearchStatus, State,
    StrategyKind,
};

/// Finds move sequences that measure out a target quantity with two containers.
#[derive(Parser)]
#[command(name = "waterjug")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve an instance with one strategy and print the path.
    Solve {
        #[command(flatten)]
        instance: Instance,
        /// Search strategy to run.
        #[arg(short, long, value_enum, default_value_t = StrategyArg::Bfs)]
        strategy: StrategyArg,
        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Run every strategy on an instance and summarize the outcomes.
    Compare {
        #[command(flatten)]
        instance: Instance,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Report whether the target is reachable at all.
    Check {
        #[command(flatten)]
        instance: Instance,
    },
    /// Apply moves such as `fill0`, `pour1` or `empty0` and print each state.
    Replay {
        #[command(flatten)]
        instance: Instance,
        /// Moves to apply, in order.
        moves: Vec<Move>,
    },
}

#[derive(Args)]
struct Instance {
    /// Capacity of container 0.
    n: u64,
    /// Capacity of container 1.
    m: u64,
    /// Target quantity.
    k: u64,
}

impl Instance {
    fn initial(&self) -> State {
        State::initial(self.n, self.m, self.k)
    }
}

/// Search tuning. Values given here override the configuration file.
#[derive(Args, Default)]
struct Tuning {
    /// JSON file with search settings.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    max_visited_states: Option<usize>,
    #[arg(long)]
    max_moves: Option<usize>,
    #[arg(long)]
    iterations: Option<usize>,
    #[arg(long)]
    max_depth: Option<usize>,
    #[arg(long)]
    max_improvements: Option<usize>,
    #[arg(long, value_enum)]
    heuristic: Option<HeuristicArg>,
    /// Seed for the randomized strategies.
    #[arg(long)]
    seed: Option<u64>,
}

impl Tuning {
    fn load(&self) -> waterjug::Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_json_file(path)?,
            None => SearchConfig::default(),
        };
        if let Some(cap) = self.max_visited_states {
            config = config.with_max_visited_states(cap);
        }
        if let Some(max_moves) = self.max_moves {
            config = config.with_max_moves(max_moves);
        }
        if let Some(iterations) = self.iterations {
            config = config.with_iterations(iterations);
        }
        if let Some(max_depth) = self.max_depth {
            config = config.with_max_depth(max_depth);
        }
        if let Some(max_improvements) = self.max_improvements {
            config = config.with_max_improvements(max_improvements);
        }
        if let Some(heuristic) = self.heuristic {
            config = config.with_heuristic(heuristic.into());
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Bfs,
    Backtracking,
    Bounded,
    Greedy,
    Stochastic,
    BestFirst,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Bfs => StrategyKind::Bfs,
            StrategyArg::Backtracking => StrategyKind::Backtracking,
            StrategyArg::Bounded => StrategyKind::BoundedBacktracking,
            StrategyArg::Greedy => StrategyKind::GreedyHillClimbing,
            StrategyArg::Stochastic => StrategyKind::StochasticHillClimbing,
            StrategyArg::BestFirst => StrategyKind::BestFirst,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum HeuristicArg {
    Lookahead,
    AbsoluteDifference,
    SumDifference,
}

impl From<HeuristicArg> for HeuristicKind {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Lookahead => HeuristicKind::Lookahead,
            HeuristicArg::AbsoluteDifference => HeuristicKind::AbsoluteDifference,
            HeuristicArg::SumDifference => HeuristicKind::SumDifference,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Executes a command and returns the text to print.
fn run(command: Command) -> waterjug::Result<String> {
    match command {
        Command::Solve {
            instance,
            strategy,
            json,
            tuning,
        } => {
            let config = tuning.load()?;
            let kind = StrategyKind::from(strategy);
            let report = waterjug::solve(kind, instance.n, instance.m, instance.k, &config)?;
            if json {
                let mut output = serde_json::to_string_pretty(&report)?;
                output.push('\n');
                Ok(output)
            } else {
                Ok(render_report(kind, instance.initial(), &report))
            }
        }
        Command::Compare { instance, tuning } => {
            let config = tuning.load()?;
            run_compare(&instance, &config)
        }
        Command::Check { instance } => Ok(render_check(instance.initial())),
        Command::Replay { instance, moves } => {
            let path = SearchPath::try_from_moves(instance.initial(), moves)?;
            Ok(render_replay(&path))
        }
    }
}

/// Formats a single strategy's outcome followed by its path.
fn render_report(kind: StrategyKind, initial: State, report: &Report) -> String {
    let mut output = format!("{kind} from {initial}\n");
    output.push_str(&format!(
        "{}: {} moves, {} states expanded",
        report.status,
        report.path.move_count(),
        report.stats.expanded
    ));
    if report.stats.iterations > 0 {
        output.push_str(&format!(", {} iterations", report.stats.iterations));
    }
    output.push('\n');
    if report.status != SearchStatus::Unsolvable {
        output.push_str(&format_path(&report.path));
    }
    output
}

/// Runs every strategy and prints one row per strategy.
fn run_compare(instance: &Instance, config: &SearchConfig) -> waterjug::Result<String> {
    let mut output = format!("{}\n", instance.initial());
    output.push_str(&format!(
        "{:<26}{:<18}{:>6}{:>10}\n",
        "strategy", "status", "moves", "expanded"
    ));
    for kind in StrategyKind::ALL {
        let report = waterjug::solve(kind, instance.n, instance.m, instance.k, config)?;
        let moves = if report.is_solved() {
            report.path.move_count().to_string()
        } else {
            "-".to_string()
        };
        output.push_str(&format!(
            "{:<26}{:<18}{:>6}{:>10}\n",
            kind.name(),
            report.status.to_string(),
            moves,
            report.stats.expanded
        ));
    }
    Ok(output)
}

fn render_check(initial: State) -> String {
    let verdict = if initial.has_solution() {
        "solvable"
    } else {
        "unsolvable"
    };
    format!("{initial}: {verdict}\n")
}

fn render_replay(path: &SearchPath) -> String {
    let mut output = format_path(path);
    let last = path.last_state();
    let verdict = if last.is_final() { "yes" } else { "no" };
    output.push_str(&format!("Is {last} final? {verdict}\n"));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["waterjug"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bfs_output_snapshot() {
        let output = run(parse(&["solve", "5", "3", "4"])).unwrap();
        insta::assert_snapshot!("bfs_5_3_4", output);
    }

    #[test]
    fn test_flags_override_defaults() {
        let Command::Solve {
            strategy, tuning, ..
        } = parse(&[
            "solve",
            "4",
            "3",
            "1",
            "--strategy",
            "stochastic",
            "--iterations",
            "5",
            "--heuristic",
            "sum-difference",
            "--seed",
            "9",
        ])
        else {
            panic!("expected the solve command");
        };
        assert_eq!(
            StrategyKind::from(strategy),
            StrategyKind::StochasticHillClimbing
        );
        let config = tuning.load().unwrap();
        assert_eq!(config.iterations, 5);
        assert_eq!(config.heuristic, HeuristicKind::SumDifference);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_improvements, SearchConfig::default().max_improvements);
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let tuning = Tuning {
            max_visited_states: Some(0),
            ..Tuning::default()
        };
        assert!(tuning.load().is_err());
    }

    #[test]
    fn test_unsolvable_report_has_no_table() {
        let output = run(parse(&["solve", "6", "8", "3", "-s", "best-first"])).unwrap();
        assert_eq!(
            output,
            "best-first search from (0/6, 0/8) target 3\nunsolvable: 0 moves, 0 states expanded\n"
        );
    }

    #[test]
    fn test_json_output() {
        let output = run(parse(&["solve", "4", "3", "3", "--json"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["status"], "solved");
        assert_eq!(value["path"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["path"][1]["move"]["kind"], "fill");
        assert_eq!(value["stats"]["expanded"], 1);
    }

    #[test]
    fn test_compare_lists_every_strategy() {
        let output = run(parse(&["compare", "5", "3", "4", "--seed", "1"])).unwrap();
        for kind in StrategyKind::ALL {
            assert!(output.contains(kind.name()), "missing {kind} in\n{output}");
        }
        assert_eq!(output.lines().count(), StrategyKind::ALL.len() + 2);
    }

    #[test]
    fn test_check() {
        assert_eq!(
            run(parse(&["check", "5", "3", "4"])).unwrap(),
            "(0/5, 0/3) target 4: solvable\n"
        );
        assert_eq!(
            run(parse(&["check", "6", "8", "3"])).unwrap(),
            "(0/6, 0/8) target 3: unsolvable\n"
        );
    }

    #[test]
    fn test_replay() {
        let output = run(parse(&["replay", "4", "3", "1", "fill0", "pour0"])).unwrap();
        assert!(output.ends_with("Is (1/4, 3/3) target 1 final? yes\n"), "{output}");
        assert_eq!(output.lines().count(), 5);
    }

    #[test]
    fn test_replay_rejects_no_op_moves() {
        let result = run(parse(&["replay", "4", "3", "1", "pour0"]));
        assert!(matches!(result, Err(waterjug::Error::IllegalMove { .. })));
    }

    #[test]
    fn test_replay_rejects_unknown_moves() {
        let argv = ["waterjug", "replay", "4", "3", "1", "drain0"];
        assert!(Cli::try_parse_from(argv).is_err());
    }
}
