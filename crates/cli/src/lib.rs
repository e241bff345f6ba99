pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "polysim",
    about = "Underwriting policy simulation CLI",
    long_about = "Evaluate eligibility rules, scoring configs, and decision trees against \
                  sample applicant data, and diff policy snapshots.",
    after_help = "Examples:\n  polysim simulate --applicant applicant.json --rules rules.json --scoring scoring.json\n  polysim tree-test --tree tree.json --data applicant.json\n  polysim diff --base v1.json --compare v2.json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run the full simulation pipeline against file-supplied documents")]
    Simulate {
        #[arg(long, help = "Applicant data JSON file")]
        applicant: PathBuf,
        #[arg(long, help = "Eligibility rule tree JSON file")]
        rules: Option<PathBuf>,
        #[arg(long, help = "Scoring config JSON file")]
        scoring: Option<PathBuf>,
        #[arg(long, help = "Decision tree JSON file")]
        tree: Option<PathBuf>,
    },
    #[command(name = "tree-test", about = "Evaluate a decision tree in isolation")]
    TreeTest {
        #[arg(long, help = "Decision tree JSON file")]
        tree: PathBuf,
        #[arg(long, help = "Applicant data JSON file")]
        data: PathBuf,
    },
    #[command(about = "Score applicant data against a scoring config")]
    Score {
        #[arg(long, help = "Scoring config JSON file")]
        scoring: PathBuf,
        #[arg(long, help = "Applicant data JSON file")]
        data: PathBuf,
    },
    #[command(name = "check-scoring", about = "Check a scoring config's weights and categories")]
    CheckScoring {
        #[arg(long, help = "Scoring config JSON file")]
        scoring: PathBuf,
    },
    #[command(about = "Check a policy's authoring completeness")]
    Validate {
        #[arg(long, help = "Policy record JSON file")]
        policy: PathBuf,
        #[arg(long, help = "Eligibility rule tree JSON file")]
        rules: Option<PathBuf>,
        #[arg(long, help = "Scoring config JSON file")]
        scoring: Option<PathBuf>,
        #[arg(long, help = "Decision tree JSON file")]
        tree: Option<PathBuf>,
        #[arg(long, help = "Clause list JSON file")]
        clauses: Option<PathBuf>,
    },
    #[command(about = "Render a rule tree as a SQL WHERE-clause preview")]
    Sql {
        #[arg(long, help = "Eligibility rule tree JSON file")]
        rules: PathBuf,
    },
    #[command(about = "Structurally diff two JSON documents")]
    Diff {
        #[arg(long, help = "Base document JSON file")]
        base: PathBuf,
        #[arg(long, help = "Compare document JSON file")]
        compare: PathBuf,
    },
    #[command(about = "Inspect effective configuration values")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Simulate { applicant, rules, scoring, tree } => commands::simulate::run(
            &applicant,
            rules.as_deref(),
            scoring.as_deref(),
            tree.as_deref(),
        ),
        Command::TreeTest { tree, data } => commands::tree::run(&tree, &data),
        Command::Score { scoring, data } => commands::scoring::run_score(&scoring, &data),
        Command::CheckScoring { scoring } => commands::scoring::run_check(&scoring),
        Command::Validate { policy, rules, scoring, tree, clauses } => commands::validate::run(
            &policy,
            rules.as_deref(),
            scoring.as_deref(),
            tree.as_deref(),
            clauses.as_deref(),
        ),
        Command::Sql { rules } => commands::sql::run(&rules),
        Command::Diff { base, compare } => commands::diff::run(&base, &compare),
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
