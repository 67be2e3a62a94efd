//! UX Benchmark CLI: entry point.

use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use ux_benchmark::Analyzer;
use ux_benchmark_cli::{commands, output, repl, resolve_config, ConfigOverrides};

#[derive(Parser)]
#[command(
    name = "ux-benchmark",
    about = "UX Beauty Benchmark: score a website's UX and rank it against Apple iOS, Airbnb, Notion, Tesla UI, and Figma",
    version,
    after_help = "Run 'ux-benchmark <command> --help' for details on each command.\nRun 'ux-benchmark' with no command to enter interactive mode."
)]
struct Cli {
    /// Output results as JSON (machine-readable).
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Main page timeout in milliseconds.
    /// Also reads UXBENCH_PAGE_TIMEOUT_MS.
    #[arg(long, global = true)]
    page_timeout_ms: Option<u64>,

    /// Per-stylesheet timeout in milliseconds.
    /// Also reads UXBENCH_CSS_TIMEOUT_MS.
    #[arg(long, global = true)]
    css_timeout_ms: Option<u64>,

    /// Maximum number of linked stylesheets to fetch.
    /// Also reads UXBENCH_CSS_LIMIT.
    #[arg(long, global = true)]
    css_limit: Option<usize>,

    /// Pause between narration lines, in milliseconds.
    #[arg(long, global = true, default_value = "0")]
    narrate_delay_ms: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a website and rank it against the reference products.
    Analyze {
        /// URL to analyze (scheme optional, defaults to https://).
        url: String,
    },

    /// Show the reference benchmark table.
    References,

    /// Rank a set of scores you supply against the reference products.
    Table {
        /// Row label for the supplied scores.
        label: String,

        /// JSON object of factor name to score (1-10). Factors may be omitted.
        #[arg(long)]
        scores: String,
    },

    /// Launch interactive REPL mode.
    Repl,

    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.json {
        output::enable_json();
    }

    let overrides = ConfigOverrides {
        page_timeout_ms: cli.page_timeout_ms,
        css_timeout_ms: cli.css_timeout_ms,
        css_limit: cli.css_limit,
    };
    let narrate_delay = Duration::from_millis(cli.narrate_delay_ms);

    let result = match cli.command {
        None | Some(Commands::Repl) => {
            let analyzer = Analyzer::new(resolve_config(&overrides))?;
            repl::run(&analyzer, narrate_delay).await
        }
        Some(Commands::Analyze { url }) => {
            let analyzer = Analyzer::new(resolve_config(&overrides))?;
            commands::analyze(&analyzer, &url, narrate_delay).await
        }
        Some(Commands::References) => commands::references(),
        Some(Commands::Table { label, scores }) => commands::table(&label, &scores),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "ux-benchmark", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if output::is_json() {
            output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        } else {
            eprintln!("{e:#}");
        }
        std::process::exit(1);
    }

    result
}
