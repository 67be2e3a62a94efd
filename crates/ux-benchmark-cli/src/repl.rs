//! Interactive REPL for UX Benchmark.
//!
//! Launch with `ux-benchmark repl`. Analyses share one analyzer, so
//! re-analyzing a URL in the same session reuses the cached fetches.

use std::time::Duration;

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config, Editor, Event, EventContext, EventHandler, Helper,
    KeyEvent, RepeatCount,
};
use ux_benchmark::Analyzer;

use crate::commands;

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/analyze", "Analyze a URL and rank it against the references"),
    ("/references", "Show the reference benchmark table"),
    ("/cache", "Show how many fetches are cached"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the REPL"),
];

/// REPL helper for tab completion.
#[derive(Default)]
struct BenchHelper;

impl Completer for BenchHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];
        if input.contains(' ') {
            return Ok((pos, Vec::new()));
        }

        let matches: Vec<Pair> = COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| Pair {
                display: format!("{cmd:<16} {desc}"),
                replacement: format!("{cmd} "),
            })
            .collect();
        Ok((0, matches))
    }
}

impl Hinter for BenchHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for BenchHelper {}
impl Validator for BenchHelper {}
impl Helper for BenchHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// What the REPL should do with one input line.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Analyze(&'a str),
    References,
    Cache,
    Clear,
    Help,
    Exit,
    Usage(&'static str),
    Unknown(&'a str),
}

/// Parse one input line. A bare word without `/` is treated as a URL.
pub fn parse_line(line: &str) -> Option<ReplCommand<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(input) = line.strip_prefix('/') else {
        return Some(ReplCommand::Analyze(line));
    };
    if input.is_empty() {
        return Some(ReplCommand::Help);
    }

    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    Some(match cmd {
        "exit" | "quit" => ReplCommand::Exit,
        "help" | "h" | "?" => ReplCommand::Help,
        "clear" | "cls" => ReplCommand::Clear,
        "references" | "refs" => ReplCommand::References,
        "cache" => ReplCommand::Cache,
        "analyze" | "a" if args.is_empty() => ReplCommand::Usage("/analyze <url>"),
        "analyze" | "a" => ReplCommand::Analyze(args),
        _ => ReplCommand::Unknown(cmd),
    })
}

/// Run the interactive REPL.
pub async fn run(analyzer: &Analyzer, narrate_delay: Duration) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mux-benchmark v{}\x1b[0m \x1b[90m\u{2014} UX Beauty Benchmark\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!(
        "    Paste a URL or press \x1b[36m/\x1b[0m to browse commands, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<BenchHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(BenchHelper));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    let hist_path = std::path::PathBuf::from(&home).join(".ux_benchmark_history");
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let prompt = " \x1b[36mux>\x1b[0m ";

    loop {
        match rl.readline(prompt) {
            Ok(line) => match parse_line(&line) {
                None => continue,
                Some(ReplCommand::Exit) => {
                    eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                    break;
                }
                Some(ReplCommand::Help) => cmd_help(),
                Some(ReplCommand::Clear) => eprint!("\x1b[2J\x1b[H"),
                Some(ReplCommand::References) => {
                    if let Err(e) = commands::references() {
                        eprintln!("  Error: {e:#}");
                    }
                }
                Some(ReplCommand::Cache) => {
                    let fetcher = analyzer.fetcher();
                    eprintln!(
                        "  Cached: {} page(s), {} stylesheet bundle(s)",
                        fetcher.cached_pages(),
                        fetcher.cached_stylesheets()
                    );
                }
                Some(ReplCommand::Analyze(url)) => {
                    if let Err(e) = commands::analyze(analyzer, url, narrate_delay).await {
                        eprintln!("  {e:#}");
                    }
                }
                Some(ReplCommand::Usage(usage)) => eprintln!("  Usage: {usage}"),
                Some(ReplCommand::Unknown(cmd)) => {
                    eprintln!("  Unknown command '/{cmd}'. Type /help for commands.");
                }
            },
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(&hist_path);

    Ok(())
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<18} {desc}");
    }
    eprintln!();
    eprintln!("  Tip: typing a bare URL runs /analyze on it.");
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_ignored() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
    }

    #[test]
    fn test_bare_url_is_analyze() {
        assert_eq!(
            parse_line("  example.com "),
            Some(ReplCommand::Analyze("example.com"))
        );
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(parse_line("/"), Some(ReplCommand::Help));
        assert_eq!(parse_line("/exit"), Some(ReplCommand::Exit));
        assert_eq!(parse_line("/quit"), Some(ReplCommand::Exit));
        assert_eq!(parse_line("/refs"), Some(ReplCommand::References));
        assert_eq!(parse_line("/cache"), Some(ReplCommand::Cache));
        assert_eq!(
            parse_line("/analyze https://figma.com"),
            Some(ReplCommand::Analyze("https://figma.com"))
        );
    }

    #[test]
    fn test_analyze_without_url_shows_usage() {
        assert_eq!(
            parse_line("/analyze"),
            Some(ReplCommand::Usage("/analyze <url>"))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(parse_line("/dance"), Some(ReplCommand::Unknown("dance")));
    }
}
