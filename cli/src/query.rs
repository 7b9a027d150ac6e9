//! Interactive query loop over a finished claim.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use claimcheck_replay::ClaimReport;

use crate::render::snippet_line;

pub const HELP: &str = "Commands: docs, supports, refutes, stats, trace, exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCommand {
    Documents,
    Supports,
    Refutes,
    Stats,
    Trace,
    Exit,
}

impl FromStr for QueryCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "docs" | "documents" => Ok(QueryCommand::Documents),
            "supports" | "support" => Ok(QueryCommand::Supports),
            "refutes" | "refute" => Ok(QueryCommand::Refutes),
            "stats" => Ok(QueryCommand::Stats),
            "trace" => Ok(QueryCommand::Trace),
            "exit" | "quit" => Ok(QueryCommand::Exit),
            other => Err(format!("Unknown command '{}'. {}", other, HELP)),
        }
    }
}

/// Answer one query. Snippet queries list every snippet, not just the top k.
pub fn respond(command: QueryCommand, report: &ClaimReport) -> Vec<String> {
    let run = report.run();

    match command {
        QueryCommand::Documents => {
            let docs = run.map(|r| r.list_documents()).unwrap_or_default();
            if docs.is_empty() {
                vec!["No documents ingested.".to_string()]
            } else {
                docs.iter().map(|url| format!("• {}", url)).collect()
            }
        }
        QueryCommand::Supports => {
            let snippets = run.map(|r| r.list_supporting(r.all())).unwrap_or_default();
            if snippets.is_empty() {
                vec!["No supporting snippets.".to_string()]
            } else {
                snippets.iter().map(snippet_line).collect()
            }
        }
        QueryCommand::Refutes => {
            let snippets = run.map(|r| r.list_refuting(r.all())).unwrap_or_default();
            if snippets.is_empty() {
                vec!["No refuting snippets.".to_string()]
            } else {
                snippets.iter().map(snippet_line).collect()
            }
        }
        QueryCommand::Stats => vec![format!("Graph stats: {}", report.stats)],
        QueryCommand::Trace => {
            if report.trace.is_empty() {
                vec!["No trace recorded.".to_string()]
            } else {
                report.trace.clone()
            }
        }
        QueryCommand::Exit => Vec::new(),
    }
}

/// Read commands from `input` until `exit` or end of input.
pub fn run_query_loop<R: BufRead, W: Write>(
    report: &ClaimReport,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "Query the evidence graph for \"{}\". {}", report.claim, HELP)?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<QueryCommand>() {
            Ok(QueryCommand::Exit) => break,
            Ok(command) => {
                for response in respond(command, report) {
                    writeln!(output, "{}", response)?;
                }
            }
            Err(message) => writeln!(output, "{}", message)?,
        }
    }

    Ok(())
}
