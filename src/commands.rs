use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::errors::{Result, TrackLinkError};
use crate::format::format_outcome;
use crate::types::{PathStep, VertexKind};

/// Token separating track names inside a command.
pub const TRACK_LIST_SEPARATOR: &str = ">>>>";

/// A parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `path <track> >>>> <track>`
    Path { from: String, to: String },
    /// `top <n>`
    Top { n: usize },
    /// `recommend tracks|users <n> <track> >>>> <track> ...`
    Recommend {
        target: VertexKind,
        n: usize,
        seeds: Vec<String>,
    },
    /// `cycle <n> <track>`
    Cycle { n: usize, track: String },
    /// `range <n> <track>`
    Range { n: usize, track: String },
}

/// Result of running a [`Command`], ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Path(Option<Vec<PathStep>>),
    Ranked(Vec<String>),
    Cycle(Option<Vec<String>>),
    Count(usize),
}

/// Parses one line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match name {
        "path" => {
            let tracks = split_tracks(args);
            match tracks.as_slice() {
                [from, to] => Command::Path {
                    from: from.clone(),
                    to: to.clone(),
                },
                _ => {
                    return Err(malformed(format!(
                        "path needs two tracks separated by '{TRACK_LIST_SEPARATOR}'"
                    )))
                }
            }
        }
        "top" => Command::Top {
            n: parse_count(args.first())?,
        },
        "recommend" => {
            let target = args
                .first()
                .and_then(|t| VertexKind::from_str(t))
                .ok_or_else(|| malformed("recommend needs 'tracks' or 'users'"))?;
            let n = parse_count(args.get(1))?;
            let seeds = split_tracks(args.get(2..).unwrap_or_default());
            if seeds.is_empty() {
                return Err(malformed("recommend needs at least one track"));
            }
            Command::Recommend { target, n, seeds }
        }
        "cycle" | "range" => {
            let n = parse_count(args.first())?;
            let track = args.get(1..).unwrap_or_default().join(" ");
            if track.is_empty() {
                return Err(malformed(format!("{name} needs a track")));
            }
            if name == "cycle" {
                Command::Cycle { n, track }
            } else {
                Command::Range { n, track }
            }
        }
        other => {
            return Err(TrackLinkError::UnknownCommand {
                command: other.to_string(),
            })
        }
    };
    Ok(Some(command))
}

/// Runs `command` against `catalog`.
pub fn execute(catalog: &mut Catalog, command: &Command) -> Result<Outcome> {
    debug!(?command, "executing command");
    match command {
        Command::Path { from, to } => catalog.path(from, to).map(Outcome::Path),
        Command::Top { n } => catalog.most_important(*n).map(Outcome::Ranked),
        Command::Recommend { target, n, seeds } => {
            catalog.recommend(*target, *n, seeds).map(Outcome::Ranked)
        }
        Command::Cycle { n, track } => catalog.cycle(*n, track).map(Outcome::Cycle),
        Command::Range { n, track } => catalog.range(*n, track).map(Outcome::Count),
    }
}

/// Reads commands line by line and writes one output line per command.
///
/// A command that fails writes its error message instead; the session goes
/// on with the next line. Only I/O failures abort it. Returns the number of
/// commands processed.
pub fn run_session<R, W>(catalog: &mut Catalog, input: R, mut output: W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut processed = 0;
    for line in input.lines() {
        let line = line?;
        let rendered = match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => execute(catalog, &command).map(|o| format_outcome(&o)),
            Err(e) => Err(e),
        };
        let text = rendered.unwrap_or_else(|e| {
            warn!(line = line.as_str(), error = %e, "command failed");
            e.to_string()
        });
        writeln!(output, "{text}")?;
        processed += 1;
    }
    output.flush()?;
    Ok(processed)
}

/// Groups words into track names at every [`TRACK_LIST_SEPARATOR`] token.
fn split_tracks(words: &[&str]) -> Vec<String> {
    words
        .split(|w| *w == TRACK_LIST_SEPARATOR)
        .map(|group| group.join(" "))
        .filter(|track| !track.is_empty())
        .collect()
}

/// Parses a count argument, which must be a whole number of at least 1.
fn parse_count(token: Option<&&str>) -> Result<usize> {
    let token = token.ok_or_else(|| malformed("missing number"))?;
    let value: i64 = token
        .parse()
        .map_err(|_| malformed(format!("'{token}' is not a number")))?;
    if value < 1 {
        return Err(TrackLinkError::invalid(format!(
            "expected a number >= 1, got {value}"
        )));
    }
    usize::try_from(value).map_err(|_| TrackLinkError::invalid(format!("{value} is too large")))
}

fn malformed(message: impl Into<String>) -> TrackLinkError {
    TrackLinkError::MalformedCommand {
        message: message.into(),
    }
}
