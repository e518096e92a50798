//! UCI command parsing.

use std::time::Duration;

use kibitz_core::{ChessPosition, Move, Position};

use crate::error::UciError;

/// Deepest search `setoption name Depth` accepts.
pub const MAX_DEPTH_OPTION: u8 = 64;

/// Parameters for the `go` command.
///
/// All fields are optional; a bare `go` uses defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub wtime: Option<Duration>,
    pub btime: Option<Duration>,
    pub winc: Option<Duration>,
    pub binc: Option<Duration>,
    /// Moves until next time control.
    pub movestogo: Option<u32>,
    /// Search to this depth only.
    pub depth: Option<u8>,
    /// Budget for this move.
    pub movetime: Option<Duration>,
    /// Search until `stop`.
    pub infinite: bool,
}

/// Options settable through `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciOption {
    /// Default maximum search depth.
    Depth(u8),
}

/// A parsed UCI command.
#[derive(Debug)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- reset engine state.
    UciNewGame,
    /// `position` -- the position with every listed move applied.
    Position(ChessPosition),
    /// `go` -- start searching with given parameters.
    Go(GoParams),
    SetOption(UciOption),
    /// `stop` -- halt the current search after its running depth.
    Stop,
    /// `debug on|off`.
    Debug(bool),
    /// `quit` -- exit the engine.
    Quit,
    /// Unrecognized command, ignored.
    Unknown(String),
}

/// Parse a single line of UCI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = tokens.split_first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match head {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "debug" => Ok(Command::Debug(args.first() == Some(&"on"))),
        "position" => parse_position(args),
        "go" => parse_go(args),
        "setoption" => parse_setoption(args),
        _ => Ok(Command::Unknown(head.to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves e2e4 d7d5 ...]`
/// - `position fen <fen-string> [moves e2e4 d7d5 ...]`
///
/// The FEN runs up to the `moves` keyword.
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    let Some((&kind, rest)) = tokens.split_first() else {
        return Err(UciError::MalformedPosition);
    };

    let moves_at = rest.iter().position(|t| *t == "moves").unwrap_or(rest.len());
    let (setup, moves) = rest.split_at(moves_at);

    let mut position = match kind {
        "startpos" => ChessPosition::starting_position(),
        "fen" => {
            let fen = setup.join(" ");
            fen.parse::<ChessPosition>()
                .map_err(|source| UciError::InvalidFen { fen, source })?
        }
        _ => return Err(UciError::MalformedPosition),
    };

    for uci_str in moves.iter().skip(1) {
        Move::from_uci(uci_str)
            .and_then(|mv| position.push(mv))
            .map_err(|source| UciError::InvalidMove {
                uci_move: uci_str.to_string(),
                source,
            })?;
    }

    Ok(Command::Position(position))
}

/// Parse the `go` command arguments.
///
/// Supports: wtime, btime, winc, binc, movestogo, depth, movetime,
/// infinite. Unknown tokens are silently skipped.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut params = GoParams::default();

    let mut i = 0;
    while i < tokens.len() {
        let value = tokens.get(i + 1);
        match tokens[i] {
            "wtime" => params.wtime = Some(parse_millis(value, "wtime")?),
            "btime" => params.btime = Some(parse_millis(value, "btime")?),
            "winc" => params.winc = Some(parse_millis(value, "winc")?),
            "binc" => params.binc = Some(parse_millis(value, "binc")?),
            "movestogo" => params.movestogo = Some(parse_int(value, "movestogo")?),
            "depth" => params.depth = Some(parse_int(value, "depth")?),
            "movetime" => params.movetime = Some(parse_millis(value, "movetime")?),
            "infinite" => {
                params.infinite = true;
                i += 1;
                continue;
            }
            _ => {
                i += 1;
                continue;
            }
        }
        i += 2;
    }

    Ok(Command::Go(params))
}

/// Parse `setoption name <name> value <value>`.
fn parse_setoption(tokens: &[&str]) -> Result<Command, UciError> {
    let name_at = tokens.iter().position(|t| *t == "name");
    let value_at = tokens.iter().position(|t| *t == "value");

    let (Some(name_at), Some(value_at)) = (name_at, value_at) else {
        return Err(UciError::InvalidOption {
            detail: tokens.join(" "),
        });
    };
    let name = tokens
        .get(name_at + 1..value_at)
        .map(|words| words.join(" "))
        .unwrap_or_default();
    let value = tokens.get(value_at + 1..).map(|words| words.join(" ")).unwrap_or_default();

    if !name.eq_ignore_ascii_case("depth") {
        return Err(UciError::InvalidOption {
            detail: format!("unknown option {name}"),
        });
    }

    match value.parse::<u8>() {
        Ok(depth) if (1..=MAX_DEPTH_OPTION).contains(&depth) => {
            Ok(Command::SetOption(UciOption::Depth(depth)))
        }
        _ => Err(UciError::InvalidOption {
            detail: format!("Depth must be 1..={MAX_DEPTH_OPTION}, got {value}"),
        }),
    }
}

/// Parse a millisecond value from a token.
fn parse_millis(token: Option<&&str>, param: &str) -> Result<Duration, UciError> {
    parse_int(token, param).map(Duration::from_millis)
}

/// Parse an integer value from a token.
fn parse_int<T: std::str::FromStr>(token: Option<&&str>, param: &str) -> Result<T, UciError> {
    let value = token.ok_or_else(|| UciError::MissingGoValue {
        param: param.to_string(),
    })?;
    value.parse().map_err(|_| UciError::InvalidGoValue {
        param: param.to_string(),
        value: value.to_string(),
    })
}
