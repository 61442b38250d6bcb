use crate::board::{Board, BoardError, Vertex};
use crate::config::LaunchConfig;
use crate::search::{CancelToken, SearchEngine, SearchParams};
use crate::time::TimeManager;
use log::{debug, warn};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

pub const ENGINE_NAME: &str = "PieGo";
pub const ENGINE_VERSION: &str = "1.0";
pub const PROTOCOL_VERSION: &str = "2";
/// `genmove` resigns below this win rate.
pub const RESIGN_THRESHOLD: f32 = 0.1;
/// Confidence reported by quick mode, which never resigns.
pub const QUICK_WIN_RATE: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ProtocolVersion,
    Name,
    Version,
    ListCommands,
    Boardsize,
    Komi,
    TimeSettings,
    TimeLeft,
    ClearBoard,
    Genmove,
    Play,
    Undo,
    PlaySequence,
    Showboard,
    Quit,
}

/// Dispatch table. A line goes to the first entry whose name occurs anywhere
/// in it, so the order here decides which handler wins when names overlap
/// (`play` claims `gogui-play_sequence` lines).
pub const COMMANDS: [(&str, Command); 15] = [
    ("protocol_version", Command::ProtocolVersion),
    ("name", Command::Name),
    ("version", Command::Version),
    ("list_commands", Command::ListCommands),
    ("boardsize", Command::Boardsize),
    ("komi", Command::Komi),
    ("time_settings", Command::TimeSettings),
    ("time_left", Command::TimeLeft),
    ("clear_board", Command::ClearBoard),
    ("genmove", Command::Genmove),
    ("play", Command::Play),
    ("undo", Command::Undo),
    ("gogui-play_sequence", Command::PlaySequence),
    ("showboard", Command::Showboard),
    ("quit", Command::Quit),
];

impl Command {
    pub fn name(self) -> &'static str {
        COMMANDS.iter().find(|(_, c)| *c == self).map_or("", |(n, _)| *n)
    }

    pub fn match_line(line: &str) -> Option<Command> {
        COMMANDS.iter().find(|(name, _)| line.contains(name)).map(|&(_, c)| c)
    }
}

/// Arguments of a command line: whitespace tokens after dropping a leading
/// `=` token and then the command token itself.
pub fn split_args(line: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.first() == Some(&"=") { tokens.remove(0); }
    if !tokens.is_empty() { tokens.remove(0); }
    tokens
}

#[derive(Debug, Error)]
pub enum GtpError {
    #[error("missing argument")]
    MissingArgument,
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `= body`
    Success(String),
    /// Bare `=` line, one item per line, blank line.
    List(Vec<&'static str>),
    /// `?message` for protocol errors.
    Failure(&'static str),
    /// `?message` followed by an empty success block.
    FailureThenSuccess(&'static str),
    /// `? message` for argument and collaborator errors.
    Error(String),
}

impl Response {
    fn empty() -> Self { Response::Success(String::new()) }
}

pub fn write_response<W: Write>(out: &mut W, resp: &Response) -> io::Result<()> {
    match resp {
        Response::Success(body) => write!(out, "= {}\n\n", body)?,
        Response::List(items) => {
            writeln!(out, "=")?;
            for item in items { writeln!(out, "{}", item)?; }
            writeln!(out)?;
        }
        Response::Failure(msg) => write!(out, "?{}\n\n", msg)?,
        Response::FailureThenSuccess(msg) => {
            write!(out, "?{}\n\n", msg)?;
            write!(out, "= \n\n")?;
        }
        Response::Error(msg) => write!(out, "? {}\n\n", msg)?,
    }
    out.flush()
}

fn arg<'a>(args: &[&'a str], i: usize) -> Result<&'a str, GtpError> {
    args.get(i).copied().ok_or(GtpError::MissingArgument)
}

fn parse_number<T: FromStr>(s: &str) -> Result<T, GtpError> {
    s.parse().map_err(|_| GtpError::InvalidNumber(s.to_string()))
}

/// Interactive session: one board, one search engine and the clock they share.
pub struct GtpEngine<B, S> {
    board: B,
    search: S,
    clock: TimeManager,
    config: LaunchConfig,
    cancel: CancelToken,
}

impl<B: Board, S: SearchEngine<B>> GtpEngine<B, S> {
    pub fn new(board: B, search: S, config: LaunchConfig) -> Self {
        let clock = TimeManager::new(config.main_time, config.byoyomi);
        Self { board, search, clock, config, cancel: CancelToken::new() }
    }

    pub fn board(&self) -> &B { &self.board }
    pub fn search(&self) -> &S { &self.search }
    pub fn clock(&self) -> &TimeManager { &self.clock }
    /// Handle on the session's cancel flag, usable from another thread.
    pub fn cancel_token(&self) -> CancelToken { self.cancel.clone() }

    pub fn run_stdio(&mut self) -> Result<(), GtpError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_loop(stdin.lock(), &mut out)
    }

    /// Reads commands until `quit` or end of input, writing one framed
    /// response per non-empty line.
    pub fn run_loop<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), GtpError> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() { continue; }
            self.cancel.cancel();
            let Some(cmd) = Command::match_line(line) else {
                warn!("unknown command: {}", line);
                write_response(out, &Response::Failure("unknown_command"))?;
                continue;
            };
            debug!("dispatch {}: {}", cmd.name(), line);
            let args = split_args(line);
            let resp = match self.execute(cmd, &args) {
                Ok(r) => r,
                Err(GtpError::Io(e)) => return Err(GtpError::Io(e)),
                Err(e) => {
                    warn!("{} failed: {}", cmd.name(), e);
                    Response::Error(e.to_string())
                }
            };
            write_response(out, &resp)?;
            if cmd == Command::Quit { break; }
        }
        Ok(())
    }

    pub fn execute(&mut self, cmd: Command, args: &[&str]) -> Result<Response, GtpError> {
        match cmd {
            Command::ProtocolVersion => Ok(Response::Success(PROTOCOL_VERSION.to_string())),
            Command::Name => Ok(Response::Success(ENGINE_NAME.to_string())),
            Command::Version => Ok(Response::Success(ENGINE_VERSION.to_string())),
            Command::ListCommands => Ok(Response::List(COMMANDS.iter().map(|(n, _)| *n).collect())),
            Command::Boardsize => {
                let size: usize = parse_number(arg(args, 0)?)?;
                if size != self.board.size() {
                    warn!("boardsize {} requested, board is {}", size, self.board.size());
                    return Ok(Response::FailureThenSuccess("invalid boardsize"));
                }
                Ok(Response::empty())
            }
            Command::Komi => Ok(Response::empty()),
            Command::TimeSettings => {
                let main_time = parse_number(arg(args, 0)?)?;
                let byoyomi = parse_number(arg(args, 1)?)?;
                self.clock.set_time_settings(main_time, byoyomi);
                Ok(Response::empty())
            }
            Command::TimeLeft => {
                self.clock.set_left_time(parse_number(arg(args, 1)?)?);
                Ok(Response::empty())
            }
            Command::ClearBoard => {
                self.board.clear();
                self.search.clear();
                Ok(Response::empty())
            }
            Command::Genmove => self.genmove(),
            Command::Play => {
                let v = self.board.parse_vertex(arg(args, 1)?)?;
                self.board.play(v, false)?;
                Ok(Response::empty())
            }
            Command::Undo => {
                self.undo()?;
                Ok(Response::empty())
            }
            Command::PlaySequence => {
                for coord in args.iter().skip(1).step_by(2) {
                    let v = self.board.parse_vertex(coord)?;
                    self.board.play(v, false)?;
                }
                Ok(Response::empty())
            }
            Command::Showboard => {
                eprintln!("{}", self.board.render());
                Ok(Response::empty())
            }
            Command::Quit => Ok(Response::empty()),
        }
    }

    fn genmove(&mut self) -> Result<Response, GtpError> {
        let (mv, win_rate) = if self.config.quick {
            let policy = self.search.evaluate(&self.board);
            (policy.best_vertex(self.board.size()), QUICK_WIN_RATE)
        } else {
            let params = SearchParams { fixed_time: 0.0, ponder: false, clean: self.config.clean };
            let r = self.search.search(&self.board, params, &mut self.clock, &self.cancel);
            (r.bestmove, r.win_rate)
        };
        if win_rate < RESIGN_THRESHOLD {
            debug!("resigning at win rate {:.3}", win_rate);
            return Ok(Response::Success("resign".to_string()));
        }
        self.board.play(mv, true)?;
        Ok(Response::Success(self.board.vertex_to_string(mv)))
    }

    /// Rebuilds the position from scratch without the last history entry.
    fn undo(&mut self) -> Result<(), GtpError> {
        let history: Vec<Vertex> = self.board.history().to_vec();
        let keep = history.len().saturating_sub(1);
        self.board.clear();
        self.search.clear();
        for &v in &history[..keep] {
            self.board.play(v, false)?;
        }
        Ok(())
    }
}
