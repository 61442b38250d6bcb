pub mod go;

use rand::rngs::SmallRng;
use std::fmt;
use thiserror::Error;

pub use go::GoBoard;

/// Column letters used by GTP coordinates (no `I`).
pub const COLUMNS: &str = "ABCDEFGHJKLMNOPQRST";
pub const MAX_BOARD_SIZE: usize = 19;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self { Color::Black => Color::White, Color::White => Color::Black }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Color::Black => write!(f, "B"), Color::White => write!(f, "W") }
    }
}

/// An encoded board coordinate. `Point` holds the raw index `row * size + col`,
/// with row 0 at the bottom of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vertex {
    Point(u16),
    Pass,
}

impl Vertex {
    /// Slot of this vertex in a policy vector of length `size * size + 1`.
    pub fn index(self, size: usize) -> usize {
        match self { Vertex::Point(i) => i as usize, Vertex::Pass => size * size }
    }

    pub fn from_index(idx: usize, size: usize) -> Self {
        if idx >= size * size { Vertex::Pass } else { Vertex::Point(idx as u16) }
    }

    pub fn from_xy(x: usize, y: usize, size: usize) -> Self { Vertex::Point((y * size + x) as u16) }

    pub fn is_pass(self) -> bool { self == Vertex::Pass }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),
    #[error("illegal move {0}")]
    IllegalMove(String),
}

/// Parses a GTP vertex such as `D4` or `pass` for a board of `size`.
pub fn parse_vertex(s: &str, size: usize) -> Result<Vertex, BoardError> {
    let invalid = || BoardError::InvalidCoordinate(s.to_string());
    let t = s.trim();
    if t.eq_ignore_ascii_case("pass") { return Ok(Vertex::Pass); }
    let mut chars = t.chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    let x = COLUMNS.find(letter).ok_or_else(invalid)?;
    let y: usize = chars.as_str().parse().map_err(|_| invalid())?;
    if x >= size || y == 0 || y > size { return Err(invalid()); }
    Ok(Vertex::from_xy(x, y - 1, size))
}

/// Formats `v` as a GTP vertex. Columns past `T` have no GTP letter and print as `?`.
pub fn vertex_to_string(v: Vertex, size: usize) -> String {
    match v {
        Vertex::Pass => "pass".to_string(),
        Vertex::Point(i) => {
            let i = i as usize;
            let col = COLUMNS.as_bytes().get(i % size).map_or('?', |&b| b as char);
            format!("{}{}", col, i / size + 1)
        }
    }
}

/// Board collaborator used by the protocol loop, self-play and scoring.
/// GTP coordinates only cover sizes up to `MAX_BOARD_SIZE`.
pub trait Board: Clone + Send + Sync {
    fn size(&self) -> usize;
    fn intersections(&self) -> usize { self.size() * self.size() }
    fn to_move(&self) -> Color;
    fn clear(&mut self);
    /// Applies `v` for the side to move. With `restrict_eye_fill` the move is also
    /// rejected when it fills one of the mover's own eyes.
    fn play(&mut self, v: Vertex, restrict_eye_fill: bool) -> Result<(), BoardError>;
    fn copy_into(&self, other: &mut Self) { other.clone_from(self); }
    /// Legal, non-eye-filling points for the side to move.
    fn candidates(&self) -> Vec<Vertex>;
    fn random_play(&mut self, rng: &mut SmallRng) -> Vertex;
    fn rollout(&mut self, rng: &mut SmallRng, render: bool);
    fn score(&self) -> i32;
    fn render(&self) -> String;
    fn history(&self) -> &[Vertex];
    fn move_count(&self) -> usize { self.history().len() }
    fn prev_move(&self) -> Option<Vertex> { self.history().last().copied() }

    fn parse_vertex(&self, s: &str) -> Result<Vertex, BoardError> { parse_vertex(s, self.size()) }
    fn vertex_to_string(&self, v: Vertex) -> String { vertex_to_string(v, self.size()) }
}
