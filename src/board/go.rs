use super::{vertex_to_string, Board, BoardError, Color, Vertex, COLUMNS, MAX_BOARD_SIZE};
use rand::rngs::SmallRng;
use log::warn;
use rand::seq::SliceRandom;

pub const DEFAULT_BOARD_SIZE: usize = 9;
pub const KOMI: i32 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Empty,
    Stone(Color),
}

/// Area-scored Go position with simple ko and no superko detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoBoard {
    size: usize,
    komi: i32,
    cells: Vec<Cell>,
    turn: Color,
    ko: Option<usize>,
    history: Vec<Vertex>,
}

impl Default for GoBoard {
    fn default() -> Self { Self::new(DEFAULT_BOARD_SIZE) }
}

impl GoBoard {
    /// Empty board with komi 7. `size` is clamped into `2..=MAX_BOARD_SIZE`,
    /// so `GoBoard::new(25).size()` is 19.
    pub fn new(size: usize) -> Self {
        let clamped = size.clamp(2, MAX_BOARD_SIZE);
        if clamped != size { warn!("board size {} out of range, using {}", size, clamped); }
        let size = clamped;
        Self {
            size,
            komi: KOMI,
            cells: vec![Cell::Empty; size * size],
            turn: Color::Black,
            ko: None,
            history: Vec::new(),
        }
    }

    pub fn with_komi(mut self, komi: i32) -> Self { self.komi = komi; self }

    pub fn stone_at(&self, v: Vertex) -> Option<Color> {
        match v {
            Vertex::Point(i) => match self.cells.get(i as usize) { Some(Cell::Stone(c)) => Some(*c), _ => None },
            Vertex::Pass => None,
        }
    }

    pub fn ko_point(&self) -> Option<Vertex> { self.ko.map(|i| Vertex::Point(i as u16)) }

    fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> {
        let s = self.size;
        let (x, y) = (i % s, i / s);
        [
            (x > 0).then(|| i - 1),
            (x + 1 < s).then(|| i + 1),
            (y > 0).then(|| i - s),
            (y + 1 < s).then(|| i + s),
        ]
        .into_iter()
        .flatten()
    }

    fn diagonals(&self, i: usize) -> impl Iterator<Item = usize> {
        let s = self.size;
        let (x, y) = (i % s, i / s);
        [
            (x > 0 && y > 0).then(|| i - s - 1),
            (x + 1 < s && y > 0).then(|| i - s + 1),
            (x > 0 && y + 1 < s).then(|| i + s - 1),
            (x + 1 < s && y + 1 < s).then(|| i + s + 1),
        ]
        .into_iter()
        .flatten()
    }

    /// Stones of the group at `i` and its distinct liberty count.
    fn group(&self, i: usize) -> (Vec<usize>, usize) {
        let color = self.cells[i];
        let mut seen = vec![false; self.cells.len()];
        seen[i] = true;
        let mut stones = vec![i];
        let mut stack = vec![i];
        let mut libs = 0usize;
        while let Some(j) = stack.pop() {
            for k in self.neighbors(j) {
                if seen[k] { continue; }
                seen[k] = true;
                match self.cells[k] {
                    Cell::Empty => libs += 1,
                    c if c == color => { stones.push(k); stack.push(k); }
                    _ => {}
                }
            }
        }
        (stones, libs)
    }

    fn liberties(&self, i: usize) -> usize { self.group(i).1 }

    fn is_legal(&self, i: usize, color: Color) -> bool {
        if self.cells[i] != Cell::Empty || self.ko == Some(i) { return false; }
        self.neighbors(i).any(|n| match self.cells[n] {
            Cell::Empty => true,
            Cell::Stone(c) if c == color => self.liberties(n) > 1,
            Cell::Stone(_) => self.liberties(n) == 1,
        })
    }

    fn is_eye(&self, i: usize, color: Color) -> bool {
        if self.neighbors(i).any(|n| self.cells[n] != Cell::Stone(color)) { return false; }
        let mut diags = 0;
        let mut hostile = 0;
        for d in self.diagonals(i) {
            diags += 1;
            if self.cells[d] == Cell::Stone(color.opponent()) { hostile += 1; }
        }
        if diags < 4 { hostile == 0 } else { hostile < 2 }
    }

    /// Applies a move already known to be legal.
    fn apply(&mut self, v: Vertex) {
        self.ko = None;
        if let Vertex::Point(p) = v {
            let i = p as usize;
            let me = self.turn;
            self.cells[i] = Cell::Stone(me);
            let adjacent: Vec<usize> = self.neighbors(i).collect();
            let mut captured = Vec::new();
            for n in adjacent {
                if self.cells[n] != Cell::Stone(me.opponent()) { continue; }
                let (stones, libs) = self.group(n);
                if libs == 0 {
                    for s in stones { self.cells[s] = Cell::Empty; captured.push(s); }
                }
            }
            if captured.len() == 1 {
                let (stones, libs) = self.group(i);
                if stones.len() == 1 && libs == 1 { self.ko = Some(captured[0]); }
            }
        }
        self.turn = self.turn.opponent();
        self.history.push(v);
    }
}

impl Board for GoBoard {
    fn size(&self) -> usize { self.size }

    fn to_move(&self) -> Color { self.turn }

    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = Cell::Empty);
        self.turn = Color::Black;
        self.ko = None;
        self.history.clear();
    }

    fn play(&mut self, v: Vertex, restrict_eye_fill: bool) -> Result<(), BoardError> {
        if let Vertex::Point(p) = v {
            let i = p as usize;
            let ok = i < self.cells.len()
                && self.is_legal(i, self.turn)
                && !(restrict_eye_fill && self.is_eye(i, self.turn));
            if !ok { return Err(BoardError::IllegalMove(vertex_to_string(v, self.size))); }
        }
        self.apply(v);
        Ok(())
    }

    fn candidates(&self) -> Vec<Vertex> {
        (0..self.cells.len())
            .filter(|&i| self.is_legal(i, self.turn) && !self.is_eye(i, self.turn))
            .map(|i| Vertex::Point(i as u16))
            .collect()
    }

    fn random_play(&mut self, rng: &mut SmallRng) -> Vertex {
        let mut empties: Vec<usize> = (0..self.cells.len()).filter(|&i| self.cells[i] == Cell::Empty).collect();
        empties.shuffle(rng);
        let me = self.turn;
        let v = empties
            .into_iter()
            .find(|&i| self.is_legal(i, me) && !self.is_eye(i, me))
            .map_or(Vertex::Pass, |i| Vertex::Point(i as u16));
        self.apply(v);
        v
    }

    fn rollout(&mut self, rng: &mut SmallRng, render: bool) {
        let limit = 2 * self.intersections();
        for _ in 0..limit {
            let prev = self.prev_move();
            let mv = self.random_play(rng);
            if render { eprintln!("{}", self.render()); }
            if prev == Some(Vertex::Pass) && mv == Vertex::Pass { break; }
        }
    }

    fn score(&self) -> i32 {
        let (mut black, mut white) = (0i32, 0i32);
        for (i, cell) in self.cells.iter().enumerate() {
            match cell {
                Cell::Stone(Color::Black) => black += 1,
                Cell::Stone(Color::White) => white += 1,
                Cell::Empty => {
                    let near_black = self.neighbors(i).any(|n| self.cells[n] == Cell::Stone(Color::Black));
                    let near_white = self.neighbors(i).any(|n| self.cells[n] == Cell::Stone(Color::White));
                    if near_black && !near_white { black += 1; }
                    if near_white && !near_black { white += 1; }
                }
            }
        }
        black - white - self.komi
    }

    fn render(&self) -> String {
        let s = self.size;
        let last = self.prev_move().and_then(|v| match v { Vertex::Point(i) => Some(i as usize), Vertex::Pass => None });
        let header: String = COLUMNS.chars().take(s).map(|c| format!(" {} ", c)).collect();
        let mut out = format!("   {}\n", header);
        for y in (0..s).rev() {
            out.push_str(&format!("{:>2} ", y + 1));
            for x in 0..s {
                let i = y * s + x;
                let glyph = match self.cells[i] {
                    Cell::Empty => '.',
                    Cell::Stone(Color::Black) => 'X',
                    Cell::Stone(Color::White) => 'O',
                };
                if last == Some(i) { out.push_str(&format!("[{}]", glyph)); } else { out.push_str(&format!(" {} ", glyph)); }
            }
            out.push_str(&format!(" {}\n", y + 1));
        }
        out.push_str(&format!("   {}\n", header));
        out
    }

    fn history(&self) -> &[Vertex] { &self.history }
}
