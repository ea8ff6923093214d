use std::ops::{Index, IndexMut};

use arrayvec::ArrayVec;

mod fmt;
mod parse;
pub mod solve;

// One slot per letter of the tile alphabet.
pub const MAX_TILES: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TileId(pub u8);

// Row, column. Coordinates include the border ring, so the interior is
// 1-based and row/column 0 always hold border cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Vec2(pub u8, pub u8);

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Tile(TileId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    Up2,
    Down2,
    Left2,
    Right2,
}

impl Move {
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Up2,
        Self::Down2,
        Self::Left2,
        Self::Right2,
    ];

    pub fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Up2 => (-2, 0),
            Self::Down2 => (2, 0),
            Self::Left2 => (0, -2),
            Self::Right2 => (0, 2),
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up2 => Self::Down2,
            Self::Down2 => Self::Up2,
            Self::Left2 => Self::Right2,
            Self::Right2 => Self::Left2,
        }
    }

    fn span(self) -> i8 {
        match self {
            Self::Up | Self::Down | Self::Left | Self::Right => 1,
            Self::Up2 | Self::Down2 | Self::Left2 | Self::Right2 => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    sym: char,
    pos: Vec2,
    height: u8,
    width: u8,
}

impl Tile {
    pub fn sym(&self) -> char {
        self.sym
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> (u8, u8) {
        (self.height, self.width)
    }

    fn shape(&self) -> [u8; 4] {
        [self.pos.0, self.pos.1, self.height, self.width]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: u8,
    width: u8,
    grid: Box<[Cell]>,
}

impl Index<Vec2> for Board {
    type Output = Cell;
    fn index(&self, pos: Vec2) -> &Self::Output {
        let idx = pos.0 as usize * self.width as usize + pos.1 as usize;
        &self.grid[idx]
    }
}
impl IndexMut<Vec2> for Board {
    fn index_mut(&mut self, pos: Vec2) -> &mut Self::Output {
        let idx = pos.0 as usize * self.width as usize + pos.1 as usize;
        &mut self.grid[idx]
    }
}

impl Board {
    pub fn size(&self) -> (u8, u8) {
        (self.height, self.width)
    }

    pub fn in_interior(&self, pos: Vec2) -> bool {
        (1..self.height - 1).contains(&pos.0) && (1..self.width - 1).contains(&pos.1)
    }

    // Out-of-range probes resolve to None, which move legality treats as
    // blocked. Two-cell moves can reach past the one-cell border ring.
    fn probe(&self, pos: Vec2, dr: i8, dc: i8) -> Option<Cell> {
        let r = pos.0.checked_add_signed(dr)?;
        let c = pos.1.checked_add_signed(dc)?;
        if self.height <= r || self.width <= c {
            return None;
        }
        Some(self[Vec2(r, c)])
    }
}

/// Identifier-agnostic dedup key: every tile's `[row, col, height, width]`,
/// sorted. States that differ only by which same-shape tile sits where
/// collapse to one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(ArrayVec<[u8; 4], MAX_TILES>);

// A complete puzzle state. `Clone` is a deep copy; snapshots never alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    board: Board,
    tiles: Box<[Tile]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub goal_tile: TileId,
    pub goal_pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub config: Config,
    pub state: State,
}

impl Game {
    pub fn is_solved(&self) -> bool {
        self.state.is_solved(&self.config)
    }
}

impl Index<TileId> for State {
    type Output = Tile;
    fn index(&self, id: TileId) -> &Self::Output {
        &self.tiles[id.0 as usize]
    }
}

impl State {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile_by_sym(&self, sym: char) -> Option<TileId> {
        let idx = self.tiles.iter().position(|tile| tile.sym == sym)?;
        Some(TileId(idx as u8))
    }

    fn place(&mut self, id: TileId) {
        let tile = self.tiles[id.0 as usize];
        for r in tile.pos.0..tile.pos.0 + tile.height {
            for c in tile.pos.1..tile.pos.1 + tile.width {
                self.board[Vec2(r, c)] = Cell::Tile(id);
            }
        }
    }

    // Scans the whole grid rather than the recorded rectangle, so it stays
    // correct when the tile's position is already stale.
    fn erase(&mut self, id: TileId) {
        for cell in self.board.grid.iter_mut() {
            if *cell == Cell::Tile(id) {
                *cell = Cell::Empty;
            }
        }
    }

    pub fn is_legal(&self, id: TileId, mv: Move) -> bool {
        let tile = &self.tiles[id.0 as usize];
        let (dr, dc) = mv.delta();
        for step in 1..=mv.span() {
            if dc != 0 {
                // Every spanned row must be clear beyond the leading edge.
                let edge = if dc > 0 {
                    tile.pos.1 + tile.width - 1
                } else {
                    tile.pos.1
                };
                for r in tile.pos.0..tile.pos.0 + tile.height {
                    match self.board.probe(Vec2(r, edge), 0, dc.signum() * step) {
                        Some(Cell::Empty) => {}
                        _ => return false,
                    }
                }
            } else {
                let edge = if dr > 0 {
                    tile.pos.0 + tile.height - 1
                } else {
                    tile.pos.0
                };
                for c in tile.pos.1..tile.pos.1 + tile.width {
                    match self.board.probe(Vec2(edge, c), dr.signum() * step, 0) {
                        Some(Cell::Empty) => {}
                        _ => return false,
                    }
                }
            }
        }
        true
    }

    // The sole state mutator. Applying `mv.reversed()` right after restores
    // the pre-move state exactly.
    pub fn apply(&mut self, id: TileId, mv: Move) {
        debug_assert!(self.is_legal(id, mv));
        let (dr, dc) = mv.delta();
        self.erase(id);
        let tile = &mut self.tiles[id.0 as usize];
        tile.pos.0 = tile.pos.0.wrapping_add_signed(dr);
        tile.pos.1 = tile.pos.1.wrapping_add_signed(dc);
        self.place(id);
    }

    pub fn signature(&self) -> Signature {
        let mut shapes = self
            .tiles
            .iter()
            .map(Tile::shape)
            .collect::<ArrayVec<_, MAX_TILES>>();
        shapes.sort_unstable();
        Signature(shapes)
    }

    pub fn is_solved(&self, config: &Config) -> bool {
        self[config.goal_tile].pos == config.goal_pos
    }
}
