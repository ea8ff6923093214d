use std::fmt;

use crate::{Cell, Game, Move, State, Vec2};

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.state, f)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.board.height {
            for c in 0..self.board.width {
                let ch = match self.board[Vec2(r, c)] {
                    Cell::Empty => '.',
                    Cell::Wall => '#',
                    Cell::Tile(id) => self.tiles[id.0 as usize].sym,
                };
                write!(f, "{ch}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Move::Up => "U",
            Move::Down => "D",
            Move::Left => "L",
            Move::Right => "R",
            Move::Up2 => "U2",
            Move::Down2 => "D2",
            Move::Left2 => "L2",
            Move::Right2 => "R2",
        })
    }
}
