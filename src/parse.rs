use std::str::FromStr;

use anyhow::{bail, ensure, Context, Result};

use crate::{Board, Cell, Config, Game, State, Tile, TileId, Vec2, MAX_TILES};

impl FromStr for Game {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines.next().context("Missing goal line")?;
        let mut fields = header.split_whitespace();
        let goal_sym = {
            let field = fields.next().context("Missing goal tile")?;
            let mut chars = field.chars();
            match (chars.next(), chars.next()) {
                (Some(sym @ 'A'..='Z'), None) => sym,
                _ => bail!("Invalid goal tile: {field:?}"),
            }
        };
        let goal_row = fields
            .next()
            .context("Missing goal row")?
            .parse::<u8>()
            .context("Invalid goal row")?;
        let goal_col = fields
            .next()
            .context("Missing goal column")?
            .parse::<u8>()
            .context("Invalid goal column")?;
        ensure!(fields.next().is_none(), "Trailing fields in goal line");

        let rows = lines.collect::<Vec<_>>();
        let width = rows.first().map_or(0, |row| row.chars().count());
        ensure!(rows.len() >= 3 && width >= 3, "Board too small");
        ensure!(
            rows.len() < u8::MAX as usize && width < u8::MAX as usize,
            "Board too large"
        );

        // First pass: validate cells and gather each letter's bounding box.
        let mut extents: [Option<(Vec2, Vec2)>; MAX_TILES] = [None; MAX_TILES];
        for (i, row) in rows.iter().enumerate() {
            ensure!(
                row.chars().count() == width,
                "Width mismatch at line {}, expecting width {width}",
                i + 1,
            );
            for (j, ch) in row.chars().enumerate() {
                let on_ring = i == 0 || i == rows.len() - 1 || j == 0 || j == width - 1;
                match ch {
                    '#' => {}
                    '.' | 'A'..='Z' => {
                        ensure!(!on_ring, "Board edge must be wall at line {}", i + 1);
                        if let 'A'..='Z' = ch {
                            let pos = Vec2(i as _, j as _);
                            match &mut extents[(ch as u8 - b'A') as usize] {
                                slot @ None => *slot = Some((pos, pos)),
                                Some((ul, br)) => {
                                    ul.0 = ul.0.min(pos.0);
                                    ul.1 = ul.1.min(pos.1);
                                    br.0 = br.0.max(pos.0);
                                    br.1 = br.1.max(pos.1);
                                }
                            }
                        }
                    }
                    _ => bail!("Invalid cell: {ch:?}"),
                }
            }
        }

        // Letter order fixes the id assignment.
        let mut tiles = Vec::new();
        let mut id_by_sym = [None; MAX_TILES];
        for (letter, extent) in extents.iter().enumerate() {
            if let Some((ul, br)) = *extent {
                id_by_sym[letter] = Some(TileId(tiles.len() as u8));
                tiles.push(Tile {
                    sym: (b'A' + letter as u8) as char,
                    pos: ul,
                    height: br.0 - ul.0 + 1,
                    width: br.1 - ul.1 + 1,
                });
            }
        }

        let grid = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|ch| match ch {
                '#' => Cell::Wall,
                '.' => Cell::Empty,
                _ => id_by_sym[(ch as u8 - b'A') as usize].map_or(Cell::Empty, Cell::Tile),
            })
            .collect::<Box<[_]>>();

        let state = State {
            board: Board {
                height: rows.len() as u8,
                width: width as u8,
                grid,
            },
            tiles: tiles.into(),
        };

        let goal_tile = state
            .tile_by_sym(goal_sym)
            .with_context(|| format!("Goal tile {goal_sym} not on the board"))?;
        let goal_pos = Vec2(goal_row, goal_col);
        ensure!(
            state.board.in_interior(goal_pos),
            "Goal cell ({goal_row}, {goal_col}) outside the board interior",
        );

        Ok(Game {
            config: Config {
                goal_tile,
                goal_pos,
            },
            state,
        })
    }
}
