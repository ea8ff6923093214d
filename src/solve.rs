use std::iter;

use anyhow::{ensure, Result};

use crate::{Game, Move, Signature, State, TileId};

type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

const ROOT: usize = !0;

// One discovered configuration. The arena index is the vertex id; entries
// are created once and never touched again.
struct Vertex {
    parent: usize,
    tile: TileId,
    mv: Move,
    state: State,
}

#[derive(Debug, Clone)]
pub struct Solution {
    /// Shortest move list from the initial state to the goal.
    pub moves: Vec<(TileId, Move)>,
    /// Distinct configurations discovered.
    pub vertices: usize,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Solved(Solution),
    Exhausted { vertices: usize },
}

/// Breadth-first search for a shortest solution. `on_step` is invoked once
/// per candidate (tile, move) pair, legal or not.
///
/// The caller's game is never mutated; the search works on its own copies,
/// so the initial state stays replayable against the returned move list.
pub fn bfs(game: &Game, mut on_step: impl FnMut()) -> Result<Outcome> {
    let config = &game.config;
    ensure!(
        (config.goal_tile.0 as usize) < game.state.tiles().len(),
        "Goal tile id {} out of range",
        config.goal_tile.0,
    );
    ensure!(
        game.state.board().in_interior(config.goal_pos),
        "Goal cell ({}, {}) outside the board interior",
        config.goal_pos.0,
        config.goal_pos.1,
    );

    let mut vertices: IndexMap<Signature, Vertex> = IndexMap::default();
    vertices.insert(
        game.state.signature(),
        // Sentinel edge for the root.
        Vertex {
            parent: ROOT,
            tile: TileId(0),
            mv: Move::Up,
            state: game.state.clone(),
        },
    );

    // Insertion order is the FIFO frontier: the cursor dequeues, inserts
    // append. A signature enters the map the moment it is first reached, so
    // no configuration is ever enqueued twice.
    let mut cursor = 0;
    let goal = loop {
        if cursor >= vertices.len() {
            return Ok(Outcome::Exhausted {
                vertices: vertices.len(),
            });
        }

        // Expand on a copy; the stored snapshot must stay pristine for
        // later branches.
        let mut state = vertices.get_index(cursor).unwrap().1.state.clone();
        if state.is_solved(config) {
            break cursor;
        }

        for idx in 0..state.tiles().len() {
            let tile = TileId(idx as u8);
            for mv in Move::ALL {
                on_step();
                if !state.is_legal(tile, mv) {
                    continue;
                }
                state.apply(tile, mv);
                let sig = state.signature();
                if !vertices.contains_key(&sig) {
                    vertices.insert(
                        sig,
                        Vertex {
                            parent: cursor,
                            tile,
                            mv,
                            state: state.clone(),
                        },
                    );
                }
                state.apply(tile, mv.reversed());
            }
        }
        cursor += 1;
    };

    let mut moves = iter::successors(Some(goal), |&id| {
        let parent = vertices.get_index(id).unwrap().1.parent;
        (parent != ROOT).then_some(parent)
    })
    .filter_map(|id| {
        let vertex = vertices.get_index(id).unwrap().1;
        (vertex.parent != ROOT).then_some((vertex.tile, vertex.mv))
    })
    .collect::<Vec<_>>();
    moves.reverse();

    Ok(Outcome::Solved(Solution {
        moves,
        vertices: vertices.len(),
    }))
}
