use anyhow::{bail, Context, Result};
use console::{Key, Term};
use indicatif::{ProgressBar, ProgressStyle};
use klotski_solver::solve::{self, Outcome};
use klotski_solver::{Game, Move, TileId};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args.next().context("Missing puzzle file argument")?;
    let replay = match args.next().as_deref() {
        None => false,
        Some("--replay") => true,
        Some(arg) => bail!("Unknown argument: {arg}"),
    };

    let data = std::fs::read_to_string(&path).context("Failed to read the puzzle")?;
    let game = data.parse::<Game>().context("Failed to parse the puzzle")?;

    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template(
        "{spinner} {pos} candidates, {elapsed}",
    )?);
    let outcome = solve::bfs(&game, || bar.inc(1))?;
    bar.finish_and_clear();

    match outcome {
        Outcome::Solved(solution) => {
            eprintln!(
                "{} vertices, {} moves",
                solution.vertices,
                solution.moves.len(),
            );
            let steps = solution
                .moves
                .iter()
                .map(|&(tile, mv)| format!("{}{}", game.state[tile].sym(), mv))
                .collect::<Vec<_>>()
                .join(" ");
            println!("{steps}");
            if replay {
                replay_solution(&game, &solution.moves)?;
            }
        }
        Outcome::Exhausted { vertices } => {
            eprintln!("no solution ({vertices} configurations examined)");
            std::process::exit(1);
        }
    }
    Ok(())
}

// Steps through the solution on the terminal, one keypress per move,
// against a fresh copy of the initial state.
fn replay_solution(game: &Game, moves: &[(TileId, Move)]) -> Result<()> {
    let term = Term::stderr();
    let mut state = game.state.clone();
    let lines = state.board().size().0 as usize;
    eprint!("{state}");
    for &(tile, mv) in moves {
        match term.read_key()? {
            Key::Escape | Key::Char('q') => return Ok(()),
            _ => {}
        }
        state.apply(tile, mv);
        term.clear_last_lines(lines)?;
        eprint!("{state}");
    }
    Ok(())
}
