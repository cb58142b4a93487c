//! Renderer seam. A `Surface` only learns about non-zero cells in grid units;
//! scaling, colors and the DOM belong to the implementation.

use rand::Rng;

use crate::game::Game;
use crate::piece::Cell;

pub trait Surface {
    fn clear(&mut self);
    fn fill_cell(&mut self, x: i32, y: i32, value: Cell);
    fn show_score(&mut self, score: u32);
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

/// Draws the locked cells, then the active piece on top.
pub fn render_frame<R: Rng, S: Surface + ?Sized>(game: &Game<R>, surface: &mut S) {
    surface.clear();
    for (y, row) in game.arena().rows().iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if value != 0 {
                surface.fill_cell(x as i32, y as i32, value);
            }
        }
    }
    let player = game.player();
    for (x, y, value) in player.shape.cells() {
        surface.fill_cell(player.pos.x + x, player.pos.y + y, value);
    }
}

/// JSON view of the arena and the active piece.
#[cfg(feature = "serde_json")]
pub fn snapshot_json<R: Rng>(game: &Game<R>) -> Result<String, serde_json::Error> {
    #[derive(serde::Serialize)]
    struct Snapshot<'a> {
        arena: &'a crate::arena::Arena,
        player: &'a crate::player::Player,
    }
    serde_json::to_string(&Snapshot { arena: game.arena(), player: game.player() })
}
