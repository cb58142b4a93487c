//! Game state: the arena, the active piece, the random source and the drop
//! timer, with every command and tick applied through one `&mut` borrow.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::arena::{Arena, Sweep};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::input::Command;
use crate::piece::{PieceKind, Rotation};
use crate::player::Player;

/// What a single drop step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Fell,
    Locked { sweep: Sweep, topped_out: bool },
}

impl DropOutcome {
    /// Score changes only when a piece locks.
    pub fn score_changed(&self) -> bool {
        matches!(self, DropOutcome::Locked { .. })
    }
}

pub struct Game<R: Rng = SmallRng> {
    config: GameConfig,
    arena: Arena,
    player: Player,
    rng: R,
    drop_counter: f64,
    last_time: f64,
}

impl Game<SmallRng> {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    /// Builds the arena and spawns the first piece.
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let arena = Arena::new(config.width, config.height);
        let kind = random_kind(&mut rng);
        let player = Player::spawn(kind, &arena, 0);
        Ok(Self { config, arena, player, rng, drop_counter: 0.0, last_time: 0.0 })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn drop_counter(&self) -> f64 {
        self.drop_counter
    }

    /// Spawns a uniformly random piece. Returns true on top-out.
    pub fn reset(&mut self) -> bool {
        let kind = random_kind(&mut self.rng);
        self.spawn(kind)
    }

    /// Spawns `kind` at the top center. If it does not fit, the arena is wiped
    /// and the score zeroed; play continues. Returns true on top-out.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        self.player = Player::spawn(kind, &self.arena, self.player.score);
        if self.player.collides(&self.arena) {
            info!("top-out with score {}, clearing arena", self.player.score);
            self.arena.clear();
            self.player.score = 0;
            return true;
        }
        false
    }

    pub fn move_piece(&mut self, dir: i32) -> bool {
        self.player.shift(&self.arena, dir)
    }

    pub fn rotate_piece(&mut self, dir: Rotation) -> bool {
        self.player.rotate(&self.arena, dir)
    }

    /// Moves the piece down one row. On contact it locks: merge, respawn,
    /// sweep, score. The drop timer restarts either way.
    pub fn drop_piece(&mut self) -> DropOutcome {
        self.drop_counter = 0.0;
        self.player.pos.y += 1;
        if !self.player.collides(&self.arena) {
            return DropOutcome::Fell;
        }
        self.player.pos.y -= 1;
        self.arena.merge(&self.player.shape, self.player.pos);
        debug!("{:?} locked at {:?}", self.player.kind, self.player.pos);
        let topped_out = self.reset();
        let sweep = self.arena.sweep();
        if sweep.rows > 0 {
            self.player.score = self.player.score.saturating_add(sweep.points);
            debug!("cleared {} rows for {} points", sweep.rows, sweep.points);
        }
        DropOutcome::Locked { sweep, topped_out }
    }

    pub fn apply(&mut self, cmd: Command) -> Option<DropOutcome> {
        match cmd {
            Command::MoveLeft => {
                self.move_piece(-1);
                None
            }
            Command::MoveRight => {
                self.move_piece(1);
                None
            }
            Command::SoftDrop => Some(self.drop_piece()),
            Command::RotateClockwise => {
                self.rotate_piece(Rotation::Clockwise);
                None
            }
            Command::RotateCounterClockwise => {
                self.rotate_piece(Rotation::CounterClockwise);
                None
            }
        }
    }

    /// Frame tick with a monotonically increasing timestamp in milliseconds.
    /// Drops once the accumulated time exceeds the interval.
    pub fn update(&mut self, time: f64) -> Option<DropOutcome> {
        let delta = time - self.last_time;
        self.last_time = time;
        self.drop_counter += delta;
        if self.drop_counter > self.config.drop_interval_ms {
            return Some(self.drop_piece());
        }
        None
    }
}

fn random_kind<R: Rng>(rng: &mut R) -> PieceKind {
    PieceKind::ALL.choose(rng).copied().unwrap_or(PieceKind::T)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Position;
    use rand::rngs::StdRng;

    fn game() -> Game<StdRng> {
        Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(7)).unwrap()
    }

    fn fill_row_except(arena: &mut Arena, y: usize, holes: &[usize]) {
        for x in 0..arena.width() {
            if !holes.contains(&x) {
                arena.set(x, y, 1);
            }
        }
    }

    #[test]
    fn first_piece_spawns_at_top() {
        let g = game();
        assert_eq!(g.player().pos.y, 0);
        assert_eq!(g.score(), 0);
        assert!(g.arena().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = GameConfig { height: 0, ..GameConfig::default() };
        assert!(Game::with_rng(cfg, StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn drop_falls_until_floor_then_locks() {
        let mut g = game();
        g.spawn(PieceKind::O);
        for expected_y in 1..=18 {
            assert_eq!(g.drop_piece(), DropOutcome::Fell);
            assert_eq!(g.player().pos.y, expected_y);
        }
        let out = g.drop_piece();
        assert_eq!(out, DropOutcome::Locked { sweep: Sweep::default(), topped_out: false });
        assert!(out.score_changed());
        assert_eq!(g.arena().get(5, 18), Some(4));
        assert_eq!(g.arena().get(6, 19), Some(4));
        assert_eq!(g.player().pos.y, 0);
        assert_eq!(g.score(), 0);
    }

    #[test]
    fn lock_that_completes_row_scores() {
        let mut g = game();
        fill_row_except(g.arena_mut(), 19, &[5, 6]);
        g.spawn(PieceKind::O);
        g.player_mut().pos.y = 18;
        let out = g.drop_piece();
        assert_eq!(
            out,
            DropOutcome::Locked { sweep: Sweep { rows: 1, points: 10 }, topped_out: false }
        );
        assert_eq!(g.score(), 10);
        // Upper half of the O slid down into the bottom row.
        assert_eq!(g.arena().get(5, 19), Some(4));
        assert_eq!(g.arena().get(0, 19), Some(0));
    }

    #[test]
    fn two_rows_award_thirty() {
        let mut g = game();
        fill_row_except(g.arena_mut(), 19, &[5, 6]);
        fill_row_except(g.arena_mut(), 18, &[5, 6]);
        g.spawn(PieceKind::O);
        g.player_mut().pos.y = 18;
        g.drop_piece();
        assert_eq!(g.score(), 30);
        assert!(g.arena().is_empty());
    }

    #[test]
    fn score_saturates_instead_of_overflowing() {
        let mut g = game();
        g.player_mut().score = u32::MAX - 5;
        fill_row_except(g.arena_mut(), 19, &[5, 6]);
        g.spawn(PieceKind::O);
        g.player_mut().pos.y = 18;
        g.drop_piece();
        assert_eq!(g.score(), u32::MAX);
    }

    #[test]
    fn top_out_clears_arena_and_score() {
        let mut g = game();
        g.player_mut().score = 120;
        fill_row_except(g.arena_mut(), 0, &[0]);
        fill_row_except(g.arena_mut(), 5, &[0]);
        assert!(g.spawn(PieceKind::O));
        assert!(g.arena().is_empty());
        assert_eq!(g.score(), 0);
        assert_eq!(g.player().pos, Position::new(5, 0));
    }

    #[test]
    fn commands_route_to_moves() {
        let mut g = game();
        g.spawn(PieceKind::T);
        assert_eq!(g.apply(Command::MoveLeft), None);
        assert_eq!(g.player().pos.x, 4);
        g.apply(Command::MoveRight);
        g.apply(Command::MoveRight);
        assert_eq!(g.player().pos.x, 6);
        assert_eq!(g.apply(Command::SoftDrop), Some(DropOutcome::Fell));
        assert_eq!(g.player().pos.y, 1);
        g.apply(Command::RotateClockwise);
        assert_eq!(g.player().shape.rows()[1], vec![0, 6, 6]);
        g.apply(Command::RotateCounterClockwise);
        assert_eq!(g.player().shape, PieceKind::T.shape());
    }

    #[test]
    fn update_drops_after_interval() {
        let mut g = game();
        g.spawn(PieceKind::O);
        assert_eq!(g.update(400.0), None);
        assert_eq!(g.update(1000.0), None);
        assert_eq!(g.drop_counter(), 1000.0);
        assert_eq!(g.update(1016.0), Some(DropOutcome::Fell));
        assert_eq!(g.player().pos.y, 1);
        assert_eq!(g.drop_counter(), 0.0);
        assert_eq!(g.update(1500.0), None);
    }

    #[test]
    fn manual_drop_restarts_timer() {
        let mut g = game();
        g.spawn(PieceKind::O);
        g.update(900.0);
        g.apply(Command::SoftDrop);
        assert_eq!(g.drop_counter(), 0.0);
        assert_eq!(g.update(1800.0), None);
    }

    #[test]
    fn random_spawns_cover_catalog() {
        let mut g = game();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            g.reset();
            seen.insert(g.player().kind);
        }
        assert_eq!(seen.len(), 7);
    }
}
