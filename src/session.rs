//! A play session: the running world plus everything that outlives a run
//!
//! The host calls `update` once per display frame while `is_running` is true.
//! When a run ends the final score goes to the leaderboard.

use crate::highscores::{Leaderboard, format_date};
use crate::persistence::Storage;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Variant;

pub struct Session<S: Storage> {
    pub state: GameState,
    pub leaderboard: Leaderboard,
    pub settings: Settings,
    storage: S,
    /// Rank achieved by the last finished run, if it made the board
    last_rank: Option<usize>,
}

impl<S: Storage> Session<S> {
    /// Open a session at the menu, loading settings and leaderboard
    pub fn new(storage: S, seed: u64, width: f32, height: f32) -> Self {
        let settings = Settings::load(&storage);
        let leaderboard = Leaderboard::load(&storage);
        let state = GameState::new(seed, width, height, settings.tuning());
        log::info!(
            "Session opened ({} variant, seed {})",
            settings.variant.as_str(),
            seed
        );
        Self {
            state,
            leaderboard,
            settings,
            storage,
            last_rank: None,
        }
    }

    /// Begin a new run with the current settings
    pub fn start(&mut self) {
        self.state.tuning = self.settings.tuning();
        self.state.start();
        self.last_rank = None;
        log::info!("Run started ({} variant)", self.settings.variant.as_str());
    }

    /// Advance one frame; `now_ms` is the wall clock used to stamp scores
    pub fn update(&mut self, input: &TickInput, dt_ms: f64, now_ms: f64) {
        tick(&mut self.state, input, dt_ms);

        let game_over = self.state.events.iter().find_map(|e| match e {
            GameEvent::GameOver { score, .. } => Some(*score),
            _ => None,
        });
        if let Some(score) = game_over {
            self.record_score(score, now_ms);
        }
    }

    /// Whether the host should keep scheduling frames
    pub fn is_running(&self) -> bool {
        self.state.phase != GamePhase::Menu
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    /// Switch variant; takes effect on the next run
    pub fn set_variant(&mut self, variant: Variant) {
        self.settings.variant = variant;
        if let Err(e) = self.settings.save(&mut self.storage) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn record_score(&mut self, score: u64, now_ms: f64) {
        if score == 0 {
            return;
        }
        match self
            .leaderboard
            .save(&mut self.storage, score, format_date(now_ms), now_ms)
        {
            Ok(rank) => {
                if let Some(rank) = rank {
                    log::info!("Score {} placed #{} on the leaderboard", score, rank);
                }
                self.last_rank = rank;
            }
            Err(e) => log::warn!("Could not save score {}: {}", score, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::persistence::MemoryStorage;
    use crate::sim::Enemy;
    use glam::Vec2;

    const NOW: f64 = 1_767_268_800_000.0;

    fn session() -> Session<MemoryStorage> {
        let mut session = Session::new(MemoryStorage::new(), 42, 800.0, 600.0);
        session.start();
        session.state.spawn_rate = 0.0;
        session
    }

    fn contact(session: &mut Session<MemoryStorage>) {
        let pos = session.state.player.pos;
        session.state.enemies.push(Enemy {
            pos,
            radius: 20.0,
            hue: 330.0,
        });
        session.update(&TickInput::default(), FRAME_MS, NOW);
    }

    #[test]
    fn test_opens_at_menu() {
        let session = Session::new(MemoryStorage::new(), 1, 800.0, 600.0);
        assert!(!session.is_running());
        assert!(session.leaderboard.is_empty());
    }

    #[test]
    fn test_game_over_records_score() {
        let mut session = session();
        session.state.score = 250;

        for _ in 0..50 {
            assert!(session.is_running());
            contact(&mut session);
        }

        assert!(!session.is_running());
        assert_eq!(session.state.phase, GamePhase::Menu);
        assert_eq!(session.last_rank(), Some(1));
        assert_eq!(session.leaderboard.top_score(), Some(250));
        assert_eq!(session.leaderboard.entries[0].timestamp, NOW);

        // Persisted
        let stored = Leaderboard::load(session.storage());
        assert_eq!(stored.top_score(), Some(250));
    }

    #[test]
    fn test_zero_score_not_recorded() {
        let mut session = session();
        for _ in 0..50 {
            contact(&mut session);
        }
        assert!(!session.is_running());
        assert!(session.leaderboard.is_empty());
        assert!(session.storage().get(Leaderboard::STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_restart_restores_health() {
        let mut session = session();
        contact(&mut session);
        assert_eq!(session.state.health, PLAYER_START_HEALTH - CONTACT_DAMAGE);

        session.start();
        assert!(session.is_running());
        assert_eq!(session.state.health, PLAYER_START_HEALTH);
        assert_eq!(session.state.player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_variant_applies_next_run() {
        let mut session = session();
        assert!(!session.state.tuning.allow_pause);

        session.set_variant(Variant::Desktop);
        assert!(!session.state.tuning.allow_pause);

        session.start();
        assert!(session.state.tuning.allow_pause);
        assert_eq!(session.state.enemy_speed, 1.5);

        // Remembered across sessions
        let storage = session.storage().clone();
        let reopened = Session::new(storage, 2, 800.0, 600.0);
        assert_eq!(reopened.settings.variant, Variant::Desktop);
    }

    #[test]
    fn test_leaderboard_survives_sessions() {
        let mut first = session();
        first.state.score = 70;
        for _ in 0..50 {
            contact(&mut first);
        }

        let mut second = Session::new(first.storage().clone(), 9, 800.0, 600.0);
        second.start();
        second.state.spawn_rate = 0.0;
        second.state.score = 90;
        for _ in 0..50 {
            contact(&mut second);
        }

        let scores: Vec<u64> = second.leaderboard.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![90, 70]);
        assert_eq!(second.last_rank(), Some(1));
    }
}
