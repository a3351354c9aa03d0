use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, info, warn};

use crate::{
    models::game::{Game, Move, Side},
    repositories::game_repository::GameRepository,
    services::{errors::game_service_errors::GameServiceError, game_rules},
};

/// Loads games, applies [`game_rules`] transitions and writes them back.
///
/// Every write carries the version the game was loaded at, so two requests
/// racing on the same game cannot both succeed. The loser gets
/// `ConcurrentModification` and is not retried here.
pub struct GameService {
    repository: Arc<dyn GameRepository + Send + Sync>,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl GameService {
    pub fn new(repository: Arc<dyn GameRepository + Send + Sync>) -> Self {
        Self::with_rng(repository, StdRng::from_entropy())
    }

    pub fn with_rng(
        repository: Arc<dyn GameRepository + Send + Sync>,
        rng: impl RngCore + Send + 'static,
    ) -> Self {
        GameService {
            repository,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    pub async fn create_game(&self, creator: &str) -> Result<Game, GameServiceError> {
        let mut game = Game::new();
        let side = self.draw_side();
        game_rules::assign_creator(&mut game, creator, side)?;

        self.repository.create_game(&game).await?;
        info!("Created game {} with {} as {:?}", game.id(), creator, side);
        Ok(game)
    }

    pub async fn get_game(&self, game_id: &str) -> Result<Game, GameServiceError> {
        debug!("Loading game {}", game_id);
        self.repository
            .get_game(game_id)
            .await?
            .ok_or(GameServiceError::GameNotFound)
    }

    pub async fn list_games(&self) -> Result<Vec<Game>, GameServiceError> {
        Ok(self.repository.list_games().await?)
    }

    pub async fn list_moves(&self, game_id: &str) -> Result<Vec<Move>, GameServiceError> {
        let game = self.get_game(game_id).await?;
        let mut moves = game.moves().to_vec();
        moves.sort_by_key(|m| m.created_at);
        Ok(moves)
    }

    pub async fn join_game(
        &self,
        game_id: &str,
        participant: &str,
    ) -> Result<Game, GameServiceError> {
        let mut game = self.get_game(game_id).await?;
        let side = game_rules::join(&mut game, participant).inspect_err(|e| {
            warn!("{} could not join game {}: {}", participant, game_id, e);
        })?;

        let game = self.persist(game).await?;
        info!("{} joined game {} as {:?}", participant, game_id, side);
        Ok(game)
    }

    pub async fn make_move(
        &self,
        game_id: &str,
        participant: &str,
        row: u8,
        column: u8,
    ) -> Result<Move, GameServiceError> {
        let mut game = self.get_game(game_id).await?;
        let game_move = game_rules::play(&mut game, participant, row, column).inspect_err(|e| {
            warn!(
                "Rejected move ({}, {}) by {} in game {}: {}",
                row, column, participant, game_id, e
            );
        })?;

        let game = self.persist(game).await?;
        info!(
            "{} played {:?} at ({}, {}) in game {}, status {:?}",
            participant,
            game_move.mark,
            row,
            column,
            game_id,
            game.status()
        );
        Ok(game_move)
    }

    /// Whether `participant` has a recorded move in any game.
    pub async fn participant_has_moves(&self, participant: &str) -> Result<bool, GameServiceError> {
        let games = self.repository.find_games_by_participant(participant).await?;
        Ok(games
            .iter()
            .any(|game| game.moves_by(participant).next().is_some()))
    }

    /// Clears every slot held by `participant` and returns how many games changed.
    ///
    /// Games keep their status and moves; a released slot can be joined again.
    /// Fails with `ParticipantHasMoves` if a stored game holds a move by the
    /// participant; the versioned write rejects a release computed from a stale read.
    pub async fn release_participant(&self, participant: &str) -> Result<usize, GameServiceError> {
        let games = self.repository.find_games_by_participant(participant).await?;
        let mut released = 0;

        for mut game in games {
            if game_rules::release_participant(&mut game, participant)? {
                let game = self.persist(game).await?;
                info!("Released {} from game {}", participant, game.id());
                released += 1;
            }
        }

        Ok(released)
    }

    async fn persist(&self, mut game: Game) -> Result<Game, GameServiceError> {
        let expected_version = game.version();
        game.bump_version();
        self.repository
            .update_game(&game, expected_version)
            .await
            .inspect_err(|e| warn!("Could not store game {}: {}", game.id(), e))?;
        Ok(game)
    }

    fn draw_side(&self) -> Side {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        if rng.gen_bool(0.5) {
            Side::PlayerOne
        } else {
            Side::PlayerTwo
        }
    }
}
