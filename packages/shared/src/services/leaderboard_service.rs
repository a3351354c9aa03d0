use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::models::highscore::HighscoreEntry;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::game_repository::GameRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::leaderboard_service_errors::LeaderboardServiceError;

/// Win counts per account, derived from finished games on every call.
pub struct LeaderboardService {
    user_repository: Arc<dyn UserRepository + Send + Sync>,
    game_repository: Arc<dyn GameRepository + Send + Sync>,
}

impl LeaderboardService {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        game_repository: Arc<dyn GameRepository + Send + Sync>,
    ) -> Self {
        LeaderboardService {
            user_repository,
            game_repository,
        }
    }

    /// Every account, most wins first; equal counts are ordered by username.
    pub async fn highscores(&self) -> Result<Vec<HighscoreEntry>, LeaderboardServiceError> {
        let users = self
            .user_repository
            .list_users()
            .await
            .map_err(|e| LeaderboardServiceError::RepositoryError(e.to_string()))?;
        let wins = self.wins_by_player().await?;

        let mut entries: Vec<HighscoreEntry> = users
            .into_iter()
            .map(|user| HighscoreEntry {
                wins_count: wins.get(&user.id).copied().unwrap_or(0),
                id: user.id,
                username: user.username,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.wins_count
                .cmp(&a.wins_count)
                .then_with(|| a.username.cmp(&b.username))
        });

        debug!("Computed {} highscore entries", entries.len());
        Ok(entries)
    }

    pub async fn highscore(&self, user_id: &str) -> Result<HighscoreEntry, LeaderboardServiceError> {
        let user = self
            .user_repository
            .get_user_by_id(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => LeaderboardServiceError::UserNotFound,
                _ => LeaderboardServiceError::RepositoryError(e.to_string()),
            })?;

        let wins_count = self
            .game_repository
            .find_games_by_participant(&user.id)
            .await
            .map_err(|e| LeaderboardServiceError::RepositoryError(e.to_string()))?
            .iter()
            .filter(|game| game.winner_id() == Some(user.id.as_str()))
            .count() as u32;

        Ok(HighscoreEntry {
            id: user.id,
            username: user.username,
            wins_count,
        })
    }

    async fn wins_by_player(&self) -> Result<HashMap<String, u32>, LeaderboardServiceError> {
        let games = self
            .game_repository
            .list_games()
            .await
            .map_err(|e| LeaderboardServiceError::RepositoryError(e.to_string()))?;

        let mut wins = HashMap::new();
        for winner in games.iter().filter_map(|game| game.winner_id()) {
            *wins.entry(winner.to_string()).or_insert(0) += 1;
        }
        Ok(wins)
    }
}
