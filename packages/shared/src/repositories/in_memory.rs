use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::models::game::Game;
use crate::models::user::User;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::game_repository::GameRepository;
use crate::repositories::user_repository::UserRepository;

/// Process-local game storage with the same conditional-write rules as DynamoDB.
#[derive(Default)]
pub struct InMemoryGameRepository {
    games: Mutex<HashMap<String, Game>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Game>>, GameRepositoryError> {
        self.games
            .lock()
            .map_err(|e| GameRepositoryError::Storage(e.to_string()))
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let mut games = self.lock()?;
        if games.contains_key(game.id()) {
            return Err(GameRepositoryError::AlreadyExists);
        }
        games.insert(game.id().to_string(), game.clone());
        Ok(())
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        Ok(self.lock()?.get(game_id).cloned())
    }

    async fn update_game(
        &self,
        game: &Game,
        expected_version: u64,
    ) -> Result<(), GameRepositoryError> {
        let mut games = self.lock()?;
        let stored = games
            .get_mut(game.id())
            .ok_or(GameRepositoryError::NotFound)?;
        if stored.version() != expected_version {
            debug!(
                "Rejected write to game {}: stored version {}, expected {}",
                game.id(),
                stored.version(),
                expected_version
            );
            return Err(GameRepositoryError::VersionConflict);
        }
        *stored = game.clone();
        Ok(())
    }

    async fn list_games(&self) -> Result<Vec<Game>, GameRepositoryError> {
        let mut games: Vec<Game> = self.lock()?.values().cloned().collect();
        games.sort_by_key(|game| game.created_at());
        Ok(games)
    }

    async fn find_games_by_participant(
        &self,
        participant: &str,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let mut games: Vec<Game> = self
            .lock()?
            .values()
            .filter(|game| game.is_participant(participant))
            .cloned()
            .collect();
        games.sort_by_key(|game| game.created_at());
        Ok(games)
    }
}

/// Process-local user storage. Usernames are unique, as the index guarantees in DynamoDB.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, User>>, UserRepositoryError> {
        self.users
            .lock()
            .map_err(|e| UserRepositoryError::Storage(e.to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.lock()?;
        if users.contains_key(&user.id) || users.values().any(|u| u.username == user.username) {
            return Err(UserRepositoryError::AlreadyExists);
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError> {
        self.lock()?
            .get(user_id)
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, UserRepositoryError> {
        self.lock()?
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError> {
        Ok(self.lock()?.values().any(|u| u.username == username))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut users: Vec<User> = self.lock()?.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn update_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.lock()?;
        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(UserRepositoryError::NotFound),
        }
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), UserRepositoryError> {
        self.lock()?
            .remove(user_id)
            .map(|_| ())
            .ok_or(UserRepositoryError::NotFound)
    }
}
