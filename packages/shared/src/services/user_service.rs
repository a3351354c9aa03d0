use std::sync::Arc;

use tracing::{info, warn};

use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::errors::user_service_errors::UserServiceError;
use crate::services::game_service::GameService;

pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    game_service: Arc<GameService>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository + Send + Sync>,
        game_service: Arc<GameService>,
    ) -> Self {
        UserService {
            repository,
            game_service,
        }
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, UserServiceError> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Username, email or password cannot be empty".to_string(),
            ));
        }
        if self
            .repository
            .username_exists(username)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))?
        {
            return Err(UserServiceError::UserAlreadyExists);
        }

        let user = User::new(username.to_string(), email.to_string(), password);
        self.repository
            .create_user(&user)
            .await
            .map_err(|e| match e {
                UserRepositoryError::AlreadyExists => UserServiceError::UserAlreadyExists,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })?;
        info!("Created user {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserServiceError> {
        if user_id.is_empty() {
            return Err(UserServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_user_by_id(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User, UserServiceError> {
        if username.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_user_by_username(username)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
        self.repository
            .list_users()
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))
    }

    /// Changes the email and/or password of an existing account. Provided fields
    /// follow the sign-up rules; omitted fields are left as they are.
    pub async fn update_user(
        &self,
        user_id: &str,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, UserServiceError> {
        if email.is_some_and(str::is_empty) || password.is_some_and(str::is_empty) {
            return Err(UserServiceError::ValidationError(
                "Email or password cannot be empty".to_string(),
            ));
        }
        let mut user = self.get_user_by_id(user_id).await?;

        if let Some(email) = email {
            user.email = email.to_string();
        }
        if let Some(password) = password {
            user.set_password(password);
        }

        self.repository
            .update_user(&user)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })?;
        info!("Updated user {}", user.id);
        Ok(user)
    }

    /// Removes an account that never played a move. Its open game slots are released first.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), UserServiceError> {
        let user = self.get_user_by_id(user_id).await?;

        if self.game_service.participant_has_moves(&user.id).await? {
            warn!("Refusing to delete user {}: moves reference it", user.id);
            return Err(UserServiceError::UserHasMoves);
        }
        let released = self
            .game_service
            .release_participant(&user.id)
            .await
            .map_err(|e| match e {
                GameServiceError::ParticipantHasMoves => {
                    warn!("Refusing to delete user {}: a move was accepted meanwhile", user.id);
                    UserServiceError::UserHasMoves
                }
                other => other.into(),
            })?;

        self.repository
            .delete_user(&user.id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })?;
        info!("Deleted user {} and released {} game slot(s)", user.id, released);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::{Game, Side};
    use crate::repositories::game_repository::MockGameRepository;
    use crate::repositories::in_memory::{InMemoryGameRepository, InMemoryUserRepository};
    use crate::repositories::user_repository::MockUserRepository;
    use crate::services::game_rules;
    use mockall::Sequence;
    use rand::rngs::mock::StepRng;

    fn game_service() -> Arc<GameService> {
        Arc::new(GameService::with_rng(
            Arc::new(InMemoryGameRepository::new()),
            StepRng::new(0, 0),
        ))
    }

    fn service_with(game_service: Arc<GameService>) -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::new()), game_service)
    }

    #[tokio::test]
    async fn test_create_and_look_up_user() {
        let service = service_with(game_service());

        let user = service
            .create_user("alice", "alice@example.com", "secret")
            .await
            .unwrap();

        assert!(user.verify_password("secret"));
        assert_eq!(service.get_user_by_id(&user.id).await.unwrap(), user);
        assert_eq!(service.get_user_by_username("alice").await.unwrap(), user);
        assert_eq!(service.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let service = service_with(game_service());
        service.create_user("alice", "a@example.com", "pw").await.unwrap();

        let result = service.create_user("alice", "b@example.com", "pw").await;
        assert!(matches!(result, Err(UserServiceError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_empty_fields_are_rejected() {
        let service = service_with(game_service());

        let result = service.create_user("", "a@example.com", "pw").await;
        assert!(matches!(result, Err(UserServiceError::ValidationError(_))));

        let result = service.get_user_by_id("").await;
        assert!(matches!(result, Err(UserServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let service = service_with(game_service());

        assert!(matches!(
            service.get_user_by_username("nobody").await,
            Err(UserServiceError::UserNotFound)
        ));
        assert!(matches!(
            service.delete_user("missing").await,
            Err(UserServiceError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_user_releases_game_slots() {
        let games = game_service();
        let service = service_with(games.clone());
        let alice = service.create_user("alice", "a@example.com", "pw").await.unwrap();
        let bob = service.create_user("bob", "b@example.com", "pw").await.unwrap();

        let game = games.create_game(&alice.id).await.unwrap();
        games.join_game(game.id(), &bob.id).await.unwrap();

        service.delete_user(&bob.id).await.unwrap();

        let game = games.get_game(game.id()).await.unwrap();
        assert_eq!(game.player_two(), None);
        assert!(!game.is_full());
        assert!(matches!(
            service.get_user_by_id(&bob.id).await,
            Err(UserServiceError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_user_with_moves_cannot_be_deleted() {
        let games = game_service();
        let service = service_with(games.clone());
        let alice = service.create_user("alice", "a@example.com", "pw").await.unwrap();
        let bob = service.create_user("bob", "b@example.com", "pw").await.unwrap();

        let game = games.create_game(&alice.id).await.unwrap();
        games.join_game(game.id(), &bob.id).await.unwrap();
        games.make_move(game.id(), &alice.id, 1, 1).await.unwrap();

        let result = service.delete_user(&alice.id).await;

        assert!(matches!(result, Err(UserServiceError::UserHasMoves)));
        assert!(service.get_user_by_id(&alice.id).await.is_ok());
        let game = games.get_game(game.id()).await.unwrap();
        assert_eq!(game.player_one(), Some(alice.id.as_str()));
    }

    #[tokio::test]
    async fn test_move_accepted_during_deletion_keeps_the_account() {
        let users = Arc::new(InMemoryUserRepository::new());
        let alice = User::new("alice".to_string(), "a@example.com".to_string(), "pw");
        users.create_user(&alice).await.unwrap();

        let mut checked = Game::new();
        game_rules::assign_creator(&mut checked, &alice.id, Side::PlayerOne).unwrap();
        game_rules::join(&mut checked, "bob").unwrap();
        let mut released = checked.clone();
        game_rules::play(&mut released, &alice.id, 1, 1).unwrap();

        let mut sequence = Sequence::new();
        let mut games = MockGameRepository::new();
        games
            .expect_find_games_by_participant()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(move |_| Ok(vec![checked.clone()]));
        games
            .expect_find_games_by_participant()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(move |_| Ok(vec![released.clone()]));
        games.expect_update_game().never();

        let game_service = Arc::new(GameService::with_rng(Arc::new(games), StepRng::new(0, 0)));
        let service = UserService::new(users, game_service);

        let result = service.delete_user(&alice.id).await;

        assert!(matches!(result, Err(UserServiceError::UserHasMoves)));
        assert!(service.get_user_by_id(&alice.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_user() {
        let service = service_with(game_service());
        let alice = service.create_user("alice", "a@example.com", "pw").await.unwrap();

        let updated = service
            .update_user(&alice.id, Some("alice@example.org"), None)
            .await
            .unwrap();
        assert_eq!(updated.email, "alice@example.org");
        assert!(updated.verify_password("pw"));

        let updated = service.update_user(&alice.id, None, Some("new-pw")).await.unwrap();
        assert_eq!(updated.email, "alice@example.org");
        assert!(updated.verify_password("new-pw"));

        let stored = service.get_user_by_id(&alice.id).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_user_rejections() {
        let service = service_with(game_service());
        let alice = service.create_user("alice", "a@example.com", "pw").await.unwrap();

        assert!(matches!(
            service.update_user(&alice.id, Some(""), None).await,
            Err(UserServiceError::ValidationError(_))
        ));
        assert!(matches!(
            service.update_user(&alice.id, None, Some("")).await,
            Err(UserServiceError::ValidationError(_))
        ));
        assert!(matches!(
            service.update_user("missing", Some("x@example.com"), None).await,
            Err(UserServiceError::UserNotFound)
        ));
        assert_eq!(service.get_user_by_id(&alice.id).await.unwrap(), alice);
    }

    #[tokio::test]
    async fn test_repository_failure_on_create() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_username_exists()
            .returning(|_| Err(UserRepositoryError::DynamoDb("unavailable".to_string())));
        repository.expect_create_user().never();

        let service = UserService::new(Arc::new(repository), game_service());
        let result = service.create_user("alice", "a@example.com", "pw").await;

        assert!(matches!(result, Err(UserServiceError::RepositoryError(_))));
    }
}
