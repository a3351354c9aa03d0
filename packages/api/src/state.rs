use std::sync::Arc;

use shared::repositories::game_repository::GameRepository;
use shared::repositories::user_repository::UserRepository;
use shared::services::auth_service::AuthService;
use shared::services::game_service::GameService;
use shared::services::leaderboard_service::LeaderboardService;
use shared::services::user_service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub game_service: Arc<GameService>,
    pub leaderboard_service: Arc<LeaderboardService>,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        jwt_secret: String,
    ) -> Self {
        let game_service = GameService::new(game_repository.clone());
        Self::with_game_service(user_repository, game_repository, game_service, jwt_secret)
    }

    /// Wires the services around an already built `GameService`, e.g. one with a fixed random source.
    pub fn with_game_service(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        game_service: GameService,
        jwt_secret: String,
    ) -> Self {
        let game_service = Arc::new(game_service);
        let user_service = Arc::new(UserService::new(
            user_repository.clone(),
            game_service.clone(),
        ));
        let auth_service = Arc::new(AuthService::with_jwt_secret(
            user_service.clone(),
            jwt_secret,
        ));
        let leaderboard_service = Arc::new(LeaderboardService::new(
            user_repository,
            game_repository,
        ));

        AppState {
            auth_service,
            user_service,
            game_service,
            leaderboard_service,
        }
    }
}
