use lambda_http::{run, tracing, Error};
use std::env::set_var;
use std::sync::Arc;

use api::config::{AppConfig, RunMode, StorageBackend};
use api::state::AppState;
use shared::repositories::game_repository::{DynamoDbGameRepository, GameRepository};
use shared::repositories::in_memory::{InMemoryGameRepository, InMemoryUserRepository};
use shared::repositories::user_repository::{DynamoDbUserRepository, UserRepository};

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    let config = AppConfig::from_env()?;
    let app_state = build_state(&config).await;
    let app = api::app(app_state);

    match config.run_mode {
        RunMode::Lambda => run(app).await,
        RunMode::Local => {
            let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
            tracing::info!("Listening on http://{}", config.bind_addr);
            axum::serve(listener, app).await?;
            Ok(())
        }
    }
}

async fn build_state(config: &AppConfig) -> AppState {
    let (user_repository, game_repository): (
        Arc<dyn UserRepository + Send + Sync>,
        Arc<dyn GameRepository + Send + Sync>,
    ) = match &config.storage {
        StorageBackend::DynamoDb {
            games_table,
            users_table,
        } => {
            let aws_config = aws_config::load_from_env().await;
            let client = aws_sdk_dynamodb::Client::new(&aws_config);
            (
                Arc::new(DynamoDbUserRepository::new(client.clone(), users_table)),
                Arc::new(DynamoDbGameRepository::new(client, games_table)),
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; state is lost on restart");
            (
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryGameRepository::new()),
            )
        }
    };

    AppState::new(user_repository, game_repository, config.jwt_secret.clone())
}
