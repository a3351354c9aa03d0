use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use shared::repositories::game_repository::DynamoDbGameRepository;
use shared::repositories::user_repository::DynamoDbUserRepository;
use shared::services::game_service::GameService;
use shared::services::user_service::UserService;

#[derive(Deserialize)]
struct EventBridgeEvent {
    detail: Detail,
}

#[derive(Deserialize)]
struct Detail {
    #[serde(rename = "userId")]
    user_id: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt().init();
    run(service_fn(user_delete_handler)).await
}

async fn user_delete_handler(event: LambdaEvent<EventBridgeEvent>) -> Result<(), Error> {
    let user_id = event.payload.detail.user_id;
    info!("Deleting user: {}", user_id);

    let users_table = std::env::var("USERS_TABLE").map_err(|_| "USERS_TABLE must be set")?;
    let games_table = std::env::var("GAMES_TABLE").map_err(|_| "GAMES_TABLE must be set")?;

    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);
    let game_service = Arc::new(GameService::new(Arc::new(DynamoDbGameRepository::new(
        client.clone(),
        games_table,
    ))));
    let user_service = UserService::new(
        Arc::new(DynamoDbUserRepository::new(client, users_table)),
        game_service,
    );

    user_service
        .delete_user(&user_id)
        .await
        .map_err(|e| Error::from(format!("Failed to delete user {}: {}", user_id, e)))?;

    info!("User deleted successfully: {}", user_id);
    Ok(())
}
