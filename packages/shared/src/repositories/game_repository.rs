use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};
use tracing::{debug, info};

use crate::models::game::Game;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;

#[cfg(test)]
use mockall::automock;

/// Storage for game aggregates. A game is stored as one item including its
/// moves, so a move and the outcome it produced are written together.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError>;

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError>;

    /// Replaces the stored game only if its version still equals `expected_version`.
    async fn update_game(
        &self,
        game: &Game,
        expected_version: u64,
    ) -> Result<(), GameRepositoryError>;

    /// All games, oldest first.
    async fn list_games(&self) -> Result<Vec<Game>, GameRepositoryError>;

    async fn find_games_by_participant(
        &self,
        participant: &str,
    ) -> Result<Vec<Game>, GameRepositoryError>;
}

pub struct DynamoDbGameRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbGameRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    async fn scan(
        &self,
        filter: Option<(&str, HashMap<String, AttributeValue>)>,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let mut games = Vec::new();
        let mut start_key = None;

        loop {
            let mut request = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key);
            if let Some((expression, values)) = &filter {
                request = request
                    .filter_expression(*expression)
                    .set_expression_attribute_values(Some(values.clone()));
            }

            let output = request
                .send()
                .await
                .map_err(|e| GameRepositoryError::DynamoDb(DisplayErrorContext(&e).to_string()))?;

            for item in output.items.unwrap_or_default() {
                let game: Game = from_item(item)?;
                games.push(game);
            }

            start_key = output.last_evaluated_key;
            if start_key.is_none() {
                break;
            }
        }

        games.sort_by_key(|game| game.created_at());
        Ok(games)
    }
}

#[async_trait]
impl GameRepository for DynamoDbGameRepository {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let item = to_item(game)?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await;

        match result {
            Ok(_) => {
                info!("Stored game: {}", game.id());
                Ok(())
            }
            Err(e) => {
                let conditional_failed = e
                    .as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception());
                if conditional_failed {
                    Err(GameRepositoryError::AlreadyExists)
                } else {
                    Err(GameRepositoryError::DynamoDb(DisplayErrorContext(&e).to_string()))
                }
            }
        }
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", to_attribute_value(game_id)?)
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(DisplayErrorContext(&e).to_string()))?;

        match output.item {
            Some(item) => {
                let game: Game = from_item(item)?;
                Ok(Some(game))
            }
            None => Ok(None),
        }
    }

    async fn update_game(
        &self,
        game: &Game,
        expected_version: u64,
    ) -> Result<(), GameRepositoryError> {
        let item = to_item(game)?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(id) AND version = :expected_version")
            .expression_attribute_values(
                ":expected_version",
                to_attribute_value(expected_version)?,
            )
            .send()
            .await;

        match result {
            Ok(_) => {
                debug!("Updated game {} to version {}", game.id(), game.version());
                Ok(())
            }
            Err(e) => {
                let conditional_failed = e
                    .as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception());
                if !conditional_failed {
                    return Err(GameRepositoryError::DynamoDb(
                        DisplayErrorContext(&e).to_string(),
                    ));
                }
                // The condition covers both a missing item and a stale version.
                match self.get_game(game.id()).await? {
                    Some(_) => Err(GameRepositoryError::VersionConflict),
                    None => Err(GameRepositoryError::NotFound),
                }
            }
        }
    }

    async fn list_games(&self) -> Result<Vec<Game>, GameRepositoryError> {
        self.scan(None).await
    }

    async fn find_games_by_participant(
        &self,
        participant: &str,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let value: AttributeValue = to_attribute_value(participant)?;
        let values = HashMap::from([(":participant".to_string(), value)]);

        self.scan(Some((
            "player_one = :participant OR player_two = :participant",
            values,
        )))
        .await
    }
}
