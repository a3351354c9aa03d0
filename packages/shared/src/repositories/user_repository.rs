use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};
use tracing::info;

#[cfg(test)]
use mockall::automock;

const USERNAME_INDEX: &str = "GSI_UserByUsername";

pub struct DynamoDbUserRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbUserRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError>;
    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError>;
    async fn get_user_by_username(&self, username: &str) -> Result<User, UserRepositoryError>;
    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError>;
    /// All registered users, ordered by username.
    async fn list_users(&self) -> Result<Vec<User>, UserRepositoryError>;
    /// Overwrites an existing account; `NotFound` if the id is unknown.
    async fn update_user(&self, user: &User) -> Result<(), UserRepositoryError>;
    async fn delete_user(&self, user_id: &str) -> Result<(), UserRepositoryError>;
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let item = to_item(user)?;
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
                info!("Stored user: {}", user.id);
                Ok(())
            }
            Err(e) => {
                let conditional_failed = e
                    .as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception());
                if conditional_failed {
                    Err(UserRepositoryError::AlreadyExists)
                } else {
                    Err(UserRepositoryError::DynamoDb(DisplayErrorContext(&e).to_string()))
                }
            }
        }
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", to_attribute_value(user_id)?)
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(DisplayErrorContext(&e).to_string()))?;
        if let Some(item) = output.item {
            let user: User = from_item(item)?;
            Ok(user)
        } else {
            Err(UserRepositoryError::NotFound)
        }
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, UserRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(USERNAME_INDEX)
            .key_condition_expression("username = :username")
            .expression_attribute_values(":username", to_attribute_value(username)?)
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(DisplayErrorContext(&e).to_string()))?;

        match output.items.and_then(|items| items.into_iter().next()) {
            Some(item) => {
                let user: User = from_item(item)?;
                Ok(user)
            }
            None => Err(UserRepositoryError::NotFound),
        }
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(USERNAME_INDEX)
            .key_condition_expression("username = :username")
            .expression_attribute_values(":username", to_attribute_value(username)?)
            .limit(1)
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(DisplayErrorContext(&e).to_string()))?;

        Ok(output.items.is_some_and(|items| !items.is_empty()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut users = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| UserRepositoryError::DynamoDb(DisplayErrorContext(&e).to_string()))?;

            for item in output.items.unwrap_or_default() {
                let user: User = from_item(item)?;
                users.push(user);
            }

            start_key = output.last_evaluated_key;
            if start_key.is_none() {
                break;
            }
        }

        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn update_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let item = to_item(user)?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(id)")
            .send()
            .await;
        match result {
            Ok(_) => {
                info!("Updated user: {}", user.id);
                Ok(())
            }
            Err(e) => {
                let conditional_failed = e
                    .as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception());
                if conditional_failed {
                    Err(UserRepositoryError::NotFound)
                } else {
                    Err(UserRepositoryError::DynamoDb(DisplayErrorContext(&e).to_string()))
                }
            }
        }
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), UserRepositoryError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", to_attribute_value(user_id)?)
            .condition_expression("attribute_exists(id)")
            .send()
            .await;
        match result {
            Ok(_) => {
                info!("Deleted user: {}", user_id);
                Ok(())
            }
            Err(e) => {
                let conditional_failed = e
                    .as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception());
                if conditional_failed {
                    Err(UserRepositoryError::NotFound)
                } else {
                    Err(UserRepositoryError::DynamoDb(DisplayErrorContext(&e).to_string()))
                }
            }
        }
    }
}
