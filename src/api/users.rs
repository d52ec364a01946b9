use super::client::SlackClient;
use crate::error::SlackError;
use crate::models::user::{User, UsersListResponse};

/// Lists workspace members, deleted accounts included, so that files
/// uploaded by former members can still be attributed.
pub async fn list_users(client: &SlackClient) -> Result<Vec<User>, SlackError> {
    let query = vec![("limit", "1000".to_string())];
    let response: UsersListResponse = client.get("users.list", &query).await?;

    Ok(response.members)
}
