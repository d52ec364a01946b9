use super::client::SlackClient;
use crate::error::SlackError;
use crate::models::channel::{Channel, ChannelsListResponse};

/// Lists public and private channels visible to the token. Single page only.
pub async fn list_channels(
    client: &SlackClient,
    exclude_archived: bool,
) -> Result<Vec<Channel>, SlackError> {
    let query = vec![
        ("types", "public_channel,private_channel".to_string()),
        ("exclude_archived", exclude_archived.to_string()),
        ("exclude_members", "true".to_string()),
        ("limit", "1000".to_string()),
    ];

    let response: ChannelsListResponse = client.get("conversations.list", &query).await?;

    Ok(response.channels)
}

/// Resolves a channel name (with or without a leading `#`) to its ID.
/// Archived channels are included in the search.
pub async fn find_channel_id(
    client: &SlackClient,
    name: &str,
) -> Result<Option<String>, SlackError> {
    let clean_name = name.strip_prefix('#').unwrap_or(name);
    let channels = list_channels(client, false).await?;

    let id = channels
        .into_iter()
        .find(|ch| ch.name == clean_name)
        .map(|ch| ch.id);

    match &id {
        Some(id) => tracing::debug!(name = clean_name, %id, "resolved channel"),
        None => tracing::debug!(name = clean_name, "channel not found"),
    }

    Ok(id)
}
