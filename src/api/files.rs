use super::client::SlackClient;
use crate::error::SlackError;
use crate::models::file::{File, FileInfoResponse, FileUploadResponse, FilesListResponse};
use serde::de::IgnoredAny;

/// Lists files shared in `channel_id` whose upload time is at or before `ts_to`.
pub async fn list_files(
    client: &SlackClient,
    channel_id: &str,
    ts_to: i64,
) -> Result<Vec<File>, SlackError> {
    let query = vec![
        ("channel", channel_id.to_string()),
        ("ts_to", ts_to.to_string()),
        ("types", "all".to_string()),
    ];

    let response: FilesListResponse = client.get("files.list", &query).await?;

    if let Some(paging) = &response.paging {
        if paging.pages > 1 {
            tracing::warn!(
                channel = channel_id,
                total = paging.total,
                fetched = paging.count,
                "only the first page of files is processed; run again to continue"
            );
        }
    }

    Ok(response.files)
}

pub async fn get_file_info(client: &SlackClient, file_id: &str) -> Result<File, SlackError> {
    let query = vec![("file", file_id.to_string())];
    let response: FileInfoResponse = client.get("files.info", &query).await?;

    Ok(response.file)
}

/// Resolves the private download URL through `files.info`, then fetches the content.
pub async fn download_file(client: &SlackClient, file_id: &str) -> Result<Vec<u8>, SlackError> {
    let file = get_file_info(client, file_id).await?;
    let url = file
        .url_private_download
        .ok_or_else(|| SlackError::MissingDownloadUrl(file_id.to_string()))?;

    client.download(&url).await
}

pub async fn delete_file(client: &SlackClient, file_id: &str) -> Result<(), SlackError> {
    let query = vec![("file", file_id.to_string())];
    let _: IgnoredAny = client.get("files.delete", &query).await?;

    Ok(())
}

/// A text snippet to share into one or more channels.
#[derive(Debug, Clone)]
pub struct UploadRequest<'a> {
    pub channels: &'a str,
    pub content: &'a str,
    pub filename: &'a str,
    pub filetype: &'a str,
    pub title: &'a str,
    pub initial_comment: Option<&'a str>,
}

pub async fn upload_file(
    client: &SlackClient,
    request: &UploadRequest<'_>,
) -> Result<File, SlackError> {
    let mut query = vec![
        ("channels", request.channels.to_string()),
        ("filename", request.filename.to_string()),
        ("filetype", request.filetype.to_string()),
        ("title", request.title.to_string()),
    ];

    if let Some(comment) = request.initial_comment {
        query.push(("initial_comment", comment.to_string()));
    }

    let form = [("content", request.content)];
    let response: FileUploadResponse = client.post_form("files.upload", &query, &form).await?;

    Ok(response.file)
}
