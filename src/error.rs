use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single Slack API round trip.
#[derive(Debug, Error)]
pub enum SlackError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("Slack API error from {endpoint}: {code}")]
    Api {
        endpoint: String,
        code: String,
        needed: Option<String>,
    },

    #[error("failed to parse API response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("file {0} has no private download URL")]
    MissingDownloadUrl(String),
}

impl SlackError {
    /// The remote error code, if the API itself rejected the call.
    pub fn code(&self) -> Option<&str> {
        match self {
            SlackError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Explanation for the error codes an operator is most likely to hit.
    pub fn hint(&self) -> Option<String> {
        let SlackError::Api { code, needed, .. } = self else {
            return None;
        };

        let hint = match code.as_str() {
            "invalid_auth" => "Invalid authentication token.\n\n\
                 ADMIN_SLACK_TOKEN or POST_SLACK_TOKEN may be expired or invalid.\n\
                 Please check your tokens at: https://api.slack.com/apps"
                .to_string(),
            "not_authed" => "Not authenticated.\n\n\
                 Please set ADMIN_SLACK_TOKEN and POST_SLACK_TOKEN in the environment or in .env"
                .to_string(),
            "missing_scope" => format!(
                "Missing required OAuth scope.\n\n\
                 Required: {}\n\n\
                 The admin token needs channels:read, users:read, files:read and files:write;\n\
                 the posting token needs files:write.",
                needed.as_deref().unwrap_or("unknown")
            ),
            "account_inactive" => "The Slack account behind this token is inactive.".to_string(),
            "token_revoked" => "The authentication token has been revoked.".to_string(),
            "no_permission" => "The token does not have permission to access this resource.".to_string(),
            "ratelimited" => "Rate limited. Please wait a moment and run again.".to_string(),
            "file_not_found" => "The file was already removed from Slack.".to_string(),
            "channel_not_found" => "The report channel could not be found by the posting token.".to_string(),
            "cant_delete_file" => "The admin token is not allowed to delete this file.\n\
                 Use a user token belonging to a workspace admin."
                .to_string(),
            _ => return None,
        };

        Some(hint)
    }
}

/// Anything that aborts a clean-up run.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Slack(#[from] SlackError),

    #[error("failed to write {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write progress output: {0}")]
    Console(#[from] std::io::Error),

    #[error("report channel '{0}' not found")]
    ReportChannelNotFound(String),
}
