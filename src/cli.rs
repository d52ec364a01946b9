use crate::api::client::DEFAULT_BASE_URL;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "filesweep")]
#[command(about = "Archive old Slack file attachments locally and delete them from Slack", long_about = None)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Testing mode: list what would be archived without downloading or deleting
    #[arg(short, long)]
    pub dry: bool,

    /// Clean up every public channel (only takes effect when TARGET_CHANNEL is empty)
    #[arg(short, long)]
    pub all: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colorized output
    #[arg(long)]
    pub no_color: bool,

    /// Token used to list, download and delete files
    #[arg(long, env = "ADMIN_SLACK_TOKEN", hide_env_values = true)]
    pub admin_token: String,

    /// Token used to post the run report
    #[arg(long, env = "POST_SLACK_TOKEN", hide_env_values = true)]
    pub post_token: String,

    /// Channel to clean up (empty for all public channels)
    #[arg(long, env = "TARGET_CHANNEL", default_value = "")]
    pub target_channel: String,

    /// Age in seconds a file must exceed to be archived
    #[arg(long, env = "TARGET_AGO")]
    pub target_ago: u64,

    /// Directory that receives one sub-directory per channel
    #[arg(long, env = "DOWNLOAD_PATH")]
    pub download_path: PathBuf,

    /// Channel the run report is posted to
    #[arg(long, env = "REPORT_CHANNEL")]
    pub report_channel: String,

    /// Slack Web API base URL
    #[arg(long, env = "SLACK_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,
}
