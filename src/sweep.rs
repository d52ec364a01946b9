//! One clean-up pass: archive old attachments channel by channel, delete
//! them from Slack, then post a report of what was done.

use crate::api::client::SlackClient;
use crate::api::files::UploadRequest;
use crate::api::{channels, files, users};
use crate::config::{Config, Scope};
use crate::error::SweepError;
use crate::models::channel::Channel;
use crate::models::user::User;
use crate::naming;
use crate::output::color::ColorWriter;
use crate::report::{self, ReportSettings, RunReport};
use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use termcolor::WriteColor;

const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total: usize,
    pub channels: Vec<(String, usize)>,
    pub report_file_id: String,
}

/// Picks the channels a run should visit out of the full listing.
pub fn select_channels<'a>(channels: &'a [Channel], scope: &Scope) -> Vec<&'a Channel> {
    match scope {
        Scope::AllPublic => channels
            .iter()
            .filter(|ch| ch.is_channel && !ch.is_private && !ch.is_archived)
            .collect(),
        Scope::Named(name) => channels.iter().filter(|ch| &ch.name == name).collect(),
    }
}

pub async fn run<W: WriteColor>(
    config: &Config,
    admin: &SlackClient,
    poster: &SlackClient,
    console: &mut ColorWriter<W>,
) -> Result<RunSummary, SweepError> {
    let started_at = Utc::now();
    let cutoff = config.cutoff(started_at.timestamp());
    let scope = config.scope();

    console.print_header("Filesweep")?;
    console.print_field("started_at", &started_at.format(TIME_FORMAT).to_string())?;
    if config.dry_run {
        console.print_notice("Dry run")?;
    }
    if scope == Scope::AllPublic {
        console.print_notice("All channel")?;
    }

    tracing::info!(
        dry_run = config.dry_run,
        ?scope,
        cutoff,
        root = %config.download_root.display(),
        "starting clean-up"
    );

    let all_channels = channels::list_channels(admin, true).await?;
    let members = users::list_users(admin).await?;
    let user_names = user_name_map(&members);

    let targets = select_channels(&all_channels, &scope);
    if let Scope::Named(name) = &scope {
        if targets.is_empty() {
            tracing::warn!(channel = %name, "target channel not found; nothing to clean up");
        }
    }

    let mut report = RunReport::new(ReportSettings {
        all_channels: scope == Scope::AllPublic,
        dry_run: config.dry_run,
        target_channel: config.target_channel.clone(),
        cutoff,
        started_at,
    });

    for channel in targets {
        sweep_channel(config, admin, channel, cutoff, &user_names, &mut report, console).await?;
    }

    let finished_at = Utc::now();
    let content = report.render(finished_at);

    let report_channel_id = channels::find_channel_id(admin, &config.report_channel)
        .await?
        .ok_or_else(|| SweepError::ReportChannelNotFound(config.report_channel.clone()))?;

    let filename = report::report_file_name(finished_at);
    let uploaded = files::upload_file(
        poster,
        &UploadRequest {
            channels: &report_channel_id,
            content: &content,
            filename: &filename,
            filetype: report::REPORT_FILETYPE,
            title: report::REPORT_TITLE,
            initial_comment: None,
        },
    )
    .await?;

    tracing::info!(
        total = report.total(),
        report_file = %uploaded.id,
        channel = %config.report_channel,
        "report posted"
    );

    console.print_field("finished_at", &finished_at.format(TIME_FORMAT).to_string())?;
    console.line("done")?;

    Ok(RunSummary {
        total: report.total(),
        channels: report
            .tallies()
            .iter()
            .map(|t| (t.name.clone(), t.count))
            .collect(),
        report_file_id: uploaded.id,
    })
}

fn user_name_map(members: &[User]) -> HashMap<&str, &str> {
    members
        .iter()
        .map(|u| (u.id.as_str(), u.name.as_str()))
        .collect()
}

async fn sweep_channel<W: WriteColor>(
    config: &Config,
    admin: &SlackClient,
    channel: &Channel,
    cutoff: i64,
    user_names: &HashMap<&str, &str>,
    report: &mut RunReport,
    console: &mut ColorWriter<W>,
) -> Result<(), SweepError> {
    report.begin_channel(channel);
    console.line(&format!("in #{}", channel.name))?;

    let folder = config.download_root.join(&channel.name);
    if !config.dry_run {
        tokio::fs::create_dir_all(&folder)
            .await
            .map_err(|source| SweepError::Filesystem {
                path: folder.clone(),
                source,
            })?;
    }

    let mut pending = files::list_files(admin, &channel.id, cutoff).await?;
    pending.retain(|f| f.timestamp <= cutoff);

    tracing::debug!(channel = %channel.name, files = pending.len(), "files eligible");

    for file in &pending {
        let uploader = match user_names.get(file.user.as_str()) {
            Some(name) => *name,
            None => {
                tracing::warn!(file = %file.id, user = %file.user, "uploader not in user list; using id");
                file.user.as_str()
            }
        };

        let archive_name = naming::archive_file_name(file, uploader);
        let path = folder.join(&archive_name);

        if !config.dry_run {
            let content = files::download_file(admin, &file.id).await?;
            write_archive(&path, &content).await?;
            files::delete_file(admin, &file.id).await?;
            tracing::debug!(file = %file.id, path = %path.display(), bytes = content.len(), "archived and deleted");
        }

        report.record_file(file, uploader, &archive_name);
        console.print_item(&path.display().to_string())?;
    }

    report.end_channel();
    Ok(())
}

async fn write_archive(path: &Path, content: &[u8]) -> Result<(), SweepError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|source| SweepError::Filesystem {
            path: path.to_path_buf(),
            source,
        })
}
