use crate::models::channel::Channel;
use crate::models::file::File;
use crate::naming::format_timestamp;
use chrono::{DateTime, Utc};
use std::fmt::Write;

const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

pub const REPORT_TITLE: &str = "Filesweep report";
pub const REPORT_FILETYPE: &str = "text";

/// Settings echoed at the top of the report.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub all_channels: bool,
    pub dry_run: bool,
    pub target_channel: String,
    pub cutoff: i64,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTally {
    pub name: String,
    pub id: String,
    pub count: usize,
}

/// Text log of one clean-up run, built up channel by channel.
#[derive(Debug)]
pub struct RunReport {
    settings: ReportSettings,
    log: String,
    tallies: Vec<ChannelTally>,
}

impl RunReport {
    pub fn new(settings: ReportSettings) -> Self {
        Self {
            settings,
            log: String::new(),
            tallies: Vec::new(),
        }
    }

    pub fn begin_channel(&mut self, channel: &Channel) {
        let _ = write!(
            self.log,
            "#{}({}) - {}\n\n",
            channel.name,
            channel.id,
            channel.purpose_text()
        );
        self.tallies.push(ChannelTally {
            name: channel.name.clone(),
            id: channel.id.clone(),
            count: 0,
        });
    }

    /// Records one archived file against the channel opened last.
    pub fn record_file(&mut self, file: &File, uploader: &str, archive_name: &str) {
        let comment = file.comment().unwrap_or("").replace('\n', "");

        let _ = write!(
            self.log,
            "- {} @{} {} - {} {}\n  - {}\n\n",
            format_timestamp(file.timestamp, DISPLAY_FORMAT),
            uploader,
            file.title,
            comment,
            file.name,
            archive_name
        );

        if let Some(tally) = self.tallies.last_mut() {
            tally.count += 1;
        }
    }

    pub fn end_channel(&mut self) {
        let count = self.tallies.last().map(|t| t.count).unwrap_or(0);
        let _ = write!(self.log, "Total : {} files\n\n", count);
    }

    pub fn tallies(&self) -> &[ChannelTally] {
        &self.tallies
    }

    pub fn total(&self) -> usize {
        self.tallies.iter().map(|t| t.count).sum()
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn render(&self, finished_at: DateTime<Utc>) -> String {
        let yes_no = |flag: bool| if flag { "Yes" } else { "No" };

        format!(
            "
Filesweep - Auto clean up Slack files

===== Settings report =====

All delete?    : {}
Dry run?       : {}
Target channel : {}
Delete before  : {}
Started at     : {}
Finished at    : {}

===== Running report =====

Total delete     : {} files

===== Running log =====

{}

===== End of report ======
",
            yes_no(self.settings.all_channels),
            yes_no(self.settings.dry_run),
            self.settings.target_channel,
            format_timestamp(self.settings.cutoff, DISPLAY_FORMAT),
            self.settings.started_at.format(DISPLAY_FORMAT),
            finished_at.format(DISPLAY_FORMAT),
            self.total(),
            self.log
        )
    }
}

/// Name of the uploaded report snippet.
pub fn report_file_name(at: DateTime<Utc>) -> String {
    format!("filesweep-report-{}.txt", at.format("%Y-%m-%d-%H-%M-%S"))
}
