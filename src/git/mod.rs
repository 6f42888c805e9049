use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

pub mod collector;
pub mod links;
pub mod stats;

pub use collector::CommitCollector;
pub use links::RepositoryLinker;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub id: String,
    pub message: String,
    pub author: String,
    pub author_email: String,
    pub committer: String,
    pub committer_email: String,
    /// Committer time in the offset recorded on the commit.
    pub committed_date: DateTime<FixedOffset>,
    /// Branch whose traversal produced this entry.
    pub branch: String,
}

impl CommitInfo {
    /// Author rendered as `Name <email>`, the grouping key for statistics.
    pub fn author_identity(&self) -> String {
        format!("{} <{}>", self.author, self.author_email)
    }

    pub fn short_id(&self) -> &str {
        if self.id.len() >= 8 {
            &self.id[..8]
        } else {
            &self.id
        }
    }

    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Inclusive time range covering one calendar year in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub since: DateTime<Local>,
    pub until: DateTime<Local>,
}

impl DateWindow {
    pub fn for_year(year: i32) -> Result<Self> {
        let invalid = || ReportError::Usage(format!("Invalid report year: {}", year));

        let first_day = NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|d| d.and_hms_nano_opt(0, 0, 0, 0))
            .ok_or_else(invalid)?;
        let last_day = NaiveDate::from_ymd_opt(year, 12, 31)
            .and_then(|d| d.and_hms_nano_opt(23, 59, 59, 999_999_999))
            .ok_or_else(invalid)?;

        // Across a DST fold keep the widest interpretation of both bounds.
        let since = Local
            .from_local_datetime(&first_day)
            .earliest()
            .ok_or_else(invalid)?;
        let until = Local
            .from_local_datetime(&last_day)
            .latest()
            .ok_or_else(invalid)?;

        Ok(Self { since, until })
    }

    pub fn contains<Tz: TimeZone>(&self, when: &DateTime<Tz>) -> bool {
        *when >= self.since && *when <= self.until
    }
}

/// Converts a libgit2 timestamp, keeping the offset the commit was made in.
pub fn to_datetime(time: git2::Time) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)
        .or_else(|| FixedOffset::east_opt(0))?;
    DateTime::from_timestamp(time.seconds(), 0).map(|utc| utc.with_timezone(&offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<FixedOffset> {
        Local
            .with_ymd_and_hms(y, m, d, h, min, s)
            .earliest()
            .unwrap()
            .fixed_offset()
    }

    #[test]
    fn window_includes_last_second_of_year() {
        let window = DateWindow::for_year(2023).unwrap();
        assert!(window.contains(&local(2023, 12, 31, 23, 59, 59)));
        assert!(window.contains(&local(2023, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn window_excludes_neighbouring_years() {
        let window = DateWindow::for_year(2023).unwrap();
        assert!(!window.contains(&local(2024, 1, 1, 0, 0, 0)));
        assert!(!window.contains(&(local(2023, 1, 1, 0, 0, 0) - Duration::seconds(1))));
    }

    #[test]
    fn window_bounds_are_nanosecond_precise() {
        let window = DateWindow::for_year(2020).unwrap();
        assert_eq!(window.since.format("%m-%d %H:%M:%S%.9f").to_string(), "01-01 00:00:00.000000000");
        assert_eq!(window.until.format("%m-%d %H:%M:%S%.9f").to_string(), "12-31 23:59:59.999999999");
    }

    #[test]
    fn window_compares_instants_not_wall_clock() {
        let window = DateWindow::for_year(2023).unwrap();
        let inside = local(2023, 6, 15, 12, 0, 0);
        let far_east = inside.with_timezone(&FixedOffset::east_opt(14 * 3600).unwrap());
        assert!(window.contains(&far_east));
    }

    #[test]
    fn unrepresentable_year_is_a_usage_error() {
        assert!(matches!(
            DateWindow::for_year(i32::MAX),
            Err(ReportError::Usage(_))
        ));
    }

    #[test]
    fn git_time_keeps_recorded_offset() {
        // 2023-03-01 21:30:00 +02:00
        let time = git2::Time::new(1_677_699_000, 120);
        let dt = to_datetime(time).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 7200);
        assert_eq!(dt.format("%H:%M").to_string(), "21:30");
    }

    #[test]
    fn author_identity_and_short_id() {
        let commit = CommitInfo {
            id: "0123456789abcdef".to_string(),
            message: "first line\n\nbody".to_string(),
            author: "Alice".to_string(),
            author_email: "alice@example.com".to_string(),
            committer: "Alice".to_string(),
            committer_email: "alice@example.com".to_string(),
            committed_date: local(2023, 5, 1, 10, 0, 0),
            branch: "main".to_string(),
        };
        assert_eq!(commit.author_identity(), "Alice <alice@example.com>");
        assert_eq!(commit.short_id(), "01234567");
        assert_eq!(commit.summary(), "first line");
    }
}
