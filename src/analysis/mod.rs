use serde::{Deserialize, Serialize};

use crate::git::stats::{self, DeveloperSummary, OffHours};
use crate::git::links::RepositoryType;
use crate::git::{CommitInfo, RepositoryLinker};

/// A commit highlighted in the report, with a web link when the remote
/// host is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitHighlight {
    #[serde(flatten)]
    pub commit: CommitInfo,
    pub short_id: String,
    pub summary: String,
    pub url: Option<String>,
}

impl CommitHighlight {
    fn new(commit: &CommitInfo, linker: &RepositoryLinker) -> Self {
        Self {
            short_id: commit.short_id().to_string(),
            summary: commit.summary().to_string(),
            url: linker.get_commit_url(&commit.id),
            commit: commit.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualReport {
    pub repo_name: String,
    pub repository_type: RepositoryType,
    pub year: i32,
    pub commit_count: usize,
    pub developer_count: usize,
    pub most_active_developer: String,
    pub most_active_developer_commit_count: usize,
    pub most_hardworking_developer: String,
    pub max_hardworking_commit_count: usize,
    pub first_commit: Option<CommitHighlight>,
    pub last_commit: Option<CommitHighlight>,
    pub developers: Vec<DeveloperSummary>,
}

impl AnnualReport {
    pub fn build(
        repo_name: String,
        remote_url: Option<&str>,
        year: i32,
        commits: &[CommitInfo],
        hours: &OffHours,
    ) -> Self {
        let linker = RepositoryLinker::new(remote_url);
        let groups = stats::group_by_author(commits);
        let most_active = stats::most_active(&groups);
        let hardworking = stats::most_hardworking(&groups, hours);

        Self {
            repo_name,
            repository_type: linker.repository_type(),
            year,
            commit_count: commits.len(),
            developer_count: groups.len(),
            most_active_developer: most_active.author,
            most_active_developer_commit_count: most_active.commits,
            most_hardworking_developer: hardworking.author,
            max_hardworking_commit_count: hardworking.commits,
            first_commit: stats::first_commit(commits).map(|c| CommitHighlight::new(c, &linker)),
            last_commit: stats::last_commit(commits).map(|c| CommitHighlight::new(c, &linker)),
            developers: stats::leaderboard(&groups, hours),
        }
    }

    /// Label/value rows shared by the console table.
    pub fn summary_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Repository", self.repo_name.clone()),
            ("Commit Count", self.commit_count.to_string()),
            ("Developer Count", self.developer_count.to_string()),
            ("Most Active Developer", self.most_active_developer.clone()),
            (
                "Most Active Developer Commit Count",
                self.most_active_developer_commit_count.to_string(),
            ),
            (
                "Most Hardworking Developer",
                self.most_hardworking_developer.clone(),
            ),
            (
                "Max Hardworking Commit Count",
                self.max_hardworking_commit_count.to_string(),
            ),
        ]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    pub(crate) fn commit(id: &str, author: &str, at: &str) -> CommitInfo {
        CommitInfo {
            id: id.to_string(),
            message: format!("{} was here\n\nlonger body", author),
            author: author.to_string(),
            author_email: format!("{}@example.com", author),
            committer: author.to_string(),
            committer_email: format!("{}@example.com", author),
            committed_date: DateTime::parse_from_rfc3339(at).unwrap(),
            branch: "main".to_string(),
        }
    }

    pub(crate) fn two_branch_commits() -> Vec<CommitInfo> {
        let mut commits = Vec::new();
        for day in 1..=3 {
            commits.push(commit(
                &format!("a{:039}", day),
                "alice",
                &format!("2023-03-{:02}T10:00:00+00:00", day),
            ));
        }
        for day in 1..=5 {
            commits.push(commit(
                &format!("b{:039}", day),
                "bob",
                &format!("2023-04-{:02}T22:00:00+00:00", day),
            ));
        }
        commits
    }

    #[test]
    fn builds_two_branch_report() {
        let commits = two_branch_commits();
        let report = AnnualReport::build(
            "widgets".to_string(),
            None,
            2023,
            &commits,
            &OffHours::default(),
        );

        assert_eq!(report.commit_count, 8);
        assert_eq!(report.developer_count, 2);
        assert_eq!(report.most_active_developer, "bob <bob@example.com>");
        assert_eq!(report.most_active_developer_commit_count, 5);
        assert_eq!(report.most_hardworking_developer, "bob <bob@example.com>");
        assert_eq!(report.max_hardworking_commit_count, 5);

        let first = report.first_commit.as_ref().unwrap();
        assert_eq!(first.commit.author, "alice");
        assert_eq!(first.short_id, "a0000000");
        assert_eq!(first.summary, "alice was here");
        assert!(first.url.is_none());
        assert_eq!(report.repository_type, RepositoryType::Local);

        let last = report.last_commit.as_ref().unwrap();
        assert_eq!(last.commit.author, "bob");
        assert_eq!(report.developers.len(), 2);
    }

    #[test]
    fn links_highlights_for_known_hosts() {
        let commits = two_branch_commits();
        let report = AnnualReport::build(
            "git@github.com:acme/widgets.git".to_string(),
            Some("git@github.com:acme/widgets.git"),
            2023,
            &commits,
            &OffHours::default(),
        );

        let first = report.first_commit.unwrap();
        assert_eq!(
            first.url,
            Some(format!("https://github.com/acme/widgets/commit/{}", first.commit.id))
        );
    }

    #[test]
    fn empty_year_report() {
        let report =
            AnnualReport::build("empty".to_string(), None, 2023, &[], &OffHours::default());
        assert_eq!(report.commit_count, 0);
        assert_eq!(report.developer_count, 0);
        assert_eq!(report.most_active_developer, "");
        assert_eq!(report.most_active_developer_commit_count, 0);
        assert!(report.first_commit.is_none());
        assert!(report.last_commit.is_none());
    }

    #[test]
    fn summary_rows_follow_table_layout() {
        let commits = two_branch_commits();
        let report =
            AnnualReport::build("widgets".to_string(), None, 2023, &commits, &OffHours::default());
        let labels: Vec<_> = report.summary_rows().into_iter().map(|(l, _)| l).collect();
        assert_eq!(
            labels,
            vec![
                "Repository",
                "Commit Count",
                "Developer Count",
                "Most Active Developer",
                "Most Active Developer Commit Count",
                "Most Hardworking Developer",
                "Max Hardworking Commit Count",
            ]
        );
    }
}
