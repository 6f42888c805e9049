use super::*;
use chrono::Timelike;
use std::collections::BTreeMap;

// Aggregations over an already collected commit list

/// Commits grouped by `Name <email>`, keeping collection order per author.
pub type AuthorCommits<'a> = BTreeMap<String, Vec<&'a CommitInfo>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub author: String,
    pub commits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperSummary {
    pub author: String,
    pub commits: usize,
    pub off_hours_commits: usize,
}

/// Late-night and early-morning hours, evaluated in the commit's own offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffHours {
    pub late_start: u32,
    pub early_end: u32,
}

impl Default for OffHours {
    fn default() -> Self {
        Self {
            late_start: 20,
            early_end: 6,
        }
    }
}

impl OffHours {
    pub fn contains(&self, commit: &CommitInfo) -> bool {
        let hour = commit.committed_date.hour();
        hour >= self.late_start || hour < self.early_end
    }
}

pub fn group_by_author(commits: &[CommitInfo]) -> AuthorCommits<'_> {
    let mut groups: AuthorCommits<'_> = BTreeMap::new();
    for commit in commits {
        groups
            .entry(commit.author_identity())
            .or_default()
            .push(commit);
    }
    groups
}

/// Largest group; ties go to the lexicographically smallest author.
pub fn most_active(groups: &AuthorCommits<'_>) -> Leader {
    leader_by(groups, |commits| commits.len())
}

pub fn most_hardworking(groups: &AuthorCommits<'_>, hours: &OffHours) -> Leader {
    leader_by(groups, |commits| {
        commits.iter().filter(|c| hours.contains(c)).count()
    })
}

fn leader_by<F>(groups: &AuthorCommits<'_>, score: F) -> Leader
where
    F: Fn(&[&CommitInfo]) -> usize,
{
    let mut leader = Leader::default();
    for (author, commits) in groups {
        let count = score(commits.as_slice());
        if count > leader.commits {
            leader = Leader {
                author: author.clone(),
                commits: count,
            };
        }
    }
    leader
}

pub fn first_commit(commits: &[CommitInfo]) -> Option<&CommitInfo> {
    commits.iter().fold(None, |first, commit| match first {
        Some(f) if commit.committed_date >= f.committed_date => Some(f),
        _ => Some(commit),
    })
}

pub fn last_commit(commits: &[CommitInfo]) -> Option<&CommitInfo> {
    commits.iter().fold(None, |last, commit| match last {
        Some(l) if commit.committed_date <= l.committed_date => Some(l),
        _ => Some(commit),
    })
}

/// Every author ranked by commit count, then by name.
pub fn leaderboard(groups: &AuthorCommits<'_>, hours: &OffHours) -> Vec<DeveloperSummary> {
    let mut developers: Vec<_> = groups
        .iter()
        .map(|(author, commits)| DeveloperSummary {
            author: author.clone(),
            commits: commits.len(),
            off_hours_commits: commits.iter().filter(|c| hours.contains(c)).count(),
        })
        .collect();
    developers.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.author.cmp(&b.author)));
    developers
}
