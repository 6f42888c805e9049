use super::*;
use git2::{BranchType, Commit, Oid, Repository, Sort};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Owns the repository handle for the duration of one report run.
pub struct CommitCollector {
    repo: Repository,
    path: PathBuf,
}

struct BranchTip {
    name: String,
    target: Oid,
}

impl CommitCollector {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path).map_err(|source| ReportError::RepositoryOpen {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Opened Git repository at {}", path.display());

        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    /// Walks every local branch and keeps the commits whose committer time
    /// falls inside `window`. History shared between branches is reported
    /// once per branch.
    pub fn collect(&self, window: &DateWindow) -> Result<Vec<CommitInfo>> {
        let tips = self.branch_tips()?;
        info!("Collecting commits from {} branches", tips.len());

        let pb = ProgressBar::new(tips.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} branches {msg}",
            )
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut commits = Vec::new();
        for tip in &tips {
            pb.set_message(tip.name.clone());
            let before = commits.len();
            self.branch_log(tip, window, &mut commits)?;
            debug!(
                "Branch {}: {} commits in window",
                tip.name,
                commits.len() - before
            );
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!("Collected {} commits", commits.len());
        Ok(commits)
    }

    fn branch_tips(&self) -> Result<Vec<BranchTip>> {
        let branches = self
            .repo
            .branches(Some(BranchType::Local))
            .map_err(ReportError::query("listing branches"))?;

        let mut tips = Vec::new();
        for branch in branches {
            let (branch, _) = branch.map_err(ReportError::query("listing branches"))?;
            let name = String::from_utf8_lossy(
                branch
                    .name_bytes()
                    .map_err(ReportError::query("reading branch name"))?,
            )
            .to_string();

            match branch.get().target() {
                Some(target) => tips.push(BranchTip { name, target }),
                None => warn!("Skipping branch {} without a direct target", name),
            }
        }

        debug!("Found {} branches", tips.len());
        Ok(tips)
    }

    fn branch_log(
        &self,
        tip: &BranchTip,
        window: &DateWindow,
        commits: &mut Vec<CommitInfo>,
    ) -> Result<()> {
        let action = || format!("reading the log of branch {}", tip.name);

        let mut revwalk = self.repo.revwalk().map_err(ReportError::query(action()))?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .map_err(ReportError::query(action()))?;
        revwalk.push(tip.target).map_err(ReportError::query(action()))?;

        for oid in revwalk {
            let oid = oid.map_err(ReportError::query(action()))?;
            let commit = self
                .repo
                .find_commit(oid)
                .map_err(ReportError::query(format!("looking up commit {}", oid)))?;

            let committed_date = to_datetime(commit.committer().when()).ok_or_else(|| {
                ReportError::RepositoryQuery {
                    action: action(),
                    source: git2::Error::from_str(&format!(
                        "commit {} has an out of range timestamp",
                        oid
                    )),
                }
            })?;

            if window.contains(&committed_date) {
                commits.push(Self::commit_info(&commit, committed_date, &tip.name));
            }
        }

        Ok(())
    }

    fn commit_info(
        commit: &Commit<'_>,
        committed_date: DateTime<FixedOffset>,
        branch: &str,
    ) -> CommitInfo {
        let author = commit.author();
        let committer = commit.committer();

        CommitInfo {
            id: commit.id().to_string(),
            message: String::from_utf8_lossy(commit.message_bytes()).to_string(),
            author: String::from_utf8_lossy(author.name_bytes()).to_string(),
            author_email: String::from_utf8_lossy(author.email_bytes()).to_string(),
            committer: String::from_utf8_lossy(committer.name_bytes()).to_string(),
            committer_email: String::from_utf8_lossy(committer.email_bytes()).to_string(),
            committed_date,
            branch: branch.to_string(),
        }
    }

    /// URL of `origin`, falling back to the first remote that has one.
    pub fn remote_url(&self) -> Option<String> {
        if let Ok(remote) = self.repo.find_remote("origin") {
            if let Some(url) = remote.url() {
                return Some(url.to_string());
            }
        }

        let remotes = self.repo.remotes().ok()?;
        remotes
            .iter()
            .flatten()
            .filter_map(|name| self.repo.find_remote(name).ok())
            .find_map(|remote| remote.url().map(str::to_string))
    }

    /// Name shown in reports: the remote URL, else the working directory name.
    pub fn repository_name(&self) -> String {
        if let Some(url) = self.remote_url() {
            return url;
        }

        let root = self.repo.workdir().unwrap_or_else(|| self.repo.path());
        root.canonicalize()
            .unwrap_or_else(|_| root.to_path_buf())
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
