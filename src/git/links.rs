use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepositoryType {
    GitHub,
    GitLab,
    Bitbucket,
    Other,
    Local,
}

/// Turns a remote URL into browsable links for the HTML report.
pub struct RepositoryLinker {
    remote_url: Option<String>,
    repository_type: RepositoryType,
}

impl RepositoryLinker {
    pub fn new(remote_url: Option<&str>) -> Self {
        let repository_type = match remote_url.map(str::to_lowercase) {
            Some(url) if url.contains("gitlab") => RepositoryType::GitLab,
            Some(url) if url.contains("github") => RepositoryType::GitHub,
            Some(url) if url.contains("bitbucket") => RepositoryType::Bitbucket,
            Some(_) => RepositoryType::Other,
            None => RepositoryType::Local,
        };

        Self {
            remote_url: remote_url.map(str::to_string),
            repository_type,
        }
    }

    pub fn repository_type(&self) -> RepositoryType {
        self.repository_type
    }

    pub fn get_commit_url(&self, commit_id: &str) -> Option<String> {
        let base_url = self.get_base_url()?;

        match self.repository_type {
            RepositoryType::GitHub => Some(format!("{}/commit/{}", base_url, commit_id)),
            RepositoryType::GitLab => Some(format!("{}/-/commit/{}", base_url, commit_id)),
            RepositoryType::Bitbucket => Some(format!("{}/commits/{}", base_url, commit_id)),
            _ => None,
        }
    }

    /// HTTPS form of the remote without the `.git` suffix.
    pub fn get_base_url(&self) -> Option<String> {
        let remote_url = self.remote_url.as_deref()?;

        let url = if remote_url.starts_with("git@") {
            convert_ssh_to_https(remote_url)?
        } else if remote_url.starts_with("http://") || remote_url.starts_with("https://") {
            remote_url.to_string()
        } else {
            return None;
        };

        Some(url.trim_end_matches('/').trim_end_matches(".git").to_string())
    }
}

/// `git@host:owner/repo.git` becomes `https://host/owner/repo.git`.
fn convert_ssh_to_https(ssh_url: &str) -> Option<String> {
    let re = Regex::new(r"^git@([^:]+):(.+)$").ok()?;
    let captures = re.captures(ssh_url)?;
    let hostname = captures.get(1)?.as_str();
    let path = captures.get(2)?.as_str();
    Some(format!("https://{}/{}", hostname, path))
}
