//! In-memory tracker for unit tests.
//!
//! No sockets: repositories, labels and issues live in a shared map, and every
//! call is recorded so tests can assert on request volume and ordering.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::entity::prelude::{
    Issue, Label, NewIssue, NodeId, RepoRef, TransferredIssue, User, Visibility,
};

use super::errors::{Result, TrackerError};
use super::types::{IssueTracker, RateLimitInfo};

#[derive(Default)]
struct RepoState {
    visibility: Option<Visibility>,
    labels: Vec<Label>,
    issues: Vec<Issue>,
    next_number: u64,
}

#[derive(Default)]
struct MemoryTrackerInner {
    repos: HashMap<RepoRef, RepoState>,
    calls: Vec<String>,
}

/// Shared, cloneable in-memory tracker.
#[derive(Clone, Default)]
pub struct MemoryTracker {
    inner: Arc<Mutex<MemoryTrackerInner>>,
}

fn api_url(repo: &RepoRef) -> String {
    format!("https://api.example.test/repos/{}", repo.full_name())
}

fn repo_node(repo: &RepoRef) -> NodeId {
    NodeId(format!("repo:{}", repo.full_name()))
}

fn issue_node(repo: &RepoRef, number: u64) -> NodeId {
    NodeId(format!("issue:{}#{}", repo.full_name(), number))
}

fn page_of<T: Clone>(items: &[T], page: u32, per_page: u8) -> Vec<T> {
    let per_page = usize::from(per_page.max(1));
    let start = (page.saturating_sub(1) as usize) * per_page;
    items.iter().skip(start).take(per_page).cloned().collect()
}

impl RepoState {
    fn resolve_labels(&mut self, names: &[String]) -> Vec<Label> {
        names
            .iter()
            .map(|name| match self.labels.iter().find(|l| &l.name == name) {
                Some(existing) => existing.clone(),
                None => {
                    let label = Label::named(name.clone());
                    self.labels.push(label.clone());
                    label
                }
            })
            .collect()
    }

    fn push_issue(&mut self, repo: &RepoRef, mut issue: Issue) -> Issue {
        self.next_number += 1;
        issue.number = self.next_number;
        issue.repository_url = api_url(repo);
        self.issues.push(issue.clone());
        issue
    }
}

impl MemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryTrackerInner> {
        self.inner
            .lock()
            .expect("memory tracker lock should not be poisoned")
    }

    /// Register a repository with the given visibility.
    pub fn with_repo(self, repo: &RepoRef, visibility: Visibility) -> Self {
        self.lock().repos.entry(repo.clone()).or_default().visibility = Some(visibility);
        self
    }

    /// Seed a label without recording a call.
    pub fn seed_label(&self, repo: &RepoRef, label: Label) {
        self.lock().repos.entry(repo.clone()).or_default().labels.push(label);
    }

    /// Seed an issue and return its number.
    pub fn seed_issue(&self, repo: &RepoRef, title: &str, labels: Vec<Label>) -> u64 {
        let mut inner = self.lock();
        let state = inner.repos.entry(repo.clone()).or_default();
        let issue = Issue {
            number: 0,
            title: title.to_string(),
            body: Some(format!("Body of {title}")),
            labels,
            assignee: None,
            assignees: vec![],
            repository_url: String::new(),
        };
        state.push_issue(repo, issue).number
    }

    /// Seed an issue with full control over its fields; number and URL are assigned.
    pub fn seed_full_issue(&self, repo: &RepoRef, issue: Issue) -> u64 {
        let mut inner = self.lock();
        inner
            .repos
            .entry(repo.clone())
            .or_default()
            .push_issue(repo, issue)
            .number
    }

    pub fn issues(&self, repo: &RepoRef) -> Vec<Issue> {
        self.lock()
            .repos
            .get(repo)
            .map(|s| s.issues.clone())
            .unwrap_or_default()
    }

    pub fn labels(&self, repo: &RepoRef) -> Vec<Label> {
        self.lock()
            .repos
            .get(repo)
            .map(|s| s.labels.clone())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn count_calls(&self, method: &str) -> usize {
        self.lock().calls.iter().filter(|c| *c == method).count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn record(&self, method: &str) -> MutexGuard<'_, MemoryTrackerInner> {
        let mut inner = self.lock();
        inner.calls.push(method.to_string());
        inner
    }
}

fn missing(repo: &RepoRef) -> TrackerError {
    TrackerError::not_found(format!("repository {repo}"))
}

#[async_trait]
impl IssueTracker for MemoryTracker {
    async fn list_labels(&self, repo: &RepoRef, page: u32, per_page: u8) -> Result<Vec<Label>> {
        let inner = self.record("list_labels");
        let state = inner.repos.get(repo).ok_or_else(|| missing(repo))?;
        Ok(page_of(&state.labels, page, per_page))
    }

    async fn create_label(&self, repo: &RepoRef, label: &Label) -> Result<Label> {
        let mut inner = self.record("create_label");
        let state = inner.repos.get_mut(repo).ok_or_else(|| missing(repo))?;
        if state.labels.iter().any(|l| l.name == label.name) {
            return Err(TrackerError::api(format!(
                "Validation Failed: label {} already_exists",
                label.name
            )));
        }
        state.labels.push(label.clone());
        Ok(label.clone())
    }

    async fn list_issues(
        &self,
        repo: &RepoRef,
        label: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<Issue>> {
        let inner = self.record("list_issues");
        let state = inner.repos.get(repo).ok_or_else(|| missing(repo))?;
        let matching: Vec<Issue> = state
            .issues
            .iter()
            .filter(|i| i.labels.iter().any(|l| l.name == label))
            .cloned()
            .collect();
        Ok(page_of(&matching, page, per_page))
    }

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<Option<Issue>> {
        let inner = self.record("get_issue");
        Ok(inner
            .repos
            .get(repo)
            .and_then(|s| s.issues.iter().find(|i| i.number == number).cloned()))
    }

    async fn create_issue(&self, repo: &RepoRef, new: &NewIssue) -> Result<Issue> {
        let mut inner = self.record("create_issue");
        let state = inner.repos.get_mut(repo).ok_or_else(|| missing(repo))?;
        let labels = state.resolve_labels(&new.labels);
        let to_user = |login: &String| User {
            login: login.clone(),
        };
        let issue = Issue {
            number: 0,
            title: new.title.clone(),
            body: Some(new.body.clone()),
            labels,
            assignee: new.assignee.as_ref().map(to_user),
            assignees: new.assignees.iter().map(to_user).collect(),
            repository_url: String::new(),
        };
        Ok(state.push_issue(repo, issue))
    }

    async fn add_labels(
        &self,
        repo: &RepoRef,
        number: u64,
        names: &[String],
    ) -> Result<Vec<Label>> {
        let mut inner = self.record("add_labels");
        let state = inner.repos.get_mut(repo).ok_or_else(|| missing(repo))?;
        let resolved = state.resolve_labels(names);
        let issue = state
            .issues
            .iter_mut()
            .find(|i| i.number == number)
            .ok_or_else(|| TrackerError::not_found(format!("issue {repo}#{number}")))?;
        for label in resolved {
            if !issue.labels.iter().any(|l| l.name == label.name) {
                issue.labels.push(label);
            }
        }
        Ok(issue.labels.clone())
    }

    async fn get_visibility(&self, repo: &RepoRef) -> Result<Visibility> {
        let inner = self.record("get_visibility");
        let state = inner.repos.get(repo).ok_or_else(|| missing(repo))?;
        Ok(state.visibility.unwrap_or(Visibility::Private))
    }

    async fn get_repository_id(&self, repo: &RepoRef) -> Result<NodeId> {
        let inner = self.record("get_repository_id");
        inner.repos.get(repo).ok_or_else(|| missing(repo))?;
        Ok(repo_node(repo))
    }

    async fn get_issue_id(&self, repo: &RepoRef, number: u64) -> Result<NodeId> {
        let inner = self.record("get_issue_id");
        let state = inner.repos.get(repo).ok_or_else(|| missing(repo))?;
        if state.issues.iter().any(|i| i.number == number) {
            Ok(issue_node(repo, number))
        } else {
            Err(TrackerError::not_found(format!("issue {repo}#{number}")))
        }
    }

    async fn transfer_issue(
        &self,
        issue_id: &NodeId,
        repository_id: &NodeId,
    ) -> Result<TransferredIssue> {
        let mut inner = self.record("transfer_issue");

        let (source, number) = inner
            .repos
            .iter()
            .find_map(|(repo, state)| {
                state
                    .issues
                    .iter()
                    .find(|i| &issue_node(repo, i.number) == issue_id)
                    .map(|i| (repo.clone(), i.number))
            })
            .ok_or_else(|| TrackerError::not_found(format!("issue {issue_id}")))?;
        let destination = inner
            .repos
            .keys()
            .find(|repo| &repo_node(repo) == repository_id)
            .cloned()
            .ok_or_else(|| TrackerError::not_found(format!("repository {repository_id}")))?;

        let source_state = inner.repos.get_mut(&source).ok_or_else(|| missing(&source))?;
        let idx = source_state
            .issues
            .iter()
            .position(|i| i.number == number)
            .ok_or_else(|| TrackerError::not_found(format!("issue {source}#{number}")))?;
        let mut moved = source_state.issues.remove(idx);
        moved.labels.clear();

        let destination_state = inner
            .repos
            .get_mut(&destination)
            .ok_or_else(|| missing(&destination))?;
        let placed = destination_state.push_issue(&destination, moved);

        Ok(TransferredIssue {
            id: issue_node(&destination, placed.number),
            number: placed.number,
            url: format!("https://example.test/{}/issues/{}", destination, placed.number),
            state: "OPEN".to_string(),
            title: placed.title,
            labels: vec![],
            locked: false,
        })
    }

    async fn get_rate_limit(&self) -> Result<RateLimitInfo> {
        let _inner = self.record("get_rate_limit");
        Ok(RateLimitInfo {
            limit: 5000,
            remaining: 4999,
            reset_at: Utc::now(),
        })
    }
}
