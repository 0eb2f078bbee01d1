use crate::entity::prelude::{Label, RepoRef};
use crate::pagination::fetch_all_pages;
use crate::platform::{IssueTracker, Result};

/// Labels known to exist in one repository.
#[derive(Debug, Default)]
pub struct LabelCache {
    labels: Option<Vec<Label>>,
}

impl LabelCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_populated(&self) -> bool {
        self.labels.is_some()
    }

    /// Fetch every label of `repo` unless that already happened.
    pub async fn ensure_populated<T>(&mut self, tracker: &T, repo: &RepoRef) -> Result<()>
    where
        T: IssueTracker + ?Sized,
    {
        if self.labels.is_some() {
            return Ok(());
        }

        let labels =
            fetch_all_pages(move |page, per_page| tracker.list_labels(repo, page, per_page))
                .await?;
        tracing::debug!(repository = %repo, count = labels.len(), "Cached labels");
        self.labels = Some(labels);
        Ok(())
    }

    /// Look up a cached label by exact name.
    pub fn find(&self, name: &str) -> Option<&Label> {
        self.labels.as_deref()?.iter().find(|l| l.name == name)
    }

    /// Return the label named like `label`, creating it in `repo` if missing.
    pub async fn create_if_absent<T>(
        &mut self,
        tracker: &T,
        repo: &RepoRef,
        label: &Label,
    ) -> Result<Label>
    where
        T: IssueTracker + ?Sized,
    {
        self.ensure_populated(tracker, repo).await?;

        if let Some(existing) = self.find(&label.name) {
            tracing::debug!(repository = %repo, label = %label.name, "Label already exists");
            return Ok(existing.clone());
        }

        let created = tracker.create_label(repo, label).await?;
        tracing::debug!(repository = %repo, label = %created.name, "Created label");
        self.labels.get_or_insert_with(Vec::new).push(created.clone());
        Ok(created)
    }
}
