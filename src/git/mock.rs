use crate::error::{Result, VertagError};
use crate::git::Repository;
use git2::Oid;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock repository for testing without actual git operations
///
/// Tracks local tags and pushed refs in memory; a queued error makes the
/// next push fail, for exercising the divergence path.
pub struct MockRepository {
    commit_count: usize,
    head: Oid,
    tags: Mutex<HashMap<String, Oid>>,
    pushed: Mutex<Vec<(String, String)>>,
    push_error: Mutex<Option<VertagError>>,
}

impl MockRepository {
    /// Create a mock repository with the given number of commits
    pub fn with_commits(count: usize) -> Self {
        MockRepository {
            commit_count: count,
            head: Oid::from_bytes(&[7; 20]).unwrap(),
            tags: Mutex::new(HashMap::new()),
            pushed: Mutex::new(Vec::new()),
            push_error: Mutex::new(None),
        }
    }

    /// Add a pre-existing tag pointing at an OID
    pub fn add_tag(&self, name: impl Into<String>, oid: Oid) {
        self.tags.lock().unwrap().insert(name.into(), oid);
    }

    /// Queue an error for the next push attempt
    pub fn fail_next_push(&self, error: VertagError) {
        *self.push_error.lock().unwrap() = Some(error);
    }

    /// Whether a tag of this name exists locally
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.lock().unwrap().contains_key(name)
    }

    /// Refs pushed so far, as (remote, tag) pairs
    pub fn pushed(&self) -> Vec<(String, String)> {
        self.pushed.lock().unwrap().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::with_commits(0)
    }
}

impl Repository for MockRepository {
    fn head_oid(&self) -> Result<Oid> {
        Ok(self.head)
    }

    fn commit_count(&self) -> Result<usize> {
        Ok(self.commit_count)
    }

    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        Ok(self.tags.lock().unwrap().get(tag_name).copied())
    }

    fn create_tag(&self, name: &str, oid: Oid) -> Result<()> {
        let mut tags = self.tags.lock().unwrap();
        if tags.contains_key(name) {
            return Err(VertagError::TagAlreadyExists(name.to_string()));
        }
        tags.insert(name.to_string(), oid);
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        if let Some(err) = self.push_error.lock().unwrap().take() {
            return Err(err);
        }
        self.pushed
            .lock()
            .unwrap()
            .push((remote.to_string(), tag_name.to_string()));
        Ok(())
    }
}
