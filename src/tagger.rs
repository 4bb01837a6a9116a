//! Tag derivation and publication
//!
//! The core pipeline: count commits reachable from HEAD, derive a tag
//! name from the count, create the tag locally, push it to a remote.
//! Strictly sequential with no retries. A failed push leaves the local
//! tag in place; local and remote state diverge until the caller
//! intervenes.

use crate::error::{Result, VertagError};
use crate::git::Repository;
use crate::naming::{TagName, TagPattern};

/// Compute the tag name for the repository's current state
///
/// With the default pattern, a repository with N commits reachable from
/// HEAD yields `verN`. Deterministic: the same repository state always
/// produces the same name, so a re-run against an unchanged repository
/// collides with the tag it created.
pub fn compute_tag_name<R: Repository>(repo: &R, pattern: &TagPattern) -> Result<TagName> {
    let count = repo.commit_count()?;
    Ok(pattern.derive(count))
}

/// Create and push the derived tag, returning its name
///
/// Steps, in order:
/// 1. derive the tag name from the commit count
/// 2. fail with [VertagError::TagAlreadyExists] if the tag exists locally,
///    before any ref is created or pushed
/// 3. create a lightweight tag at HEAD
/// 4. push the tag ref to `remote`
///
/// There is no rollback: if the push fails after step 3, the local tag
/// remains and the push error is returned as-is.
pub fn run<R: Repository>(repo: &R, remote: &str, pattern: &TagPattern) -> Result<TagName> {
    let tag_name = compute_tag_name(repo, pattern)?;

    if repo.find_tag_oid(tag_name.as_str())?.is_some() {
        return Err(VertagError::TagAlreadyExists(tag_name.as_str().to_string()));
    }

    let head = repo.head_oid()?;
    repo.create_tag(tag_name.as_str(), head)?;
    repo.push_tag(remote, tag_name.as_str())?;

    Ok(tag_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn default_pattern() -> TagPattern {
        TagPattern::default()
    }

    #[test]
    fn test_compute_tag_name_matches_commit_count() {
        for count in [0, 1, 42, 1000] {
            let repo = MockRepository::with_commits(count);
            let name = compute_tag_name(&repo, &default_pattern()).unwrap();
            assert_eq!(name.as_str(), format!("ver{}", count));
        }
    }

    #[test]
    fn test_empty_repository_yields_ver0() {
        let repo = MockRepository::with_commits(0);
        let name = compute_tag_name(&repo, &default_pattern()).unwrap();
        assert_eq!(name.as_str(), "ver0");
    }

    #[test]
    fn test_run_creates_and_pushes_tag() {
        let repo = MockRepository::with_commits(42);

        let name = run(&repo, "origin", &default_pattern()).unwrap();

        assert_eq!(name.as_str(), "ver42");
        assert!(repo.has_tag("ver42"));
        assert_eq!(
            repo.pushed(),
            vec![("origin".to_string(), "ver42".to_string())]
        );
    }

    #[test]
    fn test_run_fails_on_existing_tag_before_push() {
        let repo = MockRepository::with_commits(42);
        repo.add_tag("ver42", repo.head_oid().unwrap());

        let err = run(&repo, "origin", &default_pattern()).unwrap_err();

        assert!(matches!(err, VertagError::TagAlreadyExists(name) if name == "ver42"));
        assert!(repo.pushed().is_empty());
    }

    #[test]
    fn test_run_push_failure_leaves_local_tag() {
        let repo = MockRepository::with_commits(10);
        repo.fail_next_push(VertagError::network("connection reset"));

        let err = run(&repo, "origin", &default_pattern()).unwrap_err();

        assert!(matches!(err, VertagError::Network(_)));
        // Local and remote have diverged: the tag exists but was never pushed.
        assert!(repo.has_tag("ver10"));
        assert!(repo.pushed().is_empty());
    }

    #[test]
    fn test_second_run_collides_with_first() {
        let repo = MockRepository::with_commits(5);

        let first = run(&repo, "origin", &default_pattern()).unwrap();
        assert_eq!(first.as_str(), "ver5");

        let err = run(&repo, "origin", &default_pattern()).unwrap_err();
        assert!(matches!(err, VertagError::TagAlreadyExists(name) if name == "ver5"));
        // Only the first push happened.
        assert_eq!(repo.pushed().len(), 1);
    }

    #[test]
    fn test_run_with_custom_pattern() {
        let repo = MockRepository::with_commits(3);
        let pattern = TagPattern::new("release-{count}").unwrap();

        let name = run(&repo, "upstream", &pattern).unwrap();

        assert_eq!(name.as_str(), "release-3");
        assert_eq!(
            repo.pushed(),
            vec![("upstream".to_string(), "release-3".to_string())]
        );
    }
}
