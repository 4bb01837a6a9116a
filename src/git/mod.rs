//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! vertag needs, allowing for a real `git2`-backed implementation and a
//! mock implementation for testing.
//!
//! The primary abstraction is the [Repository] trait. Concrete
//! implementations:
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for tests
//!
//! Most code should depend on the trait rather than a concrete type.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Collaborator contract for the version-control backend
///
/// The four calls vertag makes against a repository: read HEAD, count
/// commits, create a tag, push a ref. Implementations map underlying
/// failures to the matching [crate::error::VertagError] variants.
pub trait Repository: Send + Sync {
    /// Get the OID of the commit at HEAD
    ///
    /// # Returns
    /// * `Ok(Oid)` - Object ID of the current HEAD commit
    /// * `Err(RepositoryAccess)` - If HEAD is unborn or cannot be resolved
    fn head_oid(&self) -> Result<Oid>;

    /// Count commits reachable from HEAD
    ///
    /// An empty repository (unborn HEAD) counts as zero commits rather
    /// than an error.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of commits reachable from the current HEAD
    /// * `Err(RepositoryAccess)` - If the commit log cannot be walked
    fn commit_count(&self) -> Result<usize>;

    /// Find a tag by name and get its OID
    ///
    /// Handles both lightweight and annotated tags.
    ///
    /// # Returns
    /// * `Ok(Some(Oid))` - Object ID the tag points at, if it exists
    /// * `Ok(None)` - If no tag of that name exists
    /// * `Err` - If the ref exists but cannot be read
    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>>;

    /// Create a lightweight tag at the given OID
    ///
    /// Never overwrites: an existing tag of the same name fails with
    /// [crate::error::VertagError::TagAlreadyExists].
    fn create_tag(&self, name: &str, oid: Oid) -> Result<()>;

    /// Push a tag ref to a named remote
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    /// * `tag_name` - Name of an existing local tag
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err(Network)` - Transport failure
    /// * `Err(Auth)` - Credential rejection
    /// * `Err(RemoteRejected)` - Remote refused the ref
    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()>;
}
