use crate::error::{Result, VertagError};
use git2::{ErrorClass, ErrorCode, Oid, Repository as Git2Repo};
use std::cell::RefCell;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open a git repository at an explicit path
    ///
    /// Discovers the repository at `path` or in its parent directories.
    /// The path is always explicit; callers that want current-directory
    /// behavior pass `"."`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref()).map_err(|e| {
            VertagError::repository(format!(
                "Not a git repository at '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Build a credentials callback trying SSH keys, the SSH agent,
    /// then default credentials.
    fn credentials_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });
        callbacks
    }
}

/// Classify a git2 push failure into the vertag error taxonomy
fn classify_push_error(e: git2::Error, tag_name: &str) -> VertagError {
    if e.code() == ErrorCode::Auth || e.class() == ErrorClass::Ssh {
        VertagError::auth(e.to_string())
    } else if e.class() == ErrorClass::Net || e.class() == ErrorClass::Http {
        VertagError::network(e.to_string())
    } else if e.class() == ErrorClass::Reference {
        VertagError::remote_rejected(e.to_string())
    } else {
        VertagError::network(format!("Failed to push tag '{}': {}", tag_name, e))
    }
}

impl super::Repository for Git2Repository {
    fn head_oid(&self) -> Result<Oid> {
        let head = self
            .repo
            .head()
            .map_err(|e| VertagError::repository(format!("Cannot resolve HEAD: {}", e)))?;

        head.target()
            .ok_or_else(|| VertagError::repository("HEAD is not a direct reference"))
    }

    fn commit_count(&self) -> Result<usize> {
        // An unborn HEAD means an empty repository: zero commits, not an error.
        let head_oid = match self.repo.head() {
            Ok(head) => match head.target() {
                Some(oid) => oid,
                None => return Ok(0),
            },
            Err(e)
                if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound =>
            {
                return Ok(0)
            }
            Err(e) => {
                return Err(VertagError::repository(format!(
                    "Cannot resolve HEAD: {}",
                    e
                )))
            }
        };

        let mut revwalk = self
            .repo
            .revwalk()
            .map_err(|e| VertagError::repository(format!("Cannot walk commit log: {}", e)))?;
        revwalk
            .push(head_oid)
            .map_err(|e| VertagError::repository(format!("Cannot walk commit log: {}", e)))?;

        let mut count = 0;
        for oid in revwalk {
            oid.map_err(|e| VertagError::repository(format!("Cannot walk commit log: {}", e)))?;
            count += 1;
        }

        Ok(count)
    }

    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        let reference_name = format!("refs/tags/{}", tag_name);

        match self.repo.find_reference(&reference_name) {
            Ok(reference) => {
                let oid = reference
                    .peel(git2::ObjectType::Any)
                    .map_err(|e| {
                        VertagError::repository(format!("Cannot peel tag '{}': {}", tag_name, e))
                    })?
                    .id();

                Ok(Some(oid))
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(VertagError::repository(format!(
                "Cannot read tag '{}': {}",
                tag_name, e
            ))),
        }
    }

    fn create_tag(&self, name: &str, oid: Oid) -> Result<()> {
        let object = self
            .repo
            .find_object(oid, None)
            .map_err(|e| VertagError::repository(format!("Cannot find object: {}", e)))?;

        match self.repo.tag_lightweight(name, &object, false) {
            Ok(_) => Ok(()),
            Err(e) if e.code() == ErrorCode::Exists => {
                Err(VertagError::TagAlreadyExists(name.to_string()))
            }
            Err(e) => Err(VertagError::repository(format!(
                "Cannot create tag '{}': {}",
                name, e
            ))),
        }
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote).map_err(|_| {
            VertagError::repository(format!("No remote named '{}' found", remote))
        })?;

        let refused: RefCell<Option<String>> = RefCell::new(None);

        let mut callbacks = Self::credentials_callbacks();
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                *refused.borrow_mut() = Some(format!("{}: {}", refname, status));
                Err(git2::Error::from_str(status))
            } else {
                Ok(())
            }
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", tag_name, tag_name);
        match remote.push(&[refspec.as_str()], Some(&mut push_options)) {
            Ok(_) => {
                // The push can "succeed" at the transport level while the
                // remote refuses the individual ref update.
                if let Some(reason) = refused.borrow_mut().take() {
                    return Err(VertagError::remote_rejected(reason));
                }
                Ok(())
            }
            Err(e) => {
                if let Some(reason) = refused.borrow_mut().take() {
                    return Err(VertagError::remote_rejected(reason));
                }
                Err(classify_push_error(e, tag_name))
            }
        }
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send + Sync.
// git2 library is thread-safe for read operations via libgit2's thread-safe design.
unsafe impl Sync for Git2Repository {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_path_is_repository_error() {
        let result = Git2Repository::open("/nonexistent/definitely-not-a-repo");
        assert!(matches!(result, Err(VertagError::RepositoryAccess(_))));
    }

    #[test]
    fn test_classify_net_error() {
        let e = git2::Error::new(ErrorCode::GenericError, ErrorClass::Net, "timed out");
        assert!(matches!(
            classify_push_error(e, "ver1"),
            VertagError::Network(_)
        ));
    }

    #[test]
    fn test_classify_auth_error() {
        let e = git2::Error::new(ErrorCode::Auth, ErrorClass::Http, "401");
        assert!(matches!(
            classify_push_error(e, "ver1"),
            VertagError::Auth(_)
        ));
    }

    #[test]
    fn test_classify_reference_error() {
        let e = git2::Error::new(
            ErrorCode::GenericError,
            ErrorClass::Reference,
            "non-fast-forward",
        );
        assert!(matches!(
            classify_push_error(e, "ver1"),
            VertagError::RemoteRejected(_)
        ));
    }
}
