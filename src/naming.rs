use crate::error::{Result, VertagError};

/// A release tag name derived from a commit count
///
/// With the default pattern, a repository with N commits reachable from
/// HEAD yields the name `verN`. The name exists only for the duration of
/// one invocation; it is consumed by tag creation and push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagName {
    name: String,
}

impl TagName {
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Tag naming pattern with a `{count}` placeholder (e.g., "ver{count}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    pattern: String,
}

pub const DEFAULT_PATTERN: &str = "ver{count}";

impl TagPattern {
    /// Create a pattern, validating that it carries the placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains("{count}") {
            return Err(VertagError::config(
                "Tag pattern must contain the {count} placeholder",
            ));
        }
        Ok(TagPattern { pattern })
    }

    /// Derive the tag name for a given commit count
    /// Example: pattern="ver{count}", count=42 -> "ver42"
    pub fn derive(&self, count: usize) -> TagName {
        TagName {
            name: self.pattern.replace("{count}", &count.to_string()),
        }
    }

    /// Check whether an existing tag name was produced by this pattern
    pub fn matches(&self, tag: &str) -> bool {
        let escaped = regex::escape(&self.pattern);
        let regex_pattern = escaped.replace(r"\{count\}", r"(\d+)");

        match regex::Regex::new(&format!("^{}$", regex_pattern)) {
            Ok(re) => re.is_match(tag),
            Err(_) => false,
        }
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}
