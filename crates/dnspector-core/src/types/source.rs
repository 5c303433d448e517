use serde::{Deserialize, Serialize};

/// Placeholder replaced by the target domain in a URL template
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// A passive subdomain source: a display name and a URL template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Human readable name (e.g. "crt.sh")
    pub name: String,

    /// Endpoint with a `{domain}` placeholder
    pub url_template: String,
}

impl SourceDescriptor {
    /// Create a descriptor
    #[must_use]
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    /// Substitute the target domain into the template
    #[must_use]
    pub fn url_for(&self, domain: &str) -> String {
        self.url_template.replace(DOMAIN_PLACEHOLDER, domain)
    }
}

/// Contribution of one source to an enumeration run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    /// Source name
    pub source: String,

    /// Distinct names this source produced
    pub found: usize,

    /// Why the source contributed nothing, if it failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
