use serde::{Deserialize, Serialize};

/// Registration data parsed from a WHOIS response.
///
/// Every field is optional: registries publish very different subsets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisInfo {
    /// Domain name as reported by the registry
    #[serde(default)]
    pub domain_name: Option<String>,

    /// Registrar name
    #[serde(default)]
    pub registrar: Option<String>,

    /// Last update date
    #[serde(default)]
    pub updated_date: Option<String>,

    /// Creation date
    #[serde(default)]
    pub creation_date: Option<String>,

    /// Expiration date
    #[serde(default)]
    pub expiration_date: Option<String>,

    /// Name servers
    #[serde(default)]
    pub name_servers: Vec<String>,

    /// EPP status codes
    #[serde(default)]
    pub status: Vec<String>,

    /// Contact emails found anywhere in the response
    #[serde(default)]
    pub emails: Vec<String>,

    /// DNSSEC delegation state
    #[serde(default)]
    pub dnssec: Option<String>,

    /// Registrant contact
    #[serde(default)]
    pub registrant: RegistrantInfo,

    /// Unparsed response text
    #[serde(default, skip_serializing)]
    pub raw: String,
}

/// Registrant contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrantInfo {
    /// Registrant name
    #[serde(default)]
    pub name: Option<String>,

    /// Organization name
    #[serde(default)]
    pub organization: Option<String>,

    /// Street address
    #[serde(default)]
    pub address: Option<String>,

    /// City
    #[serde(default)]
    pub city: Option<String>,

    /// State or province
    #[serde(default)]
    pub state: Option<String>,

    /// Postal code
    #[serde(default)]
    pub postal_code: Option<String>,

    /// Country
    #[serde(default)]
    pub country: Option<String>,
}

impl WhoisInfo {
    /// Returns true if nothing useful could be parsed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain_name.is_none()
            && self.registrar.is_none()
            && self.creation_date.is_none()
            && self.name_servers.is_empty()
    }
}
