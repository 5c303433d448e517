use serde::{Deserialize, Serialize};

/// Outcome of an AXFR attempt against one nameserver.
///
/// A refused transfer is the normal case for a well-configured server, so
/// failure is carried as data rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTransfer {
    /// Nameserver that was asked
    pub nameserver: String,

    /// Whether the full zone was received
    pub ok: bool,

    /// Zone text on success, failure reason otherwise
    pub detail: String,

    /// Number of records received
    #[serde(default)]
    pub records: usize,
}

impl ZoneTransfer {
    /// A successful transfer
    #[must_use]
    pub fn success(nameserver: impl Into<String>, zone_text: String, records: usize) -> Self {
        Self {
            nameserver: nameserver.into(),
            ok: true,
            detail: zone_text,
            records,
        }
    }

    /// A failed transfer with its reason
    #[must_use]
    pub fn failure(nameserver: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            nameserver: nameserver.into(),
            ok: false,
            detail: reason.into(),
            records: 0,
        }
    }
}
