use serde::{Deserialize, Serialize};
use crate::fingerprint::Fingerprint;

/// One row of the input: an identifier, its structure string and,
/// once encoded, its fingerprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub structure: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Fingerprint>,
}

impl Record {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, structure: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            structure: structure.into(),
            fingerprint: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    #[inline]
    pub fn is_encoded(&self) -> bool {
        self.fingerprint.is_some()
    }
}
