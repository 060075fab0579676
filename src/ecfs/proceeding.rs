//! Proceeding (docket) records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A regulatory proceeding as returned by the `proceedings` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proceeding {
    /// Docket number, e.g. "17-108".
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Numeric id, carried as a string on the wire.
    #[serde(rename = "id_proceeding", with = "string_id")]
    pub id: u64,

    #[serde(rename = "description_display", default, skip_serializing_if = "Option::is_none")]
    pub display_description: Option<String>,

    #[serde(rename = "_index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    #[serde(rename = "bureau.code", default, skip_serializing_if = "Option::is_none")]
    pub bureau_code: Option<String>,

    #[serde(rename = "bureau.name", default, skip_serializing_if = "Option::is_none")]
    pub bureau_name: Option<String>,

    #[serde(rename = "filed_by", default, skip_serializing_if = "Option::is_none")]
    pub filed_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant_name: Option<String>,

    #[serde(rename = "date_proceeding_created", default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(rename = "date_closed", default, skip_serializing_if = "Option::is_none")]
    pub closed: Option<DateTime<Utc>>,
}

impl Proceeding {
    /// Minimal record with no metadata.
    pub fn new(id: u64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            id,
            display_description: None,
            index: None,
            bureau_code: None,
            bureau_name: None,
            filed_by: None,
            applicant_name: None,
            created: None,
            closed: None,
        }
    }

    /// Copy keeping only name, description and id.
    ///
    /// The filings resource rejects proceedings carrying search metadata.
    pub fn strip(&self) -> Self {
        Self::new(self.id, self.name.clone(), self.description.clone())
    }

    pub fn is_stripped(&self) -> bool {
        *self == self.strip()
    }
}

/// Envelope of the `proceedings` resource.
#[derive(Debug, Deserialize)]
pub(crate) struct ProceedingList {
    pub proceedings: Vec<Proceeding>,
}

mod string_id {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S: Serializer>(id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(id) => Ok(id),
            Repr::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid proceeding id '{text}'"))),
        }
    }
}
