//! Filing documents.
//!
//! # Wire Shape
//! ```text
//! {
//!   "proceedings": [{name, description, id_proceeding}],
//!   "filers": [{name}], "authors": [], "bureaus": [], "lawfirms": [],
//!   "addressentity": {...}  |  "internationaladdressentity": {addresstext},
//!   "contact_email": "...", "text_data": "...", "express_comment": 1
//! }
//! ```
//! Server-assigned fields (`file_number`, `filingstatus`, `submissiontype`)
//! only appear on read-back and are never sent.

use serde::{Deserialize, Serialize};

use crate::ecfs::proceeding::Proceeding;
use crate::ecfs::types::{EcfsError, EcfsResult};

/// A party named on a filing (filer, author, bureau, law firm).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
}

impl Named {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// US postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "address_line_1")]
    pub line1: String,

    #[serde(rename = "address_line_2", default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,

    pub city: String,

    pub state: String,

    #[serde(rename = "zip_code")]
    pub zip: String,

    #[serde(default)]
    pub zip4: String,
}

/// Free-form address for filers outside the US.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternationalAddress {
    #[serde(rename = "addresstext")]
    pub text: String,
}

/// Where the filer can be reached. Exactly one form is ever sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressEntity {
    #[serde(rename = "addressentity")]
    Postal(Address),

    #[serde(rename = "internationaladdressentity")]
    International(InternationalAddress),
}

/// What a submitter provides: the minimum needed to build a filing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingInfo {
    pub name: String,
    pub email: String,
    pub address: AddressEntity,
    pub text: String,
}

/// Review status assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingStatus {
    #[serde(default)]
    pub description: String,
}

/// Submission type assigned by the server (e.g. "COMMENT").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionType {
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub description: String,
}

/// Full filing document as exchanged with the `filings` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcfsFiling {
    pub proceedings: Vec<Proceeding>,

    #[serde(default)]
    pub filers: Vec<Named>,

    #[serde(default)]
    pub authors: Vec<Named>,

    #[serde(default)]
    pub bureaus: Vec<Named>,

    #[serde(default)]
    pub lawfirms: Vec<Named>,

    #[serde(flatten)]
    pub address: AddressEntity,

    #[serde(rename = "contact_email")]
    pub email: String,

    #[serde(rename = "text_data")]
    pub text: String,

    #[serde(rename = "express_comment", with = "int_flag")]
    pub express: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_number: Option<String>,

    #[serde(rename = "filingstatus", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FilingStatus>,

    #[serde(rename = "submissiontype", default, skip_serializing_if = "Option::is_none")]
    pub submission_type: Option<SubmissionType>,
}

impl EcfsFiling {
    /// Assemble an express comment from submitter info.
    ///
    /// Proceedings are attached as given; stripping happens at submit time.
    pub fn build(info: FilingInfo, proceedings: Vec<Proceeding>) -> EcfsResult<Self> {
        if proceedings.is_empty() {
            return Err(EcfsError::NoProceedings.into());
        }

        Ok(Self {
            proceedings,
            filers: vec![Named::new(info.name)],
            authors: Vec::new(),
            bureaus: Vec::new(),
            lawfirms: Vec::new(),
            address: info.address,
            email: info.email,
            text: info.text,
            express: true,
            file_number: None,
            status: None,
            submission_type: None,
        })
    }

    /// The document as it goes on the wire: proceedings stripped to
    /// name/description/id, server-assigned fields dropped.
    pub fn to_submission(&self) -> Self {
        Self {
            proceedings: self.proceedings.iter().map(Proceeding::strip).collect(),
            file_number: None,
            status: None,
            submission_type: None,
            ..self.clone()
        }
    }
}

mod int_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(u64),
        Bool(bool),
    }

    pub fn serialize<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*flag))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Int(n) => n != 0,
            Repr::Bool(b) => b,
        })
    }
}
