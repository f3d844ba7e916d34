//! Committable entry types.

use serde::{Deserialize, Serialize};
use zomekit_core::{RecordType, Schema};

/// Who may read a committed entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sharing {
    /// Visible to everyone.
    #[default]
    Public,
    /// Kept on the author's device.
    Private,
    /// Shared, but only readable with the right key.
    Encrypted,
}

/// A record type the zome may commit through the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryTypeDef {
    /// Entry type name, taken from the record name.
    pub name: &'static str,
    /// Free-form description.
    pub description: String,
    /// Visibility of committed entries.
    pub sharing: Sharing,
    /// Layout of the entry content.
    pub schema: Schema,
    /// Entry types this one may link to.
    pub links_to: Vec<Link>,
}

/// A permitted, tagged link from one entry type to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Entry type at the far end of the link.
    pub target_type: &'static str,
    /// Label distinguishing links between the same two types.
    pub tag: String,
}

impl Link {
    /// Create a link descriptor.
    pub fn new(target_type: &'static str, tag: impl Into<String>) -> Self {
        Self {
            target_type,
            tag: tag.into(),
        }
    }
}

impl EntryTypeDef {
    /// Describe record type `T` as an entry type.
    pub fn of<T: RecordType>(description: impl Into<String>, sharing: Sharing) -> Self {
        Self {
            name: T::record_schema().name,
            description: description.into(),
            sharing,
            schema: T::schema(),
            links_to: Vec::new(),
        }
    }

    /// Check whether a link with this target and tag is declared.
    pub fn has_link(&self, target_type: &str, tag: &str) -> bool {
        self.links_to
            .iter()
            .any(|link| link.target_type == target_type && link.tag == tag)
    }
}
