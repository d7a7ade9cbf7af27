use openclimate_core_types::Sensitive;
use serde::{Deserialize, Serialize};

use super::record::impl_record;
use super::{Index, Partition};

/// A platform account
///
/// The password hash is stored as-is and redacted from Debug output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub index: Index,
    pub name: String,
    pub email: String,
    pub pwhash: Sensitive<String>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        pwhash: impl Into<String>,
    ) -> Self {
        Self {
            index: 0,
            name: name.into(),
            email: email.into(),
            pwhash: Sensitive::new(pwhash.into()),
        }
    }
}

impl_record!(User, Partition::Users);
