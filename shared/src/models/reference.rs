//! Entity references
//!
//! The backend sometimes populates a foreign key with the referenced document
//! (`"menuid": {"_id": "m1", "name": "Tea", "price": 20}`) and sometimes sends
//! the bare id (`"menuid": "m1"`). [`EntityRef`] accepts both.

use serde::{Deserialize, Serialize};

/// Foreign key as sent by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(String),
    Populated(PopulatedRef),
}

/// Populated reference; only the fields the client reads are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulatedRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl EntityRef {
    /// Plain id, whichever shape was received
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Id(id) => id,
            EntityRef::Populated(p) => &p.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            EntityRef::Id(_) => None,
            EntityRef::Populated(p) => p.name.as_deref(),
        }
    }

    pub fn price(&self) -> Option<f64> {
        match self {
            EntityRef::Id(_) => None,
            EntityRef::Populated(p) => p.price,
        }
    }
}

impl From<&str> for EntityRef {
    fn from(id: &str) -> Self {
        EntityRef::Id(id.to_string())
    }
}
