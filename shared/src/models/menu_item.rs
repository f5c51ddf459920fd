//! Menu Item Model

use serde::{Deserialize, Serialize};

use super::reference::EntityRef;

/// Availability filter / flag of a menu item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MenuAvailability {
    #[default]
    Available,
    Unavailable,
}

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Current price in currency unit
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category reference (bare id or populated category)
    #[serde(rename = "categoryid", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EntityRef>,
    #[serde(default)]
    pub status: MenuAvailability,
    #[serde(default)]
    pub is_vegetarian: bool,
}

impl MenuItem {
    pub fn is_available(&self) -> bool {
        self.status == MenuAvailability::Available
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(EntityRef::id)
    }
}

/// Find a menu item by id in a catalog
pub fn find_menu_item<'a>(catalog: &'a [MenuItem], id: &str) -> Option<&'a MenuItem> {
    catalog.iter().find(|m| m.id == id)
}
