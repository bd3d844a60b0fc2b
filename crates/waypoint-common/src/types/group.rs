use serde::{Deserialize, Serialize};

use super::item::Item;

/// A named, ordered collection of items produced by one provider.
///
/// Order is meaningful and set by the producing provider. Groups are only
/// ever replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGroup {
    pub name: String,
    pub icon: String,
    pub items: Vec<Item>,
}

impl ItemGroup {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of this group keeping only items that match `query`, in order.
    pub fn filtered(&self, query: &str) -> ItemGroup {
        ItemGroup {
            name: self.name.clone(),
            icon: self.icon.clone(),
            items: self
                .items
                .iter()
                .filter(|item| item.matches(query))
                .cloned()
                .collect(),
        }
    }

    pub fn find(&self, label: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.label() == label)
    }
}
