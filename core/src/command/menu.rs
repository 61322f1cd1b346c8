use crate::command::text::Icon;

/// An item in a menu.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Item {
    pub id: u8,
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: Option<Icon>,
}

impl Item {
    pub fn new(id: u8, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            icon: None,
        }
    }
}

/// A menu carried by SetupMenu or SelectItem.
/// The card removes the toolkit application by setting up a menu whose only item is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Menu {
    pub title: Option<String>,
    pub title_icon: Option<Icon>,
    pub items: Vec<Option<Item>>,
    pub default_item: Option<u8>,
    pub help_available: bool,
    pub soft_key_preferred: bool,
}

impl Menu {
    pub fn new(title: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            title: Some(title.into()),
            items: items.into_iter().map(Some).collect(),
            ..Default::default()
        }
    }

    /// Determines whether the menu asks to remove the toolkit application.
    pub fn is_removal(&self) -> bool {
        match self.items.as_slice() {
            [] | [None] => true,
            _ => false,
        }
    }

    /// Finds the label of the item with the identifier.
    pub fn item_text(&self, id: u8) -> Option<&str> {
        self.items
            .iter()
            .flatten()
            .find(|item| item.id == id)
            .map(|item| item.text.as_str())
    }
}
