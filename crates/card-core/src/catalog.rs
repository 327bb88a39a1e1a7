//! Content catalog and the active selection.

use crate::error::SelectionError;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(pub u32);

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One selectable project: its title and the image shown on the card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentItem {
    pub id: ContentId,
    pub title: String,
    pub image_ref: String,
}

impl ContentItem {
    pub fn new(id: u32, title: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            id: ContentId(id),
            title: title.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// Fixed, ordered, non-empty list of items.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    items: Vec<ContentItem>,
}

impl Catalog {
    pub fn new(items: Vec<ContentItem>) -> Result<Self, SelectionError> {
        if items.is_empty() {
            return Err(SelectionError::EmptyCatalog);
        }
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|other| other.id == item.id) {
                return Err(SelectionError::DuplicateItem(item.id));
            }
        }
        Ok(Self { items })
    }

    /// The three projects shipped with the scene.
    pub fn projects() -> Self {
        Self {
            items: vec![
                ContentItem::new(1, "CONCERT SERIES", "/card-bg.jpg"),
                ContentItem::new(2, "DIGITAL FASHION", "/fashion-bg.png"),
                ContentItem::new(3, "SPACE EXPLORER", "/space-bg.png"),
            ],
        }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn first(&self) -> &ContentItem {
        &self.items[0]
    }

    pub fn get(&self, id: ContentId) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: ContentId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Which catalog item currently drives the title and texture.
///
/// `revision` increases each time the active item changes; texture
/// consumers compare it with the revision they last loaded.
#[derive(Clone, Debug)]
pub struct Selection {
    catalog: Catalog,
    active: usize,
    revision: u64,
}

impl Selection {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            active: 0,
            revision: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn active(&self) -> &ContentItem {
        &self.catalog.items[self.active]
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Make `id` the active item. Returns whether the active item changed.
    /// Unknown ids leave the selection untouched.
    pub fn select(&mut self, id: ContentId) -> Result<bool, SelectionError> {
        let index = self
            .catalog
            .position(id)
            .ok_or(SelectionError::UnknownItem(id))?;
        if index == self.active {
            return Ok(false);
        }
        self.active = index;
        self.revision += 1;
        log::debug!(
            "[selection] active={} '{}' rev={}",
            id,
            self.active().title,
            self.revision
        );
        Ok(true)
    }
}

/// Text of the menu toggle button.
#[inline]
pub fn menu_label(menu_open: bool) -> &'static str {
    if menu_open {
        "CLOSE"
    } else {
        "MENU"
    }
}
