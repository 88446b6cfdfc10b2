//! Host surfaces the switcher drives: the document, the location bar and the
//! busy overlay.
//!
//! A browser binding implements these over the DOM: localizable elements are
//! the ones tagged `data-i18n`, the dropdown list opens with the `w--open`
//! class, and the overlay hides with the `hide` class. The in-memory versions
//! below back the tests and the preview binary.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Opaque handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementId(pub usize);

/// The page document.
pub trait Document {
    /// Set an attribute on the root `<html>` element (`dir`, `lang`).
    fn set_root_attribute(&mut self, name: &str, value: &str);

    fn set_title(&mut self, title: &str);

    /// Set `meta[name=description]`'s content. Returns `false` when the page
    /// has no such tag.
    fn set_meta_description(&mut self, content: &str) -> bool;

    /// Elements carrying a translation key, with that key.
    fn localizable_elements(&self) -> Vec<(ElementId, String)>;

    fn set_element_text(&mut self, id: ElementId, text: &str);

    /// Anchors that have an `href`, with its current value.
    fn anchors(&self) -> Vec<(ElementId, String)>;

    fn set_anchor_href(&mut self, id: ElementId, href: &str);

    /// Set the "current language" label in the dropdown toggle, if present.
    fn set_language_label(&mut self, text: &str);

    fn is_dropdown_open(&self) -> bool;

    fn set_dropdown_open(&mut self, open: bool);
}

/// The address bar.
pub trait Location {
    /// Current URL path, without query or fragment.
    fn path(&self) -> String;

    /// Replace the current history entry's path. Never navigates.
    fn replace_path(&mut self, path: &str);

    /// Full page reload.
    fn reload(&mut self);
}

/// Busy indicator shown while translations are applied.
///
/// Hiding happens from a timer task, hence `Send + Sync` and `&self`.
pub trait Overlay: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

// ==================== In-memory host ====================

#[derive(Debug, Clone, Serialize)]
pub struct MemoryElement {
    pub key: String,
    pub text: String,
}

/// Document model holding exactly the pieces the switcher touches.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryDocument {
    pub dir: Option<String>,
    pub lang: Option<String>,
    pub title: String,
    pub meta_description: Option<String>,
    pub elements: Vec<MemoryElement>,
    pub links: Vec<String>,
    pub language_label: Option<String>,
    pub dropdown_open: bool,
}

impl MemoryDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_meta_description(mut self, content: impl Into<String>) -> Self {
        self.meta_description = Some(content.into());
        self
    }

    pub fn with_element(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.elements.push(MemoryElement {
            key: key.into(),
            text: text.into(),
        });
        self
    }

    pub fn with_link(mut self, href: impl Into<String>) -> Self {
        self.links.push(href.into());
        self
    }

    pub fn with_language_label(mut self, text: impl Into<String>) -> Self {
        self.language_label = Some(text.into());
        self
    }

    /// Text of the first element tagged with `key`.
    pub fn element_text(&self, key: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|element| element.key == key)
            .map(|element| element.text.as_str())
    }
}

impl Document for MemoryDocument {
    fn set_root_attribute(&mut self, name: &str, value: &str) {
        match name {
            "dir" => self.dir = Some(value.to_string()),
            "lang" => self.lang = Some(value.to_string()),
            _ => {}
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_meta_description(&mut self, content: &str) -> bool {
        match self.meta_description.as_mut() {
            Some(meta) => {
                *meta = content.to_string();
                true
            }
            None => false,
        }
    }

    fn localizable_elements(&self) -> Vec<(ElementId, String)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, element)| (ElementId(i), element.key.clone()))
            .collect()
    }

    fn set_element_text(&mut self, id: ElementId, text: &str) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.text = text.to_string();
        }
    }

    fn anchors(&self) -> Vec<(ElementId, String)> {
        self.links
            .iter()
            .enumerate()
            .map(|(i, href)| (ElementId(i), href.clone()))
            .collect()
    }

    fn set_anchor_href(&mut self, id: ElementId, href: &str) {
        if let Some(link) = self.links.get_mut(id.0) {
            *link = href.to_string();
        }
    }

    fn set_language_label(&mut self, text: &str) {
        if let Some(label) = self.language_label.as_mut() {
            *label = text.to_string();
        }
    }

    fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    fn set_dropdown_open(&mut self, open: bool) {
        self.dropdown_open = open;
    }
}

/// Location bar that records every replacement and reload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryLocation {
    pub path: String,
    pub replaced: Vec<String>,
    pub reloads: usize,
}

impl MemoryLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Location for MemoryLocation {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn replace_path(&mut self, path: &str) {
        self.path = path.to_string();
        self.replaced.push(path.to_string());
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}

/// Overlay backed by atomics so the hide task can flip it.
#[derive(Debug, Default)]
pub struct MemoryOverlay {
    visible: AtomicBool,
    shows: AtomicUsize,
    hides: AtomicUsize,
}

impl MemoryOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn show_count(&self) -> usize {
        self.shows.load(Ordering::SeqCst)
    }

    pub fn hide_count(&self) -> usize {
        self.hides.load(Ordering::SeqCst)
    }
}

impl Overlay for MemoryOverlay {
    fn show(&self) {
        self.visible.store(true, Ordering::SeqCst);
        self.shows.fetch_add(1, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
        self.hides.fetch_add(1, Ordering::SeqCst);
    }
}
