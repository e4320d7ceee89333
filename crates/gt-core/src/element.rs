use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::selector::Selector;

/// A resolved UI element as the host application reports it.
///
/// `ancestors` lists enclosing elements nearest first. `stacking_root` names the
/// ancestor that creates the element's stacking context, if any: elevating the element
/// above the overlay requires lifting that ancestor as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRef {
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub ancestors: Vec<Ancestor>,
    #[serde(default)]
    pub stacking_root: Option<String>,
    #[serde(default)]
    pub dataset: BTreeMap<String, String>,
}

/// An enclosing element as seen from one of its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ancestor {
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub dataset: BTreeMap<String, String>,
}

impl Ancestor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            classes: Vec::new(),
            dataset: BTreeMap::new(),
        }
    }

    pub fn matches(&self, selector: &Selector) -> bool {
        selector_hits(&self.id, &self.classes, selector)
    }
}

impl From<&ElementRef> for Ancestor {
    fn from(element: &ElementRef) -> Self {
        Self {
            id: element.id.clone(),
            classes: element.classes.clone(),
            dataset: element.dataset.clone(),
        }
    }
}

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            classes: Vec::new(),
            ancestors: Vec::new(),
            stacking_root: None,
            dataset: BTreeMap::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets bare ancestors by id, nearest first.
    pub fn with_ancestors<I, S>(mut self, ancestors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ancestors = ancestors.into_iter().map(Ancestor::new).collect();
        self
    }

    /// Places the element directly inside `parent`, inheriting the parent's lineage
    /// and stacking root.
    pub fn within(mut self, parent: &ElementRef) -> Self {
        self.ancestors = std::iter::once(Ancestor::from(parent))
            .chain(parent.ancestors.iter().cloned())
            .collect();
        if self.stacking_root.is_none() {
            self.stacking_root = parent.stacking_root.clone();
        }
        self
    }

    pub fn with_stacking_root(mut self, root: impl Into<String>) -> Self {
        self.stacking_root = Some(root.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    pub fn matches(&self, selector: &Selector) -> bool {
        selector_hits(&self.id, &self.classes, selector)
    }

    /// The element itself when it matches `selector`, otherwise the nearest matching
    /// ancestor rebuilt as an element of its own.
    pub fn closest(&self, selector: &Selector) -> Option<ElementRef> {
        if self.matches(selector) {
            return Some(self.clone());
        }
        let position = self
            .ancestors
            .iter()
            .position(|ancestor| ancestor.matches(selector))?;
        let ancestor = &self.ancestors[position];
        let lineage = self.ancestors[position + 1..].to_vec();
        let stacking_root = self
            .stacking_root
            .clone()
            .filter(|root| lineage.iter().any(|outer| &outer.id == root));
        Some(ElementRef {
            id: ancestor.id.clone(),
            classes: ancestor.classes.clone(),
            ancestors: lineage,
            stacking_root,
            dataset: ancestor.dataset.clone(),
        })
    }

    /// Looks `key` up on the element, then on its ancestors nearest first.
    pub fn inherited_data(&self, key: &str) -> Option<&str> {
        self.dataset
            .get(key)
            .or_else(|| {
                self.ancestors
                    .iter()
                    .find_map(|ancestor| ancestor.dataset.get(key))
            })
            .map(String::as_str)
    }

    pub fn is_within(&self, container_id: &str) -> bool {
        self.ancestors
            .iter()
            .any(|ancestor| ancestor.id == container_id)
    }

    /// True when `self` is `other` or sits inside it.
    pub fn is_same_or_within(&self, other: &ElementRef) -> bool {
        self.id == other.id || self.is_within(&other.id)
    }
}

fn selector_hits(id: &str, classes: &[String], selector: &Selector) -> bool {
    match selector {
        Selector::Id(name) => id == name,
        Selector::Class(name) => classes.iter().any(|class| class == name),
    }
}

#[cfg(test)]
mod element_tests {
    use super::*;

    #[test]
    fn matches_by_id_or_class_and_tracks_containment() {
        let card = ElementRef::new("course-c1")
            .with_class("course-card")
            .with_ancestors(["main-menu", "content-area"])
            .with_data("course-id", "c1");
        let region = ElementRef::new("main-menu");

        assert!(card.matches(&Selector::id("course-c1")));
        assert!(card.matches(&Selector::class("course-card")));
        assert!(!card.matches(&Selector::id("main-menu")));
        assert!(card.is_same_or_within(&region));
        assert!(region.is_same_or_within(&region));
        assert!(!region.is_same_or_within(&card));
        assert_eq!(card.dataset.get("course-id").map(String::as_str), Some("c1"));
    }

    #[test]
    fn closest_walks_up_to_the_matching_ancestor() {
        let header = ElementRef::new("app-header");
        let card = ElementRef::new("course-c1")
            .with_class("course-card")
            .with_data("course-id", "c1")
            .with_ancestors(["main-menu", "app-header"])
            .with_stacking_root("app-header");
        let title = ElementRef::new("course-c1-title").within(&card);

        assert!(title.is_within("course-c1"));
        assert!(title.is_same_or_within(&header));
        assert_eq!(title.stacking_root.as_deref(), Some("app-header"));
        assert!(!title.matches(&Selector::class("course-card")));

        let matched = title
            .closest(&Selector::class("course-card"))
            .expect("card should match");
        assert_eq!(matched.id, "course-c1");
        assert_eq!(matched.dataset.get("course-id").map(String::as_str), Some("c1"));
        assert!(matched.is_within("main-menu"));
        assert_eq!(matched.stacking_root.as_deref(), Some("app-header"));

        let outer = title
            .closest(&Selector::id("app-header"))
            .expect("header should match");
        assert!(outer.ancestors.is_empty());
        assert_eq!(outer.stacking_root, None);

        assert_eq!(title.closest(&Selector::class("profile-link")), None);
        assert_eq!(title.inherited_data("course-id"), Some("c1"));
        assert_eq!(title.inherited_data("missing"), None);
        assert_eq!(title.closest(&Selector::id("course-c1-title")), Some(title.clone()));
    }
}
