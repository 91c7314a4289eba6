//! Presentation adapter: loading state -> element attributes
//!
//! Framework-agnostic. UI layers (see `lumen-widgets`) map the class flags
//! to their own styling and read the forwarded attributes they understand.

use std::collections::BTreeMap;

use crate::state::LoadingState;

/// Base class, always present
pub const CLASS_IMAGE: &str = "image";
/// Present while `is_loading_error` is set
pub const CLASS_ERROR: &str = "error";
/// Present while `is_loading_complete` is set
pub const CLASS_COMPLETE: &str = "complete";

/// Caller-supplied element properties besides the source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageProps {
    /// Extra style class merged after the computed ones
    pub class_name: Option<String>,
    /// Accessibility text
    pub alt: Option<String>,
    /// Anything else, forwarded to the rendering primitive untouched
    pub attributes: BTreeMap<String, String>,
}

impl ImageProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Add a pass-through attribute
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Computed style classes for a state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleClasses {
    pub error: bool,
    pub complete: bool,
    pub extra: Option<String>,
}

impl StyleClasses {
    pub fn from_state(state: &LoadingState, class_name: Option<&str>) -> Self {
        Self {
            error: state.is_loading_error,
            complete: state.is_loading_complete,
            extra: class_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        }
    }

    /// Active classes in order: base, error, complete, caller class
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(CLASS_IMAGE)
            .chain(self.error.then_some(CLASS_ERROR))
            .chain(self.complete.then_some(CLASS_COMPLETE))
            .chain(self.extra.as_deref())
    }

    pub fn contains(&self, class: &str) -> bool {
        self.iter()
            .flat_map(|class_attr| class_attr.split_whitespace())
            .any(|active| active == class)
    }

    /// Space-separated class attribute
    pub fn class_string(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }
}

/// Attributes handed to the rendering primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementAttrs<'a> {
    /// `None` until a source has been resolved
    pub src: Option<&'a str>,
    pub classes: StyleClasses,
    pub alt: Option<&'a str>,
    /// Pass-through attributes, verbatim
    pub attributes: &'a BTreeMap<String, String>,
}

impl ElementAttrs<'_> {
    /// Look up an attribute as the primitive would see it
    ///
    /// `src`, `class` and `alt` are the computed values and shadow
    /// pass-through entries with the same name.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "src" => self.src.map(str::to_string),
            "class" => Some(self.classes.class_string()),
            "alt" => self.alt.map(str::to_string),
            _ => self.attributes.get(key).cloned(),
        }
    }
}

/// Map state and props to element attributes
pub fn present<'a>(state: &'a LoadingState, props: &'a ImageProps) -> ElementAttrs<'a> {
    ElementAttrs {
        src: state.resolved_source.as_deref(),
        classes: StyleClasses::from_state(state, props.class_name.as_deref()),
        alt: props.alt.as_deref(),
        attributes: &props.attributes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{transition, Action};

    #[test]
    fn test_classes_follow_flags() {
        let initial = LoadingState::new();
        let failed = transition(&initial, Action::LoadingError);
        let complete = transition(&failed, Action::LoadingComplete);

        for state in [&initial, &failed, &complete] {
            let classes = StyleClasses::from_state(state, None);
            assert!(classes.contains(CLASS_IMAGE));
            assert_eq!(classes.contains(CLASS_ERROR), state.is_loading_error);
            assert_eq!(classes.contains(CLASS_COMPLETE), state.is_loading_complete);
        }
    }

    #[test]
    fn test_class_string_order() {
        let failed = transition(&LoadingState::new(), Action::LoadingError);
        let classes = StyleClasses::from_state(&failed, Some("avatar round"));

        assert_eq!(classes.class_string(), "image error avatar round");
        assert!(classes.contains("round"));
        assert!(!classes.contains(CLASS_COMPLETE));
    }

    #[test]
    fn test_blank_caller_class_is_skipped() {
        let classes = StyleClasses::from_state(&LoadingState::new(), Some("  "));
        assert_eq!(classes.class_string(), "image");
    }

    #[test]
    fn test_present_forwards_attributes() {
        let state = transition(&LoadingState::new(), Action::SetResource("a.png".to_string()));
        let props = ImageProps::new()
            .alt("Album cover")
            .class_name("cover")
            .attribute("title", "Cover art")
            .attribute("src", "ignored.png");

        let attrs = present(&state, &props);
        assert_eq!(attrs.src, Some("a.png"));
        assert_eq!(attrs.get("src").as_deref(), Some("a.png"));
        assert_eq!(attrs.get("alt").as_deref(), Some("Album cover"));
        assert_eq!(attrs.get("class").as_deref(), Some("image cover"));
        assert_eq!(attrs.get("title").as_deref(), Some("Cover art"));
        assert_eq!(attrs.attributes.len(), 2);
    }

    #[test]
    fn test_present_without_source() {
        let props = ImageProps::new();
        let state = LoadingState::new();
        let attrs = present(&state, &props);
        assert_eq!(attrs.src, None);
        assert_eq!(attrs.get("src"), None);
    }
}
