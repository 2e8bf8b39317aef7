//! Per-image tag collection.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Image URL to tag list mapping.
///
/// Images keep the order in which they were first tagged, and each image
/// keeps its tags in insertion order. Tags are stored exactly as entered;
/// only [`TagMap::matching`] compares case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: Vec<(String, Vec<String>)>,
}

impl TagMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the tags of an image, empty if it has none.
    #[must_use]
    pub fn tags_for(&self, image: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(url, _)| url == image)
            .map(|(_, tags)| tags.as_slice())
            .unwrap_or_default()
    }

    /// Appends `tag` to an image's tags.
    ///
    /// Returns `false` without changing anything if the exact tag is already
    /// present. The caller is expected to have trimmed and rejected empty input.
    pub fn add(&mut self, image: &str, tag: &str) -> bool {
        let index = match self.entries.iter().position(|(url, _)| url == image) {
            Some(index) => index,
            None => {
                self.entries.push((image.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };

        let tags = &mut self.entries[index].1;
        if tags.iter().any(|existing| existing == tag) {
            return false;
        }
        tags.push(tag.to_string());
        true
    }

    /// Returns image URLs having at least one tag containing `query`.
    ///
    /// `query` must already be lower-cased; tags are lower-cased for the
    /// comparison only. Results follow map order.
    #[must_use]
    pub fn matching(&self, query: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, tags)| tags.iter().any(|tag| tag.to_lowercase().contains(query)))
            .map(|(url, _)| url.as_str())
            .collect()
    }

    /// Returns the number of tagged images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no image is tagged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TagMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (url, tags) in &self.entries {
            map.serialize_entry(url, tags)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TagMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TagMapVisitor;

        impl<'de> Visitor<'de> for TagMapVisitor {
            type Value = TagMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping image URLs to tag arrays")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = TagMap::new();
                while let Some((url, tags)) = access.next_entry::<String, Vec<String>>()? {
                    for tag in tags {
                        map.add(&url, &tag);
                    }
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(TagMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const B: &str = "https://randomfox.ca/images/2.jpg";
    const C: &str = "https://randomfox.ca/images/3.jpg";

    #[test]
    fn test_add_same_tag_twice_keeps_one() {
        let mut tags = TagMap::new();

        assert!(tags.add(B, "cute"));
        assert!(!tags.add(B, "cute"));

        assert_eq!(tags.tags_for(B), ["cute"]);
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_dedupe_is_case_sensitive() {
        let mut tags = TagMap::new();
        tags.add(B, "cute");
        assert!(tags.add(B, "Cute"));
        assert_eq!(tags.tags_for(B), ["cute", "Cute"]);
    }

    #[test]
    fn test_untagged_image_has_no_tags() {
        let tags = TagMap::new();
        assert!(tags.tags_for(C).is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let mut tags = TagMap::new();
        tags.add(B, "SuperCute");
        tags.add(C, "wild");

        assert_eq!(tags.matching("cute"), vec![B]);
        assert_eq!(tags.matching("i"), vec![C]);
        assert!(tags.matching("sleepy").is_empty());
    }

    #[test]
    fn test_json_object_keeps_insertion_order() {
        let mut tags = TagMap::new();
        tags.add(C, "wild");
        tags.add(B, "cute");
        tags.add(C, "orange");

        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(
            json,
            format!(r#"{{"{C}":["wild","orange"],"{B}":["cute"]}}"#)
        );

        let back: TagMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tags);
        assert_eq!(back.matching(""), vec![C, B]);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(serde_json::from_str::<TagMap>("[1, 2]").is_err());
        assert!(serde_json::from_str::<TagMap>(r#"{"a": "cute"}"#).is_err());
    }
}
