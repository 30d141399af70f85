//! Tag collision handling
//!
//! Two phases per stitch: reserve every tag the destination already uses,
//! then resolve each incoming tag against the reservations while building
//! a rename mapping. Nothing outlives one stitch.

use std::collections::{HashMap, HashSet};

use crate::models::tile::Tile;

/// Reservation set plus the renames made so far
#[derive(Clone, Debug, Default)]
pub struct TagResolver {
    reserved: HashSet<String>,
    renames: HashMap<String, String>,
    suffix: String,
}

impl TagResolver {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            reserved: HashSet::new(),
            renames: HashMap::new(),
            suffix: suffix.into(),
        }
    }

    /// Resolver pre-loaded with every non-empty tag used by `tiles`
    pub fn for_tiles(tiles: &[Tile], suffix: impl Into<String>) -> Self {
        let mut resolver = Self::new(suffix);
        resolver.reserve(
            tiles
                .iter()
                .flat_map(|t| t.actions.iter().chain(t.decorations.iter()))
                .filter_map(|e| e.tag.clone())
                .filter(|tag| !tag.is_empty()),
        );
        resolver
    }

    pub fn reserve<I: IntoIterator<Item = String>>(&mut self, tags: I) {
        self.reserved.extend(tags);
    }

    pub fn is_reserved(&self, tag: &str) -> bool {
        self.reserved.contains(tag)
    }

    /// Renames made so far, original -> new
    pub fn renames(&self) -> &HashMap<String, String> {
        &self.renames
    }

    /// Tag to write on an incoming event
    ///
    /// Declarations claim their tag, renaming on collision; references are
    /// rewritten token by token through the rename mapping. An empty tag
    /// comes back empty.
    pub fn resolve(&mut self, tag: &str, is_declaration: bool) -> String {
        if tag.is_empty() {
            String::new()
        } else if is_declaration {
            self.declare(tag)
        } else {
            self.rewrite_references(tag)
        }
    }

    fn declare(&mut self, tag: &str) -> String {
        if let Some(renamed) = self.renames.get(tag) {
            return renamed.clone();
        }
        if !self.reserved.contains(tag) {
            self.reserved.insert(tag.to_string());
            return tag.to_string();
        }

        let fresh = (1u32..)
            .map(|n| format!("{}{}{}", tag, self.suffix, n))
            .find(|candidate| !self.reserved.contains(candidate))
            .unwrap_or_else(|| tag.to_string());
        log::debug!("tag '{}' collides, renamed to '{}'", tag, fresh);
        self.reserved.insert(fresh.clone());
        self.renames.insert(tag.to_string(), fresh.clone());
        fresh
    }

    fn rewrite_references(&self, tags: &str) -> String {
        if tags.is_empty() {
            return String::new();
        }
        tags.split(',')
            .map(|token| {
                let token = token.trim();
                self.renames
                    .get(token)
                    .map(String::as_str)
                    .unwrap_or(token)
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::Event;

    fn resolver(existing: &[&str]) -> TagResolver {
        let mut r = TagResolver::new("_S");
        r.reserve(existing.iter().map(|s| s.to_string()));
        r
    }

    #[test]
    fn test_colliding_declaration_is_renamed() {
        let mut r = resolver(&["A"]);
        assert_eq!(r.resolve("A", true), "A_S1");
        assert_eq!(r.resolve("A", false), "A_S1");
        // Mapping is stable for the rest of the stitch
        assert_eq!(r.resolve("A", true), "A_S1");
    }

    #[test]
    fn test_counter_skips_used_names() {
        let mut r = resolver(&["A", "A_S1", "A_S2"]);
        assert_eq!(r.resolve("A", true), "A_S3");
        assert!(r.is_reserved("A_S3"));
    }

    #[test]
    fn test_empty_tag_is_never_claimed() {
        let mut r = resolver(&[]);
        assert_eq!(r.resolve("", true), "");
        assert_eq!(r.resolve("", true), "");
        assert!(!r.is_reserved(""));
        assert!(r.renames().is_empty());
    }

    #[test]
    fn test_for_tiles_skips_empty_tags() {
        let tiles = vec![Tile::new(0.0)
            .with_decoration(Event::new("AddDecoration").with_tag(""))
            .with_decoration(Event::new("AddDecoration").with_tag("A"))];
        let r = TagResolver::for_tiles(&tiles, "_S");
        assert!(r.is_reserved("A"));
        assert!(!r.is_reserved(""));
    }

    #[test]
    fn test_free_declaration_is_kept_and_reserved() {
        let mut r = resolver(&[]);
        assert_eq!(r.resolve("B", true), "B");
        assert!(r.is_reserved("B"));
        // A second declaration of the same tag now collides
        assert_eq!(r.resolve("B", true), "B_S1");
    }

    #[test]
    fn test_reference_lists_are_rewritten_per_token() {
        let mut r = resolver(&["A", "C"]);
        r.resolve("A", true);
        assert_eq!(r.resolve("A, B ,C", false), "A_S1,B,C");
        assert_eq!(r.resolve("", false), "");
    }

    #[test]
    fn test_for_tiles_collects_actions_and_decorations() {
        use crate::models::event::Event;
        let tiles = vec![
            Tile::new(0.0).with_action(Event::new("MoveDecorations").with_tag("x")),
            Tile::new(0.0).with_decoration(Event::new("AddDecoration").with_tag("y")),
        ];
        let r = TagResolver::for_tiles(&tiles, "_S");
        assert!(r.is_reserved("x"));
        assert!(r.is_reserved("y"));
        assert!(!r.is_reserved("z"));
    }
}
