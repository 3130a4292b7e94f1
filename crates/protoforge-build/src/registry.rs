// Path-keyed customization stores: attribute registries and the field
// representation override table.
//
// Patterns follow the generator's dotted-path convention: a concrete path
// like `pkg.Message.field`, a package/type prefix like `pkg.Message`, or
// `.` which matches everything. A leading `.` on either side is ignored
// for matching purposes.

/// Alternate native representation for a field.
///
/// Representations are exclusive per field, which is why [`ReprTable`]
/// overwrites where [`AttrRegistry`] appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRepr {
    /// Generate `bytes::Bytes` instead of `Vec<u8>` for a bytes field.
    Bytes,
    /// Generate `BTreeMap` instead of `HashMap` for a map field.
    BtreeMap,
}

impl std::fmt::Display for FieldRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldRepr::Bytes => write!(f, "bytes"),
            FieldRepr::BtreeMap => write!(f, "btree_map"),
        }
    }
}

/// Ordered `(pattern, attribute)` pairs destined for one generator hook.
///
/// Append semantics: duplicate registrations are kept in insertion order,
/// never deduplicated - attribute order is significant in the generated
/// code (e.g. `#[derive(..)]` stacking).
#[derive(Debug, Clone, Default)]
pub struct AttrRegistry {
    entries: Vec<(String, String)>,
}

impl AttrRegistry {
    /// Append `attribute` to the list registered under `pattern`.
    pub fn register(&mut self, pattern: impl Into<String>, attribute: impl Into<String>) {
        self.entries.push((pattern.into(), attribute.into()));
    }

    /// Every attribute whose pattern matches `path`.
    ///
    /// Exact matches come first in registration order, then wildcard and
    /// prefix matches ordered most-specific (longest pattern) first; ties
    /// keep registration order.
    pub fn resolve(&self, path: &str) -> Vec<&str> {
        let mut exact = Vec::new();
        let mut partial: Vec<(usize, &str)> = Vec::new();
        for (pattern, attr) in &self.entries {
            if pattern == path {
                exact.push(attr.as_str());
            } else if pattern_matches(pattern, path) {
                partial.push((pattern.len(), attr.as_str()));
            }
        }
        // Stable sort keeps registration order within a specificity class.
        partial.sort_by(|a, b| b.0.cmp(&a.0));
        exact.extend(partial.into_iter().map(|(_, attr)| attr));
        exact
    }

    /// Registration-order view, replayed verbatim to the generator.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, a)| (p.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `(pattern, representation)` pairs with overwrite semantics.
///
/// Re-registering the same exact pattern replaces the previous
/// representation in place; the entry keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct ReprTable {
    entries: Vec<(String, FieldRepr)>,
}

impl ReprTable {
    /// Returns the representation the new one replaced, if any.
    pub fn register(&mut self, pattern: impl Into<String>, repr: FieldRepr) -> Option<FieldRepr> {
        let pattern = pattern.into();
        if let Some(slot) = self.entries.iter_mut().find(|(p, _)| *p == pattern) {
            return Some(std::mem::replace(&mut slot.1, repr));
        }
        self.entries.push((pattern, repr));
        None
    }

    /// The representation in effect for `path`: an exact match wins, else
    /// the most specific matching wildcard, else none.
    pub fn resolve(&self, path: &str) -> Option<FieldRepr> {
        if let Some((_, repr)) = self.entries.iter().find(|(p, _)| p == path) {
            return Some(*repr);
        }
        self.entries
            .iter()
            .filter(|(p, _)| pattern_matches(p, path))
            .max_by_key(|(p, _)| p.len())
            .map(|(_, repr)| *repr)
    }

    /// Registration-order view for the orchestrator.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldRepr)> {
        self.entries.iter().map(|(p, r)| (p.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Wildcard/prefix match between a registered pattern and a concrete path.
///
/// `.` matches everything; otherwise the pattern matches when it equals the
/// path or names one of its dotted ancestors (`pkg.Msg` covers
/// `pkg.Msg.field` but not `pkg.Msgs`).
fn pattern_matches(pattern: &str, path: &str) -> bool {
    if pattern == "." {
        return true;
    }
    let pattern = pattern.strip_prefix('.').unwrap_or(pattern);
    let path = path.strip_prefix('.').unwrap_or(path);
    if pattern == path {
        return true;
    }
    path.len() > pattern.len()
        && path.starts_with(pattern)
        && path.as_bytes()[pattern.len()] == b'.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_keep_registration_order_without_dedup() {
        let mut reg = AttrRegistry::default();
        reg.register("pkg.Msg", "#[derive(Eq)]");
        reg.register("pkg.Msg", "#[serde(default)]");
        reg.register("pkg.Msg", "#[derive(Eq)]");

        assert_eq!(
            reg.resolve("pkg.Msg"),
            vec!["#[derive(Eq)]", "#[serde(default)]", "#[derive(Eq)]"]
        );
    }

    #[test]
    fn resolve_orders_exact_before_wildcard() {
        let mut reg = AttrRegistry::default();
        reg.register(".", "#[a]");
        reg.register("pkg", "#[b]");
        reg.register("pkg.Msg", "#[c]");

        // Exact first, then longest prefix, then the catch-all.
        assert_eq!(reg.resolve("pkg.Msg"), vec!["#[c]", "#[b]", "#[a]"]);
        assert_eq!(reg.resolve("pkg.Other.field"), vec!["#[b]", "#[a]"]);
        assert_eq!(reg.resolve("other.Msg"), vec!["#[a]"]);
    }

    #[test]
    fn prefix_match_respects_path_segments() {
        let mut reg = AttrRegistry::default();
        reg.register("pkg.Msg", "#[x]");

        assert!(reg.resolve("pkg.Msgs").is_empty());
        assert_eq!(reg.resolve("pkg.Msg.field"), vec!["#[x]"]);
        assert_eq!(reg.resolve(".pkg.Msg"), vec!["#[x]"]);
    }

    #[test]
    fn unmatched_path_resolves_empty() {
        let reg = AttrRegistry::default();
        assert!(reg.resolve("pkg.Nothing").is_empty());
    }

    #[test]
    fn repr_last_registration_wins() {
        let mut table = ReprTable::default();
        assert_eq!(table.register("pkg.Msg.data", FieldRepr::Bytes), None);
        assert_eq!(
            table.register("pkg.Msg.data", FieldRepr::BtreeMap),
            Some(FieldRepr::Bytes)
        );

        assert_eq!(table.resolve("pkg.Msg.data"), Some(FieldRepr::BtreeMap));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn repr_exact_beats_wildcard() {
        let mut table = ReprTable::default();
        table.register("pkg", FieldRepr::BtreeMap);
        table.register("pkg.Msg.data", FieldRepr::Bytes);

        assert_eq!(table.resolve("pkg.Msg.data"), Some(FieldRepr::Bytes));
        assert_eq!(table.resolve("pkg.Msg.other"), Some(FieldRepr::BtreeMap));
        assert_eq!(table.resolve("elsewhere.field"), None);
    }
}
