//! The forest model: per-level parent links, one map per level.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use veil_core::errors::HierarchyError;
use veil_core::traits::{Generalized, IHierarchy};

/// One attribute's generalization forest.
///
/// `levels[l]` maps each value at level `l` to its parent at `l + 1`;
/// roots map to `None`. Chains may have different lengths: a root from a
/// short chain keeps its value while longer chains catch up, so root
/// lookups above the root's own level still answer `Exhausted`.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    attribute: String,
    levels: Vec<HashMap<String, Option<String>>>,
}

impl Hierarchy {
    /// An empty hierarchy for `attribute`: every lookup is `UnknownValue`
    /// until chains are inserted.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            levels: Vec::new(),
        }
    }

    /// Build from explicit leaf-to-root chains.
    pub fn from_chains(
        attribute: impl Into<String>,
        chains: &[&[&str]],
    ) -> Result<Self, HierarchyError> {
        let mut hierarchy = Self::new(attribute);
        for chain in chains {
            hierarchy.insert_chain(chain)?;
        }
        Ok(hierarchy)
    }

    /// Insert one leaf-to-root chain. The value at position `l` lives at
    /// level `l`; the last value is a root.
    pub(crate) fn insert_chain(&mut self, chain: &[&str]) -> Result<(), HierarchyError> {
        while self.levels.len() < chain.len() {
            self.levels.push(HashMap::new());
        }
        for (level, value) in chain.iter().enumerate() {
            let parent = chain.get(level + 1).map(|p| p.to_string());
            match self.levels[level].entry(value.to_string()) {
                Entry::Occupied(existing) => {
                    if existing.get() != &parent {
                        return Err(HierarchyError::ConflictingParent {
                            attribute: self.attribute.clone(),
                            value: value.to_string(),
                            level,
                        });
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(parent);
                }
            }
        }
        Ok(())
    }

    /// Whether `value` is a root at some level at or below `level`.
    fn is_trailing_root(&self, value: &str, level: usize) -> bool {
        self.levels
            .iter()
            .take(level.min(self.levels.len()))
            .any(|entries| matches!(entries.get(value), Some(None)))
    }
}

impl IHierarchy for Hierarchy {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn generalize(&self, value: &str, level: usize) -> Result<Generalized, HierarchyError> {
        match self.levels.get(level).and_then(|entries| entries.get(value)) {
            Some(Some(parent)) => Ok(Generalized::Value(parent.clone())),
            Some(None) => Ok(Generalized::Exhausted),
            None if self.is_trailing_root(value, level) => Ok(Generalized::Exhausted),
            None => Err(HierarchyError::UnknownValue {
                attribute: self.attribute.clone(),
                value: value.to_string(),
                level,
            }),
        }
    }

    fn height(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip_hierarchy() -> Hierarchy {
        Hierarchy::from_chains(
            "zip",
            &[
                &["94139", "9413*", "941**"],
                &["94132", "9413*", "941**"],
                &["94610", "9461*", "946**"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn generalizes_one_level_at_a_time() {
        let zip = zip_hierarchy();
        assert_eq!(
            zip.generalize("94139", 0).unwrap(),
            Generalized::Value("9413*".to_string())
        );
        assert_eq!(
            zip.generalize("9413*", 1).unwrap(),
            Generalized::Value("941**".to_string())
        );
    }

    #[test]
    fn root_is_exhausted_not_unknown() {
        let zip = zip_hierarchy();
        assert_eq!(zip.generalize("941**", 2).unwrap(), Generalized::Exhausted);
    }

    #[test]
    fn absent_value_is_unknown() {
        let zip = zip_hierarchy();
        let err = zip.generalize("10001", 0).unwrap_err();
        match err {
            HierarchyError::UnknownValue {
                attribute, value, ..
            } => {
                assert_eq!(attribute, "zip");
                assert_eq!(value, "10001");
            }
            other => panic!("expected UnknownValue, got {other:?}"),
        }
    }

    #[test]
    fn conflicting_parent_is_rejected() {
        let err = Hierarchy::from_chains("zip", &[&["94139", "9413*"], &["94139", "941**"]])
            .unwrap_err();
        assert!(matches!(err, HierarchyError::ConflictingParent { .. }));
    }

    #[test]
    fn short_chain_root_stays_exhausted_at_higher_levels() {
        let mixed = Hierarchy::from_chains("age", &[&["21", "20-29", "*"], &["unknown"]]).unwrap();
        assert_eq!(
            mixed.generalize("unknown", 0).unwrap(),
            Generalized::Exhausted
        );
        // After other values climbed a level, the short root is still just a root.
        assert_eq!(
            mixed.generalize("unknown", 1).unwrap(),
            Generalized::Exhausted
        );
    }

    #[test]
    fn height_counts_steps_to_the_deepest_root() {
        assert_eq!(zip_hierarchy().height(), 2);
        assert_eq!(Hierarchy::from_chains("a", &[&["x"]]).unwrap().height(), 0);
        assert_eq!(Hierarchy::new("a").height(), 0);
    }

    #[test]
    fn shared_parents_are_not_conflicts() {
        let ok = Hierarchy::from_chains("age", &[&["21", "20-29"], &["22", "20-29"]]);
        assert!(ok.is_ok());
    }
}
