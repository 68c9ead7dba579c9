//! Columnar storage for generated events
//!
//! An event tree maps branch names to columns of scalars, one entry per
//! generated event. All mutation is append-only: branches are registered up
//! front, then fill passes append one value to every branch. A tree observed
//! with ragged columns outside a fill pass is a programming error and brings
//! the process down rather than silently padding.

use crate::{
    error::{Error, Result},
    numeric::Float,
};

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use std::fmt::Display;

/// One named column of the tree
struct Branch {
    /// Branch name, e.g. "Bplus_PT"
    name: String,

    /// One value per generated event
    values: Vec<Float>,
}

/// Append-only columnar event store
pub struct EventTree {
    /// Tree name, used when persisting to disk
    name: String,

    /// Columns, in registration order
    branches: Vec<Branch>,

    /// Truth that at least one value has been filled
    filled: bool,
}
//
impl EventTree {
    // ### CONSTRUCTION ###

    /// Create an empty tree
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            branches: Vec::new(),
            filled: false,
        }
    }

    /// Register a new empty branch
    ///
    /// Branches can only be added before the first fill: the column-length
    /// invariant could not hold for a branch registered mid-run.
    ///
    pub fn add_branch(&mut self, name: &str) -> Result<()> {
        if self.filled {
            return Err(Error::BranchAfterFill(name.to_owned()));
        }
        if self.branches.iter().any(|b| b.name == name) {
            return Err(Error::DuplicateBranch(name.to_owned()));
        }
        self.branches.push(Branch {
            name: name.to_owned(),
            values: Vec::new(),
        });
        Ok(())
    }

    // ### FILLING ###

    /// Append one value to a branch
    pub fn fill(&mut self, branch: &str, value: Float) -> Result<()> {
        let branch = self
            .branches
            .iter_mut()
            .find(|b| b.name == branch)
            .ok_or_else(|| Error::UnknownBranch(branch.to_owned()))?;
        branch.values.push(value);
        self.filled = true;
        Ok(())
    }

    /// Concatenate another tree's columns onto this one
    ///
    /// Both trees must have identical branch layouts. The scheduling layer
    /// uses this to merge per-batch partial trees in batch order, which keeps
    /// the column-length invariant as long as each input honors it.
    ///
    pub fn merge(&mut self, other: EventTree) {
        self.check_columns();
        other.check_columns();
        assert_eq!(
            self.branches.len(),
            other.branches.len(),
            "Merged trees must have the same branch layout"
        );
        for (dst, src) in self.branches.iter_mut().zip(other.branches) {
            assert_eq!(
                dst.name, src.name,
                "Merged trees must have the same branch layout"
            );
            dst.values.extend(src.values);
        }
        self.filled |= other.filled;
    }

    // ### QUERIES ###

    /// Tree name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Branch names, in registration order
    pub fn branch_names(&self) -> impl Iterator<Item = &str> {
        self.branches.iter().map(|b| b.name.as_str())
    }

    /// Number of registered branches
    pub fn num_branches(&self) -> usize {
        self.branches.len()
    }

    /// Common entry count of all branches, or None if nothing was filled yet
    pub fn entry_count(&self) -> Option<usize> {
        self.check_columns();
        self.branches
            .first()
            .map(|b| b.values.len())
            .filter(|&n| n > 0)
    }

    /// Read back the i-th entry of every branch
    pub fn entry(&self, index: usize) -> Result<TreeEntry> {
        let entries = self.entry_count().unwrap_or(0);
        if index >= entries {
            return Err(Error::EntryOutOfRange { index, entries });
        }
        Ok(TreeEntry {
            values: self
                .branches
                .iter()
                .map(|b| (b.name.as_str(), b.values[index]))
                .collect(),
        })
    }

    /// Read back a whole column
    pub fn column(&self, branch: &str) -> Result<&[Float]> {
        self.branches
            .iter()
            .find(|b| b.name == branch)
            .map(|b| b.values.as_slice())
            .ok_or_else(|| Error::UnknownBranch(branch.to_owned()))
    }

    /// Enforce the column-length invariant
    ///
    /// Only meaningful between fill passes; the generator never exposes a
    /// tree in the middle of one.
    ///
    fn check_columns(&self) {
        if let Some(first) = self.branches.first() {
            for branch in &self.branches[1..] {
                assert_eq!(
                    branch.values.len(),
                    first.values.len(),
                    "Branch '{}' is ragged with respect to '{}'",
                    branch.name,
                    first.name,
                );
            }
        }
    }
}

/// Read-only view of one entry across all branches
pub struct TreeEntry<'tree> {
    /// Branch name / value pairs, in branch registration order
    values: Vec<(&'tree str, Float)>,
}
//
impl TreeEntry<'_> {
    /// Value of the given branch in this entry
    pub fn get(&self, branch: &str) -> Option<Float> {
        self.values
            .iter()
            .find(|(name, _)| *name == branch)
            .map(|(_, value)| *value)
    }

    /// Iterate over the (branch, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, Float)> + '_ {
        self.values.iter().copied()
    }
}

impl Display for EventTree {
    /// Summarize the tree the way the original generator printed it
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(fmt, "====================================")?;
        writeln!(fmt, "  DataTree : {}", self.name)?;
        match self.entry_count() {
            Some(n) => writeln!(fmt, "  Entries  : {n}")?,
            None => writeln!(fmt, "  Entries  : (empty)")?,
        }
        writeln!(fmt, "====================================")?;
        for branch in &self.branches {
            writeln!(fmt, " {}       {}", branch.name, branch.values.len())?;
        }
        Ok(())
    }
}

impl Serialize for EventTree {
    /// Persist as { name, entries, branches: { name: column } }
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        /// Branch list rendered as an ordered name -> column map
        struct Columns<'tree>(&'tree [Branch]);
        //
        impl Serialize for Columns<'_> {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for branch in self.0 {
                    map.serialize_entry(&branch.name, &branch.values)?;
                }
                map.end()
            }
        }

        let mut tree = serializer.serialize_struct("EventTree", 3)?;
        tree.serialize_field("name", &self.name)?;
        tree.serialize_field("entries", &self.entry_count().unwrap_or(0))?;
        tree.serialize_field("branches", &Columns(&self.branches))?;
        tree.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_branch_tree() -> EventTree {
        let mut tree = EventTree::new("TestTree");
        tree.add_branch("a").unwrap();
        tree.add_branch("b").unwrap();
        tree
    }

    #[test]
    fn empty_tree_has_no_entries() {
        let tree = two_branch_tree();
        assert_eq!(tree.entry_count(), None);
        assert!(matches!(
            tree.entry(0),
            Err(Error::EntryOutOfRange {
                index: 0,
                entries: 0
            })
        ));
    }

    #[test]
    fn fill_appends_to_the_right_column() {
        let mut tree = two_branch_tree();
        tree.fill("a", 1.).unwrap();
        tree.fill("b", 2.).unwrap();
        tree.fill("a", 3.).unwrap();
        tree.fill("b", 4.).unwrap();
        assert_eq!(tree.entry_count(), Some(2));
        assert_eq!(tree.column("a").unwrap(), [1., 3.]);
        let entry = tree.entry(1).unwrap();
        assert_eq!(entry.get("a"), Some(3.));
        assert_eq!(entry.get("b"), Some(4.));
        assert_eq!(entry.get("c"), None);
    }

    #[test]
    fn branches_are_frozen_after_first_fill() {
        let mut tree = two_branch_tree();
        tree.fill("a", 1.).unwrap();
        assert!(matches!(
            tree.add_branch("c"),
            Err(Error::BranchAfterFill(_))
        ));
    }

    #[test]
    fn duplicate_and_unknown_branches_are_errors() {
        let mut tree = two_branch_tree();
        assert!(matches!(
            tree.add_branch("a"),
            Err(Error::DuplicateBranch(_))
        ));
        assert!(matches!(tree.fill("z", 0.), Err(Error::UnknownBranch(_))));
    }

    #[test]
    #[should_panic(expected = "ragged")]
    fn ragged_trees_fail_fast() {
        let mut tree = two_branch_tree();
        tree.fill("a", 1.).unwrap();
        let _ = tree.entry_count();
    }

    #[test]
    fn merge_concatenates_in_order() {
        let mut left = two_branch_tree();
        left.fill("a", 1.).unwrap();
        left.fill("b", 2.).unwrap();
        let mut right = two_branch_tree();
        right.fill("a", 3.).unwrap();
        right.fill("b", 4.).unwrap();
        left.merge(right);
        assert_eq!(tree_col(&left, "a"), [1., 3.]);
        assert_eq!(tree_col(&left, "b"), [2., 4.]);
    }

    #[test]
    fn merge_into_an_unfilled_tree_preserves_layout() {
        let mut empty = two_branch_tree();
        let mut part = two_branch_tree();
        part.fill("a", 1.).unwrap();
        part.fill("b", 2.).unwrap();
        empty.merge(part);
        assert_eq!(empty.entry_count(), Some(1));
    }

    #[test]
    fn serializes_with_branch_order_preserved() {
        let mut tree = two_branch_tree();
        tree.fill("a", 1.).unwrap();
        tree.fill("b", 2.).unwrap();
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["name"], "TestTree");
        assert_eq!(json["entries"], 1);
        assert_eq!(json["branches"]["a"][0], 1.);
        assert_eq!(json["branches"]["b"][0], 2.);
    }

    fn tree_col(tree: &EventTree, name: &str) -> Vec<Float> {
        tree.column(name).unwrap().to_vec()
    }
}
