//! # Fixed-Height Merkle Tree
//!
//! Commits to an ordered list of credential leaves.
//!
//! ## Algorithm
//!
//! - Leaf hash: `Hash2(FE(label), FE(value))`.
//! - The leaf level is padded with the zero element up to
//!   [`MERKLE_TREE_CAPACITY`] entries.
//! - Parent: `Hash2(left, right)`, level by level, up to a single root after
//!   [`MERKLE_TREE_HEIGHT`] levels.
//!
//! The height is a compile-time constant so every tree has the same shape
//! and every inclusion path has the same length, which is what a
//! fixed-arity circuit needs.
//!
//! Construction fails on the first leaf that cannot be encoded; no partial
//! tree is ever returned.

use serde::{Deserialize, Serialize};
use zkc_core::{FieldElement, Leaf};

use crate::codec::{label_to_field_element, to_field_element};
use crate::error::CryptoError;
use crate::poseidon::hash2;

/// Number of levels above the leaves.
pub const MERKLE_TREE_HEIGHT: usize = 5;

/// Maximum number of leaves a tree can commit to.
pub const MERKLE_TREE_CAPACITY: usize = 1 << MERKLE_TREE_HEIGHT;

/// `Hash2(FE(label), FE(value))`.
pub fn leaf_hash(leaf: &Leaf) -> Result<FieldElement, CryptoError> {
    let label = label_to_field_element(&leaf.label)?;
    let value = to_field_element(&leaf.value)?;
    hash2(&label, &value)
}

/// A fully built tree. Levels run from the padded leaf level (index 0) to
/// the root (index `MERKLE_TREE_HEIGHT`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    leaf_count: usize,
    levels: Vec<Vec<FieldElement>>,
}

impl MerkleTree {
    /// Hash the leaves in order and build every level.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::TreeCapacityExceeded`] above [`MERKLE_TREE_CAPACITY`] leaves.
    /// - The codec's error for the first unconvertible leaf.
    /// - [`CryptoError::HashFinalization`] if Poseidon fails.
    pub fn build(leaves: &[Leaf]) -> Result<Self, CryptoError> {
        if leaves.len() > MERKLE_TREE_CAPACITY {
            return Err(CryptoError::TreeCapacityExceeded {
                leaves: leaves.len(),
                capacity: MERKLE_TREE_CAPACITY,
            });
        }

        let mut level = leaves
            .iter()
            .map(leaf_hash)
            .collect::<Result<Vec<_>, _>>()?;
        level.resize(MERKLE_TREE_CAPACITY, FieldElement::zero());

        let mut levels = Vec::with_capacity(MERKLE_TREE_HEIGHT + 1);
        while level.len() > 1 {
            let next = level
                .chunks(2)
                .map(|pair| hash2(&pair[0], &pair[1]))
                .collect::<Result<Vec<_>, _>>()?;
            levels.push(level);
            level = next;
        }
        levels.push(level);

        tracing::trace!(leaves = leaves.len(), "merkle tree built");
        Ok(Self {
            leaf_count: leaves.len(),
            levels,
        })
    }

    /// The root commitment.
    pub fn root(&self) -> FieldElement {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or_default()
    }

    /// Number of real (non-padding) leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Hashes of the real leaves, in order.
    pub fn leaf_hashes(&self) -> &[FieldElement] {
        &self.levels[0][..self.leaf_count]
    }

    /// Inclusion path for the leaf at `index`.
    pub fn path(&self, index: usize) -> Result<MerklePath, CryptoError> {
        if index >= self.leaf_count {
            return Err(CryptoError::LeafIndexOutOfRange {
                index,
                leaves: self.leaf_count,
            });
        }
        let mut pos = index;
        let mut steps = Vec::with_capacity(MERKLE_TREE_HEIGHT);
        for level in &self.levels[..MERKLE_TREE_HEIGHT] {
            let sibling_pos = pos ^ 1;
            let side = if sibling_pos < pos { Side::Left } else { Side::Right };
            steps.push(PathStep {
                side,
                sibling: level[sibling_pos],
            });
            pos /= 2;
        }
        Ok(MerklePath { index, steps })
    }
}

/// Which side the sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Sibling is the left child; the running hash is the right one.
    Left,
    /// Sibling is the right child.
    Right,
}

/// One level of an inclusion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// Sibling position.
    pub side: Side,
    /// Sibling hash.
    pub sibling: FieldElement,
}

/// Inclusion path from a leaf to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePath {
    /// Leaf position.
    pub index: usize,
    /// One step per level, leaf level first.
    pub steps: Vec<PathStep>,
}

impl MerklePath {
    /// Fold the path over `leaf` and return the implied root.
    pub fn compute_root(&self, leaf: &FieldElement) -> Result<FieldElement, CryptoError> {
        if self.steps.len() != MERKLE_TREE_HEIGHT {
            return Err(CryptoError::MalformedPath {
                actual: self.steps.len(),
                expected: MERKLE_TREE_HEIGHT,
            });
        }
        self.steps.iter().try_fold(*leaf, |cur, step| match step.side {
            Side::Left => hash2(&step.sibling, &cur),
            Side::Right => hash2(&cur, &step.sibling),
        })
    }

    /// True if the path leads from `leaf` to `root`.
    pub fn verify(&self, leaf: &FieldElement, root: &FieldElement) -> Result<bool, CryptoError> {
        Ok(self.compute_root(leaf)? == *root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkc_core::{AttributeValue, ErrorKind};

    fn sample() -> Vec<Leaf> {
        vec![
            Leaf::new("id", "did:example:holder"),
            Leaf::new("name", "Alice"),
            Leaf::new("birthYear", 1994u32),
            Leaf::new("birthMonth", 7u32),
            Leaf::new("birthDay", 4u32),
        ]
    }

    #[test]
    fn build_is_deterministic() {
        let a = MerkleTree::build(&sample()).unwrap();
        let b = MerkleTree::build(&sample()).unwrap();
        assert_eq!(a.root(), b.root());
        assert_eq!(a.leaf_count(), 5);
        assert_eq!(a.leaf_hashes().len(), 5);
    }

    #[test]
    fn empty_tree_root_is_all_padding() {
        let tree = MerkleTree::build(&[]).unwrap();
        let mut node = FieldElement::zero();
        for _ in 0..MERKLE_TREE_HEIGHT {
            node = hash2(&node, &node).unwrap();
        }
        assert_eq!(tree.root(), node);
    }

    #[test]
    fn capacity_is_enforced() {
        let full: Vec<Leaf> = (0..MERKLE_TREE_CAPACITY as i64).map(|i| Leaf::new("n", i)).collect();
        assert!(MerkleTree::build(&full).is_ok());

        let mut over = full;
        over.push(Leaf::new("n", 0i64));
        match MerkleTree::build(&over) {
            Err(CryptoError::TreeCapacityExceeded { leaves, capacity }) => {
                assert_eq!(leaves, MERKLE_TREE_CAPACITY + 1);
                assert_eq!(capacity, MERKLE_TREE_CAPACITY);
            }
            other => panic!("expected TreeCapacityExceeded, got {other:?}"),
        }
    }

    #[test]
    fn float_leaf_fails_whole_build() {
        let mut leaves = sample();
        leaves.push(Leaf::new("height", AttributeValue::Float(1.82)));
        let err = MerkleTree::build(&leaves).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFieldType);
    }

    #[test]
    fn every_path_reaches_the_root() {
        let tree = MerkleTree::build(&sample()).unwrap();
        for (i, leaf) in tree.leaf_hashes().iter().enumerate() {
            let path = tree.path(i).unwrap();
            assert_eq!(path.steps.len(), MERKLE_TREE_HEIGHT);
            assert!(path.verify(leaf, &tree.root()).unwrap());
        }
    }

    #[test]
    fn path_rejects_wrong_leaf_and_bad_index() {
        let tree = MerkleTree::build(&sample()).unwrap();
        let path = tree.path(2).unwrap();
        let wrong = leaf_hash(&Leaf::new("birthYear", 2010u32)).unwrap();
        assert!(!path.verify(&wrong, &tree.root()).unwrap());
        assert!(tree.path(5).is_err());
    }

    #[test]
    fn truncated_path_is_malformed() {
        let tree = MerkleTree::build(&sample()).unwrap();
        let mut path = tree.path(0).unwrap();
        path.steps.pop();
        let err = path.compute_root(&tree.leaf_hashes()[0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MapperValidationFailure);
    }

    #[test]
    fn reordering_leaves_changes_the_root() {
        let forward = vec![Leaf::new("name", "Alice"), Leaf::new("age", 30i64)];
        let reversed: Vec<Leaf> = forward.iter().rev().cloned().collect();

        let a = MerkleTree::build(&forward).unwrap();
        let b = MerkleTree::build(&reversed).unwrap();
        assert_ne!(a.root(), b.root());
        assert_eq!(a.root(), MerkleTree::build(&forward).unwrap().root());
        assert_eq!(b.root(), MerkleTree::build(&reversed).unwrap().root());
    }

    #[test]
    fn same_label_different_type_changes_the_root() {
        let roots: Vec<FieldElement> = [
            AttributeValue::Integer(0),
            AttributeValue::Boolean(false),
            AttributeValue::from(""),
        ]
        .into_iter()
        .map(|value| MerkleTree::build(&[Leaf::new("flag", value)]).unwrap().root())
        .collect();
        assert_ne!(roots[0], roots[1]);
        assert_ne!(roots[0], roots[2]);
        assert_ne!(roots[1], roots[2]);

        let one = MerkleTree::build(&[Leaf::new("flag", 1i64)]).unwrap();
        let yes = MerkleTree::build(&[Leaf::new("flag", true)]).unwrap();
        assert_ne!(one.root(), yes.root());
    }

    #[test]
    fn path_serde_uses_lowercase_sides() {
        let tree = MerkleTree::build(&sample()).unwrap();
        let json = serde_json::to_string(&tree.path(1).unwrap()).unwrap();
        assert!(json.contains("\"left\""));
        let back: MerklePath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree.path(1).unwrap());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use zkc_core::AttributeValue;

    fn value() -> impl Strategy<Value = AttributeValue> {
        prop_oneof![
            any::<i64>().prop_map(AttributeValue::Integer),
            any::<bool>().prop_map(AttributeValue::Boolean),
            "[a-zA-Z0-9 ]{0,48}".prop_map(AttributeValue::String),
        ]
    }

    fn leaves() -> impl Strategy<Value = Vec<Leaf>> {
        prop::collection::vec(("[a-z]{1,10}", value()), 1..8).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(label, value)| Leaf { label, value })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Changing any single value changes the root.
        #[test]
        fn root_sensitive_to_values(leaves in leaves(), idx in any::<prop::sample::Index>(), replacement in value()) {
            let i = idx.index(leaves.len());
            prop_assume!(leaves[i].value != replacement);
            let mut changed = leaves.clone();
            changed[i].value = replacement;
            prop_assert_ne!(
                MerkleTree::build(&leaves).unwrap().root(),
                MerkleTree::build(&changed).unwrap().root()
            );
        }

        /// Swapping two distinct leaves changes the root.
        #[test]
        fn root_sensitive_to_order(leaves in leaves(), a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>()) {
            let (i, j) = (a.index(leaves.len()), b.index(leaves.len()));
            prop_assume!(leaves[i] != leaves[j]);
            let mut swapped = leaves.clone();
            swapped.swap(i, j);
            prop_assert_ne!(
                MerkleTree::build(&leaves).unwrap().root(),
                MerkleTree::build(&swapped).unwrap().root()
            );
        }
    }
}
