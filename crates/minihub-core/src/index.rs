//! Ordered key index backing the existence checks of the store.

use std::cmp::Ordering;
use std::fmt;

type Link = Option<Box<Node>>;

struct Node {
    key: String,
    left: Link,
    right: Link,
}

impl Node {
    const fn leaf(key: String) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }
}

// Children are left out: a derived impl would recurse once per level.
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("key", &self.key).finish_non_exhaustive()
    }
}

/// Unbalanced binary search tree over string keys.
///
/// The index tracks liveness: callers insert a key when the entity it names is
/// created and remove it again on delete, so [`contains`](Self::contains) never
/// reports a stale name. Lookups cost `O(depth)`; no rebalancing is performed,
/// which keeps the structure small at the price of linear depth for sorted
/// insertion orders. All walks are iterative so a degenerate tree cannot
/// exhaust the stack.
#[derive(Default)]
pub struct SearchIndex {
    root: Link,
    len: usize,
}

impl SearchIndex {
    /// Create an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of live keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `key`, returning `false` when it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *link = Some(Box::new(Node::leaf(key)));
        self.len += 1;
        true
    }

    /// Whether `key` is currently present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        let mut link = &self.root;
        while let Some(node) = link {
            link = match key.cmp(node.key.as_str()) {
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Remove `key`, returning `false` when it was not present.
    pub fn remove(&mut self, key: &str) -> bool {
        let mut link = &mut self.root;
        loop {
            let ord = match link.as_deref() {
                None => return false,
                Some(node) => key.cmp(node.key.as_str()),
            };
            match ord {
                Ordering::Equal => break,
                Ordering::Less => {
                    if let Some(node) = link {
                        link = &mut node.left;
                    }
                }
                Ordering::Greater => {
                    if let Some(node) = link {
                        link = &mut node.right;
                    }
                }
            }
        }

        let Some(mut node) = link.take() else {
            return false;
        };
        *link = match (node.left.take(), node.right.take()) {
            (Some(left), Some(right)) => {
                // Two children: the in-order successor takes the removed slot.
                let mut right = Some(right);
                if let Some(successor) = detach_min(&mut right) {
                    node.key = successor;
                }
                node.left = Some(left);
                node.right = right;
                Some(node)
            }
            (left, right) => left.or(right),
        };
        self.len -= 1;
        true
    }

    /// Length of the longest root-to-leaf path.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Node, usize)> = self.root.as_deref().map(|node| (node, 1)).into_iter().collect();
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                pending.push((child, level + 1));
            }
        }
        deepest
    }

    /// Iterate over keys in ascending order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Drop every key.
    pub fn clear(&mut self) {
        drain(self.root.take());
        self.len = 0;
    }
}

impl Clone for SearchIndex {
    /// Copies the tree node for node, keeping its shape.
    fn clone(&self) -> Self {
        // Post-order walk: a node is rebuilt once both of its children are.
        let mut pending: Vec<(&Node, bool)> = Vec::new();
        pending.extend(self.root.as_deref().map(|node| (node, false)));
        let mut built: Vec<Box<Node>> = Vec::new();
        while let Some((node, children_done)) = pending.pop() {
            if !children_done {
                pending.push((node, true));
                pending.extend(node.right.as_deref().map(|right| (right, false)));
                pending.extend(node.left.as_deref().map(|left| (left, false)));
                continue;
            }
            let right = if node.right.is_some() { built.pop() } else { None };
            let left = if node.left.is_some() { built.pop() } else { None };
            built.push(Box::new(Node {
                key: node.key.clone(),
                left,
                right,
            }));
        }
        Self {
            root: built.pop(),
            len: self.len,
        }
    }
}

impl fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Drop for SearchIndex {
    fn drop(&mut self) {
        drain(self.root.take());
    }
}

impl<'a> IntoIterator for &'a SearchIndex {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for SearchIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = Self::new();
        for key in iter {
            index.insert(key);
        }
        index
    }
}

/// In-order iterator over the keys of a [`SearchIndex`].
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(node.key.as_str())
    }
}

fn detach_min(link: &mut Link) -> Option<String> {
    let mut link = link;
    while link.as_ref().is_some_and(|node| node.left.is_some()) {
        if let Some(node) = link {
            link = &mut node.left;
        }
    }
    let node = link.take()?;
    let Node { key, right, .. } = *node;
    *link = right;
    Some(key)
}

// Unlinks children before each box is freed so dropping a list-shaped tree
// does not recurse once per level.
fn drain(root: Link) {
    let mut pending: Vec<Box<Node>> = root.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut index = SearchIndex::new();
        assert!(index.insert("proj"));
        assert!(!index.insert("proj"));
        assert_eq!(index.len(), 1);
        assert!(index.contains("proj"));
        assert!(!index.contains("other"));
    }

    #[test]
    fn iter_yields_lexicographic_order() {
        let index: SearchIndex = ["m", "c", "x", "a", "e", "z"].into_iter().collect();
        let keys: Vec<_> = index.iter().collect();
        assert_eq!(keys, vec!["a", "c", "e", "m", "x", "z"]);
    }

    #[test]
    fn remove_leaf_single_child_and_two_children() {
        let mut index: SearchIndex = ["m", "c", "x", "a", "e", "z", "d"].into_iter().collect();

        assert!(index.remove("a"));
        assert!(index.remove("x"));
        assert!(index.remove("c"));
        assert!(index.remove("m"));
        assert!(!index.remove("m"));

        let keys: Vec<_> = index.iter().collect();
        assert_eq!(keys, vec!["d", "e", "z"]);
        assert_eq!(index.len(), 3);
        for gone in ["a", "x", "c", "m"] {
            assert!(!index.contains(gone), "{gone} should be forgotten");
        }
    }

    #[test]
    fn removed_key_can_be_inserted_again() {
        let mut index = SearchIndex::new();
        index.insert("proj");
        assert!(index.remove("proj"));
        assert!(index.is_empty());
        assert!(index.insert("proj"));
        assert!(index.contains("proj"));
    }

    #[test]
    fn sorted_insertion_degrades_to_a_list() {
        let keys: Vec<String> = (0..10_000).map(|n| format!("{n:05}")).collect();
        let mut index: SearchIndex = keys.iter().cloned().collect();
        assert_eq!(index.depth(), 10_000);
        assert!(index.contains("09999"));
        assert!(index.remove("00000"));
        assert_eq!(index.len(), 9_999);
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.depth(), 0);
    }

    #[test]
    fn clone_of_a_list_shaped_index_keeps_keys_and_shape() {
        let index: SearchIndex = (0..10_000).map(|n| format!("{n:05}")).collect();
        let copy = index.clone();
        assert_eq!(copy.len(), 10_000);
        assert_eq!(copy.depth(), 10_000);
        assert!(copy.iter().eq(index.iter()));
        assert_eq!(format!("{copy:?}").matches('"').count(), 20_000);
    }

    #[test]
    fn clone_is_independent_of_the_source() {
        let mut index: SearchIndex = ["d", "b", "f", "a"].into_iter().collect();
        let copy = index.clone();
        index.remove("b");
        index.insert("z");
        assert_eq!(copy.iter().collect::<Vec<_>>(), vec!["a", "b", "d", "f"]);
        assert_eq!(copy.depth(), 3);
        assert_eq!(format!("{copy:?}"), r#"{"a", "b", "d", "f"}"#);
    }

    #[test]
    fn depth_of_balanced_insertion() {
        let index: SearchIndex = ["d", "b", "f", "a", "c", "e", "g"].into_iter().collect();
        assert_eq!(index.depth(), 3);
    }
}
