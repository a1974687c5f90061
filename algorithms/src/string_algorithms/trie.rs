//! Prefix tree over `char`s.
//!
//! Variables:
//!   root            : TrieNode  — spells the empty prefix
//!   node.children   : BTreeMap<char, TrieNode>
//!   node.is_word    : bool      — the path to this node was inserted as a word
//!   size            : usize     — node count including the root (>= 1)
//!
//! Equations:
//!   insert(w):     walk/create one node per char, mark last    O(|w| log σ)
//!   find(w):       path exists  ∧ last.is_word                 O(|w| log σ)
//!   is_prefix(p):  path exists                                 O(|p| log σ)
//!   clear():       root = TrieNode::default(), size = 1        O(1)

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    is_word: bool,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trie {
    root: TrieNode,
    size: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            root: TrieNode::default(),
            size: 1,
        }
    }

    pub fn insert(&mut self, word: &str) {
        let mut created = 0;
        let mut cur = &mut self.root;
        for c in word.chars() {
            cur = cur.children.entry(c).or_insert_with(|| {
                created += 1;
                TrieNode::default()
            });
        }
        cur.is_word = true;
        self.size += created;
        tracing::trace!(word, created, "trie insert");
    }

    pub fn find(&self, word: &str) -> bool {
        self.walk(word).is_some_and(|node| node.is_word)
    }

    pub fn is_prefix(&self, prefix: &str) -> bool {
        self.walk(prefix).is_some()
    }

    /// Drop every node and start over with a single root.
    pub fn clear(&mut self) {
        tracing::debug!(nodes = self.size, "trie cleared");
        self.root = TrieNode::default();
        self.size = 1;
    }

    /// Number of nodes, counting the root.
    pub fn size(&self) -> usize {
        self.size
    }

    /// True when no word has been inserted since construction or the last clear.
    pub fn is_empty(&self) -> bool {
        self.size == 1 && !self.root.is_word
    }

    fn walk(&self, path: &str) -> Option<&TrieNode> {
        path.chars()
            .try_fold(&self.root, |node, c| node.children.get(&c))
    }
}

impl<'a> Extend<&'a str> for Trie {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, words: I) {
        for w in words {
            self.insert(w);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_and_prefixes() {
        let mut trie = Trie::new();
        trie.insert("apple");
        trie.insert("app");

        assert!(trie.find("apple"));
        assert!(trie.find("app"));
        assert!(!trie.find("ap"));
        assert!(trie.is_prefix("ap"));
        assert!(trie.is_prefix("apple"));
        assert!(!trie.is_prefix("apples"));
        assert!(!trie.find("banana"));
    }

    #[test]
    fn size_counts_only_new_nodes() {
        let mut trie = Trie::new();
        assert_eq!(trie.size(), 1);
        trie.insert("car");
        assert_eq!(trie.size(), 4);
        trie.insert("cart");
        assert_eq!(trie.size(), 5);
        trie.insert("car");
        assert_eq!(trie.size(), 5);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut trie = Trie::new();
        trie.extend(["one", "two", "three"]);
        trie.clear();
        assert_eq!(trie.size(), 1);
        assert!(trie.is_empty());
        for w in ["one", "two", "three"] {
            assert!(!trie.find(w));
            assert!(!trie.is_prefix(&w[..1]));
        }
    }

    #[test]
    fn empty_string_is_a_prefix_but_only_a_word_once_inserted() {
        let mut trie = Trie::new();
        assert!(trie.is_prefix(""));
        assert!(!trie.find(""));
        trie.insert("");
        assert!(trie.find(""));
        assert!(!trie.is_empty());
        assert_eq!(trie.size(), 1);
    }

    #[test]
    fn multibyte_characters_are_single_edges() {
        let mut trie = Trie::new();
        trie.insert("héllo");
        assert_eq!(trie.size(), 6);
        assert!(trie.is_prefix("hé"));
    }
}
