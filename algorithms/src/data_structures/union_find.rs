//! Disjoint-set forest keyed by arbitrary hashable elements.
//!
//! Variables:
//!   index     : HashMap<T, usize>  — element -> dense slot
//!   elements  : Vec<T>             — slot -> element
//!   parent[i] : usize              — parent slot, parent[i] == i at a root
//!   rank[i]   : u32                — upper bound on the height below root i
//!
//! Equations:
//!   find(i):      follow parent to root r, then parent[j] = r along the path
//!   union(x, y):  rx = find(x), ry = find(y)
//!                 rx == ry                -> false
//!                 rank[rx] > rank[ry]     -> parent[ry] = rx
//!                 rank[rx] < rank[ry]     -> parent[rx] = ry
//!                 otherwise               -> parent[ry] = rx, rank[rx] += 1
//!   amortised cost per operation: O(α(N))

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{AlgorithmError, Result};

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "UnionFindParts<T>",
        bound(
            serialize = "T: Serialize",
            deserialize = "T: Deserialize<'de> + Eq + Hash + Clone + Debug"
        )
    )
)]
pub struct UnionFind<T> {
    // Rebuilt from `elements` on load.
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    index: HashMap<T, usize>,
    elements: Vec<T>,
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl<T: Eq + Hash + Clone + Debug> UnionFind<T> {
    /// Every element of `universe` starts as its own singleton set.
    pub fn new<I: IntoIterator<Item = T>>(universe: I) -> Self {
        let mut uf = Self {
            index: HashMap::new(),
            elements: Vec::new(),
            parent: Vec::new(),
            rank: Vec::new(),
        };
        for x in universe {
            uf.make_set(x);
        }
        tracing::debug!(elements = uf.len(), "union-find created");
        uf
    }

    /// Number of tracked elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, x: &T) -> bool {
        self.index.contains_key(x)
    }

    /// Number of disjoint sets currently tracked.
    pub fn set_count(&self) -> usize {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i == p)
            .count()
    }

    /// Make `x` a root of rank 0.
    ///
    /// An element that is already tracked is reset in place: it stops pointing
    /// at its old representative, and anything that reached the old set
    /// through `x` now resolves to `x` instead.
    pub fn make_set(&mut self, x: T) {
        match self.index.get(&x) {
            Some(&i) => {
                tracing::trace!(element = ?x, "union-find element reset");
                self.parent[i] = i;
                self.rank[i] = 0;
            }
            None => {
                let i = self.elements.len();
                self.index.insert(x.clone(), i);
                self.elements.push(x);
                self.parent.push(i);
                self.rank.push(0);
            }
        }
    }

    /// Representative of the set containing `x`.
    pub fn find(&mut self, x: &T) -> Result<&T> {
        let slot = self.slot(x)?;
        let root = self.find_root(slot);
        Ok(&self.elements[root])
    }

    /// Merge the sets holding `x` and `y`; false if they were already one set.
    pub fn union(&mut self, x: &T, y: &T) -> Result<bool> {
        let (sx, sy) = (self.slot(x)?, self.slot(y)?);
        let (rx, ry) = (self.find_root(sx), self.find_root(sy));
        if rx == ry {
            return Ok(false);
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
        tracing::trace!(x = ?x, y = ?y, "union-find merged");
        Ok(true)
    }

    pub fn is_connected(&mut self, x: &T, y: &T) -> Result<bool> {
        let (sx, sy) = (self.slot(x)?, self.slot(y)?);
        Ok(self.find_root(sx) == self.find_root(sy))
    }

    fn slot(&self, x: &T) -> Result<usize> {
        self.index.get(x).copied().ok_or_else(|| {
            tracing::debug!(element = ?x, "union-find lookup of untracked element");
            AlgorithmError::NotFound(format!("{x:?}"))
        })
    }

    // Two passes instead of recursion: locate the root, then repoint the path.
    fn find_root(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = slot;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }
}

/// Serialized form of [`UnionFind`], validated before use.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct UnionFindParts<T> {
    elements: Vec<T>,
    parent: Vec<usize>,
    rank: Vec<u32>,
}

#[cfg(feature = "serde")]
impl<T: Eq + Hash + Clone + Debug> TryFrom<UnionFindParts<T>> for UnionFind<T> {
    type Error = AlgorithmError;

    fn try_from(parts: UnionFindParts<T>) -> Result<Self> {
        let UnionFindParts { elements, parent, rank } = parts;
        let n = elements.len();
        if parent.len() != n || rank.len() != n {
            return Err(AlgorithmError::invalid_input(format!(
                "{n} elements but {} parents and {} ranks",
                parent.len(),
                rank.len()
            )));
        }
        if let Some(&p) = parent.iter().find(|&&p| p >= n) {
            return Err(AlgorithmError::invalid_input(format!(
                "parent slot {p} outside {n} elements"
            )));
        }

        // Every parent chain must end at a root: 0 = unseen, 1 = on the
        // current walk, 2 = known to reach a root.
        let mut state = vec![0u8; n];
        for start in 0..n {
            let mut walk = Vec::new();
            let mut cur = start;
            while state[cur] == 0 && parent[cur] != cur {
                state[cur] = 1;
                walk.push(cur);
                cur = parent[cur];
            }
            if state[cur] == 1 {
                return Err(AlgorithmError::invalid_input(format!(
                    "parent links of slot {start} loop without reaching a root"
                )));
            }
            state[cur] = 2;
            for slot in walk {
                state[slot] = 2;
            }
        }

        let mut index = HashMap::with_capacity(n);
        for (i, x) in elements.iter().enumerate() {
            if index.insert(x.clone(), i).is_some() {
                return Err(AlgorithmError::invalid_input(format!(
                    "element {x:?} appears twice"
                )));
            }
        }
        Ok(Self { index, elements, parent, rank })
    }
}

impl<T: Eq + Hash + Clone + Debug> FromIterator<T> for UnionFind<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_singletons() {
        let mut uf = UnionFind::new(["a", "b", "c"]);
        assert_eq!(uf.len(), 3);
        assert_eq!(uf.set_count(), 3);
        assert_eq!(uf.find(&"b"), Ok(&"b"));
        assert_eq!(uf.is_connected(&"a", &"a"), Ok(true));
        assert_eq!(uf.is_connected(&"a", &"b"), Ok(false));
    }

    #[test]
    fn union_connects_and_second_union_is_a_no_op() {
        let mut uf: UnionFind<u32> = (0..6).collect();
        assert_eq!(uf.union(&0, &1), Ok(true));
        assert_eq!(uf.union(&2, &3), Ok(true));
        assert_eq!(uf.union(&1, &3), Ok(true));
        assert_eq!(uf.is_connected(&0, &2), Ok(true));
        assert_eq!(uf.set_count(), 3);

        let snapshot = (uf.parent.clone(), uf.rank.clone());
        assert_eq!(uf.union(&3, &0), Ok(false));
        assert_eq!((uf.parent.clone(), uf.rank.clone()), snapshot);
    }

    #[test]
    fn tie_goes_under_first_root_and_bumps_rank() {
        let mut uf = UnionFind::new([10, 20]);
        uf.union(&10, &20).unwrap();
        assert_eq!(uf.find(&20), Ok(&10));
        assert_eq!(uf.rank[0], 1);
        assert_eq!(uf.rank[1], 0);
    }

    #[test]
    fn lower_rank_root_goes_under_higher() {
        let mut uf = UnionFind::new(['a', 'b', 'c']);
        uf.union(&'a', &'b').unwrap();
        // 'c' has rank 0, 'a' has rank 1: 'c' is attached below 'a'.
        uf.union(&'c', &'a').unwrap();
        assert_eq!(uf.find(&'c'), Ok(&'a'));
        assert_eq!(uf.rank[0], 1);
    }

    #[test]
    fn find_compresses_paths() {
        let mut uf = UnionFind::new(0..4);
        // Hand-built chain 3 -> 2 -> 1 -> 0.
        uf.parent = vec![0, 0, 1, 2];
        assert_eq!(uf.find(&3), Ok(&0));
        assert_eq!(uf.parent, vec![0, 0, 0, 0]);
    }

    #[test]
    fn untracked_elements_are_not_created() {
        let mut uf = UnionFind::new(["x"]);
        assert_eq!(uf.find(&"y"), Err(AlgorithmError::NotFound("\"y\"".into())));
        assert!(uf.union(&"x", &"y").is_err());
        assert!(uf.is_connected(&"y", &"x").is_err());
        assert!(!uf.contains(&"y"));
        assert_eq!(uf.len(), 1);
    }

    #[test]
    fn make_set_adds_and_resets() {
        let mut uf = UnionFind::new([1, 2]);
        uf.make_set(3);
        assert_eq!(uf.len(), 3);

        uf.union(&1, &2).unwrap();
        assert_eq!(uf.is_connected(&1, &2), Ok(true));
        uf.make_set(2);
        assert_eq!(uf.is_connected(&1, &2), Ok(false));
        assert_eq!(uf.find(&2), Ok(&2));
        assert_eq!(uf.len(), 3);
    }
}
