//! Floyd's tortoise-and-hare cycle detection.
//!
//! Variables:
//!   μ : index of the first node on the cycle (the entry)
//!   λ : cycle length
//!
//! Equations:
//!   phase 1: slow += 1, fast += 2 until slow == fast (meet) or fast runs off
//!   phase 2: a = head, b = meet; step both by 1; they meet at node μ
//!   time O(μ + λ), extra space O(1)

use crate::data_structures::linked_list::{LinkedList, NodeId};

/// Anything with a single outgoing `next` link per node.
pub trait Successor {
    type Node: Copy + Eq;

    fn successor(&self, node: Self::Node) -> Option<Self::Node>;
}

impl<T> Successor for LinkedList<T> {
    type Node = NodeId;

    fn successor(&self, node: NodeId) -> Option<NodeId> {
        self.next(node)
    }
}

/// Successor table: `next[i]` is the node after `i`. Out-of-range targets end the walk.
impl Successor for [Option<usize>] {
    type Node = usize;

    fn successor(&self, node: usize) -> Option<usize> {
        self.get(node).copied().flatten()
    }
}

/// Entry node of the cycle reachable from `head`, or `None` if the walk terminates.
pub fn detect_cycle<S>(list: &S, head: Option<S::Node>) -> Option<S::Node>
where
    S: Successor + ?Sized,
{
    let head = head?;
    let (mut slow, mut fast) = (head, head);
    let meet = loop {
        fast = list.successor(list.successor(fast)?)?;
        slow = list.successor(slow)?;
        if slow == fast {
            break slow;
        }
    };

    let (mut a, mut b) = (head, meet);
    while a != b {
        a = list.successor(a)?;
        b = list.successor(b)?;
    }
    tracing::trace!("cycle entry located");
    Some(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with_back_edge(n: usize, back_to: Option<usize>) -> (LinkedList<usize>, Vec<NodeId>) {
        let mut list = LinkedList::new();
        let ids: Vec<NodeId> = (0..n).map(|i| list.push_back(i)).collect();
        if let Some(j) = back_to {
            list.set_next(ids[n - 1], Some(ids[j]));
        }
        (list, ids)
    }

    #[test]
    fn acyclic_lists_have_no_entry() {
        let (list, _) = list_with_back_edge(5, None);
        assert_eq!(detect_cycle(&list, list.head()), None);

        let empty: LinkedList<u8> = LinkedList::new();
        assert_eq!(detect_cycle(&empty, empty.head()), None);

        let (single, _) = list_with_back_edge(1, None);
        assert_eq!(detect_cycle(&single, single.head()), None);
    }

    #[test]
    fn finds_entry_for_every_back_edge() {
        for n in 1..12 {
            for j in 0..n {
                let (list, ids) = list_with_back_edge(n, Some(j));
                assert_eq!(detect_cycle(&list, list.head()), Some(ids[j]), "n = {n}, j = {j}");
            }
        }
    }

    #[test]
    fn self_loop_on_head() {
        let (list, ids) = list_with_back_edge(1, Some(0));
        assert_eq!(detect_cycle(&list, list.head()), Some(ids[0]));
    }

    #[test]
    fn successor_tables() {
        // 0 -> 1 -> 2 -> 3 -> 4 -> 2
        let next = [Some(1), Some(2), Some(3), Some(4), Some(2)];
        assert_eq!(detect_cycle(&next[..], Some(0)), Some(2));

        let chain = [Some(1), Some(2), None];
        assert_eq!(detect_cycle(&chain[..], Some(0)), None);
    }
}
