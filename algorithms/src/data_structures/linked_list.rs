//! Singly-linked list stored in an arena, so `next` links may form a cycle.
//!
//! Variables:
//!   nodes : Vec<Node<T>>      — arena, NodeId(i) addresses nodes[i]
//!   head  : Option<NodeId>    — first node, None if empty
//!   N     : usize             — number of nodes
//!
//! Equations:
//!   push_back(x):      nodes.push(x), old_tail.next = new        O(1)
//!   set_next(a, b):    nodes[a].next = b   (may close a cycle)    O(1)
//!   next(a)            = nodes[a].next

/// Handle to a node owned by a [`LinkedList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    val: T,
    next: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct LinkedList<T> {
    nodes: Vec<Node<T>>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// Append after the most recently pushed node.
    pub fn push_back(&mut self, val: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { val, next: None });
        match self.tail {
            Some(tail) => self.nodes[tail.0].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Repoint `from.next`. Pointing back at an earlier node closes a cycle.
    ///
    /// # Panics
    ///
    /// If `from` was not returned by this list's `push_back`. `to` is not
    /// checked here; a foreign handle panics when [`next`](Self::next) or
    /// [`value`](Self::value) is later called with it.
    pub fn set_next(&mut self, from: NodeId, to: Option<NodeId>) {
        self.nodes[from.0].next = to;
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// # Panics
    ///
    /// If `id` was not returned by this list's `push_back`.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next
    }

    /// # Panics
    ///
    /// If `id` was not returned by this list's `push_back`.
    pub fn value(&self, id: NodeId) -> &T {
        &self.nodes[id.0].val
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for x in iter {
            list.push_back(x);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_back_links_in_order() {
        let list: LinkedList<&str> = ["a", "b", "c"].into_iter().collect();
        let mut seen = Vec::new();
        let mut cur = list.head();
        while let Some(id) = cur {
            seen.push(*list.value(id));
            cur = list.next(id);
        }
        assert_eq!(seen, ["a", "b", "c"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn set_next_closes_a_cycle() {
        let mut list = LinkedList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        list.set_next(b, Some(a));
        assert_eq!(list.next(b), Some(a));
        assert_eq!(b.index(), 1);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn handle_from_a_longer_list_panics() {
        let longer: LinkedList<u8> = (0..5).collect();
        let shorter: LinkedList<u8> = (0..2).collect();
        let last = longer.head().map(|mut id| {
            while let Some(next) = longer.next(id) {
                id = next;
            }
            id
        });
        shorter.value(last.unwrap());
    }
}
