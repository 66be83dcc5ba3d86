//! Recency List Module
//!
//! Index-based doubly-linked list that orders cache keys by access time.
//! Nodes live in a slab of slots and refer to each other by index, so the
//! lookup map can hold plain `Handle`s instead of pointers into the list.

// == Handle ==
/// Opaque reference to a node in a [`RecencyList`].
///
/// A handle is valid until the node it points to is removed or evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle(usize);

#[derive(Debug)]
struct Node {
    key: String,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// - Head = most recently used
/// - Tail = least recently used
///
/// All operations are O(1).
#[derive(Debug, Default)]
pub struct RecencyList {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list with room for `capacity` keys before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Push Front ==
    /// Inserts `key` as the most recently used entry.
    pub fn push_front(&mut self, key: String) -> Handle {
        let node = Node {
            key,
            prev: None,
            next: self.head,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.node_mut(old_head).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;

        Handle(idx)
    }

    // == Move To Front ==
    /// Marks the entry behind `handle` as most recently used.
    pub fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle.0) {
            return;
        }
        self.unlink(handle.0);

        let old_head = self.head;
        {
            let node = self.node_mut(handle.0);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(handle.0),
            None => self.tail = Some(handle.0),
        }
        self.head = Some(handle.0);
    }

    // == Remove ==
    /// Removes the entry behind `handle` and returns its key.
    pub fn remove(&mut self, handle: Handle) -> Option<String> {
        self.slots.get(handle.0)?.as_ref()?;
        self.unlink(handle.0);
        let node = self.slots[handle.0].take()?;
        self.free.push(handle.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used key.
    pub fn pop_back(&mut self) -> Option<String> {
        let tail = self.tail?;
        self.remove(Handle(tail))
    }

    // == Peek Back ==
    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    pub(crate) fn peek_back(&self) -> Option<&str> {
        self.tail
            .and_then(|idx| self.slots[idx].as_ref())
            .map(|node| node.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.slots[cursor?].as_ref()?;
            cursor = node.next;
            Some(node.key.as_str())
        })
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node_mut(idx);
            (node.prev.take(), node.next.take())
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node {
        // Linked indices always point at occupied slots.
        match self.slots[idx].as_mut() {
            Some(node) => node,
            None => unreachable!("recency list link points at a free slot"),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &RecencyList) -> Vec<&str> {
        list.iter().collect()
    }

    #[test]
    fn test_list_new() {
        let list = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.peek_back(), None);
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = RecencyList::new();
        list.push_front("a".to_string());
        list.push_front("b".to_string());
        list.push_front("c".to_string());

        assert_eq!(keys(&list), vec!["c", "b", "a"]);
        assert_eq!(list.peek_back(), Some("a"));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new();
        let a = list.push_front("a".to_string());
        list.push_front("b".to_string());
        list.push_front("c".to_string());

        list.move_to_front(a);

        assert_eq!(keys(&list), vec!["a", "c", "b"]);
        assert_eq!(list.peek_back(), Some("b"));
    }

    #[test]
    fn test_move_head_to_front_is_noop() {
        let mut list = RecencyList::new();
        list.push_front("a".to_string());
        let b = list.push_front("b".to_string());

        list.move_to_front(b);

        assert_eq!(keys(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_move_tail_to_front_updates_tail() {
        let mut list = RecencyList::new();
        let a = list.push_front("a".to_string());
        list.push_front("b".to_string());

        list.move_to_front(a);

        assert_eq!(list.peek_back(), Some("b"));
        assert_eq!(keys(&list), vec!["a", "b"]);
    }

    #[test]
    fn test_pop_back_evicts_oldest() {
        let mut list = RecencyList::new();
        list.push_front("a".to_string());
        list.push_front("b".to_string());

        assert_eq!(list.pop_back(), Some("a".to_string()));
        assert_eq!(list.pop_back(), Some("b".to_string()));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_middle() {
        let mut list = RecencyList::new();
        list.push_front("a".to_string());
        let b = list.push_front("b".to_string());
        list.push_front("c".to_string());

        assert_eq!(list.remove(b), Some("b".to_string()));
        assert_eq!(keys(&list), vec!["c", "a"]);
        // A stale handle is ignored.
        assert_eq!(list.remove(b), None);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut list = RecencyList::with_capacity(2);
        list.push_front("a".to_string());
        list.push_front("b".to_string());
        list.pop_back();
        list.push_front("c".to_string());

        assert_eq!(list.slots.len(), 2);
        assert_eq!(keys(&list), vec!["c", "b"]);
    }
}
