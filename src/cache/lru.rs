//! LRU Tracker Module
//!
//! Recency ordering for cache eviction, kept as a doubly linked list whose
//! nodes live in a slot arena and are addressed by stable [`SlotId`] handles.
//!
//! ```text
//!   head (most recent) ─► [a] ◄──► [b] ◄──► [c] ◄── tail (least recent)
//! ```
//!
//! `push_front`, `move_to_front`, `remove` and `pop_back` are all O(1).

// == Slot Handle ==
/// Stable handle to a node in an [`LruTracker`].
///
/// A handle stays valid until its node is removed; freed slots are reused by
/// later insertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug)]
pub struct LruTracker<K> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tracker with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a key as the most recently used and returns its handle.
    pub fn push_front(&mut self, key: K) -> SlotId {
        let node = Node {
            key,
            prev: None,
            next: None,
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
        self.attach_front(idx);
        self.len += 1;
        SlotId(idx)
    }

    // == Move To Front ==
    /// Marks the key behind `id` as most recently used.
    ///
    /// Returns false if `id` is not a live node.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.head != Some(id.0) {
            self.detach(id.0);
            self.attach_front(id.0);
        }
        true
    }

    // == Remove ==
    /// Unlinks the node behind `id` and returns its key.
    pub fn remove(&mut self, id: SlotId) -> Option<K> {
        if !self.contains(id) {
            return None;
        }
        self.detach(id.0);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn pop_back(&mut self) -> Option<K> {
        let tail = self.tail?;
        self.remove(SlotId(tail))
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.tail.and_then(|idx| self.key_at(idx))
    }

    /// Returns the most recently used key.
    pub fn peek_newest(&self) -> Option<&K> {
        self.head.and_then(|idx| self.key_at(idx))
    }

    /// Returns the key behind `id`, if it is live.
    pub fn get(&self, id: SlotId) -> Option<&K> {
        self.key_at(id.0)
    }

    /// Returns true if `id` refers to a live node.
    pub fn contains(&self, id: SlotId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node and releases the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            tracker: self,
            current: self.head,
        }
    }

    fn key_at(&self, idx: usize) -> Option<&K> {
        self.slots
            .get(idx)
            .and_then(Option::as_ref)
            .map(|node| &node.key)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<K>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = match self.node_mut(idx) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(prev_node) = self.node_mut(p) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(next_node) = self.node_mut(n) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(head_node) = self.node_mut(h) {
                    head_node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over an [`LruTracker`].
pub struct Iter<'a, K> {
    tracker: &'a LruTracker<K>,
    current: Option<usize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let node = self.tracker.slots.get(idx)?.as_ref()?;
        self.current = node.next;
        Some(&node.key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn order(lru: &LruTracker<&'static str>) -> Vec<&'static str> {
        lru.iter().copied().collect()
    }

    #[test]
    fn test_lru_new() {
        let lru: LruTracker<String> = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.peek_oldest(), None);
    }

    #[test]
    fn test_lru_push_front_order() {
        let mut lru = LruTracker::new();

        lru.push_front("key1");
        lru.push_front("key2");
        lru.push_front("key3");

        assert_eq!(lru.len(), 3);
        // key1 is oldest (added first)
        assert_eq!(lru.peek_oldest(), Some(&"key1"));
        assert_eq!(lru.peek_newest(), Some(&"key3"));
        assert_eq!(order(&lru), vec!["key3", "key2", "key1"]);
    }

    #[test]
    fn test_lru_move_existing_to_front() {
        let mut lru = LruTracker::new();

        let a = lru.push_front("key1");
        lru.push_front("key2");
        lru.push_front("key3");

        assert!(lru.move_to_front(a));

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_oldest(), Some(&"key2"));
        assert_eq!(order(&lru), vec!["key1", "key3", "key2"]);
    }

    #[test]
    fn test_lru_move_head_is_noop() {
        let mut lru = LruTracker::new();
        lru.push_front("a");
        let b = lru.push_front("b");

        assert!(lru.move_to_front(b));
        assert_eq!(order(&lru), vec!["b", "a"]);
    }

    #[test]
    fn test_lru_pop_back() {
        let mut lru = LruTracker::new();

        lru.push_front("key1");
        lru.push_front("key2");
        lru.push_front("key3");

        assert_eq!(lru.pop_back(), Some("key1"));
        assert_eq!(lru.len(), 2);

        assert_eq!(lru.pop_back(), Some("key2"));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_pop_back_empty() {
        let mut lru: LruTracker<&str> = LruTracker::new();
        assert_eq!(lru.pop_back(), None);
    }

    #[test]
    fn test_lru_remove_middle() {
        let mut lru = LruTracker::new();

        lru.push_front("key1");
        let b = lru.push_front("key2");
        lru.push_front("key3");

        assert_eq!(lru.remove(b), Some("key2"));

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains(b));
        assert_eq!(order(&lru), vec!["key3", "key1"]);
    }

    #[test]
    fn test_lru_remove_stale_handle() {
        let mut lru = LruTracker::new();
        let a = lru.push_front("key1");
        lru.push_front("key2");

        assert_eq!(lru.remove(a), Some("key1"));
        assert_eq!(lru.remove(a), None);
        assert!(!lru.move_to_front(a));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_slot_reuse() {
        let mut lru = LruTracker::new();
        let a = lru.push_front("a");
        lru.push_front("b");
        lru.remove(a);

        let c = lru.push_front("c");
        assert_eq!(c, a, "freed slot should be reused");
        assert_eq!(lru.get(c), Some(&"c"));
        assert_eq!(order(&lru), vec!["c", "b"]);
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruTracker::new();

        let a = lru.push_front("a");
        let b = lru.push_front("b");
        let c = lru.push_front("c");

        // [c, b, a] -> touch a -> [a, c, b] -> touch c -> [c, a, b] -> touch b -> [b, c, a]
        lru.move_to_front(a);
        lru.move_to_front(c);
        lru.move_to_front(b);

        assert_eq!(lru.pop_back(), Some("a"));
        assert_eq!(lru.pop_back(), Some("c"));
        assert_eq!(lru.pop_back(), Some("b"));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_clear() {
        let mut lru = LruTracker::new();
        let a = lru.push_front("a");
        lru.push_front("b");

        lru.clear();

        assert!(lru.is_empty());
        assert!(!lru.contains(a));
        assert_eq!(lru.peek_oldest(), None);
        assert_eq!(lru.iter().count(), 0);
    }
}
