//! LRU Tracker Module
//!
//! Implements Least Recently Used ordering for cache eviction.

use crate::cache::Key;

// == Node Handle ==
/// Stable handle to a tracked key, returned on insertion.
///
/// A handle stays valid until its key is removed or evicted; the slot may be
/// reused afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    key: Key,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in a slot vector linked by index:
/// - Head = Least recently used
/// - Tail = Most recently used
///
/// Touch, insertion and eviction are O(1); freed slots are recycled.
#[derive(Debug, Default)]
pub struct LruTracker {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tracker with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Insert ==
    /// Adds a key at the most recently used end.
    ///
    /// The tracker does not deduplicate; callers insert each key once and
    /// use [`touch`](Self::touch) afterwards.
    pub fn insert(&mut self, key: Key) -> NodeId {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.link_back(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Touch ==
    /// Marks a key as recently used (moves to tail).
    pub fn touch(&mut self, id: NodeId) {
        if self.tail == Some(id.0) || !self.contains(id) {
            return;
        }
        self.unlink(id.0);
        self.link_back(id.0);
    }

    // == Remove ==
    /// Removes a key from the tracker, returning it.
    pub fn remove(&mut self, id: NodeId) -> Option<Key> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id.0);
        let node = self.nodes.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<Key> {
        let head = self.head?;
        self.remove(NodeId(head))
    }

    /// Returns the key behind a handle.
    pub fn key(&self, id: NodeId) -> Option<Key> {
        self.node(id.0).map(|node| node.key)
    }

    // == Keys ==
    /// Copies the order out, least recently used first.
    pub fn keys(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            match self.node(idx) {
                Some(node) => {
                    keys.push(node.key);
                    cursor = node.next;
                }
                None => break,
            }
            // A broken link must not loop forever.
            if keys.len() > self.len {
                break;
            }
        }
        keys
    }

    // == Clear ==
    /// Drops every tracked key.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Contains ==
    /// Checks if a handle refers to a live key.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id.0).is_some()
    }

    fn node(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node> {
        self.nodes.get_mut(idx).and_then(Option::as_mut)
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        if let Some(node) = self.node_mut(idx) {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(t) => {
                if let Some(node) = self.node_mut(t) {
                    node.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }
}
