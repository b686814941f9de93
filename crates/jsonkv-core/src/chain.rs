//! Overflow chain: the singly linked list that holds entries whose key
//! collided with an occupied primary slot.
//!
//! Entries are kept in insertion order. Removal splices a node out without
//! disturbing the order of the others, so enumeration stays deterministic.

use crate::table::Entry;

struct Node {
    entry: Entry,
    next: Option<Box<Node>>,
}

/// Singly linked list of [`Entry`] values, appended at the tail.
#[derive(Default)]
pub struct OverflowChain {
    head: Option<Box<Node>>,
    len: usize,
}

impl OverflowChain {
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Append an entry at the tail of the chain.
    pub fn push_back(&mut self, entry: Entry) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { entry, next: None }));
        self.len += 1;
    }

    /// Detach and return the head entry.
    pub fn pop_front(&mut self) -> Option<Entry> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        self.len -= 1;
        Some(node.entry)
    }

    pub fn find(&self, key: &str) -> Option<&Entry> {
        self.iter().find(|entry| entry.key == key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Entry> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            if node.entry.key == key {
                return Some(&mut node.entry);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Splice out the node holding `key`, keeping the remaining order.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let mut cursor = &mut self.head;
        loop {
            let found = match cursor.as_deref() {
                Some(node) => node.entry.key == key,
                None => return None,
            };
            if found {
                break;
            }
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => return None,
            }
        }
        let mut node = cursor.take()?;
        *cursor = node.next.take();
        self.len -= 1;
        Some(node.entry)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl Clone for OverflowChain {
    fn clone(&self) -> Self {
        let mut chain = OverflowChain::new();
        for entry in self {
            chain.push_back(entry.clone());
        }
        chain
    }
}

impl std::fmt::Debug for OverflowChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// Unlink node by node so a long chain does not recurse once per node.
impl Drop for OverflowChain {
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

/// Borrowing iterator over a chain, head to tail.
pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.entry)
    }
}

impl<'a> IntoIterator for &'a OverflowChain {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
