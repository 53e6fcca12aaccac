//! Recency list: doubly linked list over a slot arena
//!
//! Entries live in a `Vec<Option<Entry<V>>>` and link to each other by slot
//! index, so relinking never moves a payload. Head is the most recently used
//! entry, tail the least recently used. Freed slots are recycled.

/// One resident key/value pair plus its list linkage
#[derive(Debug)]
pub struct Entry<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<V> Entry<V> {
    /// Key this entry was created under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Cached payload
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Split into key and value
    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

/// Doubly linked recency list
#[derive(Debug)]
pub struct RecencyList<V> {
    nodes: Vec<Option<Entry<V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecencyList<V> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of linked entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot of the most recently used entry
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Slot of the least recently used entry
    pub fn tail(&self) -> Option<usize> {
        self.tail
    }

    /// Entry stored at `idx`, if the slot is occupied
    pub fn get(&self, idx: usize) -> Option<&Entry<V>> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    /// Mutable access to the value at `idx`; links stay private
    pub fn value_mut(&mut self, idx: usize) -> Option<&mut V> {
        self.nodes
            .get_mut(idx)
            .and_then(Option::as_mut)
            .map(|entry| &mut entry.value)
    }

    /// Insert a brand-new entry as head and return its slot
    pub fn insert_front(&mut self, key: String, value: V) -> usize {
        let idx = self.alloc_node();
        self.nodes[idx] = Some(Entry {
            key,
            value,
            prev: None,
            next: None,
        });
        self.attach_front(idx);
        self.len += 1;
        idx
    }

    /// Detach the entry at `idx` and re-insert it as head
    pub fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) || self.get(idx).is_none() {
            return;
        }

        self.unlink(idx);
        self.attach_front(idx);
    }

    /// Detach and return the tail (the LRU victim)
    pub fn remove_tail(&mut self) -> Option<Entry<V>> {
        let tail_idx = self.tail?;
        self.remove(tail_idx)
    }

    /// Detach and return the entry at `idx`
    pub fn remove(&mut self, idx: usize) -> Option<Entry<V>> {
        self.get(idx)?;

        self.unlink(idx);
        let mut entry = self.nodes[idx].take()?;
        entry.prev = None;
        entry.next = None;
        self.free_node(idx);
        self.len -= 1;
        Some(entry)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate from head (most recent) to tail (least recent)
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head,
            forward: true,
        }
    }

    /// Iterate from tail (least recent) to head (most recent)
    pub fn iter_rev(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.tail,
            forward: false,
        }
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => {
                if let Some(head) = &mut self.nodes[head_idx] {
                    head.prev = Some(idx);
                }
            }
            None => {
                self.tail = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &self.nodes[idx] {
            (node.prev, node.next)
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }
}

/// Iterator over linked entries in recency order
pub struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    cursor: Option<usize>,
    forward: bool,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.cursor?)?;
        self.cursor = if self.forward { entry.next } else { entry.prev };
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &RecencyList<i32>) -> Vec<&str> {
        list.iter().map(Entry::key).collect()
    }

    fn keys_rev(list: &RecencyList<i32>) -> Vec<&str> {
        list.iter_rev().map(Entry::key).collect()
    }

    #[test]
    fn test_insert_front() {
        let mut list = RecencyList::new();

        let a = list.insert_front("a".to_string(), 1);
        assert_eq!(list.head(), Some(a));
        assert_eq!(list.tail(), Some(a));

        list.insert_front("b".to_string(), 2);
        list.insert_front("c".to_string(), 3);

        assert_eq!(keys(&list), vec!["c", "b", "a"]);
        assert_eq!(keys_rev(&list), vec!["a", "b", "c"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_middle_to_front() {
        let mut list = RecencyList::new();

        list.insert_front("a".to_string(), 1);
        let b = list.insert_front("b".to_string(), 2);
        list.insert_front("c".to_string(), 3);

        list.move_to_front(b);

        assert_eq!(keys(&list), vec!["b", "c", "a"]);
        assert_eq!(keys_rev(&list), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_move_tail_to_front() {
        let mut list = RecencyList::new();

        let a = list.insert_front("a".to_string(), 1);
        list.insert_front("b".to_string(), 2);
        list.insert_front("c".to_string(), 3);

        list.move_to_front(a);

        assert_eq!(keys(&list), vec!["a", "c", "b"]);
        assert_eq!(list.tail().and_then(|idx| list.get(idx)).map(Entry::key), Some("b"));
        assert_eq!(keys_rev(&list), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_head_is_noop() {
        let mut list = RecencyList::new();

        list.insert_front("a".to_string(), 1);
        let b = list.insert_front("b".to_string(), 2);

        list.move_to_front(b);

        assert_eq!(keys(&list), vec!["b", "a"]);
        assert_eq!(keys_rev(&list), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_tail() {
        let mut list = RecencyList::new();

        list.insert_front("a".to_string(), 1);
        list.insert_front("b".to_string(), 2);

        let victim = list.remove_tail().unwrap();
        assert_eq!(victim.into_parts(), ("a".to_string(), 1));
        assert_eq!(keys(&list), vec!["b"]);
        assert_eq!(list.head(), list.tail());

        list.remove_tail().unwrap();
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
        assert!(list.remove_tail().is_none());
    }

    #[test]
    fn test_slot_reuse() {
        let mut list = RecencyList::new();

        let a = list.insert_front("a".to_string(), 1);
        list.insert_front("b".to_string(), 2);
        list.remove(a).unwrap();

        let c = list.insert_front("c".to_string(), 3);
        assert_eq!(c, a);
        assert_eq!(keys(&list), vec!["c", "b"]);
        assert_eq!(keys_rev(&list), vec!["b", "c"]);
    }

    #[test]
    fn test_value_mut() {
        let mut list = RecencyList::new();

        let a = list.insert_front("a".to_string(), 1);
        *list.value_mut(a).unwrap() = 10;

        assert_eq!(list.get(a).map(|e| *e.value()), Some(10));
        assert!(list.value_mut(42).is_none());
    }

    #[test]
    fn test_clear() {
        let mut list = RecencyList::new();

        list.insert_front("a".to_string(), 1);
        list.insert_front("b".to_string(), 2);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
    }
}
