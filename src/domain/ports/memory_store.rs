/// System of record for memory texts, keyed by memory id.
///
/// Iteration order is insertion order; overwriting an id keeps its
/// original position. Implementations must make each call atomic.
pub trait MemoryStore: Send + Sync {
    /// Insert or overwrite (last write wins).
    fn put(&self, id: &str, text: &str);
    fn get(&self, id: &str) -> Option<String>;
    fn list_ids(&self) -> Vec<String>;
    fn len(&self) -> usize;
    fn clear(&self);

    /// All `(id, text)` pairs in iteration order.
    fn snapshot(&self) -> Vec<(String, String)>;

    /// First id in iteration order whose text equals `text` exactly.
    fn find_id_by_text(&self, text: &str) -> Option<String>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
