// --- File: src/core/trie.rs
use crate::core::types::Term;

type NodeId = u32;

const ROOT: NodeId = 0;

#[derive(Clone, Debug, Default)]
struct Node {
    /// Sorted by character, so walking this list in order is the
    /// lexicographic traversal suggestions rely on.
    children: Vec<(char, NodeId)>,
    terminal: bool,
}

impl Node {
    fn child(&self, ch: char) -> Option<NodeId> {
        self.children
            .binary_search_by_key(&ch, |&(c, _)| c)
            .ok()
            .map(|pos| self.children[pos].1)
    }
}

/// An immutable prefix index over the vocabulary.
///
/// Nodes live in one contiguous arena; the root is always index 0.
/// The index is never edited in place: a new vocabulary means a new `PrefixIndex`.
#[derive(Clone, Debug)]
pub struct PrefixIndex {
    nodes: Vec<Node>,
    terms: usize,
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self { nodes: vec![Node::default()], terms: 0 }
    }
}

impl PrefixIndex {
    /// Builds the index from scratch. O(total characters).
    pub fn build<'a, I>(terms: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = Self::default();
        for term in terms {
            index.insert(term);
        }
        index
    }

    fn insert(&mut self, term: &str) {
        if term.is_empty() {
            return;
        }
        let mut node_idx = ROOT as usize;
        for ch in term.chars() {
            let next_idx = match self.nodes[node_idx]
                .children
                .binary_search_by_key(&ch, |&(c, _)| c)
            {
                Ok(pos) => self.nodes[node_idx].children[pos].1,
                Err(pos) => {
                    let new_node_id = self.nodes.len() as NodeId;
                    self.nodes.push(Node::default());
                    self.nodes[node_idx].children.insert(pos, (ch, new_node_id));
                    new_node_id
                }
            };
            node_idx = next_idx as usize;
        }
        if !self.nodes[node_idx].terminal {
            self.nodes[node_idx].terminal = true;
            self.terms += 1;
        }
    }

    fn find(&self, prefix: &str) -> Option<NodeId> {
        let mut node_idx = ROOT;
        for ch in prefix.chars() {
            node_idx = self.nodes[node_idx as usize].child(ch)?;
        }
        Some(node_idx)
    }

    /// Exact membership of a full term.
    pub fn contains(&self, term: &str) -> bool {
        !term.is_empty() && self.find(term).is_some_and(|id| self.nodes[id as usize].terminal)
    }

    /// Returns up to `limit` terms starting with `prefix`, lexicographically
    /// smallest first. The traversal stops as soon as `limit` terms are found.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<Term> {
        if prefix.is_empty() || limit == 0 {
            return vec![];
        }
        let Some(start) = self.find(prefix) else {
            return vec![];
        };

        let mut out = Vec::with_capacity(limit);
        let mut current = prefix.to_string();
        self.collect(start, &mut current, limit, &mut out);
        out
    }

    fn collect(&self, node_idx: NodeId, current: &mut String, limit: usize, out: &mut Vec<Term>) {
        let node = &self.nodes[node_idx as usize];
        if node.terminal {
            out.push(current.clone());
        }
        for &(ch, child) in &node.children {
            if out.len() >= limit {
                return;
            }
            current.push(ch);
            self.collect(child, current, limit, out);
            current.pop();
        }
    }

    /// Number of terms stored.
    pub fn len(&self) -> usize {
        self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms == 0
    }

    /// Number of arena nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(terms: &[&str]) -> PrefixIndex {
        PrefixIndex::build(terms.iter().copied())
    }

    #[test]
    fn test_suggest_lexicographic_order() {
        let trie = index(&["cardiac", "cardiology", "cardio", "card"]);
        assert_eq!(
            trie.suggest("card", 5),
            vec!["card", "cardiac", "cardio", "cardiology"]
        );
    }

    #[test]
    fn test_suggest_stops_at_limit() {
        let terms = [
            "abj", "abc", "abi", "abd", "abh", "abe", "abg", "abf", "abb", "aba",
        ];
        let trie = index(&terms);
        assert_eq!(trie.suggest("ab", 5), vec!["aba", "abb", "abc", "abd", "abe"]);
        assert_eq!(trie.suggest("ab", 100).len(), 10);
    }

    #[test]
    fn test_prefix_itself_comes_first() {
        let trie = index(&["ab", "abz", "aa"]);
        assert_eq!(trie.suggest("ab", 1), vec!["ab"]);
    }

    #[test]
    fn test_empty_and_missing_prefix() {
        let trie = index(&["cardiac"]);
        assert!(trie.suggest("", 5).is_empty());
        assert!(trie.suggest("x", 5).is_empty());
        assert!(trie.suggest("cardiacs", 5).is_empty());
        assert!(trie.suggest("card", 0).is_empty());
    }

    #[test]
    fn test_duplicates_counted_once() {
        let trie = index(&["renal", "renal", "ren"]);
        assert_eq!(trie.len(), 2);
        assert_eq!(trie.suggest("re", 5), vec!["ren", "renal"]);
        // root + r, e, n, a, l
        assert_eq!(trie.node_count(), 6);
    }

    #[test]
    fn test_contains() {
        let trie = index(&["nephron"]);
        assert!(trie.contains("nephron"));
        assert!(!trie.contains("neph"));
        assert!(!trie.contains(""));
    }

    #[test]
    fn test_non_ascii_terms() {
        let trie = index(&["ödem", "öl", "oedema"]);
        assert_eq!(trie.suggest("ö", 5), vec!["ödem", "öl"]);
        assert!(trie.suggest("ø", 5).is_empty());
    }
}
