//! L4 Atomic Layer: Grow-only looped article window
//!
//! The carousel scrolls over a logically infinite sequence made by
//! concatenating the original article list with itself. Only a prefix of
//! whole copies is materialized; it grows forward on demand and never
//! shrinks while the carousel is mounted.

use std::sync::Arc;

use crate::news::Article;

const MIN_COPIES: usize = 2;

#[derive(Debug, Clone)]
pub struct CarouselDataset {
    originals: Arc<[Article]>,
    copies: usize,
    max_copies: usize,
}

impl CarouselDataset {
    /// Materialize one copy of `articles`. Callers guarantee a non-empty list.
    ///
    /// The cap never drops below two copies so a capped window can always be
    /// rebased by whole cycles.
    pub(crate) fn new(articles: Vec<Article>, max_copies: usize) -> Self {
        Self {
            originals: articles.into(),
            copies: 1,
            max_copies: max_copies.max(MIN_COPIES),
        }
    }

    /// Number of original articles (N)
    #[inline]
    pub fn original_len(&self) -> usize {
        self.originals.len()
    }

    /// Number of materialized copies
    #[inline]
    pub fn copies(&self) -> usize {
        self.copies
    }

    /// Materialized window length, always `copies * N`
    #[inline]
    pub fn window_len(&self) -> usize {
        self.copies * self.originals.len()
    }

    /// True once the copy cap is reached
    #[inline]
    pub fn is_capped(&self) -> bool {
        self.copies >= self.max_copies
    }

    /// The original, un-looped articles
    pub fn originals(&self) -> &[Article] {
        &self.originals
    }

    /// Article at a materialized index; `None` past the window
    pub fn get(&self, index: usize) -> Option<&Article> {
        if index >= self.window_len() {
            return None;
        }
        self.originals.get(index % self.originals.len())
    }

    /// Append one more copy of the originals. Returns false at the cap.
    pub(crate) fn extend(&mut self) -> bool {
        if self.is_capped() {
            return false;
        }
        self.copies += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::testing::article;

    fn dataset(n: usize, max_copies: usize) -> CarouselDataset {
        let articles = (0..n).map(|i| article(&i.to_string())).collect();
        CarouselDataset::new(articles, max_copies)
    }

    #[test]
    fn test_initial_window() {
        let ds = dataset(3, 8);
        assert_eq!(ds.original_len(), 3);
        assert_eq!(ds.window_len(), 3);
        assert_eq!(ds.get(2).unwrap().id, "2");
        assert!(ds.get(3).is_none());
    }

    #[test]
    fn test_extend_loops_originals() {
        let mut ds = dataset(3, 8);
        assert!(ds.extend());
        assert_eq!(ds.window_len(), 6);
        assert_eq!(ds.window_len() % ds.original_len(), 0);
        assert_eq!(ds.get(4).unwrap().id, "1");
        assert!(ds.get(6).is_none());
    }

    #[test]
    fn test_cap() {
        let mut ds = dataset(2, 2);
        assert!(ds.extend());
        assert!(ds.is_capped());
        assert!(!ds.extend());
        assert_eq!(ds.window_len(), 4);
    }

    #[test]
    fn test_cap_floor_is_two_copies() {
        let mut ds = dataset(2, 0);
        assert!(!ds.is_capped());
        assert!(ds.extend());
        assert!(!ds.extend());
        assert_eq!(ds.copies(), 2);
    }
}
