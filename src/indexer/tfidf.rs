use std::collections::{BTreeMap, HashMap};

/// Raw term frequencies of one document, ordered by term.
///
/// A `BTreeMap` keeps iteration order fixed, so identical documents always
/// produce bit-identical weights and therefore exactly equal scores.
pub type TermCounts = BTreeMap<String, usize>;

/// Document frequencies over a fixed set of documents
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    document_frequency: HashMap<String, usize>,
    documents: usize,
}

impl CorpusStats {
    pub fn from_documents<'a>(documents: impl IntoIterator<Item = &'a TermCounts>) -> Self {
        let mut stats = Self::default();
        for counts in documents {
            stats.documents += 1;
            for term in counts.keys() {
                *stats.document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }
        stats
    }

    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms across all documents
    pub fn vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }

    /// Smoothed inverse document frequency of `term` in the corpus formed by
    /// these documents plus `extra`, as if `extra` had been counted up front.
    pub fn joint_idf(&self, term: &str, extra: &TermCounts) -> f64 {
        let df = self.document_frequency(term) + usize::from(extra.contains_key(term));
        smoothed_idf(df, self.documents + 1)
    }
}

/// `ln((1 + n) / (1 + df)) + 1`: never zero, so terms present in every
/// document still carry some weight.
pub fn smoothed_idf(df: usize, documents: usize) -> f64 {
    ((1 + documents) as f64 / (1 + df) as f64).ln() + 1.0
}

/// L2-normalized TF-IDF vector. Empty when the document had no weighted terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    weights: BTreeMap<String, f64>,
}

impl SparseVector {
    /// Weigh raw counts by `idf` and normalize to unit length
    pub fn from_counts(counts: &TermCounts, idf: impl Fn(&str) -> f64) -> Self {
        let mut weights: BTreeMap<String, f64> = counts
            .iter()
            .map(|(term, &tf)| (term.clone(), tf as f64 * idf(term)))
            .collect();

        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Self::default();
        }

        for weight in weights.values_mut() {
            *weight /= norm;
        }

        Self { weights }
    }

    pub fn is_zero(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn get(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Cosine similarity of two unit vectors, in [0, 1].
    /// A zero vector on either side scores 0.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }

        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        let dot: f64 = small
            .weights
            .iter()
            .map(|(term, weight)| weight * large.get(term))
            .sum();

        dot.clamp(0.0, 1.0)
    }
}
