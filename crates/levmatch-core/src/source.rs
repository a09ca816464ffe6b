//! Candidate sources
//!
//! The matcher pulls candidates one at a time from a [`CandidateSource`].
//! Deduplication and the match predicate belong to the source: each pulled
//! record carries a [`Gate`] telling the matcher whether to score it.

use ahash::AHashSet;

use crate::error::SourceError;
use crate::value::{Candidate, Document};

/// Whether a pulled record reaches the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Score this record
    Fresh,
    /// Storage position already visited during this scan
    Duplicate,
    /// Rejected by the source's match predicate
    Filtered,
}

/// A record pulled from a source, with its storage position.
#[derive(Debug, Clone)]
pub struct Pulled<R> {
    pub record: R,
    pub position: usize,
    pub gate: Gate,
}

impl<R> Pulled<R> {
    pub fn fresh(record: R, position: usize) -> Self {
        Self {
            record,
            position,
            gate: Gate::Fresh,
        }
    }
}

/// Pull-based sequence of candidate records.
///
/// `None` signals end of stream. A host that wants a wall-clock timeout
/// returns `None` early; the matcher treats it as ordinary exhaustion.
pub trait CandidateSource {
    type Record: Candidate;

    fn pull(&mut self) -> Option<Result<Pulled<Self::Record>, SourceError>>;
}

impl<S: CandidateSource + ?Sized> CandidateSource for &mut S {
    type Record = S::Record;

    fn pull(&mut self) -> Option<Result<Pulled<Self::Record>, SourceError>> {
        (**self).pull()
    }
}

impl<S: CandidateSource + ?Sized> CandidateSource for Box<S> {
    type Record = S::Record;

    fn pull(&mut self) -> Option<Result<Pulled<Self::Record>, SourceError>> {
        (**self).pull()
    }
}

/// Source over any iterator of records; every record is fresh.
#[derive(Debug)]
pub struct IterSource<I> {
    records: I,
    position: usize,
}

impl<I> IterSource<I> {
    pub fn new(records: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            records: records.into_iter(),
            position: 0,
        }
    }
}

impl<I> CandidateSource for IterSource<I>
where
    I: Iterator,
    I::Item: Candidate,
{
    type Record = I::Item;

    fn pull(&mut self) -> Option<Result<Pulled<Self::Record>, SourceError>> {
        let record = self.records.next()?;
        let position = self.position;
        self.position += 1;
        Some(Ok(Pulled::fresh(record, position)))
    }
}

/// In-memory, insertion-ordered collection of documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    name: String,
    documents: Vec<Document>,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Vec::new(),
        }
    }

    pub fn with_documents(name: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            name: name.into(),
            documents,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a document, returning its storage position.
    pub fn insert(&mut self, document: Document) -> usize {
        self.documents.push(document);
        self.documents.len() - 1
    }

    pub fn get(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Full scan in storage order.
    pub fn scan(&self) -> CollectionScan<'_> {
        CollectionScan {
            documents: &self.documents,
            order: Box::new(0..self.documents.len()),
            filter: None,
            visited: AHashSet::new(),
        }
    }

    /// Scan following `order`, which may repeat positions the way a
    /// multikey index walk does, keeping only documents accepted by
    /// `filter`.
    pub fn scan_with<'a, F>(&'a self, order: Vec<usize>, filter: F) -> CollectionScan<'a>
    where
        F: Fn(&Document) -> bool + 'a,
    {
        CollectionScan {
            documents: &self.documents,
            order: Box::new(order.into_iter()),
            filter: Some(Box::new(filter)),
            visited: AHashSet::new(),
        }
    }
}

/// Cursor over a [`MemoryCollection`].
pub struct CollectionScan<'a> {
    documents: &'a [Document],
    order: Box<dyn Iterator<Item = usize> + 'a>,
    filter: Option<Box<dyn Fn(&Document) -> bool + 'a>>,
    visited: AHashSet<usize>,
}

impl<'a> CandidateSource for CollectionScan<'a> {
    type Record = &'a Document;

    fn pull(&mut self) -> Option<Result<Pulled<Self::Record>, SourceError>> {
        let position = self.order.next()?;
        let Some(record) = self.documents.get(position) else {
            return Some(Err(SourceError::Backend(format!(
                "position {} out of range for {} documents",
                position,
                self.documents.len()
            ))));
        };

        let gate = if !self.visited.insert(position) {
            Gate::Duplicate
        } else if self.filter.as_ref().is_some_and(|keep| !keep(record)) {
            Gate::Filtered
        } else {
            Gate::Fresh
        };

        Some(Ok(Pulled {
            record,
            position,
            gate,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> MemoryCollection {
        MemoryCollection::with_documents(
            "words",
            vec![
                Document::new().with("name", "sitting"),
                Document::new().with("name", "mitten"),
                Document::new().with("name", "xyz"),
            ],
        )
    }

    fn drain<S: CandidateSource>(mut source: S) -> Vec<(usize, Gate)> {
        let mut out = Vec::new();
        while let Some(pulled) = source.pull() {
            let pulled = pulled.unwrap();
            out.push((pulled.position, pulled.gate));
        }
        out
    }

    #[test]
    fn test_full_scan_in_storage_order() {
        let collection = collection();
        assert_eq!(
            drain(collection.scan()),
            vec![(0, Gate::Fresh), (1, Gate::Fresh), (2, Gate::Fresh)]
        );
    }

    #[test]
    fn test_repeated_positions_are_duplicates() {
        let collection = collection();
        let scan = collection.scan_with(vec![1, 0, 1, 2, 0], |_| true);
        assert_eq!(
            drain(scan),
            vec![
                (1, Gate::Fresh),
                (0, Gate::Fresh),
                (1, Gate::Duplicate),
                (2, Gate::Fresh),
                (0, Gate::Duplicate),
            ]
        );
    }

    #[test]
    fn test_filter_marks_filtered() {
        let collection = collection();
        let scan = collection.scan_with(vec![0, 1, 2], |doc| {
            doc.get("name").and_then(|v| v.as_str()) != Some("mitten")
        });
        assert_eq!(
            drain(scan),
            vec![(0, Gate::Fresh), (1, Gate::Filtered), (2, Gate::Fresh)]
        );
    }

    #[test]
    fn test_out_of_range_position() {
        let collection = collection();
        let mut scan = collection.scan_with(vec![7], |_| true);
        assert!(matches!(scan.pull(), Some(Err(SourceError::Backend(_)))));
        assert!(scan.pull().is_none());
    }

    #[test]
    fn test_iter_source_positions() {
        let docs = vec![Document::new(), Document::new()];
        assert_eq!(
            drain(IterSource::new(docs)),
            vec![(0, Gate::Fresh), (1, Gate::Fresh)]
        );
    }
}
