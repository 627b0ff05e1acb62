//! Knowledge element container and the built-in element source.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use zhimo_core::{DeckCard, KnowledgeContent, KnowledgeElement, KnowledgeSource, Result};

// =============================================================================
// STATIC SOURCE
// =============================================================================

/// Serves a fixed element set for every document, optionally after a delay.
#[derive(Debug, Clone)]
pub struct StaticKnowledgeSource {
    elements: Vec<KnowledgeElement>,
    latency: Duration,
}

impl StaticKnowledgeSource {
    pub fn new(elements: Vec<KnowledgeElement>) -> Self {
        Self {
            elements,
            latency: Duration::ZERO,
        }
    }

    /// Simulate a round trip before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The three sample elements: key points, a self-test question, and a deck.
    pub fn sample() -> Self {
        Self::new(sample_elements())
    }
}

impl Default for StaticKnowledgeSource {
    fn default() -> Self {
        Self::sample()
    }
}

#[async_trait]
impl KnowledgeSource for StaticKnowledgeSource {
    async fn elements_for_document(&self, document_id: &str) -> Result<Vec<KnowledgeElement>> {
        debug!(document_id, "Serving static knowledge elements");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.elements.clone())
    }
}

fn sample_elements() -> Vec<KnowledgeElement> {
    let card = |term: &str, definition: &str| DeckCard {
        term: term.to_string(),
        definition: definition.to_string(),
    };

    vec![
        KnowledgeElement {
            id: "ke-1".to_string(),
            content: KnowledgeContent::Points {
                title: "Ten principles of economics".to_string(),
                text: "The principles of economics underpin all economic analysis...\n\
                       1. People face trade-offs\n\
                       2. The cost of something is what you give up to get it (opportunity cost)\n..."
                    .to_string(),
                mindmap: Some(
                    "mindmap\n  root((Principles of economics))\n    \
                     Principle 1: Trade-offs\n    \
                     Principle 2: Opportunity cost\n    \
                     Principle 3: Thinking at the margin\n      Marginal cost\n      Marginal benefit\n    \
                     Principle 4: Responding to incentives\n"
                        .to_string(),
                ),
            },
        },
        KnowledgeElement {
            id: "ke-2".to_string(),
            content: KnowledgeContent::Qa {
                title: "Self test: the demand curve".to_string(),
                question: "Why does the demand curve usually slope downward?".to_string(),
                answer: "Because price and quantity demanded are negatively related.".to_string(),
                analysis: Some(
                    "Two effects drive this:\n1. **Substitution effect**\n2. **Income effect**"
                        .to_string(),
                ),
            },
        },
        KnowledgeElement {
            id: "ke-3".to_string(),
            content: KnowledgeContent::Deck {
                title: "Key term flash cards".to_string(),
                cards: vec![
                    card("Invisible hand", "A concept introduced by Adam Smith..."),
                    card("Inflation", "A sustained, general rise in the price level..."),
                    card("Microeconomics", "The study of how households and firms make decisions..."),
                    card("Macroeconomics", "The study of economy-wide phenomena..."),
                ],
            },
        },
    ]
}

// =============================================================================
// STORE
// =============================================================================

/// Elements of the current document plus the review set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeSnapshot {
    pub elements: Vec<KnowledgeElement>,
    /// Elements queued for review, unique by id, in insertion order.
    pub review: Vec<KnowledgeElement>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl KnowledgeSnapshot {
    pub fn review_element_ids(&self) -> Vec<&str> {
        self.review.iter().map(|e| e.id.as_str()).collect()
    }

    pub fn is_in_review(&self, id: &str) -> bool {
        self.review.iter().any(|e| e.id == id)
    }
}

pub struct KnowledgeStore {
    source: Box<dyn KnowledgeSource>,
    state: RwLock<KnowledgeSnapshot>,
}

impl KnowledgeStore {
    pub fn new(source: impl KnowledgeSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            state: RwLock::new(KnowledgeSnapshot::default()),
        }
    }

    pub fn snapshot(&self) -> KnowledgeSnapshot {
        self.read().clone()
    }

    /// Load the elements of `document_id`. Failures are recorded, not raised.
    pub async fn fetch_elements_for_document(&self, document_id: &str) {
        {
            let mut state = self.write();
            state.is_loading = true;
            state.error = None;
            state.elements.clear();
        }

        let result = self.source.elements_for_document(document_id).await;

        let mut state = self.write();
        state.is_loading = false;
        match result {
            Ok(elements) => {
                debug!(document_id, count = elements.len(), "Fetched knowledge elements");
                state.elements = elements;
            }
            Err(e) => {
                warn!(document_id, error = %e, "Failed to fetch knowledge elements");
                state.error = Some(e.message());
            }
        }
    }

    pub fn clear_elements(&self) {
        self.write().elements.clear();
    }

    /// Queue an element for review. Returns false if its id is already queued.
    pub fn add_to_review(&self, element: KnowledgeElement) -> bool {
        let mut state = self.write();
        if state.is_in_review(&element.id) {
            return false;
        }
        state.review.push(element);
        true
    }

    pub fn remove_from_review(&self, id: &str) -> bool {
        let mut state = self.write();
        let before = state.review.len();
        state.review.retain(|e| e.id != id);
        state.review.len() != before
    }

    pub fn clear_review(&self) {
        self.write().review.clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, KnowledgeSnapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, KnowledgeSnapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use zhimo_core::{defaults, Error, KnowledgeKind};

    struct FailingSource;

    #[async_trait]
    impl KnowledgeSource for FailingSource {
        async fn elements_for_document(&self, _document_id: &str) -> Result<Vec<KnowledgeElement>> {
            Err(Error::Service(defaults::MSG_KNOWLEDGE_FAILED.to_string()))
        }
    }

    #[test]
    fn test_sample_has_one_of_each_kind() {
        let kinds: Vec<KnowledgeKind> = sample_elements().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![KnowledgeKind::Points, KnowledgeKind::Qa, KnowledgeKind::Deck]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_for_latency() {
        let store = KnowledgeStore::new(
            StaticKnowledgeSource::sample().with_latency(Duration::from_millis(1000)),
        );
        let start = tokio::time::Instant::now();

        store.fetch_elements_for_document("doc-1").await;

        assert_eq!(start.elapsed(), Duration::from_millis(1000));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.elements.len(), 3);
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_clears_elements_and_records_error() {
        let store = KnowledgeStore::new(FailingSource);
        store.write().elements = sample_elements();

        store.fetch_elements_for_document("doc-1").await;

        let snapshot = store.snapshot();
        assert!(snapshot.elements.is_empty());
        assert_eq!(snapshot.error.as_deref(), Some(defaults::MSG_KNOWLEDGE_FAILED));
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn test_clear_elements() {
        let store = KnowledgeStore::new(StaticKnowledgeSource::sample());
        store.fetch_elements_for_document("doc-1").await;
        store.clear_elements();
        assert!(store.snapshot().elements.is_empty());
    }

    #[test]
    fn test_review_set_is_unique_by_id() {
        let store = KnowledgeStore::new(StaticKnowledgeSource::sample());
        let elements = sample_elements();

        assert!(store.add_to_review(elements[1].clone()));
        assert!(store.add_to_review(elements[0].clone()));
        assert!(!store.add_to_review(elements[1].clone()));

        assert_eq!(store.snapshot().review_element_ids(), vec!["ke-2", "ke-1"]);

        assert!(store.remove_from_review("ke-2"));
        assert!(!store.remove_from_review("ke-2"));
        assert_eq!(store.snapshot().review_element_ids(), vec!["ke-1"]);

        store.clear_review();
        assert!(store.snapshot().review.is_empty());
    }
}
