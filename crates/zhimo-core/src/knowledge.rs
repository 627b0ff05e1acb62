//! Knowledge elements derived from a document.
//!
//! An element is a tagged variant over three content shapes. The wire form
//! keeps the tag next to the content:
//!
//! ```json
//! { "id": "ke-2", "type": "qa", "content": { "title": "...", "question": "...", "answer": "..." } }
//! ```

use serde::{Deserialize, Serialize};

/// Tag of a knowledge element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeKind {
    Points,
    Qa,
    Deck,
}

impl std::fmt::Display for KnowledgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Points => write!(f, "points"),
            Self::Qa => write!(f, "qa"),
            Self::Deck => write!(f, "deck"),
        }
    }
}

/// One term/definition pair of a flash-card deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCard {
    pub term: String,
    pub definition: String,
}

/// Content of a knowledge element, discriminated by the `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum KnowledgeContent {
    /// Key points with optional mermaid mind map markup.
    Points {
        title: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mindmap: Option<String>,
    },
    /// Self-test question with answer and optional explanation.
    Qa {
        title: String,
        question: String,
        answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        analysis: Option<String>,
    },
    /// Flash-card deck.
    Deck { title: String, cards: Vec<DeckCard> },
}

impl KnowledgeContent {
    pub fn kind(&self) -> KnowledgeKind {
        match self {
            Self::Points { .. } => KnowledgeKind::Points,
            Self::Qa { .. } => KnowledgeKind::Qa,
            Self::Deck { .. } => KnowledgeKind::Deck,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Points { title, .. } | Self::Qa { title, .. } | Self::Deck { title, .. } => title,
        }
    }
}

/// A knowledge element with a stable identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeElement {
    pub id: String,
    #[serde(flatten)]
    pub content: KnowledgeContent,
}

impl KnowledgeElement {
    pub fn kind(&self) -> KnowledgeKind {
        self.content.kind()
    }
}
