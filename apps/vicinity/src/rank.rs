//! # Ranking Engine
//!
//! Plain-text tokenizer and inverted index over the document store.
//!
//! All scores are integer millionths; no floating point anywhere. Rare
//! terms dominate through document-frequency weighting, and every
//! ordering breaks ties by ascending id, so ranking is total and
//! deterministic.

use std::collections::BTreeMap;

use vicinity_core::{DocId, Document, DocumentStore, VicinityError};

// =============================================================================
// SCORING CONSTANTS
// =============================================================================

/// Integer scale for scores: one point is one millionth.
pub const SCORE_SCALE: i64 = 1_000_000;

/// Weight of a title token.
const TITLE_WEIGHT: i64 = 10;

/// Weight of a description token.
const DESCRIPTION_WEIGHT: i64 = 5;

/// Weight of a URL token.
const URL_WEIGHT: i64 = 1;

/// Tokens longer than this are discarded as noise.
const MAX_TOKEN_LENGTH: usize = 40;

/// Tokens carrying no ranking signal, in folded lowercase form.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "if",
    "in", "into", "is", "it", "its", "no", "not", "of", "on", "or", "that", "the", "their", "then",
    "there", "these", "they", "this", "to", "was", "were", "will", "with", "aber", "als", "auch",
    "auf", "aus", "bei", "das", "dem", "den", "der", "des", "die", "ein", "eine", "einen", "einer",
    "es", "fur", "im", "ist", "mit", "nach", "nicht", "oder", "sich", "sind", "uber", "und", "von",
    "wie", "zu", "zum", "zur",
];

// =============================================================================
// TOKENIZER
// =============================================================================

/// Split text into lowercase search tokens.
///
/// Umlauts fold to their base vowel and ß to s so German text matches
/// across spellings. Every non-alphanumeric character separates tokens.
/// Stopwords and over-long tokens are dropped.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        match c {
            'ä' | 'Ä' => current.push('a'),
            'ö' | 'Ö' => current.push('o'),
            'ü' | 'Ü' => current.push('u'),
            'ß' => current.push('s'),
            _ if c.is_alphanumeric() => current.extend(c.to_lowercase()),
            _ => flush_token(&mut current, &mut tokens),
        }
    }
    flush_token(&mut current, &mut tokens);

    tokens
}

/// Move the pending token into the list when it carries signal.
fn flush_token(current: &mut String, tokens: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let token = std::mem::take(current);
    if token.chars().count() <= MAX_TOKEN_LENGTH && !STOPWORDS.contains(&token.as_str()) {
        tokens.push(token);
    }
}

// =============================================================================
// DOCUMENT INDEX
// =============================================================================

/// A ranked document with its relevance score in millionths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedDocument {
    /// The matched document.
    pub document: Document,
    /// Relevance score, scaled by [`SCORE_SCALE`].
    pub millionths: i64,
}

/// Inverted index over a document corpus.
///
/// Maps each token to the documents containing it, with field-weighted
/// term counts. `BTreeMap` keys keep every iteration ordered, so equal
/// corpora index identically.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    /// token -> document -> weighted term count.
    postings: BTreeMap<String, BTreeMap<DocId, i64>>,
    /// document -> token -> weighted term count.
    profiles: BTreeMap<DocId, BTreeMap<String, i64>>,
    /// document -> full record, for returning ranked results.
    documents: BTreeMap<DocId, Document>,
}

impl DocumentIndex {
    /// Index every document in the store.
    pub fn build<S: DocumentStore>(store: &S) -> Result<Self, VicinityError> {
        let mut index = Self::default();
        for document in store.all()? {
            index.insert(&document);
        }
        Ok(index)
    }

    /// Add one document to the index. Store listings carry each id once,
    /// so no entry is ever overwritten.
    fn insert(&mut self, document: &Document) {
        let mut profile: BTreeMap<String, i64> = BTreeMap::new();
        accumulate(&mut profile, &document.title, TITLE_WEIGHT);
        accumulate(&mut profile, &document.description, DESCRIPTION_WEIGHT);
        accumulate(&mut profile, &document.url, URL_WEIGHT);

        for (token, weight) in &profile {
            self.postings
                .entry(token.clone())
                .or_default()
                .insert(document.id, *weight);
        }
        self.profiles.insert(document.id, profile);
        self.documents.insert(document.id, document.clone());
    }

    /// Rarity weight of a token: the scale divided by its document
    /// frequency. A token found everywhere is worth little; a token in
    /// a single document is worth the full scale.
    fn rarity(&self, token: &str) -> i64 {
        match self.postings.get(token) {
            Some(docs) if !docs.is_empty() => SCORE_SCALE / docs.len() as i64,
            _ => 0,
        }
    }

    /// Rank documents against a free-text query.
    ///
    /// Each query token contributes its rarity weight times the
    /// document's weighted count of that token. At most `limit`
    /// results; zero-score documents are excluded.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<RankedDocument> {
        let mut scores: BTreeMap<DocId, i64> = BTreeMap::new();

        for token in tokenize(query) {
            let rarity = self.rarity(&token);
            if rarity == 0 {
                continue;
            }
            if let Some(docs) = self.postings.get(&token) {
                for (id, count) in docs {
                    let slot = scores.entry(*id).or_insert(0);
                    *slot = slot.saturating_add(count.saturating_mul(rarity));
                }
            }
        }

        self.ranked(scores, limit)
    }

    /// Rank documents by similarity to one document's token profile.
    ///
    /// Shared tokens contribute the smaller of the two weighted counts
    /// times the token's rarity. The document itself is excluded.
    #[must_use]
    pub fn similar_to(&self, id: &DocId, limit: usize) -> Vec<RankedDocument> {
        let Some(profile) = self.profiles.get(id) else {
            return Vec::new();
        };

        let mut scores: BTreeMap<DocId, i64> = BTreeMap::new();
        for (token, own_count) in profile {
            let rarity = self.rarity(token);
            if rarity == 0 {
                continue;
            }
            if let Some(docs) = self.postings.get(token) {
                for (other, count) in docs {
                    if other == id {
                        continue;
                    }
                    let shared = (*own_count).min(*count);
                    let slot = scores.entry(*other).or_insert(0);
                    *slot = slot.saturating_add(shared.saturating_mul(rarity));
                }
            }
        }

        self.ranked(scores, limit)
    }

    /// Order scored documents: descending score, ascending id, capped at
    /// `limit`.
    fn ranked(&self, scores: BTreeMap<DocId, i64>, limit: usize) -> Vec<RankedDocument> {
        let mut hits: Vec<(DocId, i64)> = scores
            .into_iter()
            .filter(|(_, score)| *score > 0)
            .collect();
        hits.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        hits.truncate(limit);

        hits.into_iter()
            .filter_map(|(id, millionths)| {
                self.documents.get(&id).map(|document| RankedDocument {
                    document: document.clone(),
                    millionths,
                })
            })
            .collect()
    }
}

/// Add the weighted token counts of one field to a profile.
fn accumulate(profile: &mut BTreeMap<String, i64>, text: &str, weight: i64) {
    for token in tokenize(text) {
        let slot = profile.entry(token).or_insert(0);
        *slot = slot.saturating_add(weight);
    }
}
