//! Ordered level catalog.
//!
//! The levels supplied at startup sit behind a shared `Arc<[Level]>` and are
//! never mutated. A single review level may be stored next to them; it is
//! indexed as if appended after the last catalog level. Only the controller
//! can add or drop it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::match_engine::error::CatalogError;
use crate::match_engine::models::{Level, Word};
use crate::match_engine::review::REVIEW_LEVEL_NAME;

#[derive(Debug, Clone)]
pub struct LevelCatalog {
    base: Arc<[Level]>,
    review: Option<Level>,
}

impl LevelCatalog {
    /// Validate and wrap `levels`.
    ///
    /// Rejects empty levels, word ids shared by two entries, and levels named
    /// like the review level.
    pub fn new(levels: Vec<Level>) -> Result<Self, CatalogError> {
        let mut owners: HashMap<u32, &str> = HashMap::new();
        for level in levels.iter() {
            if level.name == REVIEW_LEVEL_NAME {
                return Err(CatalogError::ReservedName { name: level.name.clone() });
            }
            if level.words.is_empty() {
                return Err(CatalogError::EmptyLevel { name: level.name.clone() });
            }
            for word in &level.words {
                if let Some(first) = owners.insert(word.id, &level.name) {
                    return Err(CatalogError::DuplicateWordId {
                        id: word.id,
                        first: first.to_string(),
                        second: level.name.clone(),
                    });
                }
            }
        }
        Ok(LevelCatalog { base: levels.into(), review: None })
    }

    /// Parse a JSON array of `{ "name", "words": [{ "id", "text", "meaning" }] }`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// The bundled five-level English → Chinese vocabulary.
    pub fn builtin() -> Self {
        fn level(name: &str, first_id: u32, pairs: [(&str, &str); 6]) -> Level {
            let words = pairs
                .iter()
                .zip(first_id..)
                .map(|(&(text, meaning), id)| Word::new(id, text, meaning))
                .collect();
            Level::new(name, words)
        }
        let levels: Vec<Level> = vec![
            level("Beginner", 1, [
                ("apple", "苹果"), ("banana", "香蕉"), ("cat", "猫"),
                ("dog", "狗"), ("egg", "鸡蛋"), ("fish", "鱼"),
            ]),
            level("Intermediate", 7, [
                ("happy", "开心的"), ("sad", "悲伤的"), ("angry", "生气的"),
                ("excited", "兴奋的"), ("tired", "疲倦的"), ("hungry", "饥饿的"),
            ]),
            level("Advanced", 13, [
                ("beautiful", "美丽的"), ("handsome", "英俊的"), ("clever", "聪明的"),
                ("stupid", "愚蠢的"), ("kind", "善良的"), ("mean", "刻薄的"),
            ]),
            level("Expert", 19, [
                ("mountain", "山"), ("river", "河"), ("ocean", "海洋"),
                ("desert", "沙漠"), ("forest", "森林"), ("field", "田野"),
            ]),
            level("Master", 25, [
                ("computer", "电脑"), ("phone", "手机"), ("tablet", "平板"),
                ("laptop", "笔记本"), ("camera", "相机"), ("watch", "手表"),
            ]),
        ];
        LevelCatalog { base: levels.into(), review: None }
    }

    /// Number of playable levels, review included.
    pub fn len(&self) -> usize {
        self.base.len() + usize::from(self.review.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels supplied at startup.
    pub fn base_len(&self) -> usize {
        self.base.len()
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        match index.checked_sub(self.base.len()) {
            None => self.base.get(index),
            Some(0) => self.review.as_ref(),
            Some(_) => None,
        }
    }

    pub fn is_review_index(&self, index: usize) -> bool {
        self.review.is_some() && index == self.base.len()
    }

    /// Every catalog word in level order. The review level adds nothing new.
    pub fn all_words(&self) -> Vec<Word> {
        self.base.iter().flat_map(|l| l.words.iter().cloned()).collect()
    }

    pub(crate) fn append_review(&mut self, level: Level) -> Result<usize, CatalogError> {
        if self.review.is_some() {
            return Err(CatalogError::ReviewAlreadyPresent);
        }
        self.review = Some(level);
        Ok(self.base.len())
    }

    pub(crate) fn clear_review(&mut self) {
        self.review = None;
    }
}
