use tracing::{debug, error, warn};

use crate::models::{ExamCache, ExamSession, QuestionNumber, StudentAnswer};

use super::store::{CacheStore, PersistenceError};

/// Crash-tolerant persistence of the in-progress exam.
///
/// No operation fails: storage and parse faults are logged and degrade to
/// a no-op for writes or a cache miss for reads. Losing the cache is
/// preferable to interrupting an exam.
#[derive(Debug, Clone)]
pub struct AnswerCache<S: CacheStore> {
    store: S,
}

impl<S: CacheStore> AnswerCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[allow(dead_code)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace whatever is in the slot with a fresh cache for `session`.
    pub fn initialize_cache(&self, session: &ExamSession) {
        let cache = ExamCache::new(session.clone());
        self.persist(&cache);
    }

    pub fn load_cache(&self) -> Option<ExamCache> {
        match self.try_load() {
            Ok(cache) => cache,
            Err(PersistenceError::Corrupt(e)) => {
                warn!("Discarding unreadable exam cache: {}", e);
                None
            }
            Err(e) => {
                error!("Failed to load exam cache: {}", e);
                None
            }
        }
    }

    /// Store `answer` under `question_number`. Does nothing without a cache.
    pub fn save_answer(&self, question_number: QuestionNumber, answer: StudentAnswer) {
        let Some(mut cache) = self.load_cache() else {
            debug!(
                "save_answer: no exam cache, dropping answer for question {}",
                question_number
            );
            return;
        };

        cache.put_answer(question_number, answer);
        self.persist(&cache);
    }

    pub fn get_answer(&self, question_number: QuestionNumber) -> Option<StudentAnswer> {
        self.load_cache()?.answers.remove(&question_number)
    }

    /// Does nothing without a cache.
    pub fn set_current_question(&self, question_number: QuestionNumber) {
        let Some(mut cache) = self.load_cache() else {
            debug!(
                "set_current_question: no exam cache, ignoring question {}",
                question_number
            );
            return;
        };

        cache.set_current_question(question_number);
        self.persist(&cache);
    }

    pub fn clear_cache(&self) {
        if let Err(e) = self.store.clear() {
            error!("Failed to clear exam cache: {}", e);
        }
    }

    fn try_load(&self) -> Result<Option<ExamCache>, PersistenceError> {
        let Some(content) = self.store.get()? else {
            return Ok(None);
        };
        let cache: ExamCache = serde_json::from_str(&content)?;
        Ok(Some(cache))
    }

    fn persist(&self, cache: &ExamCache) {
        let result = serde_json::to_string(cache)
            .map_err(PersistenceError::from)
            .and_then(|content| self.store.set(&content));

        match result {
            Ok(()) => debug!(
                "Saved exam cache ({} answers, question {})",
                cache.answers.len(),
                cache.current_question
            ),
            Err(e) => error!("Failed to save exam cache: {}", e),
        }
    }
}
