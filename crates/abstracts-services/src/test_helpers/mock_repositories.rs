//! Mock submission store for testing without a database

use abstracts_core::models::{NewSubmission, Submission};
use abstracts_core::SubmissionCode;
use abstracts_db::{StoreError, SubmissionStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory store deriving ordinals from the row count, the racy way.
///
/// `count()` yields between reading and returning, so concurrent attempts
/// see the same count and collide on the code; uniqueness is still enforced
/// on insert.
#[derive(Clone, Default)]
pub struct MockSubmissionStore {
    records: Arc<Mutex<Vec<Submission>>>,
    failures: Arc<Mutex<VecDeque<StoreError>>>,
    ordinal_offset: u64,
    unavailable: Arc<AtomicBool>,
    insert_calls: Arc<AtomicUsize>,
    ordinal_calls: Arc<AtomicUsize>,
}

impl MockSubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose ordinals start after `offset`.
    pub fn with_ordinal_offset(offset: u64) -> Self {
        Self {
            ordinal_offset: offset,
            ..Self::default()
        }
    }

    /// Make the next insert fail with `err`. Calls queue up.
    pub fn fail_next_insert(&self, err: StoreError) {
        self.failures.lock().unwrap().push_back(err);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> Vec<Submission> {
        self.records.lock().unwrap().clone()
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn ordinal_calls(&self) -> usize {
        self.ordinal_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("Mock store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for MockSubmissionStore {
    async fn count(&self) -> Result<u64, StoreError> {
        self.check_available()?;
        let count = self.records.lock().unwrap().len() as u64;
        tokio::task::yield_now().await;
        Ok(count + self.ordinal_offset)
    }

    async fn next_ordinal(&self) -> Result<u64, StoreError> {
        self.ordinal_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.count().await? + 1)
    }

    async fn insert(
        &self,
        record: &NewSubmission,
        code: &SubmissionCode,
        submitted_at: DateTime<Utc>,
    ) -> Result<Submission, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }

        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.codigo_submissao == code.as_str()) {
            return Err(StoreError::DuplicateCode(code.to_string()));
        }

        let submission = Submission {
            id: Uuid::new_v4(),
            nome: record.nome.clone(),
            cpf: record.cpf.clone(),
            estado: record.estado.clone(),
            cidade: record.cidade.clone(),
            instituicao: record.instituicao.clone(),
            email: record.email.clone(),
            areas: record.areas.clone(),
            pdf_url: record.pdf_url.clone(),
            codigo_submissao: code.to_string(),
            data_envio: submitted_at,
        };
        records.push(submission.clone());
        Ok(submission)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Submission>, StoreError> {
        self.check_available()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.codigo_submissao == code)
            .cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
