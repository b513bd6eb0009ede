//! In-memory paper store shared by tool handlers.

use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::analysis::PlagiarismReport;
use crate::models::{GeneratedPaper, PaperSummary};

/// Papers keyed by id; lives for the process lifetime
#[derive(Debug, Default)]
pub struct PaperStore {
    papers: RwLock<HashMap<Uuid, GeneratedPaper>>,
}

impl PaperStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, paper: GeneratedPaper) {
        self.papers.write().await.insert(paper.paper_id, paper);
    }

    pub async fn get(&self, id: &Uuid) -> Option<GeneratedPaper> {
        self.papers.read().await.get(id).cloned()
    }

    /// Newest first
    pub async fn list(&self) -> Vec<PaperSummary> {
        let papers = self.papers.read().await;
        let mut entries: Vec<PaperSummary> = papers.values().map(|p| p.summary_entry()).collect();
        entries.sort_by(|a, b| {
            b.generated_at
                .cmp(&a.generated_at)
                .then_with(|| a.paper_id.cmp(&b.paper_id))
        });
        entries
    }

    /// Returns whether a paper was removed
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.papers.write().await.remove(id).is_some()
    }

    /// Replace the paper's plagiarism report; false if the paper is unknown
    pub async fn set_plagiarism_report(&self, id: &Uuid, report: PlagiarismReport) -> bool {
        match self.papers.write().await.get_mut(id) {
            Some(paper) => {
                paper.plagiarism_check = Some(report);
                true
            }
            None => false,
        }
    }

    /// Papers that carry a plagiarism report
    pub async fn checked(&self) -> Vec<GeneratedPaper> {
        self.papers
            .read()
            .await
            .values()
            .filter(|p| p.plagiarism_check.is_some())
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.papers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.papers.read().await.is_empty()
    }
}
