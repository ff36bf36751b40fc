use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    error::PersistenceError,
    types::{NewItineraryRecord, StoredItineraryRecord},
};

pub const DEFAULT_PAGE_LIMIT: usize = 10;
pub const MAX_PAGE_LIMIT: usize = 50;
const POPULAR_DESTINATIONS: usize = 5;

/// Storage collaborator for generated itineraries.
#[async_trait]
pub trait ItineraryStore: Send + Sync {
    /// Persist a record and return its assigned id.
    async fn save(&self, record: NewItineraryRecord) -> Result<u64, PersistenceError>;
}

/// Listing filter for public itineraries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanQuery {
    pub page: usize,
    pub limit: usize,
    pub destination: Option<String>,
}

impl PlanQuery {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit,
            destination: None,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Out-of-range paging falls back to page 1 and the default limit.
    fn normalized(&self) -> (usize, usize) {
        let page = self.page.max(1);
        let limit = if (1..=MAX_PAGE_LIMIT).contains(&self.limit) {
            self.limit
        } else {
            DEFAULT_PAGE_LIMIT
        };
        (page, limit)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanPage {
    pub records: Vec<StoredItineraryRecord>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanStats {
    pub total_plans: usize,
    pub popular_destinations: Vec<String>,
    pub average_duration: f64,
}

/// In-process itinerary store backing public browsing.
#[derive(Debug, Default)]
pub struct MemoryItineraryStore {
    records: RwLock<Vec<StoredItineraryRecord>>,
    next_id: AtomicU64,
}

impl MemoryItineraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Public itineraries, newest first, optionally filtered by destination substring.
    pub async fn list_public(&self, query: &PlanQuery) -> PlanPage {
        let (page, limit) = query.normalized();
        let needle = query
            .destination
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_lowercase);

        let records = self.records.read().await;
        let mut matching: Vec<&StoredItineraryRecord> = records
            .iter()
            .filter(|record| record.is_public())
            .filter(|record| match &needle {
                Some(needle) => record.summary.destination.to_lowercase().contains(needle),
                None => true,
            })
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len();
        let records = matching
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .cloned()
            .collect();

        PlanPage {
            records,
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        }
    }

    /// Fetch a public itinerary and count the view.
    pub async fn get_public(&self, id: u64) -> Option<StoredItineraryRecord> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| record.id == id && record.is_public())?;

        record.view_count = record.view_count.saturating_add(1);
        record.updated_at = Utc::now();
        Some(record.clone())
    }

    pub async fn stats(&self) -> PlanStats {
        let records = self.records.read().await;

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records.iter() {
            *counts.entry(record.summary.destination.as_str()).or_default() += 1;
        }
        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        let average_duration = if records.is_empty() {
            0.0
        } else {
            records.iter().map(|r| f64::from(r.summary.duration)).sum::<f64>()
                / records.len() as f64
        };

        PlanStats {
            total_plans: records.len(),
            popular_destinations: ranked
                .into_iter()
                .take(POPULAR_DESTINATIONS)
                .map(|(destination, _)| destination.to_string())
                .collect(),
            average_duration,
        }
    }
}

#[async_trait]
impl ItineraryStore for MemoryItineraryStore {
    async fn save(&self, record: NewItineraryRecord) -> Result<u64, PersistenceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let stored = StoredItineraryRecord::from_new(id, record, Utc::now());

        debug!(
            target: "tripwand::store",
            id,
            destination = %stored.summary.destination,
            "itinerary stored"
        );

        self.records.write().await.push(stored);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ActivityBlock, DayPlan, ItineraryRequest, ItineraryResult, RequestSummary, Visibility,
    };

    fn record(destination: &str, duration: u32, visibility: Visibility) -> NewItineraryRecord {
        let block = ActivityBlock::new("Walk", "Walk around");
        NewItineraryRecord {
            summary: RequestSummary::from(&ItineraryRequest::new(destination, duration)),
            plan: ItineraryResult {
                itinerary: vec![DayPlan {
                    day: 1,
                    morning: block.clone(),
                    afternoon: block.clone(),
                    evening: block.clone(),
                    night: block,
                }],
                estimated_cost: 100_000,
                cautions: vec![],
            },
            visibility,
        }
    }

    #[tokio::test]
    async fn test_list_public_filters_and_pages() {
        let store = MemoryItineraryStore::new();
        for destination in ["Busan", "Jeju", "Busan Haeundae", "Seoul"] {
            store.save(record(destination, 3, Visibility::Public)).await.unwrap();
        }
        store.save(record("Busan", 2, Visibility::Private)).await.unwrap();

        let page = store.list_public(&PlanQuery::new(1, 10).with_destination("busan")).await;
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
        assert!(page.records.iter().all(|r| r.is_public()));
        assert_eq!(page.records[0].summary.destination, "Busan Haeundae");

        let second = store.list_public(&PlanQuery::new(2, 3)).await;
        assert_eq!(second.total, 4);
        assert_eq!(second.total_pages, 2);
        assert_eq!(second.records.len(), 1);
        assert_eq!(second.records[0].summary.destination, "Busan");
    }

    #[tokio::test]
    async fn test_out_of_range_paging_uses_defaults() {
        let store = MemoryItineraryStore::new();
        let page = store.list_public(&PlanQuery::new(0, 500)).await;

        assert_eq!(page.page, 1);
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_get_public_counts_views() {
        let store = MemoryItineraryStore::new();
        let public = store.save(record("Gyeongju", 2, Visibility::Public)).await.unwrap();
        let private = store.save(record("Gyeongju", 2, Visibility::Private)).await.unwrap();

        assert_eq!(store.get_public(public).await.unwrap().view_count, 1);
        assert_eq!(store.get_public(public).await.unwrap().view_count, 2);
        assert!(store.get_public(private).await.is_none());
        assert!(store.get_public(999).await.is_none());
    }

    #[tokio::test]
    async fn test_stats() {
        let store = MemoryItineraryStore::new();
        assert_eq!(store.stats().await.average_duration, 0.0);

        store.save(record("Jeju", 4, Visibility::Public)).await.unwrap();
        store.save(record("Jeju", 2, Visibility::Public)).await.unwrap();
        store.save(record("Busan", 3, Visibility::Private)).await.unwrap();

        let stats = store.stats().await;
        assert_eq!(stats.total_plans, 3);
        assert_eq!(stats.popular_destinations, vec!["Jeju", "Busan"]);
        assert!((stats.average_duration - 3.0).abs() < f64::EPSILON);
    }
}
