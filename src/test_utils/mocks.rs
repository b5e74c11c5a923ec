//! Mock implementations for testing.
//!
//! These mocks provide in-memory implementations of domain traits
//! that can be configured to simulate various scenarios including
//! success, failure, and edge cases.

use async_trait::async_trait;
use std::cmp::Ordering as CmpOrdering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::Mutex;

use crate::domain::{
    Client, ClientId, ClientRepository, DatabaseError, Page, PageRequest, Sort, SortField,
};

/// Configuration for mock behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// If true, operations will fail.
    pub should_fail: bool,
    /// Custom error message for failures.
    pub error_message: Option<String>,
}

impl MockConfig {
    /// Creates a config that always succeeds.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a config that always fails.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }
}

/// Per-method invocation counters, so tests can assert exactly which
/// repository calls a service operation performed.
#[derive(Debug, Default)]
struct CallCounts {
    health_check: AtomicU64,
    find_by_id: AtomicU64,
    find_all: AtomicU64,
    find_by_income: AtomicU64,
    save: AtomicU64,
    fetch_for_update: AtomicU64,
    delete_by_id: AtomicU64,
}

/// Mock client repository for testing.
///
/// Uses an in-memory ordered map for storage, mirrors the real
/// implementation's paging and sorting semantics, and supports
/// configurable failure modes.
///
/// # Example
///
/// ```
/// use client_service::test_utils::{MockClientRepository, mocks::MockConfig};
///
/// // Create a mock that succeeds
/// let mock = MockClientRepository::new();
///
/// // Create a mock that fails
/// let failing_mock = MockClientRepository::with_config(MockConfig::failure("DB error"));
/// ```
pub struct MockClientRepository {
    storage: Mutex<BTreeMap<ClientId, Client>>,
    config: MockConfig,
    calls: CallCounts,
    next_id: AtomicI64,
    saved: Mutex<Vec<Client>>,
    is_healthy: AtomicBool,
}

impl MockClientRepository {
    /// Creates a new mock with default (success) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    /// Creates a new mock with the given configuration.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            storage: Mutex::new(BTreeMap::new()),
            config,
            calls: CallCounts::default(),
            next_id: AtomicI64::new(1),
            saved: Mutex::new(Vec::new()),
            is_healthy: AtomicBool::new(true),
        }
    }

    /// Creates a mock that always fails.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    /// Seeds the mock with existing clients. Entries without an id get one
    /// assigned, and the id sequence continues past the highest seeded id.
    #[must_use]
    pub fn with_clients(self, clients: Vec<Client>) -> Self {
        {
            let mut storage = self.storage.lock().unwrap();
            for mut client in clients {
                let id = match client.id {
                    Some(id) => id,
                    None => self.next_id.fetch_add(1, Ordering::Relaxed),
                };
                client.id = Some(id);
                storage.insert(id, client);
            }
            if let Some(max_id) = storage.keys().next_back() {
                self.next_id.store(max_id + 1, Ordering::Relaxed);
            }
        }
        self
    }

    pub fn health_check_calls(&self) -> u64 {
        self.calls.health_check.load(Ordering::Relaxed)
    }

    pub fn find_by_id_calls(&self) -> u64 {
        self.calls.find_by_id.load(Ordering::Relaxed)
    }

    pub fn find_all_calls(&self) -> u64 {
        self.calls.find_all.load(Ordering::Relaxed)
    }

    pub fn find_by_income_calls(&self) -> u64 {
        self.calls.find_by_income.load(Ordering::Relaxed)
    }

    pub fn save_calls(&self) -> u64 {
        self.calls.save.load(Ordering::Relaxed)
    }

    pub fn fetch_for_update_calls(&self) -> u64 {
        self.calls.fetch_for_update.load(Ordering::Relaxed)
    }

    pub fn delete_by_id_calls(&self) -> u64 {
        self.calls.delete_by_id.load(Ordering::Relaxed)
    }

    /// Gets the number of times any method was called.
    pub fn call_count(&self) -> u64 {
        self.health_check_calls()
            + self.find_by_id_calls()
            + self.find_all_calls()
            + self.find_by_income_calls()
            + self.save_calls()
            + self.fetch_for_update_calls()
            + self.delete_by_id_calls()
    }

    /// Sets the health status.
    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    /// Gets all stored clients in id order.
    pub fn get_all_clients(&self) -> Vec<Client> {
        self.storage.lock().unwrap().values().cloned().collect()
    }

    /// Gets every entity passed to `save`, in call order.
    pub fn saved_clients(&self) -> Vec<Client> {
        self.saved.lock().unwrap().clone()
    }

    /// Clears all stored clients.
    pub fn clear(&self) {
        self.storage.lock().unwrap().clear();
    }

    fn check_should_fail(&self) -> Result<(), DatabaseError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock database error".to_string());
            return Err(DatabaseError::Query(msg));
        }
        Ok(())
    }

    fn page_of(&self, mut items: Vec<Client>, request: &PageRequest) -> Page<Client> {
        if let Some(sort) = &request.sort {
            items.sort_by(|a, b| compare_clients(a, b, sort));
        }
        let total = items.len() as u64;
        let page_items = items
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();
        Page::new(page_items, total, request)
    }
}

impl Default for MockClientRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_clients(a: &Client, b: &Client, sort: &Sort) -> CmpOrdering {
    let ordering = match sort.field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::TaxId => a.tax_id.cmp(&b.tax_id),
        SortField::Income => a
            .income
            .partial_cmp(&b.income)
            .unwrap_or(CmpOrdering::Equal),
        SortField::BirthDate => a.birth_date.cmp(&b.birth_date),
        SortField::Dependents => a.dependents.cmp(&b.dependents),
    };
    match sort.direction {
        crate::domain::SortDirection::Asc => ordering,
        crate::domain::SortDirection::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl ClientRepository for MockClientRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.calls.health_check.fetch_add(1, Ordering::Relaxed);

        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(DatabaseError::Connection(
                "Mock database unhealthy".to_string(),
            ));
        }

        self.check_should_fail()
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DatabaseError> {
        self.calls.find_by_id.fetch_add(1, Ordering::Relaxed);
        self.check_should_fail()?;

        let storage = self.storage.lock().unwrap();
        Ok(storage.get(&id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Client>, DatabaseError> {
        self.calls.find_all.fetch_add(1, Ordering::Relaxed);
        self.check_should_fail()?;

        // BTreeMap iteration already matches the default id ordering.
        let items: Vec<Client> = self.storage.lock().unwrap().values().cloned().collect();
        Ok(self.page_of(items, page))
    }

    async fn find_by_income(
        &self,
        income: f64,
        page: &PageRequest,
    ) -> Result<Page<Client>, DatabaseError> {
        self.calls.find_by_income.fetch_add(1, Ordering::Relaxed);
        self.check_should_fail()?;

        let items: Vec<Client> = self
            .storage
            .lock()
            .unwrap()
            .values()
            .filter(|client| client.income == income)
            .cloned()
            .collect();
        Ok(self.page_of(items, page))
    }

    async fn save(&self, client: &Client) -> Result<Client, DatabaseError> {
        self.calls.save.fetch_add(1, Ordering::Relaxed);
        self.check_should_fail()?;

        let mut persisted = client.clone();
        let mut storage = self.storage.lock().unwrap();

        let id = match persisted.id {
            None => self.next_id.fetch_add(1, Ordering::Relaxed),
            Some(id) => {
                if !storage.contains_key(&id) {
                    return Err(DatabaseError::EmptyResult(format!(
                        "client {} not found",
                        id
                    )));
                }
                id
            }
        };
        persisted.id = Some(id);
        storage.insert(id, persisted.clone());

        self.saved.lock().unwrap().push(persisted.clone());
        Ok(persisted)
    }

    async fn fetch_for_update(&self, id: ClientId) -> Result<Client, DatabaseError> {
        self.calls.fetch_for_update.fetch_add(1, Ordering::Relaxed);
        self.check_should_fail()?;

        let storage = self.storage.lock().unwrap();
        storage
            .get(&id)
            .cloned()
            .ok_or_else(|| DatabaseError::EmptyResult(format!("client {} not found", id)))
    }

    async fn delete_by_id(&self, id: ClientId) -> Result<(), DatabaseError> {
        self.calls.delete_by_id.fetch_add(1, Ordering::Relaxed);
        self.check_should_fail()?;

        let mut storage = self.storage.lock().unwrap();
        if storage.remove(&id).is_none() {
            return Err(DatabaseError::EmptyResult(format!(
                "client {} not found",
                id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortDirection;
    use crate::test_utils::fixtures;

    #[tokio::test]
    async fn test_mock_save_assigns_sequential_ids() {
        let mock = MockClientRepository::new();

        let mut client = fixtures::client(1);
        client.id = None;

        let first = mock.save(&client).await.unwrap();
        let second = mock.save(&client).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_mock_seed_and_find() {
        let mock = MockClientRepository::new().with_clients(vec![fixtures::client(7)]);

        let found = mock.find_by_id(7).await.unwrap();
        assert_eq!(found.unwrap().id, Some(7));

        let missing = mock.find_by_id(99).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_mock_seed_continues_id_sequence() {
        let mock = MockClientRepository::new().with_clients(vec![fixtures::client(10)]);

        let mut fresh = fixtures::client(1);
        fresh.id = None;
        let saved = mock.save(&fresh).await.unwrap();

        assert_eq!(saved.id, Some(11));
    }

    #[tokio::test]
    async fn test_mock_save_with_unknown_id_is_empty_result() {
        let mock = MockClientRepository::new();

        let result = mock.save(&fixtures::client(42)).await;
        assert!(matches!(result, Err(DatabaseError::EmptyResult(_))));
    }

    #[tokio::test]
    async fn test_mock_delete_missing_is_empty_result() {
        let mock = MockClientRepository::new();

        let result = mock.delete_by_id(5).await;
        assert!(matches!(result, Err(DatabaseError::EmptyResult(_))));
    }

    #[tokio::test]
    async fn test_mock_paging_and_sorting() {
        let clients = vec![
            fixtures::client_named(1, "Carla"),
            fixtures::client_named(2, "Ana"),
            fixtures::client_named(3, "Bruno"),
        ];
        let mock = MockClientRepository::new().with_clients(clients);

        let request = PageRequest::new(0, 2).with_sort(SortField::Name, SortDirection::Asc);
        let page = mock.find_all(&request).await.unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);
    }

    #[tokio::test]
    async fn test_mock_unsorted_pages_follow_id_order() {
        let mock = MockClientRepository::new().with_clients(vec![
            fixtures::client(3),
            fixtures::client(1),
            fixtures::client(2),
        ]);

        let page = mock.find_all(&PageRequest::new(0, 10)).await.unwrap();
        let ids: Vec<ClientId> = page.items.iter().filter_map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_mock_income_filter_is_exact() {
        let mock = MockClientRepository::new().with_clients(vec![
            fixtures::client_with_income(1, 4500.0),
            fixtures::client_with_income(2, 4500.5),
            fixtures::client_with_income(3, 4500.0),
        ]);

        let page = mock
            .find_by_income(4500.0, &PageRequest::new(0, 10))
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        let ids: Vec<ClientId> = page.items.iter().filter_map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let mock = MockClientRepository::failing("Connection timeout");

        let result = mock.find_by_id(1).await;
        assert!(matches!(result, Err(DatabaseError::Query(msg)) if msg == "Connection timeout"));
    }

    #[tokio::test]
    async fn test_mock_per_method_call_counts() {
        let mock = MockClientRepository::new().with_clients(vec![fixtures::client(1)]);

        let _ = mock.find_by_id(1).await;
        let _ = mock.find_by_id(2).await;
        let _ = mock.fetch_for_update(1).await;
        let _ = mock.save(&fixtures::client(1)).await;

        assert_eq!(mock.find_by_id_calls(), 2);
        assert_eq!(mock.fetch_for_update_calls(), 1);
        assert_eq!(mock.save_calls(), 1);
        assert_eq!(mock.delete_by_id_calls(), 0);
        assert_eq!(mock.call_count(), 4);
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let mock = MockClientRepository::new();
        assert!(mock.health_check().await.is_ok());

        mock.set_healthy(false);
        assert!(matches!(
            mock.health_check().await,
            Err(DatabaseError::Connection(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_clear() {
        let mock = MockClientRepository::new().with_clients(vec![fixtures::client(1)]);
        assert_eq!(mock.get_all_clients().len(), 1);

        mock.clear();
        assert!(mock.get_all_clients().is_empty());
    }
}
