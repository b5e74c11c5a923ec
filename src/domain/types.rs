use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a unique identifier for client records.
pub type ClientId = i64;

/// Core domain entity representing a registered client.
///
/// `id` is `None` for entities that have not been persisted yet; storage
/// assigns the identifier on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: Option<ClientId>,
    pub name: String,
    pub tax_id: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub dependents: i32,
}

/// Transport-level representation of a client.
///
/// Carries the same fields as [`Client`] but is the only shape the HTTP
/// surface accepts and returns, so the entity can evolve independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientDto {
    pub id: Option<ClientId>,
    pub name: String,
    pub tax_id: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub dependents: i32,
}

impl ClientDto {
    /// Builds a detached entity carrying this DTO's data.
    pub fn to_entity(&self) -> Client {
        Client {
            id: self.id,
            name: self.name.clone(),
            tax_id: self.tax_id.clone(),
            income: self.income,
            birth_date: self.birth_date,
            dependents: self.dependents,
        }
    }

    /// Copies every data field onto an existing entity, leaving its id alone.
    pub fn apply_to(&self, entity: &mut Client) {
        entity.name = self.name.clone();
        entity.tax_id = self.tax_id.clone();
        entity.income = self.income;
        entity.birth_date = self.birth_date;
        entity.dependents = self.dependents;
    }
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            tax_id: client.tax_id,
            income: client.income,
            birth_date: client.birth_date,
            dependents: client.dependents,
        }
    }
}

impl From<&Client> for ClientDto {
    fn from(client: &Client) -> Self {
        client.clone().into()
    }
}

/// Columns a page of clients can be ordered by.
///
/// Closed set on purpose: the storage layer builds `ORDER BY` clauses from
/// [`SortField::column`], so arbitrary caller-supplied column names never
/// reach the database.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Name,
    TaxId,
    Income,
    BirthDate,
    Dependents,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::TaxId => "tax_id",
            SortField::Income => "income",
            SortField::BirthDate => "birth_date",
            SortField::Dependents => "dependents",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Requested ordering for a page of results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Pagination parameters for list queries. Pages are zero-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Option<Sort>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: None,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }

    pub fn with_sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort = Some(Sort { field, direction });
        self
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of results plus the metadata needed to walk the full set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        let total_pages = if request.size == 0 {
            0
        } else {
            total.div_ceil(u64::from(request.size))
        };
        Self {
            items,
            total,
            page: request.page,
            size: request.size,
            total_pages,
        }
    }

    /// Maps the items while keeping the page metadata untouched.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Wire shape for error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub r#type: String,
    pub message: String,
}

/// Health check status for services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub database: HealthStatus,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new(database: HealthStatus) -> Self {
        Self {
            status: database.clone(),
            database,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn birth_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1975, 11, 10, 7, 0, 0).unwrap()
    }

    fn sample_client() -> Client {
        Client {
            id: Some(1),
            name: "Ana Souza".to_string(),
            tax_id: "10919444522".to_string(),
            income: 4500.0,
            birth_date: birth_date(),
            dependents: 2,
        }
    }

    #[test]
    fn test_dto_round_trip_preserves_fields() {
        let client = sample_client();
        let dto = ClientDto::from(&client);
        let entity = dto.to_entity();

        assert_eq!(entity, client);
    }

    #[test]
    fn test_apply_to_overwrites_data_but_not_id() {
        let mut entity = sample_client();
        let dto = ClientDto {
            id: Some(999),
            name: "Bruno Lima".to_string(),
            tax_id: "22033455677".to_string(),
            income: 7200.0,
            birth_date: birth_date(),
            dependents: 0,
        };

        dto.apply_to(&mut entity);

        assert_eq!(entity.id, Some(1));
        assert_eq!(entity.name, "Bruno Lima");
        assert_eq!(entity.tax_id, "22033455677");
        assert_eq!(entity.income, 7200.0);
        assert_eq!(entity.dependents, 0);
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::new(3, 10);
        assert_eq!(request.offset(), 30);
    }

    #[test]
    fn test_page_request_offset_first_page() {
        let request = PageRequest::new(0, 10);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_page_request_default() {
        let request = PageRequest::default();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 20);
        assert!(request.sort.is_none());
    }

    #[test]
    fn test_page_metadata() {
        let request = PageRequest::new(0, 10);
        let page = Page::new(vec!["a", "b", "c"], 25, &request);

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert!(!page.is_empty());
    }

    #[test]
    fn test_page_metadata_exact_division() {
        let request = PageRequest::new(1, 5);
        let page = Page::new(Vec::<i32>::new(), 20, &request);

        assert_eq!(page.total_pages, 4);
        assert_eq!(page.page, 1);
        assert_eq!(page.size, 5);
    }

    #[test]
    fn test_page_metadata_empty() {
        let request = PageRequest::new(0, 10);
        let page = Page::new(Vec::<i32>::new(), 0, &request);

        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());
    }

    #[test]
    fn test_page_map_preserves_metadata() {
        let request = PageRequest::new(2, 4);
        let page = Page::new(vec![1, 2, 3, 4], 13, &request);
        let mapped = page.map(|n| n.to_string());

        assert_eq!(mapped.items, vec!["1", "2", "3", "4"]);
        assert_eq!(mapped.total, 13);
        assert_eq!(mapped.page, 2);
        assert_eq!(mapped.size, 4);
        assert_eq!(mapped.total_pages, 4);
    }

    #[test]
    fn test_sort_field_columns() {
        assert_eq!(SortField::Id.column(), "id");
        assert_eq!(SortField::Name.column(), "name");
        assert_eq!(SortField::TaxId.column(), "tax_id");
        assert_eq!(SortField::Income.column(), "income");
        assert_eq!(SortField::BirthDate.column(), "birth_date");
        assert_eq!(SortField::Dependents.column(), "dependents");
    }

    #[test]
    fn test_sort_direction_sql() {
        assert_eq!(SortDirection::Asc.as_sql(), "ASC");
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
        assert_eq!(SortDirection::default(), SortDirection::Asc);
    }

    #[test]
    fn test_sort_field_deserializes_from_snake_case() {
        let field: SortField = serde_json::from_str("\"birth_date\"").unwrap();
        assert_eq!(field, SortField::BirthDate);

        let direction: SortDirection = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(direction, SortDirection::Desc);
    }

    #[test]
    fn test_with_sort_builder() {
        let request = PageRequest::new(0, 1).with_sort(SortField::Name, SortDirection::Asc);
        let sort = request.sort.unwrap();

        assert_eq!(sort.field, SortField::Name);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_health_response_mirrors_database_status() {
        let healthy = HealthResponse::new(HealthStatus::Healthy);
        assert_eq!(healthy.status, HealthStatus::Healthy);

        let unhealthy = HealthResponse::new(HealthStatus::Unhealthy);
        assert_eq!(unhealthy.status, HealthStatus::Unhealthy);
    }

    #[test]
    fn test_client_serialization() {
        let client = sample_client();
        let json = serde_json::to_string(&client).unwrap();
        let deserialized: Client = serde_json::from_str(&json).unwrap();

        assert_eq!(client, deserialized);
    }

    #[test]
    fn test_dto_deserializes_without_id() {
        let json = r#"{
            "name": "Carla Mendes",
            "tax_id": "33144566788",
            "income": 2500.0,
            "birth_date": "1990-07-20T10:30:00Z",
            "dependents": 1
        }"#;

        let dto: ClientDto = serde_json::from_str(json).unwrap();
        assert!(dto.id.is_none());
        assert_eq!(dto.name, "Carla Mendes");
        assert_eq!(dto.dependents, 1);
    }
}
