//! Deterministic builders for client test data.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::{Client, ClientDto, ClientId};

/// Fixed base birth date so fixtures stay stable across runs.
fn base_birth_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1980, 1, 1, 12, 0, 0).unwrap()
}

/// A persisted-looking client whose fields are derived from `id`.
pub fn client(id: ClientId) -> Client {
    Client {
        id: Some(id),
        name: format!("Client {:03}", id),
        tax_id: format!("{:011}", 10_000_000_000_u64 + id as u64),
        income: 1000.0 + (id as f64) * 100.0,
        birth_date: base_birth_date() + Duration::days(id),
        dependents: (id % 4) as i32,
    }
}

pub fn client_named(id: ClientId, name: &str) -> Client {
    let mut fixture = client(id);
    fixture.name = name.to_string();
    fixture
}

pub fn client_with_income(id: ClientId, income: f64) -> Client {
    let mut fixture = client(id);
    fixture.income = income;
    fixture
}

/// The DTO shape of [`client`].
pub fn dto(id: ClientId) -> ClientDto {
    ClientDto::from(client(id))
}

/// An unsaved DTO for create requests.
pub fn new_dto(name: &str, income: f64) -> ClientDto {
    ClientDto {
        id: None,
        name: name.to_string(),
        tax_id: "98765432100".to_string(),
        income,
        birth_date: base_birth_date(),
        dependents: 0,
    }
}
