//! Domain layer containing core business types, traits, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, DatabaseError};
pub use traits::ClientRepository;
pub use types::{
    Client, ClientDto, ClientId, ErrorDetail, ErrorResponse, HealthResponse, HealthStatus, Page,
    PageRequest, Sort, SortDirection, SortField,
};
