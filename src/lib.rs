//! Student CRUD service: record store, service façade, and HTTP routes.

pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use model::Student;
pub use routes::{app, common_routes, student_routes};
pub use service::StudentService;
pub use settings::{Settings, StoreKind};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_student_table, MemoryStudentStore, PgStudentStore, StudentStore};
