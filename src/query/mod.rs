//! Composición de consultas
//!
//! Compilador de criterios a predicados y tipos de paginación.

pub mod criteria;
pub mod page;
pub mod predicate;

pub use criteria::{compile, SearchCriteria};
pub use page::{total_pages, PageEnvelope, PageRequest, ResolvedPage, Sort, SortField, SortOrder};
pub use predicate::{CompareOp, FieldValue, Predicate, VehicleField};
