//! Desktop-side services
//!
//! Platform glue around the shared core: connectivity probing and database
//! bootstrap.

mod connectivity;
mod database;

pub use connectivity::spawn_connectivity_probe;
pub use database::default_db_path;
