//! Server-rendered HTML pages: home, map, report form, review form and the
//! admin dashboard.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::{admin_routes, routes};
pub use services::PageService;
