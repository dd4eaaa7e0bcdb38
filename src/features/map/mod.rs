pub mod clustering;
pub mod dtos;
pub mod filter;
pub mod handlers;
pub mod marker_style;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::MapService;
