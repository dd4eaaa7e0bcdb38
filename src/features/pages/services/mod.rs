mod page_service;

pub use page_service::{PageService, MAP_CENTER};
