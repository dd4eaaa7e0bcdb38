pub mod admin;
pub mod map;
pub mod pages;
pub mod reports;
pub mod reviews;
pub mod rth;
pub mod statistics;
