mod rth_service;

pub use rth_service::RthService;
