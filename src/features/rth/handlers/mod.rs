mod rth_handler;

pub use rth_handler::*;
