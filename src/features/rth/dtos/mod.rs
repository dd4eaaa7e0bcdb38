mod rth_dto;

pub use rth_dto::{FacilityBadgeDto, RthDetailDto};
