mod rth_feature;

pub use rth_feature::{Facility, RthFeature};
