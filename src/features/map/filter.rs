use serde::Deserialize;
use std::collections::HashSet;
use utoipa::IntoParams;

use crate::features::rth::models::{Facility, RthFeature};

/// A class constraint that is either off or pinned to one value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClassFilter {
    #[default]
    All,
    Only(String),
}

impl ClassFilter {
    /// `""` and `"all"` (any case) mean no constraint
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => ClassFilter::All,
            Some(v) if v.eq_ignore_ascii_case("all") => ClassFilter::All,
            Some(v) => ClassFilter::Only(v.to_string()),
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            ClassFilter::All => true,
            ClassFilter::Only(expected) => expected == value,
        }
    }
}

/// Criteria chosen in the map filter panel
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// `None` allows every category; an empty set allows none
    pub categories: Option<HashSet<String>>,
    pub facilities: HashSet<Facility>,
    pub size_class: ClassFilter,
    pub visitor_class: ClassFilter,
    pub search: String,
}

impl FilterCriteria {
    pub fn matches(&self, feature: &RthFeature) -> bool {
        if let Some(categories) = &self.categories {
            if !categories.contains(&feature.jenis_rth) {
                return false;
            }
        }

        if !self.facilities.iter().all(|f| feature.has_facility(*f)) {
            return false;
        }

        if !self.size_class.matches(&feature.kls_luas)
            || !self.visitor_class.matches(&feature.kls_pngnjg)
        {
            return false;
        }

        // Matched verbatim; surrounding spaces are significant
        self.search.is_empty()
            || feature
                .nama_rth
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }
}

/// Features passing every criterion, in input order
pub fn filter_features<'a>(all: &'a [RthFeature], criteria: &FilterCriteria) -> Vec<&'a RthFeature> {
    all.iter().filter(|f| criteria.matches(f)).collect()
}

/// Filter panel state as query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    /// Comma-separated categories; absent allows all, empty allows none
    pub categories: Option<String>,
    /// Comma-separated required facilities: tempat_duduk, tempat_sampah, penerangan
    pub facilities: Option<String>,
    /// Area class or "all"
    pub size: Option<String>,
    /// Visitor class or "all"
    pub visitors: Option<String>,
    /// Case-insensitive name search
    pub search: Option<String>,
    /// Map zoom level used for clustering (default 13)
    pub zoom: Option<u8>,
}

impl FilterQuery {
    pub fn into_criteria(self) -> Result<FilterCriteria, String> {
        let categories = self.categories.map(|raw| {
            split_list(&raw)
                .map(str::to_string)
                .collect::<HashSet<String>>()
        });

        let facilities = match &self.facilities {
            Some(raw) => split_list(raw)
                .map(str::parse::<Facility>)
                .collect::<Result<HashSet<_>, _>>()?,
            None => HashSet::new(),
        };

        Ok(FilterCriteria {
            categories,
            facilities,
            size_class: ClassFilter::parse(self.size.as_deref()),
            visitor_class: ClassFilter::parse(self.visitors.as_deref()),
            search: self.search.unwrap_or_default(),
        })
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}
