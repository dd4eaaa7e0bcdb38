mod map_dto;

pub use map_dto::{CategoryCountDto, ClusterDto, CsvExport, MapLayerDto, MapSummaryDto, MarkerDto};
