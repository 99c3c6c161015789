mod handle_zone_query;

pub use handle_zone_query::HandleZoneQueryUseCase;
