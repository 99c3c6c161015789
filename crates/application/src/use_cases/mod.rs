pub mod dns;

pub use dns::HandleZoneQueryUseCase;
