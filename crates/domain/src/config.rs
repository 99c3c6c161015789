pub mod errors;
pub mod logging;
pub mod root;
pub mod zone;

pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, ServerConfig, DEFAULT_TTL};
pub use zone::{AddressData, MailExchangeData, TargetData, TextData, ZoneNode};
