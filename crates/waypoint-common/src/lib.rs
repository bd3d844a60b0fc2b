pub mod errors;
pub mod events;
pub mod types;

pub use errors::{ConfigError, ErrorKind, PlatformError, WaypointError};
pub use events::{EventBus, ProviderEvent};
pub use types::{Item, ItemAction, ItemGroup};

pub type Result<T> = std::result::Result<T, WaypointError>;
