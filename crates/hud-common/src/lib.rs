pub mod errors;
pub mod handlers;
pub mod id;
pub mod types;

pub use errors::{ConfigError, HudError};
pub use handlers::HandlerTable;
pub use id::{new_id, PartyId, SurfaceId};
pub use types::{Point, PointerEvent, PointerKind, Rect};

pub type Result<T> = std::result::Result<T, HudError>;
