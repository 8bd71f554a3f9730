pub mod export;
pub mod history;
pub mod hit;
pub mod input;
pub mod model;
pub mod persist;
pub mod render;
pub mod session;
pub mod storage;
pub mod toolbar;
pub mod toolbar_icons;
pub mod viewport;

pub use input::DrawTool;
pub use model::{Stroke, StrokeColor, StrokeId, StrokeStore, StrokeTool};
pub use persist::{CorruptSlotPolicy, PersistenceBridge, SCRIBBLES_SLOT};
pub use session::{DrawSession, SessionAction, SessionOptions, StoreObserver};
