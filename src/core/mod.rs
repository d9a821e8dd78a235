pub mod builder;
pub mod coordinator;
pub mod engine;
pub mod export;
pub mod format;
pub mod render;
pub mod session;
pub mod units;

pub use crate::domain::model::{CardModel, MoveSelection, RenderReadyCard, Slot};
pub use crate::domain::ports::{ConfigProvider, LookupClient, Rasterizer, Storage};
pub use crate::utils::error::Result;
