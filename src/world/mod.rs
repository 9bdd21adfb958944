pub mod events;
pub mod snapshot;
pub mod store;

pub use events::{
    Bookmark, Discovery, Notification, WorldEvent, WorldEventCategory, WorldStats, WorldUi,
};
pub use snapshot::WorldSnapshot;
pub use store::WorldStore;
