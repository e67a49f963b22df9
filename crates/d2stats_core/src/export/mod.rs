//! Item, hireling and sync-document export.

mod items;
mod mercenary;
mod sync;

pub use items::{ItemExporter, ItemPayload, ItemPlacement, SyncQuality, container_id, item_class, quality};
pub use mercenary::{Hireling, convert_mercenary};
pub use sync::{
    ApplicationInfo, CompletedQuests, ProcessInfo, SyncRequest, build_sync_request, ignore_by_name,
};
