//! SnapBooth Snapshot - Crop, encode and persist captured stills
//!
//! Takes a raw frame from the renderer, strips the letterbox/pillarbox bars
//! around the video content, encodes a JPEG and writes it to the snapshot
//! directory (plus an optional public gallery copy).

pub mod pipeline;
pub mod store;

pub use pipeline::SnapshotPipeline;
pub use store::SnapshotStore;
