//! SnapBooth Player - Session handle and capture hand-off
//!
//! The GUI shell talks to a live video rendering session through an explicit
//! [`PlayerSession`] handle rather than a process-wide "active player"
//! reference, so multiple concurrent sessions stay representable and the
//! capture path is testable without a renderer.

pub mod session;

pub use session::{FrameRequestReceiver, PlayerSession, SnapshotRequest};
