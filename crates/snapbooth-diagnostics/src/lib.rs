//! SnapBooth Diagnostics - Camera reachability checks
//!
//! Streaming failures are almost always network problems, not player
//! problems. This crate answers the cheap question first: can we even open a
//! TCP connection to the camera's RTSP port?

pub mod error;
pub mod probe;

pub use error::{ProbeError, ProbeResult};
pub use probe::{probe, CameraEndpoint, ProbeOutcome, ProbeReport, DEFAULT_RTSP_PORT};
