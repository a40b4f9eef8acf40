//! SnapBooth Core - Shared types and protocol definitions
//!
//! This crate provides the foundational types used across all SnapBooth
//! components: configuration, errors, the frame buffer type, the
//! letterbox/pillarbox crop geometry, and the bridge protocol messages.

pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod protocol;

pub use config::Config;
pub use error::{Error, Result};
pub use frame::Frame;
pub use geometry::{compute_crop, CropRect, FrameGeometry};
pub use protocol::{BridgeRequest, BridgeResponse, PlayerEvent};
