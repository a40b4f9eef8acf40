//! Bridge and player protocol message types

use serde::{Deserialize, Serialize};

/// Events reported by the media-playback collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerEvent {
    /// Stream is being opened
    Opening,
    /// Stream is buffering
    Buffering {
        /// Buffer fill percentage (0.0-100.0)
        percent: f32,
    },
    /// Playback started
    Playing,
    /// A video output surface became active
    VideoOutput {
        /// Number of active video outputs
        count: u32,
    },
    /// Decoder reported the intrinsic video size
    SizeChanged {
        /// Intrinsic video width
        width: u32,
        /// Intrinsic video height
        height: u32,
    },
    /// Playback error
    Error {
        /// Human-readable error description
        message: String,
    },
    /// Playback stopped
    Stopped,
}

/// Requests arriving from the GUI shell over the message bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum BridgeRequest {
    /// Capture a still frame from the live video and persist it
    #[serde(rename = "captureSnapshot")]
    CaptureSnapshot,
}

/// Responses returned to the GUI shell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeResponse {
    /// Snapshot was captured and saved
    SnapshotSaved {
        /// Absolute path of the saved JPEG
        path: String,
    },
    /// The request failed
    Error {
        /// Machine-readable error code
        code: String,
        /// Human-readable message
        message: String,
    },
    /// The requested method is not implemented
    NotImplemented,
}

/// Error code for captures that failed for an expected reason
/// (player not live, renderer timeout)
pub const CODE_CAPTURE_FAILED: &str = "CAPTURE_FAILED";

/// Error code for unexpected capture errors (encoding, IO)
pub const CODE_CAPTURE_ERROR: &str = "CAPTURE_ERROR";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_request_uses_method_tag() {
        let json = r#"{"method":"captureSnapshot"}"#;
        let request: BridgeRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(request, BridgeRequest::CaptureSnapshot));
    }

    #[test]
    fn bridge_response_round_trips() {
        let response = BridgeResponse::SnapshotSaved {
            path: "/tmp/snapshot_1.jpg".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        let back: BridgeResponse = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, BridgeResponse::SnapshotSaved { path } if path.ends_with(".jpg")));
    }
}
