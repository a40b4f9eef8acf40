//! SnapBooth Bridge - Message dispatch for the GUI shell
//!
//! The GUI shell drives captures over a message channel: a JSON request
//! naming a method comes in, a JSON response with either the saved snapshot
//! path or a structured error goes back. This crate is that boundary.

use snapbooth_core::protocol::{CODE_CAPTURE_ERROR, CODE_CAPTURE_FAILED};
use snapbooth_core::{BridgeRequest, BridgeResponse, Error};
use snapbooth_player::PlayerSession;
use snapbooth_snapshot::SnapshotPipeline;
use tracing::{error, info};

/// Dispatches shell requests against a player session and snapshot pipeline
pub struct SnapshotBridge {
    session: PlayerSession,
    pipeline: SnapshotPipeline,
}

impl SnapshotBridge {
    /// Create a bridge for one player session
    pub fn new(session: PlayerSession, pipeline: SnapshotPipeline) -> Self {
        Self { session, pipeline }
    }

    /// Handle a decoded request
    pub async fn handle(&self, request: BridgeRequest) -> BridgeResponse {
        match request {
            BridgeRequest::CaptureSnapshot => self.capture_snapshot().await,
        }
    }

    /// Handle a raw JSON message from the shell. Unknown methods and
    /// malformed payloads map to `NotImplemented`, never to a transport
    /// error.
    pub async fn handle_json(&self, raw: &str) -> String {
        let response = match serde_json::from_str::<BridgeRequest>(raw) {
            Ok(request) => self.handle(request).await,
            Err(_) => BridgeResponse::NotImplemented,
        };

        serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(
                r#"{{"type":"Error","code":"{}","message":"{}"}}"#,
                CODE_CAPTURE_ERROR, e
            )
        })
    }

    async fn capture_snapshot(&self) -> BridgeResponse {
        info!("Snapshot requested");

        let frame = match self.session.capture_frame().await {
            Ok(frame) => frame,
            Err(e) => {
                error!("Snapshot capture failed: {}", e);
                return BridgeResponse::Error {
                    code: capture_error_code(&e).to_string(),
                    message: e.to_string(),
                };
            }
        };

        let geometry = self.session.frame_geometry(&frame).await;
        match self.pipeline.process(&frame, geometry) {
            Ok(path) => BridgeResponse::SnapshotSaved {
                path: path.display().to_string(),
            },
            Err(e) => {
                error!("Snapshot processing failed: {}", e);
                BridgeResponse::Error {
                    code: CODE_CAPTURE_ERROR.to_string(),
                    message: e.to_string(),
                }
            }
        }
    }
}

/// Expected capture failures (stream not live, renderer gone or slow) keep
/// the shell-facing code the original contract used for them.
fn capture_error_code(error: &Error) -> &'static str {
    match error {
        Error::NotPlaying | Error::CaptureTimeout | Error::SessionClosed | Error::Capture(_) => {
            CODE_CAPTURE_FAILED
        }
        _ => CODE_CAPTURE_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapbooth_core::{Config, Frame, PlayerEvent};
    use snapbooth_snapshot::SnapshotStore;
    use tempfile::tempdir;

    fn test_frame() -> Frame {
        Frame::new(vec![128u8; 64 * 128 * 4], 64, 128, 1)
    }

    fn bridge_with_renderer(
        dir: &std::path::Path,
        answer: bool,
    ) -> (SnapshotBridge, PlayerSession) {
        let config = Config::new()
            .with_viewport(64, 128)
            .with_known_video_size(1920, 1080)
            .with_capture_timeout_ms(200);
        let (session, mut rx) = PlayerSession::new(&config);

        if answer {
            tokio::spawn(async move {
                while let Some(request) = rx.recv().await {
                    request.fulfill(test_frame());
                }
            });
        } else {
            // Keep the channel open without answering.
            tokio::spawn(async move {
                let _rx = rx;
                std::future::pending::<()>().await;
            });
        }

        let store = SnapshotStore::new(dir.join("snapshots"), None);
        let pipeline = SnapshotPipeline::new(store, 90);
        (SnapshotBridge::new(session.clone(), pipeline), session)
    }

    #[tokio::test]
    async fn capture_snapshot_end_to_end() {
        let dir = tempdir().unwrap();
        let (bridge, session) = bridge_with_renderer(dir.path(), true);
        session.apply_event(PlayerEvent::Playing).await;

        let response = bridge.handle(BridgeRequest::CaptureSnapshot).await;
        match response {
            BridgeResponse::SnapshotSaved { path } => {
                assert!(std::path::Path::new(&path).exists());
            }
            other => panic!("expected SnapshotSaved, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn capture_without_playback_reports_capture_failed() {
        let dir = tempdir().unwrap();
        let (bridge, _session) = bridge_with_renderer(dir.path(), true);

        let response = bridge.handle(BridgeRequest::CaptureSnapshot).await;
        match response {
            BridgeResponse::Error { code, .. } => assert_eq!(code, CODE_CAPTURE_FAILED),
            other => panic!("expected Error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn renderer_timeout_reports_capture_failed() {
        let dir = tempdir().unwrap();
        let (bridge, session) = bridge_with_renderer(dir.path(), false);
        session.apply_event(PlayerEvent::Playing).await;

        let response = bridge.handle(BridgeRequest::CaptureSnapshot).await;
        match response {
            BridgeResponse::Error { code, message } => {
                assert_eq!(code, CODE_CAPTURE_FAILED);
                assert!(message.contains("Timed out"));
            }
            other => panic!("expected Error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn json_round_trip_and_unknown_method() {
        let dir = tempdir().unwrap();
        let (bridge, session) = bridge_with_renderer(dir.path(), true);
        session.apply_event(PlayerEvent::Playing).await;

        let response = bridge.handle_json(r#"{"method":"captureSnapshot"}"#).await;
        assert!(response.contains("SnapshotSaved"));

        let response = bridge.handle_json(r#"{"method":"doSomethingElse"}"#).await;
        assert!(response.contains("NotImplemented"));

        let response = bridge.handle_json("garbage").await;
        assert!(response.contains("NotImplemented"));
    }
}
