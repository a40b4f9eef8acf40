//! Player session state and the renderer capture hand-off
//!
//! A capture request is a one-shot exchange with the UI-bound renderer: the
//! session sends a [`SnapshotRequest`] down a channel, the renderer answers
//! with the current surface pixels, and the session waits with a bounded
//! timeout. This replaces the blocking main-thread post + countdown latch of
//! the original capture path.

use snapbooth_core::{Config, Error, Frame, FrameGeometry, PlayerEvent, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, RwLock};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Capacity of the renderer request channel. Captures are user-triggered and
/// rare; anything beyond a couple in flight means the renderer is stuck.
const REQUEST_CHANNEL_CAPACITY: usize = 4;

/// Receiver half handed to the UI-bound renderer
pub type FrameRequestReceiver = mpsc::Receiver<SnapshotRequest>;

/// A pending capture request awaiting the renderer's reply
pub struct SnapshotRequest {
    reply: oneshot::Sender<std::result::Result<Frame, String>>,
}

impl SnapshotRequest {
    /// Answer the request with the captured frame
    pub fn fulfill(self, frame: Frame) {
        let _ = self.reply.send(Ok(frame));
    }

    /// Answer the request with a failure reason
    pub fn reject(self, reason: impl Into<String>) {
        let _ = self.reply.send(Err(reason.into()));
    }
}

#[derive(Debug)]
struct PlayerState {
    playing: bool,
    video_size: Option<(u32, u32)>,
    viewport: (u32, u32),
}

/// Handle to a live video rendering session
#[derive(Clone)]
pub struct PlayerSession {
    state: Arc<RwLock<PlayerState>>,
    request_tx: mpsc::Sender<SnapshotRequest>,
    known_video_size: Option<(u32, u32)>,
    capture_timeout: std::time::Duration,
}

impl PlayerSession {
    /// Create a session and the request receiver for its renderer.
    ///
    /// The receiver goes to whatever owns the surface pixels; each received
    /// [`SnapshotRequest`] must be fulfilled or rejected promptly, since the
    /// session side only waits for `config.capture_timeout()`.
    pub fn new(config: &Config) -> (Self, FrameRequestReceiver) {
        let (request_tx, request_rx) = mpsc::channel(REQUEST_CHANNEL_CAPACITY);

        let session = Self {
            state: Arc::new(RwLock::new(PlayerState {
                playing: false,
                video_size: None,
                viewport: (config.viewport_width, config.viewport_height),
            })),
            request_tx,
            known_video_size: config.known_video_size,
            capture_timeout: config.capture_timeout(),
        };

        (session, request_rx)
    }

    /// Whether the stream is currently live
    pub async fn is_playing(&self) -> bool {
        self.state.read().await.playing
    }

    /// Intrinsic video size, if known
    pub async fn video_size(&self) -> Option<(u32, u32)> {
        self.state.read().await.video_size
    }

    /// Record a new rendering surface size
    pub async fn set_viewport(&self, width: u32, height: u32) {
        debug!("Viewport changed: {}x{}", width, height);
        self.state.write().await.viewport = (width, height);
    }

    /// Feed a playback event from the media collaborator into the session
    pub async fn apply_event(&self, event: PlayerEvent) {
        match event {
            PlayerEvent::Opening => {
                debug!("Stream opening");
            }
            PlayerEvent::Buffering { percent } => {
                debug!("Buffering: {:.0}%", percent);
            }
            PlayerEvent::Playing => {
                let mut state = self.state.write().await;
                state.playing = true;
                // Some cameras never report an intrinsic size; fall back to
                // the configured one until the decoder says otherwise.
                if state.video_size.is_none() {
                    if let Some((w, h)) = self.known_video_size {
                        info!("Assuming configured video size {}x{}", w, h);
                        state.video_size = Some((w, h));
                    }
                }
                info!("Playback started");
            }
            PlayerEvent::VideoOutput { count } => {
                debug!("Video output active (vout: {})", count);
            }
            PlayerEvent::SizeChanged { width, height } => {
                if width > 0 && height > 0 {
                    info!("Decoder reported video size {}x{}", width, height);
                    self.state.write().await.video_size = Some((width, height));
                }
            }
            PlayerEvent::Error { message } => {
                warn!("Playback error: {}", message);
                self.state.write().await.playing = false;
            }
            PlayerEvent::Stopped => {
                info!("Playback stopped");
                let mut state = self.state.write().await;
                state.playing = false;
                state.video_size = None;
            }
        }
    }

    /// Capture a still frame from the renderer.
    ///
    /// Fails fast with [`Error::NotPlaying`] when the stream is not live,
    /// [`Error::CaptureTimeout`] when the renderer does not answer within the
    /// configured timeout, and [`Error::SessionClosed`] when the renderer is
    /// gone.
    pub async fn capture_frame(&self) -> Result<Frame> {
        if !self.is_playing().await {
            return Err(Error::NotPlaying);
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        self.request_tx
            .send(SnapshotRequest { reply: reply_tx })
            .await
            .map_err(|_| Error::SessionClosed)?;

        match timeout(self.capture_timeout, reply_rx).await {
            Err(_) => Err(Error::CaptureTimeout),
            Ok(Err(_)) => Err(Error::SessionClosed),
            Ok(Ok(Err(reason))) => Err(Error::Capture(reason)),
            Ok(Ok(Ok(frame))) => {
                debug!(
                    "Raw frame captured: {}x{} ({} bytes)",
                    frame.width,
                    frame.height,
                    frame.size()
                );
                Ok(frame)
            }
        }
    }

    /// Assemble the crop-geometry input for a captured frame from the
    /// session's current state
    pub async fn frame_geometry(&self, frame: &Frame) -> FrameGeometry {
        let state = self.state.read().await;
        let (video_width, video_height) = state.video_size.unwrap_or((0, 0));
        FrameGeometry {
            video_width,
            video_height,
            viewport_width: state.viewport.0,
            viewport_height: state.viewport.1,
            bitmap_width: frame.width,
            bitmap_height: frame.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::new()
            .with_viewport(1080, 1920)
            .with_known_video_size(2560, 1440)
            .with_capture_timeout_ms(100)
    }

    fn test_frame() -> Frame {
        Frame::new(vec![0u8; 8 * 8 * 4], 8, 8, 1)
    }

    #[tokio::test]
    async fn capture_fails_when_not_playing() {
        let (session, _rx) = PlayerSession::new(&test_config());
        let result = session.capture_frame().await;
        assert!(matches!(result, Err(Error::NotPlaying)));
    }

    #[tokio::test]
    async fn capture_round_trip_with_renderer() {
        let (session, mut rx) = PlayerSession::new(&test_config());
        session.apply_event(PlayerEvent::Playing).await;

        tokio::spawn(async move {
            if let Some(request) = rx.recv().await {
                request.fulfill(test_frame());
            }
        });

        let frame = session.capture_frame().await.unwrap();
        assert_eq!((frame.width, frame.height), (8, 8));

        let geometry = session.frame_geometry(&frame).await;
        assert_eq!((geometry.video_width, geometry.video_height), (2560, 1440));
        assert_eq!(
            (geometry.viewport_width, geometry.viewport_height),
            (1080, 1920)
        );
        assert_eq!((geometry.bitmap_width, geometry.bitmap_height), (8, 8));
    }

    #[tokio::test]
    async fn capture_times_out_when_renderer_stalls() {
        let (session, rx) = PlayerSession::new(&test_config());
        session.apply_event(PlayerEvent::Playing).await;

        // Keep the receiver alive but never answer.
        let result = session.capture_frame().await;
        assert!(matches!(result, Err(Error::CaptureTimeout)));
        drop(rx);
    }

    #[tokio::test]
    async fn capture_reports_closed_session() {
        let (session, rx) = PlayerSession::new(&test_config());
        session.apply_event(PlayerEvent::Playing).await;
        drop(rx);

        let result = session.capture_frame().await;
        assert!(matches!(result, Err(Error::SessionClosed)));
    }

    #[tokio::test]
    async fn renderer_rejection_surfaces_as_capture_error() {
        let (session, mut rx) = PlayerSession::new(&test_config());
        session.apply_event(PlayerEvent::Playing).await;

        tokio::spawn(async move {
            if let Some(request) = rx.recv().await {
                request.reject("surface not ready");
            }
        });

        let result = session.capture_frame().await;
        assert!(matches!(result, Err(Error::Capture(reason)) if reason == "surface not ready"));
    }

    #[tokio::test]
    async fn decoder_size_overrides_configured_size() {
        let (session, _rx) = PlayerSession::new(&test_config());
        session.apply_event(PlayerEvent::Playing).await;
        assert_eq!(session.video_size().await, Some((2560, 1440)));

        session
            .apply_event(PlayerEvent::SizeChanged {
                width: 1920,
                height: 1080,
            })
            .await;
        assert_eq!(session.video_size().await, Some((1920, 1080)));

        // A bogus zero size from the decoder is ignored.
        session
            .apply_event(PlayerEvent::SizeChanged {
                width: 0,
                height: 0,
            })
            .await;
        assert_eq!(session.video_size().await, Some((1920, 1080)));
    }

    #[tokio::test]
    async fn stop_clears_playback_state() {
        let (session, _rx) = PlayerSession::new(&test_config());
        session.apply_event(PlayerEvent::Playing).await;
        assert!(session.is_playing().await);

        session.apply_event(PlayerEvent::Stopped).await;
        assert!(!session.is_playing().await);
        assert_eq!(session.video_size().await, None);
    }
}
