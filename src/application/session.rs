//! Recording session orchestrator

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::domain::audio::{Artifact, AudioBlock};
use crate::domain::session::{InvalidTransition, RecordingClock, SessionLifecycle, SessionState};

use super::ports::{
    AcquireRequest, ActiveCapture, CaptureError, CaptureFactory, CaptureMode, CaptureStream,
    EncoderError, FinalizeError, InputSource, StreamGuard, StreamSpec,
};

/// Errors surfaced by session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidState(#[from] InvalidTransition),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Encoder(#[from] EncoderError),

    #[error("No audio captured")]
    EmptyRecording,
}

/// Parameters for starting a recording
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    pub mode: CaptureMode,
    /// Exact device to record from; `None` uses the system default
    pub device_id: Option<String>,
    /// Advisory sample rate; the device's negotiated rate wins
    pub sample_rate: Option<u32>,
}

type ActiveSlot = Arc<Mutex<Option<Box<dyn ActiveCapture>>>>;
type GuardSlot = Arc<StdMutex<Option<Box<dyn StreamGuard>>>>;

/// The recording session aggregate: one microphone capture from start to
/// exported artifact.
///
/// All block-buffer mutation happens on a single pump task fed by the
/// capture stream's channel, so blocks are processed strictly in arrival
/// order and never concurrently. Stopping takes the active capture path out
/// of the shared slot before finalizing; any block still in flight finds
/// the slot empty and is discarded. The input stream itself is released by
/// RAII on every exit path.
pub struct RecordingSession<S, F>
where
    S: InputSource,
    F: CaptureFactory,
{
    source: S,
    captures: F,
    lifecycle: Arc<StdMutex<SessionLifecycle>>,
    active: ActiveSlot,
    guard: GuardSlot,
    clock: StdMutex<RecordingClock>,
    spec: StdMutex<Option<StreamSpec>>,
    mode: StdMutex<Option<CaptureMode>>,
    device_id: StdMutex<Option<String>>,
    artifact: StdMutex<Option<Artifact>>,
    failure: Arc<StdMutex<Option<String>>>,
    pump: StdMutex<Option<JoinHandle<()>>>,
}

impl<S, F> RecordingSession<S, F>
where
    S: InputSource,
    F: CaptureFactory,
{
    /// Create an idle session over the given ports
    pub fn new(source: S, captures: F) -> Self {
        Self {
            source,
            captures,
            lifecycle: Arc::new(StdMutex::new(SessionLifecycle::new())),
            active: Arc::new(Mutex::new(None)),
            guard: Arc::new(StdMutex::new(None)),
            clock: StdMutex::new(RecordingClock::new()),
            spec: StdMutex::new(None),
            mode: StdMutex::new(None),
            device_id: StdMutex::new(None),
            artifact: StdMutex::new(None),
            failure: Arc::new(StdMutex::new(None)),
            pump: StdMutex::new(None),
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.lifecycle.lock().unwrap().state()
    }

    /// Elapsed recording time, excluding paused spans
    pub fn elapsed(&self) -> Duration {
        self.clock.lock().unwrap().elapsed()
    }

    /// Negotiated stream parameters of the current/last recording
    pub fn stream_spec(&self) -> Option<StreamSpec> {
        *self.spec.lock().unwrap()
    }

    /// Capture mode of the current/last recording
    pub fn mode(&self) -> Option<CaptureMode> {
        *self.mode.lock().unwrap()
    }

    /// Device the current/last recording was requested on
    pub fn device_id(&self) -> Option<String> {
        self.device_id.lock().unwrap().clone()
    }

    /// The finished artifact, once the session is Ready
    pub fn artifact(&self) -> Option<Artifact> {
        self.artifact.lock().unwrap().clone()
    }

    /// Human-readable reason for the Failed state
    pub fn failure_reason(&self) -> Option<String> {
        self.failure.lock().unwrap().clone()
    }

    /// Start recording: acquire the input stream, open the capture path
    /// for the requested mode, and begin accepting blocks.
    ///
    /// Rejected unless the session is Idle. On any failure the session is
    /// Failed with a reason and every opened resource has been released.
    pub async fn start(&self, options: StartOptions) -> Result<(), SessionError> {
        self.lifecycle.lock().unwrap().begin_acquire()?;
        *self.failure.lock().unwrap() = None;

        let request = AcquireRequest {
            device_id: options.device_id.clone(),
            sample_rate: options.sample_rate,
        };
        let stream = match self.source.acquire(request).await {
            Ok(stream) => stream,
            Err(e) => {
                self.record_failure(e.to_string());
                return Err(e.into());
            }
        };
        let CaptureStream {
            spec,
            blocks,
            guard,
        } = stream;

        let capture = match self.captures.create(options.mode, spec) {
            Ok(capture) => capture,
            Err(e) => {
                // Dropping the guard releases the just-acquired stream
                drop(guard);
                self.record_failure(e.to_string());
                return Err(e.into());
            }
        };

        *self.active.lock().await = Some(capture);
        *self.guard.lock().unwrap() = Some(guard);
        *self.spec.lock().unwrap() = Some(spec);
        *self.mode.lock().unwrap() = Some(options.mode);
        *self.device_id.lock().unwrap() = options.device_id;

        self.lifecycle.lock().unwrap().begin_recording()?;
        self.clock.lock().unwrap().start();

        let pump = spawn_pump(
            blocks,
            Arc::clone(&self.active),
            Arc::clone(&self.lifecycle),
            Arc::clone(&self.guard),
            Arc::clone(&self.failure),
        );
        *self.pump.lock().unwrap() = Some(pump);

        tracing::info!(
            sample_rate = spec.sample_rate,
            channels = spec.channels,
            "recording started"
        );
        Ok(())
    }

    /// Pause a live recording: gate the capture callback, suspend the
    /// capture path, freeze the clock. Valid only while Recording.
    pub async fn pause(&self) -> Result<(), SessionError> {
        self.lifecycle.lock().unwrap().pause()?;
        {
            let guard = self.guard.lock().unwrap();
            if let Some(guard) = guard.as_ref() {
                guard.set_capturing(false);
            }
        }
        if let Some(capture) = self.active.lock().await.as_mut() {
            capture.pause();
        }
        self.clock.lock().unwrap().pause();
        Ok(())
    }

    /// Resume a paused recording without clock drift. Valid only while
    /// Paused.
    pub async fn resume(&self) -> Result<(), SessionError> {
        self.lifecycle.lock().unwrap().resume()?;
        {
            let guard = self.guard.lock().unwrap();
            if let Some(guard) = guard.as_ref() {
                guard.set_capturing(true);
            }
        }
        if let Some(capture) = self.active.lock().await.as_mut() {
            capture.resume();
        }
        self.clock.lock().unwrap().resume();
        Ok(())
    }

    /// Stop and finalize: seal delivery, release the input stream, and
    /// assemble the artifact. Valid from Recording or Paused.
    ///
    /// The stream is released before finalize runs, so the microphone is
    /// freed even when finalize fails. An empty buffer fails the session
    /// with `EmptyRecording` and leaves no artifact.
    pub async fn stop(&self) -> Result<Artifact, SessionError> {
        self.lifecycle.lock().unwrap().begin_finalize()?;
        self.clock.lock().unwrap().stop();

        // Barrier: once the slot is empty, in-flight blocks are discarded.
        let capture = self.active.lock().await.take();

        // Release the microphone unconditionally before finalize can fail.
        release_guard(&self.guard);

        let Some(capture) = capture else {
            // Slot already drained by a capture failure; nothing to finalize.
            self.record_failure("no audio captured".to_string());
            return Err(SessionError::EmptyRecording);
        };

        let outcome = tokio::task::spawn_blocking(move || capture.finalize())
            .await
            .map_err(|e| EncoderError::EncodeFailed(format!("finalize task failed: {e}")));

        match outcome {
            Ok(Ok((bytes, mime))) => {
                let artifact = Artifact::new(bytes, mime);
                *self.artifact.lock().unwrap() = Some(artifact.clone());
                self.lifecycle.lock().unwrap().complete()?;
                tracing::info!(
                    size = artifact.size_bytes(),
                    mime = artifact.mime_type(),
                    "recording finalized"
                );
                Ok(artifact)
            }
            Ok(Err(FinalizeError::Empty)) => {
                self.record_failure("no audio captured".to_string());
                Err(SessionError::EmptyRecording)
            }
            Ok(Err(FinalizeError::Encoder(e))) | Err(e) => {
                self.record_failure(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Clear the artifact and failure reason and return to Idle.
    /// Valid from Ready or Failed.
    pub async fn reset(&self) -> Result<(), SessionError> {
        self.lifecycle.lock().unwrap().reset()?;
        *self.artifact.lock().unwrap() = None;
        *self.failure.lock().unwrap() = None;
        *self.spec.lock().unwrap() = None;
        *self.mode.lock().unwrap() = None;
        *self.device_id.lock().unwrap() = None;
        *self.clock.lock().unwrap() = RecordingClock::new();
        *self.active.lock().await = None;
        if let Some(pump) = self.pump.lock().unwrap().take() {
            pump.abort();
        }
        Ok(())
    }

    fn record_failure(&self, reason: String) {
        tracing::error!("session failed: {reason}");
        *self.failure.lock().unwrap() = Some(reason);
        let _ = self.lifecycle.lock().unwrap().fail();
    }
}

impl<S, F> Drop for RecordingSession<S, F>
where
    S: InputSource,
    F: CaptureFactory,
{
    fn drop(&mut self) {
        // Abandonment teardown: free the microphone and stop the pump.
        release_guard(&self.guard);
        if let Ok(mut pump) = self.pump.lock() {
            if let Some(pump) = pump.take() {
                pump.abort();
            }
        }
    }
}

fn release_guard(slot: &GuardSlot) {
    match slot.lock() {
        Ok(mut guard) => drop(guard.take()),
        // A poisoned slot must never block teardown
        Err(e) => tracing::warn!("stream guard slot poisoned during release: {e}"),
    }
}

/// Single consumer of the capture stream. Blocks are appended to the
/// active path strictly in arrival order, and only while the session is
/// Recording; anything else is discarded. Exits when the stream's sender
/// side is dropped.
fn spawn_pump(
    mut blocks: mpsc::UnboundedReceiver<AudioBlock>,
    active: ActiveSlot,
    lifecycle: Arc<StdMutex<SessionLifecycle>>,
    guard: GuardSlot,
    failure: Arc<StdMutex<Option<String>>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(block) = blocks.recv().await {
            let mut slot = active.lock().await;
            let state = lifecycle.lock().unwrap().state();
            if state != SessionState::Recording {
                tracing::trace!(state = %state, "discarding block delivered outside recording");
                continue;
            }
            let Some(capture) = slot.as_mut() else {
                continue;
            };
            if let Err(e) = capture.deliver(block) {
                tracing::error!("capture path failed mid-recording: {e}");
                *failure.lock().unwrap() = Some(e.to_string());
                let _ = lifecycle.lock().unwrap().fail();
                *slot = None;
                release_guard(&guard);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::EncodedChunk;
    use crate::infrastructure::capture::DefaultCaptureFactory;
    use crate::infrastructure::encoding::FlacEncoderFactory;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    const SPEC: StreamSpec = StreamSpec {
        sample_rate: 44100,
        channels: 1,
    };

    struct MockGuard {
        released: Arc<AtomicBool>,
        capturing: Arc<AtomicBool>,
    }

    impl StreamGuard for MockGuard {
        fn set_capturing(&self, capturing: bool) {
            self.capturing.store(capturing, Ordering::SeqCst);
        }
    }

    impl Drop for MockGuard {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    /// Test double for the input source: hands the block sender to the
    /// test and records release/gate state.
    #[derive(Default)]
    struct MockSource {
        fail_with: Option<CaptureError>,
        sender: StdMutex<Option<mpsc::UnboundedSender<AudioBlock>>>,
        released: Arc<AtomicBool>,
        capturing: Arc<AtomicBool>,
    }

    impl MockSource {
        fn new() -> Self {
            Self::default()
        }

        fn failing(error: CaptureError) -> Self {
            Self {
                fail_with: Some(error),
                ..Self::default()
            }
        }

        fn send(&self, block: AudioBlock) {
            self.sender
                .lock()
                .unwrap()
                .as_ref()
                .expect("stream not acquired")
                .send(block)
                .expect("pump gone");
        }

        fn was_released(&self) -> bool {
            self.released.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InputSource for MockSource {
        async fn acquire(&self, _request: AcquireRequest) -> Result<CaptureStream, CaptureError> {
            if let Some(error) = &self.fail_with {
                return Err(error.clone());
            }
            let (tx, rx) = mpsc::unbounded_channel();
            *self.sender.lock().unwrap() = Some(tx);
            self.capturing.store(true, Ordering::SeqCst);
            Ok(CaptureStream {
                spec: SPEC,
                blocks: rx,
                guard: Box::new(MockGuard {
                    released: Arc::clone(&self.released),
                    capturing: Arc::clone(&self.capturing),
                }),
            })
        }
    }

    /// Capture factory whose encoder construction always fails
    struct BrokenFactory;

    impl CaptureFactory for BrokenFactory {
        fn create(
            &self,
            _mode: CaptureMode,
            _spec: StreamSpec,
        ) -> Result<Box<dyn ActiveCapture>, EncoderError> {
            Err(EncoderError::Unavailable("no codec".to_string()))
        }
    }

    fn factory() -> DefaultCaptureFactory<FlacEncoderFactory> {
        DefaultCaptureFactory::new(FlacEncoderFactory::new())
    }

    fn pcm_session() -> RecordingSession<MockSource, DefaultCaptureFactory<FlacEncoderFactory>> {
        RecordingSession::new(MockSource::new(), factory())
    }

    fn zero_block(len: usize) -> AudioBlock {
        AudioBlock::from_interleaved(1, vec![0.0; len])
    }

    /// Give the pump task time to drain the channel
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn start_records_and_stop_produces_wav() {
        let session = pcm_session();
        assert_eq!(session.state(), SessionState::Idle);

        session.start(StartOptions::default()).await.unwrap();
        assert_eq!(session.state(), SessionState::Recording);
        assert_eq!(session.stream_spec(), Some(SPEC));

        for _ in 0..3 {
            session.source.send(zero_block(4096));
        }
        settle().await;

        let artifact = session.stop().await.unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        // 44-byte header + 3 blocks of 4096 16-bit samples
        assert_eq!(artifact.bytes().len(), 44 + 3 * 4096 * 2);
        assert_eq!(artifact.mime_type(), "audio/wav");
        assert!(artifact.filename().ends_with(".wav"));
        // All sample bytes are zero
        assert!(artifact.bytes()[44..].iter().all(|&b| b == 0));
        assert!(session.source.was_released());
    }

    #[tokio::test]
    async fn stop_with_zero_blocks_is_empty_recording() {
        let session = pcm_session();
        session.start(StartOptions::default()).await.unwrap();

        let err = session.stop().await.unwrap_err();
        assert!(matches!(err, SessionError::EmptyRecording));
        assert_eq!(session.state(), SessionState::Failed);
        assert!(session.artifact().is_none());
        assert_eq!(
            session.failure_reason().as_deref(),
            Some("no audio captured")
        );
        assert!(session.source.was_released());
    }

    #[tokio::test]
    async fn start_while_recording_is_rejected() {
        let session = pcm_session();
        session.start(StartOptions::default()).await.unwrap();

        let err = session.start(StartOptions::default()).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidState(_)));
        // The live recording is unaffected
        assert_eq!(session.state(), SessionState::Recording);
    }

    #[tokio::test]
    async fn pause_while_idle_is_rejected() {
        let session = pcm_session();
        let err = session.pause().await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidState(_)));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn stop_while_idle_is_rejected() {
        let session = pcm_session();
        assert!(matches!(
            session.stop().await.unwrap_err(),
            SessionError::InvalidState(_)
        ));
    }

    #[tokio::test]
    async fn blocks_during_pause_are_discarded() {
        let session = pcm_session();
        session.start(StartOptions::default()).await.unwrap();

        session.source.send(AudioBlock::from_interleaved(1, vec![0.25; 8]));
        settle().await;

        session.pause().await.unwrap();
        assert_eq!(session.state(), SessionState::Paused);
        // Gate closed at the capture level
        assert!(!session.source.capturing.load(Ordering::SeqCst));

        // A block that slips past the gate is discarded by the pump
        session.source.send(AudioBlock::from_interleaved(1, vec![0.5; 8]));
        settle().await;

        session.resume().await.unwrap();
        assert_eq!(session.state(), SessionState::Recording);
        session.source.send(AudioBlock::from_interleaved(1, vec![0.75; 8]));
        settle().await;

        let artifact = session.stop().await.unwrap();
        // Two blocks of 8 samples: before pause and after resume, in order
        assert_eq!(artifact.bytes().len(), 44 + 2 * 8 * 2);
        let first = i16::from_le_bytes([artifact.bytes()[44], artifact.bytes()[45]]);
        let last = {
            let n = artifact.bytes().len();
            i16::from_le_bytes([artifact.bytes()[n - 2], artifact.bytes()[n - 1]])
        };
        assert_eq!(first, (0.25f32 * 32767.0) as i16);
        assert_eq!(last, (0.75f32 * 32767.0) as i16);
    }

    #[tokio::test]
    async fn elapsed_is_stable_across_pause_resume() {
        let session = pcm_session();
        session.start(StartOptions::default()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        session.pause().await.unwrap();
        let at_pause = session.elapsed();

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(session.elapsed(), at_pause);

        session.resume().await.unwrap();
        let after_resume = session.elapsed();
        assert!(after_resume >= at_pause);
        assert!(after_resume - at_pause < Duration::from_millis(30));
    }

    #[tokio::test]
    async fn acquisition_failure_fails_session() {
        let session = RecordingSession::new(
            MockSource::failing(CaptureError::PermissionDenied(
                "access rejected".to_string(),
            )),
            factory(),
        );

        let err = session.start(StartOptions::default()).await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Capture(CaptureError::PermissionDenied(_))
        ));
        assert_eq!(session.state(), SessionState::Failed);
        assert!(session.failure_reason().unwrap().contains("access rejected"));
    }

    #[tokio::test]
    async fn encoder_construction_failure_releases_stream() {
        let session = RecordingSession::new(MockSource::new(), BrokenFactory);

        let err = session
            .start(StartOptions {
                mode: CaptureMode::Compressed,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Encoder(EncoderError::Unavailable(_))
        ));
        assert_eq!(session.state(), SessionState::Failed);
        assert!(session.source.was_released());
    }

    /// Capture path whose deliver always errors
    struct FailingCapture;

    impl ActiveCapture for FailingCapture {
        fn deliver(&mut self, _block: AudioBlock) -> Result<(), EncoderError> {
            Err(EncoderError::EncodeFailed("encoder rejected input".to_string()))
        }
        fn pause(&mut self) {}
        fn resume(&mut self) {}
        fn finalize(self: Box<Self>) -> Result<(Vec<u8>, String), FinalizeError> {
            Err(FinalizeError::Empty)
        }
    }

    struct FailingFactory;

    impl CaptureFactory for FailingFactory {
        fn create(
            &self,
            _mode: CaptureMode,
            _spec: StreamSpec,
        ) -> Result<Box<dyn ActiveCapture>, EncoderError> {
            Ok(Box::new(FailingCapture))
        }
    }

    #[tokio::test]
    async fn capture_failure_mid_recording_fails_session() {
        let session = RecordingSession::new(MockSource::new(), FailingFactory);
        session.start(StartOptions::default()).await.unwrap();

        session.source.send(zero_block(8));
        settle().await;

        assert_eq!(session.state(), SessionState::Failed);
        assert!(session.source.was_released());
        assert!(session
            .failure_reason()
            .unwrap()
            .contains("encoder rejected input"));
    }

    #[tokio::test]
    async fn compressed_mode_produces_flac_artifact() {
        let session = pcm_session();
        session
            .start(StartOptions {
                mode: CaptureMode::Compressed,
                ..Default::default()
            })
            .await
            .unwrap();

        session.source.send(zero_block(4096));
        settle().await;

        let artifact = session.stop().await.unwrap();
        assert_eq!(artifact.mime_type(), "audio/flac");
        assert!(artifact.filename().ends_with(".flac"));
        assert_eq!(&artifact.bytes()[0..4], b"fLaC");
    }

    #[tokio::test]
    async fn reset_clears_artifact_and_returns_to_idle() {
        let session = pcm_session();
        session.start(StartOptions::default()).await.unwrap();
        session.source.send(zero_block(64));
        settle().await;
        session.stop().await.unwrap();
        assert!(session.artifact().is_some());

        session.reset().await.unwrap();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.artifact().is_none());
        assert_eq!(session.elapsed(), Duration::ZERO);

        // A fresh session can start after reset
        session.start(StartOptions::default()).await.unwrap();
        assert_eq!(session.state(), SessionState::Recording);
    }

    #[tokio::test]
    async fn reset_while_recording_is_rejected() {
        let session = pcm_session();
        session.start(StartOptions::default()).await.unwrap();
        assert!(matches!(
            session.reset().await.unwrap_err(),
            SessionError::InvalidState(_)
        ));
    }

    #[tokio::test]
    async fn blocks_after_stop_are_discarded() {
        let session = pcm_session();
        session.start(StartOptions::default()).await.unwrap();
        session.source.send(zero_block(64));
        settle().await;

        let artifact = session.stop().await.unwrap();
        assert_eq!(artifact.bytes().len(), 44 + 64 * 2);

        // Late blocks have nowhere to go; the pump discards them
        session.source.send(zero_block(64));
        settle().await;
        assert_eq!(session.artifact().unwrap().bytes().len(), 44 + 64 * 2);
    }

    /// Sanity check that the chunk-path plumbing carries encoder output
    /// through to the artifact (exercised without a real codec).
    struct StaticChunkCapture {
        chunks: Vec<EncodedChunk>,
    }

    impl ActiveCapture for StaticChunkCapture {
        fn deliver(&mut self, _block: AudioBlock) -> Result<(), EncoderError> {
            Ok(())
        }
        fn pause(&mut self) {}
        fn resume(&mut self) {}
        fn finalize(self: Box<Self>) -> Result<(Vec<u8>, String), FinalizeError> {
            let mut buffer = crate::domain::audio::ChunkBuffer::new();
            for chunk in self.chunks {
                buffer.push(chunk);
            }
            buffer.finalize().ok_or(FinalizeError::Empty)
        }
    }

    struct StaticChunkFactory;

    impl CaptureFactory for StaticChunkFactory {
        fn create(
            &self,
            _mode: CaptureMode,
            _spec: StreamSpec,
        ) -> Result<Box<dyn ActiveCapture>, EncoderError> {
            Ok(Box::new(StaticChunkCapture {
                chunks: vec![
                    EncodedChunk::new("audio/webm", vec![1, 2]),
                    EncodedChunk::new("audio/webm", vec![3]),
                ],
            }))
        }
    }

    #[tokio::test]
    async fn encoder_reported_mime_reaches_artifact() {
        let session = RecordingSession::new(MockSource::new(), StaticChunkFactory);
        session
            .start(StartOptions {
                mode: CaptureMode::Compressed,
                ..Default::default()
            })
            .await
            .unwrap();

        let artifact = session.stop().await.unwrap();
        assert_eq!(artifact.mime_type(), "audio/webm");
        assert_eq!(artifact.bytes(), &[1, 2, 3]);
        assert!(artifact.filename().ends_with(".webm"));
    }
}
