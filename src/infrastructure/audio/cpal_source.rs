//! Cross-platform input source using cpal
//!
//! The cpal stream is not thread-safe, so each acquisition runs on a
//! dedicated capture thread; the callback forwards interleaved blocks
//! through an unbounded channel to the session's pump. The returned guard
//! gates the callback (pause) and shuts the thread down on drop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use tokio::sync::{mpsc, oneshot};

use crate::application::ports::{
    AcquireRequest, CaptureError, CaptureStream, DeviceEnumerator, InputDevice, InputSource,
    StreamGuard, StreamSpec,
};
use crate::domain::audio::AudioBlock;

/// Poll interval of the capture thread's shutdown loop
const SHUTDOWN_POLL: Duration = Duration::from_millis(50);

/// Classify an opaque backend error message.
/// Platform layers report permission rejections as backend-specific
/// strings, not as a dedicated error variant.
fn classify_backend_error(message: &str) -> CaptureError {
    let lower = message.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("access") {
        CaptureError::PermissionDenied(message.to_string())
    } else {
        CaptureError::StreamFailed(message.to_string())
    }
}

/// Convert one i16 sample to the f32 range the pipeline buffers
fn f32_from_i16(sample: i16) -> f32 {
    sample as f32 / 32768.0
}

/// Input source and device enumerator over the default cpal host
pub struct CpalInputSource {
    /// Set while an acquisition is live; cleared by the guard's drop.
    /// Two sessions must never hold the input stream simultaneously.
    in_use: Arc<AtomicBool>,
}

impl CpalInputSource {
    pub fn new() -> Self {
        Self {
            in_use: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Resolve the requested device: exact id, numeric index, or the
    /// system default when no id was given
    fn find_device(device_id: Option<&str>) -> Result<cpal::Device, CaptureError> {
        let host = cpal::default_host();

        let Some(id) = device_id else {
            return host.default_input_device().ok_or_else(|| {
                CaptureError::DeviceUnavailable("no input device available".to_string())
            });
        };

        let devices = host
            .input_devices()
            .map_err(|e| classify_backend_error(&e.to_string()))?;

        let index: Option<usize> = id.parse().ok();
        for (n, device) in devices.enumerate() {
            if Some(n) == index {
                return Ok(device);
            }
            if device.name().map(|name| name == id).unwrap_or(false) {
                return Ok(device);
            }
        }

        Err(CaptureError::DeviceUnavailable(format!(
            "input device \"{id}\" not found"
        )))
    }

    /// Pick a stream configuration, honoring the advisory rate when the
    /// device supports it. Falls back to the device default; the
    /// negotiated rate is what gets reported and written to the header.
    fn pick_config(
        device: &cpal::Device,
        advisory_rate: Option<u32>,
    ) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        if let Some(rate) = advisory_rate {
            if let Ok(ranges) = device.supported_input_configs() {
                for range in ranges {
                    let format = range.sample_format();
                    if format != SampleFormat::F32 && format != SampleFormat::I16 {
                        continue;
                    }
                    if range.min_sample_rate().0 <= rate && rate <= range.max_sample_rate().0 {
                        let config = range.with_sample_rate(SampleRate(rate));
                        return Ok((config.config(), format));
                    }
                }
            }
        }

        let default = device
            .default_input_config()
            .map_err(|e| classify_backend_error(&e.to_string()))?;
        let format = default.sample_format();
        if format != SampleFormat::F32 && format != SampleFormat::I16 {
            return Err(CaptureError::StreamFailed(format!(
                "unsupported sample format {format:?}"
            )));
        }

        if let Some(rate) = advisory_rate {
            if default.sample_rate().0 != rate {
                tracing::warn!(
                    requested = rate,
                    negotiated = default.sample_rate().0,
                    "device does not support the requested sample rate; recording at device rate"
                );
            }
        }

        Ok((default.config(), format))
    }
}

impl Default for CpalInputSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Gate + shutdown half of a live cpal acquisition
struct CpalStreamGuard {
    capturing: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    in_use: Arc<AtomicBool>,
}

impl StreamGuard for CpalStreamGuard {
    fn set_capturing(&self, capturing: bool) {
        self.capturing.store(capturing, Ordering::SeqCst);
    }
}

impl Drop for CpalStreamGuard {
    fn drop(&mut self) {
        self.capturing.store(false, Ordering::SeqCst);
        self.shutdown.store(true, Ordering::SeqCst);
        self.in_use.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl InputSource for CpalInputSource {
    async fn acquire(&self, request: AcquireRequest) -> Result<CaptureStream, CaptureError> {
        if self.in_use.swap(true, Ordering::SeqCst) {
            return Err(CaptureError::DeviceUnavailable(
                "input stream already in use".to_string(),
            ));
        }

        let (ready_tx, ready_rx) = oneshot::channel::<Result<StreamSpec, CaptureError>>();
        let (block_tx, block_rx) = mpsc::unbounded_channel::<AudioBlock>();
        let capturing = Arc::new(AtomicBool::new(true));
        let shutdown = Arc::new(AtomicBool::new(false));

        let device_id = request.device_id.clone();
        let advisory_rate = request.sample_rate;
        let callback_gate = Arc::clone(&capturing);
        let thread_shutdown = Arc::clone(&shutdown);

        std::thread::spawn(move || {
            let opened = Self::find_device(device_id.as_deref()).and_then(|device| {
                let (config, format) = Self::pick_config(&device, advisory_rate)?;
                let spec = StreamSpec {
                    sample_rate: config.sample_rate.0,
                    channels: config.channels,
                };
                let channels = config.channels;

                let error_cb = |err: cpal::StreamError| {
                    tracing::error!("audio stream error: {err}");
                };

                let stream = match format {
                    SampleFormat::F32 => {
                        let gate = Arc::clone(&callback_gate);
                        let tx = block_tx.clone();
                        device.build_input_stream(
                            &config,
                            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                                if gate.load(Ordering::SeqCst) {
                                    let block =
                                        AudioBlock::from_interleaved(channels, data.to_vec());
                                    let _ = tx.send(block);
                                }
                            },
                            error_cb,
                            None,
                        )
                    }
                    SampleFormat::I16 => {
                        let gate = Arc::clone(&callback_gate);
                        let tx = block_tx.clone();
                        device.build_input_stream(
                            &config,
                            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                                if gate.load(Ordering::SeqCst) {
                                    let samples: Vec<f32> =
                                        data.iter().map(|&s| f32_from_i16(s)).collect();
                                    let block = AudioBlock::from_interleaved(channels, samples);
                                    let _ = tx.send(block);
                                }
                            },
                            error_cb,
                            None,
                        )
                    }
                    other => {
                        return Err(CaptureError::StreamFailed(format!(
                            "unsupported sample format {other:?}"
                        )))
                    }
                };

                let stream = stream.map_err(|e| match e {
                    cpal::BuildStreamError::DeviceNotAvailable => {
                        CaptureError::DeviceUnavailable("device no longer available".to_string())
                    }
                    other => classify_backend_error(&other.to_string()),
                })?;

                stream
                    .play()
                    .map_err(|e| classify_backend_error(&e.to_string()))?;

                tracing::debug!(
                    sample_rate = spec.sample_rate,
                    channels = spec.channels,
                    "audio stream started"
                );
                Ok((stream, spec))
            });

            let (stream, spec) = match opened {
                Ok(opened) => opened,
                Err(e) => {
                    // Everything opened so far drops right here; no partial
                    // stream outlives the failure
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            let _ = ready_tx.send(Ok(spec));

            while !thread_shutdown.load(Ordering::SeqCst) {
                std::thread::sleep(SHUTDOWN_POLL);
            }

            drop(stream);
            tracing::debug!("audio stream released");
        });

        let spec = match ready_rx.await {
            Ok(Ok(spec)) => spec,
            Ok(Err(e)) => {
                self.in_use.store(false, Ordering::SeqCst);
                return Err(e);
            }
            Err(_) => {
                self.in_use.store(false, Ordering::SeqCst);
                return Err(CaptureError::StreamFailed(
                    "capture thread terminated during startup".to_string(),
                ));
            }
        };

        Ok(CaptureStream {
            spec,
            blocks: block_rx,
            guard: Box::new(CpalStreamGuard {
                capturing,
                shutdown,
                in_use: Arc::clone(&self.in_use),
            }),
        })
    }
}

impl DeviceEnumerator for CpalInputSource {
    fn list_input_devices(&self) -> Result<Vec<InputDevice>, CaptureError> {
        let host = cpal::default_host();
        let devices = host
            .input_devices()
            .map_err(|e| classify_backend_error(&e.to_string()))?;

        Ok(devices
            .filter_map(|device| device.name().ok())
            .map(|name| InputDevice {
                id: name.clone(),
                label: name,
            })
            .collect())
    }
}
