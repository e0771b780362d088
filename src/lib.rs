//! Wavecap - microphone capture and WAV/FLAC export pipeline
//!
//! This crate records live microphone audio and exports it as a playable
//! file: lossless PCM WAV, or a compressed container produced by a
//! streaming encoder adapter.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: The recording session orchestrator and port
//!   interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, WAV/FLAC encoding,
//!   XDG config)
//! - **CLI**: Command-line interface and argument parsing

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
