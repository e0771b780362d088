//! Platform audio adapters

mod cpal_source;

pub use cpal_source::CpalInputSource;
