//! Test doubles shared by the integration tests.

pub mod recording_backend;

#[allow(unused_imports)]
pub use recording_backend::RecordingBackend;
