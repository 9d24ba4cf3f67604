//! Error taxonomy for the decode/estimation pipeline

use thiserror::Error;

/// Errors raised while decoding audio or estimating pitch
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("failed to open audio file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported or corrupt audio data: {0}")]
    Format(#[from] symphonia::core::errors::Error),

    #[error("no decodable audio track found")]
    NoAudioTrack,

    #[error("audio track has no sample rate")]
    NoSampleRate,

    #[error("decoded audio contains no samples")]
    EmptyAudio,

    #[error("pitch estimation failed: {0}")]
    Estimation(String),
}
