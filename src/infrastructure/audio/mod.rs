//! Audio - 波形持久化

mod wav_writer;

pub use wav_writer::{write_mono_wav, WavWriteError};
