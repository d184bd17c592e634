//! WAV Writer - 单声道波形写出
//!
//! 把引擎返回的 f32 样本数组持久化为 16-bit PCM 单声道 WAV。
//! 样本数组被视为单通道（即在前面补一个单例维度），内容不做任何解读。

use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;
use thiserror::Error;

/// 波形写出错误
#[derive(Debug, Error)]
pub enum WavWriteError {
    #[error("Invalid sampling rate: {0}")]
    InvalidSamplingRate(u32),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

/// 写单声道 WAV 文件
///
/// 样本按 [-1.0, 1.0] 截断后量化为 i16。
pub fn write_mono_wav(
    path: impl AsRef<Path>,
    samples: &[f32],
    sampling_rate: u32,
) -> Result<(), WavWriteError> {
    if sampling_rate == 0 {
        return Err(WavWriteError::InvalidSamplingRate(sampling_rate));
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: sampling_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");

        write_mono_wav(&path, &[0.0, 0.5, -0.5, 1.0, -1.0], 24000).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 24000);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0], 0);
        assert_eq!(samples[3], i16::MAX);
    }

    #[test]
    fn test_out_of_range_samples_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clamped.wav");

        write_mono_wav(&path, &[2.0, -2.0], 16000).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples[0], i16::MAX);
        assert_eq!(samples[1], -i16::MAX);
    }

    #[test]
    fn test_zero_sampling_rate_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.wav");
        let result = write_mono_wav(&path, &[0.0], 0);
        assert!(matches!(result, Err(WavWriteError::InvalidSamplingRate(0))));
    }

    #[test]
    fn test_empty_samples_produce_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");

        write_mono_wav(&path, &[], 24000).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 0);
    }
}
