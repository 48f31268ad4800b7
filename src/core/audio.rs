//! core/audio.rs
//! Stream parameters of an audio file, read with Symphonia's probe.
//! Nothing is decoded: only the container/codec headers are inspected.

use std::fs::File;
use std::path::Path;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;

use super::error::{Error, Result};
use super::types::AudioInfo;

pub fn probe_audio_info(path: &Path) -> Result<AudioInfo> {
    let file = File::open(path).map_err(|e| Error::AudioProbe(format!("open failed: {e}")))?;
    let file_size = file.metadata().map(|m| m.len()).ok();
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioProbe(format!("format probe failed: {e}")))?;

    let track = probed
        .format
        .default_track()
        .ok_or_else(|| Error::AudioProbe("no supported audio track found".to_string()))?;

    let params = &track.codec_params;
    let duration_ms = duration_from_params(params.time_base, params.n_frames);

    Ok(AudioInfo {
        sample_rate: params.sample_rate,
        channels: params.channels.map(|c| c.count() as u16),
        duration_ms,
        bitrate: approximate_bitrate(file_size, duration_ms),
    })
}

fn duration_from_params(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<u64> {
    let tb = time_base?;
    let frames = n_frames?;

    let t = tb.calc_time(frames);
    // Time is { seconds: u64, frac: f64 } in symphonia 0.5.x.
    let ms = (t.seconds as f64 * 1000.0) + (t.frac * 1000.0);
    Some(ms.round() as u64)
}

/// Whole-file average in bits per second. Includes tag bytes, so it runs a
/// little high for files with large embedded art.
fn approximate_bitrate(file_size: Option<u64>, duration_ms: Option<u64>) -> Option<u32> {
    let size = file_size?;
    let ms = duration_ms.filter(|&ms| ms > 0)?;
    Some((size * 8 * 1000 / ms) as u32)
}
