//! Core data types handed to the front end.
//!
//! Rule of thumb:
//! - These structs should be “boring bags of data”
//! - No tag parsing code
//! - No rule logic
//!
//! The CLI prints them; a GUI could render them the same way.

use std::fmt;
use std::path::PathBuf;

/// Stream parameters of the loaded file. Every field is best-effort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioInfo {
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
    pub duration_ms: Option<u64>,
    /// Average bits per second over the whole file.
    pub bitrate: Option<u32>,
}

/// Everything known about the loaded file, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataListing {
    pub path: PathBuf,
    /// Simplified fields and their values.
    pub fields: Vec<(String, Vec<String>)>,
    /// Raw frames not covered by a simplified field: (frame id, rendering).
    pub extra_frames: Vec<(String, String)>,
    pub audio: Option<AudioInfo>,
}

impl fmt::Display for MetadataListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.path.display())?;

        writeln!(f, "--- Fields ---")?;
        for (name, values) in &self.fields {
            writeln!(f, "{name}: {values:?}")?;
        }

        writeln!(f, "--- Additional frames ---")?;
        for (id, rendered) in &self.extra_frames {
            writeln!(f, "{id}: {rendered}")?;
        }

        if let Some(audio) = &self.audio {
            writeln!(f, "--- Audio ---")?;
            write_opt(f, "Bitrate", audio.bitrate, " bps")?;
            write_opt(f, "Sample Rate", audio.sample_rate, " Hz")?;
            write_opt(f, "Channels", audio.channels, "")?;
            if let Some(ms) = audio.duration_ms {
                writeln!(f, "Duration: {:.2} s", ms as f64 / 1000.0)?;
            }
        }

        Ok(())
    }
}

fn write_opt<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: Option<T>,
    unit: &str,
) -> fmt::Result {
    match value {
        Some(v) => writeln!(f, "{label}: {v}{unit}"),
        None => writeln!(f, "{label}: unknown"),
    }
}
