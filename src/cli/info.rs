use std::path::Path;

use anyhow::{Result, anyhow};
use serde::Serialize;

use super::command::InfoFormat;
use crate::input::display_name;
use crate::timestamp::time_str;
use mpa::process::channel::Mp3File;
use mpa::process::stats::StreamStats;
use mpa::structs::rates::sample_rate;

/// Stream information as printed by `--info`.
#[derive(Debug, Serialize)]
pub struct StreamReport {
    pub file: String,
    pub size: usize,
    pub first_frame_offset: usize,
    pub version: String,
    pub layer: String,
    pub channel_mode: String,
    pub emphasis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_frequency: Option<u32>,
    pub bitrate: Bitrate,
    pub frames: usize,
    pub crc_protected_frames: usize,
    pub marked_frames: usize,
    pub duration: String,
    pub capacity_bits: usize,
    pub capacity_bytes: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum Bitrate {
    Constant { kbps: u32 },
    Variable { min_kbps: u32, max_kbps: u32, average_kbps: f64 },
}

impl StreamReport {
    pub fn new(input: &Path, file: &Mp3File) -> Result<Self> {
        let stats =
            StreamStats::collect(file).ok_or_else(|| anyhow!("Frame chain is empty"))?;
        let header = &stats.first_header;

        let bitrate = if stats.is_vbr() {
            Bitrate::Variable {
                min_kbps: stats.min_bitrate / 1000,
                max_kbps: stats.max_bitrate / 1000,
                average_kbps: (stats.average_bitrate() / 100.0).round() / 10.0,
            }
        } else {
            Bitrate::Constant {
                kbps: stats.min_bitrate / 1000,
            }
        };

        Ok(Self {
            file: display_name(input),
            size: file.as_bytes().len(),
            first_frame_offset: stats.first_frame,
            version: header.version.to_string(),
            layer: header.layer.to_string(),
            channel_mode: header.mode.to_string(),
            emphasis: header.emphasis.to_string(),
            sampling_frequency: sample_rate(header.version, header.sample_rate_index).ok(),
            bitrate,
            frames: stats.frames,
            crc_protected_frames: stats.protected_frames,
            marked_frames: stats.marked_frames,
            duration: time_str(stats.duration_secs),
            capacity_bits: file.capacity(),
            capacity_bytes: file.capacity_bytes(),
        })
    }

    pub fn render(&self, format: InfoFormat) -> Result<String> {
        match format {
            InfoFormat::Yaml => Ok(serde_yaml_ng::to_string(self)?),
            InfoFormat::Plain => Ok(self.to_plain()),
        }
    }

    fn to_plain(&self) -> String {
        let mut lines = vec![
            String::new(),
            "MPEG Audio Stream Information".to_string(),
            "=============================".to_string(),
            String::new(),
            format!("File                        {}", self.file),
            format!(
                "Size                        {:.2} MB ({} bytes)",
                self.size as f64 / 1_000_000.0,
                self.size
            ),
            format!("First frame                 {:#X}", self.first_frame_offset),
            format!("Format                      {} {}", self.version, self.layer),
            format!("Channel mode                {}", self.channel_mode),
            format!("Emphasis                    {}", self.emphasis),
        ];

        if let Some(freq) = self.sampling_frequency {
            lines.push(format!("Sampling frequency          {freq} Hz"));
        }

        lines.push(match &self.bitrate {
            Bitrate::Constant { kbps } => format!("Bitrate                     {kbps} kbps"),
            Bitrate::Variable {
                min_kbps,
                max_kbps,
                average_kbps,
            } => format!(
                "Bitrate                     VBR {min_kbps}-{max_kbps} kbps (average {average_kbps:.1})"
            ),
        });

        lines.extend([
            String::new(),
            "Frame Chain".to_string(),
            format!("  Frames                    {}", self.frames),
            format!("  CRC protected             {}", self.crc_protected_frames),
            format!("  Private bit set           {}", self.marked_frames),
            format!("  Duration                  {}", self.duration),
            format!(
                "  Capacity                  {} bits ({} bytes)",
                self.capacity_bits, self.capacity_bytes
            ),
        ]);

        lines.join("\n")
    }
}

pub fn cmd_info(input: &Path, file: &Mp3File, format: InfoFormat) -> Result<()> {
    log::info!("Analyzing MPEG audio stream: {}", input.display());

    let report = StreamReport::new(input, file)?;
    println!("{}", report.render(format)?);

    Ok(())
}
