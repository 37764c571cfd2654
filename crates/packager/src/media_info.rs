use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    #[default]
    Mp4,
    MpegTs,
    WebM,
    /// Plain text subtitles such as WebVTT.
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamInfo {
    Video {
        width: u32,
        height: u32,
        /// Duration of one frame in `time_scale` units.
        frame_duration: u32,
        time_scale: u32,
    },
    Audio {
        sampling_frequency: u32,
        num_channels: u32,
    },
    Text,
}

/// Inclusive byte range inside a media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    pub begin: u64,
    pub end: u64,
}

impl std::fmt::Display for ByteRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.begin, self.end)
    }
}

/// Description of one encoded stream, as produced by the muxer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Bits per second.
    pub bandwidth: u64,
    pub codecs: String,
    pub container: Container,
    pub stream: StreamInfo,
    pub language: Option<String>,
    /// Ticks per second of segment timestamps.
    pub reference_time_scale: u32,
    pub media_duration_seconds: Option<f64>,

    pub media_file_name: Option<String>,
    pub init_segment_name: Option<String>,
    pub segment_template: Option<String>,

    pub init_range: Option<ByteRange>,
    pub index_range: Option<ByteRange>,
}

impl MediaInfo {
    pub fn new(stream: StreamInfo, container: Container) -> Self {
        Self {
            bandwidth: 0,
            codecs: String::new(),
            container,
            stream,
            language: None,
            reference_time_scale: 90000,
            media_duration_seconds: None,
            media_file_name: None,
            init_segment_name: None,
            segment_template: None,
            init_range: None,
            index_range: None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self.stream {
            StreamInfo::Video { .. } => "video",
            StreamInfo::Audio { .. } => "audio",
            StreamInfo::Text => "text",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match (self.container, &self.stream) {
            (Container::Mp4, StreamInfo::Audio { .. }) => "audio/mp4",
            (Container::Mp4, StreamInfo::Text) => "application/mp4",
            (Container::Mp4, _) => "video/mp4",
            (Container::MpegTs, _) => "video/mp2t",
            (Container::WebM, StreamInfo::Audio { .. }) => "audio/webm",
            (Container::WebM, _) => "video/webm",
            (Container::Text, _) => "text/vtt",
        }
    }
}
