use crate::{
    media_info::{MediaInfo, StreamInfo},
    options::{DashProfile, MpdOptions, MpdType},
    xml::XmlNode,
    MpdError, MpdResult,
};

/// Scratch attribute carrying the representation duration in seconds.
///
/// It only exists so the builder can compute `mediaPresentationDuration` from
/// the assembled tree, and is removed from the tree before serialization.
pub(crate) const DURATION_ATTRIBUTE: &str = "duration";

const AUDIO_CHANNEL_CONFIGURATION_SCHEME: &str =
    "urn:mpeg:dash:23003:3:audio_channel_configuration:2011";

/// A run of segments with equal duration, i.e. one `<S>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentInfo {
    pub start_time: u64,
    pub duration: u64,
    /// Number of additional segments following the first one.
    pub repeat: u64,
}

impl SegmentInfo {
    /// Total length of the run, `None` if it does not fit in `u64`.
    fn total_duration(&self) -> Option<u64> {
        self.duration.checked_mul(self.repeat.checked_add(1)?)
    }

    fn end_time(&self) -> Option<u64> {
        self.start_time.checked_add(self.total_duration()?)
    }
}

#[derive(Debug)]
pub struct Representation {
    id: u32,
    media_info: MediaInfo,
    options: MpdOptions,
    segment_infos: Vec<SegmentInfo>,
}

impl Representation {
    pub(crate) fn new(id: u32, media_info: MediaInfo, options: MpdOptions) -> Self {
        Self {
            id,
            media_info,
            options,
            segment_infos: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn media_info(&self) -> &MediaInfo {
        &self.media_info
    }

    pub fn segment_infos(&self) -> &[SegmentInfo] {
        &self.segment_infos
    }

    /// Record a new segment. Times are in `reference_time_scale` units.
    ///
    /// A segment which directly follows the previous run and has the same
    /// duration extends that run instead of starting a new one. A run whose
    /// end time overflows is never extended.
    pub fn add_new_segment(&mut self, start_time: u64, duration: u64) {
        if let Some(last) = self.segment_infos.last_mut() {
            if last.duration == duration && last.end_time() == Some(start_time) {
                last.repeat += 1;
                return;
            }
        }

        self.segment_infos.push(SegmentInfo {
            start_time,
            duration,
            repeat: 0,
        });
    }

    /// Presentation time of the first segment, in seconds.
    pub fn earliest_timestamp(&self) -> Option<f64> {
        let time_scale = self.media_info.reference_time_scale;
        if time_scale == 0 {
            return None;
        }
        let first = self.segment_infos.first()?;
        Some(first.start_time as f64 / time_scale as f64)
    }

    /// Media duration in seconds, either declared or summed from segments.
    ///
    /// `None` when neither is known, the declared value is not finite or the
    /// segment total overflows.
    pub fn duration_seconds(&self) -> Option<f64> {
        if let Some(duration) = self.media_info.media_duration_seconds {
            return duration.is_finite().then_some(duration);
        }

        let time_scale = self.media_info.reference_time_scale;
        if time_scale == 0 || self.segment_infos.is_empty() {
            return None;
        }
        let total = self
            .segment_infos
            .iter()
            .try_fold(0_u64, |total, info| total.checked_add(info.total_duration()?))?;
        Some(total as f64 / time_scale as f64)
    }

    pub fn to_xml(&self) -> MpdResult<XmlNode> {
        let media_info = &self.media_info;
        if media_info.bandwidth == 0 {
            return Err(MpdError::MissingBandwidth {
                representation_id: self.id,
            });
        }

        let mut representation = XmlNode::new("Representation");
        representation.set_integer_attribute("id", self.id as u64);
        representation.set_integer_attribute("bandwidth", media_info.bandwidth);
        if !media_info.codecs.is_empty() {
            representation.set_string_attribute("codecs", media_info.codecs.as_str());
        }

        match media_info.stream {
            StreamInfo::Video {
                width,
                height,
                frame_duration,
                time_scale,
            } => {
                representation.set_integer_attribute("width", width as u64);
                representation.set_integer_attribute("height", height as u64);
                if frame_duration > 0 {
                    representation.set_string_attribute(
                        "frameRate",
                        format!("{time_scale}/{frame_duration}"),
                    );
                }
            }
            StreamInfo::Audio {
                sampling_frequency, ..
            } => {
                representation
                    .set_integer_attribute("audioSamplingRate", sampling_frequency as u64);
            }
            StreamInfo::Text => {}
        }

        if self.options.mpd_type == MpdType::Static {
            if let Some(duration) = self.duration_seconds() {
                representation.set_floating_point_attribute(DURATION_ATTRIBUTE, duration);
            }
        }

        if let StreamInfo::Audio { num_channels, .. } = media_info.stream {
            let mut channels = XmlNode::new("AudioChannelConfiguration");
            channels.set_string_attribute("schemeIdUri", AUDIO_CHANNEL_CONFIGURATION_SCHEME);
            channels.set_integer_attribute("value", num_channels as u64);
            representation.add_child(channels)?;
        }

        match self.options.dash_profile {
            DashProfile::OnDemand => self.add_on_demand_info(&mut representation)?,
            DashProfile::Live => self.add_live_info(&mut representation)?,
        }

        Ok(representation)
    }

    fn add_on_demand_info(&self, representation: &mut XmlNode) -> MpdResult<()> {
        let media_info = &self.media_info;
        if let Some(media_file_name) = &media_info.media_file_name {
            let mut base_url = XmlNode::new("BaseURL");
            base_url.set_content(media_file_name.as_str());
            representation.add_child(base_url)?;
        }

        if let Some(index_range) = media_info.index_range {
            let mut segment_base = XmlNode::new("SegmentBase");
            segment_base.set_string_attribute("indexRange", index_range.to_string());
            segment_base
                .set_integer_attribute("timescale", media_info.reference_time_scale as u64);
            if let Some(init_range) = media_info.init_range {
                let mut initialization = XmlNode::new("Initialization");
                initialization.set_string_attribute("range", init_range.to_string());
                segment_base.add_child(initialization)?;
            }
            representation.add_child(segment_base)?;
        }
        Ok(())
    }

    fn add_live_info(&self, representation: &mut XmlNode) -> MpdResult<()> {
        let media_info = &self.media_info;
        let Some(media) = &media_info.segment_template else {
            return Ok(());
        };

        let mut segment_template = XmlNode::new("SegmentTemplate");
        segment_template
            .set_integer_attribute("timescale", media_info.reference_time_scale as u64);
        if let Some(init_segment_name) = &media_info.init_segment_name {
            segment_template.set_string_attribute("initialization", init_segment_name.as_str());
        }
        segment_template.set_string_attribute("media", media.as_str());
        segment_template.set_integer_attribute("startNumber", 1);

        if !self.segment_infos.is_empty() {
            let mut timeline = XmlNode::new("SegmentTimeline");
            for info in &self.segment_infos {
                let mut s = XmlNode::new("S");
                s.set_integer_attribute("t", info.start_time);
                s.set_integer_attribute("d", info.duration);
                if info.repeat > 0 {
                    s.set_integer_attribute("r", info.repeat);
                }
                timeline.add_child(s)?;
            }
            segment_template.add_child(timeline)?;
        }

        representation.add_child(segment_template)?;
        Ok(())
    }
}
