use std::path::Path;

use crate::{
    clock::{Clock, SystemClock},
    media_info::MediaInfo,
    options::{DashProfile, MpdOptions, MpdType},
    period::Period,
    representation::DURATION_ATTRIBUTE,
    util::{
        path::make_path_relative,
        time::{seconds_to_xml_duration, xml_date_time_now_with_offset},
        IdCounter,
    },
    version::VersionInfo,
    xml::{XmlDocument, XmlNode, XmlRuntime},
    MpdResult,
};

const XML_NAMESPACE: &str = "urn:mpeg:dash:schema:mpd:2011";
const XML_NAMESPACE_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
const XML_NAMESPACE_XLINK: &str = "http://www.w3.org/1999/xlink";
const DASH_SCHEMA_MPD_2011: &str = "urn:mpeg:dash:schema:mpd:2011 DASH-MPD.xsd";
const CENC_NAMESPACE: &str = "urn:mpeg:cenc:2013";

const ON_DEMAND_PROFILE: &str = "urn:mpeg:dash:profile:isoff-on-demand:2011";
const LIVE_PROFILE: &str = "urn:mpeg:dash:profile:isoff-live:2011";

const FILE_PROTOCOL: &str = "file://";

/// The `profiles` URN advertised for `profile`.
pub fn profile_urn(profile: DashProfile) -> &'static str {
    match profile {
        DashProfile::OnDemand => ON_DEMAND_PROFILE,
        DashProfile::Live => LIVE_PROFILE,
    }
}

fn add_mpd_namespace_info(mpd: &mut XmlNode) {
    mpd.set_string_attribute("xmlns", XML_NAMESPACE);
    mpd.set_string_attribute("xmlns:xsi", XML_NAMESPACE_XSI);
    mpd.set_string_attribute("xmlns:xlink", XML_NAMESPACE_XLINK);
    mpd.set_string_attribute("xsi:schemaLocation", DASH_SCHEMA_MPD_2011);
    mpd.set_string_attribute("xmlns:cenc", CENC_NAMESPACE);
}

/// Whether `value` can be written as an ISO8601 duration attribute.
fn is_valid_duration(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn set_if_positive(mpd: &mut XmlNode, name: &str, value: f64) {
    if is_valid_duration(value) {
        mpd.set_string_attribute(name, seconds_to_xml_duration(value));
    }
}

/// Largest representation duration in the first `<Period>` of `mpd`.
///
/// Only direct children of `mpd` are searched for periods. The transient
/// `duration` marker is removed from every representation of every period,
/// so it never reaches the serialized document.
pub fn get_static_mpd_duration(mpd: &mut XmlNode) -> f64 {
    let mut periods = mpd
        .element_children_mut()
        .filter(|node| node.name() == "Period");
    let Some(first_period) = periods.next() else {
        tracing::warn!("No Period node found. Set MPD duration to 0.");
        return 0.0;
    };

    let max_duration = take_max_duration(first_period);
    for period in periods {
        take_max_duration(period);
    }
    max_duration
}

/// Remove the duration markers below `period` and return the largest one.
fn take_max_duration(period: &mut XmlNode) -> f64 {
    let mut max_duration = 0.0_f64;
    for adaptation_set in period.element_children_mut() {
        for representation in adaptation_set.element_children_mut() {
            let Some(duration) = representation.remove_attribute(DURATION_ATTRIBUTE) else {
                continue;
            };
            match duration.parse::<f64>() {
                Ok(value) if value.is_finite() => max_duration = max_duration.max(value),
                Ok(_) => tracing::warn!(duration = %duration, "Ignoring non-finite duration"),
                Err(e) => {
                    tracing::warn!(duration = %duration, error = %e, "Ignoring invalid duration")
                }
            }
        }
    }
    max_duration
}

/// Assembles the MPD from registered base URLs and periods.
///
/// The builder has no internal locking. Callers that refresh a dynamic MPD
/// while other threads still add content must guard the whole builder, e.g.
/// with a `Mutex<MpdBuilder>`.
pub struct MpdBuilder {
    options: MpdOptions,
    base_urls: Vec<String>,
    periods: Vec<Period>,

    adaptation_set_counter: IdCounter,
    representation_counter: IdCounter,

    /// Computed once on the first dynamic build that knows the earliest
    /// timestamp, then reused for the lifetime of the builder.
    availability_start_time: Option<String>,

    clock: Box<dyn Clock>,
    version: VersionInfo,
    runtime: XmlRuntime,
}

impl MpdBuilder {
    pub fn new(options: MpdOptions) -> Self {
        Self {
            options,
            base_urls: Vec::new(),
            periods: Vec::new(),
            adaptation_set_counter: IdCounter::new(),
            representation_counter: IdCounter::new(),
            availability_start_time: None,
            clock: Box::new(SystemClock),
            version: VersionInfo::from_build(),
            runtime: XmlRuntime::acquire(),
        }
    }

    pub fn options(&self) -> &MpdOptions {
        &self.options
    }

    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.clock = Box::new(clock);
    }

    pub fn set_version_info(&mut self, version: VersionInfo) {
        self.version = version;
    }

    pub fn add_base_url(&mut self, base_url: impl Into<String>) {
        self.base_urls.push(base_url.into());
    }

    pub fn base_urls(&self) -> &[String] {
        &self.base_urls
    }

    /// Append a new period and return it for population.
    pub fn add_period(&mut self) -> &mut Period {
        let id = self.periods.len() as u32;
        self.periods.push(Period::new(
            id,
            self.options.clone(),
            self.adaptation_set_counter.clone(),
            self.representation_counter.clone(),
        ));
        let index = self.periods.len() - 1;
        &mut self.periods[index]
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn periods_mut(&mut self) -> &mut [Period] {
        &mut self.periods
    }

    pub fn availability_start_time(&self) -> Option<&str> {
        self.availability_start_time.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn clear_availability_start_time(&mut self) {
        self.availability_start_time = None;
    }

    /// Serialize the MPD. Every call rebuilds the document from current state.
    pub fn to_mpd_string(&mut self) -> MpdResult<String> {
        let document = self.generate_mpd()?;
        document.serialize(&self.runtime)
    }

    /// Build the MPD document tree.
    ///
    /// Fails when a period can not produce its subtree or a node can not be
    /// inserted. Missing optional parameters are logged and skipped.
    pub fn generate_mpd(&mut self) -> MpdResult<XmlDocument> {
        let mut mpd = XmlNode::new("MPD");

        for base_url in &self.base_urls {
            let mut node = XmlNode::new("BaseURL");
            node.set_content(base_url.as_str());
            mpd.add_child(node)?;
        }

        for period in &self.periods {
            mpd.add_child(period.to_xml()?)?;
        }

        add_mpd_namespace_info(&mut mpd);
        mpd.set_string_attribute("profiles", profile_urn(self.options.dash_profile));

        self.add_common_mpd_info(&mut mpd);
        match self.options.mpd_type {
            MpdType::Static => self.add_static_mpd_info(&mut mpd),
            MpdType::Dynamic => self.add_dynamic_mpd_info(&mut mpd),
        }

        let document = XmlDocument::new(mpd);
        Ok(match self.version.comment() {
            Some(comment) => document.with_comment(comment),
            None => document,
        })
    }

    fn add_common_mpd_info(&self, mpd: &mut XmlNode) {
        let min_buffer_time = self.options.mpd_params.min_buffer_time;
        if is_valid_duration(min_buffer_time) {
            mpd.set_string_attribute("minBufferTime", seconds_to_xml_duration(min_buffer_time));
        } else {
            tracing::error!(min_buffer_time, "minBufferTime value not specified.");
        }
    }

    fn add_static_mpd_info(&self, mpd: &mut XmlNode) {
        mpd.set_string_attribute("type", "static");
        let duration = get_static_mpd_duration(mpd);
        mpd.set_string_attribute("mediaPresentationDuration", seconds_to_xml_duration(duration));
    }

    fn add_dynamic_mpd_info(&mut self, mpd: &mut XmlNode) {
        mpd.set_string_attribute("type", "dynamic");
        match xml_date_time_now_with_offset(0, &*self.clock) {
            Some(publish_time) => mpd.set_string_attribute("publishTime", publish_time),
            None => tracing::error!("Current time can not be formatted as publishTime."),
        }

        // availabilityStartTime is required for dynamic MPDs and stays fixed once known.
        if self.availability_start_time.is_none() {
            let start = self.earliest_timestamp().and_then(|earliest| {
                // `as` saturates, out of range offsets are rejected below.
                let offset = -(earliest.ceil() as i64);
                let start = xml_date_time_now_with_offset(offset, &*self.clock)?;
                tracing::info!(
                    earliest,
                    availability_start_time = %start,
                    "availabilityStartTime calculated"
                );
                Some(start)
            });
            match start {
                Some(start) => self.availability_start_time = Some(start),
                None => tracing::error!(
                    "Could not determine the earliest segment presentation time for \
                     availabilityStartTime calculation."
                ),
            }
        }
        if let Some(start) = &self.availability_start_time {
            mpd.set_string_attribute("availabilityStartTime", start.as_str());
        }

        let params = &self.options.mpd_params;
        if is_valid_duration(params.minimum_update_period) {
            mpd.set_string_attribute(
                "minimumUpdatePeriod",
                seconds_to_xml_duration(params.minimum_update_period),
            );
        } else {
            tracing::warn!("The profile is dynamic but no minimumUpdatePeriod specified.");
        }

        set_if_positive(mpd, "timeShiftBufferDepth", params.time_shift_buffer_depth);
        set_if_positive(
            mpd,
            "suggestedPresentationDelay",
            params.suggested_presentation_delay,
        );
    }

    /// Earliest presentation time of the first period, in seconds.
    fn earliest_timestamp(&self) -> Option<f64> {
        self.periods.first().and_then(Period::earliest_timestamp)
    }

    /// Rewrite the file names of `media_info` relative to the directory of
    /// `mpd_path`, for files stored below that directory.
    ///
    /// Only `media_file_name`, `init_segment_name` and `segment_template` are
    /// touched. A leading `file://` on `mpd_path` is ignored.
    pub fn make_paths_relative_to_mpd(mpd_path: &str, media_info: &mut MediaInfo) {
        let mpd_file_path = mpd_path.strip_prefix(FILE_PROTOCOL).unwrap_or(mpd_path);
        if mpd_file_path.is_empty() {
            return;
        }
        let Some(mpd_dir) = Path::new(mpd_file_path)
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
        else {
            return;
        };

        for field in [
            &mut media_info.media_file_name,
            &mut media_info.init_segment_name,
            &mut media_info.segment_template,
        ] {
            if let Some(path) = field {
                let relative = make_path_relative(path, mpd_dir);
                *path = relative;
            }
        }
    }
}

impl std::fmt::Debug for MpdBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MpdBuilder")
            .field("options", &self.options)
            .field("base_urls", &self.base_urls)
            .field("periods", &self.periods.len())
            .field("availability_start_time", &self.availability_start_time)
            .field("clock", &"<clock>")
            .field("version", &self.version)
            .finish()
    }
}
