use crate::{
    adaptation_set::AdaptationSet,
    media_info::MediaInfo,
    options::MpdOptions,
    util::{time::seconds_to_xml_duration, IdCounter},
    xml::XmlNode,
    MpdResult,
};

/// One `<Period>` of the presentation.
///
/// Periods are created by [`crate::MpdBuilder::add_period`] and share the
/// builder's id counters, so adaptation set and representation ids are unique
/// across the whole document.
#[derive(Debug)]
pub struct Period {
    id: u32,
    start_time_in_seconds: f64,
    options: MpdOptions,
    adaptation_set_counter: IdCounter,
    representation_counter: IdCounter,
    adaptation_sets: Vec<AdaptationSet>,
}

impl Period {
    pub(crate) fn new(
        id: u32,
        options: MpdOptions,
        adaptation_set_counter: IdCounter,
        representation_counter: IdCounter,
    ) -> Self {
        Self {
            id,
            start_time_in_seconds: 0.0,
            options,
            adaptation_set_counter,
            representation_counter,
            adaptation_sets: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn start_time_in_seconds(&self) -> f64 {
        self.start_time_in_seconds
    }

    pub fn set_start_time_in_seconds(&mut self, start_time_in_seconds: f64) {
        self.start_time_in_seconds = start_time_in_seconds;
    }

    /// The adaptation set `media_info` belongs to, created on first use.
    pub fn get_or_create_adaptation_set(&mut self, media_info: &MediaInfo) -> &mut AdaptationSet {
        let index = match self
            .adaptation_sets
            .iter()
            .position(|set| set.accepts(media_info))
        {
            Some(index) => index,
            None => {
                let id = self.adaptation_set_counter.next();
                tracing::debug!(
                    period = self.id,
                    adaptation_set = id,
                    content_type = media_info.content_type(),
                    "AdaptationSet created"
                );
                self.adaptation_sets.push(AdaptationSet::new(
                    id,
                    media_info,
                    self.options.clone(),
                    self.representation_counter.clone(),
                ));
                self.adaptation_sets.len() - 1
            }
        };
        &mut self.adaptation_sets[index]
    }

    pub fn adaptation_sets(&self) -> &[AdaptationSet] {
        &self.adaptation_sets
    }

    pub fn adaptation_sets_mut(&mut self) -> &mut [AdaptationSet] {
        &mut self.adaptation_sets
    }

    /// Earliest presentation time over all content of this period, in seconds.
    pub fn earliest_timestamp(&self) -> Option<f64> {
        self.adaptation_sets
            .iter()
            .filter_map(AdaptationSet::earliest_timestamp)
            .reduce(f64::min)
    }

    /// Build the `<Period>` subtree. Fails if any child fails.
    pub fn to_xml(&self) -> MpdResult<XmlNode> {
        let mut period = XmlNode::new("Period");
        period.set_integer_attribute("id", self.id as u64);
        if self.start_time_in_seconds.is_finite() && self.start_time_in_seconds > 0.0 {
            period.set_string_attribute(
                "start",
                seconds_to_xml_duration(self.start_time_in_seconds),
            );
        }

        for adaptation_set in &self.adaptation_sets {
            period.add_child(adaptation_set.to_xml()?)?;
        }
        Ok(period)
    }
}
