use crate::{
    media_info::MediaInfo, options::MpdOptions, representation::Representation,
    util::IdCounter, xml::XmlNode, MpdError, MpdResult,
};

#[derive(Debug)]
pub struct AdaptationSet {
    id: u32,
    content_type: &'static str,
    mime_type: &'static str,
    language: Option<String>,
    options: MpdOptions,
    representation_counter: IdCounter,
    representations: Vec<Representation>,
}

impl AdaptationSet {
    pub(crate) fn new(
        id: u32,
        media_info: &MediaInfo,
        options: MpdOptions,
        representation_counter: IdCounter,
    ) -> Self {
        Self {
            id,
            content_type: media_info.content_type(),
            mime_type: media_info.mime_type(),
            language: media_info.language.clone(),
            options,
            representation_counter,
            representations: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn content_type(&self) -> &str {
        self.content_type
    }

    pub fn mime_type(&self) -> &str {
        self.mime_type
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub(crate) fn accepts(&self, media_info: &MediaInfo) -> bool {
        self.content_type == media_info.content_type()
            && self.mime_type == media_info.mime_type()
            && self.language == media_info.language
    }

    /// Add a representation. Its id is drawn from the document-wide counter.
    pub fn add_representation(&mut self, media_info: MediaInfo) -> &mut Representation {
        let id = self.representation_counter.next();
        tracing::debug!(adaptation_set = self.id, representation = id, "Representation added");
        self.representations
            .push(Representation::new(id, media_info, self.options.clone()));
        let index = self.representations.len() - 1;
        &mut self.representations[index]
    }

    pub fn representations(&self) -> &[Representation] {
        &self.representations
    }

    pub fn representations_mut(&mut self) -> &mut [Representation] {
        &mut self.representations
    }

    pub fn earliest_timestamp(&self) -> Option<f64> {
        self.representations
            .iter()
            .filter_map(Representation::earliest_timestamp)
            .reduce(f64::min)
    }

    pub fn to_xml(&self) -> MpdResult<XmlNode> {
        if self.representations.is_empty() {
            return Err(MpdError::EmptyAdaptationSet {
                adaptation_set_id: self.id,
            });
        }

        let mut adaptation_set = XmlNode::new("AdaptationSet");
        adaptation_set.set_integer_attribute("id", self.id as u64);
        adaptation_set.set_string_attribute("contentType", self.content_type);
        if let Some(language) = &self.language {
            adaptation_set.set_string_attribute("lang", language.as_str());
        }
        adaptation_set.set_string_attribute("mimeType", self.mime_type);
        adaptation_set.set_string_attribute("segmentAlignment", "true");

        for representation in &self.representations {
            adaptation_set.add_child(representation.to_xml()?)?;
        }
        Ok(adaptation_set)
    }
}
