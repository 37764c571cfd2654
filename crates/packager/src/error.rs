use thiserror::Error;

#[derive(Error, Debug)]
pub enum MpdError {
    #[error("Invalid XML element name: {0:?}")]
    InvalidElementName(String),

    #[error("Representation {representation_id} has no bandwidth")]
    MissingBandwidth { representation_id: u32 },

    #[error("AdaptationSet {adaptation_set_id} has no representation")]
    EmptyAdaptationSet { adaptation_set_id: u32 },

    #[error("Invalid MPD options: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    XmlWriteError(#[from] quick_xml::Error),

    #[error(transparent)]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

pub type MpdResult<T> = Result<T, MpdError>;
