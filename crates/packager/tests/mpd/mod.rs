mod static_mpd;

use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use mpd_packager::{Clock, Container, MediaInfo, StreamInfo};
use quick_xml::{events::Event, Reader};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("mpd_packager=debug")
        .with_test_writer()
        .try_init();
}

/// A clock which only moves when told to.
#[derive(Clone)]
pub struct ManualClock {
    base: DateTime<Utc>,
    offset_seconds: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Self {
            base: Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap(),
            offset_seconds: Arc::new(AtomicI64::new(0)),
        }
    }

    pub fn advance(&self, seconds: i64) {
        self.offset_seconds.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.base + TimeDelta::seconds(self.offset_seconds.load(Ordering::SeqCst))
    }
}

pub fn video_info(bandwidth: u64) -> MediaInfo {
    let mut info = MediaInfo::new(
        StreamInfo::Video {
            width: 1920,
            height: 1080,
            frame_duration: 1001,
            time_scale: 30000,
        },
        Container::Mp4,
    );
    info.bandwidth = bandwidth;
    info.codecs = "avc1.640028".to_string();
    info.reference_time_scale = 90000;
    info
}

pub fn audio_info(language: &str) -> MediaInfo {
    let mut info = MediaInfo::new(
        StreamInfo::Audio {
            sampling_frequency: 48000,
            num_channels: 2,
        },
        Container::Mp4,
    );
    info.bandwidth = 128_000;
    info.codecs = "mp4a.40.2".to_string();
    info.language = Some(language.to_string());
    info.reference_time_scale = 48000;
    info
}

/// An element of a serialized document.
#[derive(Debug)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// All elements of `xml` in document order.
pub fn parse_elements(xml: &str) -> Vec<Element> {
    let mut reader = Reader::from_str(xml);
    let mut elements = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) => {
                let attributes = e
                    .attributes()
                    .map(|attr| {
                        let attr = attr.unwrap();
                        (
                            String::from_utf8_lossy(attr.key.as_ref()).to_string(),
                            attr.unescape_value().unwrap().to_string(),
                        )
                    })
                    .collect();
                elements.push(Element {
                    name: String::from_utf8_lossy(e.name().as_ref()).to_string(),
                    attributes,
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }
    elements
}

pub fn find_element<'a>(elements: &'a [Element], name: &str) -> &'a Element {
    elements
        .iter()
        .find(|element| element.name == name)
        .unwrap_or_else(|| panic!("no <{name}> element"))
}
