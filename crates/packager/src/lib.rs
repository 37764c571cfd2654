//! # MPEG-DASH manifest generation
//!
//! This crate assembles the MPD (Media Presentation Description) of a
//! packaging run from data the other pipeline stages produce.
//!
//! ```text
//! ┌──────────────┐  add_period()   ┌──────────┐  get_or_create_adaptation_set()  ┌───────────────┐
//! │              ├────────────────►│  Period  ├─────────────────────────────────►│ AdaptationSet │
//! │  MpdBuilder  │                 └──────────┘                                  └───────┬───────┘
//! │              │                                                                       │ add_representation()
//! │              │  to_mpd_string()                                              ┌───────▼────────┐
//! │              ├──────────► generate_mpd() ──► XmlDocument ──► serialize ────►│ <MPD> ...      │
//! └──────────────┘                                                               └────────────────┘
//! ```
//!
//! ## Static MPD
//!
//! `mediaPresentationDuration` is the longest representation duration found
//! in the first period of the assembled tree.
//!
//! ## Dynamic MPD
//!
//! `publishTime` is refreshed on every build. `availabilityStartTime` is
//! computed once per [`MpdBuilder`], from the earliest timestamp of the first
//! period, and then stays fixed so segment timing of a running live stream
//! never moves.
//!
//! ```no_run
//! use mpd_packager::{
//!     Container, DashProfile, MediaInfo, MpdBuilder, MpdOptions, MpdType, StreamInfo,
//! };
//!
//! # fn run() -> mpd_packager::MpdResult<()> {
//! let mut builder = MpdBuilder::new(MpdOptions::new(DashProfile::OnDemand, MpdType::Static));
//! builder.add_base_url("https://cdn.example.com/vod/");
//!
//! let mut info = MediaInfo::new(
//!     StreamInfo::Audio { sampling_frequency: 48000, num_channels: 2 },
//!     Container::Mp4,
//! );
//! info.bandwidth = 128_000;
//! info.media_file_name = Some("/out/audio.mp4".to_string());
//! MpdBuilder::make_paths_relative_to_mpd("/out/manifest.mpd", &mut info);
//!
//! builder
//!     .add_period()
//!     .get_or_create_adaptation_set(&info)
//!     .add_representation(info.clone());
//!
//! let mpd = builder.to_mpd_string()?;
//! # Ok(())
//! # }
//! ```

pub mod adaptation_set;
pub mod builder;
pub mod clock;
pub mod error;
pub mod media_info;
pub mod options;
pub mod period;
pub mod representation;
pub mod util;
pub mod version;
pub mod xml;

pub use adaptation_set::AdaptationSet;
pub use builder::MpdBuilder;
pub use clock::{Clock, SystemClock};
pub use error::{MpdError, MpdResult};
pub use media_info::{ByteRange, Container, MediaInfo, StreamInfo};
pub use options::{DashProfile, MpdOptions, MpdParams, MpdType};
pub use period::Period;
pub use representation::{Representation, SegmentInfo};
pub use version::VersionInfo;
