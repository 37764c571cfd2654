use mpd_packager::{DashProfile, MpdBuilder, MpdOptions, MpdType, VersionInfo};

use super::{audio_info, find_element, init_tracing, parse_elements, video_info};
use crate::AssertWrapper;

fn static_builder() -> MpdBuilder {
    init_tracing();
    MpdBuilder::new(MpdOptions::new(DashProfile::OnDemand, MpdType::Static))
}

#[test]
fn test_min_buffer_time() {
    for (value, expected) in [
        (0.5, "PT0.5S"),
        (2.0, "PT2S"),
        (7.9, "PT7.9S"),
        (10.25, "PT10.25S"),
    ] {
        let mut options = MpdOptions::new(DashProfile::OnDemand, MpdType::Static);
        options.mpd_params.min_buffer_time = value;
        let mut builder = MpdBuilder::new(options);

        let document = builder.generate_mpd().assert_success();
        assert_eq!(document.root().attribute("minBufferTime"), Some(expected));
    }

    for value in [0.0, -1.0] {
        let mut options = MpdOptions::new(DashProfile::OnDemand, MpdType::Static);
        options.mpd_params.min_buffer_time = value;
        let mut builder = MpdBuilder::new(options);

        // Still produced, just without the attribute.
        let document = builder.generate_mpd().assert_success();
        assert_eq!(document.root().attribute("minBufferTime"), None);
    }
}

#[test]
fn test_empty_static_mpd() {
    let mut builder = static_builder();
    let document = builder.generate_mpd().assert_success();

    assert_eq!(document.root().attribute("type"), Some("static"));
    assert_eq!(
        document.root().attribute("mediaPresentationDuration"),
        Some("PT0S")
    );
}

#[test]
fn test_media_presentation_duration_is_maximum() {
    let mut builder = static_builder();
    let period = builder.add_period();

    let mut video = video_info(1_000_000);
    video.media_duration_seconds = Some(3.2);
    let set = period.get_or_create_adaptation_set(&video);
    set.add_representation(video.clone());
    let mut video = video_info(3_000_000);
    video.media_duration_seconds = Some(7.9);
    set.add_representation(video);

    let mut audio = audio_info("en");
    audio.media_duration_seconds = Some(1.0);
    period
        .get_or_create_adaptation_set(&audio)
        .add_representation(audio.clone());

    let mut late = video_info(1_000_000);
    late.media_duration_seconds = Some(4.0);
    builder
        .add_period()
        .get_or_create_adaptation_set(&late)
        .add_representation(late.clone());

    let output = builder.to_mpd_string().assert_success();
    let elements = parse_elements(&output);

    assert_eq!(
        find_element(&elements, "MPD").attribute("mediaPresentationDuration"),
        Some("PT7.9S")
    );
    let representations: Vec<_> = elements
        .iter()
        .filter(|element| element.name == "Representation")
        .collect();
    assert_eq!(representations.len(), 4);
    for representation in representations {
        assert_eq!(representation.attribute("duration"), None);
    }
}

#[test]
fn test_duration_from_segments() {
    let mut builder = static_builder();
    let info = video_info(1_000_000);
    let representation = builder
        .add_period()
        .get_or_create_adaptation_set(&info)
        .add_representation(info.clone());
    representation.add_new_segment(0, 180000);
    representation.add_new_segment(180000, 180000);
    representation.add_new_segment(360000, 45000);

    let document = builder.generate_mpd().assert_success();
    assert_eq!(
        document.root().attribute("mediaPresentationDuration"),
        Some("PT4.5S")
    );
}

#[test]
fn test_namespaces_and_profile() {
    let mut builder = static_builder();
    let document = builder.generate_mpd().assert_success();
    let root = document.root();

    assert_eq!(root.attribute("xmlns"), Some("urn:mpeg:dash:schema:mpd:2011"));
    assert_eq!(
        root.attribute("xmlns:xsi"),
        Some("http://www.w3.org/2001/XMLSchema-instance")
    );
    assert_eq!(root.attribute("xmlns:xlink"), Some("http://www.w3.org/1999/xlink"));
    assert_eq!(
        root.attribute("xsi:schemaLocation"),
        Some("urn:mpeg:dash:schema:mpd:2011 DASH-MPD.xsd")
    );
    assert_eq!(root.attribute("xmlns:cenc"), Some("urn:mpeg:cenc:2013"));
    assert_eq!(
        root.attribute("profiles"),
        Some("urn:mpeg:dash:profile:isoff-on-demand:2011")
    );

    let mut live = MpdBuilder::new(MpdOptions::new(DashProfile::Live, MpdType::Static));
    let document = live.generate_mpd().assert_success();
    assert_eq!(
        document.root().attribute("profiles"),
        Some("urn:mpeg:dash:profile:isoff-live:2011")
    );
}

#[test]
fn test_base_urls_in_order() {
    let mut builder = static_builder();
    builder.add_base_url("https://cdn1.example.com/");
    builder.add_base_url("https://cdn2.example.com/");
    let info = video_info(1_000_000);
    builder
        .add_period()
        .get_or_create_adaptation_set(&info)
        .add_representation(info.clone());

    let document = builder.generate_mpd().assert_success();
    let children: Vec<_> = document.root().element_children().collect();

    assert_eq!(children.len(), 3);
    assert_eq!(children[0].name(), "BaseURL");
    assert_eq!(children[0].content().as_deref(), Some("https://cdn1.example.com/"));
    assert_eq!(children[1].content().as_deref(), Some("https://cdn2.example.com/"));
    assert_eq!(children[2].name(), "Period");
}

#[test]
fn test_generated_by_comment() {
    let mut builder = static_builder();
    builder.set_version_info(VersionInfo::new("https://example.com/packager", "2.0.1"));
    let output = builder.to_mpd_string().assert_success();

    let mut lines = output.lines();
    assert_eq!(lines.next(), Some(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert_eq!(
        lines.next(),
        Some("<!--Generated with https://example.com/packager version 2.0.1-->")
    );
    assert!(lines.next().unwrap().starts_with("<MPD "));

    builder.set_version_info(VersionInfo::none());
    let document = builder.generate_mpd().assert_success();
    assert_eq!(document.comment(), None);
    let output = builder.to_mpd_string().assert_success();
    assert!(!output.contains("<!--"));
}

#[test]
fn test_on_demand_output() {
    let mut builder = static_builder();
    builder.set_version_info(VersionInfo::none());
    let mut info = audio_info("en");
    info.bandwidth = 96000;
    info.media_file_name = Some("audio.mp4".to_string());
    info.media_duration_seconds = Some(12.0);
    builder
        .add_period()
        .get_or_create_adaptation_set(&info)
        .add_representation(info.clone());

    let output = builder.to_mpd_string().assert_success();
    assert_eq!(
        output,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xlink="http://www.w3.org/1999/xlink" xsi:schemaLocation="urn:mpeg:dash:schema:mpd:2011 DASH-MPD.xsd" xmlns:cenc="urn:mpeg:cenc:2013" profiles="urn:mpeg:dash:profile:isoff-on-demand:2011" minBufferTime="PT2S" type="static" mediaPresentationDuration="PT12S">
  <Period id="0">
    <AdaptationSet id="0" contentType="audio" lang="en" mimeType="audio/mp4" segmentAlignment="true">
      <Representation id="0" bandwidth="96000" codecs="mp4a.40.2" audioSamplingRate="48000">
        <AudioChannelConfiguration schemeIdUri="urn:mpeg:dash:23003:3:audio_channel_configuration:2011" value="2"/>
        <BaseURL>audio.mp4</BaseURL>
      </Representation>
    </AdaptationSet>
  </Period>
</MPD>
"#
    );
}

#[test]
fn test_broken_period_aborts_build() {
    let mut builder = static_builder();
    let info = video_info(0);
    builder
        .add_period()
        .get_or_create_adaptation_set(&info)
        .add_representation(info.clone());

    builder.generate_mpd().assert_error();
    builder.to_mpd_string().assert_error();

    // Nothing was lost for a later retry.
    assert_eq!(builder.periods().len(), 1);
}

#[test]
fn test_builder_from_json_options() -> anyhow::Result<()> {
    let options = MpdOptions::from_json(
        r#"{
            "dash_profile": "live",
            "mpd_type": "static",
            "mpd_params": { "min_buffer_time": 1.5 }
        }"#,
    )?;
    let mut builder = MpdBuilder::new(options);
    let document = builder.generate_mpd()?;

    assert_eq!(
        document.root().attribute("profiles"),
        Some("urn:mpeg:dash:profile:isoff-live:2011")
    );
    assert_eq!(document.root().attribute("minBufferTime"), Some("PT1.5S"));
    assert_eq!(document.root().attribute("type"), Some("static"));
    Ok(())
}
