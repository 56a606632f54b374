/*!
 * Tests for reel synthesis and XML rendering
 */

use anyhow::Result;
use emptydcst::dcst::model::SubtitleContent;
use emptydcst::dcst::{
    parse_template, render, DisplayType, DCST_2007_NAMESPACE, DCST_2010_NAMESPACE,
    DCST_2014_NAMESPACE, FONT_ID, XML_HEADER,
};
use emptydcst::synthesis::{Profile, SynthesisRequest, Synthesizer};
use crate::common;

fn request(profile: Profile) -> SynthesisRequest {
    SynthesisRequest {
        profile,
        display_index: 0,
        reel_number: 1,
        frame_rate: "24".to_string(),
        language: "en".to_string(),
        title: "No Title".to_string(),
        namespace: DCST_2014_NAMESPACE.to_string(),
        template: None,
    }
}

#[test]
fn test_synthesize_withDefaults_shouldFillGlobalProperties() -> Result<()> {
    let context = common::fixed_context();
    let synthesized = Synthesizer::new(&context).synthesize(&request(Profile::Text))?;
    let reel = &synthesized.reel;

    assert_eq!(reel.id, format!("urn:uuid:{}", context.document_id));
    assert_eq!(reel.issue_date, "2026-10-16T09:30:15-00:00");
    assert_eq!(reel.edit_rate, "24 1");
    assert_eq!(reel.time_code_rate, "24");
    assert_eq!(reel.start_time, "00:00:00:00");
    assert_eq!(reel.content_title_text, "No Title");
    assert_eq!(reel.language, "en");
    assert_eq!(synthesized.filename, format!("{}_r1.xml", context.document_id));
    Ok(())
}

#[test]
fn test_synthesize_withAnyRate_shouldStampFixedEventTimes() -> Result<()> {
    let context = common::fixed_context();
    for rate in ["23.976", "24", "25", "30", "48"] {
        let mut req = request(Profile::Text);
        req.frame_rate = rate.to_string();
        let synthesized = Synthesizer::new(&context).synthesize(&req)?;

        let events: Vec<_> = synthesized.reel.subtitles().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time_in, "00:00:04:00", "rate {}", rate);
        assert_eq!(events[0].time_out, "00:00:19:00", "rate {}", rate);
    }
    Ok(())
}

#[test]
fn test_synthesize_withTextProfile_shouldAttachOneLoadFontAndEmptyRun() -> Result<()> {
    let context = common::fixed_context();
    let synthesized = Synthesizer::new(&context).synthesize(&request(Profile::Text))?;

    let load_font = synthesized.reel.load_font.as_ref().expect("text reel has a LoadFont");
    assert_eq!(load_font.id, "Arial");
    assert_eq!(load_font.font, FONT_ID);
    assert!(synthesized.placeholder_image.is_none());

    let rendered = render(&synthesized.reel)?;
    assert_eq!(rendered.matches("<LoadFont").count(), 1);
    assert!(rendered.contains(&format!(r#"<LoadFont ID="Arial">{}</LoadFont>"#, FONT_ID)));
    assert!(rendered.contains("<Text/>"));

    match &synthesized.reel.subtitles().next().map(|s| &s.content) {
        Some(SubtitleContent::Text(runs)) => {
            assert_eq!(runs.len(), 1);
            assert!(runs[0].text.is_empty());
        }
        other => panic!("expected a text event, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_synthesize_withImageProfile_shouldNeverAttachLoadFont() -> Result<()> {
    let context = common::fixed_context();
    let synthesized = Synthesizer::new(&context).synthesize(&request(Profile::Image))?;

    assert!(synthesized.reel.load_font.is_none());
    let image_id = synthesized.placeholder_image.expect("image reel requests a placeholder");

    let rendered = render(&synthesized.reel)?;
    assert!(!rendered.contains("LoadFont"));
    assert!(rendered.contains(&format!("<Image>urn:uuid:{}</Image>", image_id)));
    assert!(!rendered.contains("<Text"));
    Ok(())
}

#[test]
fn test_profileResolve_withBothRequested_shouldPickImage() -> Result<()> {
    let context = common::fixed_context();
    let synthesized = Synthesizer::new(&context).synthesize(&request(Profile::resolve(true, true)))?;
    assert_eq!(synthesized.profile, Profile::Image);
    assert!(synthesized.reel.load_font.is_none());
    Ok(())
}

#[test]
fn test_synthesize_withDisplayIndexes_shouldCollapseNonZeroToClosedCaption() -> Result<()> {
    let context = common::fixed_context();
    for (index, expected) in [
        (0, DisplayType::MainSubtitle),
        (1, DisplayType::ClosedCaption),
        (99, DisplayType::ClosedCaption),
    ] {
        let mut req = request(Profile::Text);
        req.display_index = index;
        let synthesized = Synthesizer::new(&context).synthesize(&req)?;
        assert_eq!(synthesized.reel.display_type, expected, "index {}", index);
    }
    Ok(())
}

#[test]
fn test_synthesize_withInvalidFrameRate_shouldFail() {
    let context = common::fixed_context();
    let mut req = request(Profile::Text);
    req.frame_rate = "-1".to_string();
    assert!(Synthesizer::new(&context).synthesize(&req).is_err());
}

#[test]
fn test_synthesize_with2014Template_shouldTakeTemplateProperties() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let template = common::create_template(temp_dir.path(), "feature.xml", DCST_2014_NAMESPACE, "Feature", "fr", "25 1", "ClosedCaption")?;
    let context = common::fixed_context();
    let mut req = request(Profile::Text);
    req.template = Some(template);

    let synthesized = Synthesizer::new(&context).synthesize(&req)?;
    let reel = &synthesized.reel;

    assert_eq!(reel.content_title_text, "Feature");
    assert_eq!(reel.language, "fr");
    assert_eq!(reel.frame_rate_prefix(), "25");
    assert_eq!(reel.time_code_rate, "25");
    assert_eq!(reel.display_type, DisplayType::ClosedCaption);
    assert_eq!(synthesized.frame_rate, "25");
    // Reel number and identifiers stay the caller's
    assert_eq!(reel.reel_number, 1);
    assert_eq!(reel.id, context.document_urn());
    Ok(())
}

#[test]
fn test_synthesize_with2007Template_shouldFallBackToDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let template = common::create_template(temp_dir.path(), "legacy.xml", DCST_2007_NAMESPACE, "Feature", "fr", "25 1", "ClosedCaption")?;
    let context = common::fixed_context();
    let mut req = request(Profile::Text);
    req.template = Some(template);

    let synthesized = Synthesizer::new(&context).synthesize(&req)?;
    assert_eq!(synthesized.reel.content_title_text, "No Title");
    assert_eq!(synthesized.reel.language, "en");
    assert_eq!(synthesized.reel.namespace, DCST_2014_NAMESPACE);
    assert_eq!(synthesized.reel.display_type, DisplayType::MainSubtitle);
    Ok(())
}

#[test]
fn test_synthesize_withMissingTemplate_shouldFallBackToDefaults() -> Result<()> {
    let context = common::fixed_context();
    let mut req = request(Profile::Image);
    req.template = Some("/nonexistent/template.xml".into());

    let synthesized = Synthesizer::new(&context).synthesize(&req)?;
    assert_eq!(synthesized.reel.content_title_text, "No Title");
    Ok(())
}

#[test]
fn test_render_withEmptyTitle_shouldOmitContentTitleText() -> Result<()> {
    let context = common::fixed_context();
    let mut req = request(Profile::Text);
    req.title = String::new();

    let rendered = render(&Synthesizer::new(&context).synthesize(&req)?.reel)?;
    assert!(rendered.starts_with(XML_HEADER));
    assert!(!rendered.contains("ContentTitleText"));
    assert!(!rendered.contains("FadeUpTime"));
    assert!(!rendered.contains("SpotNumber"));
    Ok(())
}

#[test]
fn test_render_withTextReel_shouldKeepElementOrder() -> Result<()> {
    let context = common::fixed_context();
    let rendered = render(&Synthesizer::new(&context).synthesize(&request(Profile::Text))?.reel)?;

    let order = [
        "<SubtitleReel xmlns=",
        "<Id>",
        "<ContentTitleText>",
        "<IssueDate>",
        "<ReelNumber>",
        "<Language>",
        "<EditRate>",
        "<TimeCodeRate>",
        "<StartTime>",
        "<DisplayType>",
        "<LoadFont",
        "<SubtitleList>",
        "<Font>",
        r#"<Subtitle TimeIn="00:00:04:00" TimeOut="00:00:19:00">"#,
        "</SubtitleReel>",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| rendered.find(needle).unwrap_or_else(|| panic!("missing {}", needle)))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{}", rendered);
    Ok(())
}

#[test]
fn test_render_thenParseTemplate_shouldRoundTripGlobalProperties() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let context = common::fixed_context();

    for (namespace, display_index, profile) in [
        (DCST_2014_NAMESPACE, 0, Profile::Text),
        (DCST_2010_NAMESPACE, 1, Profile::Image),
        (DCST_2014_NAMESPACE, 7, Profile::Image),
    ] {
        let mut req = request(profile);
        req.namespace = namespace.to_string();
        req.display_index = display_index;
        req.title = "Round Trip".to_string();
        req.language = "fr-CA".to_string();
        req.frame_rate = "25".to_string();
        let synthesized = Synthesizer::new(&context).synthesize(&req)?;

        let path = common::create_test_file(temp_dir.path(), &synthesized.filename, &render(&synthesized.reel)?)?;
        let parsed = parse_template(&path)?;

        assert_eq!(parsed.namespace, namespace);
        assert_eq!(parsed.display_type, DisplayType::from_index(display_index));
        assert_eq!(parsed.content_title_text, "Round Trip");
        assert_eq!(parsed.language, "fr-CA");
        assert_eq!(parsed.frame_rate_prefix(), "25");
        assert_eq!(parsed.id, context.document_urn());
    }
    Ok(())
}
