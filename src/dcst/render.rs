/*!
 * Canonical XML encoding of a subtitle reel.
 *
 * Output is the fixed declaration header followed by the reel indented with
 * two spaces. Optional elements and attributes without a value are left out
 * so that a minimal reel stays minimal.
 */

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::model::{Font, Subtitle, SubtitleContent, SubtitleReel};
use crate::errors::RenderError;

/// Declaration header every rendered reel starts with
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

type XmlWriter = Writer<Vec<u8>>;

/// Render a reel to its XML text form
pub fn render(reel: &SubtitleReel) -> Result<String, RenderError> {
    let mut writer = Writer::new_with_indent(XML_HEADER.as_bytes().to_vec(), b' ', 2);

    let mut root = BytesStart::new("SubtitleReel");
    if !reel.namespace.is_empty() {
        root.push_attribute(("xmlns", reel.namespace.as_str()));
    }
    emit(&mut writer, Event::Start(root))?;

    text_element(&mut writer, "Id", &reel.id)?;
    if !reel.content_title_text.is_empty() {
        text_element(&mut writer, "ContentTitleText", &reel.content_title_text)?;
    }
    text_element(&mut writer, "IssueDate", &reel.issue_date)?;
    text_element(&mut writer, "ReelNumber", &reel.reel_number.to_string())?;
    text_element(&mut writer, "Language", &reel.language)?;
    text_element(&mut writer, "EditRate", &reel.edit_rate)?;
    text_element(&mut writer, "TimeCodeRate", &reel.time_code_rate)?;
    text_element(&mut writer, "StartTime", &reel.start_time)?;
    text_element(&mut writer, "DisplayType", reel.display_type.as_str())?;

    if let Some(load_font) = &reel.load_font {
        let mut start = BytesStart::new("LoadFont");
        start.push_attribute(("ID", load_font.id.as_str()));
        emit(&mut writer, Event::Start(start))?;
        emit(&mut writer, Event::Text(BytesText::new(&load_font.font)))?;
        emit(&mut writer, Event::End(BytesEnd::new("LoadFont")))?;
    }

    emit(&mut writer, Event::Start(BytesStart::new("SubtitleList")))?;
    for font in &reel.subtitle_list.fonts {
        write_font(&mut writer, font)?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("SubtitleList")))?;

    emit(&mut writer, Event::End(BytesEnd::new("SubtitleReel")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| RenderError(e.to_string()))
}

fn write_font(writer: &mut XmlWriter, font: &Font) -> Result<(), RenderError> {
    let mut start = BytesStart::new("Font");
    for attribute in font.attributes() {
        start.push_attribute(attribute);
    }
    emit(writer, Event::Start(start))?;
    for subtitle in &font.subtitles {
        write_subtitle(writer, subtitle)?;
    }
    emit(writer, Event::End(BytesEnd::new("Font")))
}

fn write_subtitle(writer: &mut XmlWriter, subtitle: &Subtitle) -> Result<(), RenderError> {
    let mut start = BytesStart::new("Subtitle");
    for attribute in subtitle.attributes() {
        start.push_attribute(attribute);
    }
    emit(writer, Event::Start(start))?;

    match &subtitle.content {
        SubtitleContent::Text(runs) => {
            for run in runs {
                let mut text = BytesStart::new("Text");
                for attribute in run.attributes() {
                    text.push_attribute(attribute);
                }
                if run.text.is_empty() {
                    emit(writer, Event::Empty(text))?;
                } else {
                    emit(writer, Event::Start(text))?;
                    emit(writer, Event::Text(BytesText::new(&run.text)))?;
                    emit(writer, Event::End(BytesEnd::new("Text")))?;
                }
            }
        }
        SubtitleContent::Image(images) => {
            for image in images {
                let mut start = BytesStart::new("Image");
                for attribute in image.attributes() {
                    start.push_attribute(attribute);
                }
                emit(writer, Event::Start(start))?;
                emit(writer, Event::Text(BytesText::new(&image.uri)))?;
                emit(writer, Event::End(BytesEnd::new("Image")))?;
            }
        }
    }

    emit(writer, Event::End(BytesEnd::new("Subtitle")))
}

fn text_element(writer: &mut XmlWriter, name: &str, value: &str) -> Result<(), RenderError> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(value)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), RenderError> {
    writer
        .write_event(event)
        .map_err(|e| RenderError(e.to_string()))
}
