//! Markup scanner: adapts `quick-xml` reader events to [`ElementHandler`] hooks.
//!
//! The scanner is the only place that knows about XML syntax. It is strict
//! about structure (end names must match, nothing may be left open) and
//! lenient about content (text is passed through untrimmed, unknown
//! declarations are skipped). Any structural problem aborts the whole scan;
//! partial recovery is left to callers that choose to discard the result.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::Reader;
use thiserror::Error;

use crate::event::{Attribute, ElementHandler};

/// Byte the daemon appends to every RPC reply.
pub const REPLY_TERMINATOR: u8 = 0x03;

/// Structural failure of a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The tokenizer rejected the input.
    #[error("malformed markup near byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// Input ended with elements still open.
    #[error("{depth} element(s) still open at end of input")]
    Unclosed { depth: usize },

    /// A name or CDATA section was not valid UTF-8.
    #[error("markup is not valid UTF-8")]
    NonUtf8(#[from] std::str::Utf8Error),
}

/// Cut the payload at the reply terminator, if one is present.
pub fn strip_terminator(input: &str) -> &str {
    match memchr::memchr(REPLY_TERMINATOR, input.as_bytes()) {
        // 0x03 is ASCII, so this is always a char boundary
        Some(end) => &input[..end],
        None => input,
    }
}

/// Scan `input`, driving `handler` with one hook call per markup event.
///
/// Empty elements are delivered as an open immediately followed by a
/// close. Declarations, comments, processing instructions and doctypes
/// are skipped. Returns an error on the first structural problem; hooks
/// already delivered are not rolled back.
pub fn scan<H>(input: &str, handler: &mut H) -> Result<(), ScanError>
where
    H: ElementHandler + ?Sized,
{
    let mut reader = Reader::from_str(strip_terminator(input));
    {
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.check_end_names = true;
        config.trim_text(false);
    }

    let mut depth = 0usize;
    loop {
        let event = reader.read_event().map_err(|source| ScanError::Xml {
            position: reader.buffer_position() as u64,
            source,
        })?;

        match event {
            XmlEvent::Start(start) => {
                depth += 1;
                let attributes = attributes(&start).map_err(|source| ScanError::Xml {
                    position: reader.buffer_position() as u64,
                    source,
                })?;
                let local = start.local_name();
                handler.on_tag_open(std::str::from_utf8(local.as_ref())?, &attributes);
            }
            XmlEvent::End(end) => {
                depth = depth.saturating_sub(1);
                let local = end.local_name();
                handler.on_tag_close(std::str::from_utf8(local.as_ref())?);
            }
            XmlEvent::Text(text) => {
                let content = text.unescape().map_err(|source| ScanError::Xml {
                    position: reader.buffer_position() as u64,
                    source,
                })?;
                if !content.is_empty() {
                    handler.on_character_data(&content);
                }
            }
            XmlEvent::CData(cdata) => {
                let content = std::str::from_utf8(&cdata)?;
                if !content.is_empty() {
                    handler.on_character_data(content);
                }
            }
            XmlEvent::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err(ScanError::Unclosed { depth });
    }
    Ok(())
}

fn attributes(start: &BytesStart<'_>) -> Result<Vec<Attribute<'static>>, quick_xml::Error> {
    let mut out = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        out.push(Attribute {
            name: Cow::Owned(name),
            value: Cow::Owned(value),
        });
    }
    Ok(out)
}
