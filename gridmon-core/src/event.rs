//! Markup events - the input side of every record parser.
//!
//! This is a SAX-style event model: the scanner emits events as it
//! encounters markup, with no accumulation. Structure is represented
//! by open/close event pairs.
//!
//! ```text
//! <msg><seqno>5</seqno></msg>
//!
//! Open  { name: "msg" }
//! Open  { name: "seqno" }
//! Text  { content: "5" }
//! Close { name: "seqno" }
//! Close { name: "msg" }
//! ```
//!
//! An empty element `<have_credentials/>` is delivered as an Open
//! immediately followed by its Close. Names are local names (any
//! namespace prefix stripped) and keep their original case.

use std::borrow::Cow;

/// An attribute on an opening tag, already unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: Cow<'a, str>,
    pub value: Cow<'a, str>,
}

/// Markup events.
///
/// The lifetime `'a` is scoped to a single handler call: events borrow
/// from the scanner's current position and must not be retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    /// Opening tag with its attributes.
    Open {
        name: &'a str,
        attributes: Vec<Attribute<'a>>,
    },

    /// Character data, entity references and CDATA already decoded.
    ///
    /// One run of text may arrive as several consecutive events.
    Text { content: Cow<'a, str> },

    /// Closing tag.
    Close { name: &'a str },
}

impl<'a> Event<'a> {
    /// Element name for Open/Close events.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Event::Open { name, .. } | Event::Close { name } => Some(name),
            Event::Text { .. } => None,
        }
    }

    /// Check if this event opens an element.
    pub fn is_open(&self) -> bool {
        matches!(self, Event::Open { .. })
    }

    /// Check if this event closes an element.
    pub fn is_close(&self) -> bool {
        matches!(self, Event::Close { .. })
    }
}

/// Receiver of markup events.
///
/// Implemented by the element tracker; the scanner drives it with
/// [`crate::scanner::scan`]. Hooks never fail: a handler absorbs
/// whatever it does not understand.
pub trait ElementHandler {
    /// An element opened.
    fn on_tag_open(&mut self, name: &str, attributes: &[Attribute<'_>]);

    /// Character data arrived.
    fn on_character_data(&mut self, text: &str);

    /// An element closed.
    fn on_tag_close(&mut self, name: &str);

    /// Dispatch one event to the matching hook.
    fn handle(&mut self, event: &Event<'_>) {
        match event {
            Event::Open { name, attributes } => self.on_tag_open(name, attributes),
            Event::Text { content } => self.on_character_data(content),
            Event::Close { name } => self.on_tag_close(name),
        }
    }
}
