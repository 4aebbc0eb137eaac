//! Element tracking: the state machine shared by every record parser.
//!
//! [`ElementTracker`] turns markup events into records of one shape. It
//! owns the character-data accumulator, the "leaf open" flag and the
//! builder of the record in progress; everything specific to a record
//! family lives behind [`RecordShape`].
//!
//! # State machine
//!
//! ```text
//! open(boundary), no record open  -> start record (fresh builder)
//! open(other)                     -> leaf open, clear text
//! text                            -> append while a leaf is open
//! close(other)                    -> shape.assign_field(name, text), leaf closed
//! close(boundary)                 -> shape.finish(builder) -> keep or drop
//! ```
//!
//! Field closes outside any record are ignored, so values can never leak
//! from surrounding markup into the next record.

use std::mem;

use tracing::{trace, warn};

use crate::event::{Attribute, ElementHandler};
use crate::scanner::{scan, ScanError};
use crate::tags;

/// Field-dispatch strategy for one record family.
pub trait RecordShape {
    /// Finalized record.
    type Record;

    /// Record under construction. `Default` is the empty record.
    type Builder: Default;

    /// Boundary tag delimiting one record (matched case-insensitively).
    fn boundary(&self) -> &'static str;

    /// A non-boundary element opened inside a record.
    fn open_field(&self, _builder: &mut Self::Builder, _name: &str) {}

    /// A non-boundary element closed inside a record; `text` is its
    /// accumulated character data. Unknown names must be ignored.
    fn assign_field(&self, builder: &mut Self::Builder, name: &str, text: &str);

    /// The boundary closed. Returning `None` drops the record.
    fn finish(&self, builder: Self::Builder) -> Option<Self::Record>;
}

/// Streaming record builder over markup events.
pub struct ElementTracker<S: RecordShape> {
    shape: S,
    builder: S::Builder,
    text: String,
    leaf_open: bool,
    in_record: bool,
    records: Vec<S::Record>,
}

impl<S: RecordShape> ElementTracker<S> {
    /// Create a tracker with no record open.
    pub fn new(shape: S) -> Self {
        Self {
            shape,
            builder: S::Builder::default(),
            text: String::new(),
            leaf_open: false,
            in_record: false,
            records: Vec::new(),
        }
    }

    /// Whether character data is currently being collected.
    #[inline]
    pub fn is_leaf_open(&self) -> bool {
        self.leaf_open
    }

    /// Whether a boundary element is open.
    #[inline]
    pub fn is_in_record(&self) -> bool {
        self.in_record
    }

    /// Text collected for the current (or last) leaf.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Records emitted so far, in encounter order.
    #[inline]
    pub fn records(&self) -> &[S::Record] {
        &self.records
    }

    /// Consume the tracker, returning the emitted records.
    pub fn into_records(self) -> Vec<S::Record> {
        self.records
    }

    fn finish_record(&mut self) {
        let builder = mem::take(&mut self.builder);
        self.in_record = false;
        match self.shape.finish(builder) {
            Some(record) => self.records.push(record),
            None => trace!(boundary = self.shape.boundary(), "dropping incomplete record"),
        }
    }
}

impl<S: RecordShape> ElementHandler for ElementTracker<S> {
    fn on_tag_open(&mut self, name: &str, _attributes: &[Attribute<'_>]) {
        if !self.in_record && tags::is_tag(name, self.shape.boundary()) {
            self.in_record = true;
            self.builder = S::Builder::default();
            self.leaf_open = false;
            self.text.clear();
            return;
        }

        self.leaf_open = true;
        self.text.clear();
        if self.in_record {
            self.shape.open_field(&mut self.builder, name);
        }
    }

    fn on_character_data(&mut self, text: &str) {
        if self.leaf_open {
            self.text.push_str(text);
        }
    }

    fn on_tag_close(&mut self, name: &str) {
        if tags::is_tag(name, self.shape.boundary()) {
            if self.in_record {
                self.finish_record();
            }
            self.leaf_open = false;
            return;
        }

        if self.in_record {
            self.shape.assign_field(&mut self.builder, name, &self.text);
        } else {
            trace!(element = name, "ignoring field outside any record");
        }
        self.leaf_open = false;
    }
}

/// Parse every record of one shape, failing on broken markup.
pub fn try_parse_records<S: RecordShape>(shape: S, input: &str) -> Result<Vec<S::Record>, ScanError> {
    let mut tracker = ElementTracker::new(shape);
    scan(input, &mut tracker)?;
    Ok(tracker.into_records())
}

/// Parse every record of one shape; broken markup yields no records.
///
/// Records collected before a structural error are discarded, so the
/// result is either complete or empty.
pub fn parse_records<S: RecordShape>(shape: S, input: &str) -> Vec<S::Record> {
    let boundary = shape.boundary();
    match try_parse_records(shape, input) {
        Ok(records) => records,
        Err(err) => {
            warn!(boundary, error = %err, "discarding unparseable rpc reply");
            Vec::new()
        }
    }
}
