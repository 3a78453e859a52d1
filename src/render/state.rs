//! Mutable state of one translation run
//!
//! The render state owns the three named output streams (head, body, foot),
//! the LIFO stack of `IndentFrame`s, the list-marker stack, the section
//! nesting level, captured document metadata and the warn-once bookkeeping
//! for unsupported node kinds. Text always goes to the innermost open frame
//! when one exists, otherwise to the named stream.

use std::collections::BTreeSet;

use crate::tree::NodeKind;

use super::frame::IndentFrame;

// ============================================================================
// Warn-once sink
// ============================================================================

/// Deduplicating sink for unsupported-kind warnings.
///
/// Owned by the caller when warning suppression should span several
/// conversions; a fresh sink per run gives independent warning behavior.
#[derive(Debug, Default, Clone)]
pub struct WarnSink {
    seen: BTreeSet<String>,
    messages: Vec<String>,
}

impl WarnSink {
    pub fn new() -> Self {
        WarnSink::default()
    }

    /// Sink that already considers `kinds` warned about.
    pub fn with_seen(kinds: BTreeSet<String>) -> Self {
        WarnSink {
            seen: kinds,
            messages: Vec::new(),
        }
    }

    /// Record an unsupported kind; at most one message per kind.
    pub fn warn_unsupported(&mut self, kind: &NodeKind) {
        if self.seen.insert(kind.as_str().to_string()) {
            let message = format!("the \"{}\" element is not supported", kind);
            tracing::warn!(kind = kind.as_str(), "unsupported element skipped");
            self.messages.push(message);
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Kinds warned about so far (including any preseeded ones).
    pub fn seen(&self) -> &BTreeSet<String> {
        &self.seen
    }

    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

// ============================================================================
// Document metadata
// ============================================================================

/// Title metadata captured out of the stream flow during a walk.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DocInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

// ============================================================================
// Render state
// ============================================================================

/// Named output stream of the markdown translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Head,
    Body,
    Foot,
}

#[derive(Debug, Default)]
pub struct RenderState {
    head: Vec<String>,
    body: Vec<String>,
    foot: Vec<String>,
    frames: Vec<IndentFrame>,
    list_markers: Vec<String>,
    section_level: usize,
    ancestors: Vec<NodeKind>,
    pub docinfo: DocInfo,
    pub warn: WarnSink,
}

impl RenderState {
    pub fn new() -> Self {
        RenderState::default()
    }

    pub fn with_warn_sink(warn: WarnSink) -> Self {
        RenderState {
            warn,
            ..RenderState::default()
        }
    }

    // ------------------------------------------------------------------
    // Output plumbing
    // ------------------------------------------------------------------

    /// Append `text` to the current output: the innermost open frame, or the
    /// body stream.
    pub fn add(&mut self, text: impl Into<String>) {
        self.add_to(Stream::Body, text);
    }

    /// Append `text` to the innermost open frame, or to `stream` when no
    /// frame is open.
    pub fn add_to(&mut self, stream: Stream, text: impl Into<String>) {
        match self.frames.last_mut() {
            Some(frame) => frame.append(text),
            None => self.stream_mut(stream).push(text.into()),
        }
    }

    /// Append `text` to `stream` regardless of open frames.
    pub fn add_to_stream(&mut self, stream: Stream, text: impl Into<String>) {
        self.stream_mut(stream).push(text.into());
    }

    /// Terminate the current output with a newline if its last fragment is
    /// non-empty and unterminated.
    pub fn ensure_eol(&mut self) {
        let last = match self.frames.last() {
            Some(frame) => frame.last_fragment(),
            None => self.body.last().map(String::as_str),
        };
        let needs_eol = matches!(last, Some(text) if !text.is_empty() && !text.ends_with('\n'));
        if needs_eol {
            self.add("\n");
        }
    }

    fn stream_mut(&mut self, stream: Stream) -> &mut Vec<String> {
        match stream {
            Stream::Head => &mut self.head,
            Stream::Body => &mut self.body,
            Stream::Foot => &mut self.foot,
        }
    }

    // ------------------------------------------------------------------
    // Indent frames
    // ------------------------------------------------------------------

    /// Open an indentation level with the same prefix on every line.
    pub fn start_level(&mut self, prefix: &str) {
        self.frames.push(IndentFrame::new(prefix));
    }

    /// Open an indentation level with a distinct first-line prefix.
    pub fn start_level_with_first(&mut self, prefix: &str, first_prefix: &str) {
        self.frames
            .push(IndentFrame::with_first_prefix(prefix, first_prefix));
    }

    /// Close the innermost level and write its rendered content to the next
    /// outer frame, or to the body stream.
    pub fn finish_level(&mut self) {
        let frame = self.frames.pop().expect("indent frame stack underflow");
        match self.frames.last_mut() {
            Some(outer) => frame.finish_into(outer.content_mut()),
            None => frame.finish_into(&mut self.body),
        }
    }

    pub fn open_frames(&self) -> usize {
        self.frames.len()
    }

    /// Render every open frame's pending content outward into the body
    /// stream, keeping the frames open for the text that follows. A frame
    /// whose first line has been rendered continues with its ordinary
    /// prefix.
    pub fn flush_frames(&mut self) {
        for i in (1..self.frames.len()).rev() {
            let (outer, inner) = self.frames.split_at_mut(i);
            inner[0].flush_into(outer[i - 1].content_mut());
        }
        if let Some(frame) = self.frames.first_mut() {
            frame.flush_into(&mut self.body);
        }
    }

    // ------------------------------------------------------------------
    // List markers and sections
    // ------------------------------------------------------------------

    pub fn push_marker(&mut self, marker: &str) {
        self.list_markers.push(marker.to_string());
    }

    pub fn pop_marker(&mut self) {
        self.list_markers.pop();
    }

    pub fn current_marker(&self) -> Option<&str> {
        self.list_markers.last().map(String::as_str)
    }

    pub fn enter_section(&mut self) {
        self.section_level += 1;
    }

    pub fn leave_section(&mut self) {
        self.section_level = self.section_level.saturating_sub(1);
    }

    pub fn section_level(&self) -> usize {
        self.section_level
    }

    // ------------------------------------------------------------------
    // Ancestor tracking
    // ------------------------------------------------------------------

    pub fn push_kind(&mut self, kind: NodeKind) {
        self.ancestors.push(kind);
    }

    pub fn pop_kind(&mut self) {
        self.ancestors.pop();
    }

    /// Kind of the element enclosing the current one.
    pub fn parent_kind(&self) -> Option<&NodeKind> {
        let len = self.ancestors.len();
        if len < 2 {
            None
        } else {
            self.ancestors.get(len - 2)
        }
    }

    /// Whether any proper ancestor of the current element has `kind`.
    pub fn inside(&self, kind: &NodeKind) -> bool {
        let len = self.ancestors.len();
        len > 1 && self.ancestors[..len - 1].contains(kind)
    }

    // ------------------------------------------------------------------
    // Final text assembly
    // ------------------------------------------------------------------

    /// Concatenate head, body and foot, dropping one trailing bare newline
    /// fragment per stream, then clear the streams. Open frames keep their
    /// pending content for the text that follows.
    pub fn take_text(&mut self) -> String {
        let mut text = String::new();
        for stream in [Stream::Head, Stream::Body, Stream::Foot] {
            let fragments = self.stream_mut(stream);
            if fragments.last().map(String::as_str) == Some("\n") {
                fragments.pop();
            }
            for fragment in fragments.drain(..) {
                text.push_str(&fragment);
            }
        }
        text
    }
}
