//! Indentation frames
//!
//! One frame per nested indentation or quoting level. Fragments accumulate
//! unprefixed while the level is open; closing the frame renders them with
//! `first_prefix` on the first line and `prefix` on every later non-blank
//! line, blank lines staying bare so no line ends in trailing prefix
//! whitespace. Frames nest through an explicit LIFO stack owned by the
//! render state.

/// Accumulation buffer for one indentation level.
#[derive(Debug)]
pub struct IndentFrame {
    prefix: String,
    first_prefix: String,
    content: Vec<String>,
}

impl IndentFrame {
    /// Frame whose first line carries the same prefix as the rest.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let first_prefix = prefix.clone();
        IndentFrame {
            prefix,
            first_prefix,
            content: Vec::new(),
        }
    }

    /// Frame with a distinct first-line prefix, as used by list items where
    /// the marker leads and continuation lines align under the text.
    pub fn with_first_prefix(prefix: impl Into<String>, first_prefix: impl Into<String>) -> Self {
        IndentFrame {
            prefix: prefix.into(),
            first_prefix: first_prefix.into(),
            content: Vec::new(),
        }
    }

    /// Add a raw fragment to the pending content.
    pub fn append(&mut self, text: impl Into<String>) {
        self.content.push(text.into());
    }

    pub fn content_mut(&mut self) -> &mut Vec<String> {
        &mut self.content
    }

    pub fn last_fragment(&self) -> Option<&str> {
        self.content.last().map(String::as_str)
    }

    /// Render the pending content with prefixes applied and push it, as one
    /// string, onto `base`. Zero accumulated lines append nothing.
    pub fn finish_into(self, base: &mut Vec<String>) {
        render_prefixed(&self.content, &self.first_prefix, &self.prefix, base);
    }

    /// Render and clear the pending content, keeping the frame open. Once a
    /// first line has been rendered the first-line prefix is spent; content
    /// added afterwards continues with the ordinary prefix.
    pub fn flush_into(&mut self, base: &mut Vec<String>) {
        let content = std::mem::take(&mut self.content);
        if render_prefixed(&content, &self.first_prefix, &self.prefix, base) {
            self.first_prefix = self.prefix.clone();
        }
    }
}

/// Prefix every line of `content` (first line with `first_prefix`, blank
/// lines bare) and push the result, as one string, onto `base`. Returns
/// whether anything was rendered.
fn render_prefixed(
    content: &[String],
    first_prefix: &str,
    prefix: &str,
    base: &mut Vec<String>,
) -> bool {
    let joined: String = content.concat();
    let mut lines = joined.split_inclusive('\n');
    let first = match lines.next() {
        Some(first) => first,
        None => return false,
    };
    let mut out = String::with_capacity(joined.len() + prefix.len() * 4);
    out.push_str(first_prefix);
    out.push_str(first);
    for line in lines {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(prefix);
            out.push_str(line);
        }
    }
    base.push(out);
    true
}
