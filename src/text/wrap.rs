use crate::layout::line_height_for;

/// Caption text broken into lines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WrappedText {
    /// Lines in drawing order. Each keeps the trailing space the greedy pass appends, matching
    /// the width that was measured for it.
    pub lines: Vec<String>,
    /// Vertical advance between line anchors.
    pub line_height: f64,
}

impl WrappedText {
    /// True when there is no line to draw.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of wrapped lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total vertical extent: `lines * line_height`.
    pub fn height(&self) -> f64 {
        (self.lines.len() as f64) * self.line_height
    }
}

/// True when the caption has nothing to draw.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Greedy word wrap.
///
/// Words are split on single spaces. A word moves to a new line when appending it (plus its
/// trailing space) would push the measured width past `max_width` and the current line already
/// holds something. Whitespace-only text yields no lines.
pub fn wrap<M>(text: &str, max_width: f64, font_size_px: u32, mut measure: M) -> WrappedText
where
    M: FnMut(&str) -> f64,
{
    let line_height = line_height_for(font_size_px);
    if is_blank(text) {
        return WrappedText {
            lines: Vec::new(),
            line_height,
        };
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split(' ') {
        let mut candidate = String::with_capacity(line.len() + word.len() + 1);
        candidate.push_str(&line);
        candidate.push_str(word);
        candidate.push(' ');

        if !line.is_empty() && measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line.push(' ');
        } else {
            line = candidate;
        }
    }
    lines.push(line);

    WrappedText { lines, line_height }
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
