//! Section segmentation.
//!
//! Lines are the unit of segmentation. A line matching a heading pattern
//! closes the current section and opens the named one; the heading line
//! itself is not stored. Blank lines are dropped.

use crate::patterns::SECTION_PATTERNS;
use crate::types::{SectionMap, SectionName};

/// Return the section a heading line opens, if any.
#[must_use]
pub fn detect_heading(line: &str) -> Option<SectionName> {
    SECTION_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(line))
        .map(|(name, _)| *name)
}

/// One-pass splitter: a cursor naming the open section and its pending lines.
struct SectionSplitter {
    sections: SectionMap,
    current: SectionName,
    buffer: Vec<String>,
}

impl SectionSplitter {
    fn new() -> Self {
        Self {
            sections: SectionMap::new(),
            current: SectionName::Introduccion,
            buffer: Vec::new(),
        }
    }

    /// Store pending lines under the current name, replacing any earlier body.
    ///
    /// Nothing is stored when no lines are pending.
    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            let body = std::mem::take(&mut self.buffer);
            self.sections.insert(self.current, body);
        }
    }

    fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        match detect_heading(line) {
            Some(name) => {
                self.flush();
                self.current = name;
            }
            None => self.buffer.push(line.to_string()),
        }
    }

    fn finish(mut self) -> SectionMap {
        self.flush();
        self.sections
    }
}

/// Split document text into named sections.
///
/// Text before the first heading goes to `introduccion`. When a section
/// name recurs, the later body replaces the earlier one.
///
/// # Examples
/// ```
/// use legal_extractor::sections::split_sections;
/// use legal_extractor::types::SectionName;
///
/// let sections = split_sections("Preámbulo\n\nVigencia\nRige desde su publicación.");
/// assert_eq!(sections.len(), 2);
/// assert_eq!(
///     sections.get(SectionName::Vigencia).unwrap(),
///     &["Rige desde su publicación.".to_string()]
/// );
/// ```
#[must_use]
pub fn split_sections(text: &str) -> SectionMap {
    let mut splitter = SectionSplitter::new();
    for line in text.split('\n') {
        splitter.push_line(line);
    }
    splitter.finish()
}
