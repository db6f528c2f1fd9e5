//! Reusable field extraction rules shared by the document extractors.

use regex::Regex;

use super::patterns::BULLET_LINE;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Extract all occurrences of the field, in source order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A `Label: value` field; the value is the trimmed rest of the line.
pub struct LabeledField {
    pattern: &'static Regex,
}

impl LabeledField {
    pub fn new(pattern: &'static Regex) -> Self {
        Self { pattern }
    }
}

impl FieldExtractor for LabeledField {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<String> {
        self.pattern
            .captures_iter(text)
            .map(|caps| caps[1].trim().to_string())
            .collect()
    }
}

/// `- text` bullet lines.
pub struct BulletPoints;

impl FieldExtractor for BulletPoints {
    type Output = String;

    fn extract_all(&self, text: &str) -> Vec<String> {
        BULLET_LINE
            .captures_iter(text)
            .map(|caps| caps[1].trim().to_string())
            .collect()
    }
}

/// `- key: value` bullet lines, yielding trimmed `(key, value)` pairs.
pub struct BulletPairs {
    pattern: &'static Regex,
}

impl BulletPairs {
    pub fn new(pattern: &'static Regex) -> Self {
        Self { pattern }
    }
}

impl FieldExtractor for BulletPairs {
    type Output = (String, String);

    fn extract_all(&self, text: &str) -> Vec<(String, String)> {
        self.pattern
            .captures_iter(text)
            .map(|caps| (caps[1].trim().to_string(), caps[2].trim().to_string()))
            .collect()
    }
}

/// Text following the first occurrence of `marker`, or `None` if absent.
pub fn section_after<'t>(text: &'t str, marker: &str) -> Option<&'t str> {
    text.find(marker).map(|pos| &text[pos + marker.len()..])
}

/// Text preceding the first occurrence of `marker`, or all of it if absent.
pub fn section_before<'t>(text: &'t str, marker: &str) -> &'t str {
    match text.find(marker) {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// Bullet lines of the section opened by `marker`; empty if the marker is absent.
pub fn bullets_after(text: &str, marker: &str) -> Vec<String> {
    section_after(text, marker)
        .map(|section| BulletPoints.extract_all(section))
        .unwrap_or_default()
}
