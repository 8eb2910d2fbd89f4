//! Atom date constructs: published and updated.
//!
//! Timestamps are stored in UTC and rendered in the RFC 3339 profile the
//! rest of the library keys on: local civil time with the process's UTC
//! offset and hundredths-of-second precision, e.g.
//! `2026-04-28T12:50:43.33+02:00`.

use crate::atom::attribute::{self, Attribute, ElementKind};
use crate::common::{Error, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike, Utc};

/// Shared state behind the published and updated elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DateConstruct {
    value: DateTime<Utc>,
    attributes: Vec<Attribute>,
}

impl DateConstruct {
    pub(crate) fn new(value: DateTime<Utc>, attributes: Vec<Attribute>) -> Result<Self> {
        attribute::verify(&attributes, ElementKind::DateConstruct)?;
        Ok(Self { value, attributes })
    }

    pub(crate) fn from_text(text: &str, attributes: Vec<Attribute>) -> Result<Self> {
        Self::new(parse_date_text(text)?, attributes)
    }

    pub(crate) fn date_time(&self) -> DateTime<Utc> {
        self.value
    }

    pub(crate) fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// The canonical textual form used as an entry map key and on output.
    pub(crate) fn text(&self) -> String {
        format_date(self.value)
    }
}

/// Render a timestamp in the library's canonical RFC 3339 profile.
pub(crate) fn format_date(value: DateTime<Utc>) -> String {
    let local = value.with_timezone(&Local);
    let hundredths = local.nanosecond() / 10_000_000;
    format!(
        "{}.{:02}{}",
        local.format("%Y-%m-%dT%H:%M:%S"),
        hundredths,
        local.format("%:z")
    )
}

/// Parse an RFC 3339 style timestamp.
///
/// Accepts an explicit offset or `Z`, and tolerates naive timestamps with
/// or without a fractional part (interpreted as UTC). Anything else is a
/// specification violation.
pub(crate) fn parse_date_text(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(Error::Spec(format!(
        "invalid date construct value \"{text}\"; expected an RFC 3339 timestamp"
    )))
}

macro_rules! date_construct_element {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            inner: DateConstruct,
        }

        impl $name {
            /// Build the element from a timestamp.
            pub fn new(value: DateTime<Utc>, attributes: Vec<Attribute>) -> Result<Self> {
                Ok(Self {
                    inner: DateConstruct::new(value, attributes)?,
                })
            }

            /// Build the element from its RFC 3339 textual form.
            pub fn from_text(text: &str, attributes: Vec<Attribute>) -> Result<Self> {
                Ok(Self {
                    inner: DateConstruct::from_text(text, attributes)?,
                })
            }

            /// The timestamp for this element.
            pub fn date_time(&self) -> DateTime<Utc> {
                self.inner.date_time()
            }

            /// The canonical textual form, e.g. `2026-04-28T12:50:43.33+02:00`.
            pub fn text(&self) -> String {
                self.inner.text()
            }

            /// The attributes for this element.
            pub fn attributes(&self) -> &[Attribute] {
                self.inner.attributes()
            }

            /// First attribute with a matching name, if any.
            pub fn attribute(&self, name: &str) -> Option<&Attribute> {
                attribute::find(self.inner.attributes(), name)
            }
        }
    };
}

date_construct_element! {
    /// The `atom:published` element, the initial creation or availability
    /// time of an entry.
    Published
}

date_construct_element! {
    /// The `atom:updated` element, the most recent significant modification
    /// time of a feed or entry. Its textual form keys the feed's entry map.
    Updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_offset_and_zulu_and_naive_forms() {
        for text in [
            "2026-04-28T12:50:43.33-05:00",
            "2026-04-28T17:50:43.33Z",
            "2026-04-28T17:50:43.33",
            "2026-04-28T17:50:43",
        ] {
            let dt = parse_date_text(text).unwrap();
            assert_eq!(dt.with_timezone(&Utc).date_naive().to_string(), "2026-04-28");
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date_text("not a date").is_err());
        assert!(parse_date_text("").is_err());
    }

    #[test]
    fn text_carries_hundredths_and_offset() {
        let value = Utc.with_ymd_and_hms(2026, 4, 28, 12, 50, 43).unwrap()
            + chrono::Duration::milliseconds(370);
        let updated = Updated::new(value, Vec::new()).unwrap();
        let text = updated.text();
        assert!(text.contains(".37"), "missing hundredths in {text}");
        // Offset suffix is +HH:MM or -HH:MM.
        let suffix = &text[text.len() - 6..];
        assert!(suffix.starts_with('+') || suffix.starts_with('-'), "{text}");
        assert_eq!(&suffix[3..4], ":");
    }

    #[test]
    fn text_round_trips_through_parse() {
        let value = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::milliseconds(120);
        let updated = Updated::new(value, Vec::new()).unwrap();
        let reparsed = parse_date_text(&updated.text()).unwrap();
        assert_eq!(reparsed, value);
    }

    proptest! {
        #[test]
        fn format_parse_round_trip(secs in 0i64..4_102_444_800, hundredths in 0u32..100) {
            let value = Utc.timestamp_opt(secs, hundredths * 10_000_000).unwrap();
            prop_assert_eq!(parse_date_text(&format_date(value)).unwrap(), value);
        }
    }
}
