//! ISO-partial registry dates.
//!
//! Registry date text is free-form ("2020-05-01", "2020-05", "2020",
//! sometimes with trailing annotations). A [`PartialDate`] keeps exactly the
//! precision the source provided: year, year-month, or year-month-day.
//! Parsing extracts a leading digit-group pattern and performs no calendar
//! validation; the registry is treated as the source of truth. Anything that
//! does not start with a four-digit year is unknown, never a fabricated date.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};

/// A date truncated to the precision present in the source.
///
/// Renders as `YYYY`, `YYYY-MM`, or `YYYY-MM-DD`. The rendered form is what
/// the index sort compares lexically, and component order matches lexical
/// order because every component is fixed-width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PartialDate {
    year: u16,
    month: Option<u8>,
    day: Option<u8>,
}

impl PartialDate {
    /// Parse the leading `YYYY[-MM[-DD]]` digit groups from free-form text.
    ///
    /// A day is only recognized after a month. Trailing text is ignored, so
    /// `"2020-05-01 (actual)"` parses as 2020-05-01 and `"20205"` as 2020.
    pub fn parse(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        let year = fixed_digits(bytes, 0, 4)?;
        let month = dash_component(bytes, 4);
        let day = match month {
            Some(_) => dash_component(bytes, 7),
            None => None,
        };
        Some(Self {
            year: year as u16,
            month: month.map(|m| m as u8),
            day: day.map(|d| d as u8),
        })
    }

    /// Parse an optional field, treating absent input as unknown.
    pub fn parse_opt(text: Option<&str>) -> Option<Self> {
        text.and_then(Self::parse)
    }

    /// The year component.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// The month component, when the source carried one.
    pub fn month(&self) -> Option<u8> {
        self.month
    }

    /// The day component, when the source carried one.
    pub fn day(&self) -> Option<u8> {
        self.day
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year)?;
        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
        }
        if let Some(day) = self.day {
            write!(f, "-{day:02}")?;
        }
        Ok(())
    }
}

impl Serialize for PartialDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PartialDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DateVisitor;

        impl Visitor<'_> for DateVisitor {
            type Value = PartialDate;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a partial ISO date string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<PartialDate, E> {
                PartialDate::parse(value)
                    .ok_or_else(|| E::custom(format!("invalid partial date: {value:?}")))
            }
        }

        deserializer.deserialize_str(DateVisitor)
    }
}

/// Read exactly `len` ASCII digits at `offset`, or nothing.
fn fixed_digits(bytes: &[u8], offset: usize, len: usize) -> Option<u32> {
    let slice = bytes.get(offset..offset + len)?;
    let mut value = 0u32;
    for &b in slice {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u32::from(b - b'0');
    }
    Some(value)
}

/// Read a `-DD` component at `offset`, or nothing.
fn dash_component(bytes: &[u8], offset: usize) -> Option<u32> {
    if bytes.get(offset) != Some(&b'-') {
        return None;
    }
    fixed_digits(bytes, offset + 1, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_date() {
        let date = PartialDate::parse("2020-05-01").unwrap();
        assert_eq!(date.year(), 2020);
        assert_eq!(date.month(), Some(5));
        assert_eq!(date.day(), Some(1));
        assert_eq!(date.to_string(), "2020-05-01");
    }

    #[test]
    fn parse_year_month() {
        assert_eq!(PartialDate::parse("2019-11").unwrap().to_string(), "2019-11");
    }

    #[test]
    fn parse_year_only() {
        assert_eq!(PartialDate::parse("2018").unwrap().to_string(), "2018");
    }

    #[test]
    fn trailing_text_ignored() {
        assert_eq!(
            PartialDate::parse("2020-05-01T00:00").unwrap().to_string(),
            "2020-05-01"
        );
        // A fifth digit is not part of the year group
        assert_eq!(PartialDate::parse("20205").unwrap().to_string(), "2020");
    }

    #[test]
    fn single_digit_month_is_not_a_month() {
        assert_eq!(PartialDate::parse("2020-5").unwrap().to_string(), "2020");
    }

    #[test]
    fn unparseable_is_unknown() {
        assert!(PartialDate::parse("").is_none());
        assert!(PartialDate::parse("May 2020").is_none());
        assert!(PartialDate::parse(" 2020").is_none());
        assert!(PartialDate::parse("202").is_none());
    }

    #[test]
    fn ordering_matches_rendered_text() {
        let year = PartialDate::parse("2020").unwrap();
        let month = PartialDate::parse("2020-05").unwrap();
        let day = PartialDate::parse("2020-05-01").unwrap();
        assert!(year < month);
        assert!(month < day);
        assert!(PartialDate::parse("2019-12-31").unwrap() < year);
    }

    #[test]
    fn serde_round_trip() {
        let date = PartialDate::parse("2021-03").unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2021-03\"");
        let back: PartialDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
