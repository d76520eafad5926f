//! Effective-date extraction.
//!
//! Three raw formats are tried in a fixed order:
//!
//! 1. `15 de marzo de 2024` (Spanish month name)
//! 2. `15/03/2024` (day/month/year)
//! 3. `2024-03-15` or `2024/03/15` (year/month/day)
//!
//! Within a format every match is tried in text order. A match that does not
//! form a real calendar date is skipped and the search continues, first with
//! later matches of the same format and then with the later formats.

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::patterns::{
    spanish_month_to_number, DAY_MONTH_YEAR_PATTERN, SPANISH_DATE_PATTERN,
    YEAR_MONTH_DAY_PATTERN,
};
use crate::types::EffectiveDate;

/// Raw (year, month, day) candidate assembled from one match.
type Candidate = (i32, u32, u32);

fn number<T: std::str::FromStr>(caps: &Captures<'_>, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse().ok()
}

fn spanish_candidate(caps: &Captures<'_>) -> Option<Candidate> {
    let day = number(caps, 1)?;
    let month = spanish_month_to_number(caps.get(2)?.as_str());
    let year = number(caps, 3)?;
    Some((year, month, day))
}

fn day_month_year_candidate(caps: &Captures<'_>) -> Option<Candidate> {
    Some((number(caps, 3)?, number(caps, 2)?, number(caps, 1)?))
}

fn year_month_day_candidate(caps: &Captures<'_>) -> Option<Candidate> {
    Some((number(caps, 1)?, number(caps, 2)?, number(caps, 3)?))
}

/// Build a calendar date, rejecting impossible ones such as 31 February.
fn to_calendar_date((year, month, day): Candidate) -> Option<NaiveDate> {
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Find the effective date of a document.
///
/// # Examples
/// ```
/// use legal_extractor::date::extract_date;
///
/// assert_eq!(extract_date("Bogotá, 15 de marzo de 2024").to_string(), "2024-03-15");
/// assert_eq!(extract_date("sin fecha").to_string(), "desconocida");
/// ```
#[must_use]
pub fn extract_date(text: &str) -> EffectiveDate {
    let formats: [(&Regex, fn(&Captures<'_>) -> Option<Candidate>); 3] = [
        (&*SPANISH_DATE_PATTERN, spanish_candidate),
        (&*DAY_MONTH_YEAR_PATTERN, day_month_year_candidate),
        (&*YEAR_MONTH_DAY_PATTERN, year_month_day_candidate),
    ];

    for (pattern, candidate) in formats {
        for caps in pattern.captures_iter(text) {
            let Some(raw) = candidate(&caps) else {
                continue;
            };
            match to_calendar_date(raw) {
                Some(date) => return EffectiveDate::Known(date),
                None => {
                    tracing::debug!(
                        candidate = %caps.get(0).map_or("", |m| m.as_str()),
                        "Skipping invalid calendar date"
                    );
                }
            }
        }
    }

    EffectiveDate::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> String {
        extract_date(text).to_string()
    }

    #[test]
    fn test_spanish_month_format() {
        assert_eq!(extract("15 de marzo de 2024"), "2024-03-15");
        assert_eq!(extract("Dado en Bogotá a 1 de Diciembre de 1999."), "1999-12-01");
        assert_eq!(extract("5 de setiembre de 2020"), "2020-09-05");
    }

    #[test]
    fn test_day_month_year_format() {
        assert_eq!(extract("Fecha: 15/03/2024"), "2024-03-15");
        assert_eq!(extract("1/2/2023"), "2023-02-01");
    }

    #[test]
    fn test_year_month_day_format() {
        assert_eq!(extract("vigente desde 2024-03-15"), "2024-03-15");
        assert_eq!(extract("2024/3/5"), "2024-03-05");
    }

    #[test]
    fn test_unrecognized_month_defaults_to_january() {
        assert_eq!(extract("10 de cada de 2020"), "2020-01-10");
    }

    #[test]
    fn test_invalid_date_is_unknown() {
        assert_eq!(extract("31 de febrero de 2024"), "desconocida");
        assert_eq!(extract("31/04/2024"), "desconocida");
        assert_eq!(extract("2024-13-01"), "desconocida");
        assert_eq!(extract("0000-01-01"), "desconocida");
    }

    #[test]
    fn test_invalid_candidate_falls_through_to_later_match_of_same_format() {
        let text = "31 de febrero de 2024, corregido al 28 de febrero de 2024";
        assert_eq!(extract(text), "2024-02-28");
    }

    #[test]
    fn test_invalid_candidate_falls_through_to_later_format() {
        let text = "31 de febrero de 2024 (radicado 2024-02-29)";
        assert_eq!(extract(text), "2024-02-29");
    }

    #[test]
    fn test_format_order_beats_text_position() {
        // The numeric date comes first in the text, but the Spanish format is tried first.
        let text = "Radicado 01/02/2020. Expedido el 3 de mayo de 2021.";
        assert_eq!(extract(text), "2021-05-03");

        let text = "2019-07-04 y luego 05/06/2020";
        assert_eq!(extract(text), "2020-06-05");
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_date("Sin fecha alguna"), EffectiveDate::Unknown);
        assert_eq!(extract_date(""), EffectiveDate::Unknown);
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(extract("29/02/2024"), "2024-02-29");
        assert_eq!(extract("29/02/2023"), "desconocida");
    }
}
