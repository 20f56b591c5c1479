//! Spanish relative-date resolution ("hace 2 años", "una semana").
//!
//! Rules are tried in a fixed order and the first keyword hit wins:
//! years, months, weeks, days, hours. Keyword sets overlap (e.g. "hace un año y un
//! mes"), so the order is part of the contract.
//!
//! Amounts are read from a fixed whitespace-token position per unit: token 1 for
//! years, months, days and hours ("hace 3 años"), token 0 for weeks ("3 semanas").
//! A "one" shorthand (`un`/`una`, matched as a substring) short-circuits the lookup
//! for every unit except hours.

use chrono::{Months, NaiveDate, NaiveDateTime, TimeDelta};

use crate::constants::dates::{
    DAY_KEYWORD, HOUR_KEYWORD, MONTH_KEYWORD, ONE_FEMININE, ONE_MASCULINE, RESOLVED_DATE_FORMAT,
    WEEK_KEYWORD, YEAR_KEYWORDS,
};

/// Unit of a relative offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetUnit {
    /// Calendar years (day clamped to month end).
    Years,
    /// Calendar months (day clamped to month end).
    Months,
    /// Fixed 7-day weeks.
    Weeks,
    /// Fixed 24-hour days.
    Days,
    /// Fixed hours.
    Hours,
}

/// Offset into the past parsed from a phrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelativeOffset {
    pub unit: OffsetUnit,
    pub amount: u32,
}

impl RelativeOffset {
    /// Subtract this offset from `reference`.
    ///
    /// Returns `None` when the result falls outside the representable range.
    pub fn apply(&self, reference: NaiveDateTime) -> Option<NaiveDateTime> {
        let amount = i64::from(self.amount);
        match self.unit {
            OffsetUnit::Years => {
                reference.checked_sub_months(Months::new(self.amount.checked_mul(12)?))
            }
            OffsetUnit::Months => reference.checked_sub_months(Months::new(self.amount)),
            OffsetUnit::Weeks => reference.checked_sub_signed(TimeDelta::try_weeks(amount)?),
            OffsetUnit::Days => reference.checked_sub_signed(TimeDelta::try_days(amount)?),
            OffsetUnit::Hours => reference.checked_sub_signed(TimeDelta::try_hours(amount)?),
        }
    }
}

/// Match `phrase` against the ordered rule set.
///
/// Returns `None` when no keyword matches or when the amount token at the
/// unit's fixed position is missing or not a non-negative integer.
pub fn parse_relative_offset(phrase: &str) -> Option<RelativeOffset> {
    let (unit, amount) = if YEAR_KEYWORDS.iter().any(|keyword| phrase.contains(keyword)) {
        (OffsetUnit::Years, amount_or_one(phrase, ONE_MASCULINE, 1)?)
    } else if phrase.contains(MONTH_KEYWORD) {
        (OffsetUnit::Months, amount_or_one(phrase, ONE_MASCULINE, 1)?)
    } else if phrase.contains(WEEK_KEYWORD) {
        (OffsetUnit::Weeks, amount_or_one(phrase, ONE_FEMININE, 0)?)
    } else if phrase.contains(DAY_KEYWORD) {
        (OffsetUnit::Days, amount_or_one(phrase, ONE_MASCULINE, 1)?)
    } else if phrase.contains(HOUR_KEYWORD) {
        (OffsetUnit::Hours, amount_at(phrase, 1)?)
    } else {
        return None;
    };
    Some(RelativeOffset { unit, amount })
}

/// Resolve `phrase` relative to `reference`, keeping only the calendar date.
pub fn resolve_relative_date(phrase: &str, reference: NaiveDateTime) -> Option<NaiveDate> {
    let offset = parse_relative_offset(phrase)?;
    offset.apply(reference).map(|resolved| resolved.date())
}

/// Resolve `phrase` and render the result as `dd/mm/yyyy`.
pub fn process_date(phrase: &str, reference: NaiveDateTime) -> Option<String> {
    resolve_relative_date(phrase, reference)
        .map(|date| date.format(RESOLVED_DATE_FORMAT).to_string())
}

/// Amount `1` when `one_word` occurs anywhere in the phrase, else the token at `index`.
fn amount_or_one(phrase: &str, one_word: &str, index: usize) -> Option<u32> {
    if phrase.contains(one_word) {
        Some(1)
    } else {
        amount_at(phrase, index)
    }
}

/// Integer at whitespace-token position `index`.
fn amount_at(phrase: &str, index: usize) -> Option<u32> {
    phrase.split_whitespace().nth(index)?.parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    fn reference() -> NaiveDateTime {
        at(2024, 6, 15, 12)
    }

    #[test]
    fn years_with_explicit_amount() {
        assert_eq!(
            process_date("hace 3 años", reference()).as_deref(),
            Some("15/06/2021")
        );
    }

    #[test]
    fn any_year_phrase_with_un_subtracts_exactly_one_year() {
        for phrase in ["hace un año", "un año", "hace un año y un mes", "hace un años"] {
            assert_eq!(
                process_date(phrase, reference()).as_deref(),
                Some("15/06/2023"),
                "phrase {phrase:?}"
            );
        }
    }

    #[test]
    fn year_subtraction_clamps_leap_day() {
        assert_eq!(
            process_date("hace 1 año", at(2024, 2, 29, 8)).as_deref(),
            Some("28/02/2023")
        );
    }

    #[test]
    fn unrelated_phrases_do_not_match_year_rule() {
        assert_eq!(process_date("hace 5 minutos", reference()), None);
        assert_eq!(process_date("ayer por la tarde", reference()), None);
        assert_eq!(process_date("", reference()), None);
    }

    #[test]
    fn months_are_calendar_aware() {
        assert_eq!(
            process_date("hace un mes", at(2024, 3, 31, 9)).as_deref(),
            Some("29/02/2024")
        );
        assert_eq!(
            process_date("hace 4 meses", reference()).as_deref(),
            Some("15/02/2024")
        );
        assert_eq!(
            process_date("hace 7 meses", reference()).as_deref(),
            Some("15/11/2023")
        );
    }

    #[test]
    fn weeks_use_token_zero_and_una_shorthand() {
        assert_eq!(
            process_date("una semana", reference()).as_deref(),
            Some("08/06/2024")
        );
        assert_eq!(
            process_date("hace una semana", reference()).as_deref(),
            Some("08/06/2024")
        );
        assert_eq!(
            process_date("3 semanas", reference()).as_deref(),
            Some("25/05/2024")
        );
    }

    #[test]
    fn weeks_with_amount_after_hace_are_unrecognized() {
        // Token 0 is "hace", which is not an integer.
        assert_eq!(process_date("hace 2 semanas", reference()), None);
    }

    #[test]
    fn days_subtract_fixed_durations() {
        assert_eq!(
            process_date("hace un día", reference()).as_deref(),
            Some("14/06/2024")
        );
        assert_eq!(
            process_date("hace 20 días", reference()).as_deref(),
            Some("26/05/2024")
        );
    }

    #[test]
    fn hours_truncate_time_of_day() {
        assert_eq!(
            process_date("hace 5 horas", reference()).as_deref(),
            Some("15/06/2024")
        );
        assert_eq!(
            process_date("hace 5 horas", at(2024, 6, 15, 3)).as_deref(),
            Some("14/06/2024")
        );
    }

    #[test]
    fn hours_have_no_one_shorthand() {
        assert_eq!(process_date("hace una hora", reference()), None);
        assert_eq!(
            parse_relative_offset("hace 1 hora"),
            Some(RelativeOffset {
                unit: OffsetUnit::Hours,
                amount: 1
            })
        );
    }

    #[test]
    fn rule_order_prefers_months_over_weeks_and_days() {
        assert_eq!(
            parse_relative_offset("hace 2 meses y 3 días").map(|offset| offset.unit),
            Some(OffsetUnit::Months)
        );
        assert_eq!(
            parse_relative_offset("una semana y un día").map(|offset| offset.unit),
            Some(OffsetUnit::Weeks)
        );
    }

    #[test]
    fn malformed_amounts_are_unrecognized() {
        assert_eq!(process_date("hace dos años", reference()), None);
        assert_eq!(process_date("años", reference()), None);
        assert_eq!(process_date("hace -2 días", reference()), None);
    }

    #[test]
    fn resolve_relative_date_returns_calendar_date() {
        assert_eq!(
            resolve_relative_date("hace 2 días", reference()),
            NaiveDate::from_ymd_opt(2024, 6, 13)
        );
    }

    #[test]
    fn out_of_range_offsets_are_unrecognized() {
        assert_eq!(process_date("hace 4000000000 horas", reference()), None);
        assert_eq!(process_date("hace 999999999 años", reference()), None);
    }
}
