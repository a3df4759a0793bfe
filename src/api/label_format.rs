use std::fmt::Write as _;

use chrono::NaiveDateTime;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parsed `#,###.00`-style number pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NumberPattern {
    prefix: String,
    suffix: String,
    grouping: bool,
    min_decimals: usize,
    max_decimals: usize,
}

impl NumberPattern {
    fn parse(pattern: &str) -> Self {
        let is_digit = |c: char| matches!(c, '#' | '0' | ',' | '.');
        let start = pattern.find(is_digit).unwrap_or(pattern.len());
        let end = pattern.rfind(is_digit).map_or(start, |index| index + 1);
        let core = &pattern[start..end];
        let (integer, fraction) = core.split_once('.').unwrap_or((core, ""));

        let min_decimals = fraction.chars().filter(|c| *c == '0').count();
        let max_decimals = fraction.chars().filter(|c| matches!(c, '0' | '#')).count();
        Self {
            prefix: pattern[..start].to_owned(),
            suffix: pattern[end..].to_owned(),
            grouping: integer.contains(','),
            min_decimals,
            max_decimals,
        }
    }
}

/// Formats `value` with a number pattern.
///
/// `0` after the decimal point is a mandatory digit, `#` an optional one, a
/// `,` in the integer part enables thousands grouping. Text before and after
/// the digit pattern is kept literally, so `"$#,###.00"` and `"#.#%"` work.
#[must_use]
pub fn format_number(value: f64, pattern: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let spec = NumberPattern::parse(pattern);
    let decimals = spec.max_decimals;
    let mut text = match Decimal::from_f64(value) {
        Some(decimal) => {
            let rounded = decimal
                .round_dp_with_strategy(decimals as u32, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.decimals$}")
        }
        None => format!("{value:.decimals$}"),
    };

    if let Some(dot) = text.find('.') {
        let mut kept = text.len() - dot - 1;
        while kept > spec.min_decimals && text.ends_with('0') {
            text.pop();
            kept -= 1;
        }
        if kept == 0 {
            text.pop();
        }
    }

    let negative = text.starts_with('-');
    let unsigned = text.trim_start_matches('-');
    let (integer, fraction) = match unsigned.find('.') {
        Some(dot) => (&unsigned[..dot], &unsigned[dot..]),
        None => (unsigned, ""),
    };
    let is_zero = integer.chars().chain(fraction.chars()).all(|c| matches!(c, '0' | '.'));
    let integer = if spec.grouping {
        group_thousands(integer)
    } else {
        integer.to_owned()
    };

    let sign = if negative && !is_zero { "-" } else { "" };
    format!("{}{sign}{integer}{fraction}{}", spec.prefix, spec.suffix)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Formats a date with a strftime pattern, falling back to ISO dates when
/// the pattern is malformed.
#[must_use]
pub fn format_date(time: NaiveDateTime, pattern: &str) -> String {
    let mut text = String::new();
    if write!(text, "{}", time.format(pattern)).is_ok() {
        return text;
    }
    time.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Replaces `{key}` placeholders using `lookup`.
///
/// Unknown keys and unmatched braces are kept verbatim.
pub fn render_template(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match lookup(key.trim()) {
                    Some(value) => rendered.push_str(&value),
                    None => {
                        rendered.push('{');
                        rendered.push_str(key);
                        rendered.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                rendered.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    rendered.push_str(rest);
    rendered
}
