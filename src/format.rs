use chrono::Weekday;
use nom::bytes::complete::{tag, take_while_m_n};
use nom::IResult;

use crate::calendar::CalendarDate;
use crate::error::{ParseError, ParseErrorKind};
use crate::locale::LocaleTable;

/// One element of a compiled pattern. `YYYY`, `MM`, `DD` are numeric,
/// `MMM`/`MMMM` and `ddd`/`dddd` are looked up in the locale table,
/// everything else passes through as a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Year4,
    Month2,
    MonthFull,
    MonthAbbrev,
    Day2,
    WeekdayFull,
    WeekdayAbbrev,
    Literal(String),
}

fn compile(pattern: &str) -> Vec<Token> {
    // longest token first, so MMMM never reads as MM MM
    fn leading_token(rest: &str) -> Option<(Token, usize)> {
        if rest.starts_with("YYYY") {
            Some((Token::Year4, 4))
        } else if rest.starts_with("MMMM") {
            Some((Token::MonthFull, 4))
        } else if rest.starts_with("MMM") {
            Some((Token::MonthAbbrev, 3))
        } else if rest.starts_with("MM") {
            Some((Token::Month2, 2))
        } else if rest.starts_with("DD") {
            Some((Token::Day2, 2))
        } else if rest.starts_with("dddd") {
            Some((Token::WeekdayFull, 4))
        } else if rest.starts_with("ddd") {
            Some((Token::WeekdayAbbrev, 3))
        } else {
            None
        }
    }

    let mut tokens = Vec::new();
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some((token, len)) = leading_token(rest) {
            tokens.push(token);
            rest = &rest[len..];
            continue;
        }

        let ch = rest.chars().next().unwrap();
        rest = &rest[ch.len_utf8()..];
        if let Some(Token::Literal(lit)) = tokens.last_mut() {
            lit.push(ch);
        } else {
            tokens.push(Token::Literal(ch.to_string()));
        }
    }

    tokens
}

/// Expands `pattern` for `date`. Total for any valid date.
pub fn format(date: CalendarDate, pattern: &str, locale: &LocaleTable) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for token in compile(pattern) {
        match token {
            Token::Year4 => write!(out, "{:04}", date.year()).unwrap(),
            Token::Month2 => write!(out, "{:02}", date.month()).unwrap(),
            Token::Day2 => write!(out, "{:02}", date.day()).unwrap(),
            Token::MonthFull => out.push_str(locale.month_name(date.month())),
            Token::MonthAbbrev => out.push_str(locale.month_abbrev(date.month())),
            Token::WeekdayFull => out.push_str(locale.weekday_name(date.weekday())),
            Token::WeekdayAbbrev => out.push_str(locale.weekday_abbrev(date.weekday())),
            Token::Literal(lit) => out.push_str(&lit),
        }
    }

    out
}

/// Strict parse of `text` against `pattern`. Out-of-range components
/// (month 13, day 00, Feb 30) are rejected, never clamped; a weekday
/// name that contradicts the date is malformed. The pattern must bind
/// year, month and day for the text to denote a unique day.
pub fn parse(text: &str, pattern: &str, locale: &LocaleTable) -> Result<CalendarDate, ParseError> {
    let mut rest = text;
    let mut year: Option<i32> = None;
    let mut month: Option<u32> = None;
    let mut day: Option<u32> = None;
    let mut weekday: Option<Weekday> = None;

    for token in compile(pattern) {
        match token {
            Token::Year4 => {
                let (next, digits) = fixed_digits(rest, 4)?;
                year = Some(digits.parse().unwrap());
                rest = next;
            }
            Token::Month2 => {
                let (next, digits) = fixed_digits(rest, 2)?;
                let value: u32 = digits.parse().unwrap();
                if !(1..=12).contains(&value) {
                    return Err(ParseError::new(
                        ParseErrorKind::OutOfRangeComponent,
                        &format!("month {}", value),
                    ));
                }
                month = Some(value);
                rest = next;
            }
            Token::Day2 => {
                let (next, digits) = fixed_digits(rest, 2)?;
                let value: u32 = digits.parse().unwrap();
                if !(1..=31).contains(&value) {
                    return Err(ParseError::new(
                        ParseErrorKind::OutOfRangeComponent,
                        &format!("day {}", value),
                    ));
                }
                day = Some(value);
                rest = next;
            }
            Token::MonthFull | Token::MonthAbbrev => {
                let abbrev = token == Token::MonthAbbrev;
                match locale.match_month(rest, abbrev) {
                    Some((value, len)) => {
                        month = Some(value);
                        rest = &rest[len..];
                    }
                    None => {
                        return Err(ParseError::new(
                            ParseErrorKind::MalformedText,
                            "expected a month name",
                        ))
                    }
                }
            }
            Token::WeekdayFull | Token::WeekdayAbbrev => {
                let abbrev = token == Token::WeekdayAbbrev;
                match locale.match_weekday(rest, abbrev) {
                    Some((value, len)) => {
                        weekday = Some(value);
                        rest = &rest[len..];
                    }
                    None => {
                        return Err(ParseError::new(
                            ParseErrorKind::MalformedText,
                            "expected a weekday name",
                        ))
                    }
                }
            }
            Token::Literal(lit) => {
                let (next, _) = literal(rest, &lit)?;
                rest = next;
            }
        }
    }

    if !rest.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::MalformedText,
            "trailing input",
        ));
    }

    let (year, month, day) = match (year, month, day) {
        (Some(year), Some(month), Some(day)) => (year, month, day),
        _ => {
            return Err(ParseError::new(
                ParseErrorKind::MalformedText,
                "pattern does not bind a full date",
            ))
        }
    };

    let date = CalendarDate::new(year, month, day)
        .map_err(|e| ParseError::new(ParseErrorKind::OutOfRangeComponent, &e.to_string()))?;

    if let Some(expected) = weekday {
        if date.weekday() != expected {
            return Err(ParseError::new(
                ParseErrorKind::MalformedText,
                "weekday does not match the date",
            ));
        }
    }

    Ok(date)
}

fn fixed_digits(input: &str, count: usize) -> Result<(&str, &str), ParseError> {
    let result: IResult<&str, &str> =
        take_while_m_n(count, count, |c: char| c.is_ascii_digit())(input);

    Ok(result?)
}

fn literal<'a>(input: &'a str, lit: &str) -> Result<(&'a str, &'a str), ParseError> {
    let result: IResult<&str, &str> = tag(lit)(input);

    Ok(result?)
}
