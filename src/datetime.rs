// ABOUTME: SMPP absolute/relative time strings (§7.1): YYMMDDhhmmsstnnp, 16 chars, or a
// ABOUTME: relative duration of the same width ending in 'R'. Used for schedule/validity/final_date.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsoluteTime {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub tenths: u8,
    /// Quarter-hours offset from UTC; sign in `utc_behind`.
    pub utc_offset_quarters: u8,
    pub utc_behind: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeTime {
    pub years: u8,
    pub months: u8,
    pub days: u8,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmppDateTime {
    Absolute(AbsoluteTime),
    Relative(RelativeTime),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DateTimeError {
    #[error("smpp datetime must be exactly 16 characters, got {0}")]
    WrongLength(usize),
    #[error("non-digit character in smpp datetime field")]
    NonDigit,
    #[error("unrecognized nn/p trailer")]
    BadTrailer,
}

fn two_digits(s: &str, offset: usize) -> Result<u8, DateTimeError> {
    s.get(offset..offset + 2)
        .ok_or(DateTimeError::WrongLength(s.len()))?
        .parse()
        .map_err(|_| DateTimeError::NonDigit)
}

impl SmppDateTime {
    /// Parses a 16-character SMPP time string. The trailing character
    /// distinguishes relative (`R`) from absolute (`+`/`-`) encodings.
    pub fn parse(s: &str) -> Result<Self, DateTimeError> {
        if s.len() != 16 {
            return Err(DateTimeError::WrongLength(s.len()));
        }
        let trailer = s.as_bytes()[15];
        if trailer == b'R' {
            return Ok(SmppDateTime::Relative(RelativeTime {
                years: two_digits(s, 0)?,
                months: two_digits(s, 2)?,
                days: two_digits(s, 4)?,
                hours: two_digits(s, 6)?,
                minutes: two_digits(s, 8)?,
                seconds: two_digits(s, 10)?,
            }));
        }
        let utc_behind = match trailer {
            b'+' => false,
            b'-' => true,
            _ => return Err(DateTimeError::BadTrailer),
        };
        Ok(SmppDateTime::Absolute(AbsoluteTime {
            year: two_digits(s, 0)?,
            month: two_digits(s, 2)?,
            day: two_digits(s, 4)?,
            hour: two_digits(s, 6)?,
            minute: two_digits(s, 8)?,
            second: two_digits(s, 10)?,
            tenths: s.as_bytes()[12].wrapping_sub(b'0'),
            utc_offset_quarters: two_digits(s, 13)?,
            utc_behind,
        }))
    }
}

impl fmt::Display for SmppDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmppDateTime::Absolute(t) => write!(
                f,
                "{:02}{:02}{:02}{:02}{:02}{:02}{}{:02}{}",
                t.year,
                t.month,
                t.day,
                t.hour,
                t.minute,
                t.second,
                t.tenths,
                t.utc_offset_quarters,
                if t.utc_behind { '-' } else { '+' }
            ),
            SmppDateTime::Relative(t) => write!(
                f,
                "{:02}{:02}{:02}{:02}{:02}{:02}000R",
                t.years, t.months, t.days, t.hours, t.minutes, t.seconds
            ),
        }
    }
}

/// Parses a delivery receipt date field: `YYMMDDhhmm` (10 digits) or
/// `YYMMDDhhmmss` (12 digits), no timezone (spec §4.D).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptDate {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: Option<u8>,
}

pub fn parse_receipt_date(s: &str) -> Result<ReceiptDate, DateTimeError> {
    match s.len() {
        10 => Ok(ReceiptDate {
            year: two_digits(s, 0)?,
            month: two_digits(s, 2)?,
            day: two_digits(s, 4)?,
            hour: two_digits(s, 6)?,
            minute: two_digits(s, 8)?,
            second: None,
        }),
        12 => Ok(ReceiptDate {
            year: two_digits(s, 0)?,
            month: two_digits(s, 2)?,
            day: two_digits(s, 4)?,
            hour: two_digits(s, 6)?,
            minute: two_digits(s, 8)?,
            second: Some(two_digits(s, 10)?),
        }),
        other => Err(DateTimeError::WrongLength(other)),
    }
}
