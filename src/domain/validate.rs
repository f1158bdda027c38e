use chrono::{DateTime, Utc};

use super::date::parse_iso8601;
use super::error::ValidationError;
use super::field::Field;
use super::raw::{RawRow, RawValue};
use super::record::{Gender, Record};

/// Largest magnitude at which every integer is exactly representable as `f64`
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Validate one raw row into a [`Record`]
///
/// Keys are scanned in row order. An unrecognized key or a value of the wrong
/// type fails immediately at that key. Once every key has been seen, domain
/// constraints are checked in [`Field::ALL`] order; an absent field fails the
/// same constraint as an out-of-range one.
pub fn validate_row(row: &RawRow) -> Result<Record, ValidationError> {
    let mut scan = Scan::default();

    for (key, value) in row.iter() {
        let field = Field::lookup(key).ok_or_else(|| ValidationError::UnknownField {
            key: key.to_string(),
            value: value.clone(),
        })?;
        scan.accept(field, value)?;
    }

    scan.finish()
}

/// A parsed value alongside the raw input it came from
struct Seen<T> {
    raw: RawValue,
    value: T,
}

impl<T> Seen<T> {
    fn new(raw: &RawValue, value: T) -> Option<Self> {
        Some(Self {
            raw: raw.clone(),
            value,
        })
    }
}

#[derive(Default)]
struct Scan {
    username: Option<Seen<String>>,
    age: Option<Seen<i64>>,
    height: Option<Seen<i64>>,
    gender: Option<Seen<String>>,
    amount: Option<Seen<i64>>,
    last_purchase_date: Option<Seen<DateTime<Utc>>>,
}

impl Scan {
    fn accept(&mut self, field: Field, raw: &RawValue) -> Result<(), ValidationError> {
        match field {
            Field::UserName => self.username = Seen::new(raw, coerce_text(raw)),
            Field::Age => self.age = Seen::new(raw, parse_integer(field, raw)?),
            Field::Height => self.height = Seen::new(raw, parse_integer(field, raw)?),
            Field::Gender => self.gender = Seen::new(raw, normalize_gender(field, raw)?),
            Field::SaleAmount => self.amount = Seen::new(raw, parse_integer(field, raw)?),
            Field::LastPurchaseDate => {
                self.last_purchase_date = Seen::new(raw, parse_date(field, raw)?)
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Record, ValidationError> {
        let username = require(Field::UserName, self.username, |s| (!s.is_empty()).then_some(s))?;
        let age = require(Field::Age, self.age, positive)?;
        let height = require(Field::Height, self.height, positive)?;
        let gender = require(Field::Gender, self.gender, |g| Gender::from_normalized(&g))?;
        let amount = require(Field::SaleAmount, self.amount, positive)?;
        let last_purchase_date = require(Field::LastPurchaseDate, self.last_purchase_date, Some)?;

        Ok(Record::new(username, age, height, gender, amount, last_purchase_date))
    }
}

fn require<T, U>(
    field: Field,
    seen: Option<Seen<T>>,
    check: impl FnOnce(T) -> Option<U>,
) -> Result<U, ValidationError> {
    match seen {
        Some(Seen { raw, value }) => check(value).ok_or(ValidationError::Constraint {
            field,
            value: Some(raw),
        }),
        None => Err(ValidationError::Constraint { field, value: None }),
    }
}

fn positive(n: i64) -> Option<i64> {
    (n > 0).then_some(n)
}

fn coerce_text(raw: &RawValue) -> String {
    match raw {
        RawValue::Text(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Numbers and numeric text are accepted when integral; blank text reads as zero
fn parse_integer(field: Field, raw: &RawValue) -> Result<i64, ValidationError> {
    let number = match raw {
        RawValue::Number(n) => Some(*n),
        RawValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        RawValue::Date(_) => None,
    };

    number
        .filter(|n| n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER)
        .map(|n| n as i64)
        .ok_or_else(|| ValidationError::NotInteger {
            field,
            value: raw.clone(),
        })
}

fn normalize_gender(field: Field, raw: &RawValue) -> Result<String, ValidationError> {
    match raw {
        RawValue::Text(s) => Ok(s.trim().to_lowercase()),
        _ => Err(ValidationError::NotText {
            field,
            value: raw.clone(),
        }),
    }
}

fn parse_date(field: Field, raw: &RawValue) -> Result<DateTime<Utc>, ValidationError> {
    match raw {
        RawValue::Date(d) => Ok(*d),
        RawValue::Text(s) => parse_iso8601(s).ok_or_else(|| ValidationError::InvalidDate {
            field,
            value: raw.clone(),
        }),
        RawValue::Number(_) => Err(ValidationError::NotDate {
            field,
            value: raw.clone(),
        }),
    }
}
