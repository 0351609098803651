// Copyright 2023 Viktor Reusch
//
// This file is part of sct2_convert.
//
// sct2_convert is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// sct2_convert is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.
//
// You should have received a copy of the GNU Affero General Public License
// along with sct2_convert. If not, see <https://www.gnu.org/licenses/>.

//! Conversion between decimal degrees and the DMS notation used by SCT2.
//!
//! SCT2 writes every coordinate as `<DIR><DDD>.<MM>.<SS.sss>`, for example
//! `N043.31.08.418`. The degree part is always padded to three digits and the
//! seconds always carry exactly three decimal digits.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Decimal places of the seconds component.
const SECONDS_PLACES: i32 = 3;
/// Decimal places kept when converting back to decimal degrees.
const DECIMAL_PLACES: i32 = 6;

/// Which coordinate axis a degree value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// North/south, rendered with `N` or `S`.
    Latitude,
    /// East/west, rendered with `E` or `W`.
    Longitude,
}

/// Direction letter leading a DMS string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `N`
    North,
    /// `S`
    South,
    /// `E`
    East,
    /// `W`
    West,
}

impl Direction {
    /// Pick the direction for a value on `axis` from its sign.
    fn from_sign(axis: Axis, negative: bool) -> Self {
        match (axis, negative) {
            (Axis::Latitude, false) => Self::North,
            (Axis::Latitude, true) => Self::South,
            (Axis::Longitude, false) => Self::East,
            (Axis::Longitude, true) => Self::West,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Self::North),
            'S' => Some(Self::South),
            'E' => Some(Self::East),
            'W' => Some(Self::West),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
            Self::East => 'E',
            Self::West => 'W',
        }
    }

    /// South and west count as negative decimal degrees.
    fn is_negative(self) -> bool {
        matches!(self, Self::South | Self::West)
    }
}

/// A directional degree/minute/second triple.
///
/// [`Dms::from_decimal`] and [`fmt::Display`] produce the SCT2 string form,
/// [`FromStr`] parses it back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub direction: Direction,
    /// Whole degrees without sign.
    pub degrees: u32,
    /// Whole minutes, below 60.
    pub minutes: u32,
    /// Seconds rounded to three decimal places.
    pub seconds: f64,
}

impl Dms {
    /// Split a signed decimal degree `value` on `axis` into its DMS parts.
    ///
    /// The degree and minute parts are truncated, the seconds are rounded to
    /// three decimal places. This is total for every finite input: degree
    /// magnitudes beyond `u32::MAX` saturate.
    pub fn from_decimal(value: f64, axis: Axis) -> Self {
        let degrees = value.trunc();
        let minutes_decimal = (value - degrees).abs() * 60.0;
        let minutes = minutes_decimal.trunc();
        let seconds = round_to((minutes_decimal - minutes) * 60.0, SECONDS_PLACES);

        Dms {
            // The sign of the truncated degrees is lost for values in (-1, 0).
            direction: Direction::from_sign(axis, value < 0.0),
            degrees: degrees.abs() as u32,
            minutes: minutes as u32,
            seconds,
        }
    }

    /// Whether `value` renders without saturating the degree field.
    ///
    /// Non-finite values and magnitudes beyond `u32::MAX` degrees do not.
    pub fn can_represent(value: f64) -> bool {
        value.is_finite() && value.abs() <= f64::from(u32::MAX)
    }

    /// Signed decimal degrees rounded to six decimal places.
    pub fn to_decimal(&self) -> f64 {
        let magnitude =
            f64::from(self.degrees) + f64::from(self.minutes) / 60.0 + self.seconds / 3600.0;
        let signed = if self.direction.is_negative() {
            -magnitude
        } else {
            magnitude
        };
        round_to(signed, DECIMAL_PLACES)
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:06.3}` always renders three fractional digits, so whole seconds
        // come out as `SS.000`.
        write!(
            f,
            "{}{:03}.{:02}.{:06.3}",
            self.direction.as_char(),
            self.degrees,
            self.minutes,
            self.seconds
        )
    }
}

impl FromStr for Dms {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || Error::MalformedDms {
            input: s.to_string(),
        };

        let mut chars = s.chars();
        let direction = chars
            .next()
            .and_then(Direction::from_char)
            .ok_or_else(malformed)?;

        let fields: Vec<&str> = chars.as_str().split('.').collect();
        if fields.len() < 3 {
            return Err(malformed());
        }

        let degrees = parse_digits(fields[0]).ok_or_else(malformed)?;
        let minutes = parse_digits(fields[1]).ok_or_else(malformed)?;
        // The seconds field carries its own decimal point.
        let seconds = fields[2..].join(".");
        if !seconds.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(malformed());
        }
        let seconds: f64 = seconds.parse().map_err(|_| malformed())?;
        if !seconds.is_finite() {
            return Err(malformed());
        }

        Ok(Dms {
            direction,
            degrees,
            minutes,
            seconds,
        })
    }
}

/// Render a decimal degree `value` on `axis` as an SCT2 DMS string.
///
/// # Example
/// ```
/// # use sct2_convert::dms::{decimal_to_dms, Axis};
/// #
/// assert_eq!(decimal_to_dms(43.536, Axis::Latitude), "N043.32.09.600");
/// assert_eq!(decimal_to_dms(-112.0, Axis::Longitude), "W112.00.00.000");
/// ```
pub fn decimal_to_dms(value: f64, axis: Axis) -> String {
    Dms::from_decimal(value, axis).to_string()
}

/// Parse an SCT2 DMS string into signed decimal degrees.
///
/// Fails with [`Error::MalformedDms`] if `dms` has fewer than three
/// dot-separated fields, an unknown direction letter, or a non-numeric field.
pub fn dms_to_decimal(dms: &str) -> Result<f64, Error> {
    Ok(dms.parse::<Dms>()?.to_decimal())
}

fn parse_digits(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
