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

//! Conversion of typed DMS tokens back to decimal degrees.

use crate::dms::dms_to_decimal;
use crate::Error;

/// Convert one line of whitespace-separated DMS tokens to decimal degrees.
///
/// A single value, a coordinate pair, or a segment of two pairs is accepted.
/// Any other number of tokens fails with [`Error::TokenCount`].
///
/// # Example
/// ```
/// # use sct2_convert::lookup::{convert_tokens, join_decimals};
/// #
/// let values = convert_tokens("N043.30.00.000 W112.15.00.000").unwrap();
/// assert_eq!(join_decimals(&values), "43.5 -112.25");
/// ```
pub fn convert_tokens(line: &str) -> Result<Vec<f64>, Error> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if !matches!(tokens.len(), 1 | 2 | 4) {
        return Err(Error::TokenCount(tokens.len()));
    }
    tokens.into_iter().map(dms_to_decimal).collect()
}

/// Join decimal degrees with single spaces.
pub fn join_decimals(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
