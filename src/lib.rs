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

//! Library for converting boundary data to SCT2 sector files.
//!
//! Two sources are supported: XML exports describing independent line
//! segments and GeoJSON collections of polygon features. Both are converted to
//! named groups of segments whose coordinates are written in the DMS notation
//! of SCT2.
//!
//! See [`convert`] for information on how to use this library and [`dms`] for
//! the coordinate notation.

use std::io::{self, Read};

use thiserror::Error;

pub mod dms;
pub mod input;
pub mod lookup;
pub mod segment;
pub mod walker;

pub use segment::SectorStyle;

/// Error returned from the conversion functions.
#[derive(Error, Debug)]
pub enum Error {
    /// A DMS string did not have the `<DIR><DDD>.<MM>.<SS.sss>` form.
    #[error("malformed DMS value {input:?}")]
    MalformedDms { input: String },
    /// A source record lacks a required attribute or property.
    #[error("{record} is missing {field}")]
    MissingField {
        record: String,
        field: &'static str,
    },
    /// A source attribute is not a decimal number.
    #[error("{field} of {record} is not a number: {value:?}")]
    InvalidNumber {
        record: String,
        field: &'static str,
        value: String,
    },
    /// A GeoJSON feature has a non-polygonal geometry.
    #[error("{record} has unsupported geometry {kind}")]
    UnsupportedGeometry { record: String, kind: &'static str },
    /// A lookup line had the wrong number of tokens.
    #[error("expected 1, 2, or 4 DMS values but got {0}")]
    TokenCount(usize),
    /// XML reading failed.
    #[error("reading XML failed: {0}")]
    Xml(#[from] roxmltree::Error),
    /// GeoJSON reading failed.
    #[error("reading GeoJSON failed: {0}")]
    GeoJson(#[from] geojson::Error),
    /// Reading the source or writing the sink failed.
    #[error("I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Kind of document read by [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Line segments grouped by description.
    Xml,
    /// A _FeatureCollection_ of polygons.
    GeoJson,
}

/// Read a source document and write an SCT2 file.
///
/// A complete document of the given `format` is read from `source`. The
/// converted data is written as a complete SCT2 file to `sink`, starting with
/// the header of `style`.
///
/// Nothing is written to `sink` unless the whole source was converted.
///
/// # Example
/// ```
/// # use sct2_convert::{convert, SectorStyle, SourceFormat};
/// #
/// let source = r#"
/// <Map>
///     <Group Description="SLC">
///         <Line type="Line" StartLat="43.536" StartLon="-112.0"
///               EndLat="43.5" EndLon="-112.25" />
///     </Group>
/// </Map>
/// "#;
/// let mut sink = vec![];
///
/// convert(SourceFormat::Xml, source.as_bytes(), &mut sink, &SectorStyle::default())
///     .expect("conversion failed");
///
/// let sct2 = String::from_utf8(sink).expect("SCT2 data is not valid UTF-8");
/// assert!(sct2.starts_with("#define RestrictedRed 128"));
/// assert!(sct2.contains("N043.32.09.600 W112.00.00.000 N043.30.00.000 W112.15.00.000"));
/// ```
pub fn convert(
    format: SourceFormat,
    mut source: impl Read,
    mut sink: impl io::Write,
    style: &SectorStyle,
) -> Result<(), Error> {
    let mut text = String::new();
    source.read_to_string(&mut text)?;

    let file = match format {
        SourceFormat::Xml => input::xml::read_xml(&text)?,
        SourceFormat::GeoJson => input::geojson::read_geojson(&text)?,
    };

    sink.write_all(file.render(style).as_bytes())?;
    sink.flush()?;
    Ok(())
}

/// Convert an XML line export. See [`convert`].
pub fn convert_xml(
    source: impl Read,
    sink: impl io::Write,
    style: &SectorStyle,
) -> Result<(), Error> {
    convert(SourceFormat::Xml, source, sink, style)
}

/// Convert a GeoJSON feature collection. See [`convert`].
pub fn convert_geojson(
    source: impl Read,
    sink: impl io::Write,
    style: &SectorStyle,
) -> Result<(), Error> {
    convert(SourceFormat::GeoJson, source, sink, style)
}
