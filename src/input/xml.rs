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

//! Reader for XML line-segment exports.
//!
//! Every element carrying a `Description` attribute opens a new group. Every
//! element with a `type` attribute of `Line` adds one segment from its
//! `StartLat`/`StartLon` and `EndLat`/`EndLon` attributes to the current
//! group. Attributes are matched by local name, so `xsi:type` works as well.

use log::{debug, log_enabled, Level};
use roxmltree::{Document, Node};

use crate::dms::{decimal_to_dms, Axis, Dms};
use crate::walker::{GeoCoordinate, LineWalker, SectorFile};
use crate::Error;

/// Parse the XML document `text` into groups of lines.
///
/// Elements are visited in document order. If an element has both a
/// description and a line type, the group is opened before the line is added.
pub fn read_xml(text: &str) -> Result<SectorFile, Error> {
    let doc = Document::parse(text)?;
    let mut walker = LineWalker::new();

    for node in doc.descendants().filter(|n| n.is_element()) {
        if let Some(name) = attribute(node, "Description") {
            debug!("group {name}");
            walker.begin_group(name);
        }

        if attribute(node, "type") == Some("Line") {
            let record = format!("line {}", doc.text_pos_at(node.range().start).row);
            let start = GeoCoordinate::new(
                number(node, &record, "StartLat", Axis::Latitude)?,
                number(node, &record, "StartLon", Axis::Longitude)?,
            );
            let end = GeoCoordinate::new(
                number(node, &record, "EndLat", Axis::Latitude)?,
                number(node, &record, "EndLon", Axis::Longitude)?,
            );
            walker.add_line(start, end);
        }
    }

    Ok(walker.finish())
}

/// Look up an attribute of `node` by its local `name`.
fn attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|attr| attr.name() == name)
        .map(|attr| attr.value())
}

/// Read the decimal degree attribute `field` of `node`.
fn number(node: Node, record: &str, field: &'static str, axis: Axis) -> Result<f64, Error> {
    let text = attribute(node, field).ok_or_else(|| Error::MissingField {
        record: record.to_string(),
        field,
    })?;
    let invalid = || Error::InvalidNumber {
        record: record.to_string(),
        field,
        value: text.to_string(),
    };
    let value: f64 = text.trim().parse().map_err(|_| invalid())?;
    if !Dms::can_represent(value) {
        return Err(invalid());
    }

    if log_enabled!(Level::Debug) {
        debug!("{record}: {field} {value} -> {}", decimal_to_dms(value, axis));
    }
    Ok(value)
}
