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

//! Traversal of source geometries into groups of SCT2 segments.
//!
//! XML sources supply independent lines, which are collected with a
//! [`LineWalker`]. GeoJSON sources supply polygon rings, which are collected
//! with a [`RingWalker`]. Both produce a [`SectorFile`].

use std::fmt::Write;

use log::{info, trace};

use crate::dms::{Axis, Dms};
use crate::segment::SectorStyle;

/// Name of the group aggregating every ring segment of a run.
pub const ALL_GROUP: &str = "ALL";

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lon: f64,
}

impl GeoCoordinate {
    /// Create a coordinate from decimal degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoCoordinate { lat, lon }
    }

    /// Latitude and longitude in DMS notation.
    fn to_dms(self) -> (String, String) {
        (
            Dms::from_decimal(self.lat, Axis::Latitude).to_string(),
            Dms::from_decimal(self.lon, Axis::Longitude).to_string(),
        )
    }
}

/// One line drawn between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorSegment {
    pub start: GeoCoordinate,
    pub end: GeoCoordinate,
}

impl SectorSegment {
    /// Create a segment from `start` to `end`.
    pub fn new(start: GeoCoordinate, end: GeoCoordinate) -> Self {
        SectorSegment { start, end }
    }

    /// Render this segment as one record line using `style`.
    pub fn format(&self, style: &SectorStyle) -> String {
        let (start_lat, start_lon) = self.start.to_dms();
        let (end_lat, end_lon) = self.end.to_dms();
        style.format_segment(&start_lat, &start_lon, &end_lat, &end_lon)
    }
}

/// Segments listed below one name line.
///
/// A group without a name has no name line. This only happens for XML lines
/// which precede the first description.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    /// Text of the name line, if any.
    pub name: Option<String>,
    pub segments: Vec<SectorSegment>,
}

impl Group {
    /// Create an empty group with a name line.
    pub fn named(name: impl Into<String>) -> Self {
        Group {
            name: Some(name.into()),
            segments: vec![],
        }
    }
}

/// Ordered groups making up the body of an SCT2 file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectorFile {
    pub groups: Vec<Group>,
}

impl SectorFile {
    /// Total number of segments over all groups.
    pub fn segment_count(&self) -> usize {
        self.groups.iter().map(|g| g.segments.len()).sum()
    }

    /// Render the header of `style` followed by every group.
    pub fn render(&self, style: &SectorStyle) -> String {
        let mut out = style.header.clone();
        for group in &self.groups {
            if let Some(ref name) = group.name {
                out.push_str(&style.format_group_header(name));
            }
            for segment in &group.segments {
                let line = segment.format(style);
                trace!("{segment:?} -> {}", line.trim());
                out.push_str(&line);
            }
        }
        out
    }
}

/// Collects explicit start/end lines into named groups.
#[derive(Debug, Default)]
pub struct LineWalker {
    file: SectorFile,
}

impl LineWalker {
    /// Create a walker without any groups.
    pub fn new() -> Self {
        Default::default()
    }

    /// Start a new group called `name`. Following lines are added to it.
    pub fn begin_group(&mut self, name: impl Into<String>) {
        self.file.groups.push(Group::named(name));
    }

    /// Add one segment from `start` to `end` to the current group.
    pub fn add_line(&mut self, start: GeoCoordinate, end: GeoCoordinate) {
        let segment = SectorSegment::new(start, end);
        match self.file.groups.last_mut() {
            Some(group) => group.segments.push(segment),
            None => self.file.groups.push(Group {
                name: None,
                segments: vec![segment],
            }),
        }
    }

    /// Return the collected groups.
    pub fn finish(self) -> SectorFile {
        info!(
            "collected {} lines in {} groups",
            self.file.segment_count(),
            self.file.groups.len()
        );
        self.file
    }
}

/// Collects polygon rings into one group per feature plus the [`ALL_GROUP`].
#[derive(Debug, Default)]
pub struct RingWalker {
    file: SectorFile,
    all: Vec<SectorSegment>,
    counter: usize,
}

impl RingWalker {
    /// Create a walker whose feature counter starts at one.
    pub fn new() -> Self {
        Default::default()
    }

    /// Add the `ring` of one feature.
    ///
    /// The group is named after `id`, the first character of `prefix` and the
    /// running feature counter, e.g. `SLCA1`. The ring is closed if its first
    /// and last point differ. Returns the name of the new group.
    pub fn add_feature(&mut self, id: &str, prefix: char, ring: Vec<GeoCoordinate>) -> String {
        self.counter += 1;
        let mut name = String::from(id);
        write!(name, "{prefix}{}", self.counter).unwrap();

        let segments = ring_segments(ring);
        trace!("feature {name} has {} segments", segments.len());
        self.all.extend_from_slice(&segments);
        self.file.groups.push(Group {
            name: Some(name.clone()),
            segments,
        });
        name
    }

    /// Append the [`ALL_GROUP`] and return the complete file.
    pub fn finish(mut self) -> SectorFile {
        info!(
            "collected {} features with {} segments",
            self.counter,
            self.all.len()
        );
        self.file.groups.push(Group {
            name: Some(ALL_GROUP.to_string()),
            segments: self.all,
        });
        self.file
    }
}

/// Append the first point of `ring` if the ring is not closed yet.
pub fn close_ring(ring: &mut Vec<GeoCoordinate>) {
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
        if first != last {
            trace!("closing ring at {first:?}");
            ring.push(first);
        }
    }
}

/// Close `ring` and connect each pair of consecutive points.
///
/// A ring of `n` distinct points always yields `n` segments.
pub fn ring_segments(mut ring: Vec<GeoCoordinate>) -> Vec<SectorSegment> {
    close_ring(&mut ring);
    ring.windows(2)
        .map(|pair| SectorSegment::new(pair[0], pair[1]))
        .collect()
}
