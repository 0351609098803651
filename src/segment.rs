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

//! Rendering of single SCT2 record lines.

/// Style tag applied to every segment unless configured otherwise.
pub const DEFAULT_TAG: &str = "RestrictedRed";
/// Column at which the coordinate payload of a record starts.
pub const NAME_WIDTH: usize = 26;
/// Coordinates placed on a group name line, which draws nothing.
pub const BLANK_COORDS: &str = "N000.00.00.000 E000.00.00.000 N000.00.00.000 E000.00.00.000";

/// Fixed `[INFO]` block written after the tag definition.
const INFO_BLOCK: &[&str] = &[
    "ZLC AIRAC 2201",
    "SLC_33_CTR",
    "KSLC",
    "N043.31.08.418",
    "W112.03.50.103",
    "60.043",
    "43.536",
    "-11.8",
    "1.000",
];
/// Colour value assigned to the style tag in the header.
const TAG_COLOR: u32 = 128;

/// Immutable output settings shared by the formatter and the emitters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorStyle {
    /// Text written verbatim at the top of the output.
    pub header: String,
    /// Style tag ending every record line.
    pub tag: String,
    /// Placeholder coordinates on group name lines.
    pub blank_coords: String,
    /// Minimum width of the name column.
    pub name_width: usize,
}

impl SectorStyle {
    /// Create a style using `tag` for all records and the default header
    /// defining that tag.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        SectorStyle {
            header: default_header(&tag),
            tag,
            blank_coords: BLANK_COORDS.to_string(),
            name_width: NAME_WIDTH,
        }
    }

    /// Replace the header block.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Render one segment line from four DMS strings.
    ///
    /// The line is indented to the name column and ends with the style tag and
    /// a newline.
    pub fn format_segment(
        &self,
        start_lat: &str,
        start_lon: &str,
        end_lat: &str,
        end_lon: &str,
    ) -> String {
        format!(
            "{:width$}{start_lat} {start_lon} {end_lat} {end_lon} {}\n",
            "",
            self.tag,
            width = self.name_width
        )
    }

    /// Render the name line opening a group.
    ///
    /// Names shorter than the name column are padded with spaces, longer names
    /// are written as they are and the payload follows immediately.
    pub fn format_group_header(&self, name: &str) -> String {
        let padding = self.name_width.saturating_sub(name.chars().count());
        format!(
            "{name}{:padding$}{} {}\n",
            "",
            self.blank_coords,
            self.tag
        )
    }
}

impl Default for SectorStyle {
    fn default() -> Self {
        Self::new(DEFAULT_TAG)
    }
}

/// Header block defining `tag`, followed by `[INFO]` and the `[SID]` marker.
fn default_header(tag: &str) -> String {
    let mut header = format!("#define {tag} {TAG_COLOR}\n\n[INFO]\n");
    for line in INFO_BLOCK {
        header.push_str(line);
        header.push('\n');
    }
    header.push_str("\n[SID]\n");
    header
}
