//! Level file layout.
//!
//! ```text
//! Header    u32: directoryOffset ----+
//! Items     Vertices                 |
//!           | f64: x                 |
//!           | f64: y                 |
//!           Lines       <------+     |
//!           | u16: v0          |     |
//!           | u16: v1          |     |
//!                       <------+-+   |
//! Directory u32: verticesEnd --+ | <-+
//!           u32: linesEnd -------+
//! ```
//!
//! All offsets are absolute and every value is big-endian.

use super::{Level, LevelError, LevelResult, Line, Vertex};
use crate::codec::{deserialize, serialize};

pub const HEADER_SIZE: usize = 4;
pub const VERTEX_SIZE: usize = 16;
pub const LINE_SIZE: usize = 4;
pub const DIRECTORY_SIZE: usize = 8;

fn offset(position: usize) -> LevelResult<u32> {
    u32::try_from(position).map_err(|_| LevelError::TooLarge { size: position })
}

impl Level {
    /// Encode the level into its on-disk byte layout.
    ///
    /// Fails if an offset does not fit the format's 32-bit fields.
    pub fn encode(&self) -> LevelResult<Vec<u8>> {
        let mut items = Vec::with_capacity(
            self.vertices.len() * VERTEX_SIZE + self.lines.len() * LINE_SIZE,
        );
        let mut directory = Vec::with_capacity(DIRECTORY_SIZE);

        for vertex in &self.vertices {
            serialize(vertex.x, &mut items);
            serialize(vertex.y, &mut items);
        }
        serialize(offset(HEADER_SIZE + items.len())?, &mut directory);

        for line in &self.lines {
            serialize(line.v0, &mut items);
            serialize(line.v1, &mut items);
        }
        serialize(offset(HEADER_SIZE + items.len())?, &mut directory);

        let mut bytes = Vec::with_capacity(HEADER_SIZE + items.len() + directory.len());
        serialize(offset(HEADER_SIZE + items.len())?, &mut bytes);
        bytes.extend_from_slice(&items);
        bytes.extend_from_slice(&directory);
        Ok(bytes)
    }

    /// Decode a level from its on-disk byte layout.
    ///
    /// Parsing happens into a fresh level; a malformed buffer yields an
    /// error and no partial result.
    pub fn decode(bytes: &[u8]) -> LevelResult<Level> {
        if bytes.is_empty() {
            return Err(LevelError::Empty);
        }

        let mut index = 0;
        let directory_offset: u32 = deserialize(bytes, &mut index)?;

        let mut directory_index = directory_offset as usize;
        let vertices_end: u32 = deserialize(bytes, &mut directory_index)?;
        let lines_end: u32 = deserialize(bytes, &mut directory_index)?;

        if vertices_end > lines_end || lines_end > directory_offset {
            return Err(LevelError::RegionOutOfBounds {
                vertices_end,
                lines_end,
                directory_offset,
            });
        }

        let mut vertices = Vec::new();
        while index < vertices_end as usize {
            let x: f64 = deserialize(bytes, &mut index)?;
            let y: f64 = deserialize(bytes, &mut index)?;
            vertices.push(Vertex::new(x, y));
        }

        let mut lines = Vec::new();
        while index < lines_end as usize {
            let v0: u16 = deserialize(bytes, &mut index)?;
            let v1: u16 = deserialize(bytes, &mut index)?;
            lines.push(Line { v0, v1 });
        }

        Ok(Level::from_parts(vertices, lines))
    }
}
