//! The editable map: a sequence of vertices joined by undirected lines.
//!
//! Lines refer to vertices by position, so every structural change to the
//! vertex sequence rewrites the line endpoints that follow it.

mod format;
mod store;

pub use format::{DIRECTORY_SIZE, HEADER_SIZE, LINE_SIZE, VERTEX_SIZE};
pub use store::{LevelError, LevelResult, LevelStore};

/// A point in world space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Vertex) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An undirected edge between two vertex indices.
///
/// Lines built through [`Line::new`] keep the smaller index in `v0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub v0: u16,
    pub v1: u16,
}

impl Line {
    /// Canonical line between `a` and `b`
    pub fn new(a: u16, b: u16) -> Self {
        Self {
            v0: a.min(b),
            v1: a.max(b),
        }
    }

    pub fn is_loop(&self) -> bool {
        self.v0 == self.v1
    }

    /// True if this line joins `a` and `b`, in either order
    pub fn joins(&self, a: u16, b: u16) -> bool {
        (self.v0 == a && self.v1 == b) || (self.v0 == b && self.v1 == a)
    }

    pub fn touches(&self, index: usize) -> bool {
        usize::from(self.v0) == index || usize::from(self.v1) == index
    }

    pub fn canonical(&self) -> Self {
        Self::new(self.v0, self.v1)
    }
}

/// Vertices and lines of one map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    vertices: Vec<Vertex>,
    lines: Vec<Line>,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn vertex(&self, index: usize) -> Option<Vertex> {
        self.vertices.get(index).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.lines.is_empty()
    }

    /// Drop every vertex and line
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.lines.clear();
    }

    /// Append a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Add the line `(v0, v1)` in canonical form.
    ///
    /// Self-loops and lines already present (in either order) are rejected.
    pub fn add_line(&mut self, v0: u16, v1: u16) -> bool {
        let line = Line::new(v0, v1);
        if line.is_loop() || self.lines.iter().any(|l| l.joins(v0, v1)) {
            return false;
        }
        self.lines.push(line);
        true
    }

    pub fn contains_line(&self, v0: u16, v1: u16) -> bool {
        self.lines.iter().any(|l| l.joins(v0, v1))
    }

    /// Remove the vertex at `index` together with every line touching it.
    pub fn remove_vertex(&mut self, index: usize) -> bool {
        self.take_vertex(index).is_some()
    }

    /// Remove the vertex at `index`, returning it and the lines that were
    /// deleted with it (in their pre-removal numbering).
    ///
    /// Endpoints above `index` move down by one.
    pub fn take_vertex(&mut self, index: usize) -> Option<(Vertex, Vec<Line>)> {
        if index >= self.vertices.len() {
            return None;
        }

        let vertex = self.vertices.remove(index);
        let mut removed = Vec::new();
        self.lines.retain_mut(|line| {
            if line.touches(index) {
                removed.push(*line);
                return false;
            }
            if usize::from(line.v0) > index {
                line.v0 -= 1;
            }
            if usize::from(line.v1) > index {
                line.v1 -= 1;
            }
            true
        });

        Some((vertex, removed))
    }

    /// Insert a vertex at `index`, moving endpoints at or above it up by one.
    ///
    /// This is the inverse of [`Level::take_vertex`]; lines touching the new
    /// vertex must be added back separately.
    pub fn insert_vertex(&mut self, index: usize, vertex: Vertex) -> bool {
        if index > self.vertices.len() || self.vertices.len() > usize::from(u16::MAX) {
            return false;
        }

        self.vertices.insert(index, vertex);
        for line in &mut self.lines {
            if usize::from(line.v0) >= index {
                line.v0 = line.v0.saturating_add(1);
            }
            if usize::from(line.v1) >= index {
                line.v1 = line.v1.saturating_add(1);
            }
        }
        true
    }

    /// Remove the first line joining `v0` and `v1`, in either order
    pub fn remove_line(&mut self, v0: u16, v1: u16) -> bool {
        match self.lines.iter().position(|l| l.joins(v0, v1)) {
            Some(position) => {
                self.lines.remove(position);
                true
            }
            None => false,
        }
    }

    /// Lines with an endpoint at `index`
    pub fn lines_touching(&self, index: usize) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(move |line| line.touches(index))
    }

    /// Index of the vertex closest to `point` within `radius`
    pub fn nearest_vertex(&self, point: Vertex, radius: f64) -> Option<usize> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| (index, vertex.distance_to(point)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// The line closest to `point` within `radius`
    pub fn nearest_line(&self, point: Vertex, radius: f64) -> Option<Line> {
        self.lines
            .iter()
            .filter_map(|line| {
                let a = self.vertex(usize::from(line.v0))?;
                let b = self.vertex(usize::from(line.v1))?;
                Some((*line, segment_distance(point, a, b)))
            })
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(line, _)| line)
    }

    /// Replace this level with the one stored under `name`.
    ///
    /// Nothing changes unless the whole file parses.
    pub fn load(&mut self, store: &LevelStore, name: &str) -> LevelResult<()> {
        *self = store.load(name)?;
        Ok(())
    }

    pub fn save(&self, store: &LevelStore, name: &str) -> LevelResult<()> {
        store.save(self, name)
    }

    pub(crate) fn from_parts(vertices: Vec<Vertex>, lines: Vec<Line>) -> Self {
        Self { vertices, lines }
    }
}

fn segment_distance(p: Vertex, a: Vertex, b: Vertex) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    p.distance_to(Vertex::new(a.x + t * dx, a.y + t * dy))
}
