//! Spring edge types.
//!
//! Every undirected mesh edge becomes one spring. An edge is identified by
//! its canonical key, the ordered index pair with `start < end`, so the two
//! faces sharing an interior edge map to the same spring.

use std::fmt;

use glam::Vec3;

/// Canonical identifier of an undirected edge: `(start, end)` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    start: u32,
    end: u32,
}

impl EdgeKey {
    /// Create the canonical key for the edge between `a` and `b`, in either order.
    #[inline]
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Lower vertex index.
    #[inline]
    pub fn start(self) -> u32 {
        self.start
    }

    /// Higher vertex index.
    #[inline]
    pub fn end(self) -> u32 {
        self.end
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({}, {})", self.start, self.end)
    }
}

impl From<(u32, u32)> for EdgeKey {
    #[inline]
    fn from((a, b): (u32, u32)) -> Self {
        Self::new(a, b)
    }
}

/// A spring between two vertices with the length it had at initialization.
///
/// Immutable once extracted; the simulation only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringEdge {
    /// Lower vertex index
    pub start: u32,
    /// Higher vertex index
    pub end: u32,
    /// Distance between the endpoints at initialization
    pub rest_length: f32,
}

impl SpringEdge {
    /// Create a spring for `key`, measuring its rest length from `positions`.
    #[inline]
    pub fn at_rest(key: EdgeKey, positions: &[Vec3]) -> Self {
        let rest_length = positions[key.end as usize].distance(positions[key.start as usize]);
        Self {
            start: key.start,
            end: key.end,
            rest_length,
        }
    }

    /// Canonical key of this spring.
    #[inline]
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            start: self.start,
            end: self.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_is_canonical() {
        assert_eq!(EdgeKey::new(5, 2), EdgeKey::new(2, 5));
        let key = EdgeKey::new(5, 2);
        assert_eq!(key.start(), 2);
        assert_eq!(key.end(), 5);
        assert_eq!(format!("{}", key), "Edge(2, 5)");
    }

    #[test]
    fn test_edge_key_from_tuple() {
        let key: EdgeKey = (9, 1).into();
        assert_eq!(key, EdgeKey::new(1, 9));
    }

    #[test]
    fn test_spring_at_rest() {
        let positions = [Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)];
        let spring = SpringEdge::at_rest(EdgeKey::new(1, 0), &positions);
        assert_eq!(spring.start, 0);
        assert_eq!(spring.end, 1);
        assert_eq!(spring.rest_length, 5.0);
        assert_eq!(spring.key(), EdgeKey::new(0, 1));
    }
}
