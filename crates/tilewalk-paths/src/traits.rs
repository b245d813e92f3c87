use tilewalk_core::Point;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    ///
    /// Implementations must enumerate in a fixed order so that searches
    /// break ties between equal-length paths reproducibly.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

