//! Cubic Bézier interpolation with an owned memoization cache

use crate::Point;
use rustc_hash::FxHashMap;

/// Default number of memoized samples before the cache is flushed
pub const DEFAULT_BEZIER_CAPACITY: usize = 1024;

/// A cubic Bézier curve given by four control points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the curve at `t` using the Bernstein form.
    ///
    /// At `t = 0` and `t = 1` every weight but one is exactly zero, so the
    /// end control points come back bit-for-bit.
    pub fn point_at(&self, t: f32) -> Point {
        let u = 1.0 - t;
        let w0 = u * u * u;
        let w1 = 3.0 * t * u * u;
        let w2 = 3.0 * t * t * u;
        let w3 = t * t * t;

        Point {
            x: w0 * self.p0.x + w1 * self.p1.x + w2 * self.p2.x + w3 * self.p3.x,
            y: w0 * self.p0.y + w1 * self.p1.y + w2 * self.p2.y + w3 * self.p3.y,
        }
    }

    fn key(&self, t: f32) -> [u32; 9] {
        [
            self.p0.x.to_bits(),
            self.p0.y.to_bits(),
            self.p1.x.to_bits(),
            self.p1.y.to_bits(),
            self.p2.x.to_bits(),
            self.p2.y.to_bits(),
            self.p3.x.to_bits(),
            self.p3.y.to_bits(),
            t.to_bits(),
        ]
    }
}

/// Bounded memo of Bézier samples.
///
/// Owned by whoever samples curves; there is no process-wide cache. When the
/// cache reaches its capacity it is flushed wholesale.
#[derive(Debug, Clone)]
pub struct BezierCache {
    entries: FxHashMap<[u32; 9], Point>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for BezierCache {
    fn default() -> Self {
        Self::new(DEFAULT_BEZIER_CAPACITY)
    }
}

impl BezierCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Sample `curve` at `t`, reusing a previous result when available
    pub fn point_at(&mut self, curve: &CubicBezier, t: f32) -> Point {
        let key = curve.key(t);
        if let Some(point) = self.entries.get(&key) {
            self.hits += 1;
            return *point;
        }

        self.misses += 1;
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        let point = curve.point_at(t);
        self.entries.insert(key, point);
        point
    }

    /// Sample `steps + 1` evenly spaced points from `t = 0` to `t = 1`
    pub fn sample(&mut self, curve: &CubicBezier, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| self.point_at(curve, i as f32 / steps as f32))
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
