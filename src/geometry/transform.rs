//! Transform values and their CSS string composition

use crate::Point;
use smallvec::SmallVec;
use std::fmt::Write;

/// A 2x3 affine matrix in CSS `matrix(a, b, c, d, e, f)` order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Matrix2D {
    pub const IDENTITY: Matrix2D = Matrix2D {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Rotation by `angle` followed by a translation to `origin`:
    /// `[cos, sin, -sin, cos, origin.x, origin.y]`
    pub fn fold(angle: f32, origin: Point) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: origin.x,
            f: origin.y,
        }
    }

    /// Column-major 4x4 form as used by CSS `matrix3d`.
    ///
    /// The added z axis carries no translation and unit scale, so the result
    /// maps the plane exactly like the 2D form.
    pub fn to_3d(&self) -> [f32; 16] {
        [
            self.a, self.b, 0.0, 0.0, //
            self.c, self.d, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            self.e, self.f, 0.0, 1.0,
        ]
    }

    pub fn apply(&self, point: Point) -> Point {
        Point {
            x: self.a * point.x + self.c * point.y + self.e,
            y: self.b * point.x + self.d * point.y + self.f,
        }
    }
}

/// A single CSS transform function
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate { x: f32, y: f32 },
    Translate3d { x: f32, y: f32, z: f32 },
    Rotate { radians: f32 },
    Matrix(Matrix2D),
    Matrix3d([f32; 16]),
}

impl TransformOp {
    fn write_css(&self, out: &mut String) {
        // Writing into a String cannot fail
        let _ = match self {
            TransformOp::Translate { x, y } => write!(out, "translate({}px, {}px)", x, y),
            TransformOp::Translate3d { x, y, z } => {
                write!(out, "translate3d({}px, {}px, {}px)", x, y, z)
            }
            TransformOp::Rotate { radians } => write!(out, "rotate({}rad)", radians),
            TransformOp::Matrix(m) => write!(
                out,
                "matrix({}, {}, {}, {}, {}, {})",
                m.a, m.b, m.c, m.d, m.e, m.f
            ),
            TransformOp::Matrix3d(values) => {
                out.push_str("matrix3d(");
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{}", v);
                }
                out.push(')');
                Ok(())
            }
        };
    }
}

/// An ordered list of transform functions plus an optional transform origin
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transform {
    ops: SmallVec<[TransformOp; 2]>,
    origin: Option<Point>,
}

impl Transform {
    /// The neutral transform (renders as `none`)
    pub fn identity() -> Self {
        Self::default()
    }

    /// Fold matrix for page-relative folds.
    ///
    /// With `accelerated` the matrix is emitted in its 4x4 form so the
    /// renderer can take a 3D compositing path.
    pub fn fold_matrix(angle: f32, origin: Point, accelerated: bool) -> Self {
        let matrix = Matrix2D::fold(angle, origin);
        let op = if accelerated {
            TransformOp::Matrix3d(matrix.to_3d())
        } else {
            TransformOp::Matrix(matrix)
        };
        Self::identity().then(op)
    }

    /// Pure rotation about `origin`, for corner-relative folds
    pub fn rotation(angle: f32, origin: Point, accelerated: bool) -> Self {
        let mut transform = Self::identity().then(TransformOp::Rotate { radians: angle });
        if accelerated {
            transform = transform.then(TransformOp::Translate3d {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            });
        }
        transform.with_origin(origin)
    }

    /// Append a transform function
    pub fn then(mut self, op: TransformOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Append every function of `other`; `other`'s origin wins if set
    pub fn compose(mut self, other: &Transform) -> Self {
        self.ops.extend(other.ops.iter().copied());
        if other.origin.is_some() {
            self.origin = other.origin;
        }
        self
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// CSS `transform` value
    pub fn to_css(&self) -> String {
        if self.ops.is_empty() {
            return "none".to_string();
        }

        let mut out = String::new();
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            op.write_css(&mut out);
        }
        out
    }

    /// CSS `transform-origin` value, if an origin was set
    pub fn origin_css(&self) -> Option<String> {
        self.origin.map(|o| format!("{}px {}px", o.x, o.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_renders_none() {
        assert_eq!(Transform::identity().to_css(), "none");
        assert!(Transform::identity().is_identity());
        assert_eq!(Transform::identity().origin_css(), None);
    }

    #[test]
    fn test_fold_matrix_layout() {
        let m = Matrix2D::fold(0.0, Point { x: 10.0, y: 20.0 });
        assert_eq!(
            m,
            Matrix2D {
                a: 1.0,
                b: 0.0,
                c: -0.0,
                d: 1.0,
                e: 10.0,
                f: 20.0
            }
        );

        let css = Transform::fold_matrix(0.0, Point { x: 10.0, y: 20.0 }, false).to_css();
        assert_eq!(css, "matrix(1, 0, -0, 1, 10, 20)");
    }

    #[test]
    fn test_accelerated_matrix_is_equivalent() {
        let m = Matrix2D::fold(0.7, Point { x: 3.0, y: -4.0 });
        let m3 = m.to_3d();
        let p = Point { x: 5.0, y: 2.0 };
        let flat = m.apply(p);

        // Column-major: x' = m[0]x + m[4]y + m[12], y' = m[1]x + m[5]y + m[13]
        let x = m3[0] * p.x + m3[4] * p.y + m3[12];
        let y = m3[1] * p.x + m3[5] * p.y + m3[13];
        assert!((x - flat.x).abs() < 1e-5);
        assert!((y - flat.y).abs() < 1e-5);
        assert_eq!(m3[10], 1.0);
        assert_eq!(m3[15], 1.0);
        assert_eq!(m3[14], 0.0);

        let css = Transform::fold_matrix(0.7, Point::default(), true).to_css();
        assert!(css.starts_with("matrix3d("));
    }

    #[test]
    fn test_rotation_about_origin() {
        let t = Transform::rotation(FRAC_PI_2, Point { x: 0.0, y: 100.0 }, false);
        assert_eq!(t.ops().len(), 1);
        assert_eq!(t.origin_css().as_deref(), Some("0px 100px"));
        assert!(t.to_css().starts_with("rotate("));

        let accelerated = Transform::rotation(FRAC_PI_2, Point::default(), true);
        assert!(accelerated.to_css().ends_with("translate3d(0px, 0px, 0px)"));
    }

    #[test]
    fn test_compose() {
        let base = Transform::identity().then(TransformOp::Translate { x: 5.0, y: 0.0 });
        let rot = Transform::rotation(0.5, Point { x: 1.0, y: 2.0 }, false);
        let composed = base.compose(&rot);
        assert_eq!(composed.ops().len(), 2);
        assert_eq!(composed.origin(), Some(Point { x: 1.0, y: 2.0 }));
        assert_eq!(composed.to_css(), "translate(5px, 0px) rotate(0.5rad)");
    }
}
