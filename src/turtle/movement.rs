use std::f64::consts::{PI, TAU};

use super::{Cursor, PathSegment, RenderErrorType, Result, TurtleState};

// A single turtle instruction. Parameterised movements are only built through
// the constructors below, which validate them and flip the sign of angles
// (the drawing surface has its y axis pointing down).
#[derive(Debug, Clone, PartialEq)]
pub enum Movement {
    Line(Line),
    Rotation(Rotation),
    Arc(Arc),
    PushPosition,
    PopPosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    length: f64,
    draw: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    angle: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    angle: f64,
    rx: f64,
    ry: f64,
}

impl Movement {
    pub fn line(length: f64, draw: bool) -> Self {
        Movement::Line(Line { length, draw })
    }

    pub fn rotation(angle: f64) -> Self {
        Movement::Rotation(Rotation { angle: -angle })
    }

    pub fn arc(angle: f64, radius: f64) -> Result<Self> {
        Self::elliptical_arc(angle, radius, radius)
    }

    pub fn elliptical_arc(angle: f64, rx: f64, ry: f64) -> Result<Self> {
        if angle == 0.0 || !(angle.abs() < 360.0) {
            return Err(RenderErrorType::InvalidArcAngle(angle));
        }
        for radius in [rx, ry] {
            if radius == 0.0 || !radius.is_finite() {
                return Err(RenderErrorType::InvalidArcRadius(radius));
            }
        }
        Ok(Movement::Arc(Arc { angle: -angle, rx, ry }))
    }

    // Applies this movement to the turtle, returning the drawn segment and the
    // state the next movement starts from
    pub fn generate(&self, state: TurtleState) -> Result<(PathSegment, TurtleState)> {
        let TurtleState { cursor: start, mut stack } = state;

        let (command, end) = match self {
            Movement::Line(Line { length, draw }) => line(&start, *length, *draw),
            Movement::Rotation(Rotation { angle }) => (String::new(), Cursor { dir: start.dir + *angle, ..start }),
            Movement::Arc(Arc { angle, rx, ry }) => arc(&start, *angle, *rx, *ry),
            Movement::PushPosition => {
                stack.push(start);
                (String::new(), start)
            }
            Movement::PopPosition => {
                let saved = stack.pop().ok_or(RenderErrorType::StackUnderflow)?;
                (format!("M {:.4} {:.4}", saved.x, saved.y), saved)
            }
        };

        let segment = PathSegment { start, end, command };
        Ok((segment, TurtleState { cursor: end, stack }))
    }
}

fn line(start: &Cursor, length: f64, draw: bool) -> (String, Cursor) {
    let rad = start.dir.to_radians();
    let x_end = start.x + length * rad.cos();
    let y_end = start.y + length * rad.sin();
    let cmd = if draw { "L" } else { "M" };

    (format!("{} {:.4} {:.4}", cmd, x_end, y_end), Cursor { x: x_end, y: y_end, dir: start.dir })
}

// The end point of an elliptical arc which leaves `start` along its heading.
// The branch correction for |angle| in (90, 270) keeps the atan result on the
// side of the asymptote the arc actually ends on.
fn arc_end(start: &Cursor, angle: f64, rx: f64, ry: f64) -> (f64, f64) {
    let rad_dir = start.dir.to_radians();

    let mut rad_angle = (angle.to_radians().tan() * rx / ry).atan().rem_euclid(TAU);
    if angle.abs() > 90.0 && angle.abs() < 270.0 {
        rad_angle = (rad_angle + PI).rem_euclid(TAU);
    }
    if angle < 0.0 {
        rad_angle -= TAU;
    }

    let dx = rx * rad_angle.abs().sin();
    // turning left or right decides which side the centre lies on
    let dy = (ry - ry * rad_angle.cos()) * angle.signum();

    (
        start.x + dx * rad_dir.cos() - dy * rad_dir.sin(),
        start.y + dx * rad_dir.sin() + dy * rad_dir.cos()
    )
}

fn arc(start: &Cursor, angle: f64, rx: f64, ry: f64) -> (String, Cursor) {
    let (x_end, y_end) = arc_end(start, angle, rx, ry);
    let large_arc = if angle.abs() > 180.0 { 1 } else { 0 };
    let sweep = if angle > 0.0 { 1 } else { 0 };

    let d = format!(
        "A {:.4} {:.4} {} {} {} {:.4} {:.4}",
        rx, ry, start.dir, large_arc, sweep, x_end, y_end
    );
    (d, Cursor { x: x_end, y: y_end, dir: start.dir + angle })
}
