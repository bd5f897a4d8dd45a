/*
    This module turns symbol sequences into path segments
*/

mod movement;

pub use movement::Movement;

use std::collections::HashMap;
use std::fmt::Display;

use log::{debug, warn};

use crate::error_handling::*;

#[derive(Debug, PartialEq)]
pub enum RenderErrorType {
    // A symbol has no entry in the movement table
    UndefinedSymbol(char),
    // Arcs need an angle in (-360, 360), excluding 0
    InvalidArcAngle(f64),
    // Arc radii must be finite and non-zero
    InvalidArcRadius(f64),
    // PopPosition without a matching PushPosition
    StackUnderflow,
}

impl ErrorType for RenderErrorType {}

impl Display for RenderErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderErrorType::UndefinedSymbol(symbol) => write!(f, "`{}` not defined in movement table", symbol),
            RenderErrorType::InvalidArcAngle(angle) => write!(f, "Arc angle {} needs to be in (-360, 360), but not 0", angle),
            RenderErrorType::InvalidArcRadius(radius) => write!(f, "Arc radius {} needs to be finite and not 0", radius),
            RenderErrorType::StackUnderflow => write!(f, "PopPosition without corresponding PushPosition"),
        }
    }
}

pub type RenderError = Error<RenderErrorType>;

pub type Result<T> = std::result::Result<T, RenderErrorType>;
pub type RenderResult<T> = std::result::Result<T, RenderError>;

// Share of the canvas size added around the drawing on each side
pub const MARGIN_RATIO: f64 = 0.1;

// Headings are in degrees, 0 pointing along +x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
    pub dir: f64,
}

impl Cursor {
    pub fn new(x: f64, y: f64, dir: f64) -> Self {
        Cursor { x, y, dir }
    }

    #[cfg(test)]
    pub fn is_close(&self, other: &Cursor) -> bool {
        (self.x - other.x).abs() < 1e-10
            && (self.y - other.y).abs() < 1e-10
            && (self.dir - other.dir).abs() < 1e-10
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cursor(x={:.4}, y={:.4}, dir={:.4})", self.x, self.y, self.dir)
    }
}

pub type PositionStack = Vec<Cursor>;

// Everything a movement reads and may change
#[derive(Debug, Clone, PartialEq)]
pub struct TurtleState {
    pub cursor: Cursor,
    pub stack: PositionStack,
}

impl TurtleState {
    pub fn new(cursor: Cursor) -> Self {
        TurtleState { cursor, stack: PositionStack::new() }
    }
}

// One movement's output. The command is absolute SVG path syntax and is
// empty for movements which draw nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub start: Cursor,
    pub end: Cursor,
    pub command: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub fn include(&mut self, cursor: &Cursor) {
        self.xmin = self.xmin.min(cursor.x);
        self.xmax = self.xmax.max(cursor.x);
        self.ymin = self.ymin.min(cursor.y);
        self.ymax = self.ymax.max(cursor.y);
    }

    pub fn with_margin(&self, width: f64, height: f64) -> ViewBox {
        ViewBox {
            x: self.xmin - width * MARGIN_RATIO,
            y: self.ymin - height * MARGIN_RATIO,
            width: self.xmax - self.xmin + width * 2.0 * MARGIN_RATIO,
            height: self.ymax - self.ymin + height * 2.0 * MARGIN_RATIO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Display for ViewBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub segments: Vec<PathSegment>,
    pub bounds: BoundingBox,
    pub view_box: ViewBox,
}

pub type MovementTable = HashMap<char, Movement>;

#[derive(Debug, Clone)]
pub struct Turtle {
    movements: MovementTable,
    width: f64,
    height: f64,
    start_direction: f64,
}

impl Turtle {
    pub fn new(movements: MovementTable, width: f64, height: f64, start_direction: f64) -> Self {
        Turtle {
            movements,
            width,
            height,
            // negated like every other angle; adding 0 turns -0 into 0
            start_direction: -start_direction + 0.0,
        }
    }

    // The movement table every built-in curve draws with
    pub fn simple(angle: f64, stride: f64, size: f64) -> Result<Self> {
        let movements = MovementTable::from([
            ('O', Movement::line(stride, false)),
            ('F', Movement::line(stride, true)),
            ('+', Movement::rotation(angle)),
            ('-', Movement::rotation(-angle)),
            ('L', Movement::rotation(angle)),
            ('R', Movement::rotation(-angle)),
            (')', Movement::arc(angle, stride)?),
            ('(', Movement::arc(-angle, stride)?),
            ('[', Movement::PushPosition),
            (']', Movement::PopPosition),
        ]);
        Ok(Turtle::new(movements, size, size, 0.0))
    }

    // Folds the movements of every symbol over a fresh turtle at the origin.
    // Any error discards everything drawn so far.
    pub fn render(&self, symbols: &str) -> RenderResult<Path> {
        let mut state = TurtleState::new(Cursor::new(0.0, 0.0, self.start_direction));
        let mut segments = Vec::with_capacity(symbols.len());
        let mut bounds = BoundingBox::default();

        for (index, symbol) in symbols.chars().enumerate() {
            let located = |error| RenderError { location: Location::Symbol(index), error };

            let movement = self.movements
                .get(&symbol)
                .ok_or_else(|| located(RenderErrorType::UndefinedSymbol(symbol)))?;
            let (segment, next) = movement.generate(state).map_err(located)?;

            bounds.include(&segment.end);
            segments.push(segment);
            state = next;
        }

        if !state.stack.is_empty() {
            warn!("{} saved positions were never restored", state.stack.len());
        }
        debug!("rendered {} segments within {:?}", segments.len(), bounds);

        Ok(Path {
            segments,
            bounds,
            view_box: bounds.with_margin(self.width, self.height),
        })
    }
}
