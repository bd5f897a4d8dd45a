use std::fmt::Display;

pub trait ErrorType: Display + PartialEq {}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Location {
    // 1-based rule number inside a grammar spec
    Rule(usize),
    // 0-based index into a rendered symbol sequence
    Symbol(usize),
    None
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Rule(rule) => write!(f, "rule {}", rule),
            Location::Symbol(index) => write!(f, "symbol {}", index),
            Location::None => write!(f, "-")
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    pub fn unlocated(error: T) -> Self {
        Error {
            location: Location::None,
            error
        }
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;
