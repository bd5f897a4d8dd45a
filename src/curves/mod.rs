/*
    This module holds the built-in fractal curves: their grammars, the
    substitution passes which turn rewritten symbols into drawable ones, and
    the turtle each curve draws with
*/

use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::PathBuf;

use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error_handling::*;
use crate::grammar::substitution::{substitute, substitute_all, Substitutions};
use crate::grammar::Grammar;
use crate::parser::{parse_spec, SpecErrorType, SpecErrors};
use crate::svg::{self, Canvas};
use crate::turtle::{RenderError, RenderErrorType, Turtle};

#[derive(Debug)]
pub enum CurveErrorType {
    // A curve's grammar could not be parsed
    Spec(SpecErrorType),
    // A symbol sequence could not be drawn
    Render(RenderErrorType),
    // There was an issue with writing a file
    FileError(PathBuf, std::io::Error),
}

impl ErrorType for CurveErrorType {}

impl PartialEq for CurveErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CurveErrorType::Spec(a), CurveErrorType::Spec(b)) => a == b,
            (CurveErrorType::Render(a), CurveErrorType::Render(b)) => a == b,
            (CurveErrorType::FileError(a, e), CurveErrorType::FileError(b, f)) => a == b && e.kind() == f.kind(),
            _ => false
        }
    }
}

impl Display for CurveErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveErrorType::Spec(e) => write!(f, "Grammar error: {}", e),
            CurveErrorType::Render(e) => write!(f, "Render error: {}", e),
            CurveErrorType::FileError(file, e) => write!(f, "File error in {}: {}", file.display(), e),
        }
    }
}

pub type CurveError = Error<CurveErrorType>;
pub type CurveErrors = Errors<CurveErrorType>;
pub type CurveResult<T> = std::result::Result<T, CurveErrors>;

pub fn spec_errors(errors: SpecErrors) -> CurveErrors {
    errors.into_iter()
        .map(|e| CurveError { location: e.location, error: CurveErrorType::Spec(e.error) })
        .collect()
}

pub fn render_error(e: RenderError) -> CurveErrors {
    vec![CurveError { location: e.location, error: CurveErrorType::Render(e.error) }]
}

pub fn file_error(error: std::io::Error, file: PathBuf) -> CurveErrors {
    vec![CurveError::unlocated(CurveErrorType::FileError(file, error))]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CurveKind {
    Sierpinski,
    Dragon,
    Hilbert,
    FractalPeano,
    Hendragon,
}

type Passes = &'static [&'static Substitutions<'static>];

struct Recipe {
    rules: &'static str,
    start: &'static str,
    angle: f64,
    stride: f64,
    // applied straight after rewriting
    expansion: Passes,
    // turns pairs of straight strokes around a corner into arcs
    curving: Passes,
    // maps whatever is left onto the turtle's alphabet
    post_process: &'static Substitutions<'static>,
    filename: &'static str,
}

// Shared by every curve drawn with arcs: halve each stroke, then join the
// halves on either side of a turn into one arc
const SPLIT: &Substitutions<'static> = &[("F", "XX")];
const BEND: &Substitutions<'static> = &[("X+X", ")"), ("X-X", "(")];

static SIERPINSKI: Recipe = Recipe {
    rules: "A -> B - A - B; B -> A + B + A;",
    start: "A",
    angle: 60.0,
    stride: 50.0,
    expansion: &[],
    curving: &[&[("A", "F"), ("B", "F")], SPLIT, BEND],
    post_process: &[("A", "F"), ("B", "F"), ("X", "F")],
    filename: "sierpinski_curve.svg",
};

static DRAGON: Recipe = Recipe {
    rules: "F -> F + G; G -> F - G;",
    start: "F",
    angle: 90.0,
    stride: 50.0,
    expansion: &[],
    curving: &[&[("G", "F")], SPLIT, BEND],
    post_process: &[("F", "F"), ("G", "F"), ("X", "F")],
    filename: "dragon_curve.svg",
};

static HILBERT: Recipe = Recipe {
    rules: "A -> +BF-AFA-FB+; B -> -AF+BFB+FA-;",
    start: "A",
    angle: 90.0,
    stride: 10.0,
    expansion: &[],
    curving: &[
        &[("A", ""), ("B", ""), ("+-", ""), ("-+", "")],
        SPLIT,
        BEND,
        &[("X", "F")]
    ],
    post_process: &[("A", ""), ("B", "")],
    filename: "hilbert_curve.svg",
};

// Peano curve with the middle removed; `O` strokes are drawn with the pen up
static FRACTAL_PEANO: Recipe = Recipe {
    rules: "
        A -> AFBFA-F-BFCFB+F+AFBFA;
        B -> BFAFB+F+AFDFA-F-BFAFB;
        C -> CODOC-O-DOCOD+O+CODOC;
        D -> DOCOD+O+COCOC-O-DOCOD;
    ",
    start: "A",
    angle: 90.0,
    stride: 10.0,
    expansion: &[],
    curving: &[
        &[("A", ""), ("B", ""), ("C", ""), ("D", ""), ("+-", ""), ("-+", "")],
        &[("FO", "OO"), ("OF", "OO")],
        &[("F", "XX"), ("O", "YY")],
        BEND,
        &[("X", "F"), ("Y", "O")]
    ],
    post_process: &[("A", ""), ("B", ""), ("C", ""), ("D", "")],
    filename: "fractal_peano_curve.svg",
};

static HENDRAGON: Recipe = Recipe {
    rules: "
        M -> lFrFRFMFLFlFr;
        l -> lFRFrFLFlFlFr;
        r -> rFLFlFRFrFrFl;
        L -> rFlFLFRFLFlFr;
        R -> lFrFRFLFRFrFl;
    ",
    start: "M",
    angle: 60.0,
    stride: 10.0,
    expansion: &[&[("L", "ll"), ("R", "rr")]],
    curving: &[],
    post_process: &[("l", "L"), ("r", "R"), ("M", ""), ("F", "F"), ("+", "L"), ("-", "R")],
    filename: "hendragon_curve.svg",
};

impl CurveKind {
    fn recipe(&self) -> &'static Recipe {
        match self {
            CurveKind::Sierpinski => &SIERPINSKI,
            CurveKind::Dragon => &DRAGON,
            CurveKind::Hilbert => &HILBERT,
            CurveKind::FractalPeano => &FRACTAL_PEANO,
            CurveKind::Hendragon => &HENDRAGON,
        }
    }

    pub fn filename(&self) -> &'static str {
        self.recipe().filename
    }
}

pub const DEFAULT_CANVAS: Canvas = Canvas { width: 1000.0, height: 1000.0, stroke: 3.0 };

pub struct Curve {
    recipe: &'static Recipe,
    grammar: Grammar,
    turtle: Turtle,
    canvas: Canvas,
}

impl Curve {
    pub fn new(kind: CurveKind) -> CurveResult<Self> {
        Self::with_canvas(kind, DEFAULT_CANVAS)
    }

    pub fn with_canvas(kind: CurveKind, canvas: Canvas) -> CurveResult<Self> {
        let recipe = kind.recipe();
        let grammar = parse_spec(recipe.rules, recipe.start).map_err(spec_errors)?;
        let turtle = Turtle::simple(recipe.angle, recipe.stride, canvas.width)
            .map_err(|e| render_error(RenderError::unlocated(e)))?;

        Ok(Curve { recipe, grammar, turtle, canvas })
    }

    pub fn variables(&self) -> BTreeSet<char> {
        self.grammar.variables()
    }

    pub fn constants(&self) -> BTreeSet<char> {
        self.grammar.constants()
    }

    // Every symbol a start string may be made of
    pub fn alphabet(&self) -> BTreeSet<char> {
        let post_process_symbols = self.recipe.post_process.iter()
            .filter_map(|(pattern, _)| {
                let mut chars = pattern.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Some(symbol),
                    _ => None
                }
            });

        self.variables().into_iter()
            .chain(self.constants())
            .chain(post_process_symbols)
            .collect()
    }

    // Rewritten symbols, starting from the curve's own start symbol unless
    // another start string is given
    pub fn symbols(&self, iterations: usize, start: Option<&str>) -> String {
        let rewritten = match start {
            Some(start) => self.grammar.rewrite(start, iterations),
            None => self.grammar.run(iterations)
        };
        substitute_all(&rewritten, self.recipe.expansion)
    }

    pub fn curved_symbols(&self, iterations: usize, start: Option<&str>) -> String {
        substitute_all(&self.symbols(iterations, start), self.recipe.curving)
    }

    pub fn draw(&self, iterations: usize, start: Option<&str>) -> CurveResult<String> {
        self.draw_symbols(&self.symbols(iterations, start))
    }

    pub fn draw_curved(&self, iterations: usize, start: Option<&str>) -> CurveResult<String> {
        self.draw_symbols(&self.curved_symbols(iterations, start))
    }

    fn draw_symbols(&self, symbols: &str) -> CurveResult<String> {
        let drawable = substitute(symbols, self.recipe.post_process);
        let path = self.turtle.render(&drawable).map_err(render_error)?;
        Ok(svg::document(&path, &self.canvas))
    }

    // A start string of `length` symbols drawn uniformly from the alphabet
    pub fn random_start<R: Rng + ?Sized>(&self, rng: &mut R, length: usize) -> String {
        let alphabet: Vec<char> = self.alphabet().into_iter().collect();
        (0..length).filter_map(|_| alphabet.choose(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const ALL: [CurveKind; 5] = [
        CurveKind::Sierpinski,
        CurveKind::Dragon,
        CurveKind::Hilbert,
        CurveKind::FractalPeano,
        CurveKind::Hendragon
    ];

    #[test]
    fn dragon_symbols() {
        let dragon = Curve::new(CurveKind::Dragon).unwrap();
        assert_eq!(dragon.symbols(3, None), "F+G+F-G+F+G-F-G");
    }

    #[test]
    fn dragon_curved_symbols() {
        let dragon = Curve::new(CurveKind::Dragon).unwrap();
        let answers = vec!["XX", "X)X", "X))(X"];

        for (iterations, answer) in zip(0.., answers) {
            assert_eq!(dragon.curved_symbols(iterations, None), answer);
        }
    }

    #[test]
    fn sierpinski_curved_symbols() {
        let sierpinski = Curve::new(CurveKind::Sierpinski).unwrap();
        assert_eq!(sierpinski.curved_symbols(1, None), "X((X");
    }

    #[test]
    fn hilbert_curved_symbols() {
        let hilbert = Curve::new(CurveKind::Hilbert).unwrap();
        assert_eq!(hilbert.symbols(1, None), "+BF-AFA-FB+");
        assert_eq!(hilbert.curved_symbols(1, None), "+F((F+");
    }

    #[test]
    fn hendragon_expands_turns() {
        let hendragon = Curve::new(CurveKind::Hendragon).unwrap();
        assert_eq!(hendragon.symbols(1, None), "lFrFrrFMFllFlFr");
    }

    #[test]
    fn symbols_from_other_start() {
        let sierpinski = Curve::new(CurveKind::Sierpinski).unwrap();
        assert_eq!(sierpinski.symbols(1, Some("AA")), "B-A-BB-A-B");
    }

    #[test]
    fn sierpinski_sets() {
        let sierpinski = Curve::new(CurveKind::Sierpinski).unwrap();
        assert_eq!(sierpinski.variables(), BTreeSet::from(['A', 'B']));
        assert_eq!(sierpinski.constants(), BTreeSet::from(['+', '-']));
        assert_eq!(sierpinski.alphabet(), BTreeSet::from(['+', '-', 'A', 'B', 'X']));
    }

    #[test]
    fn every_curve_draws() {
        for kind in ALL {
            let curve = Curve::new(kind).unwrap();
            for iterations in 0..3 {
                let svg = curve.draw(iterations, None).unwrap();
                assert!(svg.starts_with("<svg "), "{:?} failed to draw", kind);

                let curved = curve.draw_curved(iterations, None).unwrap();
                assert!(curved.starts_with("<svg "), "{:?} failed to draw curved", kind);
            }
        }
    }

    #[test]
    fn curved_dragon_uses_arcs() {
        let dragon = Curve::new(CurveKind::Dragon).unwrap();
        let svg = dragon.draw_curved(2, None).unwrap();
        assert!(svg.contains(" A 50.0000 50.0000 "));
    }

    #[test]
    fn random_start_is_reproducible() {
        let curve = Curve::new(CurveKind::Sierpinski).unwrap();
        let alphabet = curve.alphabet();

        let first = curve.random_start(&mut StdRng::seed_from_u64(42), 10);
        let second = curve.random_start(&mut StdRng::seed_from_u64(42), 10);

        assert_eq!(first, second);
        assert_eq!(first.chars().count(), 10);
        assert!(first.chars().all(|c| alphabet.contains(&c)));
    }

    #[test]
    fn random_starts_draw() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in ALL {
            let curve = Curve::new(kind).unwrap();
            for _ in 0..5 {
                let start = curve.random_start(&mut rng, 10);
                assert!(curve.draw_curved(2, Some(start.as_str())).is_ok(), "{:?} failed on {}", kind, start);
            }
        }
    }

    #[test]
    fn file_errors_compare_by_kind() {
        let a = CurveErrorType::FileError(PathBuf::from("a"), std::io::Error::from(std::io::ErrorKind::NotFound));
        let b = CurveErrorType::FileError(PathBuf::from("a"), std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(a, b);
    }
}
