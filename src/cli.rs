use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::curves::CurveKind;
use crate::svg::Canvas;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command
}

#[derive(Subcommand)]
pub enum Command {
    /// Draw a curve as SVG
    Draw {
        #[arg(value_enum)]
        curve: CurveKind,

        #[command(flatten)]
        symbols: SymbolArgs,

        #[command(flatten)]
        canvas: CanvasArgs,

        /// File to write the SVG to (default: print it)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write to the curve's default file name
        #[arg(short, long, conflicts_with = "output")]
        write: bool
    },

    /// Print the symbols a curve is drawn from
    Symbols {
        #[arg(value_enum)]
        curve: CurveKind,

        #[command(flatten)]
        symbols: SymbolArgs
    },

    /// Rewrite a grammar given on the command line, e.g. "A -> B-A-B; B -> A+B+A"
    Grammar {
        /// Rules separated by `;`
        spec: String,

        /// Start symbols
        #[arg(short, long, value_name = "SYMBOLS")]
        start: String,

        /// Number of rewriting iterations
        #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 1)]
        iterations: usize
    },

    /// Draw curves from random start strings into a directory
    Batch {
        #[arg(value_enum)]
        curve: CurveKind,

        /// Output directory (an existing one is moved to <DIR>_BAK)
        dir: PathBuf,

        /// Number of random start strings
        #[arg(short, long, default_value_t = 20)]
        count: usize,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Every start string is drawn with 0 up to this many iterations (exclusive)
        #[arg(long, value_name = "AMOUNT", default_value_t = 4)]
        max_iters: usize,

        /// Symbols per start string
        #[arg(long, default_value_t = 10)]
        length: usize,

        #[command(flatten)]
        canvas: CanvasArgs
    }
}

#[derive(Args)]
pub struct SymbolArgs {
    /// Number of rewriting iterations
    #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 4)]
    pub iterations: usize,

    /// Start symbols (default: the curve's own)
    #[arg(short, long, value_name = "SYMBOLS")]
    pub start: Option<String>,

    /// Replace corners with arcs
    #[arg(long)]
    pub curved: bool
}

#[derive(Args)]
pub struct CanvasArgs {
    /// Width and height of the image
    #[arg(long, value_name = "PIXELS", default_value_t = 1000.0)]
    pub size: f64,

    /// Line width
    #[arg(long, value_name = "PIXELS", default_value_t = 3.0)]
    pub stroke: f64
}

impl CanvasArgs {
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.size,
            height: self.size,
            stroke: self.stroke
        }
    }
}
