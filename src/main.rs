mod batch;
mod cli;
mod curves;
mod error_handling;
mod grammar;
mod parser;
mod svg;
mod turtle;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use log::debug;

use batch::BatchConfig;
use cli::{Cli, Command, SymbolArgs};
use curves::*;

fn curve_symbols(curve: &Curve, args: &SymbolArgs) -> String {
    let start = args.start.as_deref();
    if args.curved {
        curve.curved_symbols(args.iterations, start)
    } else {
        curve.symbols(args.iterations, start)
    }
}

fn run(command: Command) -> CurveResult<()> {
    match command {
        Command::Draw { curve: kind, symbols, canvas, output, write } => {
            let curve = Curve::with_canvas(kind, canvas.canvas())?;
            let start = symbols.start.as_deref();
            let drawing = if symbols.curved {
                curve.draw_curved(symbols.iterations, start)?
            } else {
                curve.draw(symbols.iterations, start)?
            };

            let file = output.or_else(|| write.then(|| PathBuf::from(kind.filename())));
            match file {
                Some(file) => svg::save(&drawing, &file).map_err(|e| file_error(e, file.clone()))?,
                None => println!("{}", drawing)
            }
        }
        Command::Symbols { curve: kind, symbols } => {
            let curve = Curve::new(kind)?;
            println!("{}", curve_symbols(&curve, &symbols));
        }
        Command::Grammar { spec, start, iterations } => {
            let grammar = parser::parse_spec(&spec, &start).map_err(spec_errors)?;
            debug!("rewriting `{}` {} times", grammar.start_symbol(), iterations);
            println!("{}", grammar.run(iterations));
            println!("variables: {}", grammar.variables().iter().join(" "));
            println!("constants: {}", grammar.constants().iter().join(" "));
        }
        Command::Batch { curve, dir, count, seed, max_iters, length, canvas } => {
            let config = BatchConfig {
                kind: curve,
                count,
                seed,
                max_iters,
                length,
                canvas: canvas.canvas()
            };
            let written = batch::draw_random_curves(&config, &dir)?;
            println!("Wrote {} curves to {}", written.len(), dir.display());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            ExitCode::FAILURE
        }
    }
}
