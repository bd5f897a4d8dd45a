/*
    This module draws grids of curves from random start strings
*/

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::curves::*;
use crate::svg::{self, Canvas};

#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub kind: CurveKind,
    // How many random start strings to draw
    pub count: usize,
    pub seed: u64,
    // Each start string is drawn with 0..max_iters iterations
    pub max_iters: usize,
    // Symbols per start string
    pub length: usize,
    pub canvas: Canvas,
}

fn backup_path(dir: &Path) -> PathBuf {
    let name = dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    dir.with_file_name(format!("{}_BAK", name))
}

// Moves an existing output directory out of the way, replacing any older
// backup, and creates a fresh one
fn prepare_dir(dir: &Path) -> CurveResult<()> {
    if dir.exists() {
        let backup = backup_path(dir);
        if backup.exists() {
            fs::remove_dir_all(&backup).map_err(|e| file_error(e, backup.clone()))?;
        }
        fs::rename(dir, &backup).map_err(|e| file_error(e, dir.to_path_buf()))?;
        info!("moved {} to {}", dir.display(), backup.display());
    }

    fs::create_dir_all(dir).map_err(|e| file_error(e, dir.to_path_buf()))
}

// Draws the curved form of `count` random start strings, once for every
// iteration count below `max_iters`, into `<start>_iters<n>.svg` files.
// Returns the files written.
pub fn draw_random_curves(config: &BatchConfig, dir: &Path) -> CurveResult<Vec<PathBuf>> {
    prepare_dir(dir)?;

    let curve = Curve::with_canvas(config.kind, config.canvas)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut written = Vec::with_capacity(config.count * config.max_iters);

    for _ in 0..config.count {
        let start = curve.random_start(&mut rng, config.length);
        for iterations in 0..config.max_iters {
            let file = dir.join(format!("{}_iters{}.svg", start, iterations));
            let drawing = curve.draw_curved(iterations, Some(start.as_str()))?;
            svg::save(&drawing, &file).map_err(|e| file_error(e, file.clone()))?;
            written.push(file);
        }
    }

    return Ok(written);
}
