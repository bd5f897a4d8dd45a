/*
    This module writes rendered paths as SVG documents
*/

use std::fs;
use std::io;
use std::path::Path as FilePath;

use itertools::Itertools;
use log::info;

use crate::turtle::Path;

// Every path starts at the origin, where the turtle does
const PATH_START: &str = "M 0 0";

const NAMESPACES: &str = concat!(
    r#"xmlns="http://www.w3.org/2000/svg" "#,
    r#"xmlns:ev="http://www.w3.org/2001/xml-events" "#,
    r#"xmlns:xlink="http://www.w3.org/1999/xlink""#
);

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8" ?>"#;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub stroke: f64,
}

// The `d` attribute: every drawing command in order, skipping the movements
// which only turn or save the turtle
pub fn path_data(path: &Path) -> String {
    std::iter::once(PATH_START)
        .chain(path.segments.iter().map(|s| s.command.as_str()).filter(|c| !c.is_empty()))
        .join(" ")
}

pub fn document(path: &Path, canvas: &Canvas) -> String {
    format!(
        r#"<svg baseProfile="full" height="{}" version="1.1" viewBox="{}" width="{}" {}><defs /><path d="{}" fill="none" stroke="black" stroke-linecap="round" stroke-linejoin="round" stroke-width="{}" /></svg>"#,
        canvas.height,
        path.view_box,
        canvas.width,
        NAMESPACES,
        path_data(path),
        canvas.stroke
    )
}

pub fn save(svg: &str, file: &FilePath) -> io::Result<()> {
    fs::write(file, format!("{}\n{}", XML_DECLARATION, svg))?;
    info!("wrote {}", file.display());
    Ok(())
}
