//! Turns a line of text into a banner for use as a comment heading.
//!
//! `Foo` becomes `#####...#####  Foo  #####...#####`.

use std::io::BufRead;

use anyhow::{bail, Context, Result};

pub const DEFAULT_GARMENT: &str = "#";
pub const DEFAULT_LINE_WIDTH: usize = 80;
pub const DEFAULT_MARGIN: usize = 2;

/// Dresses `body` in `garment` on both sides so the line is about `width`
/// characters wide. Odd leftovers are dropped, and a body wider than the line
/// gets no garment at all.
pub fn make_title(body: &str, garment: &str, width: usize, margin: usize) -> String {
    let body = body.trim();
    let side = width
        .saturating_sub(body.chars().count() + 2 * margin)
        / 2;
    let side = garment.repeat(side);
    let padding = " ".repeat(margin);

    format!("{side}{padding}{body}{padding}{side}")
}

/// Reads the first line of `input`.
pub fn first_line(mut input: impl BufRead) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        bail!("Input is empty, nothing to make a title of");
    }
    Ok(line)
}
