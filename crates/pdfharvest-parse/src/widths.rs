//! Approximate glyph advance widths.
//!
//! Anchor matching and grid detection need believable run geometry,
//! not typographically exact metrics, so a single Helvetica-like AFM
//! width table stands in for full font resolution. Widths are in
//! thousandths of an em.

/// Advance width for a glyph, in em units (0.0–1.0 scale).
pub(crate) fn glyph_width_em(c: char) -> f64 {
    f64::from(width_millis(c)) / 1000.0
}

fn width_millis(c: char) -> u32 {
    match c {
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | 'I' | '\\' | '[' | ']' | 't' => 278,
        '\'' => 191,
        'i' | 'j' | 'l' => 222,
        '|' => 260,
        '(' | ')' | '-' | '`' | 'r' => 333,
        '{' | '}' => 334,
        '"' => 355,
        '*' => 389,
        '^' => 469,
        'J' | 'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 500,
        'L' | '_' | '?' => 556,
        '0'..='9' | '#' | '$' => 556,
        'a' | 'b' | 'd' | 'e' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 556,
        '+' | '<' | '=' | '>' | '~' => 584,
        'F' | 'T' | 'Z' => 611,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' | '&' => 667,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' | 'w' => 722,
        'G' | 'O' | 'Q' => 778,
        'M' | 'm' => 833,
        '%' => 889,
        'W' => 944,
        '@' => 1015,
        _ => 556,
    }
}
