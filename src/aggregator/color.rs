//! Hierarchical color assignment.
//!
//! The root takes the first palette entry, every first-generation child a
//! palette entry of its own (cycling through the palette), and every deeper
//! node a faded copy of its parent's color. Colors are handed out
//! breadth-first from the root, so a parent is always colored before its
//! children regardless of table order.

use crate::tree::AreaTree;
use crate::utils::config::{DEFAULT_FADE_AMOUNT, DEFAULT_LIGHTEN_AMOUNT};
use crate::utils::error::TreeError;
use log::{debug, warn};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

/// 8-bit RGBA color parsed from `#RRGGBB` or `#RRGGBBAA`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl FromStr for Rgba {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim_start_matches('#');
        let invalid = || TreeError::InvalidColor(s.to_string());

        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if hex.len() == 8 { channel(6)? } else { 255 },
        })
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Blend applied to a parent color to derive its children's color
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fade {
    /// Scale alpha by `1 - amount`
    Transparent(f64),
    /// Move HLS lightness `amount` of the way towards white
    Lighten(f64),
}

impl Default for Fade {
    fn default() -> Self {
        Fade::Transparent(DEFAULT_FADE_AMOUNT)
    }
}

impl Fade {
    pub fn lighten() -> Self {
        Fade::Lighten(DEFAULT_LIGHTEN_AMOUNT)
    }

    /// Derive a child color from `parent`
    pub fn apply(&self, parent: &str) -> Result<String, TreeError> {
        match *self {
            Fade::Transparent(amount) => make_transparent(parent, amount),
            Fade::Lighten(amount) => lighten_color(parent, amount),
        }
    }
}

/// Reduce a color's alpha by `amount` (0-1); opaque when no alpha is given
pub fn make_transparent(hex: &str, amount: f64) -> Result<String, TreeError> {
    let mut color: Rgba = hex.parse()?;
    color.a = (color.a as f64 * (1.0 - amount)).max(0.0) as u8;
    Ok(color.to_string())
}

/// Raise a color's lightness by `amount` of the remaining distance to white
///
/// Returns `#rrggbb`, or `#rrggbbaa` when the input carried an alpha channel.
pub fn lighten_color(hex: &str, amount: f64) -> Result<String, TreeError> {
    let color: Rgba = hex.parse()?;

    let (h, l, s) = rgb_to_hls(
        color.r as f64 / 255.0,
        color.g as f64 / 255.0,
        color.b as f64 / 255.0,
    );
    let l = (l + amount * (1.0 - l)).min(1.0);
    let (r, g, b) = hls_to_rgb(h, l, s);

    let (r, g, b) = ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8);
    if hex.trim_start_matches('#').len() == 8 {
        Ok(format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, color.a))
    } else {
        Ok(format!("#{:02x}{:02x}{:02x}", r, g, b))
    }
}

fn rgb_to_hls(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let sumc = maxc + minc;
    let rangec = maxc - minc;
    let l = sumc / 2.0;

    if rangec == 0.0 {
        return (0.0, l, 0.0);
    }

    let s = if l <= 0.5 {
        rangec / sumc
    } else {
        rangec / (2.0 - sumc)
    };

    let rc = (maxc - r) / rangec;
    let gc = (maxc - g) / rangec;
    let bc = (maxc - b) / rangec;

    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    ((h / 6.0).rem_euclid(1.0), l, s)
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }

    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;

    (
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

/// Color every node reachable from `root`
///
/// **Public** - main entry point for color propagation
///
/// # Arguments
/// * `tree` - Tree with unique ids
/// * `root` - Id of the displayed top module
/// * `palette` - Root-level colors
/// * `fade` - Blend deriving a child's color from its parent's
///
/// # Returns
/// A tree where the root has `palette[0]`, the i-th child of the root (table
/// order) has `palette[i % palette.len()]`, and deeper nodes a faded parent
/// color. Unreachable rows, and descendants of a color the fade cannot
/// parse, are left without a color.
///
/// # Errors
/// * `TreeError::EmptyPalette` - No colors supplied
/// * `TreeError::RootNotFound` - `root` is absent from a non-empty tree
pub fn assign_colors(
    tree: &AreaTree,
    root: &str,
    palette: &[String],
    fade: Fade,
) -> Result<AreaTree, TreeError> {
    if tree.is_empty() {
        return Ok(AreaTree::default());
    }
    if palette.is_empty() {
        return Err(TreeError::EmptyPalette);
    }
    let Some(&root_pos) = tree.occurrences(root).first() else {
        return Err(TreeError::RootNotFound(root.to_string()));
    };

    let mut rows = tree.rows().to_vec();
    for row in rows.iter_mut() {
        row.color = None;
    }
    rows[root_pos].color = Some(palette[0].clone());

    let mut visited: HashSet<usize> = HashSet::from([root_pos]);
    let mut queue = VecDeque::from([root_pos]);

    while let Some(pos) = queue.pop_front() {
        let Some(parent_color) = rows[pos].color.clone() else {
            continue;
        };

        for (i, &child_pos) in tree.child_positions(&rows[pos].id).iter().enumerate() {
            if !visited.insert(child_pos) {
                continue;
            }

            let color = if pos == root_pos {
                Some(palette[i % palette.len()].clone())
            } else {
                match fade.apply(&parent_color) {
                    Ok(color) => Some(color),
                    Err(e) => {
                        warn!("Leaving '{}' uncolored: {}", rows[child_pos].id, e);
                        None
                    }
                }
            };

            rows[child_pos].color = color;
            queue.push_back(child_pos);
        }
    }

    let uncolored = rows.iter().filter(|row| row.color.is_none()).count();
    if uncolored > 0 {
        warn!("{} rows not reachable from '{}' left uncolored", uncolored, root);
    } else {
        debug!("Colored {} rows", rows.len());
    }

    Ok(AreaTree::from_rows(rows))
}
