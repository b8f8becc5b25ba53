use crate::fmt::PlotFmt;
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};
use walkdir::WalkDir;

// tried first, in this order
const PREFERRED: &[&str] = &[
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
    "Arial.ttf",
    "arial.ttf",
    "FreeSans.ttf",
    "NotoSans-Regular.ttf",
    "Roboto-Regular.ttf",
];

// directory levels below a font dir (e.g. /usr/share/fonts/truetype/dejavu)
const MAX_DEPTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Typeface {
    Registered(PathBuf),
    Unavailable,
}

impl Typeface {
    pub fn is_available(&self) -> bool {
        matches!(self, Typeface::Registered(_))
    }
}

static TYPEFACE: OnceLock<Typeface> = OnceLock::new();

/// Registers a sans-serif typeface for chart text, searching `font_dirs`.
///
/// Registration happens once per process; later calls return the first
/// outcome regardless of `font_dirs`. Without a typeface, charts are drawn
/// without any text.
pub fn typeface(font_dirs: &[PathBuf]) -> &'static Typeface {
    TYPEFACE.get_or_init(|| match register(font_dirs) {
        Ok(Some(path)) => {
            debug!("[font] using {}", path.display());
            Typeface::Registered(path)
        }
        Ok(None) => {
            warn!(
                "[font] no typeface found in {:?}; charts will have no text",
                font_dirs
            );
            Typeface::Unavailable
        }
        Err(e) => {
            warn!("[font] {:?}; charts will have no text", e);
            Typeface::Unavailable
        }
    })
}

fn register(font_dirs: &[PathBuf]) -> Result<Option<PathBuf>, Report> {
    let path = match find(font_dirs) {
        Some(path) => path,
        None => return Ok(None),
    };
    let bytes = std::fs::read(&path)
        .wrap_err_with(|| format!("read font {}", path.display()))?;
    // plotters keeps registered fonts for the whole process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(PlotFmt::font_family(), FontStyle::Normal, bytes).map_err(
        |_| eyre::eyre!("invalid font file {}", path.display()),
    )?;
    Ok(Some(path))
}

/// Finds a regular sans-serif font file: a preferred one if present,
/// otherwise the first (by path) `*Sans*.ttf` that isn't bold, italic or
/// monospaced.
pub fn find(font_dirs: &[PathBuf]) -> Option<PathBuf> {
    let mut candidates = Vec::new();
    for dir in font_dirs {
        collect(dir, &mut candidates);
    }
    candidates.sort();

    for preferred in PREFERRED {
        let found = candidates.iter().find(|path| {
            path.file_name().map_or(false, |name| name == *preferred)
        });
        if let Some(path) = found {
            return Some(path.clone());
        }
    }

    candidates.into_iter().find(|path| {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        name.contains("Sans")
            && ["Bold", "Italic", "Oblique", "Mono", "Light", "Condensed"]
                .iter()
                .all(|style| !name.contains(style))
    })
}

fn collect(dir: &Path, candidates: &mut Vec<PathBuf>) {
    // missing or unreadable directories are simply skipped
    let entries = WalkDir::new(dir)
        .follow_links(true)
        .max_depth(MAX_DEPTH + 1)
        .into_iter()
        .filter_map(|entry| entry.ok());
    for entry in entries {
        if entry.file_type().is_file() && is_font(entry.path()) {
            candidates.push(entry.into_path());
        }
    }
}

fn is_font(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf")
        })
}
