//! Image contrast - WCAG 1.4.3 Contrast (Minimum) (Level AA)
//!
//! Reports the standard deviation of pixel luminance as a rough contrast
//! estimate. Lookup and decoding sit behind [`ContrastProbe`]; every probe
//! failure turns into a diagnostic and the walk carries on.

use std::path::{Path, PathBuf};

use image::{GrayImage, ImageReader, Limits};
use mdwcag_dom::{DomTree, NodeId};

use super::{Pass, PassKind};
use crate::diagnostics::{Diagnostic, Diagnostics, WcagCriterion};
use crate::visitor::{ElementVisitor, VisitContext, walk_from};

/// Default decode budget (64 MiB)
pub const DEFAULT_MAX_ALLOC: u64 = 64 * 1024 * 1024;

/// Contrast lookup errors
#[derive(Debug, thiserror::Error)]
pub enum ContrastError {
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image has no pixels: {}", .0.display())]
    Empty(PathBuf),
}

/// Source of a luminance spread for an image reference
pub trait ContrastProbe {
    /// Standard deviation of pixel luminance for the image at `src`
    fn luminance_spread(&self, src: &str) -> Result<f64, ContrastError>;
}

/// Population standard deviation of 8-bit luminance values
pub fn luminance_std_dev(image: &GrayImage) -> Option<f64> {
    let pixels = image.as_raw();
    if pixels.is_empty() {
        return None;
    }
    let n = pixels.len() as f64;
    let mean = pixels.iter().map(|&p| f64::from(p)).sum::<f64>() / n;
    let variance = pixels
        .iter()
        .map(|&p| {
            let d = f64::from(p) - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    Some(variance.sqrt())
}

/// Loads images from disk with the `image` crate.
///
/// `src` is resolved against `base_dir`. With a fixture configured every
/// `src` resolves to that one file instead.
#[derive(Debug, Clone)]
pub struct ImageFileProbe {
    base_dir: PathBuf,
    fixture: Option<PathBuf>,
    max_alloc: u64,
}

impl ImageFileProbe {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            fixture: None,
            max_alloc: DEFAULT_MAX_ALLOC,
        }
    }

    pub fn with_fixture(mut self, fixture: impl Into<PathBuf>) -> Self {
        self.fixture = Some(fixture.into());
        self
    }

    pub fn with_max_alloc(mut self, bytes: u64) -> Self {
        self.max_alloc = bytes;
        self
    }

    /// File the probe reads for `src`
    pub fn resolve(&self, src: &str) -> PathBuf {
        match &self.fixture {
            Some(fixture) => fixture.clone(),
            None => self.base_dir.join(src),
        }
    }

    fn load(&self, path: &Path) -> Result<GrayImage, ContrastError> {
        if !path.is_file() {
            return Err(ContrastError::NotFound(path.to_path_buf()));
        }
        let io_err = |source| ContrastError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = ImageReader::open(path)
            .map_err(io_err)?
            .with_guessed_format()
            .map_err(io_err)?;

        let mut limits = Limits::default();
        limits.max_alloc = Some(self.max_alloc);
        reader.limits(limits);

        let image = reader.decode().map_err(|source| ContrastError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(image.to_luma8())
    }
}

impl Default for ImageFileProbe {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ContrastProbe for ImageFileProbe {
    fn luminance_spread(&self, src: &str) -> Result<f64, ContrastError> {
        let path = self.resolve(src);
        tracing::debug!("Measuring contrast of {} ({})", src, path.display());
        let gray = self.load(&path)?;
        luminance_std_dev(&gray).ok_or(ContrastError::Empty(path))
    }
}

/// Reports a contrast estimate per image
pub struct ImageContrastChecker<'a> {
    probe: &'a dyn ContrastProbe,
    sink: &'a mut Diagnostics,
}

impl<'a> ImageContrastChecker<'a> {
    pub fn new(probe: &'a dyn ContrastProbe, sink: &'a mut Diagnostics) -> Self {
        Self { probe, sink }
    }

    fn report(&mut self, rule_id: &'static str, message: String, cx: &VisitContext) {
        self.sink.push(
            Diagnostic::info(rule_id, message)
                .with_criterion(WcagCriterion::ContrastMinimum)
                .at(cx.path().clone()),
        );
    }
}

impl ElementVisitor for ImageContrastChecker<'_> {
    fn visit_img(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        let src = tree
            .element(node)
            .and_then(|img| img.get("src"))
            .filter(|src| !src.is_empty())
            .map(str::to_string);
        let Some(src) = src else {
            self.report(
                "contrast-no-src",
                "Found an image with no src attribute".to_string(),
                cx,
            );
            return;
        };

        match self.probe.luminance_spread(&src) {
            Ok(contrast) => self.report(
                "contrast-estimate",
                format!("Estimated contrast of the image({src}) is {contrast:.2}"),
                cx,
            ),
            Err(ContrastError::NotFound(_)) => self.report(
                "contrast-image-missing",
                format!("No image found. Check the path for {src}"),
                cx,
            ),
            Err(err) => self.report(
                "contrast-image-unreadable",
                format!("Image {src} could not be read: {err}"),
                cx,
            ),
        }
    }
}

/// `image-contrast`
pub struct ImageContrast {
    probe: Box<dyn ContrastProbe>,
}

impl ImageContrast {
    pub fn new(probe: Box<dyn ContrastProbe>) -> Self {
        Self { probe }
    }
}

impl Default for ImageContrast {
    fn default() -> Self {
        Self::new(Box::new(ImageFileProbe::default()))
    }
}

impl Pass for ImageContrast {
    fn kind(&self) -> PassKind {
        PassKind::ImageContrast
    }

    fn run(&mut self, tree: &mut DomTree, scope: NodeId, sink: &mut Diagnostics) {
        let mut checker = ImageContrastChecker::new(self.probe.as_ref(), sink);
        walk_from(&mut checker, tree, scope);
    }
}
