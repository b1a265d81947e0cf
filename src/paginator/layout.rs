//! Layout configuration of a [`Paginator`](super::Paginator).
//!
//! Widths, margins and the gutter are abstract layout units:
//! one unit of usable width holds one unit of content extent.
//! Interpreting units (pixels, glyph advances) is up to the renderer.

use crate::ebook::metadata::{MetadataIndex, RENDITION_NAMESPACE};
use crate::paginator::errors::ConfigError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Page margins in layout units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Margins {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Margins {
    /// Creates margins with the same value on every side.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Creates margins from individual values, clockwise from the top.
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        [self.top, self.right, self.bottom, self.left]
            .into_iter()
            .find(|margin| !margin.is_finite() || *margin < 0.0)
            .map_or(Ok(()), |margin| Err(ConfigError::InvalidMargin(margin)))
    }
}

/// Parses one value (`"10"`) or four whitespace or comma-separated values
/// in `top right bottom left` order (`"10 20 10 20"`).
impl FromStr for Margins {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidValue {
            field: "margins",
            value: s.to_owned(),
        };
        let values = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|value| !value.is_empty())
            .map(|value| value.parse::<f64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        match values.as_slice() {
            &[value] => Ok(Self::uniform(value)),
            &[top, right, bottom, left] => Ok(Self::new(top, right, bottom, left)),
            _ => Err(invalid()),
        }
    }
}

/// When two pages are shown side by side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpreadMode {
    /// Always a single page.
    #[default]
    None,
    /// Two pages in landscape orientation only.
    Landscape,
    /// Two pages in any orientation.
    Both,
}

/// The orientation of the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Taller than wide.
    #[default]
    Portrait,
    /// Wider than tall.
    Landscape,
}

/// How content is divided into screens.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenditionLayout {
    /// Content flows across screens by extent.
    #[default]
    Reflowable,
    /// Each resource is one fixed page (`rendition:layout` `pre-paginated`).
    Paginated,
}

macro_rules! keyword_enum {
    ($ty:ty, $field:literal, $($value:literal => $variant:expr),+ $(,)?) => {
        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($value => Ok($variant),)+
                    _ => Err(ConfigError::InvalidValue {
                        field: $field,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

keyword_enum!(
    SpreadMode,
    "spread",
    "none" => Self::None,
    "landscape" => Self::Landscape,
    "both" => Self::Both,
);
keyword_enum!(
    Orientation,
    "orientation",
    "portrait" => Self::Portrait,
    "landscape" => Self::Landscape,
);
keyword_enum!(
    RenditionLayout,
    "layout",
    "reflowable" => Self::Reflowable,
    "paginated" => Self::Paginated,
    "pre-paginated" => Self::Paginated,
);

impl Display for SpreadMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Landscape => "landscape",
            Self::Both => "both",
        })
    }
}

/// The geometry and rendition of screens.
///
/// To create an instance, see [`LayoutConfig::builder`],
/// [`LayoutConfig::from_metadata`] or [`LayoutConfig::default`].
///
/// # Examples
/// - Configuring a two-up spread:
/// ```
/// # use folio::paginator::{LayoutConfig, Margins, SpreadMode};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let layout = LayoutConfig::builder()
///     .width(500.0)
///     .margins("10 20 10 20".parse::<Margins>()?)
///     .gutter(40.0)
///     .spread(SpreadMode::Both)
///     .build()?;
///
/// // 2 × 500 − 20 − 20 − 40
/// assert_eq!(920, layout.capacity());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    width: f64,
    gutter: f64,
    margins: Margins,
    spread: SpreadMode,
    orientation: Orientation,
    rendition: RenditionLayout,
}

impl LayoutConfig {
    /// Returns a builder to create a [`LayoutConfig`] instance.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder(Self::default())
    }

    /// Derives the rendition and spread from `rendition:layout` and
    /// `rendition:spread` package metadata, with default geometry.
    ///
    /// Unrecognized values fall back to their defaults.
    pub fn from_metadata(metadata: &MetadataIndex) -> Self {
        let property = |name: &str| {
            metadata
                .find(RENDITION_NAMESPACE, name)
                .first()
                .map(|statement| statement.value().trim().to_owned())
        };
        let rendition = property("layout")
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        let spread = match property("spread").as_deref() {
            Some("landscape" | "auto") => SpreadMode::Landscape,
            Some("both" | "portrait") => SpreadMode::Both,
            _ => SpreadMode::None,
        };

        Self {
            rendition,
            spread,
            ..Self::default()
        }
    }

    /// The width of a single page.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The space between the two pages of a spread.
    pub fn gutter(&self) -> f64 {
        self.gutter
    }

    /// The page margins.
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// See [`SpreadMode`].
    pub fn spread(&self) -> SpreadMode {
        self.spread
    }

    /// See [`Orientation`].
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// See [`RenditionLayout`].
    pub fn rendition(&self) -> RenditionLayout {
        self.rendition
    }

    /// Returns `true` if two pages are shown side by side.
    pub fn is_two_up(&self) -> bool {
        match self.spread {
            SpreadMode::None => false,
            SpreadMode::Landscape => self.orientation == Orientation::Landscape,
            SpreadMode::Both => true,
        }
    }

    /// The amount of extent a single screen holds.
    ///
    /// - Single page: `width − left − right`
    /// - Two-up spread: `2 × width − left − right − gutter`
    pub fn capacity(&self) -> usize {
        self.usable_width().max(0.0).floor() as usize
    }

    fn usable_width(&self) -> f64 {
        let Margins { left, right, .. } = self.margins;

        if self.is_two_up() {
            2.0 * self.width - left - right - self.gutter
        } else {
            self.width - left - right
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        if !self.gutter.is_finite() || self.gutter < 0.0 {
            return Err(ConfigError::InvalidGutter(self.gutter));
        }
        self.margins.validate()?;

        if self.usable_width() < 1.0 {
            return Err(ConfigError::NoUsableArea { width: self.width });
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            gutter: 0.0,
            margins: Margins::default(),
            spread: SpreadMode::None,
            orientation: Orientation::Portrait,
            rendition: RenditionLayout::Reflowable,
        }
    }
}

/// Builder to construct a [`LayoutConfig`] instance.
#[derive(Debug, Clone)]
pub struct LayoutConfigBuilder(LayoutConfig);

impl LayoutConfigBuilder {
    /// Validates and turns this builder into a [`LayoutConfig`] instance.
    ///
    /// # Errors
    /// [`ConfigError`]: A dimension is invalid or no usable area remains.
    pub fn build(self) -> Result<LayoutConfig, ConfigError> {
        self.0.validate()?;
        Ok(self.0)
    }

    /// See [`LayoutConfig::width`].
    pub fn width(mut self, width: f64) -> Self {
        self.0.width = width;
        self
    }

    /// See [`LayoutConfig::gutter`].
    pub fn gutter(mut self, gutter: f64) -> Self {
        self.0.gutter = gutter;
        self
    }

    /// See [`LayoutConfig::margins`].
    pub fn margins(mut self, margins: Margins) -> Self {
        self.0.margins = margins;
        self
    }

    /// See [`LayoutConfig::spread`].
    pub fn spread(mut self, spread: SpreadMode) -> Self {
        self.0.spread = spread;
        self
    }

    /// See [`LayoutConfig::orientation`].
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.0.orientation = orientation;
        self
    }

    /// See [`LayoutConfig::rendition`].
    pub fn rendition(mut self, rendition: RenditionLayout) -> Self {
        self.0.rendition = rendition;
        self
    }
}

impl From<LayoutConfig> for LayoutConfigBuilder {
    fn from(value: LayoutConfig) -> Self {
        Self(value)
    }
}
