//! Page layout parameters
//!
//! Page size and margin are validated independently of style resolution and
//! turned into the `@page` rule handed to the renderer.

use crate::error::LayoutError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: &str = "A4";
pub const DEFAULT_MARGIN: &str = "20mm";

/// Physical page sizes understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    A8,
    A9,
    A10,
    B0,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
    B8,
    B9,
    B10,
    Letter,
    Legal,
    Ledger,
    Tabloid,
    Executive,
}

impl PageSize {
    pub const ALL: [PageSize; 27] = [
        PageSize::A0,
        PageSize::A1,
        PageSize::A2,
        PageSize::A3,
        PageSize::A4,
        PageSize::A5,
        PageSize::A6,
        PageSize::A7,
        PageSize::A8,
        PageSize::A9,
        PageSize::A10,
        PageSize::B0,
        PageSize::B1,
        PageSize::B2,
        PageSize::B3,
        PageSize::B4,
        PageSize::B5,
        PageSize::B6,
        PageSize::B7,
        PageSize::B8,
        PageSize::B9,
        PageSize::B10,
        PageSize::Letter,
        PageSize::Legal,
        PageSize::Ledger,
        PageSize::Tabloid,
        PageSize::Executive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PageSize::A0 => "A0",
            PageSize::A1 => "A1",
            PageSize::A2 => "A2",
            PageSize::A3 => "A3",
            PageSize::A4 => "A4",
            PageSize::A5 => "A5",
            PageSize::A6 => "A6",
            PageSize::A7 => "A7",
            PageSize::A8 => "A8",
            PageSize::A9 => "A9",
            PageSize::A10 => "A10",
            PageSize::B0 => "B0",
            PageSize::B1 => "B1",
            PageSize::B2 => "B2",
            PageSize::B3 => "B3",
            PageSize::B4 => "B4",
            PageSize::B5 => "B5",
            PageSize::B6 => "B6",
            PageSize::B7 => "B7",
            PageSize::B8 => "B8",
            PageSize::B9 => "B9",
            PageSize::B10 => "B10",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
            PageSize::Ledger => "Ledger",
            PageSize::Tabloid => "Tabloid",
            PageSize::Executive => "Executive",
        }
    }

    /// Portrait width and height in millimetres.
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PageSize::A0 => (841.0, 1189.0),
            PageSize::A1 => (594.0, 841.0),
            PageSize::A2 => (420.0, 594.0),
            PageSize::A3 => (297.0, 420.0),
            PageSize::A4 => (210.0, 297.0),
            PageSize::A5 => (148.0, 210.0),
            PageSize::A6 => (105.0, 148.0),
            PageSize::A7 => (74.0, 105.0),
            PageSize::A8 => (52.0, 74.0),
            PageSize::A9 => (37.0, 52.0),
            PageSize::A10 => (26.0, 37.0),
            PageSize::B0 => (1000.0, 1414.0),
            PageSize::B1 => (707.0, 1000.0),
            PageSize::B2 => (500.0, 707.0),
            PageSize::B3 => (353.0, 500.0),
            PageSize::B4 => (250.0, 353.0),
            PageSize::B5 => (176.0, 250.0),
            PageSize::B6 => (125.0, 176.0),
            PageSize::B7 => (88.0, 125.0),
            PageSize::B8 => (62.0, 88.0),
            PageSize::B9 => (44.0, 62.0),
            PageSize::B10 => (31.0, 44.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Legal => (215.9, 355.6),
            PageSize::Ledger => (431.8, 279.4),
            PageSize::Tabloid => (279.4, 431.8),
            PageSize::Executive => (184.15, 266.7),
        }
    }

    /// Sorted list of every recognised size name.
    pub fn valid_names() -> Vec<String> {
        let mut names: Vec<String> = Self::ALL.iter().map(|s| s.name().to_string()).collect();
        names.sort();
        names
    }
}

impl FromStr for PageSize {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|size| size.name() == value)
            .ok_or_else(|| LayoutError::InvalidPageSize {
                value: value.to_string(),
                valid: Self::valid_names(),
            })
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Length units accepted for margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Mm,
    Cm,
    In,
    Px,
    Pt,
    Pc,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 6] = [
        LengthUnit::Mm,
        LengthUnit::Cm,
        LengthUnit::In,
        LengthUnit::Px,
        LengthUnit::Pt,
        LengthUnit::Pc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LengthUnit::Mm => "mm",
            LengthUnit::Cm => "cm",
            LengthUnit::In => "in",
            LengthUnit::Px => "px",
            LengthUnit::Pt => "pt",
            LengthUnit::Pc => "pc",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|unit| unit.as_str() == suffix)
    }

    fn valid_names() -> Vec<String> {
        Self::ALL.iter().map(|u| u.as_str().to_string()).collect()
    }
}

static MARGIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)([a-z]+)$").expect("margin pattern compiles"));

/// A non-negative length such as `20mm` or `1in`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    magnitude: f64,
    unit: LengthUnit,
}

impl Margin {
    pub fn new(magnitude: f64, unit: LengthUnit) -> Self {
        Self { magnitude, unit }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(20.0, LengthUnit::Mm)
    }
}

impl FromStr for Margin {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || LayoutError::InvalidMargin {
            value: value.to_string(),
            valid_units: LengthUnit::valid_names(),
        };

        let normalized = value.trim().to_lowercase();
        let captures = MARGIN_PATTERN.captures(&normalized).ok_or_else(invalid)?;
        let magnitude: f64 = captures[1].parse().map_err(|_| invalid())?;
        let unit = LengthUnit::from_suffix(&captures[2]).ok_or_else(invalid)?;
        Ok(Margin::new(magnitude, unit))
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.as_str())
    }
}

/// Page size and margin for one conversion run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub size: PageSize,
    pub margin: Margin,
}

impl PageLayout {
    pub fn new(size: PageSize, margin: Margin) -> Self {
        Self { size, margin }
    }

    /// Validate both layout strings, page size first.
    pub fn parse(size: &str, margin: &str) -> Result<Self, LayoutError> {
        let size = size.parse::<PageSize>()?;
        let margin = margin.parse::<Margin>()?;
        Ok(Self::new(size, margin))
    }

    /// The `@page` rule plus the page-break marker class.
    pub fn print_css(&self) -> String {
        let (width, height) = self.size.dimensions_mm();
        format!(
            "@page {{ size: {width}mm {height}mm; margin: {}; }}\n.page-break {{ page-break-before: always; }}\n",
            self.margin
        )
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new(PageSize::A4, Margin::default())
    }
}
