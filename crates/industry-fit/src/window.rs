use scoring_core::ScoringError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Trailing windows over which relative performance is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Window {
    #[serde(rename = "1M")]
    M1,
    #[serde(rename = "3M")]
    M3,
    #[serde(rename = "6M")]
    M6,
    #[serde(rename = "1Y")]
    Y1,
    #[serde(rename = "2Y")]
    Y2,
    #[serde(rename = "3Y")]
    Y3,
    #[serde(rename = "5Y")]
    Y5,
}

impl Window {
    /// Window code as used by the data layer
    pub fn code(&self) -> &'static str {
        match self {
            Window::M1 => "1M",
            Window::M3 => "3M",
            Window::M6 => "6M",
            Window::Y1 => "1Y",
            Window::Y2 => "2Y",
            Window::Y3 => "3Y",
            Window::Y5 => "5Y",
        }
    }

    /// The block this window votes in
    pub fn block(&self) -> Block {
        match self {
            Window::M1 | Window::M3 => Block::Short,
            Window::M6 | Window::Y1 | Window::Y2 => Block::Mid,
            Window::Y3 | Window::Y5 => Block::Long,
        }
    }

    /// All windows, shortest first
    pub fn all() -> [Window; 7] {
        [
            Window::M1,
            Window::M3,
            Window::M6,
            Window::Y1,
            Window::Y2,
            Window::Y3,
            Window::Y5,
        ]
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Window {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1M" => Ok(Window::M1),
            "3M" => Ok(Window::M3),
            "6M" => Ok(Window::M6),
            "1Y" => Ok(Window::Y1),
            "2Y" => Ok(Window::Y2),
            "3Y" => Ok(Window::Y3),
            "5Y" => Ok(Window::Y5),
            _ => Err(ScoringError::UnknownWindow(s.to_string())),
        }
    }
}

/// Temporal block of windows that casts a single vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    Short,
    Mid,
    Long,
}

impl Block {
    pub fn windows(&self) -> &'static [Window] {
        match self {
            Block::Short => &[Window::M1, Window::M3],
            Block::Mid => &[Window::M6, Window::Y1, Window::Y2],
            Block::Long => &[Window::Y3, Window::Y5],
        }
    }

    pub fn all() -> [Block; 3] {
        [Block::Short, Block::Mid, Block::Long]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Block::Short => "short",
            Block::Mid => "mid",
            Block::Long => "long",
        }
    }
}

/// Build a dominant-horizon filter from window codes.
///
/// Codes outside the seven supported windows (e.g. `1W`, `YTD`) are dropped.
pub fn dominant_horizons_from_codes<I, S>(codes: I) -> HashSet<Window>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    codes
        .into_iter()
        .filter_map(|code| match code.as_ref().parse::<Window>() {
            Ok(window) => Some(window),
            Err(e) => {
                tracing::debug!("Ignoring dominant horizon: {}", e);
                None
            }
        })
        .collect()
}
