use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Formatting options used when arrays and views are displayed.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PrintOptions {
    /// Digits after the decimal point; `None` defers to the element's own `Display`.
    pub precision: Option<usize>,

    /// Elements shown at each end of a summarised axis.
    pub edge_items: usize,

    /// Axes longer than this are summarised with `...`.
    pub threshold: usize,
}

impl PrintOptions {
    pub fn new(precision: Option<usize>, edge_items: usize, threshold: usize) -> Self {
        Self {
            precision,
            edge_items,
            threshold,
        }
    }

    pub fn full() -> Self {
        Self {
            precision: None,
            edge_items: usize::MAX / 2,
            threshold: usize::MAX,
        }
    }

    pub fn compact() -> Self {
        Self {
            precision: Some(3),
            edge_items: 2,
            threshold: 8,
        }
    }

    /// Positions of an axis of length `len` that get printed, and where the
    /// `...` marker goes (after the returned head, if any). With zero edge
    /// items a summarised axis shows only the marker.
    pub(crate) fn visible(&self, len: usize) -> (Vec<usize>, Option<usize>) {
        if len <= self.threshold || self.edge_items.saturating_mul(2) >= len {
            return ((0..len).collect(), None);
        }
        let head = 0..self.edge_items;
        let tail = len - self.edge_items..len;
        (head.chain(tail).collect(), Some(self.edge_items))
    }

    pub(crate) fn write_value<T: fmt::Display>(
        &self,
        f: &mut fmt::Formatter<'_>,
        value: &T,
    ) -> fmt::Result {
        match self.precision {
            Some(p) => write!(f, "{:.*}", p, value),
            None => write!(f, "{}", value),
        }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            precision: None,
            edge_items: 3,
            threshold: 1000,
        }
    }
}

impl FromStr for PrintOptions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(PrintOptions::default()),
            "full" => Ok(PrintOptions::full()),
            "compact" => Ok(PrintOptions::compact()),
            _ => Err(format!(
                "Unknown print preset: {}. Expected one of `default`, `full` or `compact`",
                s
            )),
        }
    }
}
