//! Compact page-indicator window for question navigation.
//!
//! | Size class | Full list when | Near start | Near end | Middle |
//! |------------|----------------|------------|----------|--------|
//! | desktop | always | - | - | - |
//! | tablet | total <= 7 | `1 2 3 … n-1 n` | `1 2 … n-2 n-1 n` | `1 2 … c-1 c c+1 … n-1 n` |
//! | mobile | total <= 4 | `1 2 … n-1 n` | `1 … n-2 n-1 n` | `1 … c … n` |
//!
//! The tablet middle template is fixed-shape. Just above the full-list cutoff
//! (`total` 8) an `…` can sit between adjacent pages and hide nothing, e.g.
//! `1 2 … 3 4 5 … 7 8`.
//!
//! Pure function of its inputs; recomputing on every resize is free of side effects.

use serde::{Deserialize, Serialize, Serializer};

use PageEntry::{Ellipsis, Page};

/// Viewport widths below this are `Mobile`.
pub const TABLET_MIN_WIDTH: u32 = 640;
/// Viewport widths at or above this are `Desktop`.
pub const DESKTOP_MIN_WIDTH: u32 = 1024;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Mobile,
    Tablet,
    Desktop,
}

impl SizeClass {
    pub fn from_viewport_width(width: u32) -> Self {
        if width < TABLET_MIN_WIDTH {
            SizeClass::Mobile
        } else if width < DESKTOP_MIN_WIDTH {
            SizeClass::Tablet
        } else {
            SizeClass::Desktop
        }
    }
}

/// A 1-based page number or an elision marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEntry {
    Page(usize),
    Ellipsis,
}

/// Pages serialize as numbers, elisions as the string `"ellipsis"`.
impl Serialize for PageEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Page(n) => serializer.serialize_u64(*n as u64),
            Ellipsis => serializer.serialize_str("ellipsis"),
        }
    }
}

/// Compute the indicator window. `current` is 1-based and clamped into `1..=total`.
pub fn window(total: usize, current: usize, size: SizeClass) -> Vec<PageEntry> {
    if total == 0 {
        return Vec::new();
    }
    let c = current.clamp(1, total);
    let n = total;

    match size {
        SizeClass::Desktop => full(n),
        SizeClass::Tablet if n <= 7 => full(n),
        SizeClass::Tablet => {
            if c <= 3 {
                vec![Page(1), Page(2), Page(3), Ellipsis, Page(n - 1), Page(n)]
            } else if c >= n - 2 {
                vec![Page(1), Page(2), Ellipsis, Page(n - 2), Page(n - 1), Page(n)]
            } else {
                vec![Page(1), Page(2), Ellipsis, Page(c - 1), Page(c), Page(c + 1), Ellipsis, Page(n - 1), Page(n)]
            }
        }
        SizeClass::Mobile if n <= 4 => full(n),
        SizeClass::Mobile => {
            if c <= 2 {
                vec![Page(1), Page(2), Ellipsis, Page(n - 1), Page(n)]
            } else if c >= n - 1 {
                vec![Page(1), Ellipsis, Page(n - 2), Page(n - 1), Page(n)]
            } else {
                vec![Page(1), Ellipsis, Page(c), Ellipsis, Page(n)]
            }
        }
    }
}

fn full(n: usize) -> Vec<PageEntry> {
    (1..=n).map(Page).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_middle() {
        assert_eq!(
            window(10, 5, SizeClass::Mobile),
            vec![Page(1), Ellipsis, Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn tablet_middle() {
        assert_eq!(
            window(10, 5, SizeClass::Tablet),
            vec![Page(1), Page(2), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(9), Page(10)]
        );
    }

    #[test]
    fn tablet_middle_keeps_shape_for_eight() {
        assert_eq!(
            window(8, 4, SizeClass::Tablet),
            vec![Page(1), Page(2), Ellipsis, Page(3), Page(4), Page(5), Ellipsis, Page(7), Page(8)]
        );
        assert_eq!(
            window(8, 5, SizeClass::Tablet),
            vec![Page(1), Page(2), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(7), Page(8)]
        );
    }

    #[test]
    fn short_lists_are_never_elided() {
        for size in [SizeClass::Mobile, SizeClass::Tablet, SizeClass::Desktop] {
            assert_eq!(window(3, 2, size), vec![Page(1), Page(2), Page(3)]);
        }
        assert_eq!(window(7, 4, SizeClass::Tablet).len(), 7);
        assert_eq!(window(4, 4, SizeClass::Mobile).len(), 4);
        assert_eq!(window(40, 20, SizeClass::Desktop).len(), 40);
    }

    #[test]
    fn edges() {
        assert_eq!(window(10, 1, SizeClass::Tablet), vec![Page(1), Page(2), Page(3), Ellipsis, Page(9), Page(10)]);
        assert_eq!(window(10, 10, SizeClass::Tablet), vec![Page(1), Page(2), Ellipsis, Page(8), Page(9), Page(10)]);
        assert_eq!(window(10, 2, SizeClass::Mobile), vec![Page(1), Page(2), Ellipsis, Page(9), Page(10)]);
        assert_eq!(window(10, 9, SizeClass::Mobile), vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(window(0, 1, SizeClass::Mobile).is_empty());
        assert_eq!(window(10, 0, SizeClass::Mobile), window(10, 1, SizeClass::Mobile));
        assert_eq!(window(10, 99, SizeClass::Mobile), window(10, 10, SizeClass::Mobile));
    }

    #[test]
    fn viewport_breakpoints() {
        assert_eq!(SizeClass::from_viewport_width(375), SizeClass::Mobile);
        assert_eq!(SizeClass::from_viewport_width(640), SizeClass::Tablet);
        assert_eq!(SizeClass::from_viewport_width(1023), SizeClass::Tablet);
        assert_eq!(SizeClass::from_viewport_width(1440), SizeClass::Desktop);
    }

    #[test]
    fn serializes_numbers_and_markers() {
        let json = serde_json::to_value(window(10, 5, SizeClass::Mobile)).unwrap();
        assert_eq!(json, serde_json::json!([1, "ellipsis", 5, "ellipsis", 10]));
    }
}
