//! Feed page size
//!
//! The page size is derived once from how many post tiles fit the display
//! area, then stays fixed for the session.

use serde::{Deserialize, Serialize};

/// Available display area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl std::str::FromStr for Viewport {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `1280x800`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("Expected WIDTHxHEIGHT, got: {}", s))?;
        let width = w
            .trim()
            .parse()
            .map_err(|_| format!("Invalid width: {}", w))?;
        let height = h
            .trim()
            .parse()
            .map_err(|_| format!("Invalid height: {}", h))?;
        Ok(Viewport { width, height })
    }
}

/// Size of one post tile, including its gutter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

/// Post card footprint used by the feed grid
pub const POST_TILE: TileSize = TileSize {
    width: 320,
    height: 420,
};

/// Number of posts requested per page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageSize(usize);

impl PageSize {
    /// Fixed page size; zero is bumped to one
    pub fn new(size: usize) -> Self {
        Self(size.max(1))
    }

    /// How many tiles fit the viewport, plus one extra row so the load-more
    /// sentinel starts below the fold, never less than `minimum`
    pub fn from_viewport(viewport: Viewport, tile: TileSize, minimum: usize) -> Self {
        let columns = (viewport.width / tile.width.max(1)).max(1) as usize;
        let rows = (viewport.height / tile.height.max(1)) as usize + 1;
        Self::new((columns * rows).max(minimum))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_viewport() {
        let v: Viewport = "1280x800".parse().unwrap();
        assert_eq!(v, Viewport { width: 1280, height: 800 });
        assert!("1280".parse::<Viewport>().is_err());
        assert!("ax800".parse::<Viewport>().is_err());
    }

    #[test]
    fn fills_viewport() {
        let size = PageSize::from_viewport(
            Viewport { width: 1280, height: 840 },
            POST_TILE,
            1,
        );
        // 4 columns x (2 full rows + 1)
        assert_eq!(size.get(), 12);
    }

    #[test]
    fn respects_minimum() {
        let size = PageSize::from_viewport(Viewport { width: 300, height: 100 }, POST_TILE, 6);
        assert_eq!(size.get(), 6);
    }

    #[test]
    fn never_zero() {
        assert_eq!(PageSize::new(0).get(), 1);
        let size = PageSize::from_viewport(Viewport { width: 0, height: 0 }, POST_TILE, 0);
        assert_eq!(size.get(), 1);
    }
}
