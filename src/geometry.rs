use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// One addressable position on the hotbar block: (page, row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub page: u8,
    pub row: u8,
    pub col: u8,
}

impl Slot {
    pub fn new(page: u8, row: u8, col: u8) -> Self {
        Slot { page, row, col }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(page {}, row {}, col {})", self.page, self.row, self.col)
    }
}

/// Fixed bounds of the hotbar block: P pages of R rows by C columns.
/// The rightmost column is the one optionally treated as thumb-reachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub pages: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Geometry {
    pub fn new(pages: usize, rows: usize, cols: usize) -> Self {
        Geometry { pages, rows, cols }
    }

    /// The default in-game block: 3 hotbars of 3 rows by 4 columns.
    pub fn standard() -> Self {
        Geometry::new(3, 3, 4)
    }

    pub fn slot_count(&self) -> usize {
        self.pages * self.rows * self.cols
    }

    /// Dense index for flat lookup tables, page-major then row-major.
    pub fn index_of(&self, slot: Slot) -> usize {
        (slot.page as usize * self.rows + slot.row as usize) * self.cols + slot.col as usize
    }

    pub fn slot_at(&self, index: usize) -> Slot {
        let col = index % self.cols;
        let row = (index / self.cols) % self.rows;
        let page = index / (self.cols * self.rows);
        Slot::new(page as u8, row as u8, col as u8)
    }

    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.slot_count()).map(move |i| self.slot_at(i))
    }

    pub fn contains(&self, slot: Slot) -> bool {
        (slot.page as usize) < self.pages
            && (slot.row as usize) < self.rows
            && (slot.col as usize) < self.cols
    }

    pub fn is_thumb_col(&self, slot: Slot) -> bool {
        slot.col as usize == self.cols - 1
    }
}

/// Named geometries selectable from the CLI without a layout file.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum GeometryPreset {
    Standard,
    Single,
    Wide,
}

impl GeometryPreset {
    pub fn geometry(&self) -> Geometry {
        match self {
            Self::Standard => Geometry::standard(),
            Self::Single => Geometry::new(1, 3, 4),
            Self::Wide => Geometry::new(2, 3, 6),
        }
    }
}
