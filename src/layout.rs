use crate::error::{HfResult, HotForgeError};
use crate::geometry::{Geometry, Slot};
use crate::rotation::Rotation;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A total mapping from every slot of a geometry to an action or unbound.
/// Duplicate bindings are tolerated here; `validate` rejects them only for
/// actions the rotation actually uses.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    geometry: Geometry,
    slots: Vec<Option<u32>>,
}

impl Layout {
    pub fn empty(geometry: Geometry) -> Self {
        let slots = vec![None; geometry.slot_count()];
        Layout { geometry, slots }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn action_at(&self, slot: Slot) -> Option<u32> {
        self.slots[self.geometry.index_of(slot)]
    }

    /// First slot bound to `action`, in dense index order.
    pub fn slot_of(&self, action: u32) -> Option<Slot> {
        self.slots
            .iter()
            .position(|&s| s == Some(action))
            .map(|i| self.geometry.slot_at(i))
    }

    /// O(1) overwrite; `None` unbinds the slot.
    pub fn assign(&mut self, slot: Slot, action: Option<u32>) {
        let idx = self.geometry.index_of(slot);
        self.slots[idx] = action;
    }

    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Every rotation action must occupy exactly one slot.
    pub fn validate(&self, rotation: &Rotation) -> HfResult<()> {
        for action in rotation.distinct() {
            let mut first: Option<Slot> = None;
            for (i, &bound) in self.slots.iter().enumerate() {
                if bound == Some(action) {
                    let slot = self.geometry.slot_at(i);
                    if let Some(prev) = first {
                        return Err(HotForgeError::DuplicateAssignment {
                            action,
                            first: prev,
                            second: slot,
                        });
                    }
                    first = Some(slot);
                }
            }
            if first.is_none() {
                return Err(HotForgeError::MissingAssignment { action });
            }
        }
        Ok(())
    }

    /// Builds a layout from the nested page structure of a layout file:
    /// P pages, each R rows of C values, `-1` meaning unbound.
    pub fn from_pages(pages: Vec<Vec<Vec<i64>>>) -> HfResult<Self> {
        if pages.is_empty() {
            return Err(HotForgeError::Validation("layout has no pages".into()));
        }
        let rows = pages[0].len();
        let cols = pages[0].first().map_or(0, |r| r.len());
        if rows == 0 || cols == 0 {
            return Err(HotForgeError::Validation("layout page has no slots".into()));
        }
        if pages.len() > u8::MAX as usize || rows > u8::MAX as usize || cols > u8::MAX as usize {
            return Err(HotForgeError::Validation(
                "layout dimension exceeds 255".into(),
            ));
        }

        let geometry = Geometry::new(pages.len(), rows, cols);
        let mut layout = Layout::empty(geometry);

        for (p, page) in pages.iter().enumerate() {
            if page.len() != rows {
                return Err(HotForgeError::Validation(format!(
                    "page {} has {} rows, expected {}",
                    p,
                    page.len(),
                    rows
                )));
            }
            for (r, row) in page.iter().enumerate() {
                if row.len() != cols {
                    return Err(HotForgeError::Validation(format!(
                        "page {} row {} has {} columns, expected {}",
                        p,
                        r,
                        row.len(),
                        cols
                    )));
                }
                for (c, &value) in row.iter().enumerate() {
                    let slot = Slot::new(p as u8, r as u8, c as u8);
                    match value {
                        -1 => {}
                        v if v >= 0 && v <= u32::MAX as i64 => {
                            layout.assign(slot, Some(v as u32));
                        }
                        v => {
                            return Err(HotForgeError::Validation(format!(
                                "invalid action id {} at {}",
                                v, slot
                            )));
                        }
                    }
                }
            }
        }
        Ok(layout)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> HfResult<Self> {
        let content = fs::read_to_string(path)?;
        let pages: Vec<Vec<Vec<i64>>> = serde_json::from_str(&content)?;
        let layout = Self::from_pages(pages)?;
        debug!(
            pages = layout.geometry.pages,
            bound = layout.bound_count(),
            "layout loaded"
        );
        Ok(layout)
    }
}
