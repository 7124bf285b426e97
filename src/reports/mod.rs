use crate::error::HfResult;
use crate::layout::Layout;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};

/// Renders a layout with the pages transposed into parallel column groups:
/// one table row per geometry row, each page contributing its columns side
/// by side, so all bars are visible at a glance.
pub fn layout_table(layout: &Layout) -> Table {
    let geom = layout.geometry();
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mut header = Vec::new();
    for page in 0..geom.pages {
        for col in 0..geom.cols {
            let label = if col == 0 {
                format!("bar {}", page + 1)
            } else {
                String::new()
            };
            header.push(Cell::new(label).set_alignment(CellAlignment::Center));
        }
    }
    table.set_header(header);

    for row in 0..geom.rows {
        let mut cells = Vec::new();
        for page in 0..geom.pages {
            for col in 0..geom.cols {
                let slot = crate::geometry::Slot::new(page as u8, row as u8, col as u8);
                let text = match layout.action_at(slot) {
                    Some(action) => action.to_string(),
                    None => "-".to_string(),
                };
                cells.push(Cell::new(text).set_alignment(CellAlignment::Center));
            }
        }
        table.add_row(cells);
    }
    table
}

pub fn print_layout(name: &str, layout: &Layout) {
    println!("\nLayout: {}", name);
    println!("{}", layout_table(layout));
}

/// Two-decimal cost line, or a diagnostic when the layout cannot be scored.
pub fn cost_line(cost: &HfResult<f64>) -> String {
    match cost {
        Ok(value) => format!("Cost: {:.2}", value),
        Err(e) => format!("Cost: unavailable ({})", e),
    }
}
