use crate::draw::input::DrawTool;
use crate::draw::toolbar::ToolbarControl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarIcon {
    Pen,
    Eraser,
    ElementEraser,
    ClearAll,
    Undo,
    Redo,
    Export,
    Fullscreen,
}

pub fn icon_for_control(control: ToolbarControl) -> Option<ToolbarIcon> {
    match control {
        ToolbarControl::Tool(tool) => Some(icon_for_tool(tool)),
        ToolbarControl::ClearAll => Some(ToolbarIcon::ClearAll),
        ToolbarControl::Undo => Some(ToolbarIcon::Undo),
        ToolbarControl::Redo => Some(ToolbarIcon::Redo),
        ToolbarControl::ColorPicker => None,
        ToolbarControl::Export => Some(ToolbarIcon::Export),
        ToolbarControl::Fullscreen => Some(ToolbarIcon::Fullscreen),
    }
}

pub fn icon_for_tool(tool: DrawTool) -> ToolbarIcon {
    match tool {
        DrawTool::Pen => ToolbarIcon::Pen,
        DrawTool::StrokeEraser => ToolbarIcon::Eraser,
        DrawTool::ElementEraser => ToolbarIcon::ElementEraser,
    }
}

/// 7x7 glyph rows, `1` marks a filled cell.
pub fn icon_bitmap(icon: ToolbarIcon) -> &'static [&'static str] {
    match icon {
        ToolbarIcon::Pen => &[
            "0000011", "0000110", "0001100", "0011000", "0110000", "1100000", "1000000",
        ],
        ToolbarIcon::Eraser => &[
            "0011000", "0111100", "1111110", "1111110", "0111110", "0011110", "0001110",
        ],
        ToolbarIcon::ElementEraser => &[
            "0011000", "0100100", "1000010", "1000010", "0100010", "0010010", "0001110",
        ],
        ToolbarIcon::ClearAll => &[
            "1111111", "1000001", "1010101", "1001001", "1010101", "1000001", "1111111",
        ],
        ToolbarIcon::Undo => &[
            "0011100", "0110010", "0100000", "1111110", "0100010", "0100010", "0011100",
        ],
        ToolbarIcon::Redo => &[
            "0011100", "0100110", "0000010", "0111111", "0100010", "0100010", "0011100",
        ],
        ToolbarIcon::Export => &[
            "0001000", "0001000", "0101010", "0011100", "0001000", "1000001", "1111111",
        ],
        ToolbarIcon::Fullscreen => &[
            "1110111", "1000001", "1000001", "0000000", "1000001", "1000001", "1110111",
        ],
    }
}

/// Filled cells of `icon` as `(column, row)` pairs.
pub fn icon_cells(icon: ToolbarIcon) -> impl Iterator<Item = (usize, usize)> {
    icon_bitmap(icon).iter().enumerate().flat_map(|(row, line)| {
        line.bytes()
            .enumerate()
            .filter(|(_, cell)| *cell == b'1')
            .map(move |(col, _)| (col, row))
    })
}
