use crossterm::style::Color;

/// Colors used to draw a maze: walls and glyph in one color, the solution trace and endpoints
/// in the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub wall_name: &'static str,
    pub trace_name: &'static str,
    pub wall: Color,
    pub trace: Color,
    pub open: Color,
}

const OPEN: Color = Color::AnsiValue(232);

/// Color schemes cycled by the "rotate colors" menu entry.
pub const PALETTES: [Palette; 8] = [
    Palette {
        wall_name: "White",
        trace_name: "Gray",
        wall: Color::Grey,
        trace: Color::DarkGrey,
        open: OPEN,
    },
    Palette {
        wall_name: "Bright White",
        trace_name: "Gray",
        wall: Color::White,
        trace: Color::DarkGrey,
        open: OPEN,
    },
    Palette {
        wall_name: "Blue",
        trace_name: "Light Blue",
        wall: Color::AnsiValue(20),
        trace: Color::AnsiValue(153),
        open: OPEN,
    },
    Palette {
        wall_name: "Cyan",
        trace_name: "Light Cyan",
        wall: Color::AnsiValue(37),
        trace: Color::AnsiValue(159),
        open: OPEN,
    },
    Palette {
        wall_name: "Green",
        trace_name: "Light Green",
        wall: Color::AnsiValue(28),
        trace: Color::AnsiValue(121),
        open: OPEN,
    },
    Palette {
        wall_name: "Gold",
        trace_name: "Light Peach",
        wall: Color::AnsiValue(130),
        trace: Color::AnsiValue(223),
        open: OPEN,
    },
    Palette {
        wall_name: "Purple",
        trace_name: "Light Pink",
        wall: Color::AnsiValue(91),
        trace: Color::AnsiValue(219),
        open: OPEN,
    },
    Palette {
        wall_name: "Dark Red",
        trace_name: "Light Salmon",
        wall: Color::AnsiValue(124),
        trace: Color::AnsiValue(217),
        open: OPEN,
    },
];
