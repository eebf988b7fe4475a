use rgb::RGB8;

pub const PALETTE: [RGB8; 10] = [
    RGB8::new(0xFF, 0x6B, 0x6B), // red
    RGB8::new(0x4E, 0xCD, 0xC4), // turquoise
    RGB8::new(0x45, 0xB7, 0xD1), // light blue
    RGB8::new(0xFF, 0xA0, 0x7A), // light orange
    RGB8::new(0x98, 0xD8, 0xC8), // mint
    RGB8::new(0xF7, 0xDC, 0x6F), // yellow
    RGB8::new(0xBB, 0x8F, 0xCE), // light purple
    RGB8::new(0x85, 0xC1, 0xE2), // sky blue
    RGB8::new(0xF8, 0xB7, 0x39), // gold
    RGB8::new(0x52, 0xB7, 0x88), // green
];

/// Clusters past the tenth reuse earlier colours.
#[inline]
pub fn color_for(cluster_index: usize) -> RGB8 {
    PALETTE[cluster_index % PALETTE.len()]
}

pub fn to_hex(color: RGB8) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}
