// ── Gateway color palette ──
//
// Gateways within one snapshot are disambiguated by position: record i
// gets palette entry i mod len. The palette is an injected value, not a
// module singleton, so callers (and tests) can substitute their own.

/// One palette color: a display name plus an RGB value the UI maps onto
/// its rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub rgb: (u8, u8, u8),
}

pub const GREEN: PaletteEntry = PaletteEntry {
    name: "green",
    rgb: (0, 170, 60),
};
pub const ORANGE: PaletteEntry = PaletteEntry {
    name: "orange",
    rgb: (255, 150, 20),
};
pub const PURPLE: PaletteEntry = PaletteEntry {
    name: "purple",
    rgb: (160, 70, 220),
};
pub const RED: PaletteEntry = PaletteEntry {
    name: "red",
    rgb: (220, 50, 50),
};
pub const BLUE: PaletteEntry = PaletteEntry {
    name: "blue",
    rgb: (50, 110, 230),
};

/// Fixed ordered set of colors for gateway disambiguation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: vec![GREEN, ORANGE, PURPLE, RED, BLUE],
        }
    }
}

impl Palette {
    /// Build a palette from a custom entry list. Returns `None` for an
    /// empty list — a palette must have at least one color.
    pub fn new(entries: Vec<PaletteEntry>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        // Guaranteed non-empty by construction.
        false
    }

    /// The color for the record at `index` within a reception sequence.
    /// Pure and total: wraps around the palette.
    pub fn color_for(&self, index: usize) -> PaletteEntry {
        self.entries[index % self.entries.len()]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_order() {
        let p = Palette::default();
        assert_eq!(p.len(), 5);
        assert_eq!(p.color_for(0).name, "green");
        assert_eq!(p.color_for(1).name, "orange");
        assert_eq!(p.color_for(2).name, "purple");
        assert_eq!(p.color_for(3).name, "red");
        assert_eq!(p.color_for(4).name, "blue");
    }

    #[test]
    fn color_wraps_around_palette_size() {
        let p = Palette::default();
        for i in 0..20 {
            assert_eq!(p.color_for(i), p.color_for(i + p.len()));
        }
    }

    #[test]
    fn custom_palette_wraps_at_its_own_size() {
        let p = Palette::new(vec![RED, BLUE]).unwrap();
        assert_eq!(p.color_for(0), RED);
        assert_eq!(p.color_for(1), BLUE);
        assert_eq!(p.color_for(2), RED);
        assert_eq!(p.color_for(5), BLUE);
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(Palette::new(Vec::new()).is_none());
    }
}
