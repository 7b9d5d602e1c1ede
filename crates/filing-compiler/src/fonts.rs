//! Built-in font metrics for the two faces courts expect.
//!
//! Advance widths are the Adobe AFM tables for the base-14 Times faces, in
//! 1000-unit em space, covering printable ASCII. Characters outside the
//! table measure at the 500-unit fallback, which is wide enough that wrapped
//! lines never overflow the margin.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    TimesRoman,
    TimesBold,
}

impl Font {
    /// PDF base-font name.
    pub fn base_name(&self) -> &'static str {
        match self {
            Font::TimesRoman => "Times-Roman",
            Font::TimesBold => "Times-Bold",
        }
    }

    /// Resource key inside each page's font dictionary.
    pub fn resource_key(&self) -> &'static str {
        match self {
            Font::TimesRoman => "F1",
            Font::TimesBold => "F2",
        }
    }

    fn widths(&self) -> &'static [u16; 95] {
        match self {
            Font::TimesRoman => &TIMES_ROMAN_WIDTHS,
            Font::TimesBold => &TIMES_BOLD_WIDTHS,
        }
    }

    fn char_width(&self, c: char) -> u16 {
        let code = c as u32;
        if (0x20..=0x7e).contains(&code) {
            self.widths()[(code - 0x20) as usize]
        } else {
            500
        }
    }
}

/// Measure the advance width of `text` at `size` points.
pub fn measure_width(text: &str, font: Font, size: f64) -> f64 {
    let units: u64 = text.chars().map(|c| font.char_width(c) as u64).sum();
    units as f64 * size / 1000.0
}

/// Times-Roman AFM widths for characters 0x20..=0x7e.
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278, // sp..'/'
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444, // 0..'?'
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722, // @..O
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500, // P.._
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500, // `..o
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541, // p..~
];

/// Times-Bold AFM widths for characters 0x20..=0x7e.
const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];
