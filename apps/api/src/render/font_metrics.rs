//! Static glyph-width tables for the three base-14 Times faces used by the PDF
//! renderer.
//!
//! Widths are in em units (AFM width / 1000). Tables cover ASCII 0x20..=0x7E
//! (95 printable characters), index = (char as usize) - 32. The handful of
//! WinAnsi punctuation characters résumés commonly contain are special-cased;
//! any other non-ASCII character falls back to `fallback_width`.

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Italic => "F3",
        }
    }

    /// PostScript name of the standard Type1 font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Times-Roman",
            FontFace::Bold => "Times-Bold",
            FontFace::Italic => "Times-Italic",
        }
    }

    pub fn metrics(self) -> &'static FontMetricTable {
        match self {
            FontFace::Regular => &TIMES_ROMAN_TABLE,
            FontFace::Bold => &TIMES_BOLD_TABLE,
            FontFace::Italic => &TIMES_ITALIC_TABLE,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    pub fallback_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            '\u{2022}' => 0.35,
            '\u{2013}' => 0.5,
            '\u{2014}' => 1.0,
            '\u{2018}' | '\u{2019}' => 0.333,
            '\u{201C}' | '\u{201D}' => 0.444,
            '\u{00A0}' => self.space_width,
            _ => self.fallback_width,
        }
    }

    /// Rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Rendered width in points at `size_pt`.
    pub fn width_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    /// Greedy word wrap at `max_width_pt`. A single word wider than the line is
    /// kept whole on its own line. Blank input yields no lines.
    pub fn wrap(&self, s: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let max_width = max_width_pt / size_pt;
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            let word_w = self.measure_str(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + self.space_width + word_w > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static TIMES_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    fallback_width: 0.5,
    space_width: 0.25,
};

static TIMES_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.555, 0.500, 0.500, 1.000, 0.833, 0.278, 0.333, 0.333, 0.500, 0.570, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.570, 0.570, 0.570, 0.500, 0.930,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.778, 0.389, 0.500, 0.778, 0.667, 0.944,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.611, 0.778, 0.722, 0.556, 0.667, 0.722, 0.722, 1.000, 0.722, 0.722, 0.667,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.581, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.500, 0.556, 0.444, 0.556, 0.444, 0.333, 0.500, 0.556, 0.278, 0.333, 0.556, 0.278, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.500, 0.556, 0.556, 0.444, 0.389, 0.333, 0.556, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.394, 0.220, 0.394, 0.520,
    ],
    fallback_width: 0.5,
    space_width: 0.25,
};

static TIMES_ITALIC_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.420, 0.500, 0.500, 0.833, 0.778, 0.214, 0.333, 0.333, 0.500, 0.675, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.675, 0.675, 0.675, 0.500, 0.920,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.611, 0.611, 0.667, 0.722, 0.611, 0.611, 0.722, 0.722, 0.333, 0.444, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.667, 0.722, 0.611, 0.722, 0.611, 0.500, 0.556, 0.722, 0.611, 0.833, 0.611, 0.556, 0.556,
        // [      \      ]      ^      _      `
        0.389, 0.278, 0.389, 0.422, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.500, 0.500, 0.444, 0.500, 0.444, 0.278, 0.500, 0.500, 0.278, 0.278, 0.444, 0.278, 0.722,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.389, 0.389, 0.278, 0.500, 0.444, 0.667, 0.444, 0.444, 0.389,
        // {      |      }      ~
        0.400, 0.275, 0.400, 0.541,
    ],
    fallback_width: 0.5,
    space_width: 0.25,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_widths_match_afm() {
        let roman = FontFace::Regular.metrics();
        assert_eq!(roman.char_width(' '), 0.25);
        assert_eq!(roman.char_width('A'), 0.722);
        assert_eq!(roman.char_width('m'), 0.778);
        assert_eq!(roman.char_width('~'), 0.541);
        assert_eq!(FontFace::Bold.metrics().char_width('W'), 1.0);
        assert_eq!(FontFace::Italic.metrics().char_width('z'), 0.389);
    }

    #[test]
    fn test_measure_str_sums_glyphs() {
        let roman = FontFace::Regular.metrics();
        // R(0.667) u(0.5) s(0.389) t(0.278)
        let w = roman.measure_str("Rust");
        assert!((w - 1.834).abs() < 1e-4, "got {w}");
        assert!((roman.width_pt("Rust", 10.0) - 18.34).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Senior Backend Engineer";
        assert!(
            FontFace::Bold.metrics().measure_str(text)
                > FontFace::Regular.metrics().measure_str(text)
        );
    }

    #[test]
    fn test_non_ascii_uses_special_cases_then_fallback() {
        let roman = FontFace::Regular.metrics();
        assert_eq!(roman.char_width('\u{2022}'), 0.35);
        assert_eq!(roman.char_width('\u{2014}'), 1.0);
        assert_eq!(roman.char_width('é'), roman.fallback_width);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let lines = FontFace::Regular.metrics().wrap("Built REST APIs", 10.0, 500.0);
        assert_eq!(lines, vec!["Built REST APIs".to_string()]);
    }

    #[test]
    fn test_wrap_breaks_long_text_and_keeps_words() {
        let text = "Designed and shipped a distributed job scheduler that processed \
                    millions of tasks per day across three regions with zero downtime";
        let lines = FontFace::Regular.metrics().wrap(text, 10.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(FontFace::Regular.metrics().width_pt(line, 10.0) <= 200.0);
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_overlong_word_gets_own_line() {
        let word = "x".repeat(200);
        let lines = FontFace::Regular.metrics().wrap(&format!("a {word} b"), 10.0, 100.0);
        assert_eq!(lines, vec!["a".to_string(), word, "b".to_string()]);
    }

    #[test]
    fn test_wrap_blank_is_empty() {
        assert!(FontFace::Regular.metrics().wrap("   ", 10.0, 100.0).is_empty());
    }
}
