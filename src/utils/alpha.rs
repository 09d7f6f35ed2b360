//! Bijective base-26 numerals (`A`=1 .. `Z`=26, `AA`=27, ...) and the
//! fixed-width row labels built on top of them for fast select.

/// Number of digits in the alphabet
pub const RADIX: usize = 26;

/// Encode a positive integer as a bijective base-26 numeral.
///
/// There is no zero digit, so `0` has no representation and yields an
/// empty string.
pub fn to_alpha(mut value: usize) -> String {
    let mut digits = Vec::new();

    while value > 0 {
        let rem = (value - 1) % RADIX;
        digits.push((b'A' + rem as u8) as char);
        value = (value - 1) / RADIX;
    }

    digits.iter().rev().collect()
}

/// Decode a bijective base-26 numeral (case-insensitive).
///
/// Returns `None` for the empty string, non-letters, or overflow.
pub fn from_alpha(code: &str) -> Option<usize> {
    if code.is_empty() {
        return None;
    }

    let mut value: usize = 0;
    for ch in code.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        value = value.checked_mul(RADIX)?.checked_add(digit)?;
    }

    Some(value)
}

/// Smallest numeral length `w` such that every integer in `1..=capacity`
/// is encodable, i.e. `26 + 26^2 + ... + 26^w >= capacity`.
///
/// A capacity of zero needs no code at all but still reports width 1.
pub fn width_for(capacity: usize) -> usize {
    let mut width = 1;
    let mut span = RADIX;
    let mut total = RADIX;

    while total < capacity {
        width += 1;
        span = span.saturating_mul(RADIX);
        total = total.saturating_add(span);
    }

    width
}

/// Widest label whose numerals all fit in `usize` (13 on 64-bit targets)
pub const MAX_WIDTH: usize = max_width();

const fn max_width() -> usize {
    let mut width = 0;
    let mut span: usize = 1;
    let mut total: usize = 0;

    loop {
        let Some(next_span) = span.checked_mul(RADIX) else {
            return width;
        };
        let Some(next_total) = total.checked_add(next_span) else {
            return width;
        };
        span = next_span;
        total = next_total;
        width += 1;
    }
}

/// `26^width`, the number of distinct labels of exactly `width` letters
fn label_space(width: usize) -> usize {
    (0..width).fold(1usize, |acc, _| acc.saturating_mul(RADIX))
}

/// Sum of `26^i` for `i` in `1..width`: the count of numerals shorter than `width`
fn shorter_numerals(width: usize) -> usize {
    let mut span = 1usize;
    let mut total = 0usize;
    for _ in 1..width {
        span = span.saturating_mul(RADIX);
        total = total.saturating_add(span);
    }
    total
}

/// Fixed-width row labels for a list of `capacity` rows.
///
/// Row `n` (1-based) is labelled with the bijective numeral of
/// `n + 26 + ... + 26^(width-1)`, which always has exactly `width` letters:
/// at width 2 row 1 is `AA` and row 30 is `BD`. The codec is immutable;
/// build a new one whenever the row count changes.
///
/// [`width`](AlphaCodec::width) can exceed [`width_for`]: `width_for` counts
/// numerals of every length, while labels all share one length and need
/// `26^width >= capacity`. 700 rows get width 3 although `width_for(700)`
/// is 2. Widths never exceed [`MAX_WIDTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaCodec {
    width: usize,
    offset: usize,
    capacity: usize,
}

impl Default for AlphaCodec {
    fn default() -> Self {
        Self::new(0)
    }
}

impl AlphaCodec {
    /// Create a codec able to label `capacity` rows
    pub fn new(capacity: usize) -> Self {
        Self::with_min_width(capacity, 1)
    }

    /// Create a codec for `capacity` rows whose labels are at least `min_width` letters.
    ///
    /// `min_width` is clamped to `1..=MAX_WIDTH`.
    pub fn with_min_width(capacity: usize, min_width: usize) -> Self {
        let mut width = width_for(capacity).max(min_width).clamp(1, MAX_WIDTH);

        // width_for counts numerals of every length up to `width`; labels all
        // share one length, so top up until the fixed-width space suffices
        while width < MAX_WIDTH && label_space(width) < capacity {
            width += 1;
        }

        Self {
            width,
            offset: shorter_numerals(width),
            capacity,
        }
    }

    /// Number of letters in every label
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row count this codec was built for
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Label for 1-based `row`, or `None` when the row cannot be labelled at this width
    pub fn encode(&self, row: usize) -> Option<String> {
        if row == 0 || row > label_space(self.width) {
            return None;
        }
        Some(to_alpha(row.checked_add(self.offset)?))
    }

    /// 1-based row for `code`.
    ///
    /// Only codes of exactly `width` letters are addressable; anything else
    /// is still being typed and yields `None`.
    pub fn decode(&self, code: &str) -> Option<usize> {
        if code.chars().count() != self.width {
            return None;
        }
        from_alpha(code)?
            .checked_sub(self.offset)
            .filter(|row| *row >= 1)
    }
}
