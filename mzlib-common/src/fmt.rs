//! Element formatting driven by format specs.
//!
//! A [`FormatSpec`] is parsed at runtime from a `{:...}` string, using the
//! same mini-language as `std::fmt`: `[[fill]align][+][#][0][width][.precision][type]`.
//! Elements are formatted through [`ElemFormat`], which is implemented for
//! primitives by delegating to the matching `std::fmt` trait. Other element
//! types implement [`ElemFormat`] themselves to provide their own
//! format-spec aware string.
use crate::error::{Error, Result};
use std::fmt::{self, Display, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatKind {
    #[default]
    Display,
    Debug,
    LowerHex,
    UpperHex,
    Binary,
    Octal,
    LowerExp,
    UpperExp,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Option<Align>,
    pub sign_plus: bool,
    pub alternate: bool,
    pub zero_pad: bool,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub kind: FormatKind,
}

impl Default for FormatSpec {
    #[inline]
    fn default() -> Self {
        FormatSpec {
            fill: ' ',
            align: None,
            sign_plus: false,
            alternate: false,
            zero_pad: false,
            width: None,
            precision: None,
            kind: FormatKind::Display,
        }
    }
}

#[inline]
fn parse_align(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        _ => None,
    }
}

#[inline]
fn parse_digits(chars: &[char], pos: &mut usize) -> Option<usize> {
    let start = *pos;
    let mut n = 0usize;
    while let Some(d) = chars.get(*pos).and_then(|c| c.to_digit(10)) {
        n = n.checked_mul(10)?.checked_add(d as usize)?;
        *pos += 1;
    }
    if *pos == start {
        None
    } else {
        Some(n)
    }
}

impl FormatSpec {
    /// Parse a format spec such as `{}`, `{:>8.3}` or `{:#x}`.
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = || Error::InvalidArgument(format!("invalid format spec {:?}", spec));
        let inner = spec
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(invalid)?;
        let mut res = FormatSpec::default();
        if inner.is_empty() {
            return Ok(res);
        }
        let inner = inner.strip_prefix(':').ok_or_else(invalid)?;
        let chars: Vec<char> = inner.chars().collect();
        let mut pos = 0;
        if let Some(align) = chars.get(1).and_then(|c| parse_align(*c)) {
            res.fill = chars[0];
            res.align = Some(align);
            pos = 2;
        } else if let Some(align) = chars.first().and_then(|c| parse_align(*c)) {
            res.align = Some(align);
            pos = 1;
        }
        if chars.get(pos) == Some(&'+') {
            res.sign_plus = true;
            pos += 1;
        }
        if chars.get(pos) == Some(&'#') {
            res.alternate = true;
            pos += 1;
        }
        if chars.get(pos) == Some(&'0') {
            res.zero_pad = true;
            pos += 1;
        }
        res.width = parse_digits(&chars, &mut pos);
        if chars.get(pos) == Some(&'.') {
            pos += 1;
            res.precision = Some(parse_digits(&chars, &mut pos).ok_or_else(invalid)?);
        }
        if let Some(c) = chars.get(pos) {
            res.kind = match c {
                '?' => FormatKind::Debug,
                'x' => FormatKind::LowerHex,
                'X' => FormatKind::UpperHex,
                'b' => FormatKind::Binary,
                'o' => FormatKind::Octal,
                'e' => FormatKind::LowerExp,
                'E' => FormatKind::UpperExp,
                _ => return Err(invalid()),
            };
            pos += 1;
        }
        if pos != chars.len() {
            return Err(invalid());
        }
        Ok(res)
    }

    /// Capture the options of a `std::fmt::Formatter`.
    #[inline]
    pub fn from_formatter(f: &fmt::Formatter<'_>) -> Self {
        FormatSpec {
            fill: f.fill(),
            align: f.align().map(|a| match a {
                fmt::Alignment::Left => Align::Left,
                fmt::Alignment::Right => Align::Right,
                fmt::Alignment::Center => Align::Center,
            }),
            sign_plus: f.sign_plus(),
            alternate: f.alternate(),
            zero_pad: f.sign_aware_zero_pad(),
            width: f.width(),
            precision: f.precision(),
            kind: FormatKind::Display,
        }
    }

    /// Format a value through its `Display` impl, honoring precision.
    #[inline]
    pub fn format_display<T: Display + ?Sized>(&self, value: &T, buf: &mut String) {
        let body = match self.precision {
            Some(p) => format!("{:.*}", p, value),
            None => value.to_string(),
        };
        self.pad_numeric(&body, buf);
    }

    /// Write a formatted number applying sign, zero padding and alignment.
    /// Numbers are right aligned unless specified otherwise.
    pub fn pad_numeric(&self, body: &str, buf: &mut String) {
        let signed;
        let body = if self.sign_plus && !body.starts_with('-') {
            signed = format!("+{}", body);
            &signed
        } else {
            body
        };
        let len = body.chars().count();
        match self.width {
            Some(width) if width > len && self.zero_pad => {
                let (sign, digits) = match body.chars().next() {
                    Some(c @ ('+' | '-')) => (Some(c), &body[1..]),
                    _ => (None, body),
                };
                if let Some(c) = sign {
                    buf.push(c);
                }
                buf.extend(std::iter::repeat('0').take(width - len));
                buf.push_str(digits);
            }
            _ => self.pad_with(body, Align::Right, buf),
        }
    }

    /// Write a formatted text applying fill and alignment.
    /// Text is left aligned unless specified otherwise.
    #[inline]
    pub fn pad_text(&self, body: &str, buf: &mut String) {
        self.pad_with(body, Align::Left, buf)
    }

    fn pad_with(&self, body: &str, default_align: Align, buf: &mut String) {
        let len = body.chars().count();
        let pad = match self.width {
            Some(width) if width > len => width - len,
            _ => {
                buf.push_str(body);
                return;
            }
        };
        let (before, after) = match self.align.unwrap_or(default_align) {
            Align::Left => (0, pad),
            Align::Right => (pad, 0),
            Align::Center => (pad / 2, pad - pad / 2),
        };
        buf.extend(std::iter::repeat(self.fill).take(before));
        buf.push_str(body);
        buf.extend(std::iter::repeat(self.fill).take(after));
    }
}

/// Formatting hook of a single element.
pub trait ElemFormat {
    fn format_elem(&self, spec: &FormatSpec, buf: &mut String);
}

impl<T: ElemFormat + ?Sized> ElemFormat for &T {
    #[inline]
    fn format_elem(&self, spec: &FormatSpec, buf: &mut String) {
        (**self).format_elem(spec, buf)
    }
}

macro_rules! impl_int_format {
    ($($ty:ty),*) => {
        $(
            impl ElemFormat for $ty {
                #[inline]
                fn format_elem(&self, spec: &FormatSpec, buf: &mut String) {
                    let body = match (spec.kind, spec.alternate) {
                        (FormatKind::LowerHex, false) => format!("{:x}", self),
                        (FormatKind::LowerHex, true) => format!("{:#x}", self),
                        (FormatKind::UpperHex, false) => format!("{:X}", self),
                        (FormatKind::UpperHex, true) => format!("{:#X}", self),
                        (FormatKind::Binary, false) => format!("{:b}", self),
                        (FormatKind::Binary, true) => format!("{:#b}", self),
                        (FormatKind::Octal, false) => format!("{:o}", self),
                        (FormatKind::Octal, true) => format!("{:#o}", self),
                        (FormatKind::LowerExp, _) => format!("{:e}", self),
                        (FormatKind::UpperExp, _) => format!("{:E}", self),
                        (FormatKind::Display | FormatKind::Debug, _) => {
                            return spec.format_display(self, buf)
                        }
                    };
                    spec.pad_numeric(&body, buf)
                }
            }
        )*
    };
}

impl_int_format!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float_format {
    ($($ty:ty),*) => {
        $(
            impl ElemFormat for $ty {
                #[inline]
                fn format_elem(&self, spec: &FormatSpec, buf: &mut String) {
                    let body = match (spec.kind, spec.precision) {
                        (FormatKind::LowerExp, Some(p)) => format!("{:.*e}", p, self),
                        (FormatKind::LowerExp, None) => format!("{:e}", self),
                        (FormatKind::UpperExp, Some(p)) => format!("{:.*E}", p, self),
                        (FormatKind::UpperExp, None) => format!("{:E}", self),
                        (FormatKind::Debug, None) => format!("{:?}", self),
                        _ => return spec.format_display(self, buf),
                    };
                    spec.pad_numeric(&body, buf)
                }
            }
        )*
    };
}

impl_float_format!(f32, f64);

macro_rules! impl_text_format {
    ($($ty:ty),*) => {
        $(
            impl ElemFormat for $ty {
                #[inline]
                fn format_elem(&self, spec: &FormatSpec, buf: &mut String) {
                    let body = match spec.kind {
                        FormatKind::Debug => format!("{:?}", self),
                        _ => self.to_string(),
                    };
                    spec.pad_text(&body, buf)
                }
            }
        )*
    };
}

impl_text_format!(bool, char, str, String);

/// Format `len` elements into buffer, joined by separator and
/// surrounded by the first two characters of the enclosure.
/// An enclosure shorter than two characters is omitted.
pub fn format_sequence_to<F>(buf: &mut String, len: usize, sep: &str, enc: &str, mut f: F)
where
    F: FnMut(usize, &mut String),
{
    let mut enc_chars = enc.chars();
    let enclosure = match (enc_chars.next(), enc_chars.next()) {
        (Some(open), Some(close)) => Some((open, close)),
        _ => None,
    };
    if let Some((open, _)) = enclosure {
        buf.push(open);
    }
    for i in 0..len {
        if i > 0 {
            buf.push_str(sep);
        }
        f(i, buf);
    }
    if let Some((_, close)) = enclosure {
        buf.push(close);
    }
}

/// Format a single element into a new string.
#[inline]
pub fn format_elem<T: ElemFormat + ?Sized>(value: &T, spec: &FormatSpec) -> String {
    let mut buf = String::new();
    value.format_elem(spec, &mut buf);
    buf
}

/// Adapter that writes an element through its `ElemFormat` impl
/// into a `std::fmt::Formatter`, respecting the formatter options.
pub struct ElemDisplay<'a, T: ?Sized>(pub &'a T);

impl<T: ElemFormat + ?Sized> Display for ElemDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = FormatSpec::from_formatter(f);
        let mut buf = String::new();
        self.0.format_elem(&spec, &mut buf);
        f.write_str(&buf)
    }
}

impl Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{:")?;
        if let Some(align) = self.align {
            f.write_char(self.fill)?;
            f.write_char(match align {
                Align::Left => '<',
                Align::Right => '>',
                Align::Center => '^',
            })?;
        }
        if self.sign_plus {
            f.write_char('+')?;
        }
        if self.alternate {
            f.write_char('#')?;
        }
        if self.zero_pad {
            f.write_char('0')?;
        }
        if let Some(width) = self.width {
            write!(f, "{}", width)?;
        }
        if let Some(precision) = self.precision {
            write!(f, ".{}", precision)?;
        }
        let ty = match self.kind {
            FormatKind::Display => "",
            FormatKind::Debug => "?",
            FormatKind::LowerHex => "x",
            FormatKind::UpperHex => "X",
            FormatKind::Binary => "b",
            FormatKind::Octal => "o",
            FormatKind::LowerExp => "e",
            FormatKind::UpperExp => "E",
        };
        f.write_str(ty)?;
        f.write_char('}')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt_one<T: ElemFormat>(spec: &str, v: T) -> String {
        format_elem(&v, &FormatSpec::parse(spec).unwrap())
    }

    #[test]
    fn test_parse_format_spec() {
        assert_eq!(FormatSpec::default(), FormatSpec::parse("{}").unwrap());
        let spec = FormatSpec::parse("{:*^+#010.3x}").unwrap();
        assert_eq!('*', spec.fill);
        assert_eq!(Some(Align::Center), spec.align);
        assert!(spec.sign_plus && spec.alternate && spec.zero_pad);
        assert_eq!(Some(10), spec.width);
        assert_eq!(Some(3), spec.precision);
        assert_eq!(FormatKind::LowerHex, spec.kind);
        assert_eq!("{:*^+#010.3x}", spec.to_string());
        let spec = FormatSpec::parse("{:>6}").unwrap();
        assert_eq!(Some(Align::Right), spec.align);
        assert_eq!(' ', spec.fill);
        assert_eq!(Some(6), spec.width);
    }

    #[test]
    fn test_parse_invalid_format_spec() {
        for spec in ["", "{", "{:", "{x}", "{:.}", "{:5q}", "{:>5.2xx}"] {
            assert!(FormatSpec::parse(spec).is_err(), "spec {:?}", spec);
        }
    }

    #[test]
    fn test_format_numbers() {
        assert_eq!("42", fmt_one("{}", 42i32));
        assert_eq!("   42", fmt_one("{:5}", 42i32));
        assert_eq!("42   ", fmt_one("{:<5}", 42i32));
        assert_eq!("+0042", fmt_one("{:+05}", 42i32));
        assert_eq!("-0042", fmt_one("{:05}", -42i64));
        assert_eq!("0xff", fmt_one("{:#x}", 255u8));
        assert_eq!("FF", fmt_one("{:X}", 255u32));
        assert_eq!("101", fmt_one("{:b}", 5u16));
        assert_eq!("3.14", fmt_one("{:.2}", 3.14159f64));
        assert_eq!("  3.1", fmt_one("{:>5.1}", 3.14159f32));
        assert_eq!("1.50e0", fmt_one("{:.2e}", 1.5f64));
        assert_eq!("1.0", fmt_one("{:?}", 1.0f64));
    }

    #[test]
    fn test_format_text() {
        assert_eq!("ab  ", fmt_one("{:4}", "ab".to_string()));
        assert_eq!("\"ab\"", fmt_one("{:?}", "ab".to_string()));
        assert_eq!("-true-", fmt_one("{:-^6}", true));
        assert_eq!("'c'", fmt_one("{:?}", 'c'));
    }

    #[test]
    fn test_format_sequence_to() {
        let vals = [1, 2, 3];
        let spec = FormatSpec::default();
        let mut buf = String::new();
        format_sequence_to(&mut buf, vals.len(), ",", "[]", |i, buf| {
            vals[i].format_elem(&spec, buf)
        });
        assert_eq!("[1,2,3]", buf);

        let mut buf = String::new();
        format_sequence_to(&mut buf, vals.len(), "; ", "", |i, buf| {
            vals[i].format_elem(&spec, buf)
        });
        assert_eq!("1; 2; 3", buf);

        let mut buf = String::new();
        format_sequence_to(&mut buf, 0, ",", "()", |_, _| unreachable!());
        assert_eq!("()", buf);
    }

    #[test]
    fn test_elem_display() {
        assert_eq!("  1.50", format!("{:6.2}", ElemDisplay(&1.5f64)));
        assert_eq!("7", format!("{}", ElemDisplay(&7u8)));
    }
}
