//! Radix-aware reading and writing of decorated `Value` attributes.
//!
//! Integers may be stored in decimal, hex (`16#`), octal (`8#`), binary (`2#`)
//! or ASCII (`'...'`) notation with `_` digit groups. Non-decimal notations
//! hold the two's complement bit pattern of the value at the type's width.

use crate::types::Atomic;

/// Parses an integer attribute for a value of type `atomic`.
pub(crate) fn parse_integer(text: &str, atomic: Atomic) -> Option<i64> {
    let text = text.trim();
    let bits = atomic.bits();

    let raw = if let Some(body) = text.strip_prefix('\'') {
        parse_ascii(body.strip_suffix('\'')?)?
    } else if let Some((base, digits)) = split_base(text) {
        let digits: String = digits.chars().filter(|c| *c != '_').collect();
        u64::from_str_radix(&digits, base).ok()?
    } else {
        let value: i64 = text.replace('_', "").parse().ok()?;
        let (min, max) = atomic.range()?;
        return (min..=max).contains(&value).then_some(value);
    };

    if bits < 64 && raw >> bits != 0 {
        return None;
    }
    if atomic == Atomic::Bool {
        return i64::try_from(raw).ok();
    }
    Some(sign_extend(raw, bits))
}

/// Formats `value` in the notation named by `radix`, decimal by default.
pub(crate) fn format_integer(value: i64, atomic: Atomic, radix: Option<&str>) -> String {
    if atomic == Atomic::Bool {
        return value.to_string();
    }
    let bits = atomic.bits();
    let raw = (value as u64) & mask(bits);
    let width = bits as usize;

    match radix {
        Some(r) if r.eq_ignore_ascii_case("Hex") => {
            format!("16#{}", group(&format!("{raw:0w$x}", w = width / 4), 4))
        }
        Some(r) if r.eq_ignore_ascii_case("Binary") => {
            format!("2#{}", group(&format!("{raw:0width$b}"), 4))
        }
        Some(r) if r.eq_ignore_ascii_case("Octal") => {
            format!("8#{}", group(&format!("{raw:0w$o}", w = width.div_ceil(3)), 3))
        }
        Some(r) if r.eq_ignore_ascii_case("ASCII") => format_ascii(raw, bits),
        _ => value.to_string(),
    }
}

/// Reduces `value` to the two's complement range of `atomic`.
pub(crate) fn wrap(value: i64, atomic: Atomic) -> i64 {
    if atomic == Atomic::Bool {
        return value & 1;
    }
    sign_extend((value as u64) & mask(atomic.bits()), atomic.bits())
}

pub(crate) fn parse_real(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

/// Formats a REAL in `Float` notation, or `Exponential` when asked.
pub(crate) fn format_real(value: f64, radix: Option<&str>) -> String {
    match radix {
        Some(r) if r.eq_ignore_ascii_case("Exponential") => {
            // Eight fraction digits unless the value needs more to read back.
            let fixed = format!("{value:.8e}");
            let formatted = if fixed.parse::<f64>().ok() == Some(value) {
                fixed
            } else {
                format!("{value:e}")
            };
            pad_exponent(&formatted)
        }
        _ => format!("{value:?}"),
    }
}

/// Rewrites a Rust exponent such as `e-4` as `e-004`.
fn pad_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or_default();
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:03}", exp.abs())
        }
        None => formatted.to_string(),
    }
}

fn split_base(text: &str) -> Option<(u32, &str)> {
    [("16#", 16), ("8#", 8), ("2#", 2)]
        .into_iter()
        .find_map(|(prefix, base)| text.strip_prefix(prefix).map(|digits| (base, digits)))
}

fn mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

fn sign_extend(raw: u64, bits: u32) -> i64 {
    if bits >= 64 {
        return raw as i64;
    }
    let shift = 64 - bits;
    ((raw << shift) as i64) >> shift
}

fn group(digits: &str, size: usize) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / size);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % size == 0 {
            out.push('_');
        }
        out.push(c);
    }
    out
}

fn parse_ascii(body: &str) -> Option<u64> {
    let mut bytes = Vec::new();
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '$' {
            bytes.push(u8::try_from(c).ok()?);
            continue;
        }
        let byte = match chars.next()? {
            '$' => b'$',
            '\'' => b'\'',
            'L' | 'l' | 'N' | 'n' => b'\n',
            'P' | 'p' => 0x0c,
            'R' | 'r' => b'\r',
            'T' | 't' => b'\t',
            high => {
                let low = chars.next()?;
                let pair: String = [high, low].into_iter().collect();
                u8::from_str_radix(&pair, 16).ok()?
            }
        };
        bytes.push(byte);
    }
    if bytes.len() > 8 {
        return None;
    }
    Some(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

fn format_ascii(raw: u64, bits: u32) -> String {
    let mut out = String::from("'");
    for i in (0..bits / 8).rev() {
        let byte = ((raw >> (i * 8)) & 0xff) as u8;
        match byte {
            b'$' => out.push_str("$$"),
            b'\'' => out.push_str("$'"),
            0x20..=0x7e => out.push(char::from(byte)),
            _ => out.push_str(&format!("${byte:02X}")),
        }
    }
    out.push('\'');
    out
}
