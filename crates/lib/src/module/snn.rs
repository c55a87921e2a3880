//! Safety network number codec.
//!
//! A safety network number (SNN) is a 48-bit value. Documents store it in the
//! `SafetyNetwork` attribute as `16#0000_hhhh_hhhh_hhhh`: a radix prefix, the
//! unused upper 16 bits of a 64-bit word, then the value in 4-digit groups.
//! The canonical form handed to callers is 12 uppercase hex digits.

use super::ModuleError;

/// Attribute holding the SNN on modules and ports.
pub(crate) const ATTRIBUTE: &str = "SafetyNetwork";

const RADIX_PREFIX: &str = "16#";
const DIGITS: usize = 12;

/// Converts a stored attribute value to canonical form.
pub fn decode(raw: &str) -> String {
    let body = strip_radix(raw.trim());
    let digits: Vec<char> = body
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let start = digits.len().saturating_sub(DIGITS);
    let digits: String = digits[start..].iter().collect();
    format!("{digits:0>DIGITS$}")
}

/// Validates user input and converts it to the stored attribute form.
///
/// Input may contain `_` separators, a `16#` prefix, and need not be padded.
pub fn encode(input: &str) -> Result<String, ModuleError> {
    let invalid = |reason: &str| ModuleError::InvalidSafetyNetworkNumber {
        value: input.to_string(),
        reason: reason.to_string(),
    };

    let digits: String = strip_radix(input.trim())
        .chars()
        .filter(|c| *c != '_')
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("not a hexadecimal number"));
    }
    let significant = digits.trim_start_matches('0');
    if significant.len() > DIGITS {
        return Err(invalid("exceeds 48 bits"));
    }

    let canonical = format!("{:0>DIGITS$}", significant.to_ascii_uppercase());
    Ok(format!(
        "{RADIX_PREFIX}0000_{}_{}_{}",
        &canonical[0..4],
        &canonical[4..8],
        &canonical[8..12]
    ))
}

fn strip_radix(text: &str) -> &str {
    match text.get(..RADIX_PREFIX.len()) {
        Some(prefix) if prefix == RADIX_PREFIX => &text[RADIX_PREFIX.len()..],
        _ => text,
    }
}
