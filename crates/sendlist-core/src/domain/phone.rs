use crate::error::CoreError;

const MAX_LOCAL_DIGITS: usize = 10;
const MAX_COUNTRY_CODE_DIGITS: usize = 4;

/// Maps a raw phone string onto its canonical send form.
///
/// The rules are a heuristic, applied in a fixed order:
///
/// 1. keep ASCII digits and a leading `+`; nothing left means `None`
/// 2. an international `00` prefix becomes `+`
/// 3. anything starting with `+` is returned as is
/// 4. a trunk `0` is replaced by `default_country_code`
/// 5. numbers of up to ten digits get `default_country_code` prepended
/// 6. everything else passes through unchanged
///
/// Outputs that start with `+` are fixed points of this function.
pub fn normalize_phone(raw: &str, default_country_code: Option<&str>) -> Option<String> {
    let stripped = strip_formatting(raw);
    if stripped.is_empty() {
        return None;
    }
    let value = match stripped.strip_prefix("00") {
        Some(rest) => format!("+{rest}"),
        None => stripped,
    };

    if value.starts_with('+') {
        return Some(value);
    }

    if let Some(code) = default_country_code {
        if let Some(national) = value.strip_prefix('0') {
            return Some(format!("{code}{national}"));
        }
        if value.len() <= MAX_LOCAL_DIGITS {
            return Some(format!("{code}{value}"));
        }
    }

    Some(value)
}

fn strip_formatting(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
        } else if ch == '+' && out.is_empty() {
            out.push(ch);
        }
    }
    out
}

/// Canonicalises a user supplied country code (`92`, `+92`, `0092`) to `+92`.
pub fn parse_country_code(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix('+')
        .or_else(|| trimmed.strip_prefix("00"))
        .unwrap_or(trimmed);

    let valid = !digits.is_empty()
        && digits.len() <= MAX_COUNTRY_CODE_DIGITS
        && digits.bytes().all(|b| b.is_ascii_digit())
        && !digits.starts_with('0');
    if !valid {
        return Err(CoreError::InvalidCountryCode(raw.to_string()));
    }

    Ok(format!("+{digits}"))
}
