//! Domain to ASCII
//!
//! Lowercases ASCII labels and Punycode-encodes (RFC 3492) labels holding
//! non-ASCII code points. UTS #46 mapping and validity rules are not applied.

use crate::error::ParseError;

const BASE: u32 = 36;
const T_MIN: u32 = 1;
const T_MAX: u32 = 26;
const SKEW: u32 = 38;
const DAMP: u32 = 700;
const INITIAL_BIAS: u32 = 72;
const INITIAL_N: u32 = 128;

const ACE_PREFIX: &str = "xn--";

fn adapt(delta: u32, num_points: u32, first_time: bool) -> u32 {
    let mut delta = if first_time { delta / DAMP } else { delta / 2 };
    delta += delta / num_points;

    let mut k = 0;
    while delta > ((BASE - T_MIN) * T_MAX) / 2 {
        delta /= BASE - T_MIN;
        k += BASE;
    }

    k + (((BASE - T_MIN + 1) * delta) / (delta + SKEW))
}

fn threshold(k: u32, bias: u32) -> u32 {
    if k <= bias {
        T_MIN
    } else if k >= bias + T_MAX {
        T_MAX
    } else {
        k - bias
    }
}

fn encode_digit(d: u32) -> char {
    if d < 26 {
        (d as u8 + b'a') as char
    } else {
        (d as u8 - 26 + b'0') as char
    }
}

fn decode_digit(c: char) -> Option<u32> {
    match c {
        'a'..='z' => Some(c as u32 - 'a' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32),
        '0'..='9' => Some(c as u32 - '0' as u32 + 26),
        _ => None,
    }
}

/// Encode a Unicode label to Punycode (without the `xn--` prefix)
pub fn punycode_encode(input: &str) -> Option<String> {
    let code_points: Vec<u32> = input.chars().map(|c| c as u32).collect();
    let mut output: String = input.chars().filter(char::is_ascii).collect();

    let basic_len = output.len() as u32;
    let mut handled = basic_len;
    if basic_len > 0 {
        output.push('-');
    }

    let mut n = INITIAL_N;
    let mut delta = 0u32;
    let mut bias = INITIAL_BIAS;

    while (handled as usize) < code_points.len() {
        let m = code_points.iter().copied().filter(|&c| c >= n).min()?;
        delta = delta.checked_add((m - n).checked_mul(handled + 1)?)?;
        n = m;

        for &c in &code_points {
            if c < n {
                delta = delta.checked_add(1)?;
            }
            if c == n {
                let mut q = delta;
                let mut k = BASE;
                loop {
                    let t = threshold(k, bias);
                    if q < t {
                        break;
                    }
                    output.push(encode_digit(t + (q - t) % (BASE - t)));
                    q = (q - t) / (BASE - t);
                    k += BASE;
                }
                output.push(encode_digit(q));
                bias = adapt(delta, handled + 1, handled == basic_len);
                delta = 0;
                handled += 1;
            }
        }

        delta = delta.checked_add(1)?;
        n = n.checked_add(1)?;
    }

    Some(output)
}

/// Decode a Punycode label (without the `xn--` prefix)
pub fn punycode_decode(input: &str) -> Option<String> {
    let (basic, encoded) = match input.rfind('-') {
        Some(pos) => (&input[..pos], &input[pos + 1..]),
        None => ("", input),
    };
    if !basic.is_ascii() {
        return None;
    }

    let mut output: Vec<char> = basic.chars().collect();
    let mut n = INITIAL_N;
    let mut i = 0u32;
    let mut bias = INITIAL_BIAS;
    let mut chars = encoded.chars().peekable();

    while chars.peek().is_some() {
        let old_i = i;
        let mut w = 1u32;
        let mut k = BASE;

        loop {
            let digit = decode_digit(chars.next()?)?;
            i = i.checked_add(digit.checked_mul(w)?)?;
            let t = threshold(k, bias);
            if digit < t {
                break;
            }
            w = w.checked_mul(BASE - t)?;
            k += BASE;
        }

        let out_len = output.len() as u32 + 1;
        bias = adapt(i - old_i, out_len, old_i == 0);
        n = n.checked_add(i / out_len)?;
        i %= out_len;

        output.insert(i as usize, char::from_u32(n)?);
        i += 1;
    }

    Some(output.into_iter().collect())
}

/// Convert a domain to its ASCII form
pub fn domain_to_ascii(domain: &str) -> Result<String, ParseError> {
    let mut labels = Vec::new();
    for label in domain.split('.') {
        if label.is_ascii() {
            labels.push(label.to_ascii_lowercase());
        } else {
            let encoded = punycode_encode(&label.to_lowercase()).ok_or(ParseError::IdnaError)?;
            labels.push(format!("{ACE_PREFIX}{encoded}"));
        }
    }

    let ascii = labels.join(".");
    if ascii.is_empty() {
        return Err(ParseError::IdnaError);
    }
    Ok(ascii)
}

/// Convert an ASCII domain back to Unicode for display
///
/// Labels that fail to decode are kept as is.
pub fn domain_to_unicode(domain: &str) -> String {
    domain
        .split('.')
        .map(|label| {
            label
                .get(..ACE_PREFIX.len())
                .filter(|prefix| prefix.eq_ignore_ascii_case(ACE_PREFIX))
                .and_then(|_| punycode_decode(&label[ACE_PREFIX.len()..]))
                .unwrap_or_else(|| label.to_string())
        })
        .collect::<Vec<_>>()
        .join(".")
}
