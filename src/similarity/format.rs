// Score formatting — floats rendered the way Python's `str(float)` does.
//
// Clients of the service compare the response text, so whole numbers keep a
// trailing `.0` ("1.0", "0.0") and very small or very large magnitudes use a
// signed two-digit exponent ("1.5e-05", "1e+16").

/// Render a float as text for responses and stored blobs.
pub fn format_score(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return exponent_form(value);
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

fn exponent_form(value: f64) -> String {
    let sci = format!("{value:e}");
    match sci.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => sci,
    }
}
