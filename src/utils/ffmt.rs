//! printf-like number formatting for tooltips and statistics.
//!
//! Formats look like `6.4g`, `5.2e` or `8.3f`: the width is ignored, the
//! precision after the dot is kept (4 when missing), and the trailing letter
//! selects fixed, exponential or the shorter of the two at that many
//! significant digits.

fn fixed(value: f64, prec: usize) -> String {
    format!("{:.*}", prec, value)
}

/// Exponential notation with an explicit exponent sign, e.g. `1.50e+3`.
fn exponential(value: f64, prec: usize) -> String {
    let s = format!("{:.*e}", prec, value);
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

/// Fixed notation keeping `prec` significant digits.
fn fixed_significant(value: f64, prec: usize) -> String {
    let mut prec = prec as i64;
    let mut sg = fixed(value, prec as usize);
    if value != 0.0 && sg.parse::<f64>().map_or(false, |v| v == 0.0) && prec > 0 {
        prec = 40;
        sg = fixed(value, 40);
    }
    let lead = sg
        .chars()
        .take_while(|c| matches!(c, '0' | '-' | '.'))
        .count() as i64;
    let mut diff = sg.len() as i64 - lead - prec;
    if sg.find('.').is_some_and(|dot| dot as i64 > lead) {
        diff -= 1;
    }
    if diff != 0 {
        prec = (prec - diff).max(0);
        sg = fixed(value, prec as usize);
    }
    sg
}

pub fn ffmt(value: f64, fmt: &str) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let fmt = fmt.trim();
    let fmt = if fmt.is_empty() { "6.4g" } else { fmt };
    let Some(last) = fmt.chars().last().filter(|_| fmt.chars().count() >= 2) else {
        return fixed(value, 4);
    };
    let body = &fmt[..fmt.len() - last.len_utf8()];
    let prec = body
        .split_once('.')
        .and_then(|(_, p)| p.parse::<usize>().ok())
        .unwrap_or(4);

    match last {
        'e' | 'E' => exponential(value, prec),
        'f' | 'F' => fixed(value, prec),
        'g' | 'G' => {
            if value == 0.0 {
                return "0".into();
            }
            let se = exponential(value, prec.saturating_sub(1));
            let sg = fixed_significant(value, prec);
            if se.len() < sg.len() {
                se
            } else {
                sg
            }
        }
        _ => fixed(value, 4),
    }
}
