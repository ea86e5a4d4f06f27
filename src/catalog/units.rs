/// Placeholder used by the catalog data for "not available".
pub const NOT_AVAILABLE: &str = "N/A";

/// Parse the leading decimal number of a string, ignoring any trailing text.
///
/// Leading whitespace is skipped. `"9500LM"` gives 9500, `"1.5 m"` gives 1.5
/// and `"Non spécifié"` gives `None`.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Brightness vocabularies found in the catalog data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessUnit {
    /// "500 ANSI Lumens"
    AnsiLumens,
    /// "9500LM", a marketing figure far above the ANSI value
    Lm,
    /// "4000 Lumens (LED)"
    LedLumens,
}

impl BrightnessUnit {
    /// Detect the unit from its marker. Markers are checked in a fixed order,
    /// so "ANSI Lumens" wins over anything else in the same string.
    pub fn detect(raw: &str) -> Option<Self> {
        if raw.contains("ANSI Lumens") {
            Some(BrightnessUnit::AnsiLumens)
        } else if raw.contains("LM") {
            Some(BrightnessUnit::Lm)
        } else if raw.contains("Lumens (LED)") {
            Some(BrightnessUnit::LedLumens)
        } else {
            None
        }
    }

    /// Text removed from the raw value before the number is read.
    fn suffix(self) -> &'static str {
        match self {
            BrightnessUnit::AnsiLumens => " ANSI Lumens",
            BrightnessUnit::Lm => "LM",
            BrightnessUnit::LedLumens => " Lumens (LED)",
        }
    }

    /// Divisor turning a value in this unit into ANSI-equivalent lumens.
    pub fn ansi_divisor(self) -> f64 {
        match self {
            BrightnessUnit::AnsiLumens => 1.0,
            BrightnessUnit::Lm => 50.0,
            BrightnessUnit::LedLumens => 20.0,
        }
    }
}

/// A brightness value with a recognized unit. `value` is `None` when the unit
/// marker is present but no number could be read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brightness {
    pub unit: BrightnessUnit,
    pub value: Option<f64>,
}

impl Brightness {
    /// Brightness in ANSI-equivalent lumens, used for band filtering
    pub fn ansi_equivalent(&self) -> Option<f64> {
        self.value.map(|v| v / self.unit.ansi_divisor())
    }
}

/// Parse a brightness string. Returns `None` when no known unit is present.
pub fn parse_brightness(raw: &str) -> Option<Brightness> {
    let unit = BrightnessUnit::detect(raw)?;
    let stripped = raw.replacen(unit.suffix(), "", 1);
    Some(Brightness {
        unit,
        value: parse_leading_number(stripped.trim()),
    })
}

/// Multiplicity of a port descriptor: "HDMI x2" counts twice, "USB-A" once.
/// Counts too large for a `u64` saturate.
pub fn port_multiplicity(port: &str) -> u64 {
    port.match_indices('x')
        .find_map(|(i, _)| {
            let digits: String = port[i + 1..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if digits.is_empty() {
                None
            } else {
                Some(digits.parse().unwrap_or(u64::MAX))
            }
        })
        .unwrap_or(1)
}

/// Value is present and not the "N/A" placeholder
pub fn is_available(raw: Option<&str>) -> bool {
    matches!(raw, Some(s) if !s.is_empty() && s != NOT_AVAILABLE)
}
