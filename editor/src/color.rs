//! Category color parsing.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Parse `#RGB` or `#RRGGBB` into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| channel(&c.to_string().repeat(2)));
            Some((it.next()??, it.next()??, it.next()??))
        }
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

/// Canonical lowercase `#rrggbb` form of a color, or `None` if it is not a hex color.
#[must_use]
pub fn canonical_hex(raw: &str) -> Option<String> {
    let (r, g, b) = parse_hex_rgb(raw)?;
    Some(format!("#{r:02x}{g:02x}{b:02x}"))
}
