use css_color_parser::Color;

use crate::error::CommonError;

pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const TRANSPARENT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Parses a CSS color string (`#000`, `rgb(...)`, `steelblue`, ...) into
/// normalized RGBA components
pub fn parse_color(value: &str) -> Result<[f32; 4], CommonError> {
    let color = value
        .trim()
        .parse::<Color>()
        .map_err(|_| CommonError::InvalidColor(value.to_string()))?;
    Ok([
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        color.a,
    ])
}

/// Returns the first color with a visible alpha channel, else black
pub fn first_usable_color<'a>(candidates: impl IntoIterator<Item = Option<&'a [f32; 4]>>) -> [f32; 4] {
    candidates
        .into_iter()
        .flatten()
        .find(|c| c[3] > 0.0 && c.iter().all(|v| v.is_finite()))
        .copied()
        .unwrap_or(BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_parse_hex_color() {
        let c = parse_color("#ff8000").unwrap();
        assert_approx_eq!(f32, c[0], 1.0);
        assert_approx_eq!(f32, c[1], 128.0 / 255.0);
        assert_approx_eq!(f32, c[2], 0.0);
        assert_approx_eq!(f32, c[3], 1.0);
    }

    #[test]
    fn test_parse_short_hex_and_named() {
        assert_eq!(parse_color("#000").unwrap(), BLACK);
        assert_eq!(parse_color("white").unwrap(), WHITE);
    }

    #[test]
    fn test_parse_invalid_color() {
        assert_eq!(
            parse_color("not-a-color"),
            Err(CommonError::InvalidColor("not-a-color".to_string()))
        );
    }

    #[test]
    fn test_first_usable_color_skips_transparent() {
        let red = [1.0, 0.0, 0.0, 1.0];
        assert_eq!(first_usable_color([Some(&TRANSPARENT), None, Some(&red)]), red);
        assert_eq!(first_usable_color([None, Some(&TRANSPARENT)]), BLACK);
    }
}
