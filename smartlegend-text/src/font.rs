use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SmartLegendTextError;
use crate::types::{FontStyle, FontWeight, FontWeightNameSpec};

/// Font of a label, written as a CSS font shorthand such as
/// `"bold 12px Helvetica, sans-serif"`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Helvetica, sans-serif".to_string(),
            size: 12.0,
            weight: FontWeight::default(),
            style: FontStyle::default(),
        }
    }
}

impl FontSpec {
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight.is_bold()
    }
}

impl FromStr for FontSpec {
    type Err = SmartLegendTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| SmartLegendTextError::InvalidFont(s.to_string(), reason.to_string());

        let mut weight = FontWeight::default();
        let mut style = FontStyle::default();
        let mut tokens = s.split_whitespace().peekable();

        // Optional style and weight keywords come before the size
        while let Some(token) = tokens.peek() {
            match token.to_ascii_lowercase().as_str() {
                "normal" => {}
                "italic" | "oblique" => style = FontStyle::Italic,
                "bold" | "bolder" => weight = FontWeight::Name(FontWeightNameSpec::Bold),
                "lighter" => weight = FontWeight::Name(FontWeightNameSpec::Normal),
                other => match other.parse::<f32>() {
                    Ok(num) if (1.0..=1000.0).contains(&num) && !other.contains('.') && num % 100.0 == 0.0 => {
                        weight = FontWeight::Number(num)
                    }
                    _ => break,
                },
            }
            tokens.next();
        }

        let size_token = tokens.next().ok_or_else(|| invalid("missing font size"))?;
        let size = parse_font_size(size_token)?;

        let family = tokens.collect::<Vec<_>>().join(" ");
        if family.is_empty() {
            return Err(invalid("missing font family"));
        }

        Ok(FontSpec {
            family,
            size,
            weight,
            style,
        })
    }
}

fn parse_font_size(token: &str) -> Result<f32, SmartLegendTextError> {
    // Drop an optional `/line-height` suffix
    let size = token.split('/').next().unwrap_or(token);
    let (number, scale) = if let Some(px) = size.strip_suffix("px") {
        (px, 1.0)
    } else if let Some(pt) = size.strip_suffix("pt") {
        (pt, 4.0 / 3.0)
    } else {
        (size, 1.0)
    };
    match number.parse::<f32>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value * scale),
        _ => Err(SmartLegendTextError::InvalidFontSize(token.to_string())),
    }
}

impl TryFrom<String> for FontSpec {
    type Error = SmartLegendTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FontSpec> for String {
    fn from(value: FontSpec) -> Self {
        value.to_string()
    }
}

impl Display for FontSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.style == FontStyle::Italic {
            write!(f, "italic ")?;
        }
        match self.weight {
            FontWeight::Name(FontWeightNameSpec::Bold) => write!(f, "bold ")?,
            FontWeight::Name(FontWeightNameSpec::Normal) => {}
            FontWeight::Number(num) => write!(f, "{num} ")?,
        }
        write!(f, "{}px {}", self.size, self.family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[test]
    fn test_parse_default_ext_font() {
        let font: FontSpec = "12px Helvetica, sans-serif".parse().unwrap();
        assert_eq!(font, FontSpec::default());
    }

    #[rstest]
    #[case("bold 12px Arial", true)]
    #[case("italic 700 10px Arial", true)]
    #[case("normal 10px Arial", false)]
    #[case("lighter 10px Arial", false)]
    fn test_parse_weight(#[case] css: &str, #[case] bold: bool) {
        let font: FontSpec = css.parse().unwrap();
        assert_eq!(font.is_bold(), bold);
        assert_eq!(font.family, "Arial");
    }

    #[test]
    fn test_parse_size_units() {
        let font: FontSpec = "9pt/1.5 Verdana".parse().unwrap();
        assert_approx_eq!(f32, font.size, 12.0);

        let font: FontSpec = "italic 14 Georgia, serif".parse().unwrap();
        assert_approx_eq!(f32, font.size, 14.0);
        assert_eq!(font.style, FontStyle::Italic);
        assert_eq!(font.family, "Georgia, serif");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "bold".parse::<FontSpec>(),
            Err(SmartLegendTextError::InvalidFont(_, _))
        ));
        assert!(matches!(
            "12px".parse::<FontSpec>(),
            Err(SmartLegendTextError::InvalidFont(_, _))
        ));
        assert_eq!(
            "-3px Arial".parse::<FontSpec>(),
            Err(SmartLegendTextError::InvalidFontSize("-3px".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips() {
        let font: FontSpec = "italic bold 11px Tahoma".parse().unwrap();
        let again: FontSpec = font.to_string().parse().unwrap();
        assert_eq!(font, again);
    }
}
