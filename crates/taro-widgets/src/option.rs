//! Select options and their normalization.
//!
//! Hosts hand a select either plain scalars (`"Small"`, `42`, `true`) or full
//! records with descriptions, icons and a disabled flag, freely mixed in one
//! list. [`normalize`] turns any such list into [`SelectOption`]s once, so the
//! rest of the select never has to ask which shape an entry came in.
//!
//! Raw options deserialize with serde, which lets option lists live in config
//! files or arrive as JSON:
//!
//! ```rust,ignore
//! let raw: Vec<RawOption> = serde_json::from_str(r#"[
//!     "Any",
//!     { "label": "Express", "value": 2, "description": "Next day" },
//!     { "label": "Freight", "value": 3, "disabled": true }
//! ]"#)?;
//! let options = normalize(&raw);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value an option can carry: a string, a number or a boolean.
///
/// Equality is by value. Numbers compare as `f64`, so `1` and `1.0` are the
/// same value and `NaN` never matches anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A boolean value.
    Bool(bool),
    /// A numeric value.
    Number(f64),
    /// A string value.
    Str(String),
}

impl Scalar {
    /// Whether this is the empty string, which selects nothing.
    pub fn is_empty_str(&self) -> bool {
        matches!(self, Scalar::Str(s) if s.is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Bool(b) => write!(f, "{b}"),
            // Integral numbers print without a fractional part: 2, not 2.0.
            Scalar::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Scalar::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(f64::from(n))
    }
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Scalar::Number(f64::from(n))
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n as f64)
    }
}

/// A visual marker shown next to an option in icon mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// A text glyph drawn in a color. The color is any string ratatui can
    /// parse (`"red"`, `"#ff8800"`); unparseable or empty colors use the
    /// default style.
    Glyph {
        /// The glyph to draw.
        glyph: String,
        /// Color name or hex code.
        color: String,
    },
    /// An image reference. Terminals cannot draw it, so it renders as a
    /// placeholder marker.
    Image {
        /// Location of the image.
        url: String,
    },
}

/// A normalized, render-ready option.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    /// Text shown in the trigger and the list.
    pub label: String,
    /// Identity compared against the bound value.
    pub value: Scalar,
    /// Disabled options cannot be chosen or focused from the keyboard.
    pub disabled: bool,
    /// Secondary text for description mode.
    pub description: Option<String>,
    /// Marker for icon mode.
    pub icon: Option<Icon>,
}

impl SelectOption {
    /// Create an enabled option with the given label and value.
    pub fn new(label: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: false,
            description: None,
            icon: None,
        }
    }

    /// Set the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// Icon fields as a host supplies them. Any combination may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconRecord {
    /// Text glyph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
    /// Glyph color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Image location. Wins over the glyph when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// An option record as a host supplies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionRecord {
    /// Display text.
    pub label: String,
    /// Identity compared against the bound value.
    pub value: Scalar,
    /// Defaults to `false` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Secondary text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRecord>,
}

impl OptionRecord {
    /// Create a record with only a label and value.
    pub fn new(label: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: None,
            description: None,
            icon: None,
        }
    }
}

/// One entry of a host-supplied option list: a bare scalar or a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOption {
    /// A bare value; its label is the value's text.
    Scalar(Scalar),
    /// A full option record.
    Record(OptionRecord),
}

macro_rules! raw_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RawOption {
                fn from(value: $ty) -> Self {
                    RawOption::Scalar(value.into())
                }
            }
        )*
    };
}

raw_from_scalar!(Scalar, &str, String, bool, f64, i32, u32, i64);

impl From<OptionRecord> for RawOption {
    fn from(record: OptionRecord) -> Self {
        RawOption::Record(record)
    }
}

impl From<SelectOption> for RawOption {
    fn from(option: SelectOption) -> Self {
        let icon = option.icon.map(|icon| match icon {
            Icon::Glyph { glyph, color } => IconRecord {
                glyph: Some(glyph),
                color: Some(color),
                image_url: None,
            },
            Icon::Image { url } => IconRecord {
                image_url: Some(url),
                ..IconRecord::default()
            },
        });
        RawOption::Record(OptionRecord {
            label: option.label,
            value: option.value,
            disabled: Some(option.disabled),
            description: option.description,
            icon,
        })
    }
}

fn normalize_icon(icon: &IconRecord) -> Option<Icon> {
    if let Some(url) = &icon.image_url {
        return Some(Icon::Image { url: url.clone() });
    }
    icon.glyph.as_ref().map(|glyph| Icon::Glyph {
        glyph: glyph.clone(),
        color: icon.color.clone().unwrap_or_default(),
    })
}

/// Normalize one raw option.
pub fn normalize_one(raw: &RawOption) -> SelectOption {
    match raw {
        RawOption::Scalar(value) => SelectOption::new(value.to_string(), value.clone()),
        RawOption::Record(record) => SelectOption {
            label: record.label.clone(),
            value: record.value.clone(),
            disabled: record.disabled.unwrap_or(false),
            description: record.description.clone(),
            icon: record.icon.as_ref().and_then(normalize_icon),
        },
    }
}

/// Normalize a host-supplied option list.
///
/// Order is preserved and nothing is deduplicated or sorted. The function is
/// pure, so calling it on every render is fine.
pub fn normalize(raw: &[RawOption]) -> Vec<SelectOption> {
    raw.iter().map(normalize_one).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scalar_string_becomes_label_and_value() {
        let opts = normalize(&["A".into(), "B".into()]);
        assert_eq!(opts.len(), 2);
        assert_eq!(opts[0].label, "A");
        assert_eq!(opts[0].value, Scalar::from("A"));
        assert!(!opts[0].disabled);
        assert_eq!(opts[0].description, None);
        assert_eq!(opts[0].icon, None);
    }

    #[test]
    fn scalar_number_label_has_no_fraction() {
        let opts = normalize(&[RawOption::from(2), RawOption::from(2.5)]);
        assert_eq!(opts[0].label, "2");
        assert_eq!(opts[0].value, Scalar::Number(2.0));
        assert_eq!(opts[1].label, "2.5");
    }

    #[test]
    fn scalar_bool_label() {
        let opts = normalize(&[RawOption::from(true)]);
        assert_eq!(opts[0].label, "true");
        assert_eq!(opts[0].value, Scalar::Bool(true));
    }

    #[test]
    fn record_passes_fields_through() {
        let mut record = OptionRecord::new("Express", 2);
        record.description = Some("Next day".into());
        record.disabled = Some(true);
        let opts = normalize(&[record.into()]);

        assert_eq!(opts[0].label, "Express");
        assert_eq!(opts[0].value, Scalar::Number(2.0));
        assert!(opts[0].disabled);
        assert_eq!(opts[0].description.as_deref(), Some("Next day"));
    }

    #[test]
    fn record_missing_disabled_defaults_false() {
        let opts = normalize(&[OptionRecord::new("X", 1).into()]);
        assert!(!opts[0].disabled);
        assert_eq!(opts[0].description, None);
        assert_eq!(opts[0].icon, None);
    }

    #[test]
    fn image_icon_wins_over_glyph() {
        let mut record = OptionRecord::new("Logo", "logo");
        record.icon = Some(IconRecord {
            glyph: Some("●".into()),
            color: Some("red".into()),
            image_url: Some("https://example.test/logo.png".into()),
        });
        let opts = normalize(&[record.into()]);
        assert_eq!(
            opts[0].icon,
            Some(Icon::Image {
                url: "https://example.test/logo.png".into()
            })
        );
    }

    #[test]
    fn glyph_icon_without_color() {
        let mut record = OptionRecord::new("Dot", "dot");
        record.icon = Some(IconRecord {
            glyph: Some("●".into()),
            ..IconRecord::default()
        });
        let opts = normalize(&[record.into()]);
        assert_eq!(
            opts[0].icon,
            Some(Icon::Glyph {
                glyph: "●".into(),
                color: String::new()
            })
        );
    }

    #[test]
    fn empty_icon_record_is_absent() {
        let mut record = OptionRecord::new("None", 0);
        record.icon = Some(IconRecord::default());
        assert_eq!(normalize(&[record.into()])[0].icon, None);
    }

    #[test]
    fn empty_list_normalizes_to_empty() {
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn duplicates_and_order_are_kept() {
        let opts = normalize(&["b".into(), "a".into(), "b".into()]);
        let labels: Vec<_> = opts.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a", "b"]);
    }

    #[test]
    fn mixed_list_from_json() {
        let raw: Vec<RawOption> = serde_json::from_str(
            r#"[
                "Any",
                7,
                { "label": "Express", "value": 2, "description": "Next day" },
                { "label": "Freight", "value": "freight", "disabled": true,
                  "icon": { "glyph": "▲", "color": "yellow" } },
                { "label": "Drone", "value": false, "icon": { "imageUrl": "drone.png" } }
            ]"#,
        )
        .expect("valid option list");
        let opts = normalize(&raw);

        assert_eq!(opts[0], SelectOption::new("Any", "Any"));
        assert_eq!(opts[1], SelectOption::new("7", 7));
        assert_eq!(opts[2].description.as_deref(), Some("Next day"));
        assert!(opts[3].disabled);
        assert_eq!(
            opts[3].icon,
            Some(Icon::Glyph {
                glyph: "▲".into(),
                color: "yellow".into()
            })
        );
        assert_eq!(opts[4].value, Scalar::Bool(false));
        assert_eq!(
            opts[4].icon,
            Some(Icon::Image {
                url: "drone.png".into()
            })
        );
    }

    #[test]
    fn select_option_round_trips_through_raw() {
        let option = SelectOption::new("Dot", "dot")
            .disabled(true)
            .with_description("A dot")
            .with_icon(Icon::Glyph {
                glyph: "●".into(),
                color: "blue".into(),
            });
        assert_eq!(normalize_one(&option.clone().into()), option);
    }

    fn arb_scalar() -> impl Strategy<Value = Scalar> {
        prop_oneof![
            any::<bool>().prop_map(Scalar::Bool),
            (-1000i32..1000).prop_map(Scalar::from),
            "[a-z]{0,6}".prop_map(Scalar::Str),
        ]
    }

    fn arb_raw() -> impl Strategy<Value = RawOption> {
        prop_oneof![
            arb_scalar().prop_map(RawOption::Scalar),
            (
                "[A-Za-z ]{1,8}",
                arb_scalar(),
                proptest::option::of(any::<bool>()),
                proptest::option::of("[a-z ]{0,12}"),
            )
                .prop_map(|(label, value, disabled, description)| {
                    RawOption::Record(OptionRecord {
                        label,
                        value,
                        disabled,
                        description,
                        icon: None,
                    })
                }),
        ]
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in proptest::collection::vec(arb_raw(), 0..12)) {
            prop_assert_eq!(normalize(&raw), normalize(&raw));
        }

        #[test]
        fn prop_normalize_preserves_length_and_values(raw in proptest::collection::vec(arb_raw(), 0..12)) {
            let opts = normalize(&raw);
            prop_assert_eq!(opts.len(), raw.len());
            for (opt, entry) in opts.iter().zip(&raw) {
                let value = match entry {
                    RawOption::Scalar(v) => v,
                    RawOption::Record(r) => &r.value,
                };
                prop_assert_eq!(&opt.value, value);
            }
        }

        #[test]
        fn prop_normalized_options_survive_renormalization(raw in proptest::collection::vec(arb_raw(), 0..12)) {
            let once = normalize(&raw);
            let again: Vec<RawOption> = once.iter().cloned().map(RawOption::from).collect();
            prop_assert_eq!(normalize(&again), once);
        }
    }
}
