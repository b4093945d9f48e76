//! Matching a bound value against the option list.

use crate::option::{Scalar, SelectOption};

/// Placeholder shown when nothing is selected and the host set none.
pub const DEFAULT_PLACEHOLDER: &str = "Select";

/// The outcome of matching a bound value against the options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    /// The first option whose value equals the bound value.
    pub selected: Option<&'a SelectOption>,
    /// Its position in the list.
    pub index: Option<usize>,
}

impl<'a> Resolution<'a> {
    /// Nothing selected.
    pub const NONE: Resolution<'static> = Resolution {
        selected: None,
        index: None,
    };

    /// The selected value, if any.
    pub fn value(&self) -> Option<&'a Scalar> {
        self.selected.map(|option| &option.value)
    }

    /// Whether `option` carries the selected value.
    ///
    /// Compares values, not positions, so duplicate values are all reported
    /// as selected.
    pub fn is_selected(&self, option: &SelectOption) -> bool {
        self.value().is_some_and(|value| *value == option.value)
    }
}

/// Find the selected option for `bound`.
///
/// The first option (in list order) whose value equals `bound` wins. A
/// missing bound value, the empty string, or a value no option carries all
/// resolve to nothing selected.
pub fn resolve<'a>(options: &'a [SelectOption], bound: Option<&Scalar>) -> Resolution<'a> {
    let Some(bound) = bound.filter(|value| !value.is_empty_str()) else {
        return Resolution::NONE;
    };
    options
        .iter()
        .enumerate()
        .find(|(_, option)| option.value == *bound)
        .map_or(Resolution::NONE, |(index, option)| Resolution {
            selected: Some(option),
            index: Some(index),
        })
}

/// Text for the trigger: the selected label, or the placeholder.
pub fn display_text<'a>(resolution: &Resolution<'a>, placeholder: &'a str) -> &'a str {
    resolution
        .selected
        .map_or(placeholder, |option| option.label.as_str())
}

/// Text for the description panel.
///
/// A host override always wins, even when nothing is selected. Otherwise the
/// selected option's own description, if it has one.
pub fn description_text<'a>(
    resolution: &Resolution<'a>,
    custom: Option<&'a str>,
) -> Option<&'a str> {
    custom.or_else(|| resolution.selected.and_then(|o| o.description.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{normalize, OptionRecord, RawOption};
    use proptest::prelude::*;

    fn abc() -> Vec<SelectOption> {
        normalize(&["A".into(), "B".into(), "C".into()])
    }

    #[test]
    fn resolves_scalar_list() {
        let options = abc();
        let bound = Scalar::from("B");
        let res = resolve(&options, Some(&bound));
        assert_eq!(res.index, Some(1));
        assert_eq!(display_text(&res, DEFAULT_PLACEHOLDER), "B");
    }

    #[test]
    fn missing_value_selects_nothing() {
        let options = abc();
        let res = resolve(&options, None);
        assert_eq!(res, Resolution::NONE);
        assert_eq!(display_text(&res, DEFAULT_PLACEHOLDER), "Select");
    }

    #[test]
    fn empty_string_selects_nothing_even_if_an_option_has_it() {
        let options = normalize(&["".into(), "A".into()]);
        let res = resolve(&options, Some(&Scalar::from("")));
        assert_eq!(res.selected, None);
    }

    #[test]
    fn unknown_value_shows_placeholder_not_raw_value() {
        let options = abc();
        let bound = Scalar::from("not-in-list");
        let res = resolve(&options, Some(&bound));
        assert_eq!(res.selected, None);
        assert_eq!(display_text(&res, "Pick one"), "Pick one");
    }

    #[test]
    fn first_duplicate_wins() {
        let options = normalize(&[
            OptionRecord::new("First", 1).into(),
            OptionRecord::new("Second", 1).into(),
        ]);
        let res = resolve(&options, Some(&Scalar::from(1)));
        assert_eq!(res.index, Some(0));
        assert_eq!(display_text(&res, DEFAULT_PLACEHOLDER), "First");
        assert!(res.is_selected(&options[1]));
    }

    #[test]
    fn values_compare_by_type_and_content() {
        let options = normalize(&[RawOption::from(1), RawOption::from("1"), RawOption::from(true)]);
        assert_eq!(resolve(&options, Some(&Scalar::from("1"))).index, Some(1));
        assert_eq!(resolve(&options, Some(&Scalar::Number(1.0))).index, Some(0));
        assert_eq!(resolve(&options, Some(&Scalar::Bool(true))).index, Some(2));
        assert_eq!(resolve(&options, Some(&Scalar::Bool(false))).index, None);
    }

    #[test]
    fn disabled_options_still_resolve() {
        let mut record = OptionRecord::new("Gone", "gone");
        record.disabled = Some(true);
        let options = normalize(&[record.into()]);
        assert_eq!(resolve(&options, Some(&Scalar::from("gone"))).index, Some(0));
    }

    #[test]
    fn description_prefers_override() {
        let options = vec![SelectOption::new("A", "a").with_description("own")];
        let bound = Scalar::from("a");
        let res = resolve(&options, Some(&bound));
        assert_eq!(description_text(&res, Some("fixed")), Some("fixed"));
        assert_eq!(description_text(&res, None), Some("own"));
    }

    #[test]
    fn override_shows_with_nothing_selected() {
        assert_eq!(description_text(&Resolution::NONE, Some("fixed")), Some("fixed"));
        assert_eq!(description_text(&Resolution::NONE, None), None);
    }

    #[test]
    fn selected_without_description_omits_panel() {
        let options = abc();
        let bound = Scalar::from("A");
        let res = resolve(&options, Some(&bound));
        assert_eq!(description_text(&res, None), None);
    }

    proptest! {
        #[test]
        fn prop_resolution_is_first_match(
            values in proptest::collection::vec(0u32..6, 0..10),
            bound in 0u32..8,
        ) {
            let raw: Vec<RawOption> = values.iter().copied().map(RawOption::from).collect();
            let options = normalize(&raw);
            let bound = Scalar::from(bound);
            let res = resolve(&options, Some(&bound));

            let expected = options.iter().position(|o| o.value == bound);
            prop_assert_eq!(res.index, expected);
            prop_assert_eq!(res.selected.is_none(), expected.is_none());
            if let Some(index) = expected {
                prop_assert_eq!(res.selected, Some(&options[index]));
            }
        }
    }
}
