//! Accessibility attributes for the select.
//!
//! Everything here is computed from the select's current state when asked
//! for and never stored, so it cannot drift from what is on screen. Hosts
//! bridging to a screen reader or an automation layer read it through
//! [`Select::accessibility`](crate::select::Select::accessibility).

use std::fmt;

/// The role a part of the select plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The trigger.
    Combobox,
    /// The open option list.
    Listbox,
    /// One entry of the list.
    Option,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Combobox => "combobox",
            Role::Listbox => "listbox",
            Role::Option => "option",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes of the trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerAttributes {
    pub role: Role,
    /// Whether the list is open.
    pub expanded: bool,
    /// Always `true`: the trigger controls a popup list.
    pub has_popup: bool,
    pub disabled: bool,
    pub readonly: bool,
    /// Index of the option that has keyboard focus while open.
    pub active_descendant: Option<usize>,
    /// The field label, if one is set.
    pub label: Option<String>,
}

/// Attributes of the open list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListboxAttributes {
    pub role: Role,
    /// Number of options in the list.
    pub size: usize,
}

/// Attributes of a single option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionAttributes {
    pub role: Role,
    /// Whether this option carries the selected value.
    pub selected: bool,
    pub disabled: bool,
    pub label: String,
}

/// The accessibility tree of a select at one moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessibility {
    pub trigger: TriggerAttributes,
    /// Present only while the list is open.
    pub listbox: Option<ListboxAttributes>,
    /// Present only while the list is open.
    pub options: Vec<OptionAttributes>,
}

impl Accessibility {
    /// Options reported as selected.
    pub fn selected_options(&self) -> impl Iterator<Item = (usize, &OptionAttributes)> + '_ {
        self.options.iter().enumerate().filter(|(_, o)| o.selected)
    }
}

/// Attributes as name/value pairs in the ARIA vocabulary.
pub trait AriaAttributes {
    fn aria(&self) -> Vec<(&'static str, String)>;
}

impl AriaAttributes for TriggerAttributes {
    fn aria(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("role", self.role.to_string()),
            ("aria-expanded", self.expanded.to_string()),
            ("aria-haspopup", self.has_popup.to_string()),
            ("aria-disabled", self.disabled.to_string()),
            ("aria-readonly", self.readonly.to_string()),
        ];
        if let Some(index) = self.active_descendant {
            attrs.push(("aria-activedescendant", format!("option-{index}")));
        }
        if let Some(label) = &self.label {
            attrs.push(("aria-label", label.clone()));
        }
        attrs
    }
}

impl AriaAttributes for ListboxAttributes {
    fn aria(&self) -> Vec<(&'static str, String)> {
        vec![("role", self.role.to_string())]
    }
}

impl AriaAttributes for OptionAttributes {
    fn aria(&self) -> Vec<(&'static str, String)> {
        vec![
            ("role", self.role.to_string()),
            ("aria-selected", self.selected.to_string()),
            ("aria-disabled", self.disabled.to_string()),
        ]
    }
}
