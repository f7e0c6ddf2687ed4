//! Breaking-change classification policy.
//!
//! A pure, stateless policy consulted by the diff engine at each decision
//! point. It sees only the two values being compared — no history, no hidden
//! state — so concurrent reuse is safe by construction. Centralizing the
//! policy here lets the breaking/non-breaking determination evolve without
//! touching traversal logic.

/// The default breaking-change policy.
///
/// | Change | Breaking? |
/// |---|---|
/// | Entity removed | yes |
/// | Entity added | no |
/// | Property removed | yes |
/// | Property added | only if required |
/// | Property type changed | yes |
/// | Property optional → required | yes |
/// | Property required → optional | no |
/// | Key-property set changed | yes |
/// | Value object removed | yes |
/// | Value object added / modified | no |
/// | Enum removed | yes |
/// | Enum added | no |
/// | Enum value removed | yes |
/// | Enum value added / modified | no |
/// | Index added/removed | no |
/// | Rule-set or configuration change | no |
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakingChangePolicy;

impl BreakingChangePolicy {
    pub fn entity_removed(&self) -> bool {
        true
    }

    pub fn entity_added(&self) -> bool {
        false
    }

    pub fn property_removed(&self) -> bool {
        true
    }

    /// A new property breaks consumers only when it demands a value.
    pub fn property_added(&self, required: bool) -> bool {
        required
    }

    pub fn property_type_changed(&self) -> bool {
        true
    }

    /// Tightening optionality breaks stored data; loosening it does not.
    pub fn required_flag_changed(&self, was_required: bool, now_required: bool) -> bool {
        !was_required && now_required
    }

    pub fn key_property_set_changed(&self) -> bool {
        true
    }

    pub fn value_object_removed(&self) -> bool {
        true
    }

    pub fn value_object_added(&self) -> bool {
        false
    }

    pub fn value_object_modified(&self) -> bool {
        false
    }

    pub fn enum_removed(&self) -> bool {
        true
    }

    pub fn enum_added(&self) -> bool {
        false
    }

    pub fn enum_value_removed(&self) -> bool {
        true
    }

    pub fn enum_value_added(&self) -> bool {
        false
    }

    pub fn enum_value_modified(&self) -> bool {
        false
    }

    pub fn index_changed(&self) -> bool {
        false
    }

    pub fn rule_set_changed(&self) -> bool {
        false
    }

    pub fn configuration_changed(&self) -> bool {
        false
    }
}
