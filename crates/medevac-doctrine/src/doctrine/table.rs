//! Per-tier allocation tables, quantity per patient

/// Equipment lines for each treatment tier
#[derive(Debug, Clone, Copy)]
pub struct TierPlan {
    pub critical: &'static [(&'static str, u32)],
    pub urgent: &'static [(&'static str, u32)],
    pub delayed: &'static [(&'static str, u32)],
    pub minimal: &'static [(&'static str, u32)],
}

/// MARCH: hemorrhage, airway, respiration, circulation for every critical patient
pub const IMMEDIATE_INTERVENTION: TierPlan = TierPlan {
    critical: &[
        ("tourniquet", 2),
        ("hemostatic_gauze", 4),
        ("chest_seal", 1),
        ("needle_decompression", 1),
        ("nasopharyngeal_airway", 1),
        ("iv_fluid_1L", 2),
        ("blood_unit_O_neg", 3),
        ("tranexamic_acid", 1),
        ("morphine_dose", 2),
    ],
    urgent: &[
        ("tourniquet", 1),
        ("pressure_bandage", 2),
        ("iv_fluid_1L", 2),
        ("morphine_dose", 2),
        ("antibiotics_broad_spectrum", 1),
    ],
    delayed: &[("antibiotics_broad_spectrum", 1), ("morphine_dose", 1)],
    minimal: &[("morphine_dose", 1)],
};

/// Stabilization only; definitive care happens after evacuation
pub const EVACUATION_STABILIZATION: TierPlan = TierPlan {
    critical: &[
        ("tourniquet", 2),
        ("hemostatic_gauze", 3),
        ("nasopharyngeal_airway", 1),
        ("iv_fluid_1L", 2),
        ("morphine_dose", 2),
    ],
    urgent: &[
        ("pressure_bandage", 2),
        ("iv_fluid_1L", 1),
        ("morphine_dose", 1),
    ],
    delayed: &[("morphine_dose", 1)],
    minimal: &[],
};

/// Ventilator and monitoring support, type-specific blood
pub const PROLONGED_FIELD_CARE: TierPlan = TierPlan {
    critical: &[
        ("tourniquet", 2),
        ("hemostatic_gauze", 4),
        ("ventilator", 1),
        ("blood_unit_type_specific", 4),
        ("iv_fluid_1L", 3),
        ("antibiotics_broad_spectrum", 2),
        ("pulse_oximeter", 1),
        ("morphine_dose", 4),
    ],
    urgent: &[
        ("pressure_bandage", 2),
        ("iv_fluid_1L", 2),
        ("blood_unit_type_specific", 2),
        ("antibiotics_broad_spectrum", 1),
        ("morphine_dose", 3),
    ],
    delayed: &[("antibiotics_broad_spectrum", 1), ("morphine_dose", 2)],
    minimal: &[("morphine_dose", 1)],
};

/// Damage control surgery: surgical pack, anesthesia and ventilator per critical patient
pub const SURGICAL_INTERVENTION: TierPlan = TierPlan {
    critical: &[
        ("tourniquet", 2),
        ("surgical_pack_trauma", 1),
        ("anesthesia_kit", 1),
        ("ventilator", 1),
        ("blood_unit_O_neg", 6),
        ("iv_fluid_1L", 4),
        ("antibiotics_broad_spectrum", 2),
        ("morphine_dose", 4),
    ],
    urgent: &[
        ("surgical_pack_trauma", 1),
        ("blood_unit_type_specific", 3),
        ("iv_fluid_1L", 3),
        ("antibiotics_broad_spectrum", 1),
        ("morphine_dose", 3),
    ],
    delayed: &[("antibiotics_broad_spectrum", 1), ("morphine_dose", 2)],
    minimal: &[("morphine_dose", 1)],
};

/// Reduced intensity for treatable critical patients; expectant care is priced separately
pub const MASS_CASUALTY_TRIAGE: TierPlan = TierPlan {
    critical: &[
        ("tourniquet", 2),
        ("hemostatic_gauze", 3),
        ("iv_fluid_1L", 2),
        ("blood_unit_O_neg", 2),
        ("morphine_dose", 2),
    ],
    urgent: &[
        ("pressure_bandage", 1),
        ("iv_fluid_1L", 1),
        ("morphine_dose", 1),
    ],
    delayed: &[("morphine_dose", 1)],
    minimal: &[],
};

/// Antibiotics and analgesia only: no surgery, no blood products
pub const EXTREME_CONSERVATION: TierPlan = TierPlan {
    critical: &[
        ("pressure_bandage", 2),
        ("antibiotics_broad_spectrum", 1),
        ("morphine_dose", 3),
    ],
    urgent: &[
        ("pressure_bandage", 1),
        ("antibiotics_broad_spectrum", 1),
        ("morphine_dose", 2),
    ],
    delayed: &[("morphine_dose", 1)],
    minimal: &[],
};
