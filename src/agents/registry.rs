use crate::models::Specialist;

pub struct SpecialistDefinition {
    pub specialist: Specialist,
    /// Name used in logs and parse-failure messages.
    pub display_name: &'static str,
    /// Weight in tenths; the three weights sum to 10.
    pub weight_tenths: u32,
}

pub static SPECIALISTS: [SpecialistDefinition; 3] = [
    SpecialistDefinition {
        specialist: Specialist::Pothole,
        display_name: "Pothole",
        weight_tenths: 5,
    },
    SpecialistDefinition {
        specialist: Specialist::Trash,
        display_name: "Trash",
        weight_tenths: 3,
    },
    SpecialistDefinition {
        specialist: Specialist::Graffiti,
        display_name: "Graffiti",
        weight_tenths: 2,
    },
];

pub fn definition(specialist: Specialist) -> &'static SpecialistDefinition {
    match specialist {
        Specialist::Pothole => &SPECIALISTS[0],
        Specialist::Trash => &SPECIALISTS[1],
        Specialist::Graffiti => &SPECIALISTS[2],
    }
}
