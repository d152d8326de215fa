use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmergencyContact {
    pub name: &'static str,
    pub number: &'static str,
    pub details: &'static str,
}

pub const EMERGENCY_CONTACTS: [EmergencyContact; 4] = [
    EmergencyContact {
        name: "National Emergency Hotline (General)",
        number: "911 / 112 (varies by country)",
        details: "For any immediate life-threatening situation.",
    },
    EmergencyContact {
        name: "Myanmar Police Force",
        number: "199",
        details: "For crimes and public safety concerns in Myanmar.",
    },
    EmergencyContact {
        name: "Myanmar Fire Services Department",
        number: "191",
        details: "For fire emergencies in Myanmar.",
    },
    EmergencyContact {
        name: "Myanmar Ambulance / Medical Emergency",
        number: "192",
        details: "For urgent medical help in Myanmar.",
    },
];
