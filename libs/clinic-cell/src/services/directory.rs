use crate::models::{AppointmentType, AppointmentTypeInfo, ClinicInfo, Doctor};

pub static CLINIC_INFO: ClinicInfo = ClinicInfo {
    name: "Health Plus Medical Center",
    phone: "1234567890",
    email: "appointments@healthplus.com",
    address: "123 Medical Drive, Health City",
};

/// Bookable slot labels in display order. There is no slot over lunch.
pub static AVAILABLE_HOURS: [&str; 12] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM",
    "11:00 AM", "11:30 AM", "02:00 PM", "02:30 PM",
    "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
];

pub static DOCTORS: [Doctor; 4] = [
    Doctor {
        id: 1,
        name: "Dr. Sarah Johnson",
        specialty: "General Practice",
        image: "https://picsum.photos/seed/doc1/200/200",
        experience: "12 Years",
        patients: "4.5k+",
        rating: 4.9,
    },
    Doctor {
        id: 2,
        name: "Dr. Michael Chen",
        specialty: "Pediatrics",
        image: "https://picsum.photos/seed/doc2/200/200",
        experience: "8 Years",
        patients: "3.2k+",
        rating: 4.8,
    },
    Doctor {
        id: 3,
        name: "Dr. Emily Rodriguez",
        specialty: "Cardiology",
        image: "https://picsum.photos/seed/doc3/200/200",
        experience: "15 Years",
        patients: "2.1k+",
        rating: 5.0,
    },
    Doctor {
        id: 4,
        name: "Dr. James Wilson",
        specialty: "Dermatology",
        image: "https://picsum.photos/seed/doc4/200/200",
        experience: "10 Years",
        patients: "5k+",
        rating: 4.7,
    },
];

pub static APPOINTMENT_TYPES: [AppointmentTypeInfo; 3] = [
    AppointmentTypeInfo {
        id: AppointmentType::Consultation,
        label: "Regular Consultation",
        description: "General health check or initial visit",
    },
    AppointmentTypeInfo {
        id: AppointmentType::FollowUp,
        label: "Follow-up Visit",
        description: "Checking progress after previous treatment",
    },
    AppointmentTypeInfo {
        id: AppointmentType::UrgentCare,
        label: "Urgent Care",
        description: "Immediate attention for non-life-threatening issues",
    },
];

pub fn clinic_info() -> &'static ClinicInfo {
    &CLINIC_INFO
}

pub fn doctors() -> &'static [Doctor] {
    &DOCTORS
}

pub fn available_hours() -> &'static [&'static str] {
    &AVAILABLE_HOURS
}

pub fn find_doctor(doctor_id: u32) -> Option<&'static Doctor> {
    DOCTORS.iter().find(|doctor| doctor.id == doctor_id)
}

/// Exact, case-sensitive match against the offered slot labels.
pub fn is_available_hour(label: &str) -> bool {
    AVAILABLE_HOURS.iter().any(|hour| *hour == label)
}

pub fn appointment_type_info(appointment_type: AppointmentType) -> &'static AppointmentTypeInfo {
    match appointment_type {
        AppointmentType::Consultation => &APPOINTMENT_TYPES[0],
        AppointmentType::FollowUp => &APPOINTMENT_TYPES[1],
        AppointmentType::UrgentCare => &APPOINTMENT_TYPES[2],
    }
}
