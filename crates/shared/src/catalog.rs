//! Static catalog of programs the advisor supports, plus the lookups the
//! program picker needs.

use crate::domain::ProgramId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramEntry {
    pub university: &'static str,
    pub major: &'static str,
    pub program_id: &'static str,
}

impl ProgramEntry {
    pub fn id(&self) -> ProgramId {
        ProgramId::from(self.program_id)
    }
}

pub const PROGRAMS: &[ProgramEntry] = &[
    ProgramEntry {
        university: "Rice",
        major: "Bioengineering",
        program_id: "rice-bioe-2025",
    },
    ProgramEntry {
        university: "Rice",
        major: "Computer Science",
        program_id: "rice-cs-2025",
    },
    ProgramEntry {
        university: "UT Austin",
        major: "Biomedical Engineering",
        program_id: "utexas-bme-2025",
    },
    ProgramEntry {
        university: "UT Austin",
        major: "Computer Science",
        program_id: "utexas-cs-2025",
    },
    ProgramEntry {
        university: "Stanford",
        major: "Bioengineering",
        program_id: "stanford-bioe-2025",
    },
    ProgramEntry {
        university: "Stanford",
        major: "Computer Science",
        program_id: "stanford-cs-2025",
    },
];

/// Universities in catalog order, each listed once.
pub fn universities() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for entry in PROGRAMS {
        if !seen.contains(&entry.university) {
            seen.push(entry.university);
        }
    }
    seen
}

/// Majors offered at `university`; an empty filter lists every major.
pub fn majors_for(university: &str) -> Vec<&'static str> {
    PROGRAMS
        .iter()
        .filter(|entry| university.is_empty() || entry.university.eq_ignore_ascii_case(university))
        .map(|entry| entry.major)
        .collect()
}

pub fn find(university: &str, major: &str) -> Option<&'static ProgramEntry> {
    PROGRAMS.iter().find(|entry| {
        entry.university.eq_ignore_ascii_case(university) && entry.major.eq_ignore_ascii_case(major)
    })
}

pub fn by_id(program_id: &str) -> Option<&'static ProgramEntry> {
    PROGRAMS.iter().find(|entry| entry.program_id == program_id)
}
