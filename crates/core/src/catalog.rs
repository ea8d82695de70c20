//! Static disease information catalog.
//!
//! The informational content served to patients about the covered rare
//! neurological diseases. Compiled into the binary; lookups are by slug.

/// One catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiseaseInfo {
    pub slug: &'static str,
    pub name: &'static str,
    pub overview: &'static str,
    pub prevention: &'static str,
}

const CATALOG: [DiseaseInfo; 4] = [
    DiseaseInfo {
        slug: "wilson",
        name: "Wilson Disease",
        overview: "A genetic disorder in which the body cannot eliminate excess \
                   copper, which accumulates in the liver, brain and eyes. \
                   Neurological signs include tremors, coordination problems and \
                   behaviour changes, typically appearing between ages 5 and 35.",
        prevention: "Wilson disease is inherited and cannot be prevented, but early \
                     diagnosis and lifelong copper-reducing treatment (chelation \
                     therapy, zinc, and a low-copper diet) prevent most organ damage. \
                     Siblings of a diagnosed patient should be screened.",
    },
    DiseaseInfo {
        slug: "cjd",
        name: "Creutzfeldt-Jakob Disease",
        overview: "A rapidly progressive prion disease causing dementia, memory \
                   loss, behaviour changes and loss of coordination, usually after \
                   age 60. Most cases are sporadic; a minority are inherited or \
                   acquired.",
        prevention: "Sporadic CJD cannot be prevented. Acquired forms are avoided \
                     through strict surgical-instrument sterilisation standards, \
                     donor screening, and controls on animal feed. Genetic \
                     counselling is available for familial forms.",
    },
    DiseaseInfo {
        slug: "npc",
        name: "Niemann-Pick Type C",
        overview: "An inherited lipid-storage disorder in which cholesterol and \
                   other lipids accumulate in cells, damaging the brain, liver and \
                   spleen. Signs include clumsiness, seizures, difficulty moving \
                   the eyes vertically, and progressive learning decline.",
        prevention: "Niemann-Pick type C is genetic and cannot be prevented. \
                     Carrier testing and genetic counselling inform family \
                     planning; supportive therapies and miglustat can slow \
                     neurological progression.",
    },
    DiseaseInfo {
        slug: "batten",
        name: "Batten Disease",
        overview: "A family of inherited lysosomal-storage disorders of childhood \
                   causing progressive vision loss, seizures, and decline of motor \
                   and cognitive skills. It is the most common group of \
                   neurodegenerative disorders in children.",
        prevention: "Batten disease is genetic and cannot be prevented. Carrier \
                     testing and genetic counselling are available for affected \
                     families; enzyme-replacement therapy exists for the CLN2 form \
                     and symptomatic care improves quality of life.",
    },
];

/// All catalog entries, in display order.
pub fn all() -> &'static [DiseaseInfo] {
    &CATALOG
}

/// Look up one entry by slug (case-insensitive).
pub fn find(slug: &str) -> Option<&'static DiseaseInfo> {
    CATALOG
        .iter()
        .find(|entry| entry.slug.eq_ignore_ascii_case(slug.trim()))
}
