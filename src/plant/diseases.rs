use std::fmt;

use serde::{Deserialize, Serialize};

/// Disease outputs in declaration order.
pub const DISEASES: [&str; 10] = [
    "Anthracnose",
    "Powdery Mildew",
    "Fusarium Wilt",
    "Phytophthora",
    "Cercospora",
    "Bacterial Leaf Spot",
    "Bacterial Wilt",
    "Viral Leaf Curl",
    "Mosaic Viruses",
    "Nematodes",
];

/// Kind of causal agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathogenKind {
    /// True fungi.
    Fungal,
    /// Water moulds.
    Oomycete,
    /// Bacteria.
    Bacterial,
    /// Viruses.
    Viral,
    /// Nematodes and other parasites.
    Parasitic,
}

impl fmt::Display for PathogenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fungal => write!(f, "Fungal"),
            Self::Oomycete => write!(f, "Oomycete"),
            Self::Bacterial => write!(f, "Bacterial"),
            Self::Viral => write!(f, "Viral"),
            Self::Parasitic => write!(f, "Parasitic"),
        }
    }
}

/// Static agronomic profile of a disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiseaseProfile {
    /// Disease name, matching its output variable.
    pub name: &'static str,
    /// Kind of causal agent.
    pub kind: PathogenKind,
    /// Pathogen(s).
    pub pathogen: &'static str,
    /// Recommended treatment.
    pub treatment: &'static str,
}

static PROFILES: [DiseaseProfile; 10] = [
    DiseaseProfile {
        name: "Anthracnose",
        kind: PathogenKind::Fungal,
        pathogen: "Colletotrichum spp.",
        treatment: "Apply Mancozeb or Carbendazim fungicide. Remove infected fruits. Improve air circulation.",
    },
    DiseaseProfile {
        name: "Powdery Mildew",
        kind: PathogenKind::Fungal,
        pathogen: "Leveillula taurica",
        treatment: "Apply sulfur-based fungicides. Reduce humidity. Ensure proper spacing between plants.",
    },
    DiseaseProfile {
        name: "Fusarium Wilt",
        kind: PathogenKind::Fungal,
        pathogen: "Fusarium oxysporum",
        treatment: "Use resistant varieties. Improve soil drainage. Apply Trichoderma-based biocontrol agents.",
    },
    DiseaseProfile {
        name: "Phytophthora",
        kind: PathogenKind::Oomycete,
        pathogen: "Phytophthora capsici",
        treatment: "Apply Metalaxyl or Dimethomorph. Improve drainage. Avoid waterlogging. Use raised beds.",
    },
    DiseaseProfile {
        name: "Cercospora",
        kind: PathogenKind::Fungal,
        pathogen: "Cercospora capsici",
        treatment: "Spray Mancozeb or Carbendazim. Remove infected leaves. Maintain proper plant nutrition.",
    },
    DiseaseProfile {
        name: "Bacterial Leaf Spot",
        kind: PathogenKind::Bacterial,
        pathogen: "Xanthomonas campestris",
        treatment: "Apply copper-based bactericides. Use disease-free seeds. Remove infected plants immediately.",
    },
    DiseaseProfile {
        name: "Bacterial Wilt",
        kind: PathogenKind::Bacterial,
        pathogen: "Ralstonia solanacearum",
        treatment: "No cure available. Remove infected plants. Use resistant varieties. Improve drainage.",
    },
    DiseaseProfile {
        name: "Viral Leaf Curl",
        kind: PathogenKind::Viral,
        pathogen: "Begomovirus",
        treatment: "Control whitefly vectors with insecticides. Remove infected plants. Use virus-free seedlings.",
    },
    DiseaseProfile {
        name: "Mosaic Viruses",
        kind: PathogenKind::Viral,
        pathogen: "CMV, TMV, PepMoV",
        treatment: "Control aphid vectors. Remove infected plants. Use certified virus-free seeds.",
    },
    DiseaseProfile {
        name: "Nematodes",
        kind: PathogenKind::Parasitic,
        pathogen: "Root-knot nematodes",
        treatment: "Apply nematicides. Use soil solarization. Rotate with non-host crops. Add organic matter.",
    },
];

/// All disease profiles in declaration order.
#[must_use]
pub fn disease_profiles() -> &'static [DiseaseProfile] {
    &PROFILES
}

/// Looks up a disease profile by name.
#[must_use]
pub fn profile(name: &str) -> Option<&'static DiseaseProfile> {
    PROFILES.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_follow_output_order() {
        let names: Vec<&str> = disease_profiles().iter().map(|p| p.name).collect();
        assert_eq!(names, DISEASES.to_vec());
    }

    #[test]
    fn lookup_by_name() {
        let p = profile("Phytophthora").unwrap();
        assert_eq!(p.kind, PathogenKind::Oomycete);
        assert_eq!(p.kind.to_string(), "Oomycete");
        assert!(profile("Late Blight").is_none());
    }
}
