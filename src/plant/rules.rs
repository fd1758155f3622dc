use crate::error::ConfigError;
use crate::rule::Rule;

/// `(id, disease, antecedent, consequent term, description)`.
type RuleRow = (u32, &'static str, &'static [(&'static str, &'static str)], &'static str, &'static str);

const RULES: [RuleRow; 30] = [
    // Anthracnose
    (
        1,
        "Anthracnose",
        &[("Stage", "Fruiting"), ("Temp", "Moderate"), ("Rain", "High"), ("LeafWet", "Long")],
        "High",
        "High risk during fruiting with moderate temp, high rain, and long leaf wetness",
    ),
    (
        2,
        "Anthracnose",
        &[("Stage", "Fruiting"), ("Temp", "High"), ("LeafWet", "Medium")],
        "Moderate",
        "Moderate risk during fruiting with high temp and medium leaf wetness",
    ),
    (
        3,
        "Anthracnose",
        &[("SeedHealth", "Poor"), ("Rain", "High")],
        "High",
        "High risk with poor seed health and high rainfall",
    ),
    (
        4,
        "Anthracnose",
        &[("Rain", "Low"), ("LeafWet", "Short")],
        "Low",
        "Low risk with low rain or short leaf wetness",
    ),
    // Powdery Mildew
    (
        5,
        "Powdery Mildew",
        &[("Temp", "Moderate"), ("RH", "Low"), ("LeafWet", "Short")],
        "High",
        "High risk with moderate temp, low humidity, and short leaf wetness",
    ),
    (
        6,
        "Powdery Mildew",
        &[("Temp", "High"), ("RH", "Moderate")],
        "Moderate",
        "Moderate risk with high temp and moderate humidity",
    ),
    (
        7,
        "Powdery Mildew",
        &[("RH", "High"), ("LeafWet", "Long")],
        "Low",
        "Low risk with high humidity and long leaf wetness",
    ),
    // Fusarium Wilt
    (
        8,
        "Fusarium Wilt",
        &[("SoilM", "Wet"), ("Temp", "High"), ("Drain", "Poor")],
        "High",
        "High risk with wet soil, high temp, and poor drainage",
    ),
    (
        9,
        "Fusarium Wilt",
        &[("SoilM", "Opt"), ("Drain", "Moderate")],
        "Moderate",
        "Moderate risk with optimal soil moisture and moderate drainage",
    ),
    (
        10,
        "Fusarium Wilt",
        &[("SeedHealth", "Good"), ("Drain", "Good")],
        "Low",
        "Low risk with good seed health and good drainage",
    ),
    // Phytophthora
    (
        11,
        "Phytophthora",
        &[("SoilM", "Wet"), ("Rain", "High"), ("Drain", "Poor")],
        "High",
        "High risk with wet soil, high rain, and poor drainage",
    ),
    (
        12,
        "Phytophthora",
        &[("LeafWet", "Long"), ("Temp", "Moderate")],
        "Moderate",
        "Moderate risk with long leaf wetness and moderate temp",
    ),
    (
        13,
        "Phytophthora",
        &[("Rain", "None"), ("SoilM", "Dry")],
        "Low",
        "Low risk with no rain and dry soil",
    ),
    // Cercospora
    (
        14,
        "Cercospora",
        &[("RH", "High"), ("LeafWet", "Long"), ("SeedHealth", "Poor")],
        "High",
        "High risk with high humidity, long leaf wetness, and poor seed health",
    ),
    (
        15,
        "Cercospora",
        &[("Rain", "High"), ("LeafWet", "Medium")],
        "Moderate",
        "Moderate risk with high rain and medium leaf wetness",
    ),
    (
        16,
        "Cercospora",
        &[("SeedHealth", "Good"), ("LeafWet", "Short")],
        "Low",
        "Low risk with good seed health and short leaf wetness",
    ),
    // Bacterial Leaf Spot
    (
        17,
        "Bacterial Leaf Spot",
        &[("SeedHealth", "Poor"), ("LeafWet", "Long"), ("Rain", "High")],
        "High",
        "High risk with poor seed health, long leaf wetness, and high rain",
    ),
    (
        18,
        "Bacterial Leaf Spot",
        &[("Temp", "Moderate"), ("RH", "High")],
        "Moderate",
        "Moderate risk with moderate temp and high humidity",
    ),
    (
        19,
        "Bacterial Leaf Spot",
        &[("SeedHealth", "Good"), ("Rain", "None")],
        "Low",
        "Low risk with good seed health and no rain",
    ),
    // Bacterial Wilt
    (
        20,
        "Bacterial Wilt",
        &[("SoilM", "Wet"), ("Temp", "High"), ("Drain", "Poor")],
        "High",
        "High risk with wet soil, high temp, and poor drainage",
    ),
    (
        21,
        "Bacterial Wilt",
        &[("SoilM", "Opt"), ("Drain", "Moderate")],
        "Moderate",
        "Moderate risk with optimal soil moisture and moderate drainage",
    ),
    (
        22,
        "Bacterial Wilt",
        &[("SoilM", "Dry")],
        "Low",
        "Low risk with dry soil",
    ),
    // Viral Leaf Curl
    (
        23,
        "Viral Leaf Curl",
        &[("Vector", "High"), ("Stage", "Vegetative"), ("Temp", "High")],
        "High",
        "High risk with high vector pressure during vegetative/flowering stage and high temp",
    ),
    (
        24,
        "Viral Leaf Curl",
        &[("Vector", "Moderate"), ("SeedHealth", "Poor")],
        "Moderate",
        "Moderate risk with moderate vector pressure and poor seed health",
    ),
    (
        25,
        "Viral Leaf Curl",
        &[("Vector", "None")],
        "Low",
        "Low risk with no vector pressure",
    ),
    // Mosaic Viruses
    (
        26,
        "Mosaic Viruses",
        &[("Vector", "High"), ("SeedHealth", "Poor")],
        "High",
        "High risk with high vector pressure and poor seed health",
    ),
    (
        27,
        "Mosaic Viruses",
        &[("SeedHealth", "Good"), ("Vector", "None")],
        "Low",
        "Low risk with good seed health and no vectors",
    ),
    // Nematodes
    (
        28,
        "Nematodes",
        &[("Temp", "High"), ("SoilM", "Opt"), ("Drain", "Poor")],
        "High",
        "High risk with high temp, optimal soil moisture, and poor drainage",
    ),
    (
        29,
        "Nematodes",
        &[("Drain", "Good"), ("SeedHealth", "Good")],
        "Low",
        "Low risk with good drainage and good seed health",
    ),
    (
        30,
        "Nematodes",
        &[("SeedHealth", "Poor"), ("SoilM", "Opt")],
        "Moderate",
        "Moderate risk with poor seed health and optimal soil moisture",
    ),
];

/// The thirty disease rules, ordered by id.
///
/// # Errors
///
/// Only fails if the built-in table is inconsistent.
pub fn rules() -> Result<Vec<Rule>, ConfigError> {
    RULES
        .iter()
        .map(|&(id, disease, antecedent, risk, description)| {
            antecedent
                .iter()
                .fold(Rule::builder(id).output(disease), |b, &(var, term)| b.when(var, term))
                .then(risk)
                .description(description)
                .build()
        })
        .collect()
}
