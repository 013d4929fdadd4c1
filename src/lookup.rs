// Closed code->name tables for the Spanish administrative levels and the
// fire cause catalog. Loaded once, never mutated.
//
// The cause table keeps "Negligencia" and "Accidente" as distinct
// categories (codes 2 and 3); see DESIGN.md for the revision choice.
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Autonomous community codes (CCAA), 1..=19.
pub static COMMUNITIES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (1, "País Vasco"),
        (2, "Cataluña"),
        (3, "Galicia"),
        (4, "Andalucía"),
        (5, "Principado de Asturias"),
        (6, "Cantabria"),
        (7, "La Rioja"),
        (8, "Región de Murcia"),
        (9, "Comunitat Valenciana"),
        (10, "Aragón"),
        (11, "Castilla - La Mancha"),
        (12, "Canarias"),
        (13, "Comunidad Foral de Navarra"),
        (14, "Extremadura"),
        (15, "Illes Balears"),
        (16, "Comunidad de Madrid"),
        (17, "Castilla y León"),
        (18, "Ceuta"),
        (19, "Melilla"),
    ])
});

/// Province codes, 1..=52.
pub static PROVINCES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (1, "Araba"),
        (2, "Albacete"),
        (3, "Alacant"),
        (4, "Almería"),
        (5, "Ávila"),
        (6, "Badajoz"),
        (7, "Illes Balears"),
        (8, "Barcelona"),
        (9, "Burgos"),
        (10, "Cáceres"),
        (11, "Cádiz"),
        (12, "Castelló"),
        (13, "Ciudad Real"),
        (14, "Córdoba"),
        (15, "A Coruña"),
        (16, "Cuenca"),
        (17, "Girona"),
        (18, "Granada"),
        (19, "Guadalajara"),
        (20, "Gipuzcoa"),
        (21, "Huelva"),
        (22, "Huesca"),
        (23, "Jaén"),
        (24, "León"),
        (25, "Lleida"),
        (26, "La Rioja"),
        (27, "Lugo"),
        (28, "Madrid"),
        (29, "Málaga"),
        (30, "Murcia"),
        (31, "Navarra"),
        (32, "Ourense"),
        (33, "Asturias"),
        (34, "Palencia"),
        (35, "Las Palmas"),
        (36, "Pontevedra"),
        (37, "Salamanca"),
        (38, "Santa Cruz de Tenerife"),
        (39, "Cantabria"),
        (40, "Segovia"),
        (41, "Sevilla"),
        (42, "Soria"),
        (43, "Tarragona"),
        (44, "Teruel"),
        (45, "Toledo"),
        (46, "València"),
        (47, "Valladolid"),
        (48, "Bizkaia"),
        (49, "Zamora"),
        (50, "Zaragoza"),
        (51, "Ceuta"),
        (52, "Melilla"),
    ])
});

/// Fire cause codes, 1..=6.
pub static CAUSES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (1, "Por rayo"),
        (2, "Negligencia"),
        (3, "Accidente"),
        (4, "Intencionado"),
        (5, "De origen desconocido"),
        (6, "Reproducido"),
    ])
});

/// Marker glyphs for large-fire map annotations, keyed by cause name.
pub static CAUSE_EMOJI: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Por rayo", " ⚡ "),
        ("Negligencia", " 🚬 "),
        ("Accidente", " 🛠️ "),
        ("Intencionado", " 🔥 "),
        ("De origen desconocido", " ❓ "),
        ("Reproducido", " 🔁 "),
    ])
});

/// Stacking palette for the cause-evolution chart, cycled when there are
/// more causes than colors.
pub const CAUSE_PALETTE: [&str; 6] = [
    "#8B0000", "#FF4500", "#FF8C00", "#FFD700", "#FFFACD", "#708090",
];

/// Month tick labels for the polar seasonal chart.
pub const MONTH_LABELS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

pub fn community_name(code: u8) -> Option<&'static str> {
    COMMUNITIES.get(&code).copied()
}

pub fn province_name(code: u8) -> Option<&'static str> {
    PROVINCES.get(&code).copied()
}

pub fn cause_name(code: u8) -> Option<&'static str> {
    CAUSES.get(&code).copied()
}
