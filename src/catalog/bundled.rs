// ABOUTME: Bundled offline food catalog data, per 100 g
// ABOUTME: Fifty curated staples available without network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// One bundled catalog row
#[derive(Debug, Clone, Copy)]
pub(crate) struct BundledFood {
    pub(crate) id: &'static str,
    pub(crate) name: &'static str,
    pub(crate) kcal: f64,
    pub(crate) protein: f64,
    pub(crate) carbs: f64,
    pub(crate) fat: f64,
    pub(crate) fiber: f64,
    pub(crate) tags: &'static [&'static str],
}

const fn food(
    id: &'static str,
    name: &'static str,
    macros: [f64; 5],
    tags: &'static [&'static str],
) -> BundledFood {
    BundledFood {
        id,
        name,
        kcal: macros[0],
        protein: macros[1],
        carbs: macros[2],
        fat: macros[3],
        fiber: macros[4],
        tags,
    }
}

// [kcal, protein, carbs, fat, fiber]
pub(crate) const BUNDLED_FOODS: &[BundledFood] = &[
    food("local_001", "Pechuga de pollo", [165.0, 31.0, 0.0, 3.6, 0.0], &["Proteina", "Carne"]),
    food("local_002", "Muslo de pollo", [209.0, 26.0, 0.0, 10.9, 0.0], &["Proteina", "Carne"]),
    food("local_003", "Pechuga de pavo", [135.0, 30.0, 0.0, 1.0, 0.0], &["Proteina", "Carne"]),
    food("local_004", "Ternera magra", [158.0, 26.0, 0.0, 6.0, 0.0], &["Proteina", "Carne"]),
    food("local_005", "Lomo de cerdo", [143.0, 26.0, 0.0, 3.5, 0.0], &["Proteina", "Carne"]),
    food("local_006", "Salmon", [208.0, 20.0, 0.0, 13.0, 0.0], &["Proteina", "Pescado"]),
    food("local_007", "Atun al natural", [116.0, 26.0, 0.0, 1.0, 0.0], &["Proteina", "Pescado"]),
    food("local_008", "Merluza", [71.0, 16.0, 0.0, 0.8, 0.0], &["Proteina", "Pescado"]),
    food("local_009", "Gambas", [99.0, 24.0, 0.2, 0.3, 0.0], &["Proteina", "Marisco"]),
    food("local_010", "Huevo entero", [143.0, 12.6, 0.7, 9.5, 0.0], &["Proteina", "Huevo"]),
    food("local_011", "Clara de huevo", [52.0, 10.9, 0.7, 0.2, 0.0], &["Proteina", "Huevo"]),
    food("local_012", "Yogur griego natural", [97.0, 9.0, 3.9, 5.0, 0.0], &["Lacteo"]),
    food("local_013", "Queso fresco batido 0%", [46.0, 8.0, 3.5, 0.2, 0.0], &["Lacteo", "Proteina"]),
    food("local_014", "Leche semidesnatada", [46.0, 3.3, 4.8, 1.6, 0.0], &["Lacteo"]),
    food("local_015", "Queso curado", [390.0, 26.0, 1.0, 32.0, 0.0], &["Lacteo"]),
    food("local_016", "Requeson", [98.0, 11.0, 3.4, 4.3, 0.0], &["Lacteo", "Proteina"]),
    food("local_017", "Arroz blanco cocido", [130.0, 2.7, 28.0, 0.3, 0.4], &["Cereal"]),
    food("local_018", "Arroz integral cocido", [123.0, 2.7, 25.6, 1.0, 1.6], &["Cereal"]),
    food("local_019", "Avena en copos", [389.0, 16.9, 66.3, 6.9, 10.6], &["Cereal"]),
    food("local_020", "Pasta cocida", [158.0, 5.8, 30.9, 0.9, 1.8], &["Cereal"]),
    food("local_021", "Pan integral", [247.0, 13.0, 41.0, 3.4, 7.0], &["Cereal"]),
    food("local_022", "Quinoa cocida", [120.0, 4.4, 21.3, 1.9, 2.8], &["Cereal"]),
    food("local_023", "Patata cocida", [87.0, 1.9, 20.1, 0.1, 1.8], &["Tuberculo"]),
    food("local_024", "Boniato asado", [90.0, 2.0, 20.7, 0.2, 3.3], &["Tuberculo"]),
    food("local_025", "Lentejas cocidas", [116.0, 9.0, 20.0, 0.4, 7.9], &["Legumbre"]),
    food("local_026", "Garbanzos cocidos", [164.0, 8.9, 27.4, 2.6, 7.6], &["Legumbre"]),
    food("local_027", "Alubias cocidas", [127.0, 8.7, 22.8, 0.5, 6.4], &["Legumbre"]),
    food("local_028", "Tofu firme", [144.0, 17.3, 2.8, 8.7, 2.3], &["Proteina", "Vegano"]),
    food("local_029", "Platano", [89.0, 1.1, 22.8, 0.3, 2.6], &["Fruta"]),
    food("local_030", "Manzana", [52.0, 0.3, 13.8, 0.2, 2.4], &["Fruta"]),
    food("local_031", "Naranja", [47.0, 0.9, 11.8, 0.1, 2.4], &["Fruta"]),
    food("local_032", "Fresas", [32.0, 0.7, 7.7, 0.3, 2.0], &["Fruta"]),
    food("local_033", "Arandanos", [57.0, 0.7, 14.5, 0.3, 2.4], &["Fruta"]),
    food("local_034", "Kiwi", [61.0, 1.1, 14.7, 0.5, 3.0], &["Fruta"]),
    food("local_035", "Brocoli", [34.0, 2.8, 6.6, 0.4, 2.6], &["Verdura"]),
    food("local_036", "Espinacas", [23.0, 2.9, 3.6, 0.4, 2.2], &["Verdura"]),
    food("local_037", "Tomate", [18.0, 0.9, 3.9, 0.2, 1.2], &["Verdura"]),
    food("local_038", "Lechuga", [15.0, 1.4, 2.9, 0.2, 1.3], &["Verdura"]),
    food("local_039", "Zanahoria", [41.0, 0.9, 9.6, 0.2, 2.8], &["Verdura"]),
    food("local_040", "Calabacin", [17.0, 1.2, 3.1, 0.3, 1.0], &["Verdura"]),
    food("local_041", "Pimiento rojo", [31.0, 1.0, 6.0, 0.3, 2.1], &["Verdura"]),
    food("local_042", "Aguacate", [160.0, 2.0, 8.5, 14.7, 6.7], &["Grasa", "Fruta"]),
    food("local_043", "Aceite de oliva virgen extra", [884.0, 0.0, 0.0, 100.0, 0.0], &["Grasa"]),
    food("local_044", "Almendras", [579.0, 21.2, 21.6, 49.9, 12.5], &["Grasa", "Frutos secos"]),
    food("local_045", "Nueces", [654.0, 15.2, 13.7, 65.2, 6.7], &["Grasa", "Frutos secos"]),
    food("local_046", "Crema de cacahuete", [588.0, 25.1, 20.0, 50.0, 6.0], &["Grasa", "Frutos secos"]),
    food("local_047", "Chocolate negro 85%", [600.0, 11.0, 19.0, 51.0, 11.0], &["Snack"]),
    food("local_048", "Proteina de suero", [400.0, 80.0, 8.0, 6.0, 0.0], &["Proteina", "Suplemento"]),
    food("local_049", "Miel", [304.0, 0.3, 82.4, 0.0, 0.2], &["Endulzante"]),
    food("local_050", "Jamon serrano", [241.0, 31.0, 0.5, 13.0, 0.0], &["Proteina", "Embutido"]),
];
