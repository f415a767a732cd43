//! Category classification by length-weighted keyword scoring.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::KeywordError;
use crate::models::transaction::CategoryTag;

/// Built-in keywords per category.
const DEFAULT_KEYWORDS: &[(CategoryTag, &[&str])] = &[
    (
        CategoryTag::Alimentacion,
        &[
            "adobo", "almuerzo", "cena", "desayuno", "comida", "restaurante", "menu", "pollo",
            "ceviche", "pizza", "hamburguesa", "sushi", "cafe", "té", "bebida", "bocadillo",
            "snack", "mercado", "supermercado", "verduras", "frutas", "carne", "pescado", "arroz",
            "pan", "leche", "huevos", "comestibles", "groceries",
        ],
    ),
    (
        CategoryTag::Transporte,
        &[
            "gasolina", "combustible", "taxi", "uber", "bus", "combi", "metro", "pasaje",
            "transporte", "peaje", "estacionamiento", "parking", "carro", "auto", "moto",
            "bicicleta", "scooter", "lavado", "mantenimiento", "mecanico", "repuestos",
        ],
    ),
    (
        CategoryTag::Entretenimiento,
        &[
            "cine", "pelicula", "teatro", "concierto", "fiesta", "bar", "discoteca", "club",
            "juego", "videojuego", "streaming", "netflix", "spotify", "amazon prime", "disney",
            "hbo", "youtube", "suscripcion", "membresía", "hobby", "deporte", "gimnasio", "gym",
            "entrenamiento", "yoga",
        ],
    ),
    (
        CategoryTag::Salud,
        &[
            "medicina", "farmacia", "doctor", "medico", "consulta", "hospital", "clinica",
            "dentista", "odontologo", "terapia", "psicologo", "psiquiatra", "analisis", "examen",
            "laboratorio", "radiografia", "seguro", "vitaminas", "tratamiento", "pastillas",
            "jarabe", "inyeccion",
        ],
    ),
    (
        CategoryTag::Educacion,
        &[
            "libro", "libros", "curso", "clase", "universidad", "colegio", "escuela", "academia",
            "tutor", "profesor", "matricula", "pension", "material", "utiles", "cuaderno", "lapiz",
            "mochila", "laptop", "tablet", "software", "licencia", "certificacion", "seminario",
            "workshop", "capacitacion",
        ],
    ),
    (
        CategoryTag::Servicios,
        &[
            "luz", "agua", "gas", "internet", "telefono", "celular", "cable", "electricidad",
            "recibo", "factura", "servicio", "alquiler", "renta", "arrendamiento", "mantenimiento",
            "reparacion", "limpieza", "lavanderia", "tintoreria", "peluqueria", "salon",
            "barberia", "corte", "spa",
        ],
    ),
    (
        CategoryTag::Compras,
        &[
            "ropa", "zapatos", "zapatillas", "camisa", "pantalon", "vestido", "falda", "abrigo",
            "chompa", "sweater", "tienda", "mall", "centro comercial", "online", "amazon",
            "mercado libre", "compra", "regalo", "electronico", "computadora", "celular",
            "audifonos", "mouse", "teclado", "monitor", "mueble", "decoracion",
            "electrodomestico",
        ],
    ),
];

/// Per-category keyword sets.
///
/// Only the seven keyword-bearing categories have entries; `Otros` is the
/// fallback and never holds keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    keywords: BTreeMap<CategoryTag, BTreeSet<String>>,
}

impl KeywordTable {
    /// A table with no keywords at all.
    pub fn empty() -> Self {
        Self {
            keywords: CategoryTag::ALL
                .into_iter()
                .filter(CategoryTag::has_keywords)
                .map(|tag| (tag, BTreeSet::new()))
                .collect(),
        }
    }

    /// Add a keyword to a category.
    ///
    /// Returns `Ok(false)` when the keyword was already present.
    pub fn add_keyword(&mut self, category: CategoryTag, keyword: &str) -> Result<bool, KeywordError> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(KeywordError::EmptyKeyword);
        }

        let set = self
            .keywords
            .get_mut(&category)
            .ok_or_else(|| KeywordError::UnknownCategory(category.to_string()))?;

        Ok(set.insert(keyword))
    }

    /// Add a keyword to a category named by its tag string.
    pub fn add_keyword_by_name(&mut self, category: &str, keyword: &str) -> Result<bool, KeywordError> {
        let tag: CategoryTag = category
            .parse()
            .map_err(KeywordError::UnknownCategory)?;
        self.add_keyword(tag, keyword)
    }

    /// Keywords of a category, sorted.
    pub fn keywords(&self, category: CategoryTag) -> impl Iterator<Item = &str> {
        self.keywords
            .get(&category)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Total number of keywords across all categories.
    pub fn len(&self) -> usize {
        self.keywords.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of the character lengths of every keyword of `category` found in `text`.
    pub fn score(&self, category: CategoryTag, text: &str) -> usize {
        self.keywords(category)
            .filter(|keyword| text.contains(*keyword))
            .map(|keyword| keyword.chars().count())
            .sum()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (tag, words) in DEFAULT_KEYWORDS {
            if let Some(set) = table.keywords.get_mut(tag) {
                set.extend(words.iter().map(|w| w.to_string()));
            }
        }
        table
    }
}

/// Picks the best-scoring category for a sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryClassifier;

impl CategoryClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Score every keyword category against lowercased text.
    pub fn scores(&self, table: &KeywordTable, text: &str) -> Vec<(CategoryTag, usize)> {
        CategoryTag::WITH_KEYWORDS
            .into_iter()
            .map(|tag| (tag, table.score(tag, text)))
            .collect()
    }

    /// Classify lowercased text; `Otros` when nothing matches.
    ///
    /// Equal top scores resolve to the category declared first.
    pub fn classify(&self, table: &KeywordTable, text: &str) -> CategoryTag {
        let mut best = (CategoryTag::Otros, 0);

        for (tag, score) in self.scores(table, text) {
            if score > best.1 {
                best = (tag, score);
            }
        }

        debug!("Category {} with score {}", best.0, best.1);
        best.0
    }
}
