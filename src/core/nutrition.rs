use crate::domain::model::{DetectedItem, NourishedItem, NutritionProfile};

/// Per-100g reference values for one canonical food name.
struct TableEntry {
    name: &'static str,
    calories: f64,
    protein: f64,
    fat: f64,
    carbs: f64,
    fiber: f64,
    glycemic_load: f64,
}

const fn entry(
    name: &'static str,
    calories: f64,
    protein: f64,
    fat: f64,
    carbs: f64,
    fiber: f64,
    glycemic_load: f64,
) -> TableEntry {
    TableEntry {
        name,
        calories,
        protein,
        fat,
        carbs,
        fiber,
        glycemic_load,
    }
}

/// USDA-derived stand-in dataset for common buffet foods. A const slice
/// keeps the substring-match iteration order fixed, which the lookup
/// contract requires (first match wins, deterministically).
const NUTRITION_TABLE: &[TableEntry] = &[
    entry("mixed salad", 18.0, 1.5, 0.3, 3.5, 1.2, 2.0),
    entry("salad", 18.0, 1.5, 0.3, 3.5, 1.2, 2.0),
    entry("grilled chicken", 165.0, 31.0, 3.6, 0.0, 0.0, 0.0),
    entry("chicken", 165.0, 31.0, 3.6, 0.0, 0.0, 0.0),
    entry("roasted vegetables", 65.0, 2.0, 3.0, 8.0, 2.5, 4.0),
    entry("vegetables", 65.0, 2.0, 3.0, 8.0, 2.5, 4.0),
    entry("rice", 130.0, 2.7, 0.3, 28.0, 0.4, 23.0),
    entry("bread roll", 265.0, 8.5, 3.2, 50.0, 2.7, 25.0),
    entry("bread", 265.0, 8.5, 3.2, 50.0, 2.7, 25.0),
    entry("soup", 45.0, 2.5, 1.5, 6.0, 1.0, 5.0),
    entry("pasta", 131.0, 5.0, 1.1, 25.0, 1.8, 18.0),
    entry("dessert", 350.0, 4.0, 15.0, 50.0, 1.0, 35.0),
    entry("cake", 350.0, 4.0, 15.0, 50.0, 1.0, 35.0),
    entry("donut", 421.0, 5.0, 22.0, 52.0, 1.5, 40.0),
    entry("pizza", 266.0, 11.0, 10.0, 33.0, 2.3, 22.0),
    entry("hot dog", 290.0, 10.0, 26.0, 4.0, 0.0, 3.0),
    entry("sandwich", 250.0, 12.0, 10.0, 28.0, 1.5, 20.0),
    entry("broccoli", 34.0, 2.8, 0.4, 7.0, 2.6, 2.0),
    entry("carrot", 41.0, 0.9, 0.2, 10.0, 2.8, 5.0),
    entry("apple", 52.0, 0.3, 0.2, 14.0, 2.4, 6.0),
    entry("orange", 47.0, 0.9, 0.1, 12.0, 2.4, 5.0),
    entry("banana", 89.0, 1.1, 0.3, 23.0, 2.6, 12.0),
    entry("steak", 271.0, 26.0, 18.0, 0.0, 0.0, 0.0),
    entry("fish", 206.0, 22.0, 12.0, 0.0, 0.0, 0.0),
    entry("salmon", 208.0, 20.0, 13.0, 0.0, 0.0, 0.0),
    entry("fried chicken", 287.0, 23.0, 18.0, 12.0, 0.5, 8.0),
    entry("potato", 77.0, 2.0, 0.1, 17.0, 2.2, 14.0),
    entry("fries", 312.0, 3.4, 15.0, 42.0, 3.8, 25.0),
    entry("cheese", 402.0, 25.0, 33.0, 1.3, 0.0, 0.0),
    entry("eggs", 155.0, 13.0, 11.0, 1.1, 0.0, 0.0),
    entry("beans", 127.0, 8.7, 0.5, 23.0, 6.4, 6.0),
    entry("lentils", 116.0, 9.0, 0.4, 20.0, 7.9, 5.0),
    entry("quinoa", 120.0, 4.4, 1.9, 21.0, 2.8, 13.0),
    entry("hummus", 166.0, 7.9, 9.6, 14.0, 6.0, 4.0),
];

/// Generic mixed-dish estimate used when nothing in the table matches.
const FALLBACK_ENTRY: TableEntry = entry("generic mixed dish", 150.0, 8.0, 8.0, 12.0, 1.5, 10.0);

const CONFIDENCE_EXACT: f64 = 0.9;
const CONFIDENCE_PARTIAL: f64 = 0.7;
const CONFIDENCE_FALLBACK: f64 = 0.5;

/// Attaches a `NutritionProfile` to every item, preserving order and count.
/// Lookup never fails: unrecognized dishes get the fallback profile so that
/// every dish stays plannable.
pub struct NutritionEnricher;

impl NutritionEnricher {
    pub fn new() -> Self {
        Self
    }

    pub fn enrich(&self, items: Vec<DetectedItem>) -> Vec<NourishedItem> {
        items
            .into_iter()
            .map(|item| {
                let (entry, confidence) = Self::lookup(&item.name);
                let nutrition = NutritionProfile {
                    calories: entry.calories,
                    protein: entry.protein,
                    fat: entry.fat,
                    carbs: entry.carbs,
                    fiber: entry.fiber,
                    glycemic_load: entry.glycemic_load,
                    confidence,
                };
                NourishedItem {
                    item,
                    nutrition_per_100g: nutrition,
                }
            })
            .collect()
    }

    fn lookup(dish_name: &str) -> (&'static TableEntry, f64) {
        let normalized = dish_name.trim().to_lowercase();

        if let Some(entry) = NUTRITION_TABLE.iter().find(|e| e.name == normalized) {
            return (entry, CONFIDENCE_EXACT);
        }

        if let Some(entry) = NUTRITION_TABLE
            .iter()
            .find(|e| normalized.contains(e.name) || e.name.contains(normalized.as_str()))
        {
            return (entry, CONFIDENCE_PARTIAL);
        }

        (&FALLBACK_ENTRY, CONFIDENCE_FALLBACK)
    }
}

impl Default for NutritionEnricher {
    fn default() -> Self {
        Self::new()
    }
}
