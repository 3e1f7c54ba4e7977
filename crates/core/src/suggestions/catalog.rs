//! Static clothing tables used by the rule-based generator.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::domain::profile::{AgeBracket, Gender, UserDemographic};
use crate::domain::style::Style;
use crate::domain::weather::TemperatureBucket;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Tops,
    Bottoms,
    Shoes,
    Accessories,
}

impl Category {
    /// Selection order; the first category receives the palette color.
    pub const ALL: [Category; 4] = [Self::Tops, Self::Bottoms, Self::Shoes, Self::Accessories];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tops => "tops",
            Self::Bottoms => "bottoms",
            Self::Shoes => "shoes",
            Self::Accessories => "accessories",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TableSeed {
    style: Style,
    bucket: TemperatureBucket,
    tops: &'static [&'static str],
    bottoms: &'static [&'static str],
    shoes: &'static [&'static str],
    accessories: &'static [&'static str],
}

const TABLE_SEEDS: &[TableSeed] = &[
    TableSeed {
        style: Style::Casual,
        bucket: TemperatureBucket::Cold,
        tops: &["chunky knit sweater", "hoodie", "fleece jacket", "down vest", "sweater"],
        bottoms: &["jeans", "chinos", "sweatpants", "cargo pants"],
        shoes: &["sneakers", "boots", "high-top sneakers"],
        accessories: &["knit beanie", "scarf", "gloves", "backpack"],
    },
    TableSeed {
        style: Style::Casual,
        bucket: TemperatureBucket::Warm,
        tops: &["T-shirt", "short-sleeve shirt", "polo shirt", "tank top", "light cardigan"],
        bottoms: &["shorts", "lightweight jeans", "linen pants"],
        shoes: &["sneakers", "sandals", "canvas shoes"],
        accessories: &["cap", "sunglasses", "tote bag", "wristwatch"],
    },
    TableSeed {
        style: Style::Casual,
        bucket: TemperatureBucket::Mild,
        tops: &["long-sleeve T-shirt", "light knit", "cardigan", "denim jacket"],
        bottoms: &["jeans", "chinos", "straight pants"],
        shoes: &["sneakers", "loafers", "desert boots"],
        accessories: &["wristwatch", "shoulder bag", "light stole"],
    },
    TableSeed {
        style: Style::Smart,
        bucket: TemperatureBucket::Cold,
        tops: &["wool coat", "jacket", "cashmere sweater", "blazer"],
        bottoms: &["slacks", "wool trousers", "tailored trousers"],
        shoes: &["leather shoes", "boots", "loafers"],
        accessories: &["leather bag", "wool scarf", "leather gloves"],
    },
    TableSeed {
        style: Style::Smart,
        bucket: TemperatureBucket::Warm,
        tops: &["dress shirt", "polo shirt", "linen shirt", "light blazer"],
        bottoms: &["slacks", "chinos", "linen pants"],
        shoes: &["leather shoes", "loafers", "deck shoes"],
        accessories: &["leather bag", "wristwatch", "sunglasses"],
    },
    TableSeed {
        style: Style::Smart,
        bucket: TemperatureBucket::Mild,
        tops: &["shirt", "light sweater", "cardigan", "jacket"],
        bottoms: &["slacks", "chinos", "straight pants"],
        shoes: &["leather shoes", "loafers", "sneakers"],
        accessories: &["business bag", "wristwatch", "belt"],
    },
    TableSeed {
        style: Style::Street,
        bucket: TemperatureBucket::Cold,
        tops: &["oversized hoodie", "bomber jacket", "layered graphic T-shirt"],
        bottoms: &["skinny jeans", "cargo pants", "jogger pants"],
        shoes: &["high-top sneakers", "street boots", "basketball sneakers"],
        accessories: &["bucket hat", "chain necklace", "waist bag"],
    },
    TableSeed {
        style: Style::Street,
        bucket: TemperatureBucket::Warm,
        tops: &["graphic T-shirt", "basketball jersey", "open-collar shirt"],
        bottoms: &["shorts", "half pants", "skinny jeans"],
        shoes: &["sneakers", "high-top sneakers", "sandals"],
        accessories: &["cap", "chain necklace", "body bag"],
    },
    TableSeed {
        style: Style::Street,
        bucket: TemperatureBucket::Mild,
        tops: &["hoodie", "sweatshirt", "long-sleeve tee", "zip-up jacket"],
        bottoms: &["skinny jeans", "jogger pants", "cargo pants"],
        shoes: &["sneakers", "high-top sneakers", "street boots"],
        accessories: &["cap", "backpack", "silver rings"],
    },
];

const PALETTE_SEEDS: &[(Style, &[&str])] = &[
    (Style::Casual, &["navy", "white", "beige", "gray", "olive"]),
    (Style::Smart, &["black", "navy", "gray", "white", "brown"]),
    (Style::Street, &["black", "white", "red", "yellow", "green"]),
];

const STYLE_CLAUSE_SEEDS: &[(Style, &str)] = &[
    (Style::Casual, "a relaxed everyday style that puts ease of movement and comfort first"),
    (Style::Smart, "a polished, refined style that gives a neat impression"),
    (Style::Street, "a trend-aware street style that expresses individuality"),
    (Style::Mode, "a fashion-forward mode style with a sophisticated edge"),
    (Style::Minimal, "a simple minimal style with nothing superfluous"),
    (Style::Vintage, "a retro, classic vintage style"),
];

/// Candidate names per category for one (style, bucket) cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateTable {
    pub tops: Vec<String>,
    pub bottoms: Vec<String>,
    pub shoes: Vec<String>,
    pub accessories: Vec<String>,
}

impl CandidateTable {
    pub fn candidates(&self, category: Category) -> &[String] {
        match category {
            Category::Tops => &self.tops,
            Category::Bottoms => &self.bottoms,
            Category::Shoes => &self.shoes,
            Category::Accessories => &self.accessories,
        }
    }

    fn from_seed(seed: &TableSeed) -> Self {
        Self {
            tops: to_owned_list(seed.tops),
            bottoms: to_owned_list(seed.bottoms),
            shoes: to_owned_list(seed.shoes),
            accessories: to_owned_list(seed.accessories),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ClothingCatalog {
    tables: HashMap<(Style, TemperatureBucket), CandidateTable>,
    palettes: HashMap<Style, Vec<String>>,
    style_clauses: HashMap<Style, String>,
}

impl ClothingCatalog {
    pub fn builtin() -> &'static ClothingCatalog {
        static BUILTIN: OnceLock<ClothingCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut catalog = ClothingCatalog::default();
            for seed in TABLE_SEEDS {
                catalog.tables.insert((seed.style, seed.bucket), CandidateTable::from_seed(seed));
            }
            for (style, colors) in PALETTE_SEEDS {
                catalog.palettes.insert(*style, to_owned_list(colors));
            }
            for (style, clause) in STYLE_CLAUSE_SEEDS {
                catalog.style_clauses.insert(*style, (*clause).to_string());
            }
            catalog
        })
    }

    pub fn with_table(mut self, style: Style, bucket: TemperatureBucket, table: CandidateTable) -> Self {
        self.tables.insert((style, bucket), table);
        self
    }

    pub fn with_palette(mut self, style: Style, colors: Vec<String>) -> Self {
        self.palettes.insert(style, colors);
        self
    }

    /// Exact cell, then the casual cell for the same bucket, then casual/mild.
    pub fn resolve_table(&self, style: Style, bucket: TemperatureBucket) -> Option<&CandidateTable> {
        self.tables
            .get(&(style, bucket))
            .or_else(|| self.tables.get(&(Style::Casual, bucket)))
            .or_else(|| self.tables.get(&(Style::Casual, TemperatureBucket::Mild)))
    }

    pub fn palette(&self, style: Style) -> &[String] {
        self.palettes
            .get(&style)
            .or_else(|| self.palettes.get(&Style::Casual))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn style_clause(&self, style: Style) -> &str {
        self.style_clauses
            .get(&style)
            .or_else(|| self.style_clauses.get(&Style::Casual))
            .map(String::as_str)
            .unwrap_or("a balanced everyday style")
    }
}

/// Extra candidates unioned into a category pool for the given demographic.
/// Duplicates against the base table are kept, so repeated names weigh more.
pub fn demographic_additions(category: Category, demographic: &UserDemographic) -> Vec<&'static str> {
    let bracket = demographic.age_bracket();
    let mut additions = Vec::new();

    match demographic.gender {
        Gender::Female => match category {
            Category::Bottoms => {
                additions.extend(["skirt", "one-piece dress"]);
                if bracket == AgeBracket::Teens {
                    additions.extend(["short skirt", "pleated skirt"]);
                }
                if matches!(bracket, AgeBracket::Twenties | AgeBracket::Thirties) {
                    additions.extend(["A-line skirt", "pencil skirt"]);
                }
            }
            Category::Shoes => {
                additions.extend(["pumps", "boots"]);
                if bracket == AgeBracket::Teens {
                    additions.extend(["cute sneakers", "ankle boots"]);
                }
            }
            Category::Accessories => additions.extend(["earrings", "necklace", "handbag"]),
            Category::Tops => {}
        },
        Gender::Male => match category {
            Category::Shoes if bracket.is_thirties_or_older() => {
                additions.extend(["leather shoes", "loafers"]);
            }
            Category::Accessories if bracket == AgeBracket::Teens => {
                additions.extend(["cap", "rucksack"]);
            }
            _ => {}
        },
        Gender::Other => {}
    }

    if bracket == AgeBracket::Teens {
        match category {
            Category::Tops => additions.extend(["graphic T-shirt", "cute knit"]),
            Category::Accessories => additions.extend(["rucksack", "phone case"]),
            _ => {}
        }
    } else if bracket.is_thirties_or_older() {
        match category {
            Category::Tops => additions.extend(["refined knit", "shirt"]),
            Category::Accessories => additions.extend(["wristwatch", "leather bag"]),
            _ => {}
        }
    }

    additions
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{demographic_additions, Category, ClothingCatalog};
    use crate::domain::profile::{Gender, UserDemographic};
    use crate::domain::style::Style;
    use crate::domain::weather::TemperatureBucket;

    #[test]
    fn styles_without_tables_use_casual() {
        let catalog = ClothingCatalog::builtin();
        let casual = catalog.resolve_table(Style::Casual, TemperatureBucket::Cold);
        assert!(casual.is_some());
        assert_eq!(catalog.resolve_table(Style::Vintage, TemperatureBucket::Cold), casual);
        assert_eq!(catalog.palette(Style::Minimal), catalog.palette(Style::Casual));
        assert_ne!(catalog.palette(Style::Street), catalog.palette(Style::Casual));
    }

    #[test]
    fn every_tabled_cell_has_all_categories() {
        let catalog = ClothingCatalog::builtin();
        for style in [Style::Casual, Style::Smart, Style::Street] {
            for bucket in [TemperatureBucket::Cold, TemperatureBucket::Mild, TemperatureBucket::Warm] {
                let table = catalog.resolve_table(style, bucket).expect("builtin cell");
                for category in Category::ALL {
                    assert!(!table.candidates(category).is_empty(), "{style:?}/{bucket:?}/{category:?}");
                }
            }
        }
    }

    #[test]
    fn female_twenties_get_skirts_and_accessories() {
        let demographic = UserDemographic::new(Gender::Female, 25);
        assert_eq!(
            demographic_additions(Category::Bottoms, &demographic),
            vec!["skirt", "one-piece dress", "A-line skirt", "pencil skirt"]
        );
        assert_eq!(
            demographic_additions(Category::Accessories, &demographic),
            vec!["earrings", "necklace", "handbag"]
        );
        assert!(demographic_additions(Category::Tops, &demographic).is_empty());
    }

    #[test]
    fn male_forties_get_formal_shoes_and_refined_items() {
        let demographic = UserDemographic::new(Gender::Male, 45);
        assert_eq!(demographic_additions(Category::Shoes, &demographic), vec!["leather shoes", "loafers"]);
        assert_eq!(demographic_additions(Category::Tops, &demographic), vec!["refined knit", "shirt"]);
        assert_eq!(
            demographic_additions(Category::Accessories, &demographic),
            vec!["wristwatch", "leather bag"]
        );
    }

    #[test]
    fn teen_additions_apply_regardless_of_gender() {
        let other = UserDemographic::new(Gender::Other, 16);
        assert_eq!(demographic_additions(Category::Tops, &other), vec!["graphic T-shirt", "cute knit"]);

        let male = UserDemographic::new(Gender::Male, 16);
        assert_eq!(
            demographic_additions(Category::Accessories, &male),
            vec!["cap", "rucksack", "rucksack", "phone case"]
        );
    }
}
