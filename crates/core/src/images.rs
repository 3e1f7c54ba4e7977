//! Stock photo catalog used to illustrate suggestions.
//!
//! Photos are keyed by style, figure and temperature bucket. Selection skips
//! recently shown URLs unless that would leave nothing to choose from.

use std::collections::HashMap;
use std::sync::OnceLock;

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::domain::profile::Gender;
use crate::domain::style::Style;
use crate::domain::weather::TemperatureBucket;

const PHOTO_HOST: &str = "https://images.unsplash.com/photo-";
const PHOTO_PARAMS: &str = "?w=400&h=600&fit=crop&crop=center";
const DEFAULT_MALE_PHOTO: &str = "1507003211169-0a1dd7228f2d";
const DEFAULT_FEMALE_PHOTO: &str = "1517841905240-472988babdf9";

pub trait ImageSelector: Send + Sync {
    /// Picks one image URL. `exclude` lists recently shown URLs.
    fn select(
        &self,
        style: &str,
        gender: Gender,
        temperature: i32,
        exclude: &[String],
        rng: &mut dyn RngCore,
    ) -> String;
}

/// Photos are shot on two figures; `Other` uses the male set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Figure {
    Male,
    Female,
}

impl From<Gender> for Figure {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Female => Self::Female,
            Gender::Male | Gender::Other => Self::Male,
        }
    }
}

type PhotoSeed = (Style, Figure, TemperatureBucket, &'static [&'static str]);

const PHOTO_SEEDS: &[PhotoSeed] = &[
    (Style::Casual, Figure::Male, TemperatureBucket::Cold, &[
        "1596755094514-f87e34085b2c",
        "1507003211169-0a1dd7228f2d",
        "1516726817505-f5ed825624d8",
    ]),
    (Style::Casual, Figure::Male, TemperatureBucket::Mild, &[
        "1472099645785-5658abf4ff4e",
        "1500648767791-00dcc994a43e",
        "1519058082700-08a0b56da9b4",
    ]),
    (Style::Casual, Figure::Male, TemperatureBucket::Warm, &[
        "1506794778202-cad84cf45f1d",
        "1552058544-f2b08422138a",
        "1603252109303-2751441b4157",
    ]),
    (Style::Casual, Figure::Female, TemperatureBucket::Cold, &[
        "1594736797933-d0eced5dbd55",
        "1580489944761-15a19d654956",
        "1618220179428-22790b461013",
    ]),
    (Style::Casual, Figure::Female, TemperatureBucket::Mild, &[
        "1562157873-818bc0726f68",
        "1517841905240-472988babdf9",
        "1539571696357-5a69c17a67c6",
    ]),
    (Style::Casual, Figure::Female, TemperatureBucket::Warm, &[
        "1515886657613-9f3515b0c78f",
        "1573496359142-b8d87734a5a2",
        "1524504388940-b1c1722653e1",
    ]),
    (Style::Smart, Figure::Male, TemperatureBucket::Cold, &[
        "1507119212780-2b33727d2ad5",
        "1492562080023-ab3db95bfbce",
        "1521572267360-ee0c2909d518",
    ]),
    (Style::Smart, Figure::Male, TemperatureBucket::Mild, &[
        "1580489944761-15a19d654956",
        "1559563458-527698bf5295",
        "1537511446984-935f663eb1f4",
    ]),
    (Style::Smart, Figure::Male, TemperatureBucket::Warm, &[
        "1541271696563-3be2f555fc4e",
        "1576091160399-112ba8d25d1f",
        "1590736969955-71cc94901144",
    ]),
    (Style::Smart, Figure::Female, TemperatureBucket::Cold, &[
        "1594736797933-d0eced5dbd55",
        "1551698618-1dfe5d97d256",
        "1596815064285-45ed8a9c0463",
    ]),
    (Style::Smart, Figure::Female, TemperatureBucket::Mild, &[
        "1573496359142-b8d87734a5a2",
        "1554151228-14d9def656e4",
        "1593476087123-36d1de271f08",
    ]),
    (Style::Smart, Figure::Female, TemperatureBucket::Warm, &[
        "1515886657613-9f3515b0c78f",
        "1529139574466-a303027c1d8b",
        "1573497019940-1c28c88b4f3e",
    ]),
    (Style::Street, Figure::Male, TemperatureBucket::Cold, &[
        "1574180045827-681f8a1a9622",
        "1604830664190-d7e6137ba6bc",
        "1581833971358-2c8b550f87b3",
    ]),
    (Style::Street, Figure::Male, TemperatureBucket::Mild, &[
        "1548142813-c348350df52b",
        "1586348943529-beaae6c28db9",
        "1521119989659-a83eee488004",
    ]),
    (Style::Street, Figure::Male, TemperatureBucket::Warm, &[
        "1567013127542-490d757e51cd",
        "1603252109303-2751441b4157",
        "1507003211169-0a1dd7228f2d",
    ]),
    (Style::Street, Figure::Female, TemperatureBucket::Cold, &[
        "1607278715207-858aa08d8b56",
        "1595777216528-85e6974c7e56",
        "1601455763557-db1bea8a9a5a",
    ]),
    (Style::Street, Figure::Female, TemperatureBucket::Mild, &[
        "1533973427897-737b112ee0b9",
        "1578632292335-df3abbb0d586",
        "1596783077077-9bb74c7c1399",
    ]),
    (Style::Street, Figure::Female, TemperatureBucket::Warm, &[
        "1592334873319-6d419f0fdd58",
        "1524504388940-b1c1722653e1",
        "1517841905240-472988babdf9",
    ]),
    (Style::Mode, Figure::Male, TemperatureBucket::Cold, &[
        "1507119212780-2b33727d2ad5",
        "1616804000710-8a9d4146b7b8",
        "1581833971358-2c8b550f87b3",
    ]),
    (Style::Mode, Figure::Male, TemperatureBucket::Mild, &[
        "1541271696563-3be2f555fc4e",
        "1559563458-527698bf5295",
        "1537511446984-935f663eb1f4",
    ]),
    (Style::Mode, Figure::Male, TemperatureBucket::Warm, &[
        "1576091160399-112ba8d25d1f",
        "1590736969955-71cc94901144",
        "1552058544-f2b08422138a",
    ]),
    (Style::Mode, Figure::Female, TemperatureBucket::Cold, &[
        "1551698618-1dfe5d97d256",
        "1594736797933-d0eced5dbd55",
        "1596815064285-45ed8a9c0463",
    ]),
    (Style::Mode, Figure::Female, TemperatureBucket::Mild, &[
        "1554151228-14d9def656e4",
        "1593476087123-36d1de271f08",
        "1573496359142-b8d87734a5a2",
    ]),
    (Style::Mode, Figure::Female, TemperatureBucket::Warm, &[
        "1529139574466-a303027c1d8b",
        "1573497019940-1c28c88b4f3e",
        "1515886657613-9f3515b0c78f",
    ]),
    (Style::Minimal, Figure::Male, TemperatureBucket::Cold, &[
        "1472099645785-5658abf4ff4e",
        "1500648767791-00dcc994a43e",
        "1519058082700-08a0b56da9b4",
    ]),
    (Style::Minimal, Figure::Male, TemperatureBucket::Mild, &[
        "1506794778202-cad84cf45f1d",
        "1507003211169-0a1dd7228f2d",
        "1516726817505-f5ed825624d8",
    ]),
    (Style::Minimal, Figure::Male, TemperatureBucket::Warm, &[
        "1552058544-f2b08422138a",
        "1603252109303-2751441b4157",
        "1596755094514-f87e34085b2c",
    ]),
    (Style::Minimal, Figure::Female, TemperatureBucket::Cold, &[
        "1562157873-818bc0726f68",
        "1517841905240-472988babdf9",
        "1580489944761-15a19d654956",
    ]),
    (Style::Minimal, Figure::Female, TemperatureBucket::Mild, &[
        "1539571696357-5a69c17a67c6",
        "1515886657613-9f3515b0c78f",
        "1573496359142-b8d87734a5a2",
    ]),
    (Style::Minimal, Figure::Female, TemperatureBucket::Warm, &[
        "1524504388940-b1c1722653e1",
        "1517841905240-472988babdf9",
        "1529139574466-a303027c1d8b",
    ]),
    (Style::Vintage, Figure::Male, TemperatureBucket::Cold, &[
        "1507119212780-2b33727d2ad5",
        "1507003211169-0a1dd7228f2d",
        "1516726817505-f5ed825624d8",
    ]),
    (Style::Vintage, Figure::Male, TemperatureBucket::Mild, &[
        "1472099645785-5658abf4ff4e",
        "1500648767791-00dcc994a43e",
        "1559563458-527698bf5295",
    ]),
    (Style::Vintage, Figure::Male, TemperatureBucket::Warm, &[
        "1519058082700-08a0b56da9b4",
        "1552058544-f2b08422138a",
        "1596755094514-f87e34085b2c",
    ]),
    (Style::Vintage, Figure::Female, TemperatureBucket::Cold, &[
        "1562157873-818bc0726f68",
        "1580489944761-15a19d654956",
        "1618220179428-22790b461013",
    ]),
    (Style::Vintage, Figure::Female, TemperatureBucket::Mild, &[
        "1517841905240-472988babdf9",
        "1539571696357-5a69c17a67c6",
        "1573496359142-b8d87734a5a2",
    ]),
    (Style::Vintage, Figure::Female, TemperatureBucket::Warm, &[
        "1515886657613-9f3515b0c78f",
        "1524504388940-b1c1722653e1",
        "1529139574466-a303027c1d8b",
    ]),
];

fn photo_url(id: &str) -> String {
    format!("{PHOTO_HOST}{id}{PHOTO_PARAMS}")
}

pub fn default_image(gender: Gender) -> String {
    match Figure::from(gender) {
        Figure::Female => photo_url(DEFAULT_FEMALE_PHOTO),
        Figure::Male => photo_url(DEFAULT_MALE_PHOTO),
    }
}

#[derive(Clone, Debug, Default)]
pub struct StockImageCatalog {
    photos: HashMap<(Style, Figure, TemperatureBucket), Vec<String>>,
}

impl StockImageCatalog {
    pub fn builtin() -> &'static StockImageCatalog {
        static BUILTIN: OnceLock<StockImageCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let photos = PHOTO_SEEDS
                .iter()
                .map(|(style, figure, bucket, ids)| {
                    ((*style, *figure, *bucket), ids.iter().map(|id| photo_url(id)).collect())
                })
                .collect();
            StockImageCatalog { photos }
        })
    }

    /// Every photo for a style and gender across all buckets, cold to warm.
    pub fn images_for(&self, style: &str, gender: Gender) -> Vec<String> {
        let style = Style::lookup_key(style);
        let figure = Figure::from(gender);
        [TemperatureBucket::Cold, TemperatureBucket::Mild, TemperatureBucket::Warm]
            .iter()
            .filter_map(|bucket| self.photos.get(&(style, figure, *bucket)))
            .flat_map(|urls| urls.iter().cloned())
            .collect()
    }

    fn pool(&self, style: Style, figure: Figure, bucket: TemperatureBucket) -> &[String] {
        self.photos.get(&(style, figure, bucket)).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl ImageSelector for StockImageCatalog {
    fn select(
        &self,
        style: &str,
        gender: Gender,
        temperature: i32,
        exclude: &[String],
        rng: &mut dyn RngCore,
    ) -> String {
        let pool = self.pool(
            Style::lookup_key(style),
            Figure::from(gender),
            TemperatureBucket::from_celsius(temperature),
        );

        let fresh = pool.iter().filter(|url| !exclude.contains(*url)).collect::<Vec<_>>();
        let chosen = if fresh.is_empty() {
            pool.choose(rng)
        } else {
            fresh.choose(rng).copied()
        };

        chosen.cloned().unwrap_or_else(|| default_image(gender))
    }
}
