//! Outfit generation.
//!
//! Pairs tops with bottoms in index order and decorates each pairing with
//! randomly chosen outerwear, shoes and accessories. Randomness comes from the
//! caller so results are reproducible with a seeded generator.

use chrono::Utc;
use rand::Rng;

use crate::domain::item::ClothingItem;
use crate::domain::outfit::Outfit;
use crate::domain::types::{Category, Occasion, OutfitId};

use super::{ServiceError, ServiceResult};

/// Largest batch a single generation run produces.
pub const MAX_OUTFITS: usize = 6;
/// Chance that an outfit gets outerwear when any is available.
pub const OUTERWEAR_PROBABILITY: f64 = 0.5;
/// Chance that an outfit gets shoes when any are available.
pub const SHOES_PROBABILITY: f64 = 0.7;
/// Cap applied to the number of accessories per outfit.
pub const ACCESSORY_CAP: usize = 3;
/// Minimum number of wardrobe items needed to attempt generation.
pub const MIN_ITEMS: usize = 2;

/// Tunables for [`generate_outfits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Label every outfit with a random occasion.
    pub assign_occasion: bool,
    /// Treat [`ACCESSORY_CAP`] as an inclusive bound on the accessory count.
    /// When false the count is drawn from `[0, min(cap, n))`.
    pub inclusive_accessory_cap: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            assign_occasion: true,
            inclusive_accessory_cap: false,
        }
    }
}

/// Items of a wardrobe snapshot grouped by the slot they can fill.
#[derive(Debug, Default)]
struct Buckets<'a> {
    tops: Vec<&'a ClothingItem>,
    bottoms: Vec<&'a ClothingItem>,
    outerwear: Vec<&'a ClothingItem>,
    shoes: Vec<&'a ClothingItem>,
    accessories: Vec<&'a ClothingItem>,
}

impl<'a> Buckets<'a> {
    fn partition(items: &'a [ClothingItem]) -> Self {
        let mut buckets = Self::default();
        for item in items {
            match item.category {
                Category::Tops => buckets.tops.push(item),
                Category::Bottoms => buckets.bottoms.push(item),
                Category::Outerwear => buckets.outerwear.push(item),
                Category::Shoes => buckets.shoes.push(item),
                Category::Accessories => buckets.accessories.push(item),
                Category::Dresses => {}
            }
        }
        buckets
    }
}

fn pick<G>(bucket: &[&ClothingItem], rng: &mut G) -> ClothingItem
where
    G: Rng + ?Sized,
{
    bucket[rng.random_range(0..bucket.len())].clone()
}

fn pick_accessories<G>(
    accessories: &[&ClothingItem],
    options: &MatchOptions,
    rng: &mut G,
) -> Vec<ClothingItem>
where
    G: Rng + ?Sized,
{
    if accessories.is_empty() {
        return Vec::new();
    }

    let cap = ACCESSORY_CAP.min(accessories.len());
    let count = if options.inclusive_accessory_cap {
        rng.random_range(0..=cap)
    } else {
        rng.random_range(0..cap)
    };

    (0..count).map(|_| pick(accessories, rng)).collect()
}

/// Produce a batch of outfits from a wardrobe snapshot.
///
/// Fails with [`ServiceError::InsufficientItems`] when the snapshot holds
/// fewer than [`MIN_ITEMS`] items. A wardrobe without tops or without bottoms
/// yields an empty batch.
pub fn generate_outfits<G>(
    items: &[ClothingItem],
    options: &MatchOptions,
    rng: &mut G,
) -> ServiceResult<Vec<Outfit>>
where
    G: Rng + ?Sized,
{
    if items.len() < MIN_ITEMS {
        return Err(ServiceError::InsufficientItems { found: items.len() });
    }

    let buckets = Buckets::partition(items);
    let total = MAX_OUTFITS.min(buckets.tops.len() * buckets.bottoms.len());
    let stamp = Utc::now().timestamp_millis();

    let mut outfits = Vec::with_capacity(total);
    for i in 0..total {
        let top = buckets.tops[i % buckets.tops.len()];
        let bottom = buckets.bottoms[(i / buckets.tops.len()) % buckets.bottoms.len()];

        let outerwear = if !buckets.outerwear.is_empty() && rng.random_bool(OUTERWEAR_PROBABILITY)
        {
            Some(pick(&buckets.outerwear, rng))
        } else {
            None
        };

        let shoes = if !buckets.shoes.is_empty() && rng.random_bool(SHOES_PROBABILITY) {
            Some(pick(&buckets.shoes, rng))
        } else {
            None
        };

        let accessories = pick_accessories(&buckets.accessories, options, rng);

        let occasion = options.assign_occasion.then(|| {
            if rng.random_bool(0.5) {
                Occasion::Casual
            } else {
                Occasion::Formal
            }
        });

        let id = OutfitId::new(format!("outfit-{stamp}-{i}")).map_err(|e| {
            log::error!("Generated an invalid outfit id: {e}");
            ServiceError::Internal
        })?;

        outfits.push(Outfit {
            id,
            top: Some(top.clone()),
            bottom: Some(bottom.clone()),
            outerwear,
            shoes,
            accessories,
            occasion,
        });
    }

    log::info!(
        "Generated {} outfit combinations from {} items",
        outfits.len(),
        items.len()
    );

    Ok(outfits)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::domain::types::{ImageRef, ItemId};

    fn item(id: &str, category: Category) -> ClothingItem {
        ClothingItem {
            id: ItemId::new(id).unwrap(),
            image: ImageRef::new(format!("/img/{id}.png")).unwrap(),
            category,
            name: None,
            description: None,
            color: None,
            tags: vec![],
        }
    }

    fn ids(outfit: &Outfit) -> (&str, &str) {
        (
            outfit.top.as_ref().unwrap().id.as_str(),
            outfit.bottom.as_ref().unwrap().id.as_str(),
        )
    }

    #[test]
    fn fewer_than_two_items_is_insufficient() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate_outfits(&[], &MatchOptions::default(), &mut rng).unwrap_err();
        assert_eq!(err, ServiceError::InsufficientItems { found: 0 });

        let one = vec![item("a", Category::Tops)];
        let err = generate_outfits(&one, &MatchOptions::default(), &mut rng).unwrap_err();
        assert_eq!(err, ServiceError::InsufficientItems { found: 1 });
    }

    #[test]
    fn pairs_two_tops_with_one_bottom_in_index_order() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = vec![
            item("a", Category::Tops),
            item("b", Category::Tops),
            item("c", Category::Bottoms),
        ];

        let outfits = generate_outfits(&items, &MatchOptions::default(), &mut rng).unwrap();

        assert_eq!(outfits.len(), 2);
        assert_eq!(ids(&outfits[0]), ("a", "c"));
        assert_eq!(ids(&outfits[1]), ("b", "c"));
    }

    #[test]
    fn batch_size_is_capped_at_six() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut items: Vec<ClothingItem> = (0..4)
            .map(|i| item(&format!("t{i}"), Category::Tops))
            .collect();
        items.extend((0..3).map(|i| item(&format!("b{i}"), Category::Bottoms)));

        let outfits = generate_outfits(&items, &MatchOptions::default(), &mut rng).unwrap();

        assert_eq!(outfits.len(), 6);
        assert_eq!(ids(&outfits[4]), ("t0", "b1"));
        assert_eq!(ids(&outfits[5]), ("t1", "b1"));
        let unique: HashSet<&str> = outfits.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn missing_tops_or_bottoms_yields_empty_batch() {
        let mut rng = StdRng::seed_from_u64(5);
        let items = vec![
            item("a", Category::Tops),
            item("b", Category::Shoes),
            item("c", Category::Dresses),
        ];
        let outfits = generate_outfits(&items, &MatchOptions::default(), &mut rng).unwrap();
        assert!(outfits.is_empty());

        let items = vec![item("a", Category::Bottoms), item("b", Category::Bottoms)];
        let outfits = generate_outfits(&items, &MatchOptions::default(), &mut rng).unwrap();
        assert!(outfits.is_empty());
    }

    #[test]
    fn optional_slots_only_use_matching_categories() {
        let items = vec![
            item("t", Category::Tops),
            item("b", Category::Bottoms),
            item("o", Category::Outerwear),
            item("s", Category::Shoes),
            item("x1", Category::Accessories),
            item("x2", Category::Accessories),
            item("x3", Category::Accessories),
            item("x4", Category::Accessories),
        ];

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outfits = generate_outfits(&items, &MatchOptions::default(), &mut rng).unwrap();
            assert_eq!(outfits.len(), 1);
            let outfit = &outfits[0];
            if let Some(outerwear) = &outfit.outerwear {
                assert_eq!(outerwear.category, Category::Outerwear);
            }
            if let Some(shoes) = &outfit.shoes {
                assert_eq!(shoes.category, Category::Shoes);
            }
            assert!(outfit.accessories.len() <= 2);
            assert!(
                outfit
                    .accessories
                    .iter()
                    .all(|a| a.category == Category::Accessories)
            );
            assert!(outfit.occasion.is_some());
        }
    }

    #[test]
    fn inclusive_cap_allows_three_accessories() {
        let items = vec![
            item("t", Category::Tops),
            item("b", Category::Bottoms),
            item("x1", Category::Accessories),
            item("x2", Category::Accessories),
            item("x3", Category::Accessories),
        ];
        let options = MatchOptions {
            assign_occasion: false,
            inclusive_accessory_cap: true,
        };

        let max = (0..200)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let outfits = generate_outfits(&items, &options, &mut rng).unwrap();
                assert!(outfits[0].occasion.is_none());
                outfits[0].accessories.len()
            })
            .max()
            .unwrap();

        assert_eq!(max, 3);
    }

    #[test]
    fn same_seed_gives_same_batch() {
        let items = vec![
            item("t1", Category::Tops),
            item("t2", Category::Tops),
            item("b", Category::Bottoms),
            item("o", Category::Outerwear),
            item("s", Category::Shoes),
            item("x", Category::Accessories),
        ];

        let first =
            generate_outfits(&items, &MatchOptions::default(), &mut StdRng::seed_from_u64(8))
                .unwrap();
        let second =
            generate_outfits(&items, &MatchOptions::default(), &mut StdRng::seed_from_u64(8))
                .unwrap();

        let strip = |outfits: Vec<Outfit>| {
            outfits
                .into_iter()
                .map(|o| (o.outerwear, o.shoes, o.accessories, o.occasion))
                .collect::<Vec<_>>()
        };
        assert_eq!(strip(first), strip(second));
    }
}
