//! Wardrobe item store.
//!
//! [`WardrobeStore`] owns the authoritative list of clothing items and mirrors
//! it to the `wardrobe` storage record. The list is loaded once with
//! [`WardrobeStore::init`] and flushed after every mutation.

use std::collections::BTreeMap;

use chrono::Utc;
use rand::Rng;
use serde::Deserialize;

use crate::domain::item::{ClothingItem, NewClothingItem};
use crate::domain::types::{Category, Color, ItemId, Tag};
use crate::dto::wardrobe::WardrobeDto;
use crate::models::item::StoredClothingItem;
use crate::repository::{StorageReader, StorageWriter, WARDROBE_KEY};
use crate::services::filters::{CategoryFilter, ItemFilter};

use super::{ServiceError, ServiceResult};

/// How an empty wardrobe is written back to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistPolicy {
    /// Never write an empty collection. Removing the last item leaves the
    /// previously stored collection in place.
    #[default]
    SkipEmpty,
    /// Always write the collection, including an empty one.
    Always,
}

/// Read the persisted wardrobe.
///
/// Missing, unreadable or malformed records yield an empty collection. The
/// failure is logged and never surfaced. Within a well-formed record each
/// item is decoded on its own, so an invalid entry is skipped without losing
/// the rest.
pub fn load_all<R>(repo: &R) -> Vec<ClothingItem>
where
    R: StorageReader,
{
    let raw = match repo.get_entry(WARDROBE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::error!("Failed to read wardrobe record: {e}");
            return Vec::new();
        }
    };

    let entries = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("Failed to parse wardrobe data: {e}");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match decode_stored_item(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("Skipping stored wardrobe item #{index}: {e}");
                None
            }
        })
        .collect()
}

fn decode_stored_item(entry: serde_json::Value) -> Result<ClothingItem, String> {
    let stored: StoredClothingItem = serde_json::from_value(entry).map_err(|e| e.to_string())?;
    ClothingItem::try_from(stored).map_err(|e| e.to_string())
}

fn generate_item_id<G>(rng: &mut G) -> ServiceResult<ItemId>
where
    G: Rng + ?Sized,
{
    let id = format!(
        "item-{}-{}",
        Utc::now().timestamp_millis(),
        rng.random_range(0..1000)
    );
    ItemId::new(id).map_err(|e| {
        log::error!("Generated an invalid item id: {e}");
        ServiceError::Internal
    })
}

/// In-memory wardrobe mirrored to durable storage.
pub struct WardrobeStore<R> {
    repo: R,
    items: Vec<ClothingItem>,
    policy: PersistPolicy,
}

impl<R> WardrobeStore<R>
where
    R: StorageReader + StorageWriter,
{
    /// Load the persisted wardrobe and take ownership of the repository.
    pub fn init(repo: R, policy: PersistPolicy) -> Self {
        let items = load_all(&repo);
        log::info!("Loaded {} wardrobe items", items.len());
        Self {
            repo,
            items,
            policy,
        }
    }

    pub fn items(&self) -> &[ClothingItem] {
        &self.items
    }

    /// Owned copy of the current items, used as generator input.
    pub fn snapshot(&self) -> Vec<ClothingItem> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&ClothingItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Append a new item under a freshly generated id and persist.
    ///
    /// A failed write keeps the item in memory and reports
    /// [`ServiceError::Storage`].
    pub fn add<G>(&mut self, item: NewClothingItem, rng: &mut G) -> ServiceResult<ClothingItem>
    where
        G: Rng + ?Sized,
    {
        let mut id = generate_item_id(rng)?;
        while self.get(&id).is_some() {
            id = generate_item_id(rng)?;
        }

        let item = ClothingItem::from_new(id, item);
        self.items.push(item.clone());
        log::info!("Added {} item {}", item.category, item.id);

        self.persist()?;
        Ok(item)
    }

    /// Remove the item with the given id and persist.
    pub fn remove(&mut self, id: &ItemId) -> ServiceResult<()> {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            return Err(ServiceError::NotFound);
        }
        log::info!("Removed item {id}");

        self.persist()?;
        Ok(())
    }

    /// Replace the tags of the item with the given id and persist.
    pub fn update_tags(&mut self, id: &ItemId, tags: Vec<Tag>) -> ServiceResult<ClothingItem> {
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return Err(ServiceError::NotFound);
        };
        item.tags = tags;
        let updated = item.clone();
        log::info!("Updated tags of item {id}");

        self.persist()?;
        Ok(updated)
    }

    /// Write the whole collection as one record.
    ///
    /// Returns `Ok(false)` when the write was skipped because the collection
    /// is empty under [`PersistPolicy::SkipEmpty`].
    pub fn persist(&self) -> ServiceResult<bool> {
        if self.items.is_empty() && self.policy == PersistPolicy::SkipEmpty {
            log::debug!("Wardrobe is empty, skipping persistence");
            return Ok(false);
        }

        let raw = serde_json::to_string(&self.items).map_err(|e| {
            log::error!("Failed to serialize wardrobe: {e}");
            ServiceError::Internal
        })?;

        match self.repo.put_entry(WARDROBE_KEY, &raw) {
            Ok(_) => Ok(true),
            Err(e) => {
                log::error!("Failed to persist wardrobe: {e}");
                Err(ServiceError::Storage(e.to_string()))
            }
        }
    }

    /// Distinct tags across the wardrobe in first-seen order.
    pub fn tag_index(&self) -> Vec<Tag> {
        let mut tags: Vec<Tag> = Vec::new();
        for tag in self.items.iter().flat_map(|item| item.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    /// Distinct colours across the wardrobe in first-seen order.
    pub fn color_index(&self) -> Vec<Color> {
        let mut colors: Vec<Color> = Vec::new();
        for color in self.items.iter().filter_map(|item| item.color) {
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
        colors
    }

    /// Number of items per category; categories without items are omitted.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.category).or_insert(0) += 1;
        }
        counts
    }
}

/// Query parameters accepted when listing the wardrobe.
#[derive(Deserialize, Debug, Default)]
pub struct ItemsQueryParams {
    pub category: Option<String>,
    /// Comma separated, all must match.
    pub tags: Option<String>,
    pub color: Option<String>,
    pub search: Option<String>,
}

impl ItemsQueryParams {
    /// Build the combined filter. An unknown colour is rejected; an unknown
    /// category simply matches nothing.
    pub fn into_filter(self) -> ServiceResult<ItemFilter> {
        let mut filter = ItemFilter::default()
            .search(self.search.unwrap_or_default())
            .category(CategoryFilter::parse(self.category.as_deref()));

        for tag in self.tags.iter().flat_map(|t| t.split(',')) {
            let tag = tag.trim();
            if !tag.is_empty() {
                filter = filter.tag(tag);
            }
        }

        if let Some(color) = self.color.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            filter = filter.color(Color::try_from(color)?);
        }

        Ok(filter)
    }
}

/// Filtered wardrobe listing with tag, colour and category indices.
pub fn show_wardrobe<R>(
    store: &WardrobeStore<R>,
    params: ItemsQueryParams,
) -> ServiceResult<WardrobeDto>
where
    R: StorageReader + StorageWriter,
{
    let filter = params.into_filter()?;

    Ok(WardrobeDto {
        total: store.len(),
        items: filter.apply(store.snapshot()),
        tags: store.tag_index(),
        colors: store.color_index(),
        categories: store.category_counts(),
    })
}
