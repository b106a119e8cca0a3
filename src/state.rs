//! Shared application state of the HTTP server.
//!
//! Holds the wardrobe store and the currently published outfit batch. Locks
//! are never held across an `.await`.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use actix_web::rt;
use actix_web::rt::task::JoinHandle;
use actix_web::web;

use crate::domain::outfit::Outfit;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::matcher::{MIN_ITEMS, MatchOptions, generate_outfits};
use crate::services::wardrobe::{PersistPolicy, WardrobeStore};
use crate::services::{ServiceError, ServiceResult};

pub struct AppState {
    wardrobe: Mutex<WardrobeStore<DieselRepository>>,
    outfits: Mutex<Vec<Outfit>>,
    pub match_options: MatchOptions,
    pub generation_delay: Duration,
    pub max_upload_bytes: usize,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> ServiceResult<MutexGuard<'a, T>> {
    mutex.lock().map_err(|_| {
        log::error!("{what} lock poisoned");
        ServiceError::Internal
    })
}

impl AppState {
    pub fn new(repo: DieselRepository, config: &ServerConfig) -> Self {
        let policy = if config.persist_empty_wardrobe {
            PersistPolicy::Always
        } else {
            PersistPolicy::SkipEmpty
        };

        Self {
            wardrobe: Mutex::new(WardrobeStore::init(repo, policy)),
            outfits: Mutex::new(Vec::new()),
            match_options: MatchOptions {
                assign_occasion: config.assign_occasion,
                inclusive_accessory_cap: config.inclusive_accessory_cap,
            },
            generation_delay: Duration::from_millis(config.generation_delay_ms),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    pub fn wardrobe(&self) -> ServiceResult<MutexGuard<'_, WardrobeStore<DieselRepository>>> {
        lock(&self.wardrobe, "wardrobe")
    }

    /// Copy of the published outfit batch.
    pub fn outfits(&self) -> ServiceResult<Vec<Outfit>> {
        Ok(lock(&self.outfits, "outfits")?.clone())
    }

    /// Generate a new batch from the current wardrobe and publish it in place
    /// of the previous one. Returns the published batch.
    pub fn regenerate(&self) -> ServiceResult<Vec<Outfit>> {
        let snapshot = self.wardrobe()?.snapshot();
        let batch = generate_outfits(&snapshot, &self.match_options, &mut rand::rng())?;
        *lock(&self.outfits, "outfits")? = batch.clone();
        Ok(batch)
    }

    /// Schedule the first generation after `generation_delay` when the loaded
    /// wardrobe holds enough items. Dropping the returned task cancels it.
    pub fn schedule_initial_generation(
        state: &web::Data<Self>,
    ) -> ServiceResult<Option<DelayedTask>> {
        let stored = state.wardrobe()?.len();
        if stored < MIN_ITEMS {
            log::info!("Skipping initial outfit generation, {stored} items stored");
            return Ok(None);
        }

        let state = state.clone();
        let delay = state.generation_delay;
        Ok(Some(DelayedTask::spawn(delay, move || {
            match state.regenerate() {
                Ok(batch) => log::info!("Generated {} initial outfits", batch.len()),
                Err(e) => log::error!("Initial outfit generation failed: {e}"),
            }
        })))
    }
}

/// A task scheduled to run after a delay.
///
/// Dropping the handle cancels the task if it has not run yet, so work
/// scheduled by a component never outlives it.
pub struct DelayedTask {
    handle: JoinHandle<()>,
}

impl DelayedTask {
    /// Run `task` on the current actix runtime once `delay` has elapsed.
    pub fn spawn<F>(delay: Duration, task: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let handle = rt::spawn(async move {
            if !delay.is_zero() {
                rt::time::sleep(delay).await;
            }
            task();
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
