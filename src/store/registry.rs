//! Pet store - loads pets, runs the engine, keeps the result
//!
//! Each pet sits behind its own async mutex. Every read-modify-write on a
//! pet holds that mutex from load to store, so actions on one pet are
//! serialized while different pets never wait on each other. The map lock
//! is only held long enough to clone a pet's handle.
//!
//! Lock order: pet, then names or heroes. Neither map lock is held while
//! waiting on a pet.

use ahash::AHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::actions::catalog::PetAction;
use crate::actions::engine::{ActionEngine, ActionOutcome};
use crate::core::config::VitalsConfig;
use crate::core::error::{PetError, Result};
use crate::core::time::{SystemTimeSource, TimeSource};
use crate::core::types::{HeroId, PetId};
use crate::entity::hero::{Hero, HeroUpdate, NewHero};
use crate::entity::pet::{NewPet, Pet, PetUpdate};
use crate::simulation::events::PetEvent;
use crate::store::persistence::StoreSnapshot;

type PetHandle = Arc<Mutex<Pet>>;

pub struct PetStore<T: TimeSource = SystemTimeSource> {
    engine: ActionEngine,
    time: T,
    pets: RwLock<AHashMap<PetId, PetHandle>>,
    /// Pet names are unique across the store
    names: Mutex<AHashMap<String, PetId>>,
    heroes: RwLock<AHashMap<HeroId, Hero>>,
    next_pet_id: AtomicU64,
    next_hero_id: AtomicU64,
}

impl PetStore<SystemTimeSource> {
    pub fn new(config: VitalsConfig) -> Self {
        Self::with_time_source(config, SystemTimeSource)
    }
}

impl<T: TimeSource> PetStore<T> {
    pub fn with_time_source(config: VitalsConfig, time: T) -> Self {
        Self {
            engine: ActionEngine::new(config),
            time,
            pets: RwLock::new(AHashMap::new()),
            names: Mutex::new(AHashMap::new()),
            heroes: RwLock::new(AHashMap::new()),
            next_pet_id: AtomicU64::new(1),
            next_hero_id: AtomicU64::new(1),
        }
    }

    /// Rebuild a store from a snapshot
    ///
    /// Out-of-range vitals are clamped; duplicate ids or pet names are
    /// rejected.
    pub fn from_snapshot(snapshot: StoreSnapshot, config: VitalsConfig, time: T) -> Result<Self> {
        let mut pets = AHashMap::new();
        let mut names = AHashMap::new();
        let mut heroes = AHashMap::new();

        for hero in snapshot.heroes {
            let id = hero.id;
            if heroes.insert(id, hero).is_some() {
                return Err(PetError::Validation(format!("duplicate hero id {}", id)));
            }
        }
        for mut pet in snapshot.pets {
            pet.vitals = pet.vitals.clamped();
            if names.insert(pet.name.clone(), pet.id).is_some() {
                return Err(PetError::Validation(format!(
                    "duplicate pet name '{}'",
                    pet.name
                )));
            }
            let id = pet.id;
            if pets.insert(id, Arc::new(Mutex::new(pet))).is_some() {
                return Err(PetError::Validation(format!("duplicate pet id {}", id)));
            }
        }

        let next_pet = next_id(pets.keys().map(|id: &PetId| id.0), "pet")?;
        let next_hero = next_id(heroes.keys().map(|id: &HeroId| id.0), "hero")?;
        tracing::info!(
            pets = pets.len(),
            heroes = heroes.len(),
            "restored store from snapshot"
        );

        Ok(Self {
            engine: ActionEngine::new(config),
            time,
            pets: RwLock::new(pets),
            names: Mutex::new(names),
            heroes: RwLock::new(heroes),
            next_pet_id: AtomicU64::new(next_pet),
            next_hero_id: AtomicU64::new(next_hero),
        })
    }

    pub fn engine(&self) -> &ActionEngine {
        &self.engine
    }

    /// Copy of every record exactly as stored (no clock advance)
    pub async fn snapshot(&self) -> StoreSnapshot {
        let mut pets = Vec::new();
        for (_, handle) in self.sorted_handles().await {
            pets.push(handle.lock().await.clone());
        }
        StoreSnapshot {
            heroes: self.heroes().await,
            pets,
        }
    }

    // === HEROES ===

    pub async fn add_hero(&self, new: NewHero) -> Result<Hero> {
        new.validate()?;
        let id = HeroId(self.next_hero_id.fetch_add(1, Ordering::SeqCst));
        let hero = new.into_hero(id);
        self.heroes.write().await.insert(id, hero.clone());
        tracing::info!(hero = %id, alias = %hero.alias, "hero registered");
        Ok(hero)
    }

    pub async fn hero(&self, id: HeroId) -> Result<Hero> {
        self.heroes
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(PetError::HeroNotFound(id))
    }

    pub async fn heroes(&self) -> Vec<Hero> {
        let mut heroes: Vec<Hero> = self.heroes.read().await.values().cloned().collect();
        heroes.sort_by_key(|hero| hero.id);
        heroes
    }

    /// Change a hero's details; ownership of pets is unaffected
    pub async fn update_hero(&self, id: HeroId, update: HeroUpdate) -> Result<Hero> {
        update.validate()?;
        let mut heroes = self.heroes.write().await;
        let hero = heroes.get_mut(&id).ok_or(PetError::HeroNotFound(id))?;
        update.apply_to(hero);
        tracing::info!(hero = %id, alias = %hero.alias, "hero updated");
        Ok(hero.clone())
    }

    /// Remove a hero and release every pet it had adopted
    pub async fn delete_hero(&self, id: HeroId) -> Result<Hero> {
        let hero = self
            .heroes
            .write()
            .await
            .remove(&id)
            .ok_or(PetError::HeroNotFound(id))?;

        // Adoption checks the hero under the pet lock, so no pet can be
        // adopted by `id` once this scan has passed it.
        let mut released = 0;
        for (pet_id, handle) in self.sorted_handles().await {
            let mut pet = handle.lock().await;
            if pet.adopted_by == Some(id) {
                pet.adopted_by = None;
                log_events(pet_id, &[PetEvent::Released { hero: id }]);
                released += 1;
            }
        }

        tracing::info!(hero = %id, alias = %hero.alias, released, "hero deleted");
        Ok(hero)
    }

    /// Heroes whose city matches `city`, ignoring case
    pub async fn heroes_in_city(&self, city: &str) -> Vec<Hero> {
        let mut heroes: Vec<Hero> = self
            .heroes
            .read()
            .await
            .values()
            .filter(|hero| hero.is_in_city(city))
            .cloned()
            .collect();
        heroes.sort_by_key(|hero| hero.id);
        heroes
    }

    /// Pets adopted by one hero, brought current
    pub async fn hero_pets(&self, id: HeroId) -> Result<Vec<Pet>> {
        self.hero(id).await?;
        Ok(self
            .pets()
            .await
            .into_iter()
            .filter(|pet| pet.adopted_by == Some(id))
            .collect())
    }

    /// Heroes that have adopted at least one pet, with those pets brought current
    pub async fn heroes_with_pets(&self) -> Vec<(Hero, Vec<Pet>)> {
        let pets = self.pets().await;
        self.heroes()
            .await
            .into_iter()
            .filter_map(|hero| {
                let adopted: Vec<Pet> = pets
                    .iter()
                    .filter(|pet| pet.adopted_by == Some(hero.id))
                    .cloned()
                    .collect();
                (!adopted.is_empty()).then_some((hero, adopted))
            })
            .collect()
    }

    // === PETS ===

    pub async fn create_pet(&self, new: NewPet) -> Result<Pet> {
        new.validate()?;
        let name = new.name.trim().to_string();

        let mut names = self.names.lock().await;
        if names.contains_key(&name) {
            return Err(PetError::Validation(format!(
                "a pet named '{}' already exists",
                name
            )));
        }
        let id = PetId(self.next_pet_id.fetch_add(1, Ordering::SeqCst));
        let pet = Pet::new(id, name.clone(), new.species.trim().to_string(), self.time.now());
        names.insert(name, id);
        self.pets
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(pet.clone())));

        tracing::info!(pet = %id, name = %pet.name, species = %pet.species, "pet created");
        Ok(pet)
    }

    /// Read a pet, folding in any decay since it was last stored
    pub async fn pet(&self, id: PetId) -> Result<Pet> {
        let handle = self.handle(id).await?;
        let mut pet = handle.lock().await;
        let report = self.engine.clock().advance(&mut pet, self.time.now());
        log_events(id, &report.events);
        Ok(pet.clone())
    }

    /// Every pet, brought current, ordered by id
    pub async fn pets(&self) -> Vec<Pet> {
        let mut pets = Vec::new();
        for (id, handle) in self.sorted_handles().await {
            let mut pet = handle.lock().await;
            let report = self.engine.clock().advance(&mut pet, self.time.now());
            log_events(id, &report.events);
            pets.push(pet.clone());
        }
        pets
    }

    /// Change a pet's name or species
    pub async fn update_pet(&self, id: PetId, update: PetUpdate) -> Result<Pet> {
        update.validate()?;
        let handle = self.handle(id).await?;
        let mut pet = handle.lock().await;

        if let Some(new_name) = update.name.as_deref().map(str::trim) {
            if new_name != pet.name {
                let mut names = self.names.lock().await;
                if names.contains_key(new_name) {
                    return Err(PetError::Validation(format!(
                        "a pet named '{}' already exists",
                        new_name
                    )));
                }
                names.remove(&pet.name);
                names.insert(new_name.to_string(), id);
            }
        }
        update.apply_to(&mut pet);

        let report = self.engine.clock().advance(&mut pet, self.time.now());
        log_events(id, &report.events);
        tracing::info!(pet = %id, name = %pet.name, species = %pet.species, "pet updated");
        Ok(pet.clone())
    }

    /// Remove a pet, returning its last stored record
    pub async fn delete_pet(&self, id: PetId) -> Result<Pet> {
        let handle = self
            .pets
            .write()
            .await
            .remove(&id)
            .ok_or(PetError::PetNotFound(id))?;
        let pet = handle.lock().await.clone();
        self.names.lock().await.remove(&pet.name);
        tracing::info!(pet = %id, name = %pet.name, "pet deleted");
        Ok(pet)
    }

    pub async fn adopt(&self, pet_id: PetId, hero_id: HeroId) -> Result<ActionOutcome> {
        self.act(pet_id, PetAction::Adopt { hero: hero_id }).await
    }

    /// Hand a pet back: only its current owner may release it
    ///
    /// Elapsed decay is folded in first; the partial step stays on the clock.
    pub async fn unadopt(&self, pet_id: PetId, hero_id: HeroId) -> Result<Pet> {
        let handle = self.handle(pet_id).await?;
        let mut pet = handle.lock().await;
        self.hero(hero_id).await?;

        match pet.adopted_by {
            None => return Err(PetError::NotAdopted(pet_id)),
            Some(owner) if owner != hero_id => {
                return Err(PetError::NotOwner {
                    pet: pet_id,
                    hero: hero_id,
                })
            }
            Some(_) => {}
        }

        let mut events = self.engine.clock().advance(&mut pet, self.time.now()).events;
        pet.adopted_by = None;
        events.push(PetEvent::Released { hero: hero_id });
        log_events(pet_id, &events);
        Ok(pet.clone())
    }

    /// Run one action against a stored pet and keep the result
    ///
    /// On error nothing is written back.
    pub async fn act(&self, id: PetId, action: PetAction) -> Result<ActionOutcome> {
        let handle = self.handle(id).await?;
        let mut pet = handle.lock().await;
        if let PetAction::Adopt { hero } = &action {
            self.hero(*hero).await?;
        }

        let outcome = match self.engine.perform(&pet, &action, self.time.now()) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(pet = %id, action = %action.kind(), error = %err, "action refused");
                return Err(err);
            }
        };
        *pet = outcome.pet.clone();

        log_events(id, &outcome.events);
        tracing::info!(pet = %id, action = %outcome.kind, "action applied");
        Ok(outcome)
    }

    async fn handle(&self, id: PetId) -> Result<PetHandle> {
        self.pets
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(PetError::PetNotFound(id))
    }

    async fn sorted_handles(&self) -> Vec<(PetId, PetHandle)> {
        let mut handles: Vec<(PetId, PetHandle)> = self
            .pets
            .read()
            .await
            .iter()
            .map(|(id, handle)| (*id, Arc::clone(handle)))
            .collect();
        handles.sort_by_key(|(id, _)| *id);
        handles
    }
}

/// One past the highest id in use
fn next_id(ids: impl Iterator<Item = u64>, what: &str) -> Result<u64> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| PetError::Validation(format!("no {} ids left after u64::MAX", what)))
}

fn log_events(pet: PetId, events: &[PetEvent]) {
    for event in events {
        match event {
            PetEvent::Died => tracing::warn!(pet = %pet, "pet died"),
            PetEvent::BecameSick => tracing::info!(pet = %pet, "pet fell sick"),
            PetEvent::Recovered => tracing::info!(pet = %pet, "pet recovered"),
            PetEvent::Revived => tracing::info!(pet = %pet, "pet revived"),
            PetEvent::Adopted { hero } => tracing::info!(pet = %pet, hero = %hero, "pet adopted"),
            PetEvent::Released { hero } => tracing::info!(pet = %pet, hero = %hero, "pet released"),
            other => tracing::debug!(pet = %pet, event = ?other, "vitals event"),
        }
    }
}
