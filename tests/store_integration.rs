//! Integration tests for the pet store
//!
//! These tests verify the store as the engine's caller:
//! - Lazy decay on read, persisted between reads
//! - Adoption against registered heroes
//! - Failed actions leave the stored record untouched
//! - Concurrent actions on one pet are serialized
//! - Hero management: release, per-hero pets, city search, edit, delete

use chrono::{Duration, TimeZone, Utc};
use petkeeper::actions::PetAction;
use petkeeper::core::config::VitalsConfig;
use petkeeper::core::error::{ErrorKind, PetError};
use petkeeper::core::time::ManualTimeSource;
use petkeeper::core::types::{HeroId, PetId};
use petkeeper::entity::{HeroUpdate, NewHero, NewPet, PetUpdate};
use petkeeper::store::{persistence, PetStore};
use std::sync::Arc;

fn setup() -> (PetStore<ManualTimeSource>, ManualTimeSource) {
    let start = Utc.with_ymd_and_hms(2024, 7, 4, 12, 0, 0).unwrap();
    let time = ManualTimeSource::new(start);
    let store = PetStore::with_time_source(VitalsConfig::default(), time.clone());
    (store, time)
}

#[tokio::test]
async fn test_read_applies_and_keeps_decay() {
    let (store, time) = setup();
    let pet = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();

    time.advance(Duration::seconds(90));
    let read = store.pet(pet.id).await.unwrap();
    assert_eq!(read.vitals.hunger, 80);
    assert_eq!(read.vitals.happiness, 82);
    assert_eq!(read.vitals.cleanliness, 82);
    // hunger 80 is past the starving line for all three steps
    assert_eq!(read.vitals.health, 70);

    // Reading again at the same instant changes nothing
    let again = store.pet(pet.id).await.unwrap();
    assert_eq!(again, read);
}

#[tokio::test]
async fn test_adoption_requires_existing_hero() {
    let (store, _) = setup();
    let pet = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();

    let err = store.adopt(pet.id, HeroId(42)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let hero = store.add_hero(NewHero::new("Bruce", "Batman")).await.unwrap();
    let outcome = store.adopt(pet.id, hero.id).await.unwrap();
    assert_eq!(outcome.pet.adopted_by, Some(hero.id));

    let other = store.add_hero(NewHero::new("Clark", "Superman")).await.unwrap();
    let err = store.adopt(pet.id, other.id).await.unwrap_err();
    assert!(matches!(err, PetError::AlreadyAdopted { .. }));
}

#[tokio::test]
async fn test_actions_need_adoption() {
    let (store, _) = setup();
    let pet = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();

    let err = store.act(pet.id, PetAction::Walk).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAdopted);
}

#[tokio::test]
async fn test_unknown_pet_is_not_found() {
    let (store, _) = setup();
    let err = store.pet(PetId(99)).await.unwrap_err();
    assert!(matches!(err, PetError::PetNotFound(PetId(99))));
    let err = store.act(PetId(99), PetAction::Bathe).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_refused_action_leaves_record_untouched() {
    let (store, _) = setup();
    let hero = store.add_hero(NewHero::new("Bruce", "Batman")).await.unwrap();
    let pet = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();
    store.adopt(pet.id, hero.id).await.unwrap();
    let before = store.snapshot().await;

    let err = store.act(pet.id, PetAction::Cure).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotSick);
    let err = store
        .act(pet.id, PetAction::dress("", "paid"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOutfit);

    assert_eq!(store.snapshot().await, before);
}

#[tokio::test]
async fn test_feed_scenario() {
    let (store, time) = setup();
    let hero = store.add_hero(NewHero::new("Bruce", "Batman")).await.unwrap();
    let pet = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();
    store.adopt(pet.id, hero.id).await.unwrap();
    store.act(pet.id, PetAction::Feed { amount: 10 }).await.unwrap();
    time.advance(Duration::seconds(5));

    let outcome = store.act(pet.id, PetAction::feed()).await.unwrap();

    assert_eq!(outcome.pet.vitals.hunger, 20);
    assert_eq!(outcome.pet.vitals.happiness, 100);
    assert_eq!(outcome.pet.vitals.health, 100);
    assert_eq!(store.pet(pet.id).await.unwrap(), outcome.pet);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_actions_are_serialized() {
    let (store, _) = setup();
    let store = Arc::new(store);
    let hero = store.add_hero(NewHero::new("Bruce", "Batman")).await.unwrap();
    let pet = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();
    store.adopt(pet.id, hero.id).await.unwrap();
    let pet_id = pet.id;

    let mut tasks = Vec::new();
    for i in 0..16 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            store
                .act(pet_id, PetAction::dress(format!("Scarf {}", i), "free"))
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let pet = store.pet(pet_id).await.unwrap();
    assert_eq!(pet.outfits.len(), 16, "no dress action may be lost");
}

#[tokio::test]
async fn test_heroes_with_pets_lists_only_owners() {
    let (store, _) = setup();
    let bruce = store.add_hero(NewHero::new("Bruce", "Batman")).await.unwrap();
    store.add_hero(NewHero::new("Clark", "Superman")).await.unwrap();
    let ace = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();
    store.create_pet(NewPet::new("Krypto", "dog")).await.unwrap();
    store.adopt(ace.id, bruce.id).await.unwrap();

    let owners = store.heroes_with_pets().await;

    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].0.alias, "Batman");
    assert_eq!(owners[0].1.len(), 1);
    assert_eq!(owners[0].1[0].name, "Ace");
}

#[tokio::test]
async fn test_update_and_delete() {
    let (store, _) = setup();
    let pet = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();

    let updated = store
        .update_pet(
            pet.id,
            PetUpdate {
                name: None,
                species: Some("wolf".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.species, "wolf");

    let deleted = store.delete_pet(pet.id).await.unwrap();
    assert_eq!(deleted.name, "Ace");
    assert!(store.pets().await.is_empty());
    let err = store.delete_pet(pet.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_snapshot_file_round_trip_keeps_decay_clock() {
    let (store, time) = setup();
    let pet = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();
    time.advance(Duration::seconds(45));
    store.pet(pet.id).await.unwrap();

    let path = std::env::temp_dir().join(format!("petkeeper-store-{}.json", std::process::id()));
    persistence::save(&path, &store.snapshot().await).unwrap();
    let loaded = persistence::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let restored = PetStore::from_snapshot(loaded, VitalsConfig::default(), time.clone()).unwrap();
    time.advance(Duration::seconds(15));

    // 45s + 15s = two steps in total, across the save
    let pet = restored.pet(pet.id).await.unwrap();
    assert_eq!(pet.vitals.hunger, 70);
}

#[tokio::test]
async fn test_week_of_neglect_is_fatal() {
    let (store, time) = setup();
    let hero = store.add_hero(NewHero::new("Bruce", "Batman")).await.unwrap();
    let pet = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();
    store.adopt(pet.id, hero.id).await.unwrap();

    time.advance(Duration::days(7));
    let err = store.act(pet.id, PetAction::Walk).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PetIsDead);
    let read = store.pet(pet.id).await.unwrap();
    assert!(read.dead);
    assert_eq!(read.vitals.health, 0);
}

#[tokio::test]
async fn test_only_the_owner_can_release() {
    let (store, _) = setup();
    let bruce = store.add_hero(NewHero::new("Bruce", "Batman")).await.unwrap();
    let clark = store.add_hero(NewHero::new("Clark", "Superman")).await.unwrap();
    let pet = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();

    let err = store.unadopt(pet.id, bruce.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAdopted);

    store.adopt(pet.id, bruce.id).await.unwrap();
    let err = store.unadopt(pet.id, clark.id).await.unwrap_err();
    assert!(matches!(err, PetError::NotOwner { .. }));
    assert_eq!(store.pet(pet.id).await.unwrap().adopted_by, Some(bruce.id));

    let released = store.unadopt(pet.id, bruce.id).await.unwrap();
    assert_eq!(released.adopted_by, None);

    // free to be adopted again, by anyone
    let outcome = store.adopt(pet.id, clark.id).await.unwrap();
    assert_eq!(outcome.pet.adopted_by, Some(clark.id));
}

#[tokio::test]
async fn test_release_keeps_the_decay_clock() {
    let (store, time) = setup();
    let hero = store.add_hero(NewHero::new("Bruce", "Batman")).await.unwrap();
    let pet = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();
    store.adopt(pet.id, hero.id).await.unwrap();

    time.advance(Duration::seconds(45));
    let released = store.unadopt(pet.id, hero.id).await.unwrap();
    assert_eq!(released.vitals.hunger, 60);

    // the 15 leftover seconds still count
    time.advance(Duration::seconds(15));
    assert_eq!(store.pet(pet.id).await.unwrap().vitals.hunger, 70);
}

#[tokio::test]
async fn test_hero_pets_and_city_search() {
    let (store, _) = setup();
    let bruce = store
        .add_hero(NewHero {
            city: Some("Gotham".into()),
            ..NewHero::new("Bruce", "Batman")
        })
        .await
        .unwrap();
    let selina = store
        .add_hero(NewHero {
            city: Some("gotham".into()),
            ..NewHero::new("Selina", "Catwoman")
        })
        .await
        .unwrap();
    store
        .add_hero(NewHero {
            city: Some("Gotham Heights".into()),
            ..NewHero::new("Barbara", "Batgirl")
        })
        .await
        .unwrap();
    let ace = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();
    store.create_pet(NewPet::new("Isis", "cat")).await.unwrap();
    store.adopt(ace.id, bruce.id).await.unwrap();

    let pets = store.hero_pets(bruce.id).await.unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].name, "Ace");
    assert!(store.hero_pets(selina.id).await.unwrap().is_empty());
    let err = store.hero_pets(HeroId(99)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let aliases: Vec<String> = store
        .heroes_in_city("GOTHAM")
        .await
        .into_iter()
        .map(|hero| hero.alias)
        .collect();
    assert_eq!(aliases, ["Batman", "Catwoman"]);
}

#[tokio::test]
async fn test_update_and_delete_hero() {
    let (store, _) = setup();
    let bruce = store.add_hero(NewHero::new("Bruce", "Batman")).await.unwrap();
    let ace = store.create_pet(NewPet::new("Ace", "dog")).await.unwrap();
    store.adopt(ace.id, bruce.id).await.unwrap();

    let updated = store
        .update_hero(
            bruce.id,
            HeroUpdate {
                team: Some("Justice League".into()),
                ..HeroUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.team.as_deref(), Some("Justice League"));
    assert_eq!(updated.alias, "Batman");

    let err = store
        .update_hero(HeroId(99), HeroUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    store.delete_hero(bruce.id).await.unwrap();
    assert!(store.heroes().await.is_empty());
    assert_eq!(store.pet(ace.id).await.unwrap().adopted_by, None);
    let err = store.delete_hero(bruce.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
