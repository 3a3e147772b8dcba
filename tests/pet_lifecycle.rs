//! Integration tests for the pet lifecycle
//!
//! These tests drive the engine through full stories:
//! - Decay of a neglected pet down to sickness and death
//! - Care actions keeping a pet alive
//! - Revival and the clock picking up again afterwards

use chrono::{Duration, TimeZone, Utc};
use petkeeper::actions::{ActionEngine, PetAction};
use petkeeper::core::config::VitalsConfig;
use petkeeper::core::error::{ErrorKind, PetError};
use petkeeper::core::types::{HeroId, PetId, Timestamp};
use petkeeper::entity::{Pet, Vitals};
use petkeeper::simulation::PetEvent;

fn origin() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap()
}

fn adopted(engine: &ActionEngine) -> Pet {
    let pet = Pet::new(PetId(1), "Krypto".into(), "dog".into(), origin());
    engine
        .perform(&pet, &PetAction::Adopt { hero: HeroId(1) }, origin())
        .unwrap()
        .pet
}

#[test]
fn test_neglect_sickness_death_and_revival() {
    let engine = ActionEngine::default();
    let mut pet = adopted(&engine);
    let mut now = origin();
    let mut saw_sick = false;

    // Read the pet every minute without caring for it
    for _ in 0..60 {
        now += Duration::minutes(1);
        engine.clock().advance(&mut pet, now);
        saw_sick |= pet.sick;
        if pet.dead {
            break;
        }
    }

    assert!(saw_sick, "pet should fall sick before dying");
    assert!(pet.dead, "an hour of neglect should be fatal");
    assert_eq!(
        pet.vitals,
        Vitals {
            health: 0,
            happiness: 0,
            hunger: 100,
            cleanliness: 0
        }
    );

    // Dead pets refuse care
    let err = engine.perform(&pet, &PetAction::feed(), now).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PetIsDead);

    let revived = engine.perform(&pet, &PetAction::Revive, now).unwrap();
    assert!(revived.events.contains(&PetEvent::Revived));
    let mut pet = revived.pet;
    assert_eq!(pet.vitals, Vitals::default());
    assert_eq!(pet.last_state_time, now);

    // Time runs again after revival
    engine.clock().advance(&mut pet, now + Duration::seconds(30));
    assert_eq!(pet.vitals.hunger, 60);
}

#[test]
fn test_regular_care_keeps_pet_healthy() {
    let engine = ActionEngine::default();
    let mut pet = adopted(&engine);
    let mut now = origin();

    for _ in 0..20 {
        now += Duration::minutes(1);
        // a minute of decay adds 20 hunger and the walk 10 more
        pet = engine
            .perform(&pet, &PetAction::Feed { amount: 30 }, now)
            .unwrap()
            .pet;
        pet = engine.perform(&pet, &PetAction::Bathe, now).unwrap().pet;
        pet = engine.perform(&pet, &PetAction::Walk, now).unwrap().pet;
    }

    assert!(!pet.dead);
    assert!(!pet.sick);
    assert!(pet.vitals.health >= 90, "health was {}", pet.vitals.health);
}

#[test]
fn test_cure_on_healthy_pet_changes_nothing() {
    let engine = ActionEngine::default();
    let pet = adopted(&engine);
    let snapshot = pet.clone();

    let err = engine
        .perform(&pet, &PetAction::Cure, origin() + Duration::seconds(10))
        .unwrap_err();

    assert!(matches!(err, PetError::NotSick(PetId(1))));
    assert_eq!(pet, snapshot);
}

#[test]
fn test_sick_pet_cured_by_potion() {
    let engine = ActionEngine::default();
    let mut pet = adopted(&engine);
    pet.vitals.health = 12;

    let outcome = engine
        .perform(&pet, &PetAction::HealthPotion, origin())
        .unwrap();

    assert_eq!(outcome.pet.vitals.health, 100);
    assert!(!outcome.pet.sick);
}

#[test]
fn test_recovery_policy_is_a_toggle() {
    let mut base = Pet::new(PetId(1), "Streaky".into(), "cat".into(), origin());
    base.adopted_by = Some(HeroId(1));
    base.vitals = Vitals {
        health: 40,
        happiness: 100,
        hunger: 0,
        cleanliness: 100,
    };
    let later = origin() + Duration::seconds(30);

    let with = ActionEngine::new(VitalsConfig::default());
    let without = ActionEngine::new(VitalsConfig::default().with_auto_recovery(false));

    let healed = with.perform(&base, &PetAction::Walk, later).unwrap().pet;
    let flat = without.perform(&base, &PetAction::Walk, later).unwrap().pet;

    // one recovery step (+4) then the walk (+5)
    assert_eq!(healed.vitals.health, 49);
    assert_eq!(flat.vitals.health, 45);
}

#[test]
fn test_outfits_survive_other_actions() {
    let engine = ActionEngine::default();
    let mut pet = adopted(&engine);

    pet = engine
        .perform(&pet, &PetAction::dress("Cape", "paid"), origin())
        .unwrap()
        .pet;
    pet = engine.perform(&pet, &PetAction::Bathe, origin()).unwrap().pet;
    pet = engine
        .perform(&pet, &PetAction::dress("Collar", "free"), origin())
        .unwrap()
        .pet;

    assert_eq!(pet.outfits.len(), 2);
    assert_eq!(pet.outfits[0].name, "Cape");
    assert_eq!(pet.outfits[1].name, "Collar");
}
