//! Petkeeper - Entry Point
//!
//! Interactive driver for the pet store. Loads an optional config and
//! snapshot, then reads commands from stdin until `quit`. Vitals decay in
//! real time between commands.

use petkeeper::actions::{ActionOutcome, PetAction};
use petkeeper::core::config::VitalsConfig;
use petkeeper::core::error::{PetError, Result};
use petkeeper::core::time::SystemTimeSource;
use petkeeper::core::types::{HeroId, PetId};
use petkeeper::entity::{Hero, HeroUpdate, NewHero, NewPet, Pet, PetUpdate};
use petkeeper::simulation::PetEvent;
use petkeeper::store::{persistence, PetStore};

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Petkeeper - look after virtual pets whose vitals decay in real time
#[derive(Parser, Debug)]
#[command(name = "petkeeper")]
struct Args {
    /// Vitals configuration (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON snapshot to load at start and write on `save`/`quit`
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Disable slow health recovery for well-fed, clean pets
    #[arg(long)]
    no_auto_recovery: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("petkeeper=info")),
        )
        .init();

    let args = Args::parse();
    let vitals_config = vitals_config(&args)?;

    tracing::info!(
        auto_recovery = vitals_config.enable_auto_recovery,
        step_seconds = vitals_config.step_seconds,
        "Petkeeper starting..."
    );

    let rt = Runtime::new()?;

    let store = match &args.snapshot {
        Some(path) if path.exists() => {
            let snapshot = persistence::load(path)?;
            PetStore::from_snapshot(snapshot, vitals_config, SystemTimeSource)?
        }
        _ => PetStore::new(vitals_config),
    };

    print_help();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some((&command, rest)) = words.split_first() else {
            continue;
        };

        if command == "quit" || command == "q" {
            break;
        }
        if command == "help" || command == "h" {
            print_help();
            continue;
        }

        if let Err(e) = rt.block_on(run_command(&store, command, rest, args.snapshot.as_ref())) {
            println!("Command failed: {}", e);
        }
    }

    if let Some(path) = &args.snapshot {
        persistence::save(path, &rt.block_on(store.snapshot()))?;
        tracing::info!(path = %path.display(), "snapshot saved");
    }

    Ok(())
}

/// The config file (or defaults) with command-line overrides applied
fn vitals_config(args: &Args) -> Result<VitalsConfig> {
    let config = match &args.config {
        Some(path) => VitalsConfig::load(path)?,
        None => VitalsConfig::default(),
    };
    if args.no_auto_recovery {
        return Ok(config.with_auto_recovery(false));
    }
    Ok(config)
}

async fn run_command(
    store: &PetStore,
    command: &str,
    rest: &[&str],
    snapshot: Option<&PathBuf>,
) -> Result<()> {
    match command {
        "hero" => {
            let [name, alias, ..] = rest else {
                return usage("hero <name> <alias>");
            };
            let hero = store.add_hero(NewHero::new(*name, *alias)).await?;
            println!("Registered {} ({}) as hero {}", hero.name, hero.alias, hero.id);
        }
        "heroes" => {
            let pets = store.pets().await;
            for line in hero_roster(&store.heroes().await, &pets) {
                println!("{}", line);
            }
        }
        "hero-pets" => {
            for pet in store.hero_pets(hero_arg(rest, 0)?).await? {
                print_pet(&pet);
            }
        }
        "city" => {
            if rest.is_empty() {
                return usage("city <name>");
            }
            for hero in store.heroes_in_city(&rest.join(" ")).await {
                println!("  {} {} ({})", hero.id, hero.name, hero.alias);
            }
        }
        "hero-set" => {
            let [_, field, value @ ..] = rest else {
                return usage("hero-set <hero> <name|alias|city|team> <value>");
            };
            let value = Some(value.join(" "));
            let update = match *field {
                "name" => HeroUpdate { name: value, ..HeroUpdate::default() },
                "alias" => HeroUpdate { alias: value, ..HeroUpdate::default() },
                "city" => HeroUpdate { city: value, ..HeroUpdate::default() },
                "team" => HeroUpdate { team: value, ..HeroUpdate::default() },
                _ => return usage("hero-set <hero> <name|alias|city|team> <value>"),
            };
            let hero = store.update_hero(hero_arg(rest, 0)?, update).await?;
            println!("Updated hero {} ({})", hero.id, hero.alias);
        }
        "hero-delete" => {
            let hero = store.delete_hero(hero_arg(rest, 0)?).await?;
            println!("Deleted hero {} ({}); their pets are up for adoption", hero.id, hero.alias);
        }
        "new" => {
            let [name, species, ..] = rest else {
                return usage("new <name> <species>");
            };
            let pet = store.create_pet(NewPet::new(*name, *species)).await?;
            println!("Created {} the {} ({})", pet.name, pet.species, pet.id);
        }
        "list" | "l" => {
            for pet in store.pets().await {
                print_pet(&pet);
            }
        }
        "show" | "s" => {
            let pet = store.pet(pet_arg(rest)?).await?;
            print_pet(&pet);
            for outfit in &pet.outfits {
                println!("    wearing {} ({})", outfit.name, outfit.kind);
            }
        }
        "adopt" => {
            let hero = hero_arg(rest, 1)?;
            report(store.adopt(pet_arg(rest)?, hero).await?);
        }
        "release" => {
            let hero = hero_arg(rest, 1)?;
            let pet = store.unadopt(pet_arg(rest)?, hero).await?;
            println!("Hero {} released {}", hero, pet.name);
            print_pet(&pet);
        }
        "feed" => {
            let action = match rest.get(1) {
                Some(amount) => PetAction::Feed {
                    amount: amount
                        .parse()
                        .map_err(|_| PetError::Validation(format!("bad amount '{}'", amount)))?,
                },
                None => PetAction::feed(),
            };
            report(store.act(pet_arg(rest)?, action).await?);
        }
        "bathe" => report(store.act(pet_arg(rest)?, PetAction::Bathe).await?),
        "walk" => report(store.act(pet_arg(rest)?, PetAction::Walk).await?),
        "dress" => {
            let [_, name, kind, ..] = rest else {
                return usage("dress <pet> <outfit> <free|paid>");
            };
            report(store.act(pet_arg(rest)?, PetAction::dress(*name, *kind)).await?);
        }
        "cure" => report(store.act(pet_arg(rest)?, PetAction::Cure).await?),
        "potion" => report(store.act(pet_arg(rest)?, PetAction::HealthPotion).await?),
        "revive" => report(store.act(pet_arg(rest)?, PetAction::Revive).await?),
        "rename" => {
            let [_, name, ..] = rest else {
                return usage("rename <pet> <name>");
            };
            let update = PetUpdate {
                name: Some(name.to_string()),
                species: None,
            };
            let pet = store.update_pet(pet_arg(rest)?, update).await?;
            println!("{} is now called {}", pet.id, pet.name);
        }
        "delete" => {
            let pet = store.delete_pet(pet_arg(rest)?).await?;
            println!("Deleted {} ({})", pet.name, pet.id);
        }
        "save" => match snapshot {
            Some(path) => {
                persistence::save(path, &store.snapshot().await)?;
                println!("Saved to {}", path.display());
            }
            None => println!("No --snapshot path given"),
        },
        _ => println!("Unknown command. Type 'help' for the list."),
    }
    Ok(())
}

/// One line per hero, owners or not, with the pets each has adopted
fn hero_roster(heroes: &[Hero], pets: &[Pet]) -> Vec<String> {
    heroes
        .iter()
        .map(|hero| {
            let names: Vec<&str> = pets
                .iter()
                .filter(|pet| pet.adopted_by == Some(hero.id))
                .map(|pet| pet.name.as_str())
                .collect();
            let names = if names.is_empty() {
                "none".to_string()
            } else {
                names.join(", ")
            };
            format!("  {} {} ({}) - pets: {}", hero.id, hero.name, hero.alias, names)
        })
        .collect()
}

fn pet_arg(rest: &[&str]) -> Result<PetId> {
    rest.first()
        .and_then(|s| s.trim_start_matches('#').parse().ok())
        .map(PetId)
        .ok_or_else(|| PetError::Validation("expected a pet id".into()))
}

fn hero_arg(rest: &[&str], position: usize) -> Result<HeroId> {
    rest.get(position)
        .and_then(|s| s.trim_start_matches('#').parse().ok())
        .map(HeroId)
        .ok_or_else(|| PetError::Validation("expected a hero id".into()))
}

fn usage(text: &str) -> Result<()> {
    println!("Usage: {}", text);
    Ok(())
}

fn report(outcome: ActionOutcome) {
    for event in &outcome.events {
        match event {
            PetEvent::StatChanged {
                stat,
                before,
                after,
                cause,
            } => println!("  {:?}: {} -> {} ({:?})", stat, before, after, cause),
            PetEvent::ClockAdvanced { steps, .. } => println!("  {} decay step(s) elapsed", steps),
            other => println!("  {:?}", other),
        }
    }
    print_pet(&outcome.pet);
}

fn print_pet(pet: &Pet) {
    let status = if pet.dead {
        "dead"
    } else if pet.sick {
        "sick"
    } else {
        "well"
    };
    let owner = pet
        .adopted_by
        .map(|hero| format!("hero {}", hero))
        .unwrap_or_else(|| "unadopted".to_string());
    println!(
        "  {} {} the {} [{}, {}] - Health {}, Happiness {}, Hunger {}, Cleanliness {}",
        pet.id,
        pet.name,
        pet.species,
        status,
        owner,
        pet.vitals.health,
        pet.vitals.happiness,
        pet.vitals.hunger,
        pet.vitals.cleanliness
    );
}

fn print_help() {
    println!("\n=== PETKEEPER ===");
    println!("Vitals decay every few seconds, whether you are watching or not.");
    println!();
    println!("Commands:");
    println!("  hero <name> <alias>           - Register a hero");
    println!("  heroes                        - All heroes and their adopted pets");
    println!("  hero-pets <hero>              - Pets adopted by one hero");
    println!("  city <name>                   - Heroes based in a city");
    println!("  hero-set <hero> <field> <val> - Edit name, alias, city or team");
    println!("  hero-delete <hero>            - Delete a hero, releasing their pets");
    println!("  new <name> <species>          - Create a pet");
    println!("  list / l                      - All pets");
    println!("  show / s <pet>                - One pet in detail");
    println!("  adopt <pet> <hero>            - Hero adopts a pet");
    println!("  release <pet> <hero>          - Owner gives a pet up");
    println!("  feed <pet> [amount]           - Feed (default 20)");
    println!("  bathe | walk | cure | potion | revive <pet>");
    println!("  dress <pet> <outfit> <kind>   - Put on an outfit (free/paid)");
    println!("  rename <pet> <name>           - Rename a pet");
    println!("  delete <pet>                  - Delete a pet");
    println!("  save                          - Write the snapshot");
    println!("  quit / q                      - Exit (saves if --snapshot given)");
    println!();
}
