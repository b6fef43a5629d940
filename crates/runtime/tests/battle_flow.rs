use std::sync::Arc;

use meal_core::{FixedRandom, LeaderboardSort, MealId, PcgRandom, SequenceRandom};
use meal_runtime::{
    BattleEngine, FileMealRepository, KitchenError, MealRepository, SchemaBootstrap,
};
use tempfile::TempDir;

fn file_store(dir: &TempDir) -> Arc<FileMealRepository> {
    Arc::new(
        FileMealRepository::open(dir.path().join("meals.json"), SchemaBootstrap::default())
            .expect("catalog should open"),
    )
}

/// Full battle session against the file store
///
/// 1. Create three meals
/// 2. Battle them in turn, the winner staying in the ring
/// 3. Reopen the catalog and check the leaderboard
#[test]
fn winner_stays_and_stats_persist() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    // Pasta = 20 * 7 - 2 = 138, Tacos = 8 * 7 - 3 = 53, Sushi = 30 * 8 - 1 = 239
    store.create_meal("Pasta", "Italian", 20.0, "MED").unwrap();
    store.create_meal("Tacos", "Mexican", 8.0, "LOW").unwrap();
    store.create_meal("Sushi", "Japanese", 30.0, "HIGH").unwrap();

    // delta(Pasta, Tacos) = 0.85, delta(Pasta, Sushi) = 1.01 % 1.0 = 0.01
    let rolls = SequenceRandom::new([0.5, 0.5]);
    let mut engine = BattleEngine::new(store.clone(), Box::new(rolls));

    engine.prep_combatant("Pasta").unwrap();
    engine.prep_combatant("Tacos").unwrap();
    assert_eq!(engine.resolve().unwrap(), "Pasta");
    assert_eq!(engine.combatants().len(), 1);

    engine.prep_combatant("Sushi").unwrap();
    assert_eq!(engine.resolve().unwrap(), "Sushi");
    assert_eq!(engine.combatants()[0].name, "Sushi");

    drop(engine);
    drop(store);

    let store = file_store(&dir);
    let pasta = store.get_by_name("Pasta").unwrap();
    assert_eq!((pasta.battles, pasta.wins), (2, 1));

    let board = store.leaderboard(LeaderboardSort::Wins, None).unwrap();
    let names: Vec<&str> = board.iter().map(|e| e.name.as_str()).collect();
    // Pasta and Sushi tie on wins; Sushi has the better ratio
    assert_eq!(names, vec!["Sushi", "Pasta", "Tacos"]);

    let board = store.leaderboard(LeaderboardSort::WinPct, None).unwrap();
    assert_eq!(board[0].name, "Sushi");
    assert_eq!(board[0].win_pct, 1.0);
    assert_eq!(board[1].win_pct, 0.5);
    assert_eq!(board[2].win_pct, 0.0);
}

#[test]
fn seeded_battles_are_reproducible() {
    let run = |seed: u64| -> Vec<String> {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir);
        store.create_meal("Curry", "Indian", 12.0, "MED").unwrap();
        store.create_meal("Ramen", "Japanese", 11.0, "HIGH").unwrap();

        let mut engine = BattleEngine::new(store.clone(), Box::new(PcgRandom::new(seed)));
        (0..20)
            .map(|_| {
                engine.clear();
                engine.prep_combatant("Curry").unwrap();
                engine.prep_combatant("Ramen").unwrap();
                engine.resolve().unwrap()
            })
            .collect()
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn deleted_meal_cannot_be_prepped() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    let id = store.create_meal("Pho", "Vietnamese", 9.0, "MED").unwrap();
    store.delete(id).unwrap();

    let mut engine = BattleEngine::new(store.clone(), Box::new(FixedRandom(0.0)));
    assert!(matches!(
        engine.prep_combatant("Pho"),
        Err(KitchenError::NotFound(_))
    ));

    // name stays reserved after deletion
    assert!(matches!(
        store.create_meal("Pho", "Vietnamese", 9.0, "MED"),
        Err(KitchenError::Duplicate { .. })
    ));
    assert_eq!(
        store.create_meal("Banh Mi", "Vietnamese", 6.0, "LOW").unwrap(),
        MealId(2)
    );
}
