use std::fs;
use std::sync::{mpsc, Once};
use std::time::Duration;

use camino::Utf8PathBuf;
use indoc::indoc;
use recipe_guide::logging;
use recipe_guide::{
    find_by_name, list_all, search, CookingGuide, DatasetFile, Effect, GuideConfig, Locale,
    Phase, RecipeStore, Ticker,
};
use tempfile::TempDir;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(logging::initialize_for_tests);
}

const DATASET: &str = indoc! {r#"
    [
        {
            "title": "কাচ্চি বিরিয়ানি",
            "description": "পুরান ঢাকার বিখ্যাত বিরিয়ানি",
            "ingredients": ["খাসির মাংস", "বাসমতি চাল", "টক দই"],
            "instructions": ["মেরিনেট করুন ৩০ মিনিট", "রান্না করুন", "পরিবেশন করুন"]
        },
        {
            "title": "পায়েস",
            "ingredients": ["দুধ", "চাল", "চিনি"],
            "instructions": [
                {"step": 1, "description": "দুধ জ্বাল দিন ২০ মিনিট", "time_needed": "২০ মিনিট"},
                {"step": 2, "description": "চাল দিন", "time_needed": "১৫ মিনিট"}
            ]
        }
    ]"#};

fn store() -> RecipeStore {
    RecipeStore::from_json_str(DATASET).unwrap()
}

#[test]
fn test_full_walkthrough() {
    init_logging();
    let store = store();
    let mut guide = CookingGuide::new(&store, Locale::Bengali);

    assert!(guide.submit_query("কাচ্চি").is_empty());
    let snapshot = guide.snapshot();
    assert_eq!(snapshot.phase, Phase::Summary);
    assert_eq!(snapshot.recipe.as_ref().unwrap().ingredients.len(), 3);

    let effects = guide.confirm_start();
    let snapshot = guide.snapshot();
    assert_eq!(snapshot.phase, Phase::Cooking);
    assert_eq!(snapshot.step_index, 0);
    assert_eq!(snapshot.timer.unwrap().total_seconds, 1800);
    let generation = snapshot.timer_generation.unwrap();
    assert_eq!(effects, vec![Effect::StartTicking { generation }]);

    assert_eq!(
        guide.advance_step(),
        vec![Effect::StopTicking { generation }]
    );
    assert!(guide.advance_step().is_empty());
    assert_eq!(guide.snapshot().step_index, 2);
    assert!(!guide.snapshot().finish_requested);

    assert_eq!(guide.advance_step(), vec![Effect::ConfirmFinish]);
    let snapshot = guide.snapshot();
    assert_eq!(snapshot.step_index, 2);
    assert!(snapshot.finish_requested);
    assert_eq!(snapshot.progress_percent, 100);

    guide.confirm_finish();
    assert_eq!(guide.snapshot().phase, Phase::Finished);

    guide.reset();
    let snapshot = guide.snapshot();
    assert_eq!(snapshot.phase, Phase::Idle);
    assert!(snapshot.recipe.is_none());
}

#[test]
fn test_declined_finish_keeps_cooking() {
    init_logging();
    let store = store();
    let mut guide = CookingGuide::new(&store, Locale::English);
    guide.submit_query("পায়েস");
    guide.confirm_start();
    guide.advance_step();
    guide.advance_step();

    guide.cancel_finish();
    let snapshot = guide.snapshot();
    assert_eq!(snapshot.phase, Phase::Cooking);
    assert!(!snapshot.finish_requested);
    assert_eq!(snapshot.step_index, 1);

    guide.retreat_step();
    assert_eq!(guide.snapshot().timer.unwrap().total_seconds, 1200);
}

#[test]
fn test_stale_ticks_do_not_leak_across_steps() {
    init_logging();
    let store = store();
    let mut guide = CookingGuide::new(&store, Locale::English);
    guide.submit_query("পায়েস");
    guide.confirm_start();
    let first = guide.snapshot().timer_generation.unwrap();

    guide.advance_step();
    guide.retreat_step();
    let second = guide.snapshot().timer_generation.unwrap();
    assert_ne!(first, second);

    guide.tick(first);
    assert_eq!(guide.snapshot().timer.unwrap().remaining_seconds, 1200);
    guide.tick(second);
    assert_eq!(guide.snapshot().timer.unwrap().remaining_seconds, 1199);
}

#[test]
fn test_ticker_drives_the_timer() {
    init_logging();
    let store = RecipeStore::from_json_str(indoc! {r#"
        [{"title": "Toast", "ingredients": ["Bread"], "instructions": ["Toast 3 seconds"]}]"#})
    .unwrap();
    let mut guide = CookingGuide::new(&store, Locale::English);
    guide.submit_query("toast");

    let generation = match guide.confirm_start().as_slice() {
        [Effect::StartTicking { generation }] => *generation,
        other => panic!("unexpected effects {other:?}"),
    };

    let (tx, rx) = mpsc::channel();
    let mut ticker = Some(Ticker::start(generation, Duration::from_millis(5), tx, |g| g));

    while ticker.is_some() {
        let tick = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        for effect in guide.tick(tick) {
            if effect == (Effect::StopTicking { generation }) {
                ticker = None;
            }
        }
    }

    let timer = guide.snapshot().timer.unwrap();
    assert!(timer.is_expired());
    assert!(!timer.running);
}

#[test]
fn test_lookup_errors_are_localized() {
    init_logging();
    let store = store();

    let mut guide = CookingGuide::new(&store, Locale::English);
    guide.submit_query("pizza");
    assert_eq!(guide.snapshot().phase, Phase::Error);
    assert!(guide
        .snapshot()
        .error_message
        .unwrap()
        .starts_with("Could not find a recipe"));

    let mut guide = CookingGuide::new(&store, Locale::Bengali);
    guide.submit_query("pizza");
    assert!(guide
        .snapshot()
        .error_message
        .unwrap()
        .contains("খুঁজে পাওয়া যায়নি"));
}

#[test]
fn test_catalog_queries() {
    init_logging();
    let store = store();

    let all = list_all(&store);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].total_time_minutes, 0);
    assert_eq!(all[1].total_time_minutes, 35);

    let hits = search(&store, "চাল");
    assert_eq!(hits.len(), 2);
    assert_eq!(search(&store, "ঢাকা").len(), 1);
    assert!(search(&store, "মাছ").is_empty());

    assert!(find_by_name(&store, "পায়েস").is_ok());
}

#[test]
fn test_config_and_dataset_file() {
    init_logging();
    let temp_dir = TempDir::new().unwrap();
    let dataset = temp_dir.path().join("recipes.json");
    fs::write(&dataset, DATASET).unwrap();
    let dataset = Utf8PathBuf::from_path_buf(dataset).unwrap();

    let config_path = temp_dir.path().join("guide.yaml");
    fs::write(
        &config_path,
        format!("dataset: {dataset}\nlocale: english\n"),
    )
    .unwrap();
    let config_path = Utf8PathBuf::from_path_buf(config_path).unwrap();

    let config = GuideConfig::from_path(&config_path).unwrap();
    assert_eq!(config.locale, Locale::English);
    assert_eq!(config.open_store().unwrap().len(), 2);

    let mut guide = CookingGuide::new(DatasetFile(dataset), config.locale);
    guide.submit_query("কাচ্চি");
    assert_eq!(guide.snapshot().phase, Phase::Summary);
}

#[test]
fn test_bundled_dataset_walkthrough() {
    init_logging();
    let store = RecipeStore::bundled().unwrap();
    assert!(!store.is_empty());

    let mut guide = CookingGuide::new(&store, Locale::Bengali);
    guide.submit_query("কাচ্চি বিরিয়ানি");
    guide.confirm_start();
    let step_count = guide.snapshot().step_count;

    for _ in 1..step_count {
        guide.advance_step();
    }
    assert_eq!(guide.snapshot().step_index, step_count - 1);
    guide.advance_step();
    guide.confirm_finish();
    assert_eq!(guide.snapshot().phase, Phase::Finished);
}
