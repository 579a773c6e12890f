use crate::{Recipe, RecipeStore};

mod model;

pub(crate) use model::parse_number;
pub use model::{parse_minutes, to_summary, RecipeSummary};

/// Summaries of every recipe, in store order.
pub fn list_all(store: &RecipeStore) -> Vec<RecipeSummary> {
    store.recipes().iter().map(to_summary).collect()
}

/// Summaries of recipes whose title, description or any ingredient
/// contains `term`, ignoring case.
///
/// A blank term returns the same list as [`list_all`]. Results keep store
/// order; there is no ranking.
pub fn search(store: &RecipeStore, term: &str) -> Vec<RecipeSummary> {
    let term = term.trim();
    if term.is_empty() {
        return list_all(store);
    }

    let term_lower = term.to_lowercase();
    let results: Vec<RecipeSummary> = store
        .recipes()
        .iter()
        .filter(|recipe| matches_term(recipe, &term_lower))
        .map(to_summary)
        .collect();
    log::debug!("Search for {:?} matched {} recipe(s)", term, results.len());
    results
}

/// Checks a recipe against an already lower-cased term.
fn matches_term(recipe: &Recipe, term_lower: &str) -> bool {
    recipe.title.to_lowercase().contains(term_lower)
        || recipe.description.to_lowercase().contains(term_lower)
        || recipe
            .ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase().contains(term_lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn setup_test_store() -> RecipeStore {
        RecipeStore::from_json_str(indoc! {r#"
            [
                {
                    "title": "Kacchi Biryani",
                    "description": "Slow-cooked mutton with rice",
                    "ingredients": ["Mutton", "Basmati rice", "Yogurt"],
                    "instructions": ["Marinate 30 minutes", "Cook", "Serve"]
                },
                {
                    "title": "Morog Polao",
                    "description": "Chicken pilaf",
                    "ingredients": ["Chicken", "Polao rice"],
                    "instructions": [{"step": 1, "description": "Cook", "time_needed": "২০ মিনিট"}]
                },
                {
                    "title": "ইলিশ ভাপা",
                    "description": "সরিষা দিয়ে ভাপানো ইলিশ",
                    "ingredients": ["ইলিশ মাছ", "সরিষা বাটা"],
                    "instructions": ["ভাপান"]
                }
            ]"#})
        .unwrap()
    }

    fn names(results: &[RecipeSummary]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_list_all_preserves_order() {
        let store = setup_test_store();
        let all = list_all(&store);
        assert_eq!(
            names(&all),
            vec!["Kacchi Biryani", "Morog Polao", "ইলিশ ভাপা"]
        );
        assert_eq!(all[1].total_time_minutes, 20);
    }

    #[test]
    fn test_blank_search_equals_list_all() {
        let store = setup_test_store();
        assert_eq!(search(&store, ""), list_all(&store));
        assert_eq!(search(&store, "   "), list_all(&store));
    }

    #[test]
    fn test_search_title_match_ignores_case() {
        let store = setup_test_store();
        assert_eq!(names(&search(&store, "kACCHI")), vec!["Kacchi Biryani"]);
    }

    #[test]
    fn test_search_description_match() {
        let store = setup_test_store();
        assert_eq!(names(&search(&store, "pilaf")), vec!["Morog Polao"]);
    }

    #[test]
    fn test_search_ingredient_match() {
        let store = setup_test_store();
        assert_eq!(
            names(&search(&store, "rice")),
            vec!["Kacchi Biryani", "Morog Polao"]
        );
        assert_eq!(names(&search(&store, "সরিষা")), vec!["ইলিশ ভাপা"]);
    }

    #[test]
    fn test_search_no_matches() {
        let store = setup_test_store();
        assert!(search(&store, "nonexistent").is_empty());
    }

    #[test]
    fn test_search_results_are_subset_of_list_all() {
        let store = setup_test_store();
        let all = list_all(&store);
        for term in ["a", "rice", "ইলিশ", "cook", "zzz"] {
            for hit in search(&store, term) {
                assert!(all.contains(&hit));
                let recipe = store.get(&hit.id).unwrap();
                assert!(matches_term(recipe, &term.to_lowercase()));
            }
        }
    }
}
