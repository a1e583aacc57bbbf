use std::{collections::HashMap, sync::LazyLock};

use catalog::content::WeeklyMenu;
use regex::Regex;

static UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[_]").expect("static pattern"));
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9- ]").expect("static pattern"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").expect("static pattern"));

/// Canonical form of a dish name, used to spot the same dish listed twice.
pub fn sanitize(input: &str) -> String {
    let s = UNDERSCORES.replace_all(input, " ");
    let s = PUNCTUATION.replace_all(&s, "");

    SPACES.replace_all(s.trim(), " ").to_lowercase()
}

/// Dish names that collide after sanitizing, in menu order.
pub fn duplicate_dishes(menu: &WeeklyMenu) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for dish in &menu.dishes {
        let key = sanitize(&dish.name);
        let count = counts.entry(key.clone()).or_default();
        *count += 1;

        if *count == 2 {
            duplicates.push(key);
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use catalog::content::{Dish, WeeklyMenu};
    use chrono::NaiveDate;

    use super::{duplicate_dishes, sanitize};

    #[test]
    fn test_basic() {
        assert_eq!(sanitize("Coq_au_Vin"), "coq au vin");
        assert_eq!(sanitize("Pan-Seared Cod"), "pan-seared cod");
        assert_eq!(sanitize("Chef's Special!"), "chefs special");
    }

    #[test]
    fn test_leading_trailing_spaces() {
        assert_eq!(sanitize("   risotto   "), "risotto");
        assert_eq!(sanitize("  short   rib  "), "short rib");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(sanitize("!@#$%^&*()"), "");
        assert_eq!(sanitize("Bowl #2 (v)"), "bowl 2 v");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("     "), "");
    }

    fn dish(name: &str) -> Dish {
        Dish {
            name: name.to_string(),
            description: String::new(),
            price_cents: 1000,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_duplicate_dishes() {
        let menu = WeeklyMenu {
            week_of: NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
            dishes: vec![
                dish("Cacio e Pepe"),
                dish("Short Rib"),
                dish("cacio  e pepe!"),
                dish("Cacio_e_Pepe"),
            ],
        };

        assert_eq!(duplicate_dishes(&menu), vec!["cacio e pepe"]);
    }
}
