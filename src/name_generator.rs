//! Unique, human-readable item names (`method`, `method2`, `method3`, ...).

use std::{
    borrow::Borrow,
    collections::{HashMap, HashSet},
    hash::Hash,
};

/// Returns `base` when unused, otherwise the first `base{n}` (n >= 2) not in `existing`.
pub fn generate_unique_name<S>(existing: &HashSet<S>, base: &str) -> String
where
    S: Borrow<str> + Hash + Eq,
{
    if !existing.contains(base) {
        return base.to_string();
    }
    format!("{base}{}", first_free_suffix(existing, base, 2))
}

fn first_free_suffix<S>(existing: &HashSet<S>, base: &str, start: u64) -> u64
where
    S: Borrow<str> + Hash + Eq,
{
    (start..)
        .find(|suffix| !existing.contains(format!("{base}{suffix}").as_str()))
        .unwrap_or(start)
}

/// Per-container name generator seeded with the names currently in use.
///
/// Every generated name is recorded as used, so consecutive calls on the same
/// generator never hand out the same name twice. The per-base counter only
/// skips suffixes that were already found taken; it never skips a free one.
#[derive(Debug, Default, Clone)]
pub struct NameGenerator {
    existing: HashSet<String>,
    next_suffix: HashMap<String, u64>,
}

impl NameGenerator {
    pub fn init<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            existing: names.into_iter().map(Into::into).collect(),
            next_suffix: HashMap::new(),
        }
    }

    pub fn gen_item_name(&mut self, base: &str) -> String {
        let name = if self.existing.contains(base) {
            let start = self.next_suffix.get(base).copied().unwrap_or(2);
            let suffix = first_free_suffix(&self.existing, base, start);
            self.next_suffix.insert(base.to_string(), suffix + 1);
            format!("{base}{suffix}")
        } else {
            base.to_string()
        };
        self.existing.insert(name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{generate_unique_name, NameGenerator};

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_empty_set_returns_base_unchanged() {
        assert_eq!(generate_unique_name(&set(&[]), "method"), "method");
        assert_eq!(
            NameGenerator::init(Vec::<String>::new()).gen_item_name("method"),
            "method"
        );
    }

    #[test]
    fn test_collision_appends_first_free_suffix() {
        assert_eq!(generate_unique_name(&set(&["method"]), "method"), "method2");
        assert_eq!(
            generate_unique_name(&set(&["method", "method2", "method4"]), "method"),
            "method3"
        );
    }

    #[test]
    fn test_unused_base_is_returned_even_when_suffixed_names_exist() {
        assert_eq!(
            generate_unique_name(&set(&["method2", "method3"]), "method"),
            "method"
        );
    }

    #[test]
    fn test_result_is_never_in_existing_set() {
        let existing = set(&["a", "a2", "a3", "b", "a5", "a10"]);
        for base in ["a", "b", "c", "a2"] {
            let generated = generate_unique_name(&existing, base);
            assert!(!existing.contains(&generated), "{generated} collides");
        }
    }

    #[test]
    fn test_generator_records_names_it_hands_out() {
        let mut generator = NameGenerator::init(["method"]);
        assert_eq!(generator.gen_item_name("method"), "method2");
        assert_eq!(generator.gen_item_name("method"), "method3");
        assert_eq!(generator.gen_item_name("param"), "param");
        assert_eq!(generator.gen_item_name("param"), "param2");
    }

    #[test]
    fn test_generator_matches_pure_function_for_fresh_seed() {
        let names = ["method", "method2", "method4"];
        let mut generator = NameGenerator::init(names);
        assert_eq!(
            generator.gen_item_name("method"),
            generate_unique_name(&set(&names), "method")
        );
    }
}
