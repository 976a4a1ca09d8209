//! Plausible-looking field values drawn from small fixed vocabularies.

use chrono::{Datelike, Duration, Months, NaiveDate};
use rand::{seq::SliceRandom, Rng};
use std::ops::RangeInclusive;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Sofia", "Mark", "Emma",
    "Hiroshi", "Aiko", "Mateo", "Lucia", "Ingrid", "Lars", "Priya", "Arjun", "Amara", "Kwame",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore", "Jackson",
    "Martin", "Lee", "Thompson", "White", "Harris", "Clark", "Lewis", "Walker", "Young", "Allen",
    "Tanaka", "Rossi", "Novak", "Larsen", "Okafor", "Mensah", "Kapoor", "Dubois", "Schmidt",
];

const COMPANY_WORDS: &[&str] = &[
    "Silver", "Crimson", "Golden", "Northern", "Lion", "Falcon", "Summit", "Harbor", "Pioneer",
    "Eclipse", "Meridian", "Apex", "Blue", "Iron", "Starlight", "Paramount", "Horizon", "Atlas",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Pictures", "Studios", "Films", "Entertainment", "Productions", "Media", "Group", "Inc", "LLC",
];

const CITIES: &[&str] = &[
    "Los Angeles", "New York", "London", "Paris", "Berlin", "Tokyo", "Mumbai", "Toronto",
    "Vancouver", "Sydney", "Rome", "Madrid", "Seoul", "Mexico City", "Lagos", "Atlanta",
    "Wellington", "Prague", "Budapest", "Hong Kong",
];

const COUNTRIES: &[&str] = &[
    "United States", "United Kingdom", "France", "Germany", "Italy", "Spain", "Japan",
    "South Korea", "India", "China", "Canada", "Australia", "Mexico", "Brazil", "Argentina",
    "Nigeria", "Ghana", "Sweden", "Norway", "Denmark", "Poland", "Czech Republic", "New Zealand",
];

const WORDS: &[&str] = &[
    "shadow", "night", "return", "city", "last", "dream", "storm", "heart", "river", "empire",
    "silent", "broken", "edge", "fire", "lost", "secret", "legacy", "hunter", "garden", "echo",
    "winter", "light", "road", "stranger", "kingdom", "memory", "signal", "glass", "ocean", "dawn",
    "great", "story", "acting", "plot", "ending", "score", "pacing", "visual", "cast", "moment",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

pub fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

pub fn company<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {}",
        pick(rng, COMPANY_WORDS),
        pick(rng, COMPANY_SUFFIXES)
    )
}

pub fn city<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, CITIES).to_owned()
}

pub fn country<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, COUNTRIES).to_owned()
}

/// A capitalised sentence of exactly `words` words ending with a period.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    let mut text = (0..words)
        .map(|_| pick(rng, WORDS))
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(first) = text.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    text.push('.');
    text
}

/// A birthdate for someone whose age on `today` lies within `ages`.
pub fn date_of_birth<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    ages: RangeInclusive<u32>,
) -> NaiveDate {
    let youngest = today - Months::new(ages.start() * 12);
    // The day after the oldest allowed person would have turned `end + 1`.
    let oldest = today - Months::new((ages.end() + 1) * 12) + Duration::days(1);
    let span = (youngest - oldest).num_days().max(0);
    oldest + Duration::days(rng.gen_range(0..=span))
}

/// Uniform over `[min, max]`, rounded to one decimal place.
pub fn rating<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    let raw: f64 = rng.gen_range(min..=max);
    (raw * 10.0).round() / 10.0
}

/// Whole years between `born` and `on`.
pub fn age_on(born: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - born.year();
    if (on.month(), on.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn birthdates_respect_age_bounds() {
        let mut rng = rng();
        for today in [
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ] {
            for _ in 0..2_000 {
                let born = date_of_birth(&mut rng, today, 25..=80);
                let age = age_on(born, today);
                assert!((25..=80).contains(&age), "{born} is {age} on {today}");
            }
        }
    }

    #[test]
    fn birthdate_bounds_are_reachable() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let mut rng = rng();
        let ages: Vec<i32> = (0..20_000)
            .map(|_| age_on(date_of_birth(&mut rng, today, 18..=20), today))
            .collect();
        assert!(ages.contains(&18));
        assert!(ages.contains(&20));
    }

    #[test]
    fn ratings_have_one_decimal() {
        let mut rng = rng();
        for _ in 0..5_000 {
            let r = rating(&mut rng, 1.0, 10.0);
            assert!((1.0..=10.0).contains(&r));
            let tenths = r * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-9, "{r}");
        }
    }

    #[test]
    fn sentence_shape() {
        let mut rng = rng();
        let s = sentence(&mut rng, 3);
        assert!(s.ends_with('.'));
        assert_eq!(s.split_whitespace().count(), 3);
        assert!(s.chars().next().unwrap().is_ascii_uppercase());
    }

    #[test]
    fn age_counts_birthdays() {
        let born = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
        assert_eq!(age_on(born, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()), 23);
        assert_eq!(age_on(born, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()), 24);
    }
}
