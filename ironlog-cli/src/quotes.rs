use rand::seq::SliceRandom;

const QUOTES: &[&str] = &[
    "Push yourself because no one else is going to do it for you.",
    "The body achieves what the mind believes.",
    "Strength does not come from the body, it comes from the will.",
    "Sweat is fat crying.",
    "The last rep counts double.",
    "Show up. The rest follows.",
];

pub fn random_quote() -> &'static str {
    QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUOTES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_comes_from_the_pool() {
        let quote = random_quote();
        assert!(QUOTES.contains(&quote));
    }
}
