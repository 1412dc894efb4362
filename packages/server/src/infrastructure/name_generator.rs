//! Random "color animal" display names.

use rand::seq::IndexedRandom;

use crate::domain::{DisplayName, NameGenerator};

const COLORS: &[&str] = &[
    "amaranth", "amber", "aquamarine", "azure", "beige", "black", "blue", "bronze", "brown",
    "chocolate", "coffee", "copper", "coral", "crimson", "cyan", "emerald", "gold", "gray",
    "green", "harlequin", "indigo", "ivory", "jade", "lavender", "lime", "magenta", "maroon",
    "moccasin", "olive", "orange", "peach", "pink", "plum", "purple", "red", "rose", "salmon",
    "sapphire", "scarlet", "silver", "tan", "teal", "tomato", "turquoise", "violet", "white",
    "yellow",
];

const ANIMALS: &[&str] = &[
    "aardvark", "albatross", "alpaca", "badger", "bat", "bear", "beaver", "bison", "camel",
    "cat", "cheetah", "crab", "crane", "crow", "deer", "dolphin", "eagle", "eel", "falcon",
    "ferret", "fox", "gazelle", "gecko", "giraffe", "gorilla", "hamster", "hedgehog", "heron",
    "jaguar", "koala", "lemur", "leopard", "lynx", "meerkat", "mole", "moose", "otter", "owl",
    "panda", "parrot", "penguin", "puffin", "rabbit", "raccoon", "salmon", "seal", "sloth",
    "squirrel", "swan", "tiger", "turtle", "walrus", "whale", "wolf", "wombat", "zebra",
];

/// Picks a color and an animal at random, e.g. "amber otter".
///
/// Names are not guaranteed to be unique within a room.
#[derive(Debug, Default)]
pub struct RandomNameGenerator;

impl RandomNameGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl NameGenerator for RandomNameGenerator {
    fn generate(&self) -> DisplayName {
        let mut rng = rand::rng();
        let color = COLORS.choose(&mut rng).copied().unwrap_or("gray");
        let animal = ANIMALS.choose(&mut rng).copied().unwrap_or("cat");

        DisplayName::from_words(color, animal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_name_is_color_and_animal() {
        // テスト項目: 生成される名前は「色 動物」の 2 語
        // given (前提条件):
        let generator = RandomNameGenerator::new();

        // when (操作):
        let name = generator.generate();

        // then (期待する結果):
        let words: Vec<&str> = name.as_str().split(' ').collect();
        assert_eq!(words.len(), 2);
        assert!(COLORS.contains(&words[0]));
        assert!(ANIMALS.contains(&words[1]));
    }
}
