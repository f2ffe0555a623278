/// Predefined base loot price table, inserted once when the
/// base_loot_prices table is empty. Prices are in gold.

pub struct BaseLoot {
    pub name: &'static str,
    pub source: &'static str,
    pub rarity: &'static str,
    pub price: f64,
    pub weight: f64,
    pub tier: Option<i64>,
}

const fn quest(name: &'static str, rarity: &'static str, price: f64, weight: f64) -> BaseLoot {
    BaseLoot {
        name,
        source: "quest",
        rarity,
        price,
        weight,
        tier: None,
    }
}

const fn dungeon(
    name: &'static str,
    rarity: &'static str,
    price: f64,
    weight: f64,
    tier: i64,
) -> BaseLoot {
    BaseLoot {
        name,
        source: "dungeon",
        rarity,
        price,
        weight,
        tier: Some(tier),
    }
}

pub const PREDEFINED_LOOT: &[BaseLoot] = &[
    // Quest loot
    quest("Wooden Torch", "grey", 4.9, 1.0),
    quest("Broken Skull", "grey", 9.7, 1.0),
    quest("Old World Map", "grey", 16.2, 1.0),
    quest("Wooden Crate", "grey", 81.0, 1.0),
    quest("Tome of Knowledge", "green", 6.5, 2.0),
    quest("Giant Beetle Shell", "green", 13.5, 2.0),
    quest("Travelers Satchel", "green", 32.4, 2.0),
    quest("Elemental Stone", "green", 129.6, 2.0),
    quest("Blood Elixir", "blue", 9.7, 4.0),
    quest("Golden Chalice", "blue", 19.4, 4.0),
    quest("Mirror of Memories", "blue", 40.5, 4.0),
    quest("Crystal Ball", "blue", 194.4, 4.0),
    quest("Shiny Band", "purple", 13.0, 8.0),
    quest("Phoenix Feather", "purple", 25.9, 8.0),
    quest("Dragon Scale", "purple", 58.7, 8.0),
    quest("Giant Gold Coin Chest", "purple", 283.5, 8.0),
    quest("Gem of the lost king", "gold", 16.2, 16.0),
    quest("Crown Jewel", "gold", 32.4, 16.0),
    quest("Kings Diamond", "gold", 81.0, 16.0),
    quest("Ring of the True King", "gold", 405.0, 16.0),
    // Dungeon loot, one entry per tier
    dungeon("Wolfs Head", "grey", 16.2, 1.0, 1),
    dungeon("Wraiths Soul", "grey", 24.3, 1.0, 2),
    dungeon("Bandit Skull", "grey", 32.4, 1.0, 3),
    dungeon("Frozen Heart", "grey", 40.5, 1.0, 4),
    dungeon("Inquisters Trinket", "grey", 64.5, 1.0, 5),
    dungeon("Wolfs Claw", "green", 8.2, 2.0, 1),
    dungeon("Ancient Cloak", "green", 13.0, 2.0, 2),
    dungeon("Bandit Mask", "green", 16.2, 2.0, 3),
    dungeon("Frozen Tear", "green", 19.4, 2.0, 4),
    dungeon("Inquisters Orb", "green", 56.7, 2.0, 5),
    dungeon("Pristine Pelt", "blue", 19.4, 4.0, 1),
    dungeon("Ancient Pendant", "blue", 25.9, 4.0, 2),
    dungeon("Bandit Heart", "blue", 40.5, 4.0, 3),
    dungeon("Ice Crown", "blue", 48.6, 4.0, 4),
    dungeon("Inquistors Book", "blue", 24.3, 4.0, 5),
    dungeon("Wooden Casket", "purple", 32.4, 8.0, 1),
    dungeon("Enchanted Urn", "purple", 58.7, 8.0, 2),
    dungeon("Bankers Briefcase", "purple", 81.0, 8.0, 3),
    dungeon("Frozen Coffer", "purple", 81.0, 8.0, 4),
    dungeon("Lost Runepouch", "purple", 121.5, 8.0, 5),
    dungeon("Adventurers Pouch", "gold", 121.5, 16.0, 1),
    dungeon("Ancient Relic", "gold", 178.2, 16.0, 2),
    dungeon("Stolen Treasure", "gold", 243.0, 16.0, 3),
    dungeon("Cursed Medallion", "gold", 364.5, 16.0, 4),
    dungeon("Void Inscription", "gold", 486.0, 16.0, 5),
];
