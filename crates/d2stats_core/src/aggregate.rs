//! Summing a named property across items and bonus lists.

use crate::model::{Item, ItemProperty};

pub const STRENGTH: &str = "strength";
pub const DEXTERITY: &str = "dexterity";
pub const VITALITY: &str = "vitality";
pub const ENERGY: &str = "energy";
pub const FASTER_CAST_RATE: &str = "item_fastercastrate";
pub const FASTER_HIT_RECOVERY: &str = "item_fastergethitrate";
pub const FASTER_BLOCK_RATE: &str = "item_fasterblockrate";
pub const FASTER_RUN_WALK: &str = "item_fastermovevelocity";
pub const INCREASED_ATTACK_SPEED: &str = "item_fasterattackrate";
pub const MAGIC_FIND: &str = "item_magicbonus";
pub const GOLD_FIND: &str = "item_goldbonus";

/// Sum the first value of every property called `name` on the given items
/// plus every matching entry of `bonuses`.
///
/// Broken items (durability 0 with a non-zero maximum) are skipped.
pub fn sum_property<'a, I>(name: &str, items: I, bonuses: &[ItemProperty]) -> i32
where
    I: IntoIterator<Item = &'a Item>,
{
    let from_items: i32 = items
        .into_iter()
        .filter(|item| item.contributes_properties())
        .flat_map(|item| item.properties.iter())
        .filter(|property| property.name == name)
        .map(ItemProperty::first_value)
        .sum();

    from_items + sum_bonuses(name, bonuses)
}

pub fn sum_bonuses(name: &str, bonuses: &[ItemProperty]) -> i32 {
    bonuses
        .iter()
        .filter(|property| property.name == name)
        .map(ItemProperty::first_value)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with(properties: Vec<ItemProperty>) -> Item {
        Item {
            code: "rin".to_string(),
            properties,
            ..Item::default()
        }
    }

    #[test]
    fn sums_first_value_over_items_and_bonuses() {
        let items = vec![
            item_with(vec![ItemProperty::new(0, STRENGTH, vec![5], 0, 1)]),
            item_with(vec![
                ItemProperty::new(0, STRENGTH, vec![3, 99], 0, 1),
                ItemProperty::new(2, DEXTERITY, vec![7], 0, 1),
            ]),
        ];
        let bonuses = vec![ItemProperty::new(0, STRENGTH, vec![10], 0, 1)];

        assert_eq!(sum_property(STRENGTH, &items, &bonuses), 18);
        assert_eq!(sum_property(DEXTERITY, &items, &[]), 7);
        assert_eq!(sum_property(ENERGY, &items, &bonuses), 0);
    }

    #[test]
    fn broken_items_are_ignored() {
        let mut broken = item_with(vec![ItemProperty::new(80, MAGIC_FIND, vec![25], 0, 1)]);
        broken.max_durability = 12;
        broken.durability = 0;
        let intact = item_with(vec![ItemProperty::new(80, MAGIC_FIND, vec![20], 0, 1)]);

        assert_eq!(sum_property(MAGIC_FIND, [&broken, &intact], &[]), 20);
    }
}
