//! Which items on a character currently apply their properties.

use tracing::debug;

use crate::aggregate::{DEXTERITY, STRENGTH, sum_property};
use crate::model::{Character, Item, ItemContainer, ItemLocation};

/// Worn outside the weapon-swap slots, or a charm carried in the inventory.
pub fn is_equipped_or_charm(item: &Item) -> bool {
    let worn = item.location == ItemLocation::Equipped && !item.position.is_swap();
    let charm = item.container == ItemContainer::Inventory && item.is_charm();
    worn || charm
}

/// Items whose properties apply to the character.
///
/// Strength and dexterity requirements are checked against the base
/// attributes plus the bonuses of all candidate items and the set bonuses.
/// This is a single pass: an item dropped for an unmet requirement still
/// counted towards the totals used for the check.
pub fn resolve_equipped(character: &Character) -> Vec<&Item> {
    let candidates: Vec<&Item> = character
        .items
        .iter()
        .filter(|item| is_equipped_or_charm(item))
        .collect();

    let bonuses = &character.equipped_set_benefits;
    let strength = character.attributes.strength
        + sum_property(STRENGTH, candidates.iter().copied(), bonuses);
    let dexterity = character.attributes.dexterity
        + sum_property(DEXTERITY, candidates.iter().copied(), bonuses);
    let level = i32::from(character.level);

    candidates
        .into_iter()
        .filter(|item| {
            let usable = item.req_level <= level
                && item.req_strength <= strength
                && item.req_dexterity <= dexterity;
            if !usable {
                debug!(
                    code = %item.code,
                    req_level = item.req_level,
                    req_strength = item.req_strength,
                    req_dexterity = item.req_dexterity,
                    "requirements not met, item ignored"
                );
            }
            usable
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attributes, CharacterClass, ItemPosition, ItemProperty};

    fn character(level: u8, strength: i32, items: Vec<Item>) -> Character {
        Character {
            name: "Tester".to_string(),
            class: CharacterClass::Barbarian,
            level,
            hardcore: false,
            expansion: true,
            died: false,
            attributes: Attributes {
                strength,
                dexterity: 20,
                ..Attributes::default()
            },
            items,
            equipped_set_benefits: Vec::new(),
            skills: Vec::new(),
            locations: Vec::new(),
            quest_data: Vec::new(),
            mercenary: None,
        }
    }

    fn worn(code: &str, position: ItemPosition) -> Item {
        Item {
            code: code.to_string(),
            location: ItemLocation::Equipped,
            position,
            ..Item::default()
        }
    }

    #[test]
    fn swap_slots_and_stash_items_are_excluded() {
        let stashed_charm = Item {
            code: "cm2".to_string(),
            container: ItemContainer::Stash,
            ..Item::default()
        };
        let carried_charm = Item {
            container: ItemContainer::Inventory,
            ..stashed_charm.clone()
        };
        let items = vec![
            worn("cap", ItemPosition::Head),
            worn("swd", ItemPosition::RightSwap),
            stashed_charm,
            carried_charm,
        ];
        let c = character(30, 50, items);

        let codes: Vec<&str> = resolve_equipped(&c)
            .iter()
            .map(|item| item.code.as_str())
            .collect();
        assert_eq!(codes, vec!["cap", "cm2"]);
    }

    #[test]
    fn level_requirement_filters_charms() {
        let charm = Item {
            code: "cm3".to_string(),
            container: ItemContainer::Inventory,
            req_level: 22,
            properties: vec![ItemProperty::new(0, STRENGTH, vec![5], 0, 1)],
            ..Item::default()
        };
        let c = character(21, 30, vec![charm]);
        assert!(resolve_equipped(&c).is_empty());
    }

    #[test]
    fn strength_requirement_counts_item_bonuses() {
        let mut belt = worn("mbl", ItemPosition::Waist);
        belt.properties = vec![ItemProperty::new(0, STRENGTH, vec![10], 0, 1)];
        let mut armor = worn("plt", ItemPosition::Torso);
        armor.req_strength = 60;

        let c = character(40, 50, vec![belt, armor]);
        assert_eq!(resolve_equipped(&c).len(), 2);

        let mut weaker = c.clone();
        weaker.attributes.strength = 49;
        let codes: Vec<&str> = resolve_equipped(&weaker)
            .iter()
            .map(|item| item.code.as_str())
            .collect();
        assert_eq!(codes, vec!["mbl"]);
    }
}
