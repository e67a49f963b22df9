//! Faster-cast-rate and faster-hit-recovery breakpoint tables.
//!
//! A breakpoint list is ascending. The "next" breakpoint is the first entry
//! strictly greater than the current value; once the last entry is reached it
//! stays there.

use serde::{Deserialize, Serialize};

use crate::model::{CharacterClass, Item, ItemKind, ItemPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakpointKind {
    CastRate,
    HitRecovery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponCategory {
    OneHanded,
    Other,
}

struct BreakpointTable {
    kind: BreakpointKind,
    class: CharacterClass,
    weapon: Option<WeaponCategory>,
    thresholds: &'static [i32],
}

const AMAZON_FHR: &[i32] = &[0, 6, 13, 20, 32, 52, 86, 174, 600];
const ASS_BARB_PALA_FHR: &[i32] = &[0, 7, 15, 27, 48, 86, 200];
const DRUID_FHR: &[i32] = &[0, 3, 7, 13, 19, 29, 42, 63, 99, 174, 456];
const NECRO_FHR: &[i32] = &[0, 5, 10, 16, 26, 39, 56, 86, 152, 377];
const SORCERESS_FHR: &[i32] = &[0, 5, 9, 14, 20, 30, 42, 60, 86, 142, 280];

const AMAZON_FCR: &[i32] = &[0, 7, 14, 22, 32, 48, 68, 99, 152];
const ASSASSIN_FCR: &[i32] = &[0, 8, 16, 27, 42, 65, 102, 174];
const BARB_SORC_FCR: &[i32] = &[0, 9, 20, 37, 63, 105, 200];
const DRUID_FCR: &[i32] = &[0, 4, 10, 19, 30, 46, 68, 99, 163];
const NECRO_PALA_FCR: &[i32] = &[0, 9, 18, 30, 48, 75, 125];

// Druid hit recovery is listed for both weapon categories with the same
// thresholds; the save data carries nothing to tell them apart.
#[rustfmt::skip]
const TABLES: &[BreakpointTable] = &[
    BreakpointTable { kind: BreakpointKind::HitRecovery, class: CharacterClass::Amazon,      weapon: None,                              thresholds: AMAZON_FHR },
    BreakpointTable { kind: BreakpointKind::HitRecovery, class: CharacterClass::Assassin,    weapon: None,                              thresholds: ASS_BARB_PALA_FHR },
    BreakpointTable { kind: BreakpointKind::HitRecovery, class: CharacterClass::Barbarian,   weapon: None,                              thresholds: ASS_BARB_PALA_FHR },
    BreakpointTable { kind: BreakpointKind::HitRecovery, class: CharacterClass::Paladin,     weapon: None,                              thresholds: ASS_BARB_PALA_FHR },
    BreakpointTable { kind: BreakpointKind::HitRecovery, class: CharacterClass::Druid,       weapon: Some(WeaponCategory::OneHanded),   thresholds: DRUID_FHR },
    BreakpointTable { kind: BreakpointKind::HitRecovery, class: CharacterClass::Druid,       weapon: Some(WeaponCategory::Other),       thresholds: DRUID_FHR },
    BreakpointTable { kind: BreakpointKind::HitRecovery, class: CharacterClass::Necromancer, weapon: None,                              thresholds: NECRO_FHR },
    BreakpointTable { kind: BreakpointKind::HitRecovery, class: CharacterClass::Sorceress,   weapon: None,                              thresholds: SORCERESS_FHR },

    BreakpointTable { kind: BreakpointKind::CastRate,    class: CharacterClass::Amazon,      weapon: None,                              thresholds: AMAZON_FCR },
    BreakpointTable { kind: BreakpointKind::CastRate,    class: CharacterClass::Assassin,    weapon: None,                              thresholds: ASSASSIN_FCR },
    BreakpointTable { kind: BreakpointKind::CastRate,    class: CharacterClass::Barbarian,   weapon: None,                              thresholds: BARB_SORC_FCR },
    BreakpointTable { kind: BreakpointKind::CastRate,    class: CharacterClass::Sorceress,   weapon: None,                              thresholds: BARB_SORC_FCR },
    BreakpointTable { kind: BreakpointKind::CastRate,    class: CharacterClass::Druid,       weapon: None,                              thresholds: DRUID_FCR },
    BreakpointTable { kind: BreakpointKind::CastRate,    class: CharacterClass::Necromancer, weapon: None,                              thresholds: NECRO_PALA_FCR },
    BreakpointTable { kind: BreakpointKind::CastRate,    class: CharacterClass::Paladin,     weapon: None,                              thresholds: NECRO_PALA_FCR },
];

// Item types held in both hands.
const TWO_HANDED_TYPES: &[&str] = &["staf", "pole", "spea", "abow", "bow", "xbow", "aspe"];

/// First threshold strictly greater than `current`, or the last threshold.
pub fn next_breakpoint(current: i32, thresholds: &[i32]) -> i32 {
    thresholds
        .iter()
        .copied()
        .find(|threshold| *threshold > current)
        .or_else(|| thresholds.last().copied())
        .unwrap_or(0)
}

pub fn thresholds_for(
    kind: BreakpointKind,
    class: CharacterClass,
    weapon: WeaponCategory,
) -> Option<&'static [i32]> {
    TABLES
        .iter()
        .find(|table| {
            table.kind == kind
                && table.class == class
                && table.weapon.is_none_or(|w| w == weapon)
        })
        .map(|table| table.thresholds)
}

/// Next breakpoint for the class; 0 when the class has no table.
pub fn resolve_next(
    kind: BreakpointKind,
    class: CharacterClass,
    weapon: WeaponCategory,
    current: i32,
) -> i32 {
    thresholds_for(kind, class, weapon)
        .map(|thresholds| next_breakpoint(current, thresholds))
        .unwrap_or(0)
}

impl WeaponCategory {
    /// One-handed unless the equipped main weapon is a two-handed type.
    pub fn from_equipped<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let weapon = items.into_iter().find(|item| {
            item.kind == ItemKind::Weapon
                && matches!(item.position, ItemPosition::RightHand | ItemPosition::LeftHand)
        });
        match weapon {
            Some(item) if TWO_HANDED_TYPES.contains(&item.type_code.as_str()) => Self::Other,
            Some(_) => Self::OneHanded,
            None => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_breakpoint_picks_first_strictly_greater() {
        assert_eq!(next_breakpoint(0, NECRO_PALA_FCR), 9);
        assert_eq!(next_breakpoint(9, NECRO_PALA_FCR), 18);
        assert_eq!(next_breakpoint(10, NECRO_PALA_FCR), 18);
        assert_eq!(next_breakpoint(125, NECRO_PALA_FCR), 125);
        assert_eq!(next_breakpoint(400, NECRO_PALA_FCR), 125);
        assert_eq!(next_breakpoint(5, &[]), 0);
    }

    #[test]
    fn next_breakpoint_is_monotonic_for_every_table() {
        for table in TABLES {
            let last = *table.thresholds.last().expect("tables are never empty");
            let mut previous = next_breakpoint(0, table.thresholds);
            for v in 0..=last + 1 {
                let next = next_breakpoint(v, table.thresholds);
                assert!(next >= previous, "{:?} {:?} at {v}", table.kind, table.class);
                if v < last {
                    assert!(next > v, "{:?} {:?} at {v}", table.kind, table.class);
                } else {
                    assert_eq!(next, last, "{:?} {:?} at {v}", table.kind, table.class);
                }
                previous = next;
            }
            assert_eq!(next_breakpoint(last, table.thresholds), last);
        }
    }

    #[test]
    fn class_tables_resolve() {
        assert_eq!(
            resolve_next(
                BreakpointKind::CastRate,
                CharacterClass::Sorceress,
                WeaponCategory::OneHanded,
                20
            ),
            37
        );
        assert_eq!(
            resolve_next(
                BreakpointKind::HitRecovery,
                CharacterClass::Amazon,
                WeaponCategory::Other,
                13
            ),
            20
        );
        assert_eq!(
            resolve_next(
                BreakpointKind::HitRecovery,
                CharacterClass::Druid,
                WeaponCategory::Other,
                42
            ),
            63
        );
    }

    #[test]
    fn classless_character_has_no_breakpoints() {
        assert_eq!(
            resolve_next(
                BreakpointKind::CastRate,
                CharacterClass::None,
                WeaponCategory::OneHanded,
                10
            ),
            0
        );
    }

    #[test]
    fn staves_count_as_other_weapons() {
        let staff = Item {
            code: "cst".to_string(),
            type_code: "staf".to_string(),
            kind: ItemKind::Weapon,
            position: ItemPosition::RightHand,
            ..Item::default()
        };
        let wand = Item {
            type_code: "wand".to_string(),
            ..staff.clone()
        };
        assert_eq!(WeaponCategory::from_equipped([&staff]), WeaponCategory::Other);
        assert_eq!(WeaponCategory::from_equipped([&wand]), WeaponCategory::OneHanded);
        assert_eq!(WeaponCategory::from_equipped(Vec::<&Item>::new()), WeaponCategory::Other);
    }
}
