//! Built-in subset of the game text tables.
//!
//! Rune names come from misc.txt, recipes from runes.txt and stat label keys
//! from the descstrpos column of itemstatcost.txt. Runeword label keys are
//! stored as the runeword name itself so an untranslated lookup still reads
//! well.

use std::collections::BTreeMap;

use super::{GameData, Runeword};

#[rustfmt::skip]
const RUNES: &[(&str, &str)] = &[
    ("r01", "El Rune"),    ("r02", "Eld Rune"),   ("r03", "Tir Rune"),   ("r04", "Nef Rune"),
    ("r05", "Eth Rune"),   ("r06", "Ith Rune"),   ("r07", "Tal Rune"),   ("r08", "Ral Rune"),
    ("r09", "Ort Rune"),   ("r10", "Thul Rune"),  ("r11", "Amn Rune"),   ("r12", "Sol Rune"),
    ("r13", "Shael Rune"), ("r14", "Dol Rune"),   ("r15", "Hel Rune"),   ("r16", "Io Rune"),
    ("r17", "Lum Rune"),   ("r18", "Ko Rune"),    ("r19", "Fal Rune"),   ("r20", "Lem Rune"),
    ("r21", "Pul Rune"),   ("r22", "Um Rune"),    ("r23", "Mal Rune"),   ("r24", "Ist Rune"),
    ("r25", "Gul Rune"),   ("r26", "Vex Rune"),   ("r27", "Ohm Rune"),   ("r28", "Lo Rune"),
    ("r29", "Sur Rune"),   ("r30", "Ber Rune"),   ("r31", "Jah Rune"),   ("r32", "Cham Rune"),
    ("r33", "Zod Rune"),
];

#[rustfmt::skip]
const OTHER_MISC: &[(&str, &str)] = &[
    ("pk1", "Key of Terror"),
    ("pk2", "Key of Hate"),
    ("pk3", "Key of Destruction"),
    ("rvs", "Rejuvenation Potion"),
    ("rvl", "Full Rejuvenation Potion"),
    ("gcv", "Chipped Amethyst"),
    ("gcw", "Chipped Diamond"),
    ("gcg", "Chipped Emerald"),
    ("gcr", "Chipped Ruby"),
    ("gcb", "Chipped Sapphire"),
    ("skc", "Chipped Skull"),
    ("gcy", "Chipped Topaz"),
    ("jew", "Jewel"),
    ("cm1", "Small Charm"),
    ("cm2", "Large Charm"),
    ("cm3", "Grand Charm"),
    ("rin", "Ring"),
    ("amu", "Amulet"),
    ("box", "Horadric Cube"),
    ("key", "Key"),
];

#[rustfmt::skip]
const RUNEWORDS: &[(&str, &[&str])] = &[
    ("Ancient's Pledge", &["Ral", "Ort", "Tal"]),
    ("Black",            &["Thul", "Io", "Nef"]),
    ("Bone",             &["Sol", "Um", "Um"]),
    ("Bramble",          &["Ral", "Ohm", "Sur", "Eth"]),
    ("Brand",            &["Jah", "Lo", "Mal", "Gul"]),
    ("Breath of the Dying", &["Vex", "Hel", "El", "Eld", "Zod", "Eth"]),
    ("Call to Arms",     &["Amn", "Ral", "Mal", "Ist", "Ohm"]),
    ("Chains of Honor",  &["Dol", "Um", "Ber", "Ist"]),
    ("Chaos",            &["Fal", "Ohm", "Um"]),
    ("Crescent Moon",    &["Shael", "Um", "Tir"]),
    ("Death",            &["Hel", "El", "Vex", "Ort", "Gul"]),
    ("Delirium",         &["Lem", "Ist", "Io"]),
    ("Destruction",      &["Vex", "Lo", "Ber", "Jah", "Ko"]),
    ("Doom",             &["Hel", "Ohm", "Um", "Lo", "Cham"]),
    ("Dragon",           &["Sur", "Lo", "Sol"]),
    ("Dream",            &["Io", "Jah", "Pul"]),
    ("Duress",           &["Shael", "Um", "Thul"]),
    ("Edge",             &["Tir", "Tal", "Amn"]),
    ("Enigma",           &["Jah", "Ith", "Ber"]),
    ("Enlightenment",    &["Pul", "Ral", "Sol"]),
    ("Eternity",         &["Amn", "Ber", "Ist", "Sol", "Sur"]),
    ("Exile",            &["Vex", "Ohm", "Ist", "Dol"]),
    ("Faith",            &["Ohm", "Jah", "Lem", "Eld"]),
    ("Famine",           &["Fal", "Ohm", "Ort", "Jah"]),
    ("Fortitude",        &["El", "Sol", "Dol", "Lo"]),
    ("Fury",             &["Jah", "Gul", "Eth"]),
    ("Gloom",            &["Fal", "Um", "Pul"]),
    ("Grief",            &["Eth", "Tir", "Lo", "Mal", "Ral"]),
    ("Hand of Justice",  &["Sur", "Cham", "Amn", "Lo"]),
    ("Harmony",          &["Tir", "Ith", "Sol", "Ko"]),
    ("Heart of the Oak", &["Ko", "Vex", "Pul", "Thul"]),
    ("Holy Thunder",     &["Eth", "Ral", "Ort", "Tal"]),
    ("Honor",            &["Amn", "El", "Ith", "Tir", "Sol"]),
    ("Ice",              &["Amn", "Shael", "Jah", "Lo"]),
    ("Infinity",         &["Ber", "Mal", "Ber", "Ist"]),
    ("Insight",          &["Ral", "Tir", "Tal", "Sol"]),
    ("King's Grace",     &["Amn", "Ral", "Thul"]),
    ("Kingslayer",       &["Mal", "Um", "Gul", "Fal"]),
    ("Last Wish",        &["Jah", "Mal", "Jah", "Sur", "Jah", "Ber"]),
    ("Lawbringer",       &["Amn", "Lem", "Ko"]),
    ("Leaf",             &["Tir", "Ral"]),
    ("Lionheart",        &["Hel", "Lum", "Fal"]),
    ("Lore",             &["Ort", "Sol"]),
    ("Malice",           &["Ith", "El", "Eth"]),
    ("Melody",           &["Shael", "Ko", "Nef"]),
    ("Memory",           &["Lum", "Io", "Sol", "Eth"]),
    ("Myth",             &["Hel", "Amn", "Nef"]),
    ("Nadir",            &["Nef", "Tir"]),
    ("Oath",             &["Shael", "Pul", "Mal", "Lum"]),
    ("Obedience",        &["Hel", "Ko", "Thul", "Eth", "Fal"]),
    ("Passion",          &["Dol", "Ort", "Eld", "Lem"]),
    ("Peace",            &["Shael", "Thul", "Amn"]),
    ("Phoenix",          &["Vex", "Vex", "Lo", "Jah"]),
    ("Pride",            &["Cham", "Sur", "Io", "Lo"]),
    ("Principle",        &["Ral", "Gul", "Eld"]),
    ("Prudence",         &["Mal", "Tir"]),
    ("Radiance",         &["Nef", "Sol", "Ith"]),
    ("Rain",             &["Ort", "Mal", "Ith"]),
    ("Rhyme",            &["Shael", "Eth"]),
    ("Sanctuary",        &["Ko", "Ko", "Mal"]),
    ("Silence",          &["Dol", "Eld", "Hel", "Ist", "Tir", "Vex"]),
    ("Smoke",            &["Nef", "Lum"]),
    ("Spirit",           &["Tal", "Thul", "Ort", "Amn"]),
    ("Splendor",         &["Eth", "Lum"]),
    ("Stealth",          &["Tal", "Eth"]),
    ("Steel",            &["Tal", "Thul"]),
    ("Stone",            &["Shael", "Um", "Pul", "Lum"]),
    ("Strength",         &["Amn", "Tir"]),
    ("Treachery",        &["Shael", "Thul", "Lem"]),
    ("Venom",            &["Tal", "Dol", "Mal"]),
    ("Wealth",           &["Lem", "Ko", "Tir"]),
    ("White",            &["Dol", "Io"]),
    ("Wind",             &["Sur", "El"]),
    ("Wrath",            &["Pul", "Lum", "Ber", "Mal"]),
    ("Zephyr",           &["Ort", "Eth"]),
];

#[rustfmt::skip]
const STAT_LABELS: &[(u16, &str)] = &[
    (0,   "ModStr1a"),   // strength
    (1,   "ModStr1d"),   // energy
    (2,   "ModStr1b"),   // dexterity
    (3,   "ModStr1c"),   // vitality
    (7,   "ModStr1u"),   // maxhp
    (9,   "ModStr1e"),   // maxmana
    (16,  "Modstr2v"),   // item_armor_percent
    (17,  "ModStr2j"),   // item_maxdamage_percent
    (19,  "ModStr1h"),   // tohit
    (20,  "ModStr3g"),   // toblock
    (21,  "ModStr1g"),   // mindamage
    (22,  "ModStr1f"),   // maxdamage
    (31,  "ModStr1i"),   // armorclass
    (32,  "ModStr6a"),   // armorclass_vs_missile
    (39,  "ModStr1j"),   // fireresist
    (40,  "ModStr5x"),   // maxfireresist
    (41,  "ModStr1l"),   // lightresist
    (42,  "ModStr5z"),   // maxlightresist
    (43,  "ModStr1k"),   // coldresist
    (44,  "ModStr5y"),   // maxcoldresist
    (45,  "ModStr1m"),   // poisonresist
    (46,  "ModStr5w"),   // maxpoisonresist
    (60,  "ModStr2z"),   // lifedrainmindam
    (62,  "ModStr2y"),   // manadrainmindam
    (79,  "ModStr1w"),   // item_goldbonus
    (80,  "ModStr1x"),   // item_magicbonus
    (93,  "ModStr4m"),   // item_fasterattackrate
    (96,  "ModStr4s"),   // item_fastermovevelocity
    (99,  "ModStr4g"),   // item_fastergethitrate
    (102, "ModStr4i"),   // item_fasterblockrate
    (105, "ModStr4q"),   // item_fastercastrate
    (127, "ModStr3k"),   // item_allskills
];

pub(super) fn game_data() -> GameData {
    let misc: BTreeMap<String, String> = RUNES
        .iter()
        .chain(OTHER_MISC)
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect();

    let runewords = RUNEWORDS
        .iter()
        .map(|(name, runes)| Runeword {
            name: name.to_string(),
            label: name.to_string(),
            runes: runes.iter().filter_map(|rune| rune_code(rune)).collect(),
        })
        .collect();

    let stat_labels = STAT_LABELS
        .iter()
        .map(|(index, label)| (*index, label.to_string()))
        .collect();

    GameData {
        misc,
        runewords,
        stat_labels,
        ..GameData::default()
    }
}

fn rune_code(short_name: &str) -> Option<String> {
    RUNES
        .iter()
        .find(|(_, name)| name.split_whitespace().next() == Some(short_name))
        .map(|(code, _)| code.to_string())
}
