use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use d2stats_core::config::Config;
use d2stats_core::core_api::{DisplayStats, Engine, Session};
use d2stats_core::export::ignore_by_name;
use d2stats_core::savegame::{self, CHARACTER_EXTENSION};
use d2stats_render::{
    FieldSelection, JsonStyle, TextRenderOptions, TextStyle, render_items_json, render_items_text,
    render_json_full, render_json_selected, render_text_with_options,
};
use serde_json::Value as JsonValue;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "CHARACTER.json", conflicts_with = "latest")]
    path: Option<PathBuf>,
    /// Use the most recently modified character document in DIR.
    #[arg(long, value_name = "DIR")]
    latest: Option<PathBuf>,
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Extra game data documents, merged over the built-in tables.
    #[arg(long = "game-data", value_name = "PATH")]
    game_data: Vec<PathBuf>,
    #[arg(long, value_name = "PATH")]
    translations: Vec<PathBuf>,
    #[arg(long, value_name = "CODE")]
    language: Option<String>,
    /// Count items and gold from the shared stash next to the character.
    #[arg(long = "shared-stash")]
    shared_stash: bool,
    #[arg(long = "runes-with-x")]
    runes_with_x: bool,
    #[arg(long = "keep-duplicate-runewords")]
    keep_duplicate_runewords: bool,
    #[arg(long = "translate-base-names")]
    translate_base_names: bool,
    /// Export stored items as well as equipment.
    #[arg(long = "all-items")]
    all_items: bool,
    #[arg(long)]
    name: bool,
    #[arg(long)]
    class: bool,
    #[arg(long)]
    level: bool,
    #[arg(long = "percent-to-next")]
    percent_to_next: bool,
    #[arg(long)]
    attributes: bool,
    #[arg(long)]
    resistances: bool,
    #[arg(long)]
    breakpoints: bool,
    #[arg(long = "frw")]
    faster_run_walk: bool,
    #[arg(long = "ias")]
    increased_attack_speed: bool,
    #[arg(long = "mf")]
    magic_find: bool,
    #[arg(long = "gf")]
    gold_find: bool,
    #[arg(long)]
    gold: bool,
    #[arg(long = "gold-in-stash")]
    gold_in_stash: bool,
    #[arg(long)]
    runes: bool,
    #[arg(long)]
    runewords: bool,
    #[arg(long)]
    keys: bool,
    #[arg(long = "speed-run-items")]
    speed_run_items: bool,
    #[arg(long = "last-updated")]
    last_updated: bool,
    #[arg(long, conflicts_with = "sync")]
    items: bool,
    /// Print the assembled sync document instead of the stats.
    #[arg(long)]
    sync: bool,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    verbose: bool,
}

fn field_selection(cli: &Cli) -> FieldSelection {
    FieldSelection {
        name: cli.name,
        class: cli.class,
        level: cli.level,
        percent_to_next: cli.percent_to_next,
        attributes: cli.attributes,
        resistances: cli.resistances,
        breakpoints: cli.breakpoints,
        faster_run_walk: cli.faster_run_walk,
        increased_attack_speed: cli.increased_attack_speed,
        magic_find: cli.magic_find,
        gold_find: cli.gold_find,
        gold: cli.gold,
        gold_in_stash: cli.gold_in_stash,
        runes: cli.runes,
        runewords: cli.runewords,
        keys: cli.keys,
        speed_run_items: cli.speed_run_items,
        last_updated: cli.last_updated,
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging();
    let fields = field_selection(&cli);

    if (cli.items || cli.sync) && fields.is_any_selected() {
        eprintln!("field flags cannot be combined with --items or --sync");
        process::exit(2);
    }

    let path = match (&cli.path, &cli.latest) {
        (Some(path), _) => path.clone(),
        (None, Some(dir)) => match savegame::find_most_recent(dir, CHARACTER_EXTENSION) {
            Ok(Some(path)) => path,
            Ok(None) => {
                eprintln!("No character documents found in {}", dir.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error scanning {}: {e}", dir.display());
                process::exit(1);
            }
        },
        (None, None) => {
            eprintln!("either CHARACTER.json or --latest <DIR> is required");
            process::exit(2);
        }
    };

    let config = load_config(&cli);
    let game_data = read_all(&cli.game_data);
    let translations = read_all(&cli.translations);
    let engine = Engine::from_sources(config, &game_data, &translations).unwrap_or_else(|e| {
        eprintln!("Error loading game data or translations: {e}");
        process::exit(1);
    });

    let session = savegame::load_session(&engine, &path).unwrap_or_else(|e| {
        eprintln!("Error loading character: {}", path.display());
        eprintln!("  {e}");
        process::exit(1);
    });
    debug!(path = %path.display(), "character loaded");

    if cli.sync {
        print_sync(&session, &path);
        return;
    }

    if cli.items {
        let items = session.item_payloads(session.config().export.equipment_only);
        if cli.json {
            print_json(&render_items_json(&items));
        } else {
            print!("{}", render_items_text(&items));
        }
        return;
    }

    let stats = session.display_stats();
    if cli.json {
        let json = if fields.is_any_selected() {
            render_json_selected(&stats, &fields, JsonStyle::CanonicalV1)
        } else {
            render_json_full(&stats, JsonStyle::CanonicalV1)
        };
        print_json(&json);
        return;
    }

    if fields.is_any_selected() {
        for (key, value) in selected_pairs(&fields, &stats) {
            println!("{key}={value}");
        }
        return;
    }

    let options = TextRenderOptions {
        verbose: cli.verbose,
    };
    print!(
        "{}",
        render_text_with_options(&stats, TextStyle::ClassicSheet, options)
    );
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => {
            let bytes = fs::read(path).unwrap_or_else(|e| {
                eprintln!("Error reading {}: {e}", path.display());
                process::exit(1);
            });
            Config::from_json_slice(&bytes).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", path.display());
                eprintln!("  {e}");
                process::exit(1);
            })
        }
        None => Config::default(),
    };

    if let Some(language) = &cli.language {
        config.translation.language = language.clone();
    }
    if cli.shared_stash {
        config.stats.include_shared_stash = true;
    }
    if cli.runes_with_x {
        config.stats.runes_with_x = true;
    }
    if cli.keep_duplicate_runewords {
        config.stats.remove_duplicate_runeword = false;
    }
    if cli.translate_base_names {
        config.export.translate_base_names = true;
    }
    if cli.all_items {
        config.export.equipment_only = false;
    }
    config
}

fn read_all(paths: &[PathBuf]) -> Vec<Vec<u8>> {
    paths
        .iter()
        .map(|path| {
            fs::read(path).unwrap_or_else(|e| {
                eprintln!("Error reading {}: {e}", path.display());
                process::exit(1);
            })
        })
        .collect()
}

fn print_sync(session: &Session, path: &Path) {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if ignore_by_name(&file_name, &session.config().sync.ignore_names_that_contain) {
        info!(file = %file_name, "character ignored by name filter");
        return;
    }
    let request = session.sync_request();
    let json = serde_json::to_value(&request).unwrap_or_else(|e| {
        eprintln!("Error rendering sync document: {e}");
        process::exit(1);
    });
    print_json(&json);
}

fn print_json(json: &JsonValue) {
    let rendered = serde_json::to_string_pretty(json).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}

fn selected_pairs(fields: &FieldSelection, stats: &DisplayStats) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();

    if fields.name {
        out.push(("name", stats.name.clone()));
    }
    if fields.class {
        out.push(("class", stats.class.to_string()));
    }
    if fields.level {
        out.push(("level", stats.level.to_string()));
    }
    if fields.percent_to_next {
        out.push(("percent_to_next", stats.percent_to_next.clone()));
    }
    if fields.attributes {
        let a = &stats.attributes;
        out.push(("attribute", format!("strength={}", a.strength)));
        out.push(("attribute", format!("dexterity={}", a.dexterity)));
        out.push(("attribute", format!("vitality={}", a.vitality)));
        out.push(("attribute", format!("energy={}", a.energy)));
    }
    if fields.resistances {
        let r = &stats.resistances;
        out.push(("resistance", format!("fire={}", r.fire)));
        out.push(("resistance", format!("cold={}", r.cold)));
        out.push(("resistance", format!("lightning={}", r.lightning)));
        out.push(("resistance", format!("poison={}", r.poison)));
        out.push(("resistance", format!("physical={}", r.physical)));
    }
    if fields.breakpoints {
        let b = &stats.breakpoints;
        out.push((
            "breakpoint",
            format!("fcr={}/{}", b.faster_cast_rate, b.next_faster_cast_rate),
        ));
        out.push((
            "breakpoint",
            format!("fhr={}/{}", b.faster_hit_recovery, b.next_faster_hit_recovery),
        ));
        out.push((
            "breakpoint",
            format!("fbr={}/{}", b.faster_block_rate, b.next_faster_block_rate),
        ));
    }
    if fields.faster_run_walk {
        out.push(("faster_run_walk", stats.faster_run_walk.to_string()));
    }
    if fields.increased_attack_speed {
        out.push((
            "increased_attack_speed",
            stats.increased_attack_speed.to_string(),
        ));
    }
    if fields.magic_find {
        out.push(("magic_find", stats.magic_find.to_string()));
    }
    if fields.gold_find {
        out.push(("gold_find", stats.gold_find.to_string()));
    }
    if fields.gold {
        out.push(("gold", stats.gold.clone()));
    }
    if fields.gold_in_stash {
        out.push(("gold_in_stash", stats.gold_in_stash.clone()));
    }
    if fields.runes {
        out.push(("runes", stats.runes.clone()));
    }
    if fields.runewords {
        out.push(("runewords", stats.runewords.clone()));
    }
    if fields.keys {
        let k = &stats.keys;
        out.push((
            "keys",
            format!(
                "terror={} hate={} destruction={}",
                k.terror, k.hate, k.destruction
            ),
        ));
    }
    if fields.speed_run_items {
        let s = &stats.speed_run_items;
        out.push((
            "speed_run_items",
            format!(
                "full_rejuvs={} small_rejuvs={} chipped_gems={}",
                s.full_rejuvs, s.small_rejuvs, s.chipped_gems
            ),
        ));
    }
    if fields.last_updated {
        out.push(("last_updated", stats.last_updated.clone()));
    }

    out
}
