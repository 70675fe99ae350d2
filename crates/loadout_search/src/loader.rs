//! Line-oriented readers for the artifact and weapon lists.
//!
//! Both readers parse and continue: missing or malformed numbers become zero and a bad line never
//! aborts the load. A file that cannot be opened yields an empty pool.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::SplitWhitespace;

use tracing::{info, warn};

use crate::data::{Artifact, Slot, Substat, Weapon};

const SUBSTAT_TERMINATOR: &str = "NONE";

fn parse_f64(token: Option<&str>) -> f64 {
    token.and_then(|t| t.parse().ok()).unwrap_or(0.0)
}

fn parse_i32(token: Option<&str>) -> i32 {
    token.and_then(|t| t.parse().ok()).unwrap_or(0)
}

fn owned(token: Option<&str>) -> String {
    token.unwrap_or_default().to_string()
}

/// Reads `name value` pairs until the line ends, a value fails to parse, or `terminator` shows up.
///
/// The flag tells whether `terminator` was consumed.
fn parse_substats(
    tokens: &mut SplitWhitespace<'_>,
    terminator: Option<&str>,
) -> (Vec<Substat>, bool) {
    let mut substats = Vec::new();
    while let Some(name) = tokens.next() {
        if terminator == Some(name) {
            return (substats, true);
        }
        let Some(raw) = tokens.next() else {
            break;
        };
        if terminator == Some(raw) {
            return (substats, true);
        }
        let Ok(value) = raw.parse::<f64>() else {
            break;
        };
        substats.push(Substat::new(name, value));
    }
    (substats, false)
}

/// `<set> <slot> <main_stat> <main_value> [<substat> <value>]*`
///
/// Returns `None` for a blank line or an unknown slot.
pub fn parse_artifact_line(line: &str) -> Option<Artifact> {
    let mut tokens = line.split_whitespace();
    let set_name = tokens.next()?.to_string();
    let slot_name = tokens.next().unwrap_or_default();
    let Some(slot) = Slot::from_name(slot_name) else {
        warn!(line, slot = slot_name, "skipping artifact with unknown slot");
        return None;
    };
    let main_stat = owned(tokens.next());
    let main_stat_value = parse_f64(tokens.next());
    let (substats, _) = parse_substats(&mut tokens, None);

    Some(Artifact {
        set_name,
        slot,
        main_stat,
        main_stat_value,
        substats,
    })
}

/// `<name> <refinement> <base_atk> <main_stat> <main_value> [<substat> <value>]* NONE <bonus_dmg>`
///
/// Returns `None` for a blank line.
pub fn parse_weapon_line(line: &str) -> Option<Weapon> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?.to_string();
    let refinement_level = parse_i32(tokens.next());
    let base_atk = parse_f64(tokens.next());
    let main_stat = owned(tokens.next());
    let main_stat_value = parse_f64(tokens.next());
    let (substats, terminated) = parse_substats(&mut tokens, Some(SUBSTAT_TERMINATOR));
    if !terminated {
        // bonus_dmg only ever follows the terminator
        tokens.by_ref().any(|t| t == SUBSTAT_TERMINATOR);
    }
    let bonus_dmg = parse_f64(tokens.next());

    Some(Weapon {
        name,
        refinement_level,
        base_atk,
        main_stat,
        main_stat_value,
        substats,
        bonus_dmg,
    })
}

/// Splits on `\n` and decodes each line lossily, so a line with invalid UTF-8 is still parsed.
/// Only an I/O error ends the stream.
fn lossy_lines<R: BufRead>(reader: R, what: &'static str) -> impl Iterator<Item = String> {
    reader.split(b'\n').map_while(move |bytes| {
        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(%err, "stopped reading {what}");
                return None;
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = text {
            warn!(line = %text.trim(), "invalid UTF-8 in {what} line");
        }
        Some(text.trim_end_matches('\r').to_string())
    })
}

/// Reads at most `max_lines` lines; blank and skipped lines count toward the cap.
pub fn read_artifacts<R: BufRead>(reader: R, max_lines: usize) -> Vec<Artifact> {
    let mut artifacts = Vec::new();
    for line in lossy_lines(reader, "artifact").take(max_lines) {
        if let Some(artifact) = parse_artifact_line(&line) {
            if artifact.substats.is_empty() {
                warn!(line = %line.trim(), "artifact with no substats");
            }
            artifacts.push(artifact);
        }
    }
    artifacts
}

pub fn read_weapons<R: BufRead>(reader: R) -> Vec<Weapon> {
    let mut weapons = Vec::new();
    for line in lossy_lines(reader, "weapon") {
        weapons.extend(parse_weapon_line(&line));
    }
    weapons
}

fn open(path: &Path, what: &str) -> Option<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Some(BufReader::new(file)),
        Err(err) => {
            warn!(path = %path.display(), %err, "cannot open {what} file, using an empty pool");
            None
        }
    }
}

pub fn load_artifacts(path: impl AsRef<Path>, max_lines: usize) -> Vec<Artifact> {
    let path = path.as_ref();
    let artifacts = open(path, "artifact")
        .map(|reader| read_artifacts(reader, max_lines))
        .unwrap_or_default();
    info!(path = %path.display(), count = artifacts.len(), "loaded artifacts");
    artifacts
}

pub fn load_weapons(path: impl AsRef<Path>) -> Vec<Weapon> {
    let path = path.as_ref();
    let weapons = open(path, "weapon")
        .map(read_weapons)
        .unwrap_or_default();
    info!(path = %path.display(), count = weapons.len(), "loaded weapons");
    weapons
}
