use std::fmt::{self, Write};

use crate::data::Artifact;
use crate::search::ScoredLoadout;

/// Plain-text summary of the winning loadout, one artifact block per slot.
pub fn render_text(best: &ScoredLoadout<'_>) -> String {
    let mut out = String::new();
    write_text(&mut out, best).ok();
    out
}

fn write_text(out: &mut String, best: &ScoredLoadout<'_>) -> fmt::Result {
    let loadout = &best.loadout;
    writeln!(out, "Best Constellation level: {}", loadout.constellation)?;
    writeln!(out, "Best Weapon: {}", loadout.weapon.label())?;
    writeln!(out, "Expected Damage: {:.2}", best.damage)?;
    writeln!(out, "Best Artifact Combination:")?;
    for artifact in loadout.artifacts {
        write_artifact(out, artifact)?;
    }
    Ok(())
}

fn write_artifact(out: &mut String, artifact: &Artifact) -> fmt::Result {
    writeln!(out, "{}", artifact.slot)?;
    writeln!(out, "Set: {}", artifact.set_name)?;
    writeln!(out, "Main Stat: {}", artifact.main_stat)?;
    write!(out, "Substats:")?;
    if artifact.substats.is_empty() {
        write!(out, " None")?;
    }
    for substat in &artifact.substats {
        write!(out, " {} {}", substat.name, substat.value)?;
    }
    writeln!(out)
}

pub fn render_json(best: &ScoredLoadout<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(best)
}
