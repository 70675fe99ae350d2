use crate::data::{CRIT_DMG_KEY, CRIT_RATE_KEY, Element, Substat, Weapon};
use crate::set_effect::SetEffect;

const CRIT_RATE_CAP: f64 = 100.0;

/// Weapon-side inputs of the damage formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    pub base_atk: f64,
    pub atk_bonus: f64,
    pub bonus_dmg: f64,
}

impl From<&Weapon> for WeaponStats {
    fn from(weapon: &Weapon) -> Self {
        Self {
            base_atk: weapon.base_atk,
            atk_bonus: weapon.main_stat_value,
            bonus_dmg: weapon.bonus_dmg,
        }
    }
}

#[inline(always)]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Expected damage of one hit.
///
/// `substats` is the pooled substat list of the five artifacts and the weapon. Crit rate from
/// substats is capped at 100 before set effects are added. Non-finite numbers count as zero and
/// the result is never negative.
pub fn calculate_damage<'s, I>(
    weapon: WeaponStats,
    substats: I,
    set_effects: &[SetEffect],
    element: Element,
) -> f64
where
    I: IntoIterator<Item = &'s Substat>,
{
    let base_atk = finite_or_zero(weapon.base_atk);
    let mut total_atk = base_atk * (1.0 + finite_or_zero(weapon.atk_bonus) / 100.0);

    let elemental_key = element.dmg_bonus_key();
    let mut crit_rate = 0.0f64;
    let mut crit_dmg = 0.0f64;
    let mut elemental_dmg = 0.0f64;
    for substat in substats {
        let value = finite_or_zero(substat.value);
        if substat.name == CRIT_RATE_KEY {
            crit_rate += value;
        } else if substat.name == CRIT_DMG_KEY {
            crit_dmg += value;
        } else if substat.name == elemental_key {
            elemental_dmg += value;
        }
    }

    crit_rate = crit_rate.min(CRIT_RATE_CAP);

    for effect in set_effects {
        match *effect {
            SetEffect::ElementalDmg(pct) => elemental_dmg += finite_or_zero(pct),
            SetEffect::CritRate(pct) => crit_rate += finite_or_zero(pct),
            SetEffect::AtkPercent(pct) => total_atk += base_atk * finite_or_zero(pct) / 100.0,
            SetEffect::Inert => {}
        }
    }

    let crit_multiplier = 1.0 + (crit_dmg / 100.0) * (crit_rate / 100.0);
    let damage = total_atk
        * crit_multiplier
        * (1.0 + elemental_dmg / 100.0)
        * (1.0 + finite_or_zero(weapon.bonus_dmg) / 100.0);
    damage.max(0.0)
}
