use crate::ai::{Action, ActionContext};
use crate::components::{Colonist, Pose, Vitals, Weapon};
use dominion_logic::combat::{weapon_damage, MeleeTier, FIGHT_ROUND_INTERVAL, UNARMED_MAX_DAMAGE};
use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::Rng;

/// Round-based melee between two entities.
///
/// A round runs once more than [`FIGHT_ROUND_INTERVAL`] of game time has
/// passed since the previous one. The attacker swings first; on a miss the
/// target swings back bare-handed. Finishes once either side is dead.
///
/// Colonists roll to hit by melee tier. Any other attacker deals its unarmed
/// blow to itself every round and the target never strikes back.
pub struct Fight {
    attacker: Entity,
    target: Entity,
    weapon: Option<Entity>,
    weapon_damage: f32,
    quality_drain: f32,
    last_round: f64,
}

impl Fight {
    /// Weapon damage is fixed here from the target's health at the start of
    /// the fight.
    pub fn new(
        world: &World,
        attacker: Entity,
        target: Entity,
        weapon: Option<Entity>,
        now: f64,
    ) -> Self {
        let stats = weapon.and_then(|w| world.get::<&Weapon>(w).ok().map(|w| w.stats));
        let target_health = world.get::<&Vitals>(target).map(|v| v.health).unwrap_or(0.0);
        Self {
            attacker,
            target,
            weapon: stats.and(weapon),
            weapon_damage: stats.map_or(0.0, |s| weapon_damage(target_health, &s)),
            quality_drain: stats.map_or(0.0, |s| s.quality_drain),
            last_round: now,
        }
    }

    pub fn weapon_damage(&self) -> f32 {
        self.weapon_damage
    }

    fn both_alive(&self, world: &World) -> bool {
        [self.attacker, self.target]
            .iter()
            .all(|&e| world.get::<&Vitals>(e).map_or(false, |v| v.alive))
    }
}

fn unarmed_damage(rng: &mut StdRng) -> f32 {
    rng.gen_range(0..UNARMED_MAX_DAMAGE) as f32
}

fn set_pose(world: &mut World, entity: Entity, pose: Pose) {
    if let Ok(mut current) = world.get::<&mut Pose>(entity) {
        *current = pose;
    }
}

fn hurt(world: &mut World, entity: Entity, damage: f32) {
    if damage <= 0.0 {
        return;
    }
    if let Ok(mut vitals) = world.get::<&mut Vitals>(entity) {
        vitals.decrement(damage);
    }
    set_pose(world, entity, Pose::Hurt);
}

impl Action for Fight {
    fn advance(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        if !self.both_alive(ctx.world) {
            return true;
        }
        if ctx.clock.time - self.last_round <= FIGHT_ROUND_INTERVAL {
            return false;
        }
        self.last_round = ctx.clock.time;

        set_pose(ctx.world, self.attacker, Pose::Normal);
        set_pose(ctx.world, self.target, Pose::Normal);

        let tier = ctx
            .world
            .get::<&Colonist>(self.attacker)
            .ok()
            .map(|c| MeleeTier::from_skill(c.melee()));

        match tier {
            Some(tier) => {
                if tier.hits(ctx.rng.gen::<f64>()) {
                    let damage = match self.weapon {
                        Some(weapon) => {
                            if let Ok(mut wear) = ctx.world.get::<&mut Vitals>(weapon) {
                                wear.decrement(self.quality_drain);
                            }
                            self.weapon_damage
                        }
                        None => unarmed_damage(ctx.rng),
                    };
                    hurt(ctx.world, self.target, damage);
                } else if tier.hits(ctx.rng.gen::<f64>()) {
                    let damage = unarmed_damage(ctx.rng);
                    hurt(ctx.world, self.attacker, damage);
                }
            }
            // A non-colonist's blow always lands on itself, while the target
            // takes the hurt pose. The round counts as a hit, so there is no
            // retaliation.
            None => {
                let damage = unarmed_damage(ctx.rng);
                if let Ok(mut vitals) = ctx.world.get::<&mut Vitals>(self.attacker) {
                    vitals.decrement(damage);
                }
                set_pose(ctx.world, self.target, Pose::Hurt);
            }
        }

        let mut finished = false;
        for entity in [self.attacker, self.target] {
            if let Ok(mut vitals) = ctx.world.get::<&mut Vitals>(entity) {
                if vitals.mark_dead_if_depleted() {
                    log::info!("{:?} died in a fight", entity);
                }
                finished |= !vitals.alive;
            }
        }
        finished
    }

    fn name(&self) -> &'static str {
        "Fight"
    }
}
