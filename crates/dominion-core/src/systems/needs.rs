//! Colonist battery drain and starvation

use crate::clock::GameClock;
use crate::components::{Colonist, Vitals};
use dominion_logic::hunger::HungerEffect;
use hecs::{Entity, World};

/// Consume at most one hunger interval for `entity`, if it is a colonist.
pub fn update_hunger(world: &mut World, entity: Entity, clock: &GameClock) {
    let Ok((colonist, vitals)) = world.query_one_mut::<(&mut Colonist, &mut Vitals)>(entity)
    else {
        return;
    };

    let max_health = vitals.max_health;
    match colonist
        .hunger
        .advance(clock.elapsed(), &mut vitals.health, max_health)
    {
        Some(HungerEffect::Starved { died: true, .. }) => {
            if vitals.mark_dead_if_depleted() {
                log::info!("colonist {:?} starved", entity);
            }
        }
        Some(HungerEffect::Starved { health, .. }) => {
            log::debug!("colonist {:?} is starving, health {}", entity, health);
        }
        Some(HungerEffect::Drained { .. }) | None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dominion_logic::hunger::{Hunger, Mood};

    #[test]
    fn test_battery_drains_each_interval() {
        let mut world = World::new();
        let colonist = world.spawn((Colonist::default(), Vitals::new(40.0)));
        let mut clock = GameClock::new();

        for _ in 0..5 {
            clock.advance(10.5);
            update_hunger(&mut world, colonist, &clock);
        }
        let state = world.get::<&Colonist>(colonist).unwrap().hunger;
        assert_eq!(state.time_till_recharge, 96.0);
        assert_eq!(state.mood, Mood::Happy);
    }

    #[test]
    fn test_empty_battery_starves_to_death() {
        let mut world = World::new();
        let mut colonist = Colonist::default();
        colonist.hunger = Hunger {
            time_till_recharge: 0.0,
            ..Hunger::default()
        };
        let e = world.spawn((colonist, Vitals::new(4.0)));
        let mut clock = GameClock::new();

        for _ in 0..10 {
            clock.advance(10.0);
            update_hunger(&mut world, e, &clock);
        }
        let vitals = *world.get::<&Vitals>(e).unwrap();
        assert_eq!(vitals.health, 0.0);
        assert!(!vitals.alive);
        assert_eq!(world.get::<&Colonist>(e).unwrap().mood(), Mood::Murderous);
    }

    #[test]
    fn test_non_colonist_is_ignored() {
        let mut world = World::new();
        let e = world.spawn((Vitals::new(4.0),));
        let mut clock = GameClock::new();
        clock.advance(100.0);
        update_hunger(&mut world, e, &clock);
        assert_eq!(world.get::<&Vitals>(e).unwrap().health, 4.0);
    }
}
