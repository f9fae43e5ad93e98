//! Crop growth over game time.
//!
//! A freshly planted crop first burns down `time_til_growth` in steps of
//! [`GROWTH_DECREMENT`], one step per [`GROWTH_INTERVAL`] seconds. Once that
//! reaches zero each further interval adds [`HEALTH_INCREMENT`] health and
//! moves the crop through its growth stages until it is fully grown.

use crate::constants::GROWTH_INTERVAL;
use serde::{Deserialize, Serialize};

pub const GROWTH_DECREMENT: f32 = 50.0;
pub const HEALTH_INCREMENT: f32 = 25.0;
pub const STAGE_2_GROWTH: f32 = 25.0;
pub const STAGE_3_GROWTH: f32 = 50.0;
pub const STAGE_4_GROWTH: f32 = 75.0;
pub const FULL_GROWTH: f32 = 100.0;

/// Health of a crop right after planting.
pub const SEEDLING_HEALTH: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropType {
    Corn,
    Strawberry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrowthStage {
    Stage1,
    Stage2,
    Stage3,
    Stage4,
    Grown,
}

/// Growth bookkeeping for one crop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropGrowth {
    /// Game time at which the crop was planted.
    pub planted_at: f64,
    pub planted: bool,
    pub time_til_growth: f32,
    /// Number of growth intervals already consumed, starting at 1.
    pub previous_time: u32,
    pub stage: GrowthStage,
    pub grown: bool,
}

impl CropGrowth {
    pub fn planted_at(time: f64) -> Self {
        Self {
            planted_at: time,
            planted: true,
            time_til_growth: FULL_GROWTH,
            previous_time: 1,
            stage: GrowthStage::Stage1,
            grown: false,
        }
    }

    /// Consume at most one growth interval. `health` is the crop's health.
    ///
    /// Returns true if an interval was consumed.
    pub fn advance(&mut self, now: f64, health: &mut f32) -> bool {
        if !self.planted {
            return false;
        }
        if (self.planted_at - now).abs() / GROWTH_INTERVAL <= self.previous_time as f64 {
            return false;
        }

        self.previous_time += 1;
        if self.time_til_growth != 0.0 {
            self.time_til_growth -= GROWTH_DECREMENT;
            return true;
        }

        *health += HEALTH_INCREMENT;
        if *health > STAGE_2_GROWTH {
            self.stage = GrowthStage::Stage2;
        }
        if *health > STAGE_3_GROWTH {
            self.stage = GrowthStage::Stage3;
        }
        if *health > STAGE_4_GROWTH {
            self.stage = GrowthStage::Stage4;
        }
        if *health >= FULL_GROWTH {
            self.stage = GrowthStage::Grown;
            *health = FULL_GROWTH;
            self.grown = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_growth_before_interval() {
        let mut crop = CropGrowth::planted_at(0.0);
        let mut health = SEEDLING_HEALTH;
        assert!(!crop.advance(5.0, &mut health));
        assert!(!crop.advance(10.0, &mut health));
        assert_eq!(crop.previous_time, 1);
    }

    #[test]
    fn test_timer_burns_down_before_health_grows() {
        let mut crop = CropGrowth::planted_at(0.0);
        let mut health = SEEDLING_HEALTH;
        assert!(crop.advance(10.5, &mut health));
        assert_eq!(crop.time_til_growth, 50.0);
        assert!(!crop.advance(10.6, &mut health));
        assert!(crop.advance(20.5, &mut health));
        assert_eq!(crop.time_til_growth, 0.0);
        assert_eq!(health, SEEDLING_HEALTH);
        assert_eq!(crop.stage, GrowthStage::Stage1);
    }

    #[test]
    fn test_full_growth_sequence() {
        let mut crop = CropGrowth::planted_at(0.0);
        let mut health = SEEDLING_HEALTH;
        let mut stages = Vec::new();
        let mut t = 0.0;
        while !crop.grown {
            t += 10.5;
            if crop.advance(t, &mut health) && crop.time_til_growth == 0.0 {
                stages.push(crop.stage);
            }
            assert!(t < 1000.0, "crop never finished growing");
        }
        // 1 -> 26 -> 51 -> 76 -> 100
        assert_eq!(
            &stages[1..],
            &[
                GrowthStage::Stage2,
                GrowthStage::Stage3,
                GrowthStage::Stage4,
                GrowthStage::Grown
            ]
        );
        assert_eq!(health, FULL_GROWTH);
    }

    #[test]
    fn test_unplanted_crop_does_not_grow() {
        let mut crop = CropGrowth::planted_at(0.0);
        crop.planted = false;
        let mut health = SEEDLING_HEALTH;
        assert!(!crop.advance(100.0, &mut health));
    }
}
