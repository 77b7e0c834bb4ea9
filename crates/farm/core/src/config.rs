/// Tunable distances and quantities for field actions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FarmConfig {
    /// Maximum collider-center distance at which an action may execute.
    pub interaction_range: f32,
    /// Navigator stop distance as a fraction of `interaction_range`.
    pub stop_distance_factor: f32,
    /// Accepted distance (fraction of `interaction_range`) when the navigator
    /// stops on its own before reaching the stop distance.
    pub arrival_tolerance_factor: f32,
    /// Radius around the cursor scanned for harvestable entities.
    pub harvest_scan_radius: f32,
    /// Seeds consumed by one planting.
    pub seeds_per_plant: u16,
}

impl FarmConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INTERACTION_RANGE: f32 = 1.5;
    pub const DEFAULT_STOP_DISTANCE_FACTOR: f32 = 0.8;
    pub const DEFAULT_ARRIVAL_TOLERANCE_FACTOR: f32 = 0.9;
    pub const DEFAULT_HARVEST_SCAN_RADIUS: f32 = 0.75;
    pub const DEFAULT_SEEDS_PER_PLANT: u16 = 1;

    pub fn new() -> Self {
        Self {
            interaction_range: Self::DEFAULT_INTERACTION_RANGE,
            stop_distance_factor: Self::DEFAULT_STOP_DISTANCE_FACTOR,
            arrival_tolerance_factor: Self::DEFAULT_ARRIVAL_TOLERANCE_FACTOR,
            harvest_scan_radius: Self::DEFAULT_HARVEST_SCAN_RADIUS,
            seeds_per_plant: Self::DEFAULT_SEEDS_PER_PLANT,
        }
    }

    pub fn with_interaction_range(interaction_range: f32) -> Self {
        Self {
            interaction_range,
            ..Self::new()
        }
    }

    /// Distance at which the navigator is told to stop walking.
    pub fn stop_distance(&self) -> f32 {
        self.interaction_range * self.stop_distance_factor
    }

    /// Looser threshold accepted when navigation ends without reaching the
    /// stop distance.
    pub fn arrival_tolerance(&self) -> f32 {
        self.interaction_range * self.arrival_tolerance_factor
    }
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_thresholds_scale_with_range() {
        let config = FarmConfig::with_interaction_range(2.0);
        assert!((config.stop_distance() - 1.6).abs() < 1e-6);
        assert!((config.arrival_tolerance() - 1.8).abs() < 1e-6);
        assert!(config.stop_distance() < config.arrival_tolerance());
        assert!(config.arrival_tolerance() <= config.interaction_range);
    }
}
