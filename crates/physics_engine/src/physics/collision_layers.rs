//! Collision layer system for filtering collision detection
//!
//! `layer` is what a collider is perceived as, `mask` is what it perceives.
//! The two are independent, so visibility between two colliders is not
//! necessarily symmetric.

use bitflags::bitflags;

bitflags! {
    /// Collision layer bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Player character layer
        const PLAYER = 1 << 0;
        /// Enemy character layer
        const ENEMY = 1 << 1;
        /// Projectiles (bullets, missiles, etc.)
        const PROJECTILE = 1 << 2;
        /// Static environment geometry
        const ENVIRONMENT = 1 << 3;
        /// Trigger volumes and ray probes
        const TRIGGER = 1 << 4;
        /// Debris and small physics objects
        const DEBRIS = 1 << 5;
        /// Vehicles
        const VEHICLE = 1 << 6;
        /// Pickups and collectibles
        const PICKUP = 1 << 7;

        // Bits 8-31 are free for game-defined layers
        const _ = !0;
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::all()
    }
}

impl CollisionLayers {
    /// Layer from a raw bit index (game-defined layers use 8..32)
    pub fn custom(bit: u32) -> Self {
        Self::from_bits_retain(1_u32.checked_shl(bit).unwrap_or(0))
    }

    /// Whether a collider with `mask` can perceive something on `layer`
    pub fn perceives(mask: Self, layer: Self) -> bool {
        mask.intersects(layer)
    }

    /// Independent visibility flags `(a_sees_b, b_sees_a)` for a pair
    pub fn visibility(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> (bool, bool) {
        (Self::perceives(mask_a, layer_b), Self::perceives(mask_b, layer_a))
    }

    /// Check if two colliders interact at all (either side perceives the other)
    pub fn should_test(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        let (a_sees_b, b_sees_a) = Self::visibility(layer_a, mask_a, layer_b, mask_b);
        a_sees_b || b_sees_a
    }

    /// Helper to create a mask from multiple layers
    pub fn mask(layers: &[Self]) -> Self {
        layers.iter().fold(Self::empty(), |acc, &layer| acc | layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutual_visibility() {
        let visibility = CollisionLayers::visibility(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PLAYER,
        );
        assert_eq!(visibility, (true, true));
    }

    #[test]
    fn test_one_way_visibility() {
        // Player perceives the enemy, the enemy ignores the player
        let (player_sees_enemy, enemy_sees_player) = CollisionLayers::visibility(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PROJECTILE,
        );
        assert!(player_sees_enemy);
        assert!(!enemy_sees_player);
        assert!(CollisionLayers::should_test(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PROJECTILE,
        ));
    }

    #[test]
    fn test_blind_pair_is_not_tested() {
        assert!(!CollisionLayers::should_test(
            CollisionLayers::DEBRIS,
            CollisionLayers::empty(),
            CollisionLayers::VEHICLE,
            CollisionLayers::PICKUP,
        ));
    }

    #[test]
    fn test_mask_creation() {
        let mask = CollisionLayers::mask(&[
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENVIRONMENT,
        ]);
        assert_eq!(
            mask,
            CollisionLayers::PLAYER | CollisionLayers::ENEMY | CollisionLayers::ENVIRONMENT
        );
    }

    #[test]
    fn test_custom_layers_survive_masking() {
        let custom = CollisionLayers::custom(12);
        assert_eq!(custom.bits(), 1 << 12);
        assert!(CollisionLayers::perceives(CollisionLayers::default(), custom));
        assert_eq!(CollisionLayers::custom(40), CollisionLayers::empty());
    }
}
