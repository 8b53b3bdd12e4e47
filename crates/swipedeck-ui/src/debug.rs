//! Debug dumps of composed card layers.
//!
//! Enabled by setting `SWIPEDECK_DEBUG_LAYERS`.

use std::fmt::Debug;

use crate::widgets::ComposedCard;

pub(crate) const DEBUG_LAYERS_ENV: &str = "SWIPEDECK_DEBUG_LAYERS";

pub(crate) fn debug_layers_enabled() -> bool {
    std::env::var_os(DEBUG_LAYERS_ENV).is_some()
}

pub(crate) fn log_card_layers<K: Debug>(position: f32, cards: &[ComposedCard<K>]) {
    log::debug!("card stack layers at position {position:.3} ({} cards)", cards.len());
    for card in cards {
        let layer = card.resolved.graphics_layer;
        log::debug!(
            "  #{} {:?} z={} offset=({:.1}, {:.1}) scale={:.3} rotation={:.2} label={:?}",
            card.index,
            card.key,
            card.resolved.z_index,
            card.resolved.offset.x,
            card.resolved.offset.y,
            layer.scale_x,
            layer.rotation_z,
            card.label()
        );
    }
}
