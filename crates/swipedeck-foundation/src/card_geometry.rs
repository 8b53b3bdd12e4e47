//! Card stack geometry.
//!
//! Pure functions mapping a card index and the continuous scroll position of
//! the deck to the card's visual transform. `relative_position` is
//! `current_index - index`: 0 means the card is focused, negative means it
//! is still ahead, positive means it has been swiped past.

use std::f32::consts::PI;

/// Distance between neighbouring cards along the drag axis.
pub const CARD_SPACING: f32 = 35.0;
/// Multiplier applied to the swing-out arc of the departing card.
pub const SWING_AMPLITUDE: f32 = 15.0;
/// Relative position after which the departing card stops swinging.
pub const SWING_CUTOFF: f32 = 0.99;
/// Scale lost per step away from focus.
pub const SCALE_FALLOFF: f32 = 0.1;
/// Rotation in degrees per step away from focus.
pub const ROTATION_PER_STEP: f32 = 2.0;
/// Relative position at which a card moves behind the rest of the deck.
pub const DEPTH_FLIP_THRESHOLD: f32 = 0.5;

/// Signed distance of card `index` from the focus position.
pub fn relative_position(index: usize, current_index: f32) -> f32 {
    current_index - index as f32
}

/// Visual transform of one card.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardTransform {
    /// Displacement along the stack axis.
    pub offset: f32,
    /// Uniform scale about the card center.
    pub scale: f32,
    /// Rotation about the card center, in degrees.
    pub rotation_degrees: f32,
    /// Paint order; higher values draw on top.
    pub z_index: f32,
}

/// Tunable constants of the fanned stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStackGeometry {
    pub card_spacing: f32,
    pub swing_amplitude: f32,
    pub swing_cutoff: f32,
    pub scale_falloff: f32,
    pub rotation_per_step: f32,
    pub depth_flip_threshold: f32,
}

impl Default for CardStackGeometry {
    fn default() -> Self {
        Self {
            card_spacing: CARD_SPACING,
            swing_amplitude: SWING_AMPLITUDE,
            swing_cutoff: SWING_CUTOFF,
            scale_falloff: SCALE_FALLOFF,
            rotation_per_step: ROTATION_PER_STEP,
            depth_flip_threshold: DEPTH_FLIP_THRESHOLD,
        }
    }
}

impl CardStackGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card_spacing(mut self, spacing: f32) -> Self {
        self.card_spacing = spacing;
        self
    }

    pub fn swing_amplitude(mut self, amplitude: f32) -> Self {
        self.swing_amplitude = amplitude;
        self
    }

    pub fn scale_falloff(mut self, falloff: f32) -> Self {
        self.scale_falloff = falloff;
        self
    }

    pub fn rotation_per_step(mut self, degrees: f32) -> Self {
        self.rotation_per_step = degrees;
        self
    }

    /// Paint order of card `index`.
    ///
    /// The focused card and the cards ahead of it are drawn in deck order,
    /// focused card on top. A card swiped more than `depth_flip_threshold`
    /// past focus drops behind everything, the most recently passed card
    /// highest among them. The order therefore flips midway through a swipe,
    /// not at its start or end.
    pub fn stack_depth(&self, index: usize, current_index: f32, deck_size: usize) -> f32 {
        let depth = deck_size as f32 - index as f32;
        if relative_position(index, current_index) < self.depth_flip_threshold {
            depth
        } else {
            -depth
        }
    }

    /// Displacement of card `index` along the stack axis.
    ///
    /// The card currently departing (relative position strictly inside
    /// `(0, swing_cutoff)`) follows a sine arc instead of the linear fan,
    /// except for the last card of the deck.
    pub fn offset(&self, index: usize, current_index: f32, deck_size: usize) -> f32 {
        let linear = (index as f32 - current_index) * self.card_spacing;
        let relative = relative_position(index, current_index);
        let is_last = index + 1 == deck_size;
        if relative > 0.0 && relative < self.swing_cutoff && !is_last {
            linear * (PI * relative).sin() * self.swing_amplitude
        } else {
            linear
        }
    }

    /// Uniform scale of card `index`; 1.0 at focus, never negative.
    pub fn scale(&self, index: usize, current_index: f32) -> f32 {
        let distance = relative_position(index, current_index).abs();
        (1.0 - self.scale_falloff * distance).max(0.0)
    }

    /// Rotation of card `index` in degrees; 0 at focus.
    pub fn rotation(&self, index: usize, current_index: f32) -> f32 {
        -relative_position(index, current_index) * self.rotation_per_step
    }

    /// All transform outputs for card `index`.
    pub fn transform(&self, index: usize, current_index: f32, deck_size: usize) -> CardTransform {
        CardTransform {
            offset: self.offset(index, current_index, deck_size),
            scale: self.scale(index, current_index),
            rotation_degrees: self.rotation(index, current_index),
            z_index: self.stack_depth(index, current_index, deck_size),
        }
    }
}
