use quicksilver::geom::{Rectangle, Shape, Vector};
use serde_derive::*;

use crate::animation::{Animator, Pose, PoseChange, Tween};
use crate::game_objects::{CardId, CardType};
use crate::palette::{Layers, Palette};

/// The outline effect can't draw a zero-width border without leaving a hairline, so "no outline" is
/// drawn with this width instead.
pub const MIN_OUTLINE_WIDTH: f32 = 0.001;

/// Sizes and timings shared by every card on the board
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStyle {
    /// Pixel size of a card face before scaling
    pub texture_size: [f32; 2],
    pub default_scale: f32,
    pub zoom_scale: f32,
    pub hover_outline_width: f32,
    /// Milliseconds
    pub hover_duration: f32,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            texture_size: [750.0, 1050.0],
            default_scale: 0.25,
            zoom_scale: 0.28,
            hover_outline_width: 4.0,
            hover_duration: 200.0,
        }
    }
}

impl CardStyle {
    pub fn texture_size(&self) -> Vector {
        Vector::new(self.texture_size[0], self.texture_size[1])
    }

    /// On-screen size of an upright card at the default scale
    pub fn card_size(&self) -> Vector {
        self.texture_size() * self.default_scale
    }
}

/// Size of a `size` box after turning it by `angle` degrees (right angles only)
pub fn oriented(size: Vector, angle: f32) -> Vector {
    if ((angle / 90.0).round() as i32).rem_euclid(2) == 1 {
        Vector::new(size.y, size.x)
    } else {
        size
    }
}

/// A card on the table. Holds the key of its texture in `Assets`; drawing is done by the board display.
#[derive(Debug)]
pub struct Card {
    id: CardId,
    card_type: CardType,
    texture: String,
    style: CardStyle,
    pose: Pose,
    // values hover restores to
    rest_scale: Vector,
    rest_outline_width: f32,
    z: f32,
    interactive: bool,
    visible: bool,
    hovered: bool,
    outline: Option<u32>,
    animator: Animator,
}

impl Card {
    pub fn new(id: CardId, texture: &str, card_type: CardType, style: CardStyle) -> Self {
        let pose = Pose::new(Vector::ZERO, style.default_scale);
        Self {
            id,
            card_type,
            texture: texture.to_string(),
            style,
            rest_scale: pose.scale,
            rest_outline_width: 0.0,
            pose,
            z: Layers::UI_CARDS,
            interactive: true,
            visible: true,
            hovered: false,
            outline: None,
            animator: Animator::new(),
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    pub fn texture(&self) -> &str {
        &self.texture
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn position(&self) -> Vector {
        self.pose.position
    }

    pub fn set_position(&mut self, position: Vector) {
        self.pose.position = position;
    }

    pub fn scale(&self) -> Vector {
        self.pose.scale
    }

    /// Sets the resting scale; hover zoom returns here.
    pub fn set_scale(&mut self, scale: f32) {
        self.pose.scale = Vector::new(scale, scale);
        self.rest_scale = self.pose.scale;
    }

    pub fn angle(&self) -> f32 {
        self.pose.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.pose.angle = angle;
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn outline_color(&self) -> Option<u32> {
        self.outline
    }

    pub fn is_outlined(&self) -> bool {
        self.outline.is_some()
    }

    /// Turns the outline effect on. Repeating the call with the same colour changes nothing.
    pub fn outline(&mut self, color: Option<u32>) {
        self.outline = Some(color.unwrap_or(Palette::BRIGHT));
    }

    pub fn unoutline(&mut self) {
        self.outline = None;
    }

    pub fn outline_width(&self) -> f32 {
        self.pose.outline_width
    }

    /// Width to hand to the renderer; never exactly zero.
    pub fn render_outline_width(&self) -> f32 {
        self.pose.outline_width.max(MIN_OUTLINE_WIDTH)
    }

    /// Queue a transition. It starts once every transition queued before it has finished.
    pub fn animate(&mut self, tween: Tween) {
        self.animator.push(tween);
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Zoom in and outline. Extra hover-ins while already hovered are ignored.
    pub fn hover_in(&mut self) {
        if self.hovered {
            return;
        }
        self.hovered = true;
        self.outline(None);
        self.z = Layers::INTERACTION;
        let zoom = self.rest_scale * (self.style.zoom_scale / self.style.default_scale);
        // only the newest hover target matters; stale ones would make the zoom lag the pointer
        self.animator.replace_pending(Tween::to(
            PoseChange { scale: Some(zoom), ..Default::default() }.with_outline_width(self.style.hover_outline_width),
            self.style.hover_duration,
        ));
    }

    /// Undo `hover_in`, animating back to the resting scale and outline width.
    pub fn hover_out(&mut self) {
        if !self.hovered {
            return;
        }
        self.hovered = false;
        self.unoutline();
        self.z = Layers::UI_CARDS;
        // only the newest hover target matters; stale ones would make the zoom lag the pointer
        self.animator.replace_pending(Tween::to(
            PoseChange { scale: Some(self.rest_scale), ..Default::default() }.with_outline_width(self.rest_outline_width),
            self.style.hover_duration,
        ));
    }

    /// Advance running transitions by `dt` milliseconds
    pub fn update(&mut self, dt: f32) {
        self.animator.update(&mut self.pose, dt);
    }

    /// On-screen size, accounting for scale and rotation
    pub fn size(&self) -> Vector {
        let scaled = Vector::new(
            self.style.texture_size[0] * self.pose.scale.x.abs(),
            self.style.texture_size[1] * self.pose.scale.y.abs(),
        );
        oriented(scaled, self.pose.angle)
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new_sized(self.size()).with_center(self.pose.position)
    }

    pub fn contains(&self, point: Vector) -> bool {
        self.bounds().contains(point)
    }

    /// Seat the card inside `area`: centred, turned to `angle`, scaled down to fit, hover and
    /// transitions dropped, and no longer interactive on its own.
    pub fn fit_into(&mut self, area: Rectangle, angle: f32) {
        self.animator.clear();
        self.hovered = false;
        self.unoutline();
        self.z = Layers::UI_CARDS;
        self.interactive = false;
        self.visible = true;

        let face = oriented(self.style.texture_size(), angle);
        let scale = (area.size.x / face.x).min(area.size.y / face.y);
        self.set_scale(scale);
        self.pose.outline_width = 0.0;
        self.rest_outline_width = 0.0;
        self.pose.angle = angle;
        self.pose.position = area.center();
    }
}
