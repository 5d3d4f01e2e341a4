use itertools::Itertools;
use quicksilver::geom::{Rectangle, Shape, Transform};
use quicksilver::graphics::Background::Col;
use quicksilver::lifecycle::Window;

use super::widgets::{draw_frame, draw_image};
use crate::card::{oriented, Card};
use crate::card_target::CardTarget;
use crate::loading::Assets;
use crate::palette::{Layers, Palette};

const SLOT_BORDER_WIDTH: f32 = 3.0;
const EMPTY_SLOT_ALPHA: f32 = 0.25;
const PREVIEW_ALPHA: f32 = 0.75;

/// Upright rectangle that, turned by `angle`, covers `bounds`
fn face_area(bounds: &Rectangle, angle: f32) -> Rectangle {
    Rectangle::new_sized(oriented(bounds.size, angle)).with_center(bounds.center())
}

fn draw_texture(window: &mut Window, assets: &Assets, texture: &str, bounds: &Rectangle, angle: f32, alpha: f32, z: f32) {
    let area = face_area(bounds, angle);
    match assets.image(texture) {
        Some(image) => draw_image(window, image, &area, angle, alpha, z),
        // not in the layout's asset list; keep the card visible anyway
        None => window.draw_ex(&area, Col(Palette::color_alpha(Palette::DIM, alpha)), Transform::rotate(angle), z),
    }
}

pub fn draw_card(window: &mut Window, assets: &Assets, card: &Card) {
    if !card.is_visible() {
        return;
    }
    let bounds = card.bounds();
    draw_texture(window, assets, card.texture(), &bounds, card.angle(), 1.0, card.z());
    if let Some(color) = card.outline_color() {
        draw_frame(window, &bounds, card.render_outline_width(), color, card.z());
    }
}

/// Free cards, lowest layer first
pub fn draw_cards(window: &mut Window, assets: &Assets, cards: &[Card]) {
    let by_layer = cards
        .iter()
        .sorted_by(|a, b| a.z().partial_cmp(&b.z()).unwrap_or(std::cmp::Ordering::Equal));
    for card in by_layer {
        draw_card(window, assets, card);
    }
}

/// Slots with their border, held card or hover preview. Empty slots show a faint `slot_texture`.
pub fn draw_targets(window: &mut Window, assets: &Assets, targets: &[CardTarget], slot_texture: &str) {
    for target in targets {
        let bounds = target.bounds();
        let angle = target.orientation().angle();

        match (target.card(), target.preview()) {
            (Some(card), _) => draw_card(window, assets, card),
            (None, Some(preview)) => {
                draw_texture(window, assets, &preview.texture, &bounds, angle, PREVIEW_ALPHA, Layers::UI_CARDS)
            }
            (None, None) => draw_texture(window, assets, slot_texture, &bounds, angle, EMPTY_SLOT_ALPHA, Layers::UI_BACKGROUND),
        }

        draw_frame(window, &bounds, SLOT_BORDER_WIDTH, target.border_color(), Layers::UI_BACKGROUND);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicksilver::geom::Vector;

    #[test]
    fn sideways_face_area_is_upright() {
        let slot = Rectangle::new_sized(Vector::new(262.5f32, 187.5f32)).with_center(Vector::new(640, 400));
        let face = face_area(&slot, 90.0);
        assert_eq!(face.size, Vector::new(187.5f32, 262.5f32));
        assert_eq!(face.center(), slot.center());
    }
}
