use quicksilver::geom::{Line, Rectangle, Shape, Transform, Vector};
use quicksilver::graphics::Background::{Blended, Col, Img};
use quicksilver::lifecycle::Window;
use quicksilver::Result;

use crate::animation::{Animator, Ease, Pose, PoseChange, Tween};
use crate::automaton::GameEvent;
use crate::game_objects::{Phase, Side};
use crate::loading::Assets;
use crate::palette::{Layers, Palette};

const SCORE_FONT_SIZE: f32 = 32.0;
const PHASE_FONT_SIZE: f32 = 22.0;
const PHASE_LINE_HEIGHT: f32 = 28.0;
const PHASE_WIDTH: f32 = 160.0;
const PHASE_SCROLL_MS: f32 = 300.0;
const FLIP_HALF_MS: f32 = 150.0;

pub trait Widget: std::fmt::Debug {
    fn bounding_box(&self) -> Rectangle;
    /// Event raised by a click at `point`, if the widget reacts to clicks there
    fn maybe_activate(&self, point: Vector) -> Option<GameEvent>;
    fn update(&mut self, _dt: f32) {}
    fn draw(&self, window: &mut Window, assets: &Assets) -> Result<()>;
}

/// Draws the outline of `area` with lines `width` thick
pub fn draw_frame(window: &mut Window, area: &Rectangle, width: f32, color: u32, z: f32) {
    let color = Palette::color(color);
    let tl = area.pos;
    let tr = area.pos + Vector::new(area.size.x, 0.0f32);
    let br = area.pos + area.size;
    let bl = area.pos + Vector::new(0.0f32, area.size.y);
    for (a, b) in &[(tl, tr), (tr, br), (br, bl), (bl, tl)] {
        window.draw_ex(&Line::new(*a, *b).with_thickness(width), Col(color), Transform::IDENTITY, z);
    }
}

/// Power points of one side, shown as a bare number
#[derive(Debug, Default)]
pub struct ScoreCounter {
    side: Side,
    value: i32,
    position: Vector,
    font: String,
}

impl ScoreCounter {
    pub fn new(side: Side, value: i32, position: Vector, font: &str) -> Self {
        Self {
            side,
            value,
            position,
            font: font.to_string(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// No clamping: the counter happily goes negative.
    pub fn add(&mut self, delta: i32) {
        self.value += delta;
    }

    pub fn text(&self) -> String {
        format!("{}", self.value)
    }
}

impl Widget for ScoreCounter {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.position, Vector::new(SCORE_FONT_SIZE * 2.0, SCORE_FONT_SIZE * 1.25))
    }

    fn maybe_activate(&self, _point: Vector) -> Option<GameEvent> {
        None
    }

    fn draw(&self, window: &mut Window, assets: &Assets) -> Result<()> {
        let image = assets.text(&self.font, &self.text(), SCORE_FONT_SIZE, Palette::HIGHLIGHT)?;
        window.draw_ex(&image.area().translate(self.position), Img(&*image), Transform::IDENTITY, Layers::UI_BACKGROUND);
        Ok(())
    }
}

/// Two lines of text: the current phase and the one after it.
/// Rotating scrolls the lines up by one; rotations requested mid-scroll are ignored.
#[derive(Debug, Default)]
pub struct PhaseIndicator {
    side: Side,
    current: Phase,
    previous: Phase,
    position: Vector,
    font: String,
    // position.y carries the scroll offset, from one line height down to 0
    scroll: Pose,
    animator: Animator,
}

impl PhaseIndicator {
    pub fn new(side: Side, position: Vector, font: &str) -> Self {
        Self {
            side,
            current: Phase::Draw,
            previous: Phase::Draw,
            position,
            font: font.to_string(),
            scroll: Pose::new(Vector::ZERO, 1.0),
            animator: Animator::new(),
        }
    }

    pub fn current(&self) -> Phase {
        self.current
    }

    pub fn upcoming(&self) -> Phase {
        self.current.next()
    }

    pub fn is_rotating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Advance to the next phase. Returns false, changing nothing, while the previous rotation still plays.
    pub fn rotate(&mut self) -> bool {
        if self.is_rotating() {
            return false;
        }
        self.previous = self.current;
        self.current = self.current.next();
        self.scroll.position = Vector::new(0.0f32, PHASE_LINE_HEIGHT);
        self.animator.push(Tween::to(PoseChange::position(Vector::ZERO), PHASE_SCROLL_MS));
        true
    }

    fn draw_line(&self, window: &mut Window, assets: &Assets, phase: Phase, y: f32, color: u32) -> Result<()> {
        let image = assets.text(&self.font, &phase.to_string(), PHASE_FONT_SIZE, color)?;
        let area = image.area().translate(self.position + Vector::new(0.0f32, y));
        window.draw_ex(&area, Img(&*image), Transform::IDENTITY, Layers::UI_BACKGROUND);
        Ok(())
    }
}

impl Widget for PhaseIndicator {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.position, Vector::new(PHASE_WIDTH, PHASE_LINE_HEIGHT * 2.0))
    }

    fn maybe_activate(&self, point: Vector) -> Option<GameEvent> {
        if self.bounding_box().contains(point) {
            Some(GameEvent::RotatePhase(self.side))
        } else {
            None
        }
    }

    fn update(&mut self, dt: f32) {
        self.animator.update(&mut self.scroll, dt);
    }

    fn draw(&self, window: &mut Window, assets: &Assets) -> Result<()> {
        let offset = self.scroll.position.y;
        // halfway through the scroll the outgoing line leaves and the next-but-one hasn't arrived yet
        if offset > PHASE_LINE_HEIGHT / 2.0 {
            self.draw_line(window, assets, self.previous, offset - PHASE_LINE_HEIGHT, Palette::DIM)?;
        }
        self.draw_line(window, assets, self.current, offset, Palette::BRIGHT)?;
        if offset < PHASE_LINE_HEIGHT / 2.0 {
            self.draw_line(window, assets, self.upcoming(), offset + PHASE_LINE_HEIGHT, Palette::DIM)?;
        }
        draw_frame(window, &self.bounding_box(), 1.0, Palette::BACKGROUND_HIGHLIGHT, Layers::UI_BACKGROUND);
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum FlipCue {
    SwapFace,
}

/// Faction sigil of the side whose turn it is. Flipping squashes it to nothing and back, swapping
/// the face halfway.
#[derive(Debug, Default)]
pub struct TurnIndicator {
    showing: Side,
    // the side shown once the running flip completes
    target: Side,
    size: Vector,
    pose: Pose,
    player_texture: String,
    opponent_texture: String,
    animator: Animator<FlipCue>,
}

impl TurnIndicator {
    pub fn new(position: Vector, size: Vector, player_texture: &str, opponent_texture: &str) -> Self {
        Self {
            showing: Side::Opponent,
            target: Side::Opponent,
            size,
            pose: Pose::new(position, 1.0),
            player_texture: player_texture.to_string(),
            opponent_texture: opponent_texture.to_string(),
            animator: Animator::new(),
        }
    }

    pub fn showing(&self) -> Side {
        self.showing
    }

    pub fn is_flipping(&self) -> bool {
        self.animator.is_animating()
    }

    /// Start a flip to the other side. Ignored while a flip is under way.
    pub fn flip(&mut self) -> bool {
        if self.is_flipping() {
            return false;
        }
        self.target = match self.showing {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        };
        self.animator.push(
            Tween::to(PoseChange::scale_x(&self.pose, 0.0), FLIP_HALF_MS)
                .ease(Ease::Linear)
                .cue(FlipCue::SwapFace),
        );
        self.animator.push(Tween::to(PoseChange::scale_x(&self.pose, 1.0), FLIP_HALF_MS).ease(Ease::Linear));
        true
    }

    fn texture(&self) -> &str {
        match self.showing {
            Side::Player => &self.player_texture,
            Side::Opponent => &self.opponent_texture,
        }
    }
}

impl Widget for TurnIndicator {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new_sized(self.size).with_center(self.pose.position)
    }

    fn maybe_activate(&self, point: Vector) -> Option<GameEvent> {
        if self.bounding_box().contains(point) {
            Some(GameEvent::FlipTurn)
        } else {
            None
        }
    }

    fn update(&mut self, dt: f32) {
        for cue in self.animator.update(&mut self.pose, dt) {
            match cue {
                FlipCue::SwapFace => self.showing = self.target,
            }
        }
    }

    fn draw(&self, window: &mut Window, assets: &Assets) -> Result<()> {
        let squashed = Vector::new(self.size.x * self.pose.scale.x, self.size.y * self.pose.scale.y);
        let area = Rectangle::new_sized(squashed).with_center(self.pose.position);
        if let Some(image) = assets.image(self.texture()) {
            window.draw_ex(&area, Img(&**image), Transform::IDENTITY, Layers::UI_BACKGROUND);
        }
        Ok(())
    }
}

/// Lines joining carriers and nav points
#[derive(Debug, Default)]
pub struct GuideLines {
    segments: Vec<(Vector, Vector)>,
}

impl GuideLines {
    /// Consecutive points of each stroke are joined; strokes are not joined to each other.
    pub fn from_strokes(strokes: &[Vec<Vector>]) -> Self {
        let segments = strokes
            .iter()
            .flat_map(|stroke| stroke.windows(2).map(|pair| (pair[0], pair[1])))
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[(Vector, Vector)] {
        &self.segments
    }
}

impl Widget for GuideLines {
    fn bounding_box(&self) -> Rectangle {
        if self.segments.is_empty() {
            return Rectangle::new_sized(Vector::ZERO);
        }
        let points = self.segments.iter().flat_map(|(a, b)| vec![*a, *b]);
        let (min_x, max_x, min_y, max_y) = points.fold(
            (std::f32::MAX, std::f32::MIN, std::f32::MAX, std::f32::MIN),
            |(x0, x1, y0, y1), p| (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
        );
        Rectangle::new(Vector::new(min_x, min_y), Vector::new(max_x - min_x, max_y - min_y))
    }

    fn maybe_activate(&self, _point: Vector) -> Option<GameEvent> {
        None
    }

    fn draw(&self, window: &mut Window, _assets: &Assets) -> Result<()> {
        let color = Palette::color(Palette::BACKGROUND_HIGHLIGHT);
        for (a, b) in &self.segments {
            window.draw_ex(&Line::new(*a, *b).with_thickness(3.0), Col(color), Transform::IDENTITY, Layers::BACKGROUND);
        }
        Ok(())
    }
}

/// Framed area where a side lines up its ready cards
#[derive(Debug)]
pub struct ReadyArea {
    pub side: Side,
    pub area: Rectangle,
}

impl Widget for ReadyArea {
    fn bounding_box(&self) -> Rectangle {
        self.area
    }

    fn maybe_activate(&self, _point: Vector) -> Option<GameEvent> {
        None
    }

    fn draw(&self, window: &mut Window, _assets: &Assets) -> Result<()> {
        draw_frame(window, &self.area, 4.0, Palette::BACKGROUND_HIGHLIGHT, Layers::UI_BACKGROUND);
        Ok(())
    }
}

/// Draws `image` stretched over `area`, turned by `angle` degrees, faded to `alpha`
pub fn draw_image(window: &mut Window, image: &quicksilver::graphics::Image, area: &Rectangle, angle: f32, alpha: f32, z: f32) {
    let transform = Transform::rotate(angle);
    if alpha >= 1.0 {
        window.draw_ex(area, Img(image), transform, z);
    } else {
        window.draw_ex(area, Blended(image, Palette::color_alpha(0xFFFFFF, alpha)), transform, z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_counter_accumulates_without_clamping() {
        let mut score = ScoreCounter::new(Side::Player, 30, Vector::ZERO, "Audiowide");
        score.add(-5);
        assert_eq!(score.value(), 25);
        score.add(-40);
        score.add(3);
        assert_eq!(score.value(), -12);
        assert_eq!(score.text(), "-12");
    }

    #[test]
    fn phase_rotation_is_guarded_while_scrolling() {
        let mut phase = PhaseIndicator::new(Side::Player, Vector::ZERO, "Open Sans");
        assert!(phase.rotate());
        assert_eq!(phase.current(), Phase::Muster);
        assert!(!phase.rotate());
        assert_eq!(phase.current(), Phase::Muster);
        phase.update(PHASE_SCROLL_MS);
        assert!(!phase.is_rotating());
        assert!(phase.rotate());
        assert_eq!(phase.current(), Phase::Scramble);
        assert_eq!(phase.upcoming(), Phase::Movement);
    }

    #[test]
    fn six_rotations_return_to_draw() {
        let mut phase = PhaseIndicator::new(Side::Opponent, Vector::ZERO, "Open Sans");
        for _ in 0..6 {
            assert!(phase.rotate());
            phase.update(1000.0);
        }
        assert_eq!(phase.current(), Phase::Draw);
    }

    #[test]
    fn turn_indicator_swaps_face_halfway() {
        let mut turn = TurnIndicator::new(Vector::new(50, 50), Vector::new(96, 96), "confed.png", "kilrathi.png");
        assert_eq!(turn.showing(), Side::Opponent);
        assert!(turn.flip());
        assert!(!turn.flip());

        turn.update(FLIP_HALF_MS - 1.0);
        assert_eq!(turn.showing(), Side::Opponent);
        turn.update(2.0);
        assert_eq!(turn.showing(), Side::Player);
        assert!(turn.is_flipping());

        turn.update(FLIP_HALF_MS);
        assert!(!turn.is_flipping());
        assert_eq!(turn.pose.scale.x, 1.0);
        assert_eq!(turn.texture(), "confed.png");
    }

    #[test]
    fn guide_strokes_split_into_segments() {
        let a = Vector::new(0, 0);
        let b = Vector::new(10, 0);
        let c = Vector::new(10, 10);
        let lines = GuideLines::from_strokes(&[vec![a, b, c], vec![c, a]]);
        assert_eq!(lines.segments(), &[(a, b), (b, c), (c, a)]);
        assert_eq!(lines.bounding_box(), Rectangle::new(a, c));
    }
}
