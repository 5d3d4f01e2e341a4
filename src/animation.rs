//! Property transitions for board entities.
//!
//! Every animated entity owns one `Animator`. Transitions are queued and played strictly one after
//! another; the frame loop drains them through `Animator::update`.

use quicksilver::geom::Vector;
use std::collections::VecDeque;

/// The animatable properties of a node
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub position: Vector,
    pub scale: Vector,
    /// Degrees, clockwise
    pub angle: f32,
    pub outline_width: f32,
}

impl Pose {
    pub fn new(position: Vector, scale: f32) -> Self {
        Self {
            position,
            scale: Vector::new(scale, scale),
            angle: 0.0,
            outline_width: 0.0,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::new(Vector::ZERO, 1.0)
    }
}

/// Target values of a transition. Fields left as None are not touched.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct PoseChange {
    pub position: Option<Vector>,
    pub scale: Option<Vector>,
    pub angle: Option<f32>,
    pub outline_width: Option<f32>,
}

impl PoseChange {
    pub fn scale(scale: f32) -> Self {
        Self { scale: Some(Vector::new(scale, scale)), ..Default::default() }
    }

    pub fn scale_x(from: &Pose, x: f32) -> Self {
        Self { scale: Some(Vector::new(x, from.scale.y)), ..Default::default() }
    }

    pub fn position(position: Vector) -> Self {
        Self { position: Some(position), ..Default::default() }
    }

    pub fn with_outline_width(mut self, width: f32) -> Self {
        self.outline_width = Some(width);
        self
    }

    /// Interpolated pose at progress `t` (0..=1). At `t >= 1` the targets are returned exactly.
    pub fn lerp(&self, from: &Pose, t: f32) -> Pose {
        Pose {
            position: self.position.map_or(from.position, |to| lerp_vector(from.position, to, t)),
            scale: self.scale.map_or(from.scale, |to| lerp_vector(from.scale, to, t)),
            angle: self.angle.map_or(from.angle, |to| lerp(from.angle, to, t)),
            outline_width: self.outline_width.map_or(from.outline_width, |to| lerp(from.outline_width, to, t)),
        }
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    if t >= 1.0 {
        to
    } else {
        from + (to - from) * t
    }
}

fn lerp_vector(from: Vector, to: Vector, t: f32) -> Vector {
    Vector::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t))
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out
    PowerOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.max(0.0).min(1.0);
        match self {
            Ease::Linear => t,
            Ease::PowerOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::PowerOut
    }
}

/// One queued transition. `cue` is handed back to the owner when the transition completes.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<C = ()> {
    pub change: PoseChange,
    /// Milliseconds
    pub duration: f32,
    pub ease: Ease,
    pub cue: Option<C>,
}

impl<C> Tween<C> {
    pub fn to(change: PoseChange, duration: f32) -> Self {
        Self {
            change,
            duration,
            ease: Ease::default(),
            cue: None,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn cue(mut self, cue: C) -> Self {
        self.cue = Some(cue);
        self
    }
}

#[derive(Debug)]
struct Running<C> {
    tween: Tween<C>,
    from: Pose,
    elapsed: f32,
}

#[derive(Debug)]
pub struct Animator<C = ()> {
    running: Option<Running<C>>,
    pending: VecDeque<Tween<C>>,
}

impl<C> Default for Animator<C> {
    fn default() -> Self {
        Self {
            running: None,
            pending: VecDeque::new(),
        }
    }
}

impl<C: PartialEq> Animator<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `tween` behind whatever is playing. A tween identical to the last queued one is dropped.
    pub fn push(&mut self, tween: Tween<C>) {
        if self.pending.back() == Some(&tween) {
            return;
        }
        self.pending.push_back(tween);
    }

    /// Drop every queued tween and queue `tween` instead. The running one still finishes first.
    pub fn replace_pending(&mut self, tween: Tween<C>) {
        self.pending.clear();
        self.pending.push_back(tween);
    }

    pub fn is_animating(&self) -> bool {
        self.running.is_some() || !self.pending.is_empty()
    }

    pub fn queued(&self) -> usize {
        self.pending.len() + if self.running.is_some() { 1 } else { 0 }
    }

    /// Advance by `dt` milliseconds, writing the interpolated values into `pose`.
    /// Time left over after a transition finishes flows into the next one.
    /// Returns the cues of every transition that finished during this step.
    pub fn update(&mut self, pose: &mut Pose, dt: f32) -> Vec<C> {
        let mut cues = Vec::new();
        let mut budget = dt.max(0.0);

        loop {
            let next = self.running.take().or_else(|| {
                self.pending.pop_front().map(|tween| Running { tween, from: *pose, elapsed: 0.0 })
            });
            let mut running = match next {
                Some(running) => running,
                None => break,
            };

            running.elapsed += budget;
            if running.elapsed < running.tween.duration {
                let t = running.tween.ease.apply(running.elapsed / running.tween.duration);
                *pose = running.tween.change.lerp(&running.from, t);
                self.running = Some(running);
                break;
            }

            budget = running.elapsed - running.tween.duration;
            *pose = running.tween.change.lerp(&running.from, 1.0);
            if let Some(cue) = running.tween.cue {
                cues.push(cue);
            }
        }

        cues
    }

    pub fn clear(&mut self) {
        self.running = None;
        self.pending.clear();
    }
}
