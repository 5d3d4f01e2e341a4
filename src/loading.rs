use derivative::*;
use futures::Async;
use itertools::Itertools;
use log::{error, info, warn};
use quicksilver::combinators::{join_all, Join, JoinAll};
use quicksilver::geom::{Rectangle, Vector};
use quicksilver::graphics::{Font, FontStyle, Image};
use quicksilver::lifecycle::Window;
use quicksilver::load_file;
use quicksilver::prelude::{Circle, Col};
use quicksilver::Error as QuicksilverError;
use quicksilver::Future;
use serde_derive::*;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::mem::take;
use std::rc::Rc;

use crate::automaton::{AutomatonState, GameEndedState, GameEvent};
use crate::card::CardStyle;
use crate::card_target::Orientation;
use crate::error::BoardError;
use crate::game_control::TableState;
use crate::game_objects::{CardType, Side};
use crate::palette::Palette;

pub const LAYOUT_FILE: &str = "board.json";

/// Rendered labels kept around; scores change without bound, so older ones get dropped
const TEXT_CACHE_LIMIT: usize = 64;

const BUILTIN_LAYOUT: &[u8] = include_bytes!("../static/board.json");

/// A point given as a fraction of the window plus a pixel offset
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct Placement {
    pub at: [f32; 2],
    pub offset: [f32; 2],
}

impl Placement {
    pub fn resolve(&self, window: Vector) -> Vector {
        Vector::new(
            window.x * self.at[0] + self.offset[0],
            window.y * self.at[1] + self.offset[1],
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SlotLayout {
    pub name: String,
    pub side: Side,
    pub accepts: Vec<CardType>,
    #[serde(flatten)]
    pub placement: Placement,
    #[serde(default)]
    pub orientation: Orientation,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AreaLayout {
    pub side: Side,
    #[serde(flatten)]
    pub placement: Placement,
    /// Fraction of the window
    pub size: [f32; 2],
}

impl AreaLayout {
    pub fn resolve(&self, window: Vector) -> Rectangle {
        Rectangle::new(
            self.placement.resolve(window),
            Vector::new(window.x * self.size[0], window.y * self.size[1]),
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct SidePlacements {
    pub player: Placement,
    pub opponent: Placement,
}

impl SidePlacements {
    pub fn get(&self, side: Side) -> Placement {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TurnIndicatorLayout {
    #[serde(flatten)]
    pub placement: Placement,
    pub size: [f32; 2],
    pub player_texture: String,
    pub opponent_texture: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DealtCard {
    pub texture: String,
    pub card_type: CardType,
    pub position: [f32; 2],
}

/// Everything about the table that isn't code: sizes, slots, lines, assets
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BoardLayout {
    pub window: [f32; 2],
    #[serde(default)]
    pub card: CardStyle,
    pub starting_power_points: i32,
    pub slot_texture: String,
    /// Font family -> file
    pub fonts: HashMap<String, String>,
    pub score_font: String,
    pub phase_font: String,
    pub slots: Vec<SlotLayout>,
    #[serde(default)]
    pub guide_lines: Vec<Vec<String>>,
    #[serde(default)]
    pub ready_areas: Vec<AreaLayout>,
    pub scores: SidePlacements,
    pub phases: SidePlacements,
    pub turn_indicator: TurnIndicatorLayout,
    #[serde(default)]
    pub dealt: Vec<DealtCard>,
}

impl BoardLayout {
    pub fn from_json(bytes: &[u8]) -> Result<Self, BoardError> {
        let layout: BoardLayout = serde_json::from_slice(bytes)?;
        layout.validate()?;
        Ok(layout)
    }

    /// The stock table, compiled into the binary
    pub fn builtin() -> Result<Self, BoardError> {
        Self::from_json(BUILTIN_LAYOUT)
    }

    pub fn validate(&self) -> Result<(), BoardError> {
        let [w, h] = self.window;
        if w <= 0.0 || h <= 0.0 {
            return Err(BoardError::BadWindowSize(w, h));
        }

        let mut names = HashSet::new();
        for slot in &self.slots {
            if slot.accepts.is_empty() {
                return Err(BoardError::NoAcceptedTypes(slot.name.clone()));
            }
            if !names.insert(slot.name.as_str()) {
                return Err(BoardError::DuplicateSlot(slot.name.clone()));
            }
        }

        if let Some(unknown) = self.guide_lines.iter().flatten().find(|n| !names.contains(n.as_str())) {
            return Err(BoardError::UnknownSlot(unknown.clone()));
        }

        Ok(())
    }

    pub fn window_size(&self) -> Vector {
        Vector::new(self.window[0], self.window[1])
    }

    /// Every image the table draws, each listed once
    pub fn image_names(&self) -> Vec<String> {
        std::iter::once(&self.slot_texture)
            .chain(std::iter::once(&self.turn_indicator.player_texture))
            .chain(std::iter::once(&self.turn_indicator.opponent_texture))
            .chain(self.dealt.iter().map(|d| &d.texture))
            .unique()
            .cloned()
            .collect()
    }

    pub fn font_names(&self) -> Vec<String> {
        self.fonts.keys().sorted().cloned().collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TextKey {
    family: String,
    text: String,
    size: u32,
    color: u32,
}

/// Bounded map of rendered labels. Once full, the oldest entry makes room for the new one.
#[derive(Debug)]
struct TextCache<T> {
    entries: HashMap<TextKey, Rc<T>>,
    order: VecDeque<TextKey>,
    limit: usize,
}

impl<T> Default for TextCache<T> {
    fn default() -> Self {
        Self::with_limit(TEXT_CACHE_LIMIT)
    }
}

impl<T> TextCache<T> {
    fn with_limit(limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            limit,
        }
    }

    fn get(&self, key: &TextKey) -> Option<Rc<T>> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: TextKey, value: Rc<T>) {
        if self.entries.insert(key.clone(), value).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.limit {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct Assets {
    #[derivative(Debug = "ignore")]
    pub fonts: HashMap<String, Box<Font>>, // keyed by family name
    pub images: HashMap<String, Rc<Image>>,
    #[derivative(Debug = "ignore")]
    text_cache: RefCell<TextCache<Image>>,
}

impl Assets {
    pub fn new(fonts: HashMap<String, Box<Font>>, images: HashMap<String, Rc<Image>>) -> Self {
        Self {
            fonts,
            images,
            text_cache: RefCell::new(TextCache::default()),
        }
    }

    pub fn image(&self, name: &str) -> Option<&Rc<Image>> {
        self.images.get(name)
    }

    /// Rendered `text`. Recent labels are reused rather than rasterised again.
    pub fn text(&self, family: &str, text: &str, size: f32, color: u32) -> quicksilver::Result<Rc<Image>> {
        let key = TextKey {
            family: family.to_string(),
            text: text.to_string(),
            size: size.round() as u32,
            color,
        };
        if let Some(image) = self.text_cache.borrow().get(&key) {
            return Ok(image);
        }

        let font = self
            .fonts
            .get(family)
            .ok_or_else(|| QuicksilverError::ContextError(format!("font family {} is not loaded", family)))?;
        let image = Rc::new(font.render(text, &FontStyle::new(size, Palette::color(color)))?);
        self.text_cache.borrow_mut().insert(key, image.clone());
        Ok(image)
    }
}

type FontFuture = Box<dyn Future<Item = Font, Error = QuicksilverError>>;
type ImageFuture = Box<dyn Future<Item = Image, Error = QuicksilverError>>;

/// Reads the layout file, then loads every font and image it names, then hands over to the table.
#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct LoadingState {
    layout: Option<BoardLayout>,
    image_names: Vec<String>,
    font_names: Vec<String>,
    #[derivative(Debug = "ignore")]
    layout_file: Option<Box<dyn Future<Item = Vec<u8>, Error = QuicksilverError>>>,
    #[derivative(Debug = "ignore")]
    loading: Option<Join<JoinAll<Vec<FontFuture>>, JoinAll<Vec<ImageFuture>>>>,
}

impl LoadingState {
    pub fn new() -> Box<Self> {
        Box::new(Self {
            layout_file: Some(Box::new(load_file(LAYOUT_FILE))),
            ..Default::default()
        })
    }

    fn start_assets(&mut self, layout: BoardLayout) {
        self.font_names = layout.font_names();
        self.image_names = layout.image_names();
        info!("Loading fonts {:?} and images {:?}", self.font_names, self.image_names);

        let fonts = self
            .font_names
            .iter()
            .filter_map(|family| layout.fonts.get(family))
            .map(|file| Box::new(Font::load(file.clone())) as FontFuture)
            .collect::<Vec<_>>();
        let images = self
            .image_names
            .iter()
            .map(|name| Box::new(Image::load(name.clone())) as ImageFuture)
            .collect::<Vec<_>>();

        self.loading = Some(join_all(fonts).join(join_all(images)));
        self.layout = Some(layout);
    }

    fn poll_layout(&mut self) -> Result<bool, BoardError> {
        let polled = match self.layout_file.as_mut() {
            Some(file) => file.poll(),
            None => return Ok(true),
        };

        let layout = match polled {
            Ok(Async::NotReady) => return Ok(false),
            Ok(Async::Ready(bytes)) => match BoardLayout::from_json(&bytes) {
                Ok(layout) => layout,
                Err(e) => {
                    warn!("{} is unusable ({}), falling back to the built-in table", LAYOUT_FILE, e);
                    BoardLayout::builtin()?
                }
            },
            Err(e) => {
                warn!("can't read {} ({:?}), falling back to the built-in table", LAYOUT_FILE, e);
                BoardLayout::builtin()?
            }
        };
        info!("Board layout ready: {} slots", layout.slots.len());

        self.layout_file = None;
        self.start_assets(layout);
        Ok(true)
    }
}

impl AutomatonState for LoadingState {
    fn event(&mut self, _event: GameEvent) -> Box<dyn AutomatonState> {
        Box::new(take(self))
    }

    fn update(&mut self, _dt: f32) -> Box<dyn AutomatonState> {
        match self.poll_layout() {
            Ok(true) => (),
            Ok(false) => return Box::new(take(self)),
            Err(e) => {
                error!("no usable board layout: {}", e);
                return Box::new(GameEndedState);
            }
        }

        let result = match self.loading.as_mut() {
            Some(loading) => loading.poll(),
            None => return Box::new(take(self)),
        };
        match result {
            Ok(Async::Ready((mut fonts, mut images))) => {
                let loaded_fonts = self.font_names.drain(..).zip(fonts.drain(..).map(Box::new)).collect();
                let loaded_images = self.image_names.drain(..).zip(images.drain(..).map(Rc::new)).collect();
                info!("Assets loaded");

                let layout = take(&mut self.layout).unwrap_or_default();
                match TableState::new(layout, Assets::new(loaded_fonts, loaded_images)) {
                    Ok(table) => table,
                    Err(e) => {
                        error!("can't set up the board: {}", e);
                        Box::new(GameEndedState)
                    }
                }
            }
            Ok(Async::NotReady) => Box::new(take(self)),
            Err(e) => {
                error!("can't load assets: {:?}", e);
                Box::new(GameEndedState)
            }
        }
    }

    fn draw(&self, window: &mut Window) {
        window.draw(&Circle::new((300, 300), 32), Col(Palette::color(Palette::HIGHLIGHT)));
    }
}
