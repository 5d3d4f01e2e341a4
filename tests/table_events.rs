use ccg_board::automaton::GameEvent;
use ccg_board::game_control::GameContext;
use ccg_board::game_objects::{Phase, Side};
use ccg_board::loading::BoardLayout;
use quicksilver::geom::Vector;
use quicksilver::input::{ButtonState, MouseButton};
use quicksilver::lifecycle::Event;

fn table() -> GameContext {
    GameContext::new(&BoardLayout::builtin().unwrap()).unwrap()
}

fn click(ctx: &mut GameContext, at: Vector) {
    ctx.handle(GameEvent::IO(Event::MouseMoved(at)));
    ctx.handle(GameEvent::IO(Event::MouseButton(MouseButton::Left, ButtonState::Pressed)));
    ctx.handle(GameEvent::IO(Event::MouseButton(MouseButton::Left, ButtonState::Released)));
}

#[test]
fn six_rotations_come_back_to_draw() {
    let mut ctx = table();
    let mut seen = vec![ctx.ui.phase(Side::Opponent)];
    for _ in 0..6 {
        ctx.handle(GameEvent::RotatePhase(Side::Opponent));
        ctx.update(500.0);
        seen.push(ctx.ui.phase(Side::Opponent));
    }
    assert_eq!(&seen[..6], &Phase::CYCLE[..]);
    assert_eq!(seen[6], Phase::Draw);
    assert_eq!(ctx.ui.phase(Side::Player), Phase::Draw);
}

#[test]
fn rotation_during_the_scroll_is_ignored() {
    let mut ctx = table();
    ctx.handle(GameEvent::RotatePhase(Side::Player));
    ctx.update(50.0);
    ctx.handle(GameEvent::RotatePhase(Side::Player));
    assert_eq!(ctx.ui.phase(Side::Player), Phase::Muster);

    ctx.update(500.0);
    ctx.handle(GameEvent::RotatePhase(Side::Player));
    assert_eq!(ctx.ui.phase(Side::Player), Phase::Scramble);
}

#[test]
fn clicking_the_phase_indicator_rotates_it() {
    let mut ctx = table();
    let window = ctx.ui.window();
    click(&mut ctx, Vector::new(window.x * 0.02 + 10.0, window.y * 0.52 + 10.0));
    assert_eq!(ctx.ui.phase(Side::Player), Phase::Muster);
    assert!(!ctx.input.is_dragging());
}

#[test]
fn power_points_accumulate_unclamped() {
    let mut ctx = table();
    ctx.handle(GameEvent::PowerPoints(Side::Player, -5));
    assert_eq!(ctx.ui.power_points(Side::Player), 25);
    ctx.handle(GameEvent::PowerPoints(Side::Player, -30));
    assert_eq!(ctx.ui.power_points(Side::Player), -5);
    ctx.handle(GameEvent::PowerPoints(Side::Opponent, 12));
    assert_eq!(ctx.ui.power_points(Side::Opponent), 42);
}

#[test]
fn turn_flips_once_per_animation() {
    let mut ctx = table();
    assert_eq!(ctx.ui.turn(), Side::Opponent);
    ctx.handle(GameEvent::FlipTurn);
    ctx.handle(GameEvent::FlipTurn);
    ctx.update(1000.0);
    assert_eq!(ctx.ui.turn(), Side::Player);

    ctx.handle(GameEvent::FlipTurn);
    ctx.update(1000.0);
    assert_eq!(ctx.ui.turn(), Side::Opponent);
}

#[test]
fn quit_closes_the_table() {
    let mut ctx = table();
    assert!(ctx.handle(GameEvent::FlipTurn));
    assert!(!ctx.handle(GameEvent::Quit));
}

#[test]
fn card_over_a_widget_takes_the_click() {
    let mut ctx = table();
    // the dealt ship's corner covers the turn sigil here
    let corner = Vector::new(115, 320);
    let ship = ctx.board.card_at(corner).unwrap();
    assert!(ctx.ui.click(corner).is_some());

    ctx.handle(GameEvent::IO(Event::MouseMoved(corner)));
    ctx.handle(GameEvent::IO(Event::MouseButton(MouseButton::Left, ButtonState::Pressed)));
    assert_eq!(ctx.input.session().map(|s| s.card()), Some(ship));
    ctx.update(1000.0);
    assert_eq!(ctx.ui.turn(), Side::Opponent);
}
