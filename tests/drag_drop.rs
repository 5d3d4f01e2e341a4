use ccg_board::board::CardLocation;
use ccg_board::card_target::BorderState;
use ccg_board::game_control::GameContext;
use ccg_board::game_objects::{CardId, CardType};
use ccg_board::input::{DragState, PointerEvent};
use ccg_board::loading::BoardLayout;
use quicksilver::geom::Vector;

fn table() -> GameContext {
    GameContext::new(&BoardLayout::builtin().unwrap()).unwrap()
}

fn dealt(ctx: &GameContext, card_type: CardType) -> CardId {
    ctx.board.cards().iter().find(|c| c.card_type() == card_type).unwrap().id()
}

fn press(ctx: &mut GameContext, event: PointerEvent) {
    let GameContext { board, input, .. } = ctx;
    input.handle(board, event);
}

#[test]
fn carrier_drops_into_its_slot() {
    let mut ctx = table();
    let carrier = dealt(&ctx, CardType::Carrier);
    let slot = ctx.board.target_by_name("player_carrier").unwrap();
    let (slot_id, slot_center) = (slot.id(), slot.position());

    let start = ctx.board.card(carrier).unwrap().position();
    press(&mut ctx, PointerEvent::Down(start));
    assert!(matches!(ctx.input.state(), DragState::Dragging(s) if s.card() == carrier));
    assert_eq!(ctx.board.target(slot_id).unwrap().border(), BorderState::ValidTarget);
    assert_eq!(ctx.board.target_by_name("nav_c").unwrap().border(), BorderState::InvalidTarget);

    press(&mut ctx, PointerEvent::Move(slot_center));
    let target = ctx.board.target(slot_id).unwrap();
    assert_eq!(target.border(), BorderState::Highlighted);
    assert!(target.preview().is_some());
    assert!(!ctx.board.card(carrier).unwrap().is_visible());

    press(&mut ctx, PointerEvent::Up(slot_center));
    assert!(matches!(ctx.input.state(), DragState::Idle));
    assert_eq!(ctx.board.locate(carrier), Some(CardLocation::InTarget(slot_id)));

    let target = ctx.board.target(slot_id).unwrap();
    let held = target.card().unwrap();
    assert!(held.is_visible());
    assert!(!held.is_interactive());
    assert_eq!(held.position(), slot_center);
    assert!(target.preview().is_none());
    assert!(ctx.board.targets().iter().all(|t| t.border() == BorderState::Normal));
}

#[test]
fn drop_outside_any_slot_cancels() {
    let mut ctx = table();
    let ship = dealt(&ctx, CardType::Ship);
    press(&mut ctx, PointerEvent::Down(Vector::new(200, 200)));
    press(&mut ctx, PointerEvent::Move(Vector::new(260, 230)));
    press(&mut ctx, PointerEvent::Up(Vector::new(260, 230)));

    assert!(matches!(ctx.input.state(), DragState::Idle));
    let card = ctx.board.card(ship).unwrap();
    assert!(card.is_interactive());
    assert!(card.is_visible());
    assert_eq!(card.position(), Vector::new(260, 230));
    assert!(ctx.board.targets().iter().all(|t| t.border() == BorderState::Normal && t.is_empty()));
}

#[test]
fn wrong_slot_does_not_take_the_card() {
    let mut ctx = table();
    let ship = dealt(&ctx, CardType::Ship);
    let nav = ctx.board.target_by_name("nav_c").unwrap().position();

    press(&mut ctx, PointerEvent::Down(Vector::new(200, 200)));
    press(&mut ctx, PointerEvent::Move(nav));
    assert!(ctx.board.target_by_name("nav_c").unwrap().preview().is_none());
    assert!(ctx.board.card(ship).unwrap().is_visible());

    press(&mut ctx, PointerEvent::Up(nav));
    assert_eq!(ctx.board.locate(ship), Some(CardLocation::Free));
    assert!(ctx.board.target_by_name("nav_c").unwrap().is_empty());
}

#[test]
fn release_outside_window_ends_the_drag() {
    let mut ctx = table();
    let nav_card = dealt(&ctx, CardType::NavPoint);
    let start = ctx.board.card(nav_card).unwrap().position();
    let nav = ctx.board.target_by_name("nav_br").unwrap().position();

    press(&mut ctx, PointerEvent::Down(start));
    press(&mut ctx, PointerEvent::Move(nav));
    press(&mut ctx, PointerEvent::UpOutside);

    assert!(matches!(ctx.input.state(), DragState::Idle));
    assert_eq!(ctx.board.locate(nav_card), Some(CardLocation::Free));
    let card = ctx.board.card(nav_card).unwrap();
    assert!(card.is_interactive());
    assert!(card.is_visible());
    assert!(ctx.board.targets().iter().all(|t| t.preview().is_none()));
}

#[test]
fn leaving_a_slot_restores_it() {
    let mut ctx = table();
    let nav_card = dealt(&ctx, CardType::NavPoint);
    let start = ctx.board.card(nav_card).unwrap().position();
    let nav_c = ctx.board.target_by_name("nav_c").unwrap();
    let (nav_c_id, nav_c_pos) = (nav_c.id(), nav_c.position());

    press(&mut ctx, PointerEvent::Down(start));
    press(&mut ctx, PointerEvent::Move(nav_c_pos));
    assert_eq!(ctx.input.session().unwrap().hovered(), Some(nav_c_id));

    press(&mut ctx, PointerEvent::Move(Vector::new(10, 10)));
    let slot = ctx.board.target(nav_c_id).unwrap();
    assert_eq!(slot.border(), BorderState::ValidTarget);
    assert!(slot.preview().is_none());
    assert!(ctx.board.card(nav_card).unwrap().is_visible());
    assert_eq!(ctx.input.session().unwrap().hovered(), None);
}

#[test]
fn only_one_card_is_captured_at_a_time() {
    let mut ctx = table();
    let ship = dealt(&ctx, CardType::Ship);
    let carrier = dealt(&ctx, CardType::Carrier);
    let carrier_at = ctx.board.card(carrier).unwrap().position();

    press(&mut ctx, PointerEvent::Down(Vector::new(200, 200)));
    press(&mut ctx, PointerEvent::Down(carrier_at));
    ctx.input.card_drag_start(&mut ctx.board, carrier, carrier_at);

    assert_eq!(ctx.board.captured_cards(), vec![ship]);
    assert_eq!(ctx.input.session().unwrap().card(), ship);
    assert!(ctx.board.card(carrier).unwrap().is_interactive());
}

#[test]
fn stray_calls_while_idle_change_nothing() {
    let mut ctx = table();
    ctx.input.drag_card(&mut ctx.board, Vector::new(300, 300));
    ctx.input.card_drag_end(&mut ctx.board, Some(Vector::new(300, 300)));
    press(&mut ctx, PointerEvent::Up(Vector::new(200, 200)));
    press(&mut ctx, PointerEvent::UpOutside);

    assert!(matches!(ctx.input.state(), DragState::Idle));
    assert!(ctx.board.captured_cards().is_empty());
    assert_eq!(ctx.board.cards().len(), 3);
    assert!(ctx.board.cards().iter().all(|c| c.is_interactive() && c.is_visible()));
}

#[test]
fn occupied_slot_stops_listening() {
    let mut ctx = table();
    let carrier = dealt(&ctx, CardType::Carrier);
    let slot = ctx.board.target_by_name("player_carrier").unwrap().id();
    assert!(ctx.board.place_card(carrier, slot));

    let other = ctx.board.deal("assets/wc-ccg-confed-back.png", CardType::Carrier, Vector::new(400, 200));
    press(&mut ctx, PointerEvent::Down(Vector::new(400, 200)));
    assert_eq!(ctx.input.session().unwrap().card(), other);
    assert!(!ctx.input.session().unwrap().subscription().listens(slot));
    assert_eq!(ctx.board.target(slot).unwrap().border(), BorderState::InvalidTarget);

    let slot_pos = ctx.board.target(slot).unwrap().position();
    press(&mut ctx, PointerEvent::Up(slot_pos));
    assert_eq!(ctx.board.locate(other), Some(CardLocation::Free));
    assert_eq!(ctx.board.locate(carrier), Some(CardLocation::InTarget(slot)));
}

#[test]
fn hovering_outlines_a_single_card() {
    let mut ctx = table();
    let ship = dealt(&ctx, CardType::Ship);
    let carrier = dealt(&ctx, CardType::Carrier);

    press(&mut ctx, PointerEvent::Move(Vector::new(200, 200)));
    assert_eq!(ctx.input.outlined(), Some(ship));
    assert!(ctx.board.card(ship).unwrap().is_outlined());

    let carrier_at = ctx.board.card(carrier).unwrap().position();
    press(&mut ctx, PointerEvent::Move(carrier_at));
    assert_eq!(ctx.input.outlined(), Some(carrier));
    assert!(!ctx.board.card(ship).unwrap().is_outlined());
    assert_eq!(ctx.board.cards().iter().filter(|c| c.is_outlined()).count(), 1);
}

#[test]
fn overlapping_slot_that_is_not_listening_does_not_block_the_drop() {
    let mut ctx = table();
    let nav_card = dealt(&ctx, CardType::NavPoint);
    let start = ctx.board.card(nav_card).unwrap().position();
    let nav_bl = ctx.board.target_by_name("nav_bl").unwrap().id();
    // inside both nav_bl and player_carrier
    let overlap = Vector::new(560, 600);
    assert!(ctx.board.target_by_name("player_carrier").unwrap().contains(overlap));
    assert!(ctx.board.target(nav_bl).unwrap().contains(overlap));

    press(&mut ctx, PointerEvent::Down(start));
    press(&mut ctx, PointerEvent::Move(overlap));
    assert_eq!(ctx.input.session().unwrap().hovered(), Some(nav_bl));
    assert_eq!(ctx.board.target(nav_bl).unwrap().border(), BorderState::Highlighted);

    press(&mut ctx, PointerEvent::Up(overlap));
    assert_eq!(ctx.board.locate(nav_card), Some(CardLocation::InTarget(nav_bl)));
    assert!(ctx.board.target_by_name("player_carrier").unwrap().is_empty());
}
