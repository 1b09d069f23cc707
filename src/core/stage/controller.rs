//=========================================================================
// Stage Controller
//=========================================================================
//
// Owns the round state and drives every stage change through the
// transition table.
//
// Update order:
//   1. Dispatch key handlers (every call, so menus stay responsive)
//   2. Feed typed characters to the name field
//   3. Interpret queued signals for the active stage
//   4. If Playing and the tick gate is open: steer, collide, advance
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::menu::Menu;
use super::signal::{Signal, SignalQueue};
use super::tick_gate::TickGate;
use super::transition::{lookup, Effect, Trigger};
use super::Stage;
use crate::config::GameConfig;
use crate::core::frame::{Frame, MenuView};
use crate::core::input::{InputDispatcher, KeyCode, StateTracker, TextField, TextInput};
use crate::core::leaderboard::{Leaderboard, RecordStore};
use crate::core::player::{Direction, PlayerVehicle};
use crate::core::traffic::TrafficSimulator;
use crate::core::TickControl;
use crate::error::PersistenceError;

//=== StageController =====================================================

pub struct StageController<R: Rng = StdRng> {
    stage: Stage,
    config: GameConfig,

    player: PlayerVehicle,
    traffic: TrafficSimulator<R>,
    leaderboard: Leaderboard,
    store: Box<dyn RecordStore>,
    name_field: TextField,

    main_menu: Menu,
    pause_menu: Menu,

    dispatcher: InputDispatcher<SignalQueue>,
    signals: SignalQueue,
    gate: TickGate,

    notice: Option<String>,
}

impl<R: Rng> StageController<R> {
    //--- Construction -----------------------------------------------------

    /// Starts on the main menu with key bindings installed.
    pub fn new(config: GameConfig, store: Box<dyn RecordStore>, rng: R) -> Self {
        let traffic = TrafficSimulator::new(
            config.traffic_pool,
            config.road_origin(),
            config.viewport_height,
            rng,
        );

        Self {
            stage: Stage::MainMenu,
            player: PlayerVehicle::new(&config),
            traffic,
            leaderboard: Leaderboard::new(),
            store,
            name_field: TextField::new(TextField::DEFAULT_MAX_CHARS),
            main_menu: Menu::main(),
            pause_menu: Menu::pause(),
            dispatcher: Self::bindings(),
            signals: SignalQueue::new(),
            gate: TickGate::new(config.tick_interval()),
            notice: None,
            config,
        }
    }

    fn bindings() -> InputDispatcher<SignalQueue> {
        let mut dispatcher = InputDispatcher::new();

        let arrows = [
            (KeyCode::ArrowUp, Direction::Up),
            (KeyCode::ArrowDown, Direction::Down),
            (KeyCode::ArrowLeft, Direction::Left),
            (KeyCode::ArrowRight, Direction::Right),
        ];
        for (key, direction) in arrows {
            dispatcher.register_while_held(key, move |signals: &mut SignalQueue| {
                signals.push(Signal::Steer(direction))
            });
        }

        for (key, direction) in [(KeyCode::ArrowUp, Direction::Up), (KeyCode::ArrowDown, Direction::Down)] {
            dispatcher.register_on_press(key, move |signals: &mut SignalQueue| {
                signals.push(Signal::Navigate(direction))
            });
        }

        dispatcher.register_on_press(KeyCode::Escape, |signals: &mut SignalQueue| {
            signals.push(Signal::Escape)
        });
        dispatcher.register_on_press(KeyCode::Enter, |signals: &mut SignalQueue| {
            signals.push(Signal::Confirm)
        });
        dispatcher.register_on_press(KeyCode::Backspace, |signals: &mut SignalQueue| {
            signals.push(Signal::Erase)
        });

        dispatcher
    }

    //--- Update -----------------------------------------------------------

    /// Runs one update at wall time `now` against the current key state.
    pub fn update(&mut self, now: Instant, keys: &StateTracker) -> TickControl {
        self.dispatcher.tick(keys, &mut self.signals);

        if self.stage == Stage::EnterName {
            for &c in keys.typed() {
                self.name_field.insert(c);
            }
        }

        let mut steering = Vec::new();
        for signal in self.signals.take() {
            let control = match signal {
                Signal::Steer(direction) => {
                    steering.push(direction);
                    TickControl::Continue
                }
                Signal::Navigate(direction) => {
                    self.navigate(direction);
                    TickControl::Continue
                }
                Signal::Escape => self.fire(Trigger::Escape),
                Signal::Confirm => self.confirm(),
                Signal::Erase => {
                    if self.stage == Stage::EnterName {
                        self.name_field.erase();
                    }
                    TickControl::Continue
                }
            };

            if let TickControl::Exit = control {
                return TickControl::Exit;
            }
        }

        if self.stage == Stage::Playing && self.gate.ready(now) {
            self.gate.mark(now);
            for direction in steering {
                self.player.steer(direction, self.config.player_step);
            }
            self.step();
        }

        TickControl::Continue
    }

    /// One gameplay tick: collision is tested before traffic moves.
    fn step(&mut self) {
        if self.traffic.collides(&self.player.rect()) {
            info!("Crashed with {} points", self.player.points());
            self.fire(Trigger::Crashed);
            return;
        }

        self.traffic.advance(self.config.traffic_speed());
        self.player.accrue(self.config.points_per_tick);
    }

    fn navigate(&mut self, direction: Direction) {
        let Some(menu) = self.active_menu_mut() else {
            return;
        };
        match direction {
            Direction::Up => menu.previous(),
            Direction::Down => menu.next(),
            Direction::Left | Direction::Right => {}
        }
    }

    fn confirm(&mut self) -> TickControl {
        match self.active_menu().and_then(Menu::confirm) {
            Some(command) => self.fire(Trigger::Menu(command)),
            None => self.fire(Trigger::Confirm),
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Applies the table row for `(stage, trigger)`; unmatched pairs are ignored.
    pub fn fire(&mut self, trigger: Trigger) -> TickControl {
        let Some(transition) = lookup(self.stage, trigger) else {
            return TickControl::Continue;
        };

        if transition.from != transition.to {
            info!("Stage {:?} -> {:?} on {:?}", transition.from, transition.to, trigger);
        }
        if transition.from == Stage::MainMenu && transition.to != Stage::MainMenu {
            self.notice = None;
        }
        self.stage = transition.to;

        self.apply(transition.effect)
    }

    fn apply(&mut self, effect: Effect) -> TickControl {
        let result = match effect {
            Effect::None => Ok(TickControl::Continue),
            Effect::ResetRound => {
                self.reset_round();
                Ok(TickControl::Continue)
            }
            Effect::CheckAdmission => self.check_admission(),
            Effect::FocusName => {
                self.name_field.clear();
                self.name_field.focus();
                Ok(TickControl::Continue)
            }
            Effect::ShowRatings => self.reload().map(|_| TickControl::Continue),
            Effect::CommitName => self.commit_name().map(|_| TickControl::Continue),
            Effect::Exit => {
                info!("Exit requested");
                Ok(TickControl::Exit)
            }
        };

        result.unwrap_or_else(|err| self.storage_failed(err))
    }

    fn reset_round(&mut self) {
        self.player.reset();
        self.traffic.reset();
        self.gate.reset();
        debug!("Round reset");
    }

    fn check_admission(&mut self) -> Result<TickControl, PersistenceError> {
        self.reload()?;

        let points = self.player.points();
        if self.leaderboard.admits(points) {
            debug!("{} points qualify for the leaderboard", points);
            return Ok(self.fire(Trigger::Qualified));
        }
        Ok(TickControl::Continue)
    }

    fn commit_name(&mut self) -> Result<(), PersistenceError> {
        let name = self.name_field.text().trim().to_string();
        self.name_field.blur();
        self.player.set_name(name);

        self.reload()?;
        let points = self.player.points();
        if self.leaderboard.admits(points) {
            self.leaderboard.insert(self.player.name(), points);
        }
        self.store.save(self.leaderboard.records())?;

        info!("Recorded {:?} with {} points", self.player.name(), points);
        Ok(())
    }

    fn reload(&mut self) -> Result<(), PersistenceError> {
        let records = self.store.load()?;
        self.leaderboard = Leaderboard::from_records(records);
        Ok(())
    }

    fn storage_failed(&mut self, err: PersistenceError) -> TickControl {
        error!("Leaderboard failure: {}", err);
        self.notice = Some(format!("Leaderboard unavailable: {}", err));
        self.name_field.blur();
        self.fire(Trigger::StorageFailed)
    }

    //--- Accessors --------------------------------------------------------

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn player(&self) -> &PlayerVehicle {
        &self.player
    }

    pub fn traffic(&self) -> &TrafficSimulator<R> {
        &self.traffic
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn active_menu(&self) -> Option<&Menu> {
        match self.stage {
            Stage::MainMenu => Some(&self.main_menu),
            Stage::PauseMenu => Some(&self.pause_menu),
            _ => None,
        }
    }

    fn active_menu_mut(&mut self) -> Option<&mut Menu> {
        match self.stage {
            Stage::MainMenu => Some(&mut self.main_menu),
            Stage::PauseMenu => Some(&mut self.pause_menu),
            _ => None,
        }
    }

    /// Snapshot for the renderer.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            stage: self.stage,
            points: self.player.points(),
            player: self.player.rect(),
            traffic: self.traffic.rects(),
            records: self.leaderboard.records(),
            prompt: Frame::prompt_for(self.stage),
            entry: (self.stage == Stage::EnterName).then(|| self.name_field.text()),
            notice: self.notice.as_deref(),
            menu: self.active_menu().map(|menu| MenuView {
                items: menu.items(),
                selected: menu.selected(),
            }),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputEvent;
    use crate::core::leaderboard::{MemoryRecordStore, Record};
    use rand::SeedableRng;
    use std::time::Duration;

    const TICK: Duration = Duration::from_millis(20);

    struct Harness {
        controller: StageController<StdRng>,
        keys: StateTracker,
        now: Instant,
    }

    impl Harness {
        fn new(store: MemoryRecordStore) -> Self {
            Self {
                controller: StageController::new(
                    GameConfig::default(),
                    Box::new(store),
                    StdRng::seed_from_u64(11),
                ),
                keys: StateTracker::new(),
                now: Instant::now(),
            }
        }

        /// One update after a full tick interval.
        fn update(&mut self) -> TickControl {
            self.now += TICK;
            self.keys.clear();
            self.controller.update(self.now, &self.keys)
        }

        fn events(&mut self, events: &[InputEvent]) -> TickControl {
            self.now += TICK;
            self.keys.clear();
            self.keys.process_events(events);
            self.controller.update(self.now, &self.keys)
        }

        /// Press and release `key` over two updates.
        fn tap(&mut self, key: KeyCode) -> TickControl {
            if let TickControl::Exit = self.events(&[InputEvent::KeyDown(key)]) {
                return TickControl::Exit;
            }
            self.events(&[InputEvent::KeyUp(key)])
        }

        fn start_round(&mut self) {
            self.tap(KeyCode::Enter);
            assert_eq!(self.controller.stage(), Stage::Playing);
        }

        /// Parks a car on top of the player.
        fn force_crash(&mut self) {
            let player = self.controller.player.rect();
            self.controller.traffic.entities_mut()[0].rect.x = player.x;
            self.controller.traffic.entities_mut()[0].rect.y = player.y;
            self.update();
        }
    }

    fn full_board(min: u64) -> Vec<Record> {
        (0..10).map(|i| Record::new(format!("p{i}"), min + i * 100)).collect()
    }

    //=====================================================================
    // Menus
    //=====================================================================

    #[test]
    fn enter_on_main_menu_starts_a_round() {
        let mut h = Harness::new(MemoryRecordStore::new());
        assert_eq!(h.controller.stage(), Stage::MainMenu);
        h.start_round();
        // Press and release each ran a gameplay tick.
        assert_eq!(h.controller.player().points(), 2);
    }

    #[test]
    fn ratings_item_loads_records() {
        let mut h = Harness::new(MemoryRecordStore::with_records(vec![Record::new("ada", 5)]));
        h.tap(KeyCode::ArrowDown);
        h.tap(KeyCode::Enter);

        assert_eq!(h.controller.stage(), Stage::Leaderboard);
        assert_eq!(h.controller.leaderboard().len(), 1);

        h.tap(KeyCode::Escape);
        assert_eq!(h.controller.stage(), Stage::MainMenu);
    }

    #[test]
    fn exit_item_stops_the_loop() {
        let mut h = Harness::new(MemoryRecordStore::new());
        h.tap(KeyCode::ArrowUp);
        assert_eq!(h.tap(KeyCode::Enter), TickControl::Exit);
    }

    #[test]
    fn escape_pauses_and_continue_resumes() {
        let mut h = Harness::new(MemoryRecordStore::new());
        h.start_round();

        h.tap(KeyCode::Escape);
        assert_eq!(h.controller.stage(), Stage::PauseMenu);
        let points = h.controller.player().points();
        h.update();
        assert_eq!(h.controller.player().points(), points);

        h.tap(KeyCode::Enter);
        assert_eq!(h.controller.stage(), Stage::Playing);
    }

    #[test]
    fn holding_escape_stays_paused() {
        let mut h = Harness::new(MemoryRecordStore::new());
        h.start_round();

        h.events(&[InputEvent::KeyDown(KeyCode::Escape)]);
        assert_eq!(h.controller.stage(), Stage::PauseMenu);
        for _ in 0..5 {
            h.update();
            assert_eq!(h.controller.stage(), Stage::PauseMenu);
        }
    }

    #[test]
    fn pause_menu_returns_to_main_menu() {
        let mut h = Harness::new(MemoryRecordStore::new());
        h.start_round();
        h.tap(KeyCode::Escape);

        h.tap(KeyCode::ArrowDown);
        assert_eq!(h.controller.frame().selected_label(), Some("Go back to the main menu"));
        h.tap(KeyCode::Enter);
        assert_eq!(h.controller.stage(), Stage::MainMenu);

        // A new game starts from scratch.
        h.start_round();
        assert_eq!(h.controller.player().points(), 2);
    }

    #[test]
    fn pause_menu_exit_stops_the_loop() {
        let mut h = Harness::new(MemoryRecordStore::new());
        h.start_round();
        h.tap(KeyCode::Escape);

        h.tap(KeyCode::ArrowUp);
        assert_eq!(h.controller.frame().selected_label(), Some("Exit"));
        assert_eq!(h.tap(KeyCode::Enter), TickControl::Exit);
    }

    #[test]
    fn enter_leaves_the_leaderboard() {
        let mut h = Harness::new(MemoryRecordStore::new());
        h.tap(KeyCode::ArrowDown);
        h.tap(KeyCode::Enter);
        assert_eq!(h.controller.stage(), Stage::Leaderboard);

        h.tap(KeyCode::Enter);
        assert_eq!(h.controller.stage(), Stage::MainMenu);
    }

    //=====================================================================
    // Gameplay
    //=====================================================================

    #[test]
    fn updates_inside_one_interval_step_once() {
        let mut h = Harness::new(MemoryRecordStore::new());
        h.start_round();

        let traffic = h.controller.traffic().rects();
        let player = h.controller.player().rect();
        let points = h.controller.player().points();

        h.keys.clear();
        h.keys.process_events(&[InputEvent::KeyDown(KeyCode::ArrowLeft)]);
        h.controller.update(h.now + Duration::from_millis(5), &h.keys);

        assert_eq!(h.controller.traffic().rects(), traffic);
        assert_eq!(h.controller.player().rect(), player);
        assert_eq!(h.controller.player().points(), points);
    }

    #[test]
    fn held_arrow_steers_every_tick() {
        let mut h = Harness::new(MemoryRecordStore::new());
        h.start_round();
        let x = h.controller.player().rect().x;

        h.events(&[InputEvent::KeyDown(KeyCode::ArrowLeft)]);
        h.update();
        h.update();

        assert_eq!(h.controller.player().rect().x, x - 30.0);
    }

    //=====================================================================
    // Game over and admission
    //=====================================================================

    #[test]
    fn qualifying_crash_goes_straight_to_name_entry() {
        let mut h = Harness::new(MemoryRecordStore::new());
        h.start_round();
        h.force_crash();

        assert_eq!(h.controller.stage(), Stage::EnterName);
        assert!(h.controller.name_field.is_focused());
    }

    #[test]
    fn non_qualifying_crash_stays_on_game_over() {
        let mut h = Harness::new(MemoryRecordStore::with_records(full_board(500)));
        h.start_round();
        h.force_crash();
        assert_eq!(h.controller.stage(), Stage::GameOver);

        h.tap(KeyCode::Enter);
        assert_eq!(h.controller.stage(), Stage::Playing);
        assert_eq!(h.controller.player().points(), 2);
    }

    #[test]
    fn submitted_name_is_trimmed_and_persisted() {
        let mut h = Harness::new(MemoryRecordStore::new());
        h.start_round();
        h.force_crash();

        h.events(&[
            InputEvent::Character(' '),
            InputEvent::Character('a'),
            InputEvent::Character('d'),
            InputEvent::Character('x'),
        ]);
        h.tap(KeyCode::Backspace);
        h.events(&[InputEvent::Character('a'), InputEvent::Character(' ')]);
        h.tap(KeyCode::Enter);

        assert_eq!(h.controller.stage(), Stage::Leaderboard);
        assert_eq!(h.controller.player().name(), "ada");

        let saved = h.controller.store.load().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "ada");
    }

    #[test]
    fn name_on_a_full_board_evicts_the_lowest() {
        let mut h = Harness::new(MemoryRecordStore::with_records(full_board(0)));
        h.start_round();
        h.force_crash();
        assert_eq!(h.controller.stage(), Stage::EnterName);

        h.events(&[InputEvent::Character('z')]);
        h.tap(KeyCode::Enter);
        assert_eq!(h.controller.stage(), Stage::Leaderboard);

        let saved = h.controller.store.load().unwrap();
        assert_eq!(saved.len(), 10);
        assert!(saved.windows(2).all(|pair| pair[0].points >= pair[1].points));
        assert!(saved.iter().all(|record| record.name != "p0"));
        assert_eq!(saved[9].name, "z");
        assert_eq!(saved[9].points, 2);
    }

    //=====================================================================
    // Storage failures
    //=====================================================================

    #[test]
    fn load_failure_returns_to_main_menu_with_notice() {
        let mut store = MemoryRecordStore::new();
        store.fail_load = true;
        let mut h = Harness::new(store);
        h.start_round();
        h.force_crash();

        assert_eq!(h.controller.stage(), Stage::MainMenu);
        let notice = h.controller.notice().unwrap();
        assert!(notice.starts_with("Leaderboard unavailable"));
        assert_eq!(h.controller.frame().notice, Some(notice));

        h.start_round();
        assert!(h.controller.notice().is_none());
    }

    #[test]
    fn save_failure_returns_to_main_menu() {
        let mut store = MemoryRecordStore::new();
        store.fail_save = true;
        let mut h = Harness::new(store);
        h.start_round();
        h.force_crash();
        h.tap(KeyCode::Enter);

        assert_eq!(h.controller.stage(), Stage::MainMenu);
        assert!(h.controller.notice().is_some());
    }

    //=====================================================================
    // Frame
    //=====================================================================

    #[test]
    fn frame_reflects_stage() {
        let mut h = Harness::new(MemoryRecordStore::new());
        {
            let frame = h.controller.frame();
            assert_eq!(frame.selected_label(), Some("New game"));
            assert!(frame.entry.is_none());
        }

        h.start_round();
        let frame = h.controller.frame();
        assert!(frame.menu.is_none());
        assert_eq!(frame.traffic.len(), 4);
    }
}
