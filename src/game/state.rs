//! Game state machine
//!
//! Owns the hero, the monster being fought and the current screen, and
//! routes each key press to the handler for that screen.

use crate::combat;
use crate::dice::Dice;
use crate::entities::{Combatant, Monster, Player};
use crate::save::PlayerStore;

use super::economy::{self, ShopItem};
use super::encounter;
use super::messages::{MessageCategory, MessageLog};

pub const MAIN_MENU_OPTIONS: [&str; 3] = ["Go to Dungeon", "Go to Castle", "Quit"];
pub const CASTLE_MENU_OPTIONS: [&str; 4] = ["Buy", "Sell", "Inventory", "Return"];

/// All possible game states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    MainMenu,
    /// Wandering the dungeon
    Explore,
    /// Fighting the active monster
    Combat,
    /// Potions and gear, opened from another screen
    Inventory,
    CastleMenu,
    /// Buying from the castle shop
    CastleShop,
    Sell,
    /// The hero has fallen
    Dead,
    /// Exit the game
    Quit,
}

/// A key press, already decoded from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Esc,
    Char(char),
}

/// What the combined inventory cursor points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventorySlot {
    Potion(usize),
    Weapon(usize),
    Armor(usize),
}

impl InventorySlot {
    /// Resolve a combined cursor over potions, then weapons, then armors
    pub fn at(player: &Player, cursor: usize) -> Option<Self> {
        let potions = player.potions().len();
        if cursor < potions {
            return Some(InventorySlot::Potion(cursor));
        }
        Self::gear_at(player, cursor - potions)
    }

    /// Resolve a combined cursor over weapons, then armors
    pub fn gear_at(player: &Player, cursor: usize) -> Option<Self> {
        let weapons = player.weapons().len();
        if cursor < weapons {
            Some(InventorySlot::Weapon(cursor))
        } else if cursor - weapons < player.armors().len() {
            Some(InventorySlot::Armor(cursor - weapons))
        } else {
            None
        }
    }
}

fn wrap_next(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (cursor + 1) % len
    }
}

fn wrap_prev(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (cursor + len - 1) % len
    }
}

fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

/// The main game struct that holds all game data
pub struct Game {
    state: GameState,
    /// Where to go back to when the inventory closes
    previous_state: Option<GameState>,
    player: Player,
    /// The hero as they were at startup, restored after death
    hero_template: Player,
    monster: Option<Monster>,
    dice: Box<dyn Dice>,
    store: Box<dyn PlayerStore>,
    /// Exploration and combat log
    log: MessageLog,
    /// Single-line notice for menu screens
    panel_message: Option<String>,
    /// Set when a monster appears, consumed by the frontend
    encounter_banner: Option<String>,
    menu_cursor: usize,
    castle_cursor: usize,
    shop_cursor: usize,
    sell_cursor: usize,
    inventory_cursor: usize,
}

impl Game {
    pub fn new(player: Player, dice: Box<dyn Dice>, store: Box<dyn PlayerStore>) -> Self {
        let mut log = MessageLog::new();
        log.push("Welcome to the dungeon. Press 'w' to wander.", MessageCategory::System);
        Self {
            state: GameState::MainMenu,
            previous_state: None,
            hero_template: player.clone(),
            player,
            monster: None,
            dice,
            store,
            log,
            panel_message: None,
            encounter_banner: None,
            menu_cursor: 0,
            castle_cursor: 0,
            shop_cursor: 0,
            sell_cursor: 0,
            inventory_cursor: 0,
        }
    }

    // --- Accessors ---

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn previous_state(&self) -> Option<GameState> {
        self.previous_state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn monster(&self) -> Option<&Monster> {
        self.monster.as_ref()
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn panel_message(&self) -> Option<&str> {
        self.panel_message.as_deref()
    }

    pub fn store(&self) -> &dyn PlayerStore {
        self.store.as_ref()
    }

    /// Swap the random source
    pub fn set_dice(&mut self, dice: Box<dyn Dice>) {
        self.dice = dice;
    }

    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    pub fn castle_cursor(&self) -> usize {
        self.castle_cursor
    }

    pub fn shop_cursor(&self) -> usize {
        self.shop_cursor
    }

    pub fn sell_cursor(&self) -> usize {
        self.sell_cursor
    }

    pub fn inventory_cursor(&self) -> usize {
        self.inventory_cursor
    }

    /// Take the pending encounter banner, if a monster just appeared
    pub fn take_encounter_banner(&mut self) -> Option<String> {
        self.encounter_banner.take()
    }

    fn set_state(&mut self, state: GameState) {
        log::debug!("State transition: {:?} -> {:?}", self.state, state);
        self.state = state;
        self.panel_message = None;
    }

    fn notice(&mut self, text: impl Into<String>) {
        self.panel_message = Some(text.into());
    }

    /// Best-effort save, failures only get logged
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.player) {
            log::warn!("Failed to save player: {}", e);
        }
    }

    /// Handle one key press. Returns true when the game should exit.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match self.state {
            GameState::MainMenu => self.handle_main_menu(key),
            GameState::Explore => self.handle_explore(key),
            GameState::Combat => self.handle_combat(key),
            GameState::Inventory => self.handle_inventory(key),
            GameState::CastleMenu => self.handle_castle_menu(key),
            GameState::CastleShop => self.handle_shop(key),
            GameState::Sell => self.handle_sell(key),
            GameState::Dead => self.handle_dead(key),
            GameState::Quit => {}
        }
        self.state == GameState::Quit
    }

    // --- Main menu ---

    fn handle_main_menu(&mut self, key: Key) {
        match key {
            Key::Up | Key::Char('k') => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
            }
            Key::Down | Key::Char('j') => {
                self.menu_cursor = (self.menu_cursor + 1).min(MAIN_MENU_OPTIONS.len() - 1);
            }
            Key::Enter => match self.menu_cursor {
                0 => {
                    self.set_state(GameState::Explore);
                    self.log.push("You head into the dungeon...", MessageCategory::System);
                }
                1 => {
                    // Backup when entering the castle
                    self.persist();
                    self.castle_cursor = 0;
                    self.set_state(GameState::CastleMenu);
                }
                _ => self.set_state(GameState::Quit),
            },
            Key::Char('q') => self.set_state(GameState::Quit),
            _ => {}
        }
    }

    fn to_main_menu(&mut self) {
        self.menu_cursor = 0;
        self.set_state(GameState::MainMenu);
    }

    // --- Exploration ---

    fn handle_explore(&mut self, key: Key) {
        match key {
            Key::Char('w') => self.wander(),
            Key::Char('i') => self.open_inventory(),
            Key::Char('m') => self.to_main_menu(),
            Key::Char('h') => self.log.push(
                "Controls: w-wander, i-inventory, m-menu, h-help",
                MessageCategory::System,
            ),
            _ => {}
        }
    }

    fn wander(&mut self) {
        let encounter = encounter::wander(&self.player, &mut *self.dice);
        match encounter.monster {
            Some(monster) => {
                self.log.push(encounter.message, MessageCategory::Combat);
                self.encounter_banner = Some(format!("!! {} ENCOUNTER !!", monster.name.to_uppercase()));
                self.monster = Some(monster);
                self.set_state(GameState::Combat);
            }
            None => self.log.push(encounter.message, MessageCategory::System),
        }
    }

    // --- Combat ---

    fn handle_combat(&mut self, key: Key) {
        if self.monster.is_none() {
            log::warn!("In combat without a monster, returning to exploration");
            self.set_state(GameState::Explore);
            return;
        }

        match key {
            Key::Char('a') => self.player_attacks(),
            Key::Char('r') => self.flee(),
            Key::Char('i') => self.open_inventory(),
            _ => {}
        }
    }

    fn player_attacks(&mut self) {
        let Some(monster) = self.monster.as_mut() else {
            return;
        };
        let result = combat::attack(&self.player, &mut *monster, &mut *self.dice);
        if result.hit {
            self.log.push(
                format!("You hit {} for {} damage.", monster.name, result.damage),
                MessageCategory::Combat,
            );
        } else {
            self.log.push("You miss!", MessageCategory::Combat);
        }

        if monster.is_alive() {
            self.monster_attacks();
        } else {
            self.claim_victory();
        }
    }

    fn claim_victory(&mut self) {
        let Some(monster) = self.monster.take() else {
            return;
        };
        self.log.push(format!("{} has been defeated!", monster.name), MessageCategory::Combat);

        if let Some(potion) = economy::handle_loot(&monster, &mut *self.dice) {
            self.log.push(format!("You found a {}!", potion.name), MessageCategory::Item);
            self.player.add_potion(potion);
        }

        let gold = economy::gold_reward(&monster, &mut *self.dice);
        if gold > 0 {
            self.player.add_gold(gold);
            self.log.push(format!("You gained {} gold.", gold), MessageCategory::Item);
            self.log.push(
                "Open the main menu with 'm' to return to the Castle.",
                MessageCategory::System,
            );
        }

        log::info!("Defeated {}, earned {} gold", monster.name, gold);
        self.set_state(GameState::Explore);
    }

    fn flee(&mut self) {
        let Some(monster) = self.monster.as_ref() else {
            return;
        };
        if encounter::attempt_flee(&self.player, monster, &mut *self.dice) {
            self.log.push("You fled successfully.", MessageCategory::Combat);
            self.monster = None;
            self.set_state(GameState::Explore);
        } else {
            self.log.push("Flee failed!", MessageCategory::Warning);
            self.monster_attacks();
        }
    }

    fn monster_attacks(&mut self) {
        let Some(monster) = self.monster.as_ref() else {
            return;
        };
        let result = combat::attack(monster, &mut self.player, &mut *self.dice);
        if result.hit {
            self.log.push(
                format!("{} hits you for {} damage.", monster.name, result.damage),
                MessageCategory::Combat,
            );
        } else {
            self.log.push(format!("{} misses!", monster.name), MessageCategory::Combat);
        }

        if !self.player.is_alive() {
            log::info!("{} was slain by {}", self.player.name, monster.name);
            self.log.push("You have been slain! Game over.", MessageCategory::Warning);
            self.log.push("Press 'r' to restart or 'q' to quit.", MessageCategory::System);
            self.monster = None;
            self.set_state(GameState::Dead);
        }
    }

    // --- Death ---

    fn handle_dead(&mut self, key: Key) {
        match key {
            Key::Char('r') => self.restart(),
            Key::Char('q') => self.set_state(GameState::Quit),
            _ => {}
        }
    }

    /// Bring the hero back exactly as they started
    fn restart(&mut self) {
        self.player = self.hero_template.clone();
        self.monster = None;
        self.previous_state = None;
        self.log.clear();
        self.log.push("You are revived. Press 'w' to continue wandering.", MessageCategory::System);
        self.set_state(GameState::Explore);
    }

    // --- Inventory ---

    fn open_inventory(&mut self) {
        self.previous_state = Some(self.state);
        self.inventory_cursor = 0;
        self.set_state(GameState::Inventory);
    }

    fn close_inventory(&mut self) {
        let back = self.previous_state.take().unwrap_or(GameState::Explore);
        self.set_state(back);
    }

    fn handle_inventory(&mut self, key: Key) {
        let total = self.player.item_count();
        match key {
            Key::Up | Key::Char('k') => self.inventory_cursor = wrap_prev(self.inventory_cursor, total),
            Key::Down | Key::Char('j') => self.inventory_cursor = wrap_next(self.inventory_cursor, total),
            Key::Char('u') | Key::Enter => self.drink_selected(),
            Key::Char('e') => self.toggle_selected_equipment(),
            Key::Char('i') | Key::Esc => self.close_inventory(),
            _ => {}
        }
    }

    fn drink_selected(&mut self) {
        match InventorySlot::at(&self.player, self.inventory_cursor) {
            Some(InventorySlot::Potion(index)) => {
                let name = self.player.potions()[index].name.clone();
                match self.player.drink_potion(index) {
                    Some(healed) => {
                        self.notice(format!("You drink {} and recover {} HP.", name, healed));
                        self.inventory_cursor = clamp_cursor(self.inventory_cursor, self.player.item_count());
                        self.persist();
                    }
                    None => self.notice("Invalid selection."),
                }
            }
            Some(_) => self.notice("No potion selected."),
            None => self.notice("Your pack is empty."),
        }
    }

    fn toggle_selected_equipment(&mut self) {
        match InventorySlot::at(&self.player, self.inventory_cursor) {
            Some(InventorySlot::Potion(_)) => self.notice("Cannot equip a potion. Use 'u' to drink."),
            Some(InventorySlot::Weapon(index)) => {
                let name = self.player.weapons()[index].name.clone();
                if self.player.is_weapon_equipped(index) {
                    self.player.unequip_weapon();
                    self.notice(format!("You unequipped {}.", name));
                } else {
                    self.player.equip_weapon(index);
                    self.notice(format!("You equipped {}.", name));
                }
                self.persist();
            }
            Some(InventorySlot::Armor(index)) => {
                let name = self.player.armors()[index].name.clone();
                if self.player.is_armor_equipped(index) {
                    self.player.unequip_armor();
                    self.notice(format!("You unequipped {}.", name));
                } else {
                    self.player.equip_armor(index);
                    self.notice(format!("You equipped {}.", name));
                }
                self.persist();
            }
            None => self.notice("Your pack is empty."),
        }
    }

    // --- Castle ---

    fn handle_castle_menu(&mut self, key: Key) {
        match key {
            Key::Up | Key::Char('k') => self.castle_cursor = self.castle_cursor.saturating_sub(1),
            Key::Down | Key::Char('j') => {
                self.castle_cursor = (self.castle_cursor + 1).min(CASTLE_MENU_OPTIONS.len() - 1);
            }
            Key::Enter => match self.castle_cursor {
                0 => self.open_shop(),
                1 => self.open_sell(),
                2 => self.open_inventory(),
                _ => self.to_main_menu(),
            },
            Key::Char('b') => self.open_shop(),
            Key::Char('s') => self.open_sell(),
            Key::Char('i') => self.open_inventory(),
            Key::Char('m') | Key::Esc => self.to_main_menu(),
            _ => {}
        }
    }

    fn open_shop(&mut self) {
        self.shop_cursor = 0;
        self.set_state(GameState::CastleShop);
    }

    fn open_sell(&mut self) {
        self.sell_cursor = 0;
        self.set_state(GameState::Sell);
    }

    fn handle_shop(&mut self, key: Key) {
        let catalog = economy::shop_catalog();
        match key {
            Key::Up | Key::Char('k') => self.shop_cursor = wrap_prev(self.shop_cursor, catalog.len()),
            Key::Down | Key::Char('j') => self.shop_cursor = wrap_next(self.shop_cursor, catalog.len()),
            Key::Enter | Key::Char('b') => {
                if let Some(item) = catalog.get(self.shop_cursor) {
                    self.buy(item);
                }
            }
            Key::Esc => self.set_state(GameState::CastleMenu),
            _ => {}
        }
    }

    fn buy(&mut self, item: &ShopItem) {
        match economy::buy(&mut self.player, item) {
            Ok(()) => {
                self.notice(format!("You bought {}.", item.name()));
                self.persist();
            }
            Err(e) => self.notice(e.to_string()),
        }
    }

    fn handle_sell(&mut self, key: Key) {
        let total = self.player.weapons().len() + self.player.armors().len();
        match key {
            Key::Up | Key::Char('k') => self.sell_cursor = wrap_prev(self.sell_cursor, total),
            Key::Down | Key::Char('j') => self.sell_cursor = wrap_next(self.sell_cursor, total),
            Key::Enter => self.sell_selected(),
            Key::Esc | Key::Char('m') | Key::Char('b') => self.set_state(GameState::CastleMenu),
            _ => {}
        }
    }

    fn sell_selected(&mut self) {
        let sale = match InventorySlot::gear_at(&self.player, self.sell_cursor) {
            Some(InventorySlot::Weapon(index)) => {
                let name = self.player.weapons()[index].name.clone();
                economy::sell_weapon(&mut self.player, index).map(|value| (name, value))
            }
            Some(InventorySlot::Armor(index)) => {
                let name = self.player.armors()[index].name.clone();
                economy::sell_armor(&mut self.player, index).map(|value| (name, value))
            }
            _ => Err(economy::TradeError::NoSuchItem(self.sell_cursor)),
        };

        match sale {
            Ok((name, value)) => {
                self.notice(format!("Sold {} for {} gold.", name, value));
                let total = self.player.weapons().len() + self.player.armors().len();
                self.sell_cursor = clamp_cursor(self.sell_cursor, total);
                self.persist();
            }
            Err(e) => self.notice(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::items::{templates, Armor, Weapon};
    use crate::save::{MemoryStore, SaveError};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts saves and can be told to fail
    struct CountingStore {
        saves: Rc<Cell<usize>>,
        fail: bool,
    }

    impl PlayerStore for CountingStore {
        fn load(&self) -> Result<Option<Player>, SaveError> {
            Ok(None)
        }

        fn save(&mut self, _player: &Player) -> Result<(), SaveError> {
            if self.fail {
                return Err(SaveError::Io(std::io::Error::other("disk full")));
            }
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    fn game_with(player: Player, rolls: &[i32]) -> Game {
        Game::new(
            player,
            Box::new(ScriptedDice::with_rolls(rolls.iter().copied())),
            Box::new(MemoryStore::new()),
        )
    }

    fn counting_game(player: Player, fail: bool) -> (Game, Rc<Cell<usize>>) {
        let saves = Rc::new(Cell::new(0));
        let store = CountingStore { saves: Rc::clone(&saves), fail };
        let game = Game::new(player, Box::new(ScriptedDice::new()), Box::new(store));
        (game, saves)
    }

    fn press(game: &mut Game, keys: &[Key]) {
        for key in keys {
            game.handle_key(*key);
        }
    }

    #[test]
    fn test_starts_at_main_menu() {
        let game = game_with(Player::default_hero(), &[]);
        assert_eq!(game.state(), GameState::MainMenu);
        assert!(game.monster().is_none());
    }

    #[test]
    fn test_main_menu_cursor_clamps() {
        let mut game = game_with(Player::default_hero(), &[]);
        press(&mut game, &[Key::Up]);
        assert_eq!(game.menu_cursor(), 0);
        press(&mut game, &[Key::Down, Key::Char('j'), Key::Down]);
        assert_eq!(game.menu_cursor(), 2);
        press(&mut game, &[Key::Char('k')]);
        assert_eq!(game.menu_cursor(), 1);
    }

    #[test]
    fn test_quit_from_main_menu() {
        let mut game = game_with(Player::default_hero(), &[]);
        assert!(game.handle_key(Key::Char('q')));
        assert_eq!(game.state(), GameState::Quit);

        let mut game = game_with(Player::default_hero(), &[]);
        press(&mut game, &[Key::Down, Key::Down]);
        assert!(game.handle_key(Key::Enter));
    }

    #[test]
    fn test_entering_castle_saves() {
        let (mut game, saves) = counting_game(Player::default_hero(), false);
        press(&mut game, &[Key::Down, Key::Enter]);
        assert_eq!(game.state(), GameState::CastleMenu);
        assert_eq!(saves.get(), 1);
    }

    #[test]
    fn test_failed_save_is_not_fatal() {
        let (mut game, saves) = counting_game(Player::default_hero(), true);
        press(&mut game, &[Key::Down, Key::Enter, Key::Enter]);
        assert_eq!(game.state(), GameState::CastleShop);
        press(&mut game, &[Key::Enter]);
        assert_eq!(saves.get(), 0);
        assert_eq!(game.player().weapons().len(), 1);
        assert_eq!(game.panel_message(), Some("You bought Short Sword."));
    }

    #[test]
    fn test_wander_nothing_stays_exploring() {
        let mut game = game_with(Player::default_hero(), &[40]);
        press(&mut game, &[Key::Enter, Key::Char('w')]);
        assert_eq!(game.state(), GameState::Explore);
        assert_eq!(game.log().last(), Some("You wander the dungeon but find nothing."));
        assert!(game.take_encounter_banner().is_none());
    }

    #[test]
    fn test_goblin_encounter_and_first_hit() {
        // wander 50, goblin draws 2/1/0, attack 15, goblin swings 1
        let mut game = game_with(Player::default_hero(), &[50, 2, 1, 0, 15, 1]);
        press(&mut game, &[Key::Enter, Key::Char('w')]);
        assert_eq!(game.state(), GameState::Combat);
        assert_eq!(game.take_encounter_banner().as_deref(), Some("!! GOBLIN ENCOUNTER !!"));
        let goblin = game.monster().unwrap();
        assert_eq!((goblin.hp(), goblin.base_damage, goblin.armor), (10, 3, 10));

        press(&mut game, &[Key::Char('a')]);
        assert_eq!(game.monster().unwrap().hp(), 8);
        assert_eq!(game.player().hp(), 20);
        assert_eq!(game.log().last(), Some("Goblin misses!"));
        assert_eq!(game.state(), GameState::Combat);
    }

    #[test]
    fn test_victory_awards_loot_and_gold() {
        let mut hero = Player::default_hero();
        hero.add_weapon(Weapon::new("Great Axe", 6, 35));
        hero.equip_weapon(0);
        // wander 50, goblin 0/0/0 -> 8hp, hit 20, loot 10, gold 12
        let mut game = game_with(hero, &[50, 0, 0, 0, 20, 10, 12]);
        press(&mut game, &[Key::Enter, Key::Char('w'), Key::Char('a')]);
        assert_eq!(game.state(), GameState::Explore);
        assert!(game.monster().is_none());
        assert_eq!(game.player().potions(), &[templates::small_healing_potion()]);
        // base = 8 / 2 + 2 = 6, roll clamped to 11
        assert_eq!(game.player().gold(), 41);
    }

    #[test]
    fn test_flee_success_clears_monster() {
        let mut game = game_with(Player::default_hero(), &[50, 2, 1, 0]);
        press(&mut game, &[Key::Enter, Key::Char('w')]);
        game.set_dice(Box::new({
            let mut d = ScriptedDice::new();
            d.push_chance(0.1);
            d
        }));
        press(&mut game, &[Key::Char('r')]);
        assert_eq!(game.state(), GameState::Explore);
        assert!(game.monster().is_none());
    }

    #[test]
    fn test_flee_failure_gives_free_attack() {
        let mut game = game_with(Player::default_hero(), &[50, 2, 1, 0]);
        press(&mut game, &[Key::Enter, Key::Char('w')]);
        let mut dice = ScriptedDice::with_rolls([10]);
        dice.push_chance(0.9);
        game.set_dice(Box::new(dice));
        press(&mut game, &[Key::Char('r')]);
        assert_eq!(game.state(), GameState::Combat);
        assert_eq!(game.player().hp(), 17);
        assert!(game.monster().is_some());
    }

    #[test]
    fn test_death_and_restart_restores_template() {
        let mut hero = Player::new("Hero", 2, 30, 30);
        hero.add_potion(templates::small_healing_potion());
        // wander 50, goblin 2/1/0, miss 1, goblin hits 20
        let mut game = game_with(hero.clone(), &[50, 2, 1, 0, 1, 20]);

        // Spend some gold first so restart has something to undo
        press(&mut game, &[Key::Down, Key::Enter, Key::Enter, Key::Enter]);
        assert_eq!(game.player().gold(), 20);
        press(&mut game, &[Key::Esc, Key::Esc]);
        assert_eq!(game.state(), GameState::MainMenu);

        press(&mut game, &[Key::Enter, Key::Char('w'), Key::Char('a')]);
        assert_eq!(game.state(), GameState::Dead);
        assert_eq!(game.player().hp(), 0);
        assert!(game.monster().is_none());

        // Nothing but r / q does anything
        press(&mut game, &[Key::Char('w'), Key::Enter, Key::Esc]);
        assert_eq!(game.state(), GameState::Dead);

        press(&mut game, &[Key::Char('r')]);
        assert_eq!(game.state(), GameState::Explore);
        assert_eq!(game.player(), &hero);
        assert!(game.monster().is_none());
    }

    #[test]
    fn test_quit_when_dead() {
        let mut game = game_with(Player::new("Hero", 1, 30, 0), &[50, 2, 1, 0, 1, 20]);
        press(&mut game, &[Key::Enter, Key::Char('w'), Key::Char('a')]);
        assert_eq!(game.state(), GameState::Dead);
        assert!(game.handle_key(Key::Char('q')));
    }

    #[test]
    fn test_inventory_returns_to_origin() {
        let mut game = game_with(Player::default_hero(), &[50, 2, 1, 0]);
        press(&mut game, &[Key::Enter, Key::Char('i')]);
        assert_eq!(game.state(), GameState::Inventory);
        assert_eq!(game.previous_state(), Some(GameState::Explore));
        press(&mut game, &[Key::Esc]);
        assert_eq!(game.state(), GameState::Explore);
        assert_eq!(game.previous_state(), None);

        press(&mut game, &[Key::Char('w'), Key::Char('i')]);
        assert_eq!(game.previous_state(), Some(GameState::Combat));
        press(&mut game, &[Key::Char('i')]);
        assert_eq!(game.state(), GameState::Combat);
        assert!(game.monster().is_some());
    }

    #[test]
    fn test_inventory_from_castle() {
        let mut game = game_with(Player::default_hero(), &[]);
        press(&mut game, &[Key::Down, Key::Enter, Key::Down, Key::Down, Key::Enter]);
        assert_eq!(game.state(), GameState::Inventory);
        press(&mut game, &[Key::Esc]);
        assert_eq!(game.state(), GameState::CastleMenu);
    }

    #[test]
    fn test_equip_toggles_on_same_entry() {
        let mut hero = Player::default_hero();
        hero.add_potion(templates::small_healing_potion());
        hero.add_weapon(Weapon::new("Long Sword", 4, 20));
        hero.add_armor(Armor::new("Chain Mail", 16, 28));
        let (mut game, saves) = counting_game(hero, false);
        press(&mut game, &[Key::Enter, Key::Char('i')]);

        press(&mut game, &[Key::Char('e')]);
        assert_eq!(game.panel_message(), Some("Cannot equip a potion. Use 'u' to drink."));

        press(&mut game, &[Key::Down, Key::Char('e')]);
        assert!(game.player().is_weapon_equipped(0));
        assert_eq!(game.player().damage(), 6);
        press(&mut game, &[Key::Char('e')]);
        assert!(game.player().equipped_weapon().is_none());

        press(&mut game, &[Key::Down, Key::Char('e')]);
        assert_eq!(game.player().armor_class(), 16);
        assert_eq!(saves.get(), 3);

        // wraps back to the potion
        press(&mut game, &[Key::Down]);
        assert_eq!(game.inventory_cursor(), 0);
        press(&mut game, &[Key::Up]);
        assert_eq!(game.inventory_cursor(), 2);
    }

    #[test]
    fn test_drink_from_inventory() {
        let mut hero = Player::default_hero();
        hero.add_potion(templates::large_healing_potion());
        hero.add_weapon(Weapon::new("Short Sword", 2, 10));
        let mut game = game_with(hero, &[]);
        press(&mut game, &[Key::Enter, Key::Char('i'), Key::Down, Key::Char('u')]);
        assert_eq!(game.panel_message(), Some("No potion selected."));

        press(&mut game, &[Key::Up, Key::Char('u')]);
        assert_eq!(game.panel_message(), Some("You drink Large Healing Potion and recover 10 HP."));
        assert_eq!(game.player().hp(), 30);
        assert!(game.player().potions().is_empty());
        assert_eq!(game.inventory_cursor(), 0);
        assert_eq!(game.store().load().unwrap().unwrap().hp(), 30);
    }

    #[test]
    fn test_empty_inventory_actions() {
        let mut game = game_with(Player::default_hero(), &[]);
        press(&mut game, &[Key::Enter, Key::Char('i'), Key::Down, Key::Char('e')]);
        assert_eq!(game.inventory_cursor(), 0);
        assert_eq!(game.panel_message(), Some("Your pack is empty."));
    }

    #[test]
    fn test_shop_cursor_wraps_and_buys_armor() {
        let mut game = game_with(Player::new("Hero", 20, 30, 60), &[]);
        press(&mut game, &[Key::Down, Key::Enter, Key::Char('b')]);
        assert_eq!(game.state(), GameState::CastleShop);
        press(&mut game, &[Key::Up]);
        assert_eq!(game.shop_cursor(), 5);
        press(&mut game, &[Key::Enter]);
        assert_eq!(game.player().armors()[0].name, "Plate Armor");
        assert_eq!(game.player().gold(), 10);

        press(&mut game, &[Key::Enter]);
        assert_eq!(game.panel_message(), Some("Not enough gold."));
        assert_eq!(game.player().armors().len(), 1);

        press(&mut game, &[Key::Down]);
        assert_eq!(game.shop_cursor(), 0);
        press(&mut game, &[Key::Esc]);
        assert_eq!(game.state(), GameState::CastleMenu);
        assert_eq!(game.panel_message(), None);
    }

    #[test]
    fn test_sell_screen() {
        let mut hero = Player::new("Hero", 20, 30, 0);
        hero.add_weapon(Weapon::new("Long Sword", 4, 20));
        hero.add_armor(Armor::new("Chain Mail", 16, 28));
        hero.equip_armor(0);
        let mut game = game_with(hero, &[]);
        press(&mut game, &[Key::Down, Key::Enter, Key::Char('s')]);
        assert_eq!(game.state(), GameState::Sell);

        press(&mut game, &[Key::Down, Key::Enter]);
        assert_eq!(game.panel_message(), Some("Sold Chain Mail for 14 gold."));
        assert!(game.player().equipped_armor().is_none());
        assert_eq!(game.sell_cursor(), 0);

        press(&mut game, &[Key::Enter]);
        assert_eq!(game.player().gold(), 24);
        assert!(game.player().weapons().is_empty());

        press(&mut game, &[Key::Enter]);
        assert_eq!(game.panel_message(), Some("Nothing to sell."));

        press(&mut game, &[Key::Esc]);
        assert_eq!(game.state(), GameState::CastleMenu);
    }

    #[test]
    fn test_castle_return_to_main_menu() {
        let mut game = game_with(Player::default_hero(), &[]);
        press(&mut game, &[Key::Down, Key::Enter]);
        press(&mut game, &[Key::Down, Key::Down, Key::Down, Key::Down]);
        assert_eq!(game.castle_cursor(), 3);
        press(&mut game, &[Key::Enter]);
        assert_eq!(game.state(), GameState::MainMenu);
        assert_eq!(game.menu_cursor(), 0);
    }

    #[test]
    fn test_explore_menu_key() {
        let mut game = game_with(Player::default_hero(), &[]);
        press(&mut game, &[Key::Enter, Key::Char('m')]);
        assert_eq!(game.state(), GameState::MainMenu);
    }

    #[test]
    fn test_explore_help_lists_controls() {
        let mut game = game_with(Player::default_hero(), &[]);
        press(&mut game, &[Key::Enter, Key::Char('h')]);
        assert_eq!(game.state(), GameState::Explore);
        assert!(game.log().last().unwrap().starts_with("Controls:"));
    }

    #[test]
    fn test_inventory_enter_drinks() {
        let mut hero = Player::default_hero();
        hero.add_potion(templates::small_healing_potion());
        let mut game = game_with(hero, &[]);
        press(&mut game, &[Key::Enter, Key::Char('i'), Key::Enter]);
        assert_eq!(game.state(), GameState::Inventory);
        assert_eq!(game.panel_message(), Some("You drink Small Healing Potion and recover 5 HP."));
        assert_eq!(game.player().hp(), 25);
    }

    #[test]
    fn test_castle_menu_m_key() {
        let mut game = game_with(Player::default_hero(), &[]);
        press(&mut game, &[Key::Down, Key::Enter, Key::Char('m')]);
        assert_eq!(game.state(), GameState::MainMenu);
    }

    #[test]
    fn test_sell_b_and_m_return_to_castle() {
        let mut game = game_with(Player::default_hero(), &[]);
        press(&mut game, &[Key::Down, Key::Enter, Key::Char('s'), Key::Char('b')]);
        assert_eq!(game.state(), GameState::CastleMenu);

        press(&mut game, &[Key::Char('s')]);
        assert_eq!(game.state(), GameState::Sell);
        press(&mut game, &[Key::Char('m')]);
        assert_eq!(game.state(), GameState::CastleMenu);
    }
}
