//! Main UI Application
//!
//! Draws the current game screen. Rendering only reads game state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::entities::Combatant;
use crate::game::{
    economy, Game, GameState, MessageCategory, CASTLE_MENU_OPTIONS, MAIN_MENU_OPTIONS,
};

/// Smallest terminal we draw into
pub const MIN_COLS: u16 = 40;
pub const MIN_LINES: u16 = 10;

/// Main UI application
#[derive(Debug, Default)]
pub struct App;

impl App {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, game: &Game) {
        // Clear the entire screen first to prevent artifacts
        frame.render_widget(Clear, frame.area());

        let area = frame.area();
        if area.width < MIN_COLS || area.height < MIN_LINES {
            frame.render_widget(Paragraph::new("Terminal too small. Resize to continue."), area);
            return;
        }

        match game.state() {
            GameState::MainMenu => self.render_main_menu(frame, game),
            GameState::CastleMenu => self.render_castle_menu(frame, game),
            GameState::CastleShop => self.render_shop(frame, game),
            GameState::Sell => self.render_sell(frame, game),
            GameState::Inventory => self.render_inventory(frame, game),
            GameState::Explore | GameState::Combat | GameState::Dead => {
                self.render_playing(frame, game)
            }
            GameState::Quit => {}
        }
    }

    /// One frame of the encounter flash
    pub fn render_banner(&self, frame: &mut Frame, text: &str, bright: bool) {
        let area = frame.area();
        let style = if bright {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        };
        let banner = Rect { height: area.height.min(1), ..area };
        frame.render_widget(
            Paragraph::new(Span::styled(text, style)).alignment(Alignment::Center),
            banner,
        );
    }

    fn render_main_menu(&self, frame: &mut Frame, game: &Game) {
        let mut lines = vec![Line::from(""), title_line("Main Menu"), Line::from("")];
        lines.extend(menu_lines(&MAIN_MENU_OPTIONS, game.menu_cursor()));
        self.render_screen(frame, game, lines, "Use arrows or j/k to move - Enter to select");
    }

    fn render_castle_menu(&self, frame: &mut Frame, game: &Game) {
        let mut lines = vec![
            title_line("Castle"),
            gold_line(game),
            Line::from(""),
        ];
        lines.extend(menu_lines(&CASTLE_MENU_OPTIONS, game.castle_cursor()));
        self.render_screen(frame, game, lines, "Enter to choose, [b] Buy [s] Sell [i] Inventory, Esc to leave");
    }

    fn render_shop(&self, frame: &mut Frame, game: &Game) {
        let mut lines = vec![title_line("Castle - Shop"), gold_line(game), Line::from("")];
        let weapons = economy::shop_weapons();
        let cursor = game.shop_cursor();

        lines.push(section_line("Weapons:"));
        for (i, w) in weapons.iter().enumerate() {
            lines.push(entry_line(
                cursor == i,
                format!("{} (DMG+{}) cost:{}", w.name, w.damage_bonus, w.cost),
                game.player().gold() >= w.cost,
            ));
        }
        lines.push(section_line("Armors:"));
        for (j, a) in economy::shop_armors().iter().enumerate() {
            lines.push(entry_line(
                cursor == weapons.len() + j,
                format!("{} (ARM {}) cost:{}", a.name, a.armor_value, a.cost),
                game.player().gold() >= a.cost,
            ));
        }
        self.render_screen(frame, game, lines, "Arrows/jk to navigate, Enter to buy, Esc to return");
    }

    fn render_sell(&self, frame: &mut Frame, game: &Game) {
        let player = game.player();
        let cursor = game.sell_cursor();
        let mut lines = vec![title_line("Sell Items"), gold_line(game), Line::from("")];

        lines.push(section_line("Weapons:"));
        if player.weapons().is_empty() {
            lines.push(none_line());
        }
        for (i, w) in player.weapons().iter().enumerate() {
            lines.push(entry_line(
                cursor == i,
                format!("{}{} (DMG+{}) sell:{}", w.name, equip_mark(player.is_weapon_equipped(i)), w.damage_bonus, w.sell_value()),
                true,
            ));
        }
        lines.push(section_line("Armors:"));
        if player.armors().is_empty() {
            lines.push(none_line());
        }
        for (j, a) in player.armors().iter().enumerate() {
            lines.push(entry_line(
                cursor == player.weapons().len() + j,
                format!("{}{} (ARM {}) sell:{}", a.name, equip_mark(player.is_armor_equipped(j)), a.armor_value, a.sell_value()),
                true,
            ));
        }
        self.render_screen(frame, game, lines, "Enter to sell, Esc to return to Castle");
    }

    fn render_inventory(&self, frame: &mut Frame, game: &Game) {
        let player = game.player();
        let cursor = game.inventory_cursor();
        let mut lines = vec![title_line("Inventory"), status_line(game), Line::from("")];

        lines.push(section_line("Potions:"));
        if player.potions().is_empty() {
            lines.push(none_line());
        }
        for (i, p) in player.potions().iter().enumerate() {
            lines.push(entry_line(cursor == i, format!("{} (+{} HP)", p.name, p.heal_amount), true));
        }

        let offset = player.potions().len();
        lines.push(section_line("Weapons:"));
        for (i, w) in player.weapons().iter().enumerate() {
            lines.push(entry_line(
                cursor == offset + i,
                format!("{}{} (DMG+{})", w.name, equip_mark(player.is_weapon_equipped(i)), w.damage_bonus),
                true,
            ));
        }

        let offset = offset + player.weapons().len();
        lines.push(section_line("Armors:"));
        for (j, a) in player.armors().iter().enumerate() {
            lines.push(entry_line(
                cursor == offset + j,
                format!("{}{} (ARM {})", a.name, equip_mark(player.is_armor_equipped(j)), a.armor_value),
                true,
            ));
        }
        self.render_screen(frame, game, lines, "Arrows/jk to move, [u] drink, [e] equip/unequip, i or Esc to return");
    }

    /// Menu-style screen: body, panel message and footer
    fn render_screen(&self, frame: &mut Frame, game: &Game, body: Vec<Line>, footer: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        frame.render_widget(Paragraph::new(body).block(Block::default().borders(Borders::ALL)), chunks[0]);

        if let Some(msg) = game.panel_message() {
            frame.render_widget(
                Paragraph::new(Span::styled(msg, Style::default().fg(Color::Yellow))),
                chunks[1],
            );
        }

        frame.render_widget(
            Paragraph::new(Span::styled(footer, Style::default().add_modifier(Modifier::BOLD))),
            chunks[2],
        );
    }

    fn render_playing(&self, frame: &mut Frame, game: &Game) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new(status_line(game)).style(Style::default().add_modifier(Modifier::REVERSED)),
            chunks[0],
        );

        self.render_messages(frame, game, chunks[1]);

        if let Some(monster) = game.monster() {
            let text = format!("{} - HP: {}/{}  ARM: {}", monster.name, monster.hp(), monster.max_hp(), monster.armor);
            frame.render_widget(
                Paragraph::new(Span::styled(text, Style::default().fg(Color::Red))),
                chunks[2],
            );
        }

        let prompt = match game.state() {
            GameState::Dead => "[r] Restart  [q] Quit",
            GameState::Combat => "[a] Attack  [r] Flee  [i] Inventory",
            _ => "[w] Wander  [i] Inventory  [m] Menu  [h] Help",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(prompt, Style::default().add_modifier(Modifier::BOLD))),
            chunks[3],
        );
    }

    fn render_messages(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);

        let messages: Vec<Line> = game
            .log()
            .tail(inner.height as usize)
            .iter()
            .map(|msg| {
                let color = match msg.category {
                    MessageCategory::Combat => Color::Red,
                    MessageCategory::Item => Color::Yellow,
                    MessageCategory::System => Color::Cyan,
                    MessageCategory::Warning => Color::LightRed,
                };
                Line::from(Span::styled(msg.text.as_str(), Style::default().fg(color)))
            })
            .collect();

        frame.render_widget(Paragraph::new(messages).block(block), area);
    }
}

fn title_line(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn section_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::Gray)))
}

fn none_line() -> Line<'static> {
    Line::from(Span::styled("  (none)", Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)))
}

fn gold_line(game: &Game) -> Line<'static> {
    Line::from(vec![
        Span::styled("Gold: ", Style::default().fg(Color::Gray)),
        Span::styled(
            game.player().gold().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn status_line(game: &Game) -> Line<'static> {
    let p = game.player();
    Line::from(format!(
        "{} - HP: {}/{}  DMG: {}  ARM: {}  Gold: {}",
        p.name,
        p.hp(),
        p.max_hp(),
        p.damage(),
        p.armor_class(),
        p.gold()
    ))
}

fn equip_mark(equipped: bool) -> &'static str {
    if equipped {
        " (E)"
    } else {
        ""
    }
}

fn menu_lines(options: &[&str], cursor: usize) -> Vec<Line<'static>> {
    options
        .iter()
        .enumerate()
        .map(|(i, opt)| entry_line(i == cursor, opt.to_string(), true))
        .collect()
}

fn entry_line(selected: bool, text: String, available: bool) -> Line<'static> {
    let prefix = if selected { "> " } else { "  " };
    let style = match (selected, available) {
        (true, _) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(Color::White),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Yellow)),
        Span::styled(text, style),
    ])
}
