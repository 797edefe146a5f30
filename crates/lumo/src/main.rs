mod surface;

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lumo_config::Settings;
use lumo_core::Viewport;
use lumo_sim::{AnimationSystem, Palette, SimOptions};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    symbols::Marker,
    text::Line,
    widgets::canvas::Canvas,
};

use crate::surface::CanvasSurface;

/// Logical pixels per terminal cell, keeping the sim's tuned constants
/// (connection distance, radii, slide speed) in a sensible scale.
const PX_PER_CELL_X: f64 = 8.0;
const PX_PER_CELL_Y: f64 = 16.0;

/// How long a status toast stays visible.
const TOAST_DURATION: Duration = Duration::from_secs(3);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config_path = lumo_config::config_path()?;
    let settings = lumo_config::load(&config_path);
    let terminal = ratatui::init();
    let result = App::new(settings, config_path).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    settings: Settings,
    config_path: PathBuf,
    system: AnimationSystem,
    surface: CanvasSurface,
    /// Wall clock of the previous frame, for the tick delta.
    last_frame: Instant,
    /// When the last reroll fired (manual or automatic).
    last_reroll: Instant,
    /// Transient status message and when it was raised.
    toast: Option<(String, Instant)>,
}

impl App {
    pub fn new(settings: Settings, config_path: PathBuf) -> Self {
        let palette = Palette::from_css(&settings.dark_palette, &settings.light_palette);
        // Placeholder dimensions; the real ones arrive with the first frame.
        let viewport = Viewport::new(80.0 * PX_PER_CELL_X, 24.0 * PX_PER_CELL_Y);
        let mut system = AnimationSystem::new(
            viewport,
            SimOptions {
                seed: settings.seed,
                palette: Some(palette),
            },
        );
        // Open on a slide-in rather than a static field.
        system.request_change();

        let now = Instant::now();
        Self {
            running: false,
            settings,
            config_path,
            system,
            surface: CanvasSurface::new(),
            last_frame: now,
            last_reroll: now,
            toast: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Advance the animation by the elapsed wall-clock time and draw it.
    fn render(&mut self, frame: &mut Frame) {
        let chunks =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());
        let canvas_area = chunks[0];

        let viewport = Viewport::new(
            f64::from(canvas_area.width) * PX_PER_CELL_X,
            f64::from(canvas_area.height) * PX_PER_CELL_Y,
        );
        if viewport != self.system.viewport() {
            self.system.set_viewport(viewport);
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        if self.settings.auto_reroll
            && now.duration_since(self.last_reroll).as_secs() >= self.settings.reroll_period_secs
        {
            self.system.request_change();
            self.last_reroll = now;
        }

        if let Some((_, raised)) = &self.toast {
            if raised.elapsed() > TOAST_DURATION {
                self.toast = None;
            }
        }

        let theme = self.settings.theme;
        self.surface.begin_frame(viewport, theme);
        self.system.tick(delta, theme, &mut self.surface);

        let shapes = self.surface.shapes();
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(self.surface.background())
            .x_bounds([0.0, viewport.width])
            .y_bounds([0.0, viewport.height])
            .paint(|ctx| surface::replay(ctx, shapes));
        frame.render_widget(canvas, canvas_area);

        self.render_status(frame, chunks[1]);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if let Some((message, _)) = &self.toast {
            frame.render_widget(Line::from(message.as_str()).red().centered(), area);
            return;
        }

        let auto = if self.settings.auto_reroll {
            format!(" auto reroll {}s  ", self.settings.reroll_period_secs)
        } else {
            " auto reroll off  ".to_string()
        };
        let help = Line::from(vec![
            "q".bold(),
            " quit  ".dark_gray(),
            "r".bold(),
            " reroll  ".dark_gray(),
            "t".bold(),
            " theme  ".dark_gray(),
            "a".bold(),
            auto.dark_gray(),
            "p".bold(),
            " period".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with a timeout to keep the animation ticking.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                // New dimensions are picked up from the next frame's area.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('r') | KeyCode::Char(' ')) => self.reroll(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char('a')) => self.toggle_auto_reroll(),
            (_, KeyCode::Char('p')) => self.cycle_reroll_period(),
            _ => {}
        }
    }

    fn reroll(&mut self) {
        self.system.request_change();
        self.last_reroll = Instant::now();
    }

    fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggle();
        self.persist();
    }

    fn toggle_auto_reroll(&mut self) {
        self.settings.auto_reroll = !self.settings.auto_reroll;
        self.last_reroll = Instant::now();
        self.persist();
    }

    fn cycle_reroll_period(&mut self) {
        self.settings.cycle_reroll_period();
        self.last_reroll = Instant::now();
        self.persist();
    }

    /// Best-effort save; failures surface as a transient toast, no retry.
    fn persist(&mut self) {
        if let Err(err) = lumo_config::save(&self.config_path, &self.settings) {
            self.toast = Some((format!("could not save settings: {err}"), Instant::now()));
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
