mod error;
mod placement;
mod terminal;
mod view;

use std::cell::Cell;
use std::fs::{self, File};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use nmd_select::{
    Entry, Event, EventResult, Key, NmdSelect, OptionGroup, OptionList, PointerTarget,
    SelectConfig, SelectOption,
};
use serde::Deserialize;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::DemoError;
use crate::placement::{Placement, Rect, place};
use crate::terminal::Terminal;
use crate::view::View;

/// Where the text field sits on screen.
const ANCHOR: Rect = Rect::new(2, 2, 32, 1);

#[derive(Parser)]
#[command(name = "nmd-select-demo")]
#[command(about = "Searchable dropdown select in the terminal", long_about = None)]
struct Cli {
    /// JSON file with an `options` list and an optional `config` table
    options: Option<PathBuf>,

    /// Most rows the dropdown shows at once
    #[arg(long, allow_hyphen_values = true)]
    max_size: Option<String>,

    /// Match the query as one substring instead of word by word
    #[arg(long)]
    substring: bool,

    /// Text shown while the field is empty
    #[arg(long)]
    placeholder: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OptionsFile {
    #[serde(default)]
    config: SelectConfig,
    options: Vec<Entry>,
}

fn cars() -> OptionList {
    OptionList::new([
        OptionGroup::new(
            "Swedish Cars",
            [
                SelectOption::new("volvo", "Volvo"),
                SelectOption::new("saab", "Saab"),
            ],
        )
        .into(),
        OptionGroup::new(
            "German Cars",
            [
                SelectOption::new("mercedes", "Mercedes"),
                SelectOption::new("audi", "Audi"),
            ],
        )
        .into(),
        OptionGroup::new(
            "Other",
            [
                SelectOption::new("vauxhalle", "Vauxhalle"),
                SelectOption::new("vololo", "Vololo"),
            ],
        )
        .into(),
    ])
}

fn load(cli: &Cli) -> Result<NmdSelect, DemoError> {
    let (options, mut config): (OptionList, SelectConfig) = match &cli.options {
        Some(path) => {
            let file: OptionsFile = serde_json::from_str(&fs::read_to_string(path)?)?;
            (file.options.into_iter().collect(), file.config)
        }
        None => (cars(), SelectConfig::default()),
    };

    if let Some(max_size) = &cli.max_size {
        config.set_attribute("max-size", Some(max_size))?;
    }
    if cli.substring {
        config.set_attribute("match-strategy", Some("substring"))?;
    }
    if let Some(placeholder) = &cli.placeholder {
        config.set_attribute("placeholder", Some(placeholder))?;
    }

    log::info!("[load] {} options, config={:?}", options.len(), config);
    Ok(NmdSelect::with_config(options, config))
}

struct App {
    select: NmdSelect,
    /// The field holds keyboard focus. It starts focused.
    focused: bool,
    /// Set by the control's positioner each time it opens.
    placement: Rc<Cell<Option<Placement>>>,
    viewport: Rc<Cell<(u16, u16)>>,
    /// What is on screen, for hit testing.
    view: View,
    status: String,
    quit: bool,
}

impl App {
    fn new(mut select: NmdSelect, viewport: (u16, u16)) -> Self {
        let placement = Rc::new(Cell::new(None));
        let viewport = Rc::new(Cell::new(viewport));
        {
            let placement = Rc::clone(&placement);
            let viewport = Rc::clone(&viewport);
            select.set_positioner(move |rows: usize| {
                let (width, height) = viewport.get();
                placement.set(Some(place(ANCHOR, dropdown_height(rows), width, height)));
            });
        }

        let status = format!("value: {:?}", select.value());
        Self {
            select,
            focused: true,
            placement,
            viewport,
            view: View::default(),
            status,
            quit: false,
        }
    }

    fn handle(&mut self, event: CrosstermEvent) {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
            CrosstermEvent::Mouse(mouse) => self.on_mouse(mouse),
            CrosstermEvent::Paste(text) if self.focused => {
                for c in text.chars().filter(|c| !c.is_control()) {
                    self.forward(Event::key(Key::Char(c)));
                }
            }
            CrosstermEvent::Resize(width, height) => {
                self.viewport.set((width, height));
                if self.select.is_open() {
                    let rows = dropdown_height(self.select.visible_rows());
                    self.placement.set(Some(place(ANCHOR, rows, width, height)));
                }
            }
            _ => {}
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c' | 'q') if ctrl => self.quit = true,
            KeyCode::Tab | KeyCode::BackTab => {
                if self.focused {
                    self.blur();
                } else {
                    self.focused = true;
                }
            }
            _ if self.focused => {
                // Escape the control does not use leaves the field.
                let result = self.forward(Event::from(key));
                if key.code == KeyCode::Esc && !result.is_handled() {
                    self.blur();
                }
            }
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.view.hit(mouse.column, mouse.row) {
                    Some(PointerTarget::Input) => {
                        self.focused = true;
                        self.forward(Event::PointerDown {
                            target: PointerTarget::Input,
                        });
                    }
                    Some(target) => {
                        self.forward(Event::PointerDown { target });
                        // Pressing the list takes focus from the field until release.
                        if self.focused {
                            self.blur();
                        }
                    }
                    None if self.focused => self.blur(),
                    None => {}
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.forward(Event::PointerUp);
            }
            MouseEventKind::ScrollDown if self.select.is_open() => {
                self.forward(Event::key(Key::Down));
            }
            MouseEventKind::ScrollUp if self.select.is_open() => {
                self.forward(Event::key(Key::Up));
            }
            _ => {}
        }
    }

    fn blur(&mut self) {
        self.focused = false;
        self.forward(Event::Blur);
    }

    fn forward(&mut self, event: Event) -> EventResult {
        let result = self.select.handle_event(&event);
        log::trace!("[event] {:?} -> {:?}", event, result);
        result
    }

    /// Pick up the control's notifications after a batch of events.
    fn sync(&mut self) {
        if let Some(value) = self.select.take_change() {
            log::info!("[change] value={:?}", value);
            self.status = format!("value: {:?}", value);
        }
        if self.select.take_focus_request() {
            self.focused = true;
        }
    }

    fn render(&mut self, terminal: &mut Terminal) -> Result<(), DemoError> {
        let placement = match self.placement.get() {
            Some(placement) => placement,
            None => {
                let (width, height) = self.viewport.get();
                place(ANCHOR, dropdown_height(self.select.visible_rows()), width, height)
            }
        };
        self.view = View::build(&self.select, ANCHOR, placement);
        terminal.draw(&self.view, self.focused, &self.status)?;
        self.select.clear_dirty();
        Ok(())
    }
}

/// List rows plus the close row.
fn dropdown_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(1)
}

fn run(cli: &Cli) -> Result<(), DemoError> {
    let select = load(cli)?;
    let mut terminal = Terminal::new()?;
    let mut app = App::new(select, terminal.size()?);
    app.render(&mut terminal)?;

    while !app.quit {
        let events = terminal.poll(Some(Duration::from_millis(250)))?;
        let received = !events.is_empty();
        for event in events {
            app.handle(event);
        }
        app.sync();

        if received || app.select.is_dirty() {
            app.render(&mut terminal)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let log_file = File::create("nmd-select-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
