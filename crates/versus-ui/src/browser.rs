use crate::clipboard::set_clipboard_text;
use crate::common::show_message;
use crate::palette::Palette;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Terminal,
};
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use versus_core::highlight::highlight;
use versus_core::selection::visible;
use versus_core::variant::{self, Resolution};
use versus_core::{Catalog, ColorScheme, FormattedEntry, Result, Selection, Side, ThemePreference};

const PAGE: u16 = 10;

/// What the event loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Redraw,
    Copy(String),
    ToggleTheme,
    Quit,
}

/// Browser state on top of the selection
pub struct BrowserState<'a> {
    catalog: &'a Catalog,
    entries: &'a [FormattedEntry],
    pub selection: Selection,
    pub scroll: u16,
}

impl<'a> BrowserState<'a> {
    pub fn new(catalog: &'a Catalog, entries: &'a [FormattedEntry]) -> Self {
        Self {
            catalog,
            entries,
            selection: Selection::initial(catalog),
            scroll: 0,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Action {
        let catalog = self.catalog;
        let next = match code {
            KeyCode::Right => self.selection.cycle_section(catalog, true),
            KeyCode::Left => self.selection.cycle_section(catalog, false),
            KeyCode::Tab => self.selection.cycle_subsection(catalog, true),
            KeyCode::BackTab => self.selection.cycle_subsection(catalog, false),
            KeyCode::Char(']') => self.selection.cycle_variant(catalog, Side::Left, true),
            KeyCode::Char('[') => self.selection.cycle_variant(catalog, Side::Left, false),
            KeyCode::Char('}') => self.selection.cycle_variant(catalog, Side::Right, true),
            KeyCode::Char('{') => self.selection.cycle_variant(catalog, Side::Right, false),
            KeyCode::Char('a') => self.selection.toggle_show_all(),
            KeyCode::Up => return self.scroll_by(-1),
            KeyCode::Down => return self.scroll_by(1),
            KeyCode::PageUp => return self.scroll_by(-(PAGE as i32)),
            KeyCode::PageDown => return self.scroll_by(PAGE as i32),
            KeyCode::Char('y') => {
                return match self.copy_target() {
                    Some(text) => Action::Copy(text),
                    None => Action::None,
                }
            }
            KeyCode::Char('t') => return Action::ToggleTheme,
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            _ => return Action::None,
        };

        if next == self.selection {
            return Action::None;
        }
        if next.section != self.selection.section
            || next.subsection != self.selection.subsection
            || next.show_all != self.selection.show_all
        {
            self.scroll = 0;
        }
        debug!(
            "Selection: {} / {} ({} vs {})",
            next.section, next.subsection, next.left, next.right
        );
        self.selection = next;
        Action::Redraw
    }

    fn scroll_by(&mut self, delta: i32) -> Action {
        let next = (self.scroll as i32 + delta).clamp(0, u16::MAX as i32) as u16;
        if next == self.scroll {
            return Action::None;
        }
        self.scroll = next;
        Action::Redraw
    }

    /// Right column text of the first visible entry
    fn copy_target(&self) -> Option<String> {
        visible(self.entries, &self.selection)
            .next()
            .map(|entry| variant::resolve_text(&entry.variants, &self.selection.right).to_string())
    }

    /// Both code columns, each entry padded so the two sides line up
    pub fn columns(&self, palette: &Palette) -> (Vec<Line<'static>>, Vec<Line<'static>>) {
        let mut left = Vec::new();
        let mut right = Vec::new();

        for entry in visible(self.entries, &self.selection) {
            if self.selection.show_all {
                let heading = format!("{} / {}", entry.section, entry.subsection);
                left.push(Line::from(Span::styled(heading.clone(), palette.heading())));
                right.push(Line::from(Span::styled(heading, palette.heading())));
            }

            let mut l = code_lines(entry, &self.selection.left, palette);
            let mut r = code_lines(entry, &self.selection.right, palette);
            let height = l.len().max(r.len());
            l.resize(height, Line::from(""));
            r.resize(height, Line::from(""));
            left.extend(l);
            right.extend(r);

            left.push(Line::from(""));
            right.push(Line::from(""));
        }

        (left, right)
    }
}

fn code_lines(entry: &FormattedEntry, name: &str, palette: &Palette) -> Vec<Line<'static>> {
    let (text, resolution) = variant::resolve(&entry.variants, name);
    if resolution == Resolution::Placeholder {
        return vec![Line::from(Span::styled(text.to_string(), palette.placeholder()))];
    }
    highlight(text)
        .into_iter()
        .map(|line| {
            Line::from(
                line.into_iter()
                    .map(|token| Span::styled(token.text, palette.token(token.class)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn tab_titles(names: Vec<&str>) -> Vec<Line<'_>> {
    names.into_iter().map(Line::from).collect()
}

fn selected_index(names: &[&str], current: &str) -> usize {
    names.iter().position(|name| *name == current).unwrap_or(0)
}

/// Display the terminal browser until the user quits.
///
/// The color scheme is read from `theme` when the browser starts and
/// follows its changes while the browser runs.
pub fn display_browser(
    entries: &[FormattedEntry],
    catalog: &Catalog,
    theme: &ThemePreference,
) -> Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_browser(&mut terminal, entries, catalog, theme);

    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    result
}

fn run_browser(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    entries: &[FormattedEntry],
    catalog: &Catalog,
    theme: &ThemePreference,
) -> Result<()> {
    let mut state = BrowserState::new(catalog, entries);
    let mut subscription = theme.subscribe();
    let mut scheme: ColorScheme = subscription.current();

    let mut last_render = Instant::now();
    const RENDER_INTERVAL: Duration = Duration::from_millis(33);
    let mut force_render = true;

    loop {
        if let Some(changed) = subscription.poll_change() {
            scheme = changed;
            force_render = true;
        }

        let palette = Palette::for_scheme(scheme);
        let now = Instant::now();
        if force_render || now.duration_since(last_render) >= RENDER_INTERVAL {
            let (left, right) = state.columns(&palette);
            let selection = &state.selection;
            let scroll = state.scroll;

            terminal.draw(|f| {
                f.render_widget(Block::default().style(palette.base()), f.size());

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3), // Sections
                        Constraint::Length(3), // Subsections
                        Constraint::Length(1), // Variant bar
                        Constraint::Min(5),    // Code
                        Constraint::Length(1), // Help
                    ])
                    .split(f.size());

                let tab_style = palette.base().fg(palette.muted);
                let active = Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD);

                let sections = catalog.sections();
                let section_tabs = Tabs::new(tab_titles(sections.clone()))
                    .select(selected_index(&sections, &selection.section))
                    .style(tab_style)
                    .highlight_style(active)
                    .block(Block::default().borders(Borders::ALL).title(" Sections "));
                f.render_widget(section_tabs, chunks[0]);

                let subsections = catalog.subsections(&selection.section).unwrap_or_default();
                let subsection_tabs = Tabs::new(tab_titles(subsections.clone()))
                    .select(selected_index(&subsections, &selection.subsection))
                    .style(tab_style)
                    .highlight_style(if selection.show_all { tab_style } else { active })
                    .block(Block::default().borders(Borders::ALL).title(" Subsections "));
                f.render_widget(subsection_tabs, chunks[1]);

                let variant_bar = Paragraph::new(Line::from(vec![
                    Span::styled(variant::label(&selection.left).to_string(), active),
                    Span::styled("  vs  ", palette.base()),
                    Span::styled(variant::label(&selection.right).to_string(), active),
                    Span::styled(
                        if selection.show_all { "   [showing all]" } else { "" },
                        palette.base().fg(palette.muted),
                    ),
                ]))
                .alignment(Alignment::Center);
                f.render_widget(variant_bar, chunks[2]);

                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(chunks[3]);

                let left_block = Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", variant::label(&selection.left)));
                f.render_widget(
                    Paragraph::new(left.clone())
                        .style(palette.base())
                        .block(left_block)
                        .scroll((scroll, 0)),
                    columns[0],
                );

                let right_block = Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", variant::label(&selection.right)));
                f.render_widget(
                    Paragraph::new(right.clone())
                        .style(palette.base())
                        .block(right_block)
                        .scroll((scroll, 0)),
                    columns[1],
                );

                let help = Paragraph::new(
                    "←/→: Section | Tab: Subsection | [ ]: Left | { }: Right | a: All | y: Copy | t: Theme | q: Quit",
                )
                .style(palette.base().fg(palette.muted))
                .alignment(Alignment::Center);
                f.render_widget(help, chunks[4]);
            })?;

            last_render = now;
            force_render = false;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match state.handle_key(key.code) {
                    Action::None => {}
                    Action::Redraw => force_render = true,
                    Action::Copy(text) => {
                        let message = match set_clipboard_text(&text) {
                            Ok(()) => "Copied to clipboard".to_string(),
                            Err(e) => {
                                warn!("Copy failed: {}", e);
                                format!("Copy failed: {}", e)
                            }
                        };
                        show_message(terminal, &message, &palette, 800)?;
                        force_render = true;
                    }
                    Action::ToggleTheme => {
                        theme.toggle();
                    }
                    Action::Quit => break,
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use versus_core::catalog::CatalogBuilder;
    use versus_core::{formatted_code, PLACEHOLDER};

    fn fixture() -> (Catalog, Vec<FormattedEntry>) {
        let mut builder = CatalogBuilder::new();
        builder
            .add_entry("A", "a1", vec![("prisma", "one()"), ("convex", "two()\nthree()")])
            .unwrap();
        builder
            .add_entry("A", "a2", vec![("prisma", "four()"), ("convex", "five()")])
            .unwrap();
        builder
            .add_entry(
                "B",
                "b1",
                vec![("prisma", "six()"), ("convex", "seven()"), ("convexEnts", "eight()")],
            )
            .unwrap();
        let catalog = builder.build().unwrap();
        let entries = formatted_code(&catalog).unwrap();
        (catalog, entries)
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn keys_drive_the_selection() {
        let (catalog, entries) = fixture();
        let mut state = BrowserState::new(&catalog, &entries);

        assert_eq!(state.handle_key(KeyCode::Tab), Action::Redraw);
        assert_eq!(state.selection.subsection, "a2");

        assert_eq!(state.handle_key(KeyCode::Right), Action::Redraw);
        assert_eq!(
            (state.selection.section.as_str(), state.selection.subsection.as_str()),
            ("B", "b1")
        );

        state.handle_key(KeyCode::Char('}'));
        assert_eq!(state.selection.right, "convexEnts");
        state.handle_key(KeyCode::Char('}'));
        assert_eq!(state.selection.right, "prisma");

        assert_eq!(state.handle_key(KeyCode::Char('q')), Action::Quit);
        assert_eq!(state.handle_key(KeyCode::Char('t')), Action::ToggleTheme);
        assert_eq!(state.handle_key(KeyCode::F(5)), Action::None);
    }

    #[test]
    fn scrolling_resets_on_navigation() {
        let (catalog, entries) = fixture();
        let mut state = BrowserState::new(&catalog, &entries);
        assert_eq!(state.handle_key(KeyCode::Up), Action::None);
        state.handle_key(KeyCode::PageDown);
        assert_eq!(state.scroll, PAGE);
        state.handle_key(KeyCode::Char('a'));
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn columns_line_up_per_entry() {
        let (catalog, entries) = fixture();
        let state = BrowserState::new(&catalog, &entries);
        let palette = Palette::for_scheme(ColorScheme::Dark);
        let (left, right) = state.columns(&palette);
        assert_eq!(left.len(), right.len());
        assert_eq!(text(&left[0]), "one();");
        assert_eq!(text(&left[1]), "");
        assert_eq!(text(&right[0]), "two();");
        assert_eq!(text(&right[1]), "three();");
    }

    #[test]
    fn show_all_adds_headings_and_placeholders() {
        let (catalog, entries) = fixture();
        let mut state = BrowserState::new(&catalog, &entries);
        state.handle_key(KeyCode::Char('a'));
        state.handle_key(KeyCode::Char('{'));
        assert_eq!(state.selection.right, "prisma");
        state.handle_key(KeyCode::Char('{'));
        assert_eq!(state.selection.right, "convexEnts");

        let palette = Palette::for_scheme(ColorScheme::Light);
        let (_, right) = state.columns(&palette);
        let lines: Vec<String> = right.iter().map(text).collect();
        assert_eq!(lines[0], "A / a1");
        assert_eq!(lines[1], PLACEHOLDER);
        assert!(lines.contains(&"eight();".to_string()));
    }

    #[test]
    fn copies_the_right_column() {
        let (catalog, entries) = fixture();
        let mut state = BrowserState::new(&catalog, &entries);
        assert_eq!(
            state.handle_key(KeyCode::Char('y')),
            Action::Copy("two();\nthree();".to_string())
        );
    }
}
