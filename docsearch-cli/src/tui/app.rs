//! Application state for the interactive search

use docsearch_core::{KeyCode, ResultContainer, ResultLink, SearchWidget};

/// Main application state
pub struct App {
    /// The widget, holding index, matcher and results container
    pub widget: SearchWidget<ResultContainer>,
    /// Search box content
    pub input: String,
    /// Cursor position in `input` (byte offset, always on a char boundary)
    pub cursor: usize,
    /// Selected link (position among rendered links)
    pub selected: usize,
    /// Status message (shown in status bar)
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Link picked with Enter
    pub chosen: Option<ResultLink>,
}

impl App {
    pub fn new(widget: SearchWidget<ResultContainer>) -> Self {
        Self {
            widget,
            input: String::new(),
            cursor: 0,
            selected: 0,
            status_message: None,
            should_quit: false,
            chosen: None,
        }
    }

    /// Replace the search box content and refresh results as if typed
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.cursor = self.input.len();
        self.key_up(KeyCode(0));
    }

    /// Key-down role: page-wide dismiss listener
    pub fn key_down(&mut self, key: KeyCode) {
        self.widget.dismiss(key);
    }

    /// Key-up role: the search box's update listener
    pub fn key_up(&mut self, key: KeyCode) {
        self.selected = 0;
        match self.widget.update(&self.input, Some(key)) {
            Ok(()) => self.status_message = None,
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if let Some((idx, _)) = self.input[..self.cursor].char_indices().next_back() {
            self.input.remove(idx);
            self.cursor = idx;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.input.len() {
            self.input.remove(self.cursor);
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some((idx, _)) = self.input[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(c) = self.input[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.input.len();
    }

    pub fn results(&self) -> &ResultContainer {
        self.widget.presenter()
    }

    fn link_count(&self) -> usize {
        self.results().links().count()
    }

    pub fn select_next(&mut self) {
        let count = self.link_count();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Currently highlighted link, if the container is showing any
    pub fn selected_link(&self) -> Option<&ResultLink> {
        if !self.results().is_visible() {
            return None;
        }
        self.results().links().nth(self.selected)
    }

    /// Pick the highlighted link and quit
    pub fn choose(&mut self) {
        if let Some(link) = self.selected_link().cloned() {
            self.chosen = Some(link);
            self.should_quit = true;
        }
    }
}
