//! Integration tests for retained-tui.
//!
//! These drive whole views through the public API: layout, the render cache,
//! the virtualized table, focus and text entry.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use retained_tui::element::{for_each_descendant, Container};
use retained_tui::event::input::KeyCode;
use retained_tui::geometry::{Size, Spacing};
use retained_tui::testing::snapshot::render_to_string;
use retained_tui::testing::Pilot;
use retained_tui::widgets::{Button, Label, RedrawFlag, Spacer, Table, TableModel, TextInput, ViewModel};
use retained_tui::{AppConfig, BuildContext, Element, ElementExt, View};

/// Rows with trailing blanks removed, and no trailing blank rows.
fn trimmed(text: &str) -> String {
    let rows: Vec<&str> = text.split('\n').map(str::trim_end).collect();
    rows.join("\n").trim_end().to_string()
}

// ---------------------------------------------------------------------------
// A searchable directory
// ---------------------------------------------------------------------------

struct Person {
    id: usize,
    name: String,
}

struct People {
    all: Vec<Person>,
    shown: Vec<usize>,
    search: String,
    jump_to: Option<usize>,
    redraw: RedrawFlag,
}

impl People {
    fn new(count: usize) -> Rc<RefCell<Self>> {
        let all: Vec<Person> = (0..count).map(|id| Person { id, name: format!("person {id:03}") }).collect();
        let shown = (0..count).collect();
        Rc::new(RefCell::new(Self { all, shown, search: String::new(), jump_to: None, redraw: RedrawFlag::default() }))
    }

    fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.shown = self.all.iter().filter(|p| p.name.contains(search)).map(|p| p.id).collect();
        self.request_redraw();
    }

    fn jump(&mut self, row: usize) {
        self.jump_to = Some(row);
        self.request_redraw();
    }
}

impl ViewModel for People {
    fn needs_redraw(&mut self) -> bool {
        self.redraw.take()
    }

    fn request_redraw(&mut self) {
        self.redraw.set();
    }
}

impl TableModel for People {
    type Row = Person;

    fn len(&self) -> usize {
        self.shown.len()
    }

    fn row(&self, index: usize) -> Option<&Person> {
        self.shown.get(index).and_then(|&id| self.all.get(id))
    }

    fn state_fingerprint(&self) -> String {
        self.search.clone()
    }

    fn scroll_position(&self) -> Option<usize> {
        self.jump_to
    }

    fn invalidate_scroll_position(&mut self) {
        self.jump_to = None;
    }
}

struct Directory {
    people: Rc<RefCell<People>>,
}

impl View for Directory {
    fn content(&mut self, cx: &mut BuildContext<'_>) -> Box<dyn Element> {
        let search = self.people.borrow().search.clone();
        let model = Rc::clone(&self.people);
        let input = TextInput::new("search")
            .with_value(search)
            .with_placeholder("search")
            .with_length(10)
            .on_change(move |value| model.borrow_mut().set_search(value));

        let table = Table::new(cx, "people", Rc::clone(&self.people), |person: &Person, _| {
            Label::new(person.name.clone())
                .with_key(format!("person-{}", person.id))
                .with_padding(Spacing::ZERO)
                .boxed()
        });
        cx.vertical(vec![input.boxed(), table.boxed()]).boxed()
    }
}

fn directory(count: usize) -> (Pilot<Directory>, Rc<RefCell<People>>) {
    let people = People::new(count);
    let view = Directory { people: Rc::clone(&people) };
    let mut pilot = match Pilot::with_config(view, AppConfig::new().with_gutter(0), 10, 4) {
        Ok(pilot) => pilot,
        Err(err) => panic!("config rejected: {err}"),
    };
    pilot.register_model(people.clone());
    (pilot, people)
}

#[test]
fn directory_shows_the_first_rows() {
    let (pilot, _) = directory(500);
    insta::assert_snapshot!(trimmed(&pilot.screen_text()), @r"
    search
    person 000
    person 001
    person 002
    ");
}

#[test]
fn wheel_scrolls_the_table() {
    let (mut pilot, _) = directory(500);
    pilot.scroll(0, 2, 3);
    insta::assert_snapshot!(trimmed(&pilot.screen_text()), @r"
    search
    person 003
    person 004
    person 005
    ");

    pilot.scroll(0, 2, -10);
    assert_eq!(pilot.row(1).trim_end(), "person 000");
}

#[test]
fn scrolling_stops_at_the_last_row() {
    let (mut pilot, _) = directory(5);
    pilot.scroll(0, 2, 100);
    assert_eq!(pilot.row(1).trim_end(), "person 004");
    assert_eq!(pilot.row(2).trim_end(), "");
}

#[test]
fn search_filters_through_the_bound_input() {
    let (mut pilot, people) = directory(500);
    pilot.click(1, 0);
    pilot.type_text("7");
    assert_eq!(people.borrow().search, "7");
    insta::assert_snapshot!(trimmed(&pilot.screen_text()), @r"
    7
    person 007
    person 017
    person 027
    ");

    pilot.press(KeyCode::Backspace);
    assert_eq!(pilot.row(1).trim_end(), "person 000");
}

#[test]
fn unchanged_frames_come_from_the_cache() {
    let (mut pilot, _) = directory(500);
    let before = pilot.app().screen.cache_stats();
    assert_eq!(pilot.frame(), 0);
    let after = pilot.app().screen.cache_stats();
    assert!(after.hits > before.hits);
}

#[test]
fn jump_request_redraws_a_cached_table() {
    let (mut pilot, people) = directory(500);
    pilot.frame();
    let hits = pilot.app().screen.cache_stats().hits;
    assert!(hits > 0);

    people.borrow_mut().jump(20);
    pilot.frame();
    insta::assert_snapshot!(trimmed(&pilot.screen_text()), @r"
    search
    person 020
    person 021
    person 022
    ");

    // the wheel takes over from the jump
    pilot.scroll(0, 2, 1);
    assert_eq!(people.borrow().jump_to, None);
    assert_eq!(pilot.row(1).trim_end(), "person 021");
}

#[test]
fn empty_directory_draws_only_the_input() {
    let (mut pilot, people) = directory(0);
    assert_eq!(trimmed(&pilot.screen_text()), "search");
    pilot.scroll(0, 2, 5);
    assert_eq!(people.borrow().len(), 0);
    assert!(pilot.is_running());
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

fn toolbar() -> Container {
    Container::horizontal(vec![
        Label::new("a").with_key("a").with_padding(Spacing::ZERO).boxed(),
        Spacer::new().boxed(),
        Label::new("b").with_key("b").with_padding(Spacing::ZERO).boxed(),
    ])
}

#[test]
fn spacer_takes_the_slack() {
    let text = render_to_string(&mut toolbar(), 12, 1);
    assert_eq!(text, "a          b");
}

#[test]
fn measuring_an_unmodified_tree_twice_agrees() {
    let mut tree = Container::vertical(vec![
        toolbar().boxed(),
        Label::new("title").border(1, 0, "white").boxed(),
        TextInput::new("name").boxed(),
    ]);
    let first = tree.desired_size();
    for_each_descendant(&mut tree, &mut |el| el.node_mut().invalidate());
    assert_eq!(tree.desired_size(), first);
    assert_eq!(first, Size::new(20, 1 + 1 + 3 + 1 + 1));
}

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

struct Counter {
    clicks: Rc<RefCell<u32>>,
}

impl View for Counter {
    fn content(&mut self, cx: &mut BuildContext<'_>) -> Box<dyn Element> {
        let clicks = Rc::clone(&self.clicks);
        let label = format!("{}", self.clicks.borrow());
        cx.horizontal(vec![
            Button::new("add", "add")
                .on_click(move |cx| {
                    *clicks.borrow_mut() += 1;
                    cx.request_redraw();
                })
                .boxed(),
            Label::new(label).with_key("count").boxed(),
        ])
        .boxed()
    }
}

#[test]
fn button_click_rebuilds_the_view() {
    let clicks = Rc::new(RefCell::new(0));
    let mut pilot = Pilot::new(Counter { clicks: Rc::clone(&clicks) }, 11, 3);
    insta::assert_snapshot!(trimmed(&pilot.screen_text()), @r"
    ╭─────╮
    │ add │  0
    ╰─────╯
    ");

    pilot.click(2, 1);
    pilot.click(2, 1);
    assert_eq!(*clicks.borrow(), 2);
    assert!(pilot.row(1).trim_end().ends_with('2'));
}

#[test]
fn hovering_a_button_repaints_it() {
    let clicks = Rc::new(RefCell::new(0));
    let mut pilot = Pilot::new(Counter { clicks }, 11, 3);
    pilot.hover(2, 1);
    // the label text is unchanged, only its colors
    assert_eq!(pilot.row(1).trim_end(), "│ add │  0");
    let screen = pilot.app().screen.compositor();
    let cell = screen.get_cell(3, 1).map(|c| c.style.bg.clone());
    assert_eq!(cell, Some(Some("#1e3278".to_string())));
}
