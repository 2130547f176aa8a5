//! People directory: a search box, scroll buttons and a virtualized table
//! over ten thousand rows.
//!
//! Run with `cargo run --example tableview`. Logs go to `tableview.log`
//! (`RUST_LOG=retained_tui=trace` shows cache and window decisions).

use std::cell::RefCell;
use std::rc::Rc;

use retained_tui::element::Container;
use retained_tui::geometry::Spacing;
use retained_tui::render::strip::CellStyle;
use retained_tui::widgets::{
    Button, Label, RedrawFlag, Spacer, Table, TableDelegate, TableModel, TextInput, ViewModel,
};
use retained_tui::{App, AppConfig, BuildContext, Element, ElementExt, View};

const CITIES: [&str; 6] = ["Lisbon", "Oslo", "Nairobi", "Lima", "Osaka", "Tunis"];
const FIRST: [&str; 8] = ["Ada", "Grace", "Alan", "Edsger", "Barbara", "Ken", "Frances", "Niklaus"];

struct Person {
    id: usize,
    name: String,
    city: &'static str,
}

#[derive(Default)]
struct People {
    all: Vec<Person>,
    shown: Vec<usize>,
    search: String,
    jump_to: Option<usize>,
    delegate: Option<TableDelegate>,
    redraw: RedrawFlag,
}

impl People {
    fn generate(count: usize) -> Self {
        let all = (0..count)
            .map(|id| Person {
                id,
                name: format!("{} #{id}", FIRST[id % FIRST.len()]),
                city: CITIES[(id * 7) % CITIES.len()],
            })
            .collect();
        let mut people = Self { all, ..Self::default() };
        people.filter("");
        people
    }

    fn filter(&mut self, search: &str) {
        let needle = search.to_lowercase();
        self.search = search.to_string();
        self.shown = self
            .all
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle) || p.city.to_lowercase().contains(&needle))
            .map(|p| p.id)
            .collect();
        self.request_redraw();
    }

    /// Move the top row by `rows`, starting from where the table is now.
    fn page(&mut self, rows: isize) {
        let current = self.delegate.as_ref().map(TableDelegate::current_row).unwrap_or(0);
        let last = self.shown.len().saturating_sub(1);
        self.jump_to = Some(current.saturating_add_signed(rows).min(last));
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

    fn register_table_delegate(&mut self, delegate: TableDelegate) {
        self.delegate = Some(delegate);
    }
}

struct Directory {
    people: Rc<RefCell<People>>,
}

impl Directory {
    fn scroll_button(&self, key: &str, text: &str, action: fn(&mut People)) -> Box<dyn Element> {
        let people = Rc::clone(&self.people);
        Button::new(key, text).on_click(move |_| action(&mut people.borrow_mut())).boxed()
    }
}

fn person_row(person: &Person, _index: usize) -> Box<dyn Element> {
    let plain = Spacing::symmetric(1, 0);
    Container::horizontal(vec![
        Label::new(person.name.clone()).with_key(format!("name-{}", person.id)).with_padding(plain).boxed(),
        Spacer::new().boxed(),
        Label::new(person.city)
            .with_key(format!("city-{}", person.id))
            .with_style(CellStyle::new().fg("cyan"))
            .with_padding(plain)
            .boxed(),
    ])
    .with_key(format!("row-{}", person.id))
    .boxed()
}

impl View for Directory {
    fn content(&mut self, cx: &mut BuildContext<'_>) -> Box<dyn Element> {
        let (search, shown) = {
            let people = self.people.borrow();
            (people.search.clone(), people.shown.len())
        };

        let model = Rc::clone(&self.people);
        let search_box = TextInput::new("search")
            .with_value(search)
            .with_placeholder("search name or city")
            .with_length(24)
            .on_change(move |value| model.borrow_mut().filter(value));

        let header = cx.horizontal(vec![
            Label::new("People").with_key("title").with_style(CellStyle::new().bold()).boxed(),
            Spacer::new().boxed(),
            search_box.boxed(),
        ]);

        let controls = cx.horizontal(vec![
            self.scroll_button("top", "top", |p| p.jump(0)),
            self.scroll_button("up", "page up", |p| p.page(-10)),
            self.scroll_button("down", "page down", |p| p.page(10)),
            Spacer::new().boxed(),
            Label::new(format!("{shown} shown")).with_key("count").boxed(),
        ]);

        let table = Table::new(cx, "people", Rc::clone(&self.people), person_row);

        cx.vertical(vec![header.boxed(), controls.boxed(), table.background("#101418").boxed()])
            .with_key("directory")
            .boxed()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> retained_tui::Result<()> {
    let people = Rc::new(RefCell::new(People::generate(10_000)));
    let config = AppConfig::new()
        .with_title("retained-tui: people")
        .with_scroll_step(1)
        .with_log_path("tableview.log");

    let mut app = App::new(Directory { people: Rc::clone(&people) }, config)?;
    app.register_model(people);
    app.run().await
}
