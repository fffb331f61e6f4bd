//! HTML rendering.
//!
//! Templates are compiled into the binary and fed plain view models, never
//! store types directly. Auto-escaping is on for `.html` templates.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::board::Message;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("form.html", include_str!("../../templates/form.html")),
];

#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub id: i64,
    pub content: String,
    pub posted_at: String,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.0,
            content: message.content.clone(),
            posted_at: message.posted_at(),
        }
    }
}

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(*name, *source)?;
        }

        Ok(Self { env })
    }

    /// Renders the home page; `latest` is `None` on an empty board.
    pub fn home(&self, latest: Option<&Message>) -> Result<String, minijinja::Error> {
        let messages: Vec<MessageView> = latest.into_iter().map(MessageView::from).collect();

        self.env
            .get_template("home.html")?
            .render(context! { messages => messages })
    }

    pub fn form(&self) -> Result<String, minijinja::Error> {
        self.env.get_template("form.html")?.render(context! {})
    }
}
