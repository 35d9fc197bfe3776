//! MiniJinja template engine wrapper

use crate::services::ChatSession;
use crate::types::{Conversation, ServerStatus};
use anyhow::Result;
use minijinja::{context, Environment, Error, ErrorKind, Value};
use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();

        env.set_debug(cfg!(debug_assertions));

        // Templates are compiled into the binary
        env.add_template("chat.html", include_str!("../../web/templates/chat.html"))?;
        env.add_template(
            "components/conversation.html",
            include_str!("../../web/templates/components/conversation.html"),
        )?;
        env.add_template(
            "components/message_input.html",
            include_str!("../../web/templates/components/message_input.html"),
        )?;
        env.add_template(
            "components/status.html",
            include_str!("../../web/templates/components/status.html"),
        )?;

        env.add_filter("markdown", markdown_filter);

        Ok(Self { env })
    }

    /// Render a template with context
    pub fn render(&self, template_name: &str, ctx: Value) -> Result<String> {
        let template = self.env.get_template(template_name)?;
        Ok(template.render(ctx)?)
    }

    /// Full chat page showing the session's current cells
    pub fn render_chat_page(&self, session: &ChatSession, model: &str) -> Result<String> {
        self.render(
            "chat.html",
            context! {
                title => "GPT-OSS-20B Chat Interface",
                model => model,
                conversation => &session.conversation,
                system_prompt => &session.system_prompt,
                temperature => session.params.temperature.to_string(),
                max_tokens => session.params.max_tokens,
                message => "",
            },
        )
    }

    pub fn render_conversation(&self, conversation: &Conversation) -> Result<String> {
        self.render(
            "components/conversation.html",
            context! { conversation => conversation },
        )
    }

    /// Conversation list plus an out-of-band swap resetting the input box.
    pub fn render_send_result(
        &self,
        display_text: &str,
        conversation: &Conversation,
    ) -> Result<String> {
        let mut html = self.render_conversation(conversation)?;
        html.push_str(&self.render(
            "components/message_input.html",
            context! { message => display_text, oob => true },
        )?);
        Ok(html)
    }

    pub fn render_status(&self, status: &ServerStatus, checked_at: &str) -> Result<String> {
        self.render(
            "components/status.html",
            context! {
                text => status.to_string(),
                level => status.level(),
                checked_at => checked_at,
            },
        )
    }
}

/// Markdown to HTML. Raw HTML in the source is shown as text, links keep
/// their target only for web, mail and relative URLs, and images collapse to
/// their alt text.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    // Whether each open link was kept, so its end tag can be matched
    let mut open_links: Vec<bool> = Vec::new();

    let parser = Parser::new_ext(markdown, options).filter_map(move |event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link { ref dest_url, .. }) => {
            let keep = is_safe_url(dest_url);
            open_links.push(keep);
            keep.then_some(event)
        }
        Event::End(TagEnd::Link) => open_links.pop().unwrap_or(false).then_some(event),
        Event::Start(Tag::Image { .. }) | Event::End(TagEnd::Image) => None,
        other => Some(other),
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// `http`, `https`, `mailto` or no scheme at all.
fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    match cleaned.find([':', '/', '?', '#']) {
        Some(idx) if cleaned[idx..].starts_with(':') => matches!(
            cleaned[..idx].to_ascii_lowercase().as_str(),
            "http" | "https" | "mailto"
        ),
        _ => true,
    }
}

fn markdown_filter(value: Value) -> Result<Value, Error> {
    let markdown = value
        .as_str()
        .ok_or_else(|| Error::new(ErrorKind::InvalidOperation, "expected string"))?;
    Ok(Value::from_safe_string(markdown_to_html(markdown)))
}
