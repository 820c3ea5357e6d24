//! A generated bot's public page, and the page shown when no bot matches.

use swoosh_common::models::bot::{Bot, BOT_COMMANDS};

use super::{escape, Shell};

/// Render the public page for `bot`. `year` goes in the footer.
pub fn bot_page(bot: &Bot, year: i32) -> String {
    let name = escape(&bot.name);
    let invite = escape(&bot.server_link);

    let logo = match &bot.logo_url {
        Some(url) => format!(
            r#"<img class="bot-logo" src="{}" alt="{name} logo">"#,
            escape(url)
        ),
        None => format!(
            r#"<div class="bot-logo placeholder" aria-hidden="true">{}</div>"#,
            escape(&initial(&bot.name))
        ),
    };

    let commands: String = BOT_COMMANDS
        .iter()
        .map(|c| {
            format!(
                "      <li><code>{}</code><span>{}</span></li>\n",
                escape(c.name),
                escape(c.description)
            )
        })
        .collect();

    let body = format!(
        r#"<main class="bot">
  <section class="hero">
    {logo}
    <h1>{name}</h1>
    <p class="tagline">A powerful Discord moderation bot</p>
    <a class="button primary" href="{invite}" rel="noopener noreferrer">Add to Your Server</a>
  </section>
  <section class="card">
    <h2>Bot Commands</h2>
    <ul class="commands">
{commands}    </ul>
  </section>
</main>
<footer class="footer">
  <p>&copy; {year} {name} &bull; Powered by Swoosh Bots</p>
  <nav><a href="/">Home</a> <a href="{invite}" rel="noopener noreferrer">Join Server</a></nav>
</footer>"#
    );

    Shell {
        title: &bot.name,
        page: "bot",
        data: &[],
        script: false,
    }
    .render(&body)
}

/// Rendered with a 404 for unknown bots and unknown paths alike.
pub fn not_found() -> String {
    let body = r#"<main class="card center">
  <h1>Bot Not Found</h1>
  <p class="muted">There is no bot website at this address.</p>
  <a class="button primary" href="/">Back to Home</a>
</main>"#;

    Shell {
        title: "Bot Not Found - Swoosh Bots",
        page: "not-found",
        data: &[],
        script: false,
    }
    .render(body)
}

fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
