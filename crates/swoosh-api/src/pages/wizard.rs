//! The four wizard steps: landing, loading, setup, success.

use super::Shell;

fn brand() -> &'static str {
    r#"<header class="brand"><a href="/">Swoosh Bots</a></header>"#
}

/// Step 1: paste a bot token.
pub fn landing() -> String {
    let body = format!(
        r#"{brand}
<main class="card">
  <h1>Launch your Discord bot's website</h1>
  <p class="muted">Paste your bot token to get started.</p>
  <form id="token-form" autocomplete="off">
    <label for="token">Bot token</label>
    <div class="row">
      <input id="token" name="token" type="password" placeholder="Your Discord bot token">
      <button id="toggle-token" type="button" class="ghost">Show</button>
    </div>
    <button type="submit" class="primary">Continue</button>
  </form>
</main>"#,
        brand = brand()
    );

    Shell {
        title: "Swoosh Bots",
        page: "landing",
        data: &[],
        script: true,
    }
    .render(&body)
}

/// Step 2: pretend to initialize, then move on after `delay_ms`.
pub fn loading(delay_ms: u64) -> String {
    let body = format!(
        r#"{brand}
<main class="card center">
  <div class="spinner" aria-hidden="true"></div>
  <h1>Initializing your bot</h1>
  <p class="muted">This only takes a moment.</p>
</main>"#,
        brand = brand()
    );

    Shell {
        title: "Initializing - Swoosh Bots",
        page: "loading",
        data: &[("delay", delay_ms.to_string())],
        script: true,
    }
    .render(&body)
}

/// Step 3: name, invite link, optional logo.
pub fn setup(max_logo_bytes: usize) -> String {
    let body = format!(
        r#"{brand}
<main class="card">
  <h1>Set up your bot's website</h1>
  <form id="setup-form" enctype="multipart/form-data">
    <label for="name">Bot name</label>
    <input id="name" name="name" type="text" maxlength="100" placeholder="Night Owl">
    <label for="serverLink">Server invite link</label>
    <input id="serverLink" name="serverLink" type="url" placeholder="https://discord.gg/...">
    <label for="logo">Logo (optional, up to {limit})</label>
    <input id="logo" name="logo" type="file" accept="image/*">
    <img id="logo-preview" class="logo-preview" alt="" hidden>
    <button type="submit" class="primary">Generate website</button>
  </form>
</main>"#,
        brand = brand(),
        limit = human_size(max_logo_bytes),
    );

    Shell {
        title: "Set up - Swoosh Bots",
        page: "setup",
        data: &[("max-bytes", max_logo_bytes.to_string())],
        script: true,
    }
    .render(&body)
}

/// Step 4: show the generated URL.
pub fn success() -> String {
    let body = format!(
        r#"{brand}
<main class="card">
  <h1>Your website is live</h1>
  <p class="muted" id="bot-name"></p>
  <div class="row">
    <input id="website-url" type="text" readonly>
    <button id="copy-url" type="button" class="ghost">Copy</button>
  </div>
  <a id="visit-site" class="button primary" href="/">Visit website</a>
</main>"#,
        brand = brand()
    );

    Shell {
        title: "Done - Swoosh Bots",
        page: "success",
        data: &[],
        script: true,
    }
    .render(&body)
}

fn human_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    const KIB: usize = 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}
