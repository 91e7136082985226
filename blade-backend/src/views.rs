//! Server-rendered HTML pages.
//!
//! Pages are plain strings built with `format!`; styling and behavior live
//! in the static files under the public directory.

use crate::catalog::Product;

/// Escape text for HTML body and attribute context.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str, scripts: &[&str]) -> String {
    let script_tags: String = std::iter::once(&"/js/common.js")
        .chain(scripts)
        .map(|src| format!("<script src=\"{}\" defer></script>\n", src))
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="theme-color" content="#0b0b0b">
<title>{title} | Blade</title>
<link rel="manifest" href="/manifest.json">
<link rel="icon" href="/images/logo.svg" type="image/svg+xml">
<link rel="stylesheet" href="/css/style.css">
</head>
<body>
<header class="site-header">
  <a class="brand" href="/">Blade</a>
  <button class="nav-toggle" aria-expanded="false" aria-controls="nav-panel">Menu</button>
  <nav id="nav-panel">
    <a href="/#services">Services</a>
    <a href="/products">Products</a>
    <a href="/#rewards">Rewards</a>
    <a href="/ai">BladeAI</a>
    <a href="/#franchise">Franchise</a>
  </nav>
</header>
<main>
{body}
</main>
<footer class="site-footer">&copy; <span id="footer-year"></span> Blade Grooming</footer>
<script>if ("serviceWorker" in navigator) navigator.serviceWorker.register("/sw.js");</script>
{script_tags}</body>
</html>"##,
        title = escape(title),
        body = body,
        script_tags = script_tags,
    )
}

fn product_cards(products: &[Product]) -> String {
    products
        .iter()
        .map(|p| {
            format!(
                r##"<article class="product-card">
  <img src="{image}" alt="{name}" loading="lazy">
  <h3>{name}</h3>
  <p class="price">${price}</p>
  <p>{description}</p>
  <p class="highlight">{highlight}</p>
  <button data-product="{id}">Buy now</button>
</article>"##,
                image = escape(p.image),
                name = escape(p.name),
                price = p.price,
                description = escape(p.description),
                highlight = escape(p.highlight),
                id = escape(p.id),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn home_page(products: &[Product]) -> String {
    let body = format!(
        r##"<section class="hero">
  <h1>Sharp cuts. Clean shaves. No shortcuts.</h1>
  <p>Barbershop grooming you can take home.</p>
  <a class="cta" href="/#shop">Shop the range</a>
</section>

<section id="assist" class="assist">
  <h2>Find it fast</h2>
  <input id="assist-input" type="text" placeholder="Try book, services or franchise">
  <button id="assist-btn">Search</button>
  <p id="assist-reply"></p>
  <ul id="assist-results"></ul>
</section>

<section id="shop" class="shop">
  <h2>Shop</h2>
  <div class="product-grid">
{cards}
  </div>
  <p id="checkout-status" role="status"></p>
</section>

<section id="chat" class="chat">
  <h2>Ask Blade</h2>
  <div id="chat-box" class="chat-box" aria-live="polite"></div>
  <input id="user-input" type="text" placeholder="Ask about razors, beard care, franchising...">
  <button id="send-btn">Send</button>
</section>

<section id="rewards" class="rewards">
  <h2>Blade Rewards</h2>
  <form id="rewards-signup">
    <input name="name" type="text" placeholder="Name" required>
    <input name="email" type="email" placeholder="Email" required>
    <button type="submit">Join</button>
  </form>
  <p id="rewards-signup-status" role="status"></p>
  <form id="rewards-login">
    <input name="email" type="email" placeholder="Email" required>
    <input name="code" type="text" placeholder="Member code" maxlength="6" required>
    <button type="submit">Check points</button>
  </form>
  <div id="rewards-profile"></div>
</section>

<div id="install-banner" class="install-banner" hidden>
  <span>Install Blade for quick booking.</span>
  <button id="install-btn">Install</button>
  <button id="install-dismiss" aria-label="Dismiss">&times;</button>
</div>
<button id="back-to-top" class="back-to-top" aria-label="Back to top">&uarr;</button>"##,
        cards = product_cards(products),
    );
    layout("Grooming", &body, &["/js/main.js"])
}

pub fn products_page(products: &[Product]) -> String {
    let body = format!(
        r##"<section id="shop" class="shop">
  <h1>Products</h1>
  <div class="product-grid">
{cards}
  </div>
  <p id="checkout-status" role="status"></p>
</section>"##,
        cards = product_cards(products),
    );
    layout("Products", &body, &["/js/main.js"])
}

pub fn ai_page() -> String {
    let body = r##"<section class="ai-chat">
  <h1>BladeAI</h1>
  <p>Grooming advice, product info and site help.</p>
  <pre id="ai-output" class="ai-output" aria-live="polite"></pre>
  <form id="ai-form">
    <textarea id="ai-prompt" name="prompt" rows="3" placeholder="Ask BladeAI..."></textarea>
    <button type="submit">Send</button>
  </form>
</section>"##;
    layout("BladeAI", body, &["/js/ai.js"])
}

pub fn admin_login_page(error: Option<&str>) -> String {
    let error_html = error
        .map(|e| format!("<p class=\"error\" role=\"alert\">{}</p>", escape(e)))
        .unwrap_or_default();
    let body = format!(
        r##"<section class="admin-login">
  <h1>Admin login</h1>
  {error_html}
  <form method="post" action="/admin/login">
    <label>Email <input name="email" type="email" required></label>
    <label>Password <input name="password" type="password" required></label>
    <button type="submit">Log in</button>
  </form>
</section>"##,
        error_html = error_html,
    );
    layout("Admin login", &body, &[])
}

pub fn admin_page(admin_email: &str) -> String {
    let body = format!(
        r##"<section class="admin">
  <h1>Admin</h1>
  <p>Signed in as {email}. <a href="/admin/logout">Log out</a></p>
  <label>Admin token (optional while signed in)
    <input id="admin-token" type="password" autocomplete="off">
  </label>

  <h2>Site content</h2>
  <textarea id="content-json" rows="16"></textarea>
  <button id="save-content">Save content</button>
  <p id="content-status" role="status"></p>

  <h2>Teach Blade</h2>
  <input id="learn-keyword" type="text" placeholder="Keyword">
  <input id="learn-response" type="text" placeholder="Response">
  <button id="learn-btn">Save reply</button>
  <p id="learn-status" role="status"></p>

  <h2>Search analytics</h2>
  <button id="refresh-analytics">Refresh</button>
  <ul id="analytics-list"></ul>

  <h2>Rewards members</h2>
  <button id="refresh-members">Refresh</button>
  <ul id="member-list"></ul>
  <input id="points-email" type="email" placeholder="Member email">
  <input id="points-value" type="number" placeholder="Points">
  <button id="add-points">Add points</button>
  <p id="points-status" role="status"></p>
</section>"##,
        email = escape(admin_email),
    );
    layout("Admin", &body, &["/js/admin.js"])
}
