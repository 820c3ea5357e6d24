//! Criterion microbenchmarks for swoosh-api hot paths.
//!
//! Run with:
//!   cargo bench -p swoosh-api
//!
//! HTML reports are written to `target/criterion/`.

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swoosh_api::{auth::SessionKeys, pages::website};
use swoosh_common::models::bot::{Bot, BotWebsite, NewBot};
use swoosh_common::slug::{slugify, website_url};
use swoosh_db::{BotStore, MemoryStore};

fn sample_bot() -> Bot {
    Bot {
        id: 1,
        token: "bench-token".into(),
        name: "Night Owl Moderation Squad".into(),
        server_link: "https://discord.gg/nightowl".into(),
        logo_url: Some("/uploads/bot_1700000000000_owl.png".into()),
        website_url: "http://localhost:8080/nightowlmoderationsquad".into(),
        created_at: Utc::now(),
    }
}

// ── Slugs ─────────────────────────────────────────────────────────────────────

fn bench_slugify(c: &mut Criterion) {
    c.bench_function("slug/slugify", |b| {
        b.iter(|| slugify(black_box("  Night Owl   Moderation Squad ")))
    });
    c.bench_function("slug/website_url", |b| {
        b.iter(|| website_url(black_box("https://bots.example.com/"), black_box("Night Owl")))
    });
}

// ── JSON serialisation ────────────────────────────────────────────────────────

fn bench_website_serialise(c: &mut Criterion) {
    let bot = sample_bot();
    c.bench_function("website/serialise", |b| {
        b.iter(|| serde_json::to_string(&BotWebsite::from(black_box(bot.clone()))).unwrap())
    });
}

// ── Sessions ──────────────────────────────────────────────────────────────────

fn bench_sessions(c: &mut Criterion) {
    let keys = SessionKeys::new(b"bench-secret-key-32-bytes-padded!!", 3600);
    let token = keys.issue("bench-bot-token").unwrap();

    c.bench_function("session/issue", |b| {
        b.iter(|| keys.issue(black_box("bench-bot-token")).unwrap())
    });
    c.bench_function("session/validate", |b| {
        b.iter(|| keys.validate(black_box(&token)).unwrap())
    });
}

// ── Page rendering ────────────────────────────────────────────────────────────

fn bench_bot_page(c: &mut Criterion) {
    let bot = sample_bot();
    c.bench_function("page/bot_website", |b| {
        b.iter(|| website::bot_page(black_box(&bot), 2026))
    });
}

// ── Slug lookup scaling ───────────────────────────────────────────────────────

/// Slug lookup is a linear scan, so cost grows with the number of bots.
fn bench_find_by_slug(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("store/find_by_slug");

    for count in [10usize, 100, 1000] {
        let store = MemoryStore::new();
        rt.block_on(async {
            for i in 0..count {
                let name = format!("Bot {i}");
                store
                    .create_bot(NewBot {
                        token: format!("token-{i}"),
                        website_url: website_url("http://localhost:8080", &name),
                        name,
                        server_link: "https://discord.gg/x".into(),
                        logo_url: None,
                    })
                    .await
                    .unwrap();
            }
        });
        let last = format!("bot{}", count - 1);

        group.bench_with_input(BenchmarkId::from_parameter(count), &last, |b, slug| {
            b.iter(|| rt.block_on(store.find_by_slug(black_box(slug))).unwrap())
        });
    }

    group.finish();
}

// ── criterion entrypoints ─────────────────────────────────────────────────────

criterion_group!(slugs, bench_slugify);
criterion_group!(serialisation, bench_website_serialise);
criterion_group!(sessions, bench_sessions);
criterion_group!(pages, bench_bot_page, bench_find_by_slug);

criterion_main!(slugs, serialisation, sessions, pages);
