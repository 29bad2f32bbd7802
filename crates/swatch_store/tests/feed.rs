use swatch_store::{MemoryRepository, ThemeFeed, ThemeRepository};
use swatch_theme::BuiltinPreset;

fn seeded(count: usize) -> MemoryRepository {
    let mut repo = MemoryRepository::new();
    for i in 0..count {
        repo.create(&format!("Theme {i}"), BuiltinPreset::Slate.styles())
            .unwrap();
    }
    repo
}

#[test]
fn pages_through_everything() {
    let repo = seeded(25);
    let mut feed = ThemeFeed::new(20);

    feed.load_first_page(&repo);
    assert!(!feed.is_loading());
    assert!(feed.has_next_page());
    assert_eq!(feed.themes().count(), 20);

    assert!(feed.fetch_next_page(&repo));
    assert_eq!(feed.pages().len(), 2);
    assert_eq!(feed.themes().count(), 25);
    assert!(!feed.has_next_page());

    assert!(!feed.fetch_next_page(&repo), "nothing left to fetch");
}

#[test]
fn responses_after_refetch_are_ignored() {
    let mut repo = seeded(3);
    let mut feed = ThemeFeed::new(2);
    feed.load_first_page(&repo);

    let stale = feed.begin_next_page().unwrap();
    let stale_page = stale.fetch(&repo);

    repo.create("Newest", BuiltinPreset::Zinc.styles()).unwrap();
    let fresh = feed.refetch();
    let fresh_page = fresh.fetch(&repo);

    assert!(feed.complete(fresh, fresh_page));
    assert!(!feed.complete(stale, stale_page));

    let names: Vec<_> = feed.themes().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Newest", "Theme 2"]);
    assert!(!feed.is_fetching_next_page());
}

#[test]
fn reset_drops_pending_first_page() {
    let repo = seeded(1);
    let mut feed = ThemeFeed::default();
    let pending = feed.begin_first_page();
    let page = pending.fetch(&repo);

    feed.reset();

    assert!(!feed.complete(pending, page));
    assert_eq!(feed.themes().count(), 0);
    assert!(!feed.is_loading());
}
