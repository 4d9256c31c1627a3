// fixture_test.rs - Golden values for a realistic page.

use std::sync::{Arc, Barrier};
use std::thread;

use linkscan::prelude::*;
use linkscan::tables::PatternTables;

const CATALOG: &str = include_str!("fixtures/catalog.html");

fn hrefs(anchors: &[AnchorRecord]) -> Vec<Option<&str>> {
    anchors.iter().map(|anchor| anchor.href.as_deref()).collect()
}

#[test]
fn catalog_anchors() {
    let anchors = find_anchors(CATALOG).unwrap();
    assert_eq!(
        hrefs(&anchors),
        [
            Some("/"),
            Some("/catalog"),
            Some("/contacts"),
            Some("https://partner.example.org/"),
            Some("https://docs.example.com/guide"),
            None,
            Some("/files/price.pdf"),
            Some("mailto:info@example.com"),
            Some("https://vk.com/example"),
        ]
    );

    let inner: Vec<&str> = anchors.iter().map(|anchor| anchor.inner_html.as_str()).collect();
    assert_eq!(
        inner,
        [
            r#"<img src="/img/logo.png" alt="Логотип" />"#,
            "Каталог",
            "Контакты",
            "PARTNER",
            "the guide",
            "No href here",
            "Прайс",
            "Почта",
            "ВКонтакте",
        ]
    );
}

#[test]
fn catalog_positions() {
    let anchors = find_anchors(CATALOG).unwrap();
    for anchor in &anchors {
        let opener = &CATALOG[anchor.start_index..anchor.start_index + 2];
        assert!(opener.eq_ignore_ascii_case("<a"), "opener {:?}", opener);
        let closer = &CATALOG[anchor.end_index..anchor.end_index + 4];
        assert!(closer.eq_ignore_ascii_case("</a>"), "closer {:?}", closer);
    }
    assert_eq!(anchors[1].start_index, CATALOG.find(r#"<a href="/catalog">"#).unwrap());
    assert_eq!(anchors[3].start_index, CATALOG.find("<A HREF").unwrap());
    assert!(anchors.windows(2).all(|w| w[0].start_index < w[1].start_index));
}

#[test]
fn catalog_attributes() {
    let anchors = find_anchors(CATALOG).unwrap();

    let partner = &anchors[3];
    assert_eq!(partner.target.as_deref(), Some("_blank"));
    assert!(partner.is_external);

    let guide = &anchors[4];
    assert_eq!(guide.rel.as_deref(), Some("nofollow noopener"));
    assert_eq!(guide.href_lang.as_deref(), Some("en"));

    let price = &anchors[6];
    assert_eq!(price.download.as_deref(), Some("price-2024.pdf"));
    assert_eq!(price.mime_type.as_deref(), Some("application/pdf"));
    assert!(!price.is_external);

    let vk = &anchors[8];
    assert_eq!(vk.target.as_deref(), Some("_blank"));
    assert_eq!(vk.rel.as_deref(), Some("noopener"));
}

#[test]
fn catalog_validity_and_external_count() {
    let anchors = find_anchors(CATALOG).unwrap();
    assert_eq!(anchors.iter().filter(|anchor| anchor.is_valid()).count(), 8);
    assert_eq!(count_external_links(CATALOG), Ok(4));

    let mut outcome = AnchorSearch::new().search(CATALOG);
    outcome.retain_valid();
    assert_eq!(outcome.records().map(<[_]>::len), Some(8));
}

#[test]
fn catalog_without_exclusions() {
    let search = AnchorSearch::builder()
        .exclude_comments(false)
        .exclude_noindex(false)
        .build();
    let anchors = search.find(CATALOG).unwrap();
    assert_eq!(anchors.len(), 12);
    assert_eq!(anchors[0].href.as_deref(), Some("/old-home"));
    let hidden: Vec<_> = anchors
        .iter()
        .filter_map(|anchor| anchor.href.as_deref())
        .filter(|href| href.contains(".example.net"))
        .collect();
    assert_eq!(
        hidden,
        ["https://ads.example.net/banner", "https://tracker.example.net/pixel"]
    );
}

#[test]
fn catalog_is_balanced_for_strict_mode() {
    let strict = AnchorSearch::builder().strict(true).build();
    assert_eq!(strict.find(CATALOG).unwrap(), find_anchors(CATALOG).unwrap());
}

#[test]
fn catalog_images() {
    let spans = find_tags(CATALOG, "<img", "/>").unwrap();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].attributes.get("alt"), Some("Логотип"));
}

#[test]
fn concurrent_searches_agree() {
    let expected = find_anchors(CATALOG).unwrap();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| find_anchors(CATALOG).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn concurrent_table_builds_share_one_entry() {
    // No other test searches for this literal, so the cache starts cold.
    const LITERAL: &str = "<li data-cold-cache=";
    const THREADS: usize = 8;
    let barrier = Barrier::new(THREADS);
    let tables: Vec<Arc<PatternTables<u8>>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    PatternTables::<u8>::get(LITERAL)
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });
    assert!(tables.iter().all(|t| Arc::ptr_eq(t, &tables[0])));
    assert_eq!(tables[0].len(), LITERAL.len());
}
