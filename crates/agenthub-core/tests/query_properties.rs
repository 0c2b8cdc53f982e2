use agenthub_core::catalog::Catalog;
use agenthub_core::query::{query, QuerySpec, SortKey};
use agenthub_core::types::CatalogEntry;

fn catalog() -> Catalog {
    Catalog::embedded().expect("bundled catalog parses")
}

fn ids(entries: &[&CatalogEntry]) -> Vec<String> {
    entries.iter().map(|e| e.id.clone()).collect()
}

#[test]
fn blank_search_is_a_no_op() {
    let catalog = catalog();
    for sort in SortKey::ALL {
        let plain = query(catalog.entries(), &QuerySpec::default().sort(sort));
        for blank in ["", " ", "\t  \n"] {
            let with_blank = query(catalog.entries(), &QuerySpec::default().search(blank).sort(sort));
            assert_eq!(ids(&plain), ids(&with_blank));
        }
        assert_eq!(plain.len(), catalog.len());
    }
}

/// The middle third of `text` by chars, or all of it when short.
fn middle(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < 3 {
        return text.to_string();
    }
    let third = chars.len() / 3;
    chars[third..chars.len() - third].iter().collect()
}

/// Prefix, suffix and middle slices of every searchable field.
fn needles_for(entry: &CatalogEntry) -> Vec<String> {
    let mut fields = vec![entry.name.as_str(), entry.description.as_str()];
    fields.extend(entry.tags.iter().map(String::as_str));
    fields.extend(entry.integrations.iter().map(String::as_str));

    let mut needles: Vec<String> = Vec::new();
    for field in fields {
        let chars: Vec<char> = field.chars().collect();
        let take = chars.len().min(4);
        needles.push(chars[..take].iter().collect());
        needles.push(chars[chars.len() - take..].iter().collect());
        needles.push(middle(field));
    }
    needles
        .into_iter()
        .filter(|n| !n.trim().is_empty())
        .collect()
}

#[test]
fn every_field_slice_finds_its_entry() {
    let catalog = catalog();
    let mut checked = 0;
    for entry in catalog.entries() {
        for needle in needles_for(entry) {
            for cased in [needle.to_uppercase(), needle.to_lowercase()] {
                // case mapping that changes the text itself is out of scope
                if cased.to_lowercase() != needle.to_lowercase() {
                    continue;
                }
                let found = ids(&query(catalog.entries(), &QuerySpec::default().search(&cased)));
                assert!(
                    found.contains(&entry.id),
                    "searching {:?} lost {}",
                    cased,
                    entry.id
                );
                checked += 1;
            }
        }
    }
    assert!(checked > catalog.len() * 6);
}

#[test]
fn unknown_needle_finds_nothing() {
    let catalog = catalog();
    for needle in ["zzz-no-match", "ZZZ-NO-MATCH", "qqqxqqq"] {
        assert!(query(catalog.entries(), &QuerySpec::default().search(needle)).is_empty());
    }
}

#[test]
fn category_filter_matches_cardinality() {
    let catalog = catalog();
    for category in catalog.categories() {
        let results = query(catalog.entries(), &QuerySpec::default().category(&category.id));
        assert_eq!(results.len(), category.count, "category {}", category.id);
        assert!(results.iter().all(|e| e.category == category.id));
    }
}

#[test]
fn results_are_descending_for_every_key() {
    let catalog = catalog();
    let all = |sort| query(catalog.entries(), &QuerySpec::default().sort(sort));

    assert!(all(SortKey::Downloads)
        .windows(2)
        .all(|w| w[0].downloads >= w[1].downloads));
    assert!(all(SortKey::Rating).windows(2).all(|w| w[0].rating >= w[1].rating));
    assert!(all(SortKey::Recent)
        .windows(2)
        .all(|w| w[0].last_updated >= w[1].last_updated));
    assert!(all(SortKey::NodeCount)
        .windows(2)
        .all(|w| w[0].node_count >= w[1].node_count));
}

#[test]
fn querying_twice_gives_the_same_answer() {
    let catalog = catalog();
    let spec = QuerySpec::default()
        .search("framework")
        .difficulty("Intermediate")
        .sort(SortKey::Rating);
    let first = ids(&query(catalog.entries(), &spec));
    let second = ids(&query(catalog.entries(), &spec));
    assert_eq!(first, second);
}

#[test]
fn source_is_left_untouched() {
    let catalog = catalog();
    let snapshot = catalog.clone();
    for sort in SortKey::ALL {
        let _ = query(
            catalog.entries(),
            &QuerySpec::default().search("a").category("ai-framework").sort(sort),
        );
    }
    assert_eq!(catalog, snapshot);
}

#[test]
fn filters_narrow_never_widen() {
    let catalog = catalog();
    let broad = query(catalog.entries(), &QuerySpec::default().search("agent"));
    let narrow = query(
        catalog.entries(),
        &QuerySpec::default().search("agent").difficulty("Advanced"),
    );
    assert!(narrow.len() <= broad.len());
    let broad_ids = ids(&broad);
    assert!(narrow.iter().all(|e| broad_ids.contains(&e.id)));
}
