use profile_launcher_core::filter::filter;
use profile_launcher_core::model::{ListItem, Profile};

fn items() -> Vec<ListItem> {
    vec![
        ListItem::new(Profile::new("chrome", "Default", "Personal")),
        ListItem::new(Profile::new("chrome", "Profile 1", "Work")),
        ListItem::new(Profile::new("edge", "Default", "Banking")),
        ListItem::new(Profile::new("firefox", "Profile 2", "Side Project")),
    ]
}

#[test]
fn empty_query_is_identity() {
    let list = items();
    assert_eq!(filter(&list, ""), list);
}

#[test]
fn filter_is_idempotent() {
    let list = items();
    for query in ["", "default", "PROFILE", "o", "nothing-matches"] {
        let once = filter(&list, query);
        assert_eq!(filter(&once, query), once, "query {query:?}");
    }
}

#[test]
fn keeps_original_relative_order() {
    let list = items();
    let filtered = filter(&list, "default");
    let directories: Vec<(&str, &str)> = filtered
        .iter()
        .map(|item| (item.profile.browser.as_str(), item.profile.directory.as_str()))
        .collect();
    assert_eq!(directories, vec![("chrome", "Default"), ("edge", "Default")]);
}

#[test]
fn matches_browser_directory_and_name() {
    let list = items();
    assert_eq!(filter(&list, "EDGE").len(), 1);
    assert_eq!(filter(&list, "profile 2").len(), 1);
    assert_eq!(filter(&list, "side proj").len(), 1);
    assert!(filter(&list, "opera").is_empty());
}
