use pretty_assertions::assert_eq;

use profile_launcher_core::collection::Collections;
use profile_launcher_core::compose::{compose, tabs};
use profile_launcher_core::model::{ListItem, Profile, ProfileKey};

fn repository() -> Vec<ListItem> {
    vec![
        ListItem::new(Profile::new("chrome", "A", "Alpha")),
        ListItem::new(Profile::new("chrome", "B", "Beta")),
        ListItem::new(Profile::new("chrome", "C", "Gamma")),
    ]
}

fn dirs(items: &[ListItem]) -> Vec<String> {
    items.iter().map(|item| item.profile.directory.clone()).collect()
}

fn work_collection(members: &[(&str, &str)]) -> Collections {
    let mut collections = Collections::new();
    collections.add("work").unwrap();
    for (browser, directory) in members {
        collections
            .set_membership("work", ProfileKey::new(browser, directory), true)
            .unwrap();
    }
    collections
}

#[test]
fn tab_order_starts_with_reserved_tabs() {
    let mut collections = work_collection(&[]);
    collections.add("play").unwrap();
    assert_eq!(tabs(&collections), vec!["all", "history", "work", "play"]);
}

#[test]
fn composes_all_and_history_tabs() {
    let collections = work_collection(&[]);
    let lists = compose(&repository(), "", &collections, &[ProfileKey::new("chrome", "B")]);

    assert_eq!(lists.tab_names(), vec!["all", "history", "work"]);
    assert_eq!(dirs(lists.get("all").unwrap()), vec!["A", "B", "C"]);
    assert_eq!(dirs(lists.get("history").unwrap()), vec!["B"]);
    assert!(lists.get("work").unwrap().is_empty());
}

#[test]
fn query_narrows_every_tab() {
    let collections = work_collection(&[("chrome", "B"), ("chrome", "C")]);
    let history = vec![ProfileKey::new("chrome", "C"), ProfileKey::new("chrome", "B")];
    let lists = compose(&repository(), "b", &collections, &history);

    assert_eq!(dirs(lists.get("all").unwrap()), vec!["B"]);
    assert_eq!(dirs(lists.get("history").unwrap()), vec!["B"]);
    assert_eq!(dirs(lists.get("work").unwrap()), vec!["B"]);
}

#[test]
fn collection_tabs_are_sorted_by_browser_then_directory() {
    let repository = vec![
        ListItem::new(Profile::new("edge", "Default", "Edge")),
        ListItem::new(Profile::new("chrome", "Profile 2", "Two")),
        ListItem::new(Profile::new("chrome", "Default", "One")),
    ];
    let collections = work_collection(&[
        ("edge", "Default"),
        ("chrome", "Profile 2"),
        ("chrome", "Default"),
    ]);

    let lists = compose(&repository, "", &collections, &[]);
    let keys: Vec<ProfileKey> = lists.get("work").unwrap().iter().map(ListItem::key).collect();
    assert_eq!(
        keys,
        vec![
            ProfileKey::new("chrome", "Default"),
            ProfileKey::new("chrome", "Profile 2"),
            ProfileKey::new("edge", "Default"),
        ]
    );
}

#[test]
fn history_tab_is_ranked_not_sorted() {
    let history = vec![
        ProfileKey::new("chrome", "C"),
        ProfileKey::new("chrome", "A"),
    ];
    let lists = compose(&repository(), "", &Collections::new(), &history);
    assert_eq!(dirs(lists.get("history").unwrap()), vec!["C", "A"]);
}

#[test]
fn unknown_tab_has_zero_length() {
    let lists = compose(&repository(), "", &Collections::new(), &[]);
    assert_eq!(lists.len_of("missing"), 0);
    assert!(lists.get("missing").is_none());
}
