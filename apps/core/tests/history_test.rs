use profile_launcher_core::history::{map_to_history_view, History};
use profile_launcher_core::model::{ListItem, Profile, ProfileKey};

fn repository() -> Vec<ListItem> {
    ["A", "B", "C"]
        .iter()
        .map(|dir| ListItem::new(Profile::new("chrome", dir, dir)))
        .collect()
}

fn key(dir: &str) -> ProfileKey {
    ProfileKey::new("chrome", dir)
}

#[test]
fn history_view_follows_history_order() {
    let view = map_to_history_view(&repository(), &[key("C"), key("A")]);
    let keys: Vec<ProfileKey> = view.iter().map(ListItem::key).collect();
    assert_eq!(keys, vec![key("C"), key("A")]);
}

#[test]
fn history_view_drops_keys_missing_from_repository() {
    let history = vec![key("gone"), key("B"), ProfileKey::new("edge", "A")];
    let view = map_to_history_view(&repository(), &history);
    let keys: Vec<ProfileKey> = view.iter().map(ListItem::key).collect();
    assert_eq!(keys, vec![key("B")]);
}

#[test]
fn history_view_never_contains_unlaunched_keys() {
    let history = vec![key("B")];
    let view = map_to_history_view(&repository(), &history);
    assert!(view.iter().all(|item| history.contains(&item.key())));
    assert_eq!(history, vec![key("B")]);
}

#[test]
fn history_add_front_inserts_without_duplicates() {
    let mut history = History::from_keys(vec![key("B")], 10);
    history.add(key("A"));
    assert_eq!(history.keys(), &[key("A"), key("B")]);
    history.add(key("B"));
    assert_eq!(history.keys(), &[key("B"), key("A")]);
}
