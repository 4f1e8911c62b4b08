use crate::collection::{resolve_collection, sort_items, Collections, TAB_ALL, TAB_HISTORY};
use crate::filter::filter;
use crate::history::map_to_history_view;
use crate::model::{ListItem, ProfileKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabList {
    pub name: String,
    pub items: Vec<ListItem>,
}

/// Per-tab item lists in tab order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedLists {
    tabs: Vec<TabList>,
}

impl ComposedLists {
    pub fn tabs(&self) -> &[TabList] {
        &self.tabs
    }

    pub fn tab_names(&self) -> Vec<String> {
        self.tabs.iter().map(|tab| tab.name.clone()).collect()
    }

    pub fn position(&self, tab: &str) -> Option<usize> {
        self.tabs.iter().position(|list| list.name == tab)
    }

    pub fn get(&self, tab: &str) -> Option<&[ListItem]> {
        self.tabs
            .iter()
            .find(|list| list.name == tab)
            .map(|list| list.items.as_slice())
    }

    /// Length of a tab's list; unknown tabs count as empty.
    pub fn len_of(&self, tab: &str) -> usize {
        self.get(tab).map_or(0, <[ListItem]>::len)
    }
}

/// `["all", "history", ...user collections]`.
pub fn tabs(collections: &Collections) -> Vec<String> {
    let mut names = vec![TAB_ALL.to_string(), TAB_HISTORY.to_string()];
    names.extend(collections.names().iter().cloned());
    names
}

pub fn compose(
    repository: &[ListItem],
    query: &str,
    collections: &Collections,
    history_keys: &[ProfileKey],
) -> ComposedLists {
    let mut lists = Vec::with_capacity(collections.names().len() + 2);
    lists.push(TabList {
        name: TAB_ALL.to_string(),
        items: filter(repository, query),
    });
    lists.push(TabList {
        name: TAB_HISTORY.to_string(),
        items: filter(&map_to_history_view(repository, history_keys), query),
    });

    for name in collections.names() {
        let members = resolve_collection(repository, name, collections);
        lists.push(TabList {
            name: name.clone(),
            items: sort_items(filter(&members, query)),
        });
    }

    ComposedLists { tabs: lists }
}
