use std::cell::RefCell;
use std::rc::Rc;

use profile_launcher_core::config::BehaviorAfterLaunch;
use profile_launcher_core::launch::{
    LaunchCoordinator, LaunchError, LaunchExecutor, LaunchPolicy, PostLaunchAction, WindowControl,
};
use profile_launcher_core::model::{ListItem, Profile, ProfileKey};
use profile_launcher_core::store::{HistoryStore, MemoryStore};

struct ScriptedExecutor {
    result: Result<(), String>,
    calls: Rc<RefCell<Vec<(String, String)>>>,
}

impl LaunchExecutor for ScriptedExecutor {
    fn execute(&mut self, browser: &str, directory: &str) -> Result<(), String> {
        self.calls
            .borrow_mut()
            .push((browser.to_string(), directory.to_string()));
        self.result.clone()
    }
}

#[derive(Clone, Default)]
struct RecordingWindow {
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl WindowControl for RecordingWindow {
    fn minimize(&mut self) {
        self.calls.borrow_mut().push("minimize");
    }

    fn terminate(&mut self) {
        self.calls.borrow_mut().push("terminate");
    }
}

fn coordinator(
    result: Result<(), String>,
    behavior: BehaviorAfterLaunch,
    dev_mode: bool,
) -> (LaunchCoordinator, RecordingWindow, Rc<RefCell<Vec<(String, String)>>>) {
    let window = RecordingWindow::default();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let coordinator = LaunchCoordinator::new(
        Box::new(ScriptedExecutor {
            result,
            calls: Rc::clone(&calls),
        }),
        Box::new(window.clone()),
        LaunchPolicy { behavior, dev_mode },
    );
    (coordinator, window, calls)
}

fn item(dir: &str) -> ListItem {
    ListItem::new(Profile::new("chrome", dir, dir))
}

#[test]
fn success_moves_key_to_front_of_history() {
    let (mut launcher, _, calls) = coordinator(Ok(()), BehaviorAfterLaunch::None, false);
    let mut store = MemoryStore::default();
    store.add_history(&ProfileKey::new("chrome", "A")).unwrap();
    store.add_history(&ProfileKey::new("chrome", "B")).unwrap();

    let result = launcher.launch(&item("A"), &mut store);

    assert_eq!(result, Ok(PostLaunchAction::None));
    assert_eq!(
        store.history().unwrap(),
        vec![ProfileKey::new("chrome", "A"), ProfileKey::new("chrome", "B")]
    );
    assert_eq!(calls.borrow().as_slice(), &[("chrome".to_string(), "A".to_string())]);
}

#[test]
fn failure_surfaces_message_and_keeps_history() {
    let (mut launcher, window, _) = coordinator(
        Err("browser not found".to_string()),
        BehaviorAfterLaunch::Close,
        false,
    );
    let mut store = MemoryStore::default();
    store.add_history(&ProfileKey::new("chrome", "B")).unwrap();

    let result = launcher.launch(&item("A"), &mut store);

    assert_eq!(
        result,
        Err(LaunchError::Failed("browser not found".to_string()))
    );
    assert_eq!(store.history().unwrap(), vec![ProfileKey::new("chrome", "B")]);
    assert!(window.calls.borrow().is_empty());
}

#[test]
fn minimize_and_close_call_window_control() {
    let (mut launcher, window, _) = coordinator(Ok(()), BehaviorAfterLaunch::Minimize, false);
    let mut store = MemoryStore::default();
    assert_eq!(
        launcher.launch(&item("A"), &mut store),
        Ok(PostLaunchAction::Minimize)
    );

    let (mut closer, close_window, _) = coordinator(Ok(()), BehaviorAfterLaunch::Close, false);
    assert_eq!(
        closer.launch(&item("A"), &mut store),
        Ok(PostLaunchAction::Terminate)
    );

    assert_eq!(window.calls.borrow().as_slice(), &["minimize"]);
    assert_eq!(close_window.calls.borrow().as_slice(), &["terminate"]);
}

#[test]
fn dev_mode_never_touches_the_window() {
    let (mut launcher, window, _) = coordinator(Ok(()), BehaviorAfterLaunch::Close, true);
    let mut store = MemoryStore::default();

    assert_eq!(launcher.launch(&item("A"), &mut store), Ok(PostLaunchAction::None));
    assert!(window.calls.borrow().is_empty());
    assert_eq!(store.history().unwrap(), vec![ProfileKey::new("chrome", "A")]);
}

#[test]
fn empty_error_message_counts_as_success() {
    let (mut launcher, _, _) = coordinator(Ok(()), BehaviorAfterLaunch::None, false);
    let mut store = MemoryStore::default();

    let result = launcher.complete(&item("C"), Err(String::new()), &mut store);

    assert_eq!(result, Ok(PostLaunchAction::None));
    assert_eq!(store.history().unwrap(), vec![ProfileKey::new("chrome", "C")]);
}
