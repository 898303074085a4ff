//! Browser storage and the page's long-lived components.
//!
//! Components are built once in `init()` and parked here so the functions
//! exported to page scripts can reach them. WASM is single-threaded, so a
//! `thread_local!` `RefCell` is enough.

use crate::admin::AdminDashboard;
use crate::modal::ModalController;
use pw_storage::{KeyValueStore, NoopStore};
use std::cell::RefCell;
use std::rc::Rc;

// ── localStorage ──

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| anyhow::anyhow!("localStorage.getItem('{key}'): {e:?}"))
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| anyhow::anyhow!("localStorage.setItem('{key}'): {e:?}"))
    }
}

/// `localStorage` when the browser allows it, otherwise a store that keeps nothing.
pub fn browser_store() -> Rc<dyn KeyValueStore> {
    match LocalStorage::open() {
        Some(store) => Rc::new(store),
        None => {
            gloo_console::warn!("localStorage unavailable; submissions will not be kept");
            Rc::new(NoopStore)
        }
    }
}

// ── Component registry ──

#[derive(Default)]
pub struct SiteState {
    pub admin: Option<Rc<AdminDashboard>>,
    pub modals: Option<Rc<ModalController>>,
}

thread_local! {
    static STATE: RefCell<SiteState> = RefCell::new(SiteState::default());
}

pub fn set_admin(dashboard: Rc<AdminDashboard>) {
    STATE.with(|s| s.borrow_mut().admin = Some(dashboard));
}

pub fn admin() -> Option<Rc<AdminDashboard>> {
    STATE.with(|s| s.borrow().admin.clone())
}

pub fn set_modals(modals: Rc<ModalController>) {
    STATE.with(|s| s.borrow_mut().modals = Some(modals));
}

pub fn modals() -> Option<Rc<ModalController>> {
    STATE.with(|s| s.borrow().modals.clone())
}
