//! Mounted form views.
//!
//! Every page load mounts a fresh view and hands its id to the browser; the
//! HTMX requests of that page address the view by id. The registry is
//! bounded and evicts the oldest view first. Its lock is never held across
//! a service call.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use spendweb_core::{AddPaymentForm, CreateCategoryForm};
use uuid::Uuid;

#[derive(Debug)]
pub enum FormView {
    Category(CreateCategoryForm),
    Payment(AddPaymentForm),
}

#[derive(Debug, Default)]
struct Views {
    forms: HashMap<Uuid, FormView>,
    order: VecDeque<Uuid>,
}

#[derive(Debug)]
pub struct ViewRegistry {
    capacity: usize,
    inner: Mutex<Views>,
}

impl ViewRegistry {
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), inner: Mutex::new(Views::default()) }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Views> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mount a view and return its id
    pub fn mount(&self, view: FormView) -> Uuid {
        let id = Uuid::new_v4();
        let mut views = self.lock();
        views.forms.insert(id, view);
        views.order.push_back(id);
        while views.forms.len() > self.capacity {
            let Some(oldest) = views.order.pop_front() else { break };
            if views.forms.remove(&oldest).is_some() {
                log::debug!("Evicted view {}", oldest);
            }
        }
        id
    }

    /// Unmount a view; a result still in flight for it will be dropped
    pub fn close(&self, id: &Uuid) -> bool {
        let mut views = self.lock();
        let removed = views.forms.remove(id).is_some();
        if removed {
            views.order.retain(|other| other != id);
        }
        removed
    }

    /// Run `f` on a mounted create-category view
    pub fn with_category<R>(&self, id: &Uuid, f: impl FnOnce(&mut CreateCategoryForm) -> R) -> Option<R> {
        match self.lock().forms.get_mut(id) {
            Some(FormView::Category(form)) => Some(f(form)),
            _ => None,
        }
    }

    /// Run `f` on a mounted add-transaction view
    pub fn with_payment<R>(&self, id: &Uuid, f: impl FnOnce(&mut AddPaymentForm) -> R) -> Option<R> {
        match self.lock().forms.get_mut(id) {
            Some(FormView::Payment(form)) => Some(f(form)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
