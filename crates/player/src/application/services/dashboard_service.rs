//! Dashboard Service - Typed dashboard state synchronized with the host
//!
//! The service owns the typed model derived from the host's variables, the
//! confirmation flow for one-way or destructive edits, the transient notice
//! and the villain selection.
//!
//! Edits are applied to local state first and then persisted on a
//! best-effort basis: a failed write is logged and NOT rolled back.
//!
//! The state lock is never held across a host call, because a host may fire
//! change events synchronously from inside `replace_variables`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tianfa_domain::{
    find_villain, select_or_first, ActiveModes, DomainError, GameMode, Inquisitor,
    ModeActivation, ModeEvent, Villain, WorldState,
};
use tianfa_shared::{
    add_mode, delete_item, delete_title, delete_villain, normalize, write_modes, ListShape,
    MutationError, NormalizedState,
};

use crate::application::dto::{
    DashboardSnapshot, DeleteTarget, Notice, PendingAction, PendingDelete,
};
use crate::application::ServiceError;
use crate::ports::outbound::{ClockPort, EventListener, EventSubscription, MessageRef};
use crate::state::HostRuntime;

const BASELINE_LOCKED: &str = "普通模式为锁定默认模式，无法关闭。";

/// Dashboard service
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct DashboardService {
    inner: Arc<Inner>,
}

struct Inner {
    runtime: HostRuntime,
    clock: Arc<dyn ClockPort>,
    state: Mutex<DashboardState>,
    subscriptions: Mutex<Vec<Box<dyn EventSubscription>>>,
}

#[derive(Debug, Clone)]
struct DashboardState {
    world: WorldState,
    inquisitor: Inquisitor,
    villains: Vec<Villain>,
    modes: ActiveModes,
    title_shape: ListShape,
    inventory_shape: ListShape,
    selected_villain: Option<String>,
    pending: Option<PendingAction>,
    notice: Option<Notice>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            world: WorldState::default(),
            inquisitor: Inquisitor::default(),
            villains: tianfa_domain::defaults::seed_villains(),
            modes: ActiveModes::baseline(),
            title_shape: ListShape::Missing,
            inventory_shape: ListShape::Missing,
            selected_villain: None,
            pending: None,
            notice: None,
        }
    }
}

impl DashboardState {
    fn apply(&mut self, normalized: NormalizedState) {
        self.world = normalized.world;
        self.inquisitor = normalized.inquisitor;
        self.villains = normalized.villains;
        self.modes = normalized.modes;
        self.title_shape = normalized.title_shape;
        self.inventory_shape = normalized.inventory_shape;
    }

    fn activation(&self, mode: GameMode) -> ModeActivation {
        if self.modes.contains(mode) {
            ModeActivation::Active
        } else if self.pending == Some(PendingAction::Mode(mode)) {
            ModeActivation::PendingActivation
        } else {
            ModeActivation::Inactive
        }
    }

    fn post(&mut self, text: String, now: DateTime<Utc>) -> String {
        self.notice = Some(Notice::new(text.clone(), now));
        text
    }

    fn delete_label(&self, target: &DeleteTarget) -> String {
        match target {
            DeleteTarget::Title(index) => self
                .inquisitor
                .title(*index)
                .map(str::to_string)
                .unwrap_or_else(|| format!("称号#{}", index + 1)),
            DeleteTarget::Item(index) => self
                .inquisitor
                .item(*index)
                .map(str::to_string)
                .unwrap_or_else(|| format!("物品#{}", index + 1)),
            DeleteTarget::Villain(id) => find_villain(&self.villains, id)
                .map(|v| v.name.clone())
                .unwrap_or_else(|| id.clone()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn already_active(mode: GameMode) -> String {
    format!("「{}」已开启，开启后不可关闭。", mode)
}

impl Inner {
    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn post_notice(&self, text: String) -> String {
        let now = self.now();
        lock(&self.state).post(text, now)
    }

    /// Re-derive typed state from the host. Read failures keep the current
    /// state.
    fn sync(&self) {
        let Some(variables) = self.runtime.variables() else {
            tracing::warn!("Host exposes no variables; keeping current dashboard state");
            return;
        };

        let target = self.runtime.message_target();
        let raw = match variables.get_variables(target) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(
                    %target,
                    error = %error,
                    "Failed to read host variables; keeping current dashboard state"
                );
                return;
            }
        };

        let normalized = normalize(&raw);
        tracing::debug!(
            %target,
            villains = normalized.villains.len(),
            modes = normalized.modes.len(),
            title_shape = ?normalized.title_shape,
            inventory_shape = ?normalized.inventory_shape,
            "Dashboard synced from host"
        );
        lock(&self.state).apply(normalized);
    }

    /// Read the container, apply `mutate`, write it back.
    fn persist<F>(&self, edit: &'static str, mutate: F)
    where
        F: FnOnce(Value) -> Result<Value, MutationError>,
    {
        let Some(variables) = self.runtime.variables() else {
            tracing::warn!(edit, "Host exposes no variables; edit kept locally only");
            return;
        };

        let target = self.runtime.message_target();
        let result = variables
            .get_variables(target)
            .map_err(ServiceError::from)
            .and_then(|container| mutate(container).map_err(ServiceError::from))
            .and_then(|next| {
                variables
                    .replace_variables(next, target)
                    .map_err(ServiceError::from)
            });

        match result {
            Ok(()) => tracing::info!(edit, %target, "Edit persisted to host"),
            Err(error) => tracing::warn!(
                edit,
                %target,
                error = %error,
                "Failed to persist edit; local state not rolled back"
            ),
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        for subscription in lock(&self.subscriptions).drain(..) {
            subscription.stop();
        }
    }
}

impl DashboardService {
    /// Create a service seeded with the default model. Call [`mount`] to
    /// read the host.
    ///
    /// [`mount`]: DashboardService::mount
    pub fn new(runtime: HostRuntime, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            inner: Arc::new(Inner {
                runtime,
                clock,
                state: Mutex::new(DashboardState::default()),
                subscriptions: Mutex::new(Vec::new()),
            }),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Initial sync, then subscribe to every host change event.
    ///
    /// Without an events capability or an event-name table only the initial
    /// sync happens. Mounting twice replaces the earlier subscriptions.
    pub fn mount(&self) {
        self.inner.sync();
        self.unmount();

        let Some(events) = self.inner.runtime.events() else {
            tracing::debug!("Host exposes no events; live sync disabled");
            return;
        };
        let Some(names) = events.event_names() else {
            tracing::debug!("Host publishes no event names; live sync disabled");
            return;
        };

        let mut subscriptions = Vec::new();
        for name in names.names() {
            let weak: Weak<Inner> = Arc::downgrade(&self.inner);
            let event = name.to_string();
            let listener: EventListener = Arc::new(move |message: MessageRef| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                tracing::debug!(event = %event, %message, "Host event received");
                inner.sync();
            });
            subscriptions.push(events.event_on(name, listener));
        }

        tracing::debug!(count = subscriptions.len(), "Subscribed to host events");
        *lock(&self.inner.subscriptions) = subscriptions;
    }

    /// Stop every host subscription.
    pub fn unmount(&self) {
        let subscriptions: Vec<_> = lock(&self.inner.subscriptions).drain(..).collect();
        for subscription in subscriptions {
            subscription.stop();
        }
    }

    /// Re-derive typed state from the host now.
    pub fn sync_from_host(&self) {
        self.inner.sync();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn world(&self) -> WorldState {
        lock(&self.inner.state).world.clone()
    }

    pub fn inquisitor(&self) -> Inquisitor {
        lock(&self.inner.state).inquisitor.clone()
    }

    pub fn villains(&self) -> Vec<Villain> {
        lock(&self.inner.state).villains.clone()
    }

    pub fn modes(&self) -> ActiveModes {
        lock(&self.inner.state).modes.clone()
    }

    pub fn pending(&self) -> Option<PendingAction> {
        lock(&self.inner.state).pending.clone()
    }

    /// Container shapes of the title and inventory fields at the last sync.
    pub fn list_shapes(&self) -> (ListShape, ListShape) {
        let state = lock(&self.inner.state);
        (state.title_shape, state.inventory_shape)
    }

    pub fn mode_activation(&self, mode: GameMode) -> ModeActivation {
        lock(&self.inner.state).activation(mode)
    }

    /// Current notice text, if it has not expired.
    pub fn notice(&self) -> Option<String> {
        let now = self.inner.now();
        let mut state = lock(&self.inner.state);
        match &state.notice {
            Some(notice) if notice.is_visible_at(now) => Some(notice.text.clone()),
            Some(_) => {
                state.notice = None;
                None
            }
            None => None,
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let notice = self.notice();
        let state = lock(&self.inner.state);
        DashboardSnapshot {
            world: state.world.clone(),
            inquisitor: state.inquisitor.clone(),
            villains: state.villains.clone(),
            modes: state.modes.clone(),
            selected_villain: select_or_first(&state.villains, state.selected_villain.as_deref())
                .cloned(),
            pending: state.pending.clone(),
            notice,
        }
    }

    // =========================================================================
    // Villain selection
    // =========================================================================

    pub fn select_villain(&self, id: &str) -> Result<(), ServiceError> {
        let mut state = lock(&self.inner.state);
        if find_villain(&state.villains, id).is_none() {
            return Err(DomainError::not_found("Villain", id).into());
        }
        state.selected_villain = Some(id.to_string());
        Ok(())
    }

    /// The selected villain, or the first one when the selection is gone.
    pub fn selected_villain(&self) -> Option<Villain> {
        let state = lock(&self.inner.state);
        select_or_first(&state.villains, state.selected_villain.as_deref()).cloned()
    }

    // =========================================================================
    // Game modes
    // =========================================================================

    /// The user toggled `mode`. Returns the notice shown.
    ///
    /// The baseline mode is re-written as locked. An active mode stays
    /// active. Anything else becomes pending confirmation.
    pub fn request_mode(&self, mode: GameMode) -> String {
        if mode.is_baseline() {
            let locked = {
                let mut state = lock(&self.inner.state);
                state.pending = None;
                state.modes.clone()
            };
            self.inner
                .persist("lock-baseline-mode", |container| Ok(write_modes(container, &locked)));
            return self.inner.post_notice(BASELINE_LOCKED.to_string());
        }

        let now = self.inner.now();
        let mut state = lock(&self.inner.state);
        match state.activation(mode).apply(ModeEvent::Request) {
            Ok(_) => {
                state.pending = Some(PendingAction::Mode(mode));
                state.post(format!("是否开启「{}」？开启后不可关闭。", mode), now)
            }
            Err(_) => {
                state.pending = None;
                state.post(already_active(mode), now)
            }
        }
    }

    /// Enable the pending mode and persist the new mode set.
    pub fn confirm_mode(&self) -> Result<String, ServiceError> {
        let now = self.inner.now();
        let (before, mode) = {
            let mut state = lock(&self.inner.state);
            let Some(PendingAction::Mode(mode)) = state.pending.clone() else {
                return Err(ServiceError::NothingPending);
            };
            let transition = state.activation(mode).apply(ModeEvent::Confirm);
            state.pending = None;
            if transition.is_err() {
                // a sync enabled it while the confirmation was open
                return Ok(state.post(already_active(mode), now));
            }
            let before = state.modes.clone();
            state.modes = before.with(mode);
            (before, mode)
        };

        self.inner.persist("enable-mode", |container| {
            Ok(add_mode(container, &before, mode).container)
        });
        Ok(self.inner.post_notice(format!("「{}」已开启。", mode)))
    }

    pub fn cancel_mode(&self) -> Result<String, ServiceError> {
        let now = self.inner.now();
        let mut state = lock(&self.inner.state);
        let Some(PendingAction::Mode(mode)) = state.pending.clone() else {
            return Err(ServiceError::NothingPending);
        };
        state.activation(mode).apply(ModeEvent::Cancel)?;
        state.pending = None;
        Ok(state.post(format!("已取消开启「{}」。", mode), now))
    }

    // =========================================================================
    // Deletions
    // =========================================================================

    pub fn request_delete_title(&self, index: usize) -> String {
        self.request_delete(DeleteTarget::Title(index))
    }

    pub fn request_delete_item(&self, index: usize) -> String {
        self.request_delete(DeleteTarget::Item(index))
    }

    pub fn request_delete_villain(&self, id: &str) -> String {
        self.request_delete(DeleteTarget::Villain(id.to_string()))
    }

    fn request_delete(&self, target: DeleteTarget) -> String {
        let now = self.inner.now();
        let mut state = lock(&self.inner.state);
        let label = state.delete_label(&target);
        let text = format!("确认删除{}「{}」吗？", target.kind_label(), label);
        state.pending = Some(PendingAction::Delete(PendingDelete { target, label }));
        state.post(text, now)
    }

    /// Apply the pending deletion locally, then persist it.
    pub fn confirm_delete(&self) -> Result<String, ServiceError> {
        let pending = {
            let mut state = lock(&self.inner.state);
            match state.pending.take() {
                Some(PendingAction::Delete(pending)) => pending,
                other => {
                    state.pending = other;
                    return Err(ServiceError::NothingPending);
                }
            }
        };

        match &pending.target {
            DeleteTarget::Title(index) => {
                let index = *index;
                let (titles, shape) = {
                    let mut state = lock(&self.inner.state);
                    let titles = state.inquisitor.titles.clone();
                    state.inquisitor.titles = state.inquisitor.titles_without(index)?;
                    (titles, state.title_shape)
                };
                self.inner.persist("delete-title", |container| {
                    delete_title(container, &titles, shape, index).map(|m| m.container)
                });
            }
            DeleteTarget::Item(index) => {
                let index = *index;
                let (inventory, shape) = {
                    let mut state = lock(&self.inner.state);
                    let inventory = state.inquisitor.inventory.clone();
                    state.inquisitor.inventory = state.inquisitor.inventory_without(index)?;
                    (inventory, state.inventory_shape)
                };
                self.inner.persist("delete-item", |container| {
                    delete_item(container, &inventory, shape, index).map(|m| m.container)
                });
            }
            DeleteTarget::Villain(id) => {
                let roster = {
                    let mut state = lock(&self.inner.state);
                    if find_villain(&state.villains, id).is_none() {
                        return Err(MutationError::VillainNotFound(id.clone()).into());
                    }
                    let roster = state.villains.clone();
                    state.villains.retain(|v| &v.id != id);
                    roster
                };
                self.inner.persist("delete-villain", |container| {
                    delete_villain(container, &roster, id).map(|m| m.container)
                });
            }
        }

        Ok(self.inner.post_notice(format!(
            "已删除{}「{}」。",
            pending.target.kind_label(),
            pending.label
        )))
    }

    pub fn cancel_delete(&self) -> Result<String, ServiceError> {
        let now = self.inner.now();
        let mut state = lock(&self.inner.state);
        let Some(PendingAction::Delete(pending)) = state.pending.clone() else {
            return Err(ServiceError::NothingPending);
        };
        state.pending = None;
        Ok(state.post(format!("已取消删除「{}」。", pending.label), now))
    }
}
