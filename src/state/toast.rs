/// Transient notifications, stacked in the order they were issued
///
/// The toast list only grows through `push` and shrinks through `dismiss`;
/// the caller schedules the dismissal timer with the id `push` returns.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a toast at the bottom of the stack and return its id
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let message = message.into();
        match kind {
            ToastKind::Success => tracing::info!("{message}"),
            ToastKind::Error => tracing::warn!("{message}"),
        }

        self.items.push(Toast { id, kind, message });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message)
    }

    /// Remove a toast; ids that are already gone are ignored
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Id the next `push` will hand out
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Ids of toasts still on screen that were pushed at or after `first`
    pub fn issued_since(&self, first: u64) -> Vec<u64> {
        self.items
            .iter()
            .filter(|toast| toast.id >= first)
            .map(|toast| toast.id)
            .collect()
    }

    /// Ids of every toast still on screen, oldest first
    pub fn ids(&self) -> Vec<u64> {
        self.items.iter().map(|toast| toast.id).collect()
    }
}
