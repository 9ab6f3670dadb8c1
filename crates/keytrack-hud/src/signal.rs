/// Synchronous multi-listener notification channel.
///
/// Listeners run in registration order on the dispatching thread.
pub struct Signal<A> {
    listeners: Vec<(ListenerId, Box<dyn FnMut(&A)>)>,
    next_id: u64,
}

/// Handle returned by [`Signal::add`], used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl<A> Signal<A> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn add(&mut self, listener: impl FnMut(&A) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the listener was already removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn dispatch(&mut self, args: &A) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(args);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl<A> Default for Signal<A> {
    fn default() -> Self {
        Self::new()
    }
}
