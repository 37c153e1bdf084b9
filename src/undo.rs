use thiserror::Error;

/// How many actions a party remembers unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum LogError {
    #[error("there is nothing to undo")]
    EmptyLog,
    #[error("there is nothing to redo")]
    NoRedoAvailable,
}

/// A fixed-size stack of reversible actions stored in a ring buffer.
///
/// Pushing onto a full log silently overwrites the oldest entry. Popped
/// entries stay in place and can be restored with [`unpop`](Self::unpop)
/// until the next push.
#[derive(Debug, Clone)]
pub struct UndoRedoLog<T> {
    data: Vec<T>,
    capacity: usize,
    oldest: usize,
    next: usize,
    limit: usize,
    // Tells a full log apart from an empty one when `next == oldest`.
    is_full: bool,
    can_unpop: bool,
}

impl<T> UndoRedoLog<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
            oldest: 0,
            next: 0,
            limit: 0,
            is_full: false,
            can_unpop: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of entries that can currently be popped.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else if self.next <= self.oldest {
            self.capacity - (self.oldest - self.next)
        } else {
            self.next - self.oldest
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.is_full || self.next != self.oldest)
    }

    pub fn can_pop(&self) -> bool {
        !self.is_empty()
    }

    pub fn can_unpop(&self) -> bool {
        self.can_unpop
    }

    /// The most recently pushed entry that has not been popped.
    pub fn peek(&self) -> Result<&T, LogError> {
        if self.is_empty() {
            return Err(LogError::EmptyLog);
        }
        Ok(&self.data[self.prev_index()])
    }

    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.is_full {
            tracing::debug!(capacity = self.capacity, "undo log full, dropping oldest entry");
        }
        if self.next == self.data.len() {
            self.data.push(item);
        } else {
            self.data[self.next] = item;
        }
        self.advance();
        self.limit = self.next;
        self.can_unpop = false;
    }

    /// Steps back over the latest entry and returns it. The entry is kept
    /// until a later push overwrites it.
    pub fn pop(&mut self) -> Result<&T, LogError> {
        if self.is_empty() {
            return Err(LogError::EmptyLog);
        }
        self.next = self.prev_index();
        self.is_full = false;
        self.can_unpop = true;
        Ok(&self.data[self.next])
    }

    /// Restores the entry most recently popped.
    pub fn unpop(&mut self) -> Result<&T, LogError> {
        if !self.can_unpop {
            return Err(LogError::NoRedoAvailable);
        }
        let index = self.next;
        self.advance();
        if self.limit == self.next {
            self.can_unpop = false;
        }
        Ok(&self.data[index])
    }

    fn prev_index(&self) -> usize {
        if self.next == 0 {
            self.capacity - 1
        } else {
            self.next - 1
        }
    }

    // Moving `next` onto `oldest` while full means the oldest entry was overwritten.
    fn advance(&mut self) {
        let overwrote = self.is_full;
        self.next += 1;
        if self.next >= self.capacity {
            self.next = 0;
        }
        if overwrote {
            self.oldest = self.next;
        }
        if self.next == self.oldest {
            self.is_full = true;
        }
    }
}

impl<T> Default for UndoRedoLog<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
