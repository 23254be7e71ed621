use std::cell::Cell;
use std::rc::Rc;

/// Liveness flag shared by every clone; cancelling any clone cancels the task.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    live: Rc<Cell<bool>>,
}

impl TaskHandle {
    fn new() -> Self {
        Self {
            live: Rc::new(Cell::new(true)),
        }
    }

    pub fn cancel(&self) {
        self.live.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.live.get()
    }
}

/// Holds at most one live task.
#[derive(Debug)]
pub struct TaskSlot<T> {
    current: Option<(TaskHandle, T)>,
}

impl<T> Default for TaskSlot<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T> TaskSlot<T> {
    /// Cancels whatever was running and starts `task`.
    pub fn start(&mut self, task: T) {
        self.cancel();
        self.current = Some((TaskHandle::new(), task));
    }

    pub fn cancel(&mut self) {
        if let Some((handle, _)) = self.current.take() {
            handle.cancel();
        }
    }

    // A task cancelled through an outside handle is dropped here
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if !self.is_active() {
            self.current = None;
        }
        self.current.as_mut().map(|(_, task)| task)
    }

    pub fn finish(&mut self) -> Option<T> {
        let (handle, task) = self.current.take()?;
        let was_live = handle.is_active();
        handle.cancel();
        was_live.then_some(task)
    }

    pub fn handle(&self) -> Option<TaskHandle> {
        self.current
            .as_ref()
            .filter(|(handle, _)| handle.is_active())
            .map(|(handle, _)| handle.clone())
    }

    pub fn is_active(&self) -> bool {
        self.current
            .as_ref()
            .map_or(false, |(handle, _)| handle.is_active())
    }
}
