use std::mem;

/// LIFO stack of call frames. The current frame is the last element.
#[derive(Debug)]
pub struct FrameStack<F> {
    frames: Vec<F>,
}

/// A whole frame chain detached by [`FrameStack::save`].
///
/// Consumed by [`FrameStack::restore`]; it cannot be restored twice.
#[derive(Debug)]
#[must_use = "dropping a saved stack discards every frame in it"]
pub struct SavedStack<F> {
    frames: Vec<F>,
}

impl<F> SavedStack<F> {
    /// Number of frames in the chain, including the one current at save time.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The frame that was current when the chain was saved.
    pub fn current(&self) -> Option<&F> {
        self.frames.last()
    }
}

impl<F> Default for FrameStack<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> FrameStack<F> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, frame: F) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<F> {
        self.frames.pop()
    }

    pub fn peek(&self) -> Option<&F> {
        self.frames.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut F> {
        self.frames.last_mut()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.frames.iter().rev()
    }

    /// Push `frame`, then detach the entire chain. The stack is empty afterwards.
    pub fn save(&mut self, frame: F) -> SavedStack<F> {
        self.frames.push(frame);
        let frames = mem::take(&mut self.frames);
        SavedStack { frames }
    }

    /// Reattach a saved chain and hand back the frame that was current at save time.
    ///
    /// # Panics
    ///
    /// Panics if the stack is not empty: only one chain may be swapped out at
    /// a time, and restoring over live frames would corrupt both chains.
    pub fn restore(&mut self, saved: SavedStack<F>) -> F {
        assert!(
            self.frames.is_empty(),
            "cannot restore a saved frame stack while {} frame(s) are active",
            self.frames.len()
        );
        let mut frames = saved.frames;
        let frame = frames
            .pop()
            .unwrap_or_else(|| unreachable!("a saved stack always holds the frame passed to save"));
        self.frames = frames;
        frame
    }
}
