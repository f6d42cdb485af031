//! Pending-work containers. The push/pop discipline is the only thing that
//! separates breadth-first from depth-first behavior.

use std::collections::VecDeque;

use serde::Deserialize;

/// A container of pending work items.
pub trait Frontier<T> {
    fn push(&mut self, item: T);

    /// Next item to process, or `None` when nothing is pending.
    fn pop(&mut self) -> Option<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, F: Frontier<T> + ?Sized> Frontier<T> for Box<F> {
    fn push(&mut self, item: T) {
        (**self).push(item)
    }

    fn pop(&mut self) -> Option<T> {
        (**self).pop()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// FIFO frontier: pushes at the tail, pops from the head.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for Queue<T> {
    fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// LIFO frontier: pushes at the head, pops from the head.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: VecDeque<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for Stack<T> {
    fn push(&mut self, item: T) {
        self.items.push_front(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// Frontier discipline selectable at runtime (e.g. from configuration).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Breadth,
    Depth,
}

impl Order {
    pub fn frontier<T: 'static>(self) -> Box<dyn Frontier<T>> {
        match self {
            Order::Breadth => Box::new(Queue::new()),
            Order::Depth => Box::new(Stack::new()),
        }
    }
}
