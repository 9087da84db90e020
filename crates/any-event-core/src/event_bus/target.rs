//! Target references for listener filtering.
//!
//! A target is an opaque handle to a UI element, or a homogeneous collection
//! of such handles. The bus never looks inside a handle; it only compares
//! handles for equality and checks collection membership.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// A single element handle or a collection of element handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRef<H> {
    /// One element.
    Element(H),
    /// A collection of elements, e.g. every row of a list.
    Collection(Vec<H>),
}

impl<H> TargetRef<H> {
    /// Target a single element
    pub fn element(handle: H) -> Self {
        Self::Element(handle)
    }

    /// Target a collection of elements
    pub fn collection(handles: impl IntoIterator<Item = H>) -> Self {
        Self::Collection(handles.into_iter().collect())
    }

    /// The target flattened to its member handles. A single element is a
    /// one-element slice.
    pub fn elements(&self) -> &[H] {
        match self {
            Self::Element(handle) => std::slice::from_ref(handle),
            Self::Collection(handles) => handles,
        }
    }

    /// Whether this target is a collection
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }
}

impl<H: PartialEq> TargetRef<H> {
    /// Check whether a listener filtered on `self` accepts an event aimed
    /// at `target`.
    ///
    /// Matches when both references are equal, or when `self` is a
    /// collection that contains `target` as a member.
    ///
    /// Collections are compared member by member, so two separately built
    /// collections holding the same handles in the same order are equal.
    /// Use `ElementRef` handles when element identity matters.
    pub fn matches(&self, target: &TargetRef<H>) -> bool {
        if self == target {
            return true;
        }
        match (self, target) {
            (Self::Collection(handles), Self::Element(handle)) => handles.contains(handle),
            _ => false,
        }
    }
}

/// A reference-counted element handle compared by identity.
///
/// Two `ElementRef`s are equal only when they point at the same allocation,
/// regardless of the element's contents. Useful for UI widgets that have
/// no meaningful value equality.
pub struct ElementRef<T: ?Sized>(Rc<T>);

impl<T> ElementRef<T> {
    /// Wrap a new element
    pub fn new(element: T) -> Self {
        Self(Rc::new(element))
    }
}

impl<T: ?Sized> ElementRef<T> {
    /// Wrap an element that is already shared
    pub fn from_rc(element: Rc<T>) -> Self {
        Self(element)
    }

    /// The shared element
    pub fn as_rc(&self) -> &Rc<T> {
        &self.0
    }
}

impl<T: ?Sized> Clone for ElementRef<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for ElementRef<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Eq for ElementRef<T> {}

impl<T: ?Sized> Deref for ElementRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> fmt::Debug for ElementRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementRef({:p})", Rc::as_ptr(&self.0))
    }
}
